//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for hostswitch operations.
pub type Result<T> = std::result::Result<T, SwitchError>;

/// Errors returned by hostswitch operations.
#[derive(Debug, Error)]
pub enum SwitchError {
    /// The rule file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rule file exists but is not well-formed JSON.
    #[error("malformed rule file {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A `rule:destination` token lacks exactly one separator.
    #[error("expected rule:destination, got \"{token}\"")]
    InputFormat {
        /// The offending token.
        token: String,
    },

    /// A symbolic destination could not (or was not permitted to) be
    /// resolved to an address literal.
    #[error("cannot set a domain to resolve to another domain; pass --yes to resolve \"{host}\" now")]
    UnresolvedHost {
        /// The symbolic host name.
        host: String,
    },

    /// The external hosts manager failed to run or exited non-zero.
    #[error("hosts manager {program} failed: {message}")]
    Hostsman {
        /// The program that was invoked.
        program: String,
        /// Spawn or exit-status detail.
        message: String,
    },

    /// The per-user config path could not be derived.
    #[error("could not determine home directory for the rule file")]
    NoHomeDir,
}

impl SwitchError {
    /// Returns `true` for errors local to a single "set" request.
    ///
    /// These abandon the current token batch but must not prevent list or
    /// switch operations requested in the same invocation.
    #[must_use]
    pub fn is_set_local(&self) -> bool {
        matches!(self, Self::InputFormat { .. } | Self::UnresolvedHost { .. })
    }
}
