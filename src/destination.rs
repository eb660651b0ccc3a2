//! Destination validation.
//!
//! Destinations end up in a hosts file, which only supports literal-address
//! bindings (no alias chasing). A symbolic host must therefore be collapsed
//! to one literal address at set-time, and only when the caller explicitly
//! opts in — silent resolution is disallowed.

use crate::error::{Result, SwitchError};
use crate::resolve::Resolve;
use once_cell::sync::Lazy;
use regex::Regex;

/// Shape of an address literal: digits, dots, and colons only.
static ADDRESS_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\d.:]+$").expect("ADDRESS_LITERAL: hardcoded regex is invalid")
});

/// Classification of a raw destination string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Empty string — the tombstone, equivalent to rule absence.
    Tombstone,
    /// Address-shaped literal, usable as-is.
    Literal,
    /// A host name that needs resolution before it can be stored.
    Symbolic,
}

/// Classifies `raw` without applying any policy.
#[must_use]
pub fn classify(raw: &str) -> Destination {
    if raw.is_empty() {
        Destination::Tombstone
    } else if ADDRESS_LITERAL.is_match(raw) {
        Destination::Literal
    } else {
        Destination::Symbolic
    }
}

/// Validates a raw destination, resolving symbolic hosts when permitted.
///
/// Tombstones and address literals pass through unchanged. A symbolic host
/// is resolved through `resolver` only when `allow_resolve` is set; the
/// substitution is logged so the user can see what was stored.
///
/// # Errors
///
/// Returns [`SwitchError::UnresolvedHost`] when `raw` is symbolic and
/// resolution was not permitted or failed.
pub fn validate(raw: &str, allow_resolve: bool, resolver: &dyn Resolve) -> Result<String> {
    match classify(raw) {
        Destination::Tombstone | Destination::Literal => Ok(raw.to_string()),
        Destination::Symbolic => {
            if !allow_resolve {
                return Err(SwitchError::UnresolvedHost {
                    host: raw.to_string(),
                });
            }
            let address = resolver.resolve(raw)?;
            tracing::info!(host = %raw, address = %address, "Resolved destination");
            Ok(address)
        }
    }
}

/// Splits a `rule:destination` token.
///
/// Exactly one separator is required: a token with none, or with a colon in
/// the destination as well, is rejected rather than guessed at.
///
/// # Errors
///
/// Returns [`SwitchError::InputFormat`] on a malformed token.
pub fn parse_token(token: &str) -> Result<(&str, &str)> {
    let mut parts = token.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(rule), Some(destination), None) => Ok((rule, destination)),
        _ => Err(SwitchError::InputFormat {
            token: token.to_string(),
        }),
    }
}
