//! Hosts-manager invocation.
//!
//! Actual host-entry edits are delegated to an external manager program.
//! [`HostsBackend`] is the seam; [`HostsmanCli`] is the real implementation
//! that shells out, and tests substitute a recording fake.

use crate::error::{Result, SwitchError};
use crate::switch::SwitchPlan;
use std::process::Command;

/// Default external hosts-manager program.
const DEFAULT_PROGRAM: &str = "hostsman";

/// Environment override for the hosts-manager program (used by the test
/// suite).
pub const HOSTSMAN_ENV: &str = "HOSTSWITCH_HOSTSMAN";

/// Applies remove/insert directives to the system hosts file.
pub trait HostsBackend {
    /// Removes the hosts entries for `domains`.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Hostsman`] when the manager fails.
    fn remove(&self, domains: &[String]) -> Result<()>;

    /// Inserts the given `domain:destination` bindings.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Hostsman`] when the manager fails.
    fn insert(&self, bindings: &[String]) -> Result<()>;
}

/// Backend that invokes an external `hostsman` process.
#[derive(Debug, Clone)]
pub struct HostsmanCli {
    program: String,
}

impl HostsmanCli {
    /// Creates a backend using `$HOSTSWITCH_HOSTSMAN` or the default
    /// program name.
    #[must_use]
    pub fn new() -> Self {
        let program = std::env::var(HOSTSMAN_ENV).unwrap_or_else(|_| DEFAULT_PROGRAM.to_string());
        Self { program }
    }

    /// Creates a backend invoking a specific program.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, directive: &str, args: &[String]) -> Result<()> {
        tracing::info!(
            program = %self.program,
            directive = %directive,
            count = args.len(),
            "Invoking hosts manager"
        );

        let status = Command::new(&self.program)
            .arg(directive)
            .args(args)
            .status()
            .map_err(|e| SwitchError::Hostsman {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SwitchError::Hostsman {
                program: self.program.clone(),
                message: format!("exited with {status}"),
            })
        }
    }
}

impl Default for HostsmanCli {
    fn default() -> Self {
        Self::new()
    }
}

impl HostsBackend for HostsmanCli {
    fn remove(&self, domains: &[String]) -> Result<()> {
        self.run("-r", domains)
    }

    fn insert(&self, bindings: &[String]) -> Result<()> {
        self.run("-i", bindings)
    }
}

/// Hands a switch plan to the backend.
///
/// Two independent invocations at most: one removal, one insertion, each
/// skipped when its side of the plan is empty. An entirely empty plan
/// triggers nothing.
///
/// # Errors
///
/// Propagates the first backend failure; attempted exactly once, no retry.
pub fn apply(plan: &SwitchPlan, backend: &dyn HostsBackend) -> Result<()> {
    if !plan.remove.is_empty() {
        backend.remove(&plan.remove)?;
    }
    if !plan.insert.is_empty() {
        let bindings: Vec<String> = plan
            .insert
            .iter()
            .map(|(domain, destination)| format!("{domain}:{destination}"))
            .collect();
        backend.insert(&bindings)?;
    }
    Ok(())
}
