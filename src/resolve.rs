//! Name-resolution seam.

use crate::error::{Result, SwitchError};
use std::net::ToSocketAddrs;

/// Turns a host name into a single address-literal string.
///
/// One call per destination being set; no batching, no caching. Tests
/// inject a fake so the validator's policy branches run without touching
/// the real resolver.
pub trait Resolve {
    /// Resolves `host` to an address literal.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::UnresolvedHost`] when resolution fails.
    fn resolve(&self, host: &str) -> Result<String>;
}

/// System resolver backed by the platform's name service.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, host: &str) -> Result<String> {
        // Port 0 is a placeholder; only the address part is used.
        let addr = (host, 0)
            .to_socket_addrs()
            .map_err(|_| SwitchError::UnresolvedHost {
                host: host.to_string(),
            })?
            .next()
            .ok_or_else(|| SwitchError::UnresolvedHost {
                host: host.to_string(),
            })?;
        Ok(addr.ip().to_string())
    }
}
