//! Persisted rule store.
//!
//! The store is a two-level mapping, domain → (rule → destination), kept in
//! a single JSON document under the user's home directory. It is loaded once
//! per invocation and written back in full after every mutation batch. There
//! is no cross-process locking: concurrent invocations race and the last
//! save wins.

use crate::error::{Result, SwitchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fixed rule-file name under the user's home directory.
const RULE_FILE_NAME: &str = ".hostswitch.json";

/// Environment override for the rule-file path (used by the test suite).
pub const CONFIG_ENV: &str = "HOSTSWITCH_CONFIG";

/// Mapping of rule name → destination within one domain.
pub type DomainRules = BTreeMap<String, String>;

/// In-memory rule store: domain → (rule → destination).
///
/// `BTreeMap` keeps enumeration deterministic, which the switch resolver
/// relies on for reproducible plans.
///
/// A destination may be the empty string — the tombstone value, equivalent
/// to rule absence for switching purposes. A domain entry, once created, is
/// never pruned, even when every rule under it has been cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleStore {
    domains: BTreeMap<String, DomainRules>,
}

impl RuleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the store from `path`.
    ///
    /// A missing file yields an empty store; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Io`] if an existing file cannot be read, or
    /// [`SwitchError::Parse`] if its contents are not well-formed JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Rule file does not exist, starting empty");
            return Ok(Self::new());
        }

        let text = std::fs::read_to_string(path)?;
        let store = serde_json::from_str(&text).map_err(|source| SwitchError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(store)
    }

    /// Writes the full store to `path` as two-space-indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut text = serde_json::to_string_pretty(&self.domains)
            .map_err(|source| SwitchError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        text.push('\n');
        std::fs::write(path, text)?;

        tracing::debug!(
            path = %path.display(),
            domains = self.domains.len(),
            "Saved rule file"
        );
        Ok(())
    }

    /// Inserts or overwrites `domain → rule → destination`, creating the
    /// domain entry if absent.
    ///
    /// Passing an empty destination records a tombstone; there is no
    /// separate delete operation. The change is in-memory only — call
    /// [`save`](Self::save) afterwards.
    pub fn set_rule(
        &mut self,
        domain: impl Into<String>,
        rule: impl Into<String>,
        destination: impl Into<String>,
    ) {
        let domain = domain.into();
        let rule = rule.into();
        let destination = destination.into();
        tracing::debug!(
            domain = %domain,
            rule = %rule,
            destination = %destination,
            "Setting rule"
        );
        self.domains.entry(domain).or_default().insert(rule, destination);
    }

    /// Iterates domains and their rule mappings in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DomainRules)> {
        self.domains.iter()
    }

    /// Returns the rule mapping for `domain`, if the domain is present.
    #[must_use]
    pub fn rules(&self, domain: &str) -> Option<&DomainRules> {
        self.domains.get(domain)
    }

    /// Number of domain entries (including ones holding only tombstones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Returns `true` if the store holds no domain entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Returns the rule-file path: `$HOSTSWITCH_CONFIG` if set, otherwise
/// `~/.hostswitch.json`.
///
/// # Errors
///
/// Returns [`SwitchError::NoHomeDir`] if no home directory can be found.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(RULE_FILE_NAME))
        .ok_or(SwitchError::NoHomeDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RuleStore {
        let mut store = RuleStore::new();
        store.set_rule("site.test", "dev", "1.2.3.4");
        store.set_rule("site.test", "prod", "");
        store.set_rule("api.test", "dev", "10.0.0.1");
        store
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RuleStore::load(&dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = RuleStore::load(&path).unwrap_err();
        assert!(matches!(err, SwitchError::Parse { .. }));
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");

        let store = sample();
        store.save(&path).unwrap();
        let loaded = RuleStore::load(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn save_writes_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        sample().save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("  \"site.test\""));
        assert!(text.contains("    \"dev\": \"1.2.3.4\""));
    }

    #[test]
    fn set_rule_is_idempotent() {
        let mut once = RuleStore::new();
        once.set_rule("site.test", "dev", "1.2.3.4");

        let mut twice = RuleStore::new();
        twice.set_rule("site.test", "dev", "1.2.3.4");
        twice.set_rule("site.test", "dev", "1.2.3.4");

        assert_eq!(once, twice);
    }

    #[test]
    fn set_rule_overwrites() {
        let mut store = RuleStore::new();
        store.set_rule("site.test", "dev", "1.2.3.4");
        store.set_rule("site.test", "dev", "5.6.7.8");

        assert_eq!(
            store.rules("site.test").unwrap().get("dev").unwrap(),
            "5.6.7.8"
        );
    }

    #[test]
    fn tombstone_keeps_domain_entry() {
        let mut store = RuleStore::new();
        store.set_rule("site.test", "dev", "1.2.3.4");
        store.set_rule("site.test", "dev", "");

        assert_eq!(store.len(), 1);
        assert_eq!(store.rules("site.test").unwrap().get("dev").unwrap(), "");
    }

    #[test]
    fn empty_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");

        RuleStore::new().save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
        assert!(RuleStore::load(&path).unwrap().is_empty());
    }
}
