//! The "set" flow: token parsing, validation, store mutation.
//!
//! Tokens are applied independently and in order. The first malformed or
//! unresolvable token abandons the rest of the batch, but mutations already
//! made stay in the store and are still persisted by the caller — there is
//! no rollback.

use crate::destination::{parse_token, validate};
use crate::error::SwitchError;
use crate::resolve::Resolve;
use crate::store::RuleStore;

/// Result of one set batch.
#[derive(Debug)]
pub struct SetOutcome {
    /// Number of tokens applied to the store.
    pub applied: usize,
    /// The error that stopped the batch, if any.
    pub error: Option<SwitchError>,
}

impl SetOutcome {
    /// Returns `true` when the store was mutated and needs saving.
    #[must_use]
    pub const fn needs_save(&self) -> bool {
        self.applied > 0
    }
}

/// Applies a batch of `rule:destination` tokens to `domain`.
///
/// Each token is parsed, its destination validated (resolving symbolic
/// hosts only when `allow_resolve` is set), and written into the store.
/// Processing stops at the first failing token; its effect is skipped and
/// the error is reported in the outcome rather than returned, so the
/// caller can persist prior mutations and carry on with unrelated
/// operations.
pub fn set_rules(
    store: &mut RuleStore,
    domain: &str,
    tokens: &[String],
    allow_resolve: bool,
    resolver: &dyn Resolve,
) -> SetOutcome {
    let mut applied = 0;
    for token in tokens {
        let step = parse_token(token)
            .and_then(|(rule, destination)| {
                Ok((rule, validate(destination, allow_resolve, resolver)?))
            });
        match step {
            Ok((rule, destination)) => {
                store.set_rule(domain, rule, destination);
                applied += 1;
            }
            Err(error) => {
                return SetOutcome {
                    applied,
                    error: Some(error),
                };
            }
        }
    }
    SetOutcome {
        applied,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    struct NoResolver;

    impl Resolve for NoResolver {
        fn resolve(&self, host: &str) -> Result<String> {
            Err(SwitchError::UnresolvedHost {
                host: host.to_string(),
            })
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn applies_whole_batch() {
        let mut store = RuleStore::new();
        let outcome = set_rules(
            &mut store,
            "site.test",
            &tokens(&["dev:1.2.3.4", "prod:5.6.7.8"]),
            false,
            &NoResolver,
        );

        assert_eq!(outcome.applied, 2);
        assert!(outcome.error.is_none());
        assert_eq!(store.rules("site.test").unwrap().len(), 2);
    }

    #[test]
    fn malformed_token_stops_batch_but_keeps_prior() {
        let mut store = RuleStore::new();
        let outcome = set_rules(
            &mut store,
            "site.test",
            &tokens(&["dev:1.2.3.4", "nocolon", "prod:5.6.7.8"]),
            false,
            &NoResolver,
        );

        assert_eq!(outcome.applied, 1);
        assert!(outcome.needs_save());
        assert!(matches!(
            outcome.error,
            Some(SwitchError::InputFormat { ref token }) if token == "nocolon"
        ));

        let rules = store.rules("site.test").unwrap();
        assert!(rules.contains_key("dev"));
        assert!(!rules.contains_key("prod"));
    }

    #[test]
    fn unresolved_host_skips_its_token_only() {
        let mut store = RuleStore::new();
        store.set_rule("site.test", "dev", "9.9.9.9");

        let outcome = set_rules(
            &mut store,
            "site.test",
            &tokens(&["dev:api.internal"]),
            false,
            &NoResolver,
        );

        assert_eq!(outcome.applied, 0);
        assert!(!outcome.needs_save());
        assert!(matches!(
            outcome.error,
            Some(SwitchError::UnresolvedHost { ref host }) if host == "api.internal"
        ));
        // The failing token left the existing entry untouched.
        assert_eq!(store.rules("site.test").unwrap().get("dev").unwrap(), "9.9.9.9");
    }

    #[test]
    fn empty_destination_sets_tombstone() {
        let mut store = RuleStore::new();
        let outcome = set_rules(&mut store, "site.test", &tokens(&["dev:"]), false, &NoResolver);

        assert_eq!(outcome.applied, 1);
        assert_eq!(store.rules("site.test").unwrap().get("dev").unwrap(), "");
    }
}
