//! Switch resolution.
//!
//! A switch request names one rule; the resolver walks the whole store and
//! decides, per domain, whether its hosts entry should be removed or
//! (re)inserted. There is no per-domain opt-out: every domain lands in
//! exactly one side of the plan.

use crate::store::RuleStore;

/// Derived remove/insert operation set for one switch request.
///
/// Ephemeral: computed fresh from the current store on every request and
/// handed straight to the hosts manager, never persisted. Ordering follows
/// the store's deterministic enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchPlan {
    /// Domains whose hosts entry must be removed.
    pub remove: Vec<String>,
    /// `(domain, destination)` bindings to insert.
    pub insert: Vec<(String, String)>,
}

impl SwitchPlan {
    /// Returns `true` when the plan carries no operations at all.
    ///
    /// An empty plan must not trigger any hosts-manager invocation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.insert.is_empty()
    }
}

/// Computes the switch plan for `target_rule` over the full store.
///
/// A domain goes to `remove` when the rule is absent from it or maps to the
/// empty tombstone; otherwise its binding goes to `insert`.
#[must_use]
pub fn plan(store: &RuleStore, target_rule: &str) -> SwitchPlan {
    let mut plan = SwitchPlan::default();
    for (domain, rules) in store.iter() {
        match rules.get(target_rule) {
            Some(destination) if !destination.is_empty() => {
                plan.insert.push((domain.clone(), destination.clone()));
            }
            _ => plan.remove.push(domain.clone()),
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RuleStore {
        let mut store = RuleStore::new();
        store.set_rule("site.test", "dev", "1.2.3.4");
        store.set_rule("site.test", "prod", "");
        store
    }

    #[test]
    fn present_rule_inserts() {
        let p = plan(&sample(), "dev");
        assert!(p.remove.is_empty());
        assert_eq!(
            p.insert,
            vec![("site.test".to_string(), "1.2.3.4".to_string())]
        );
    }

    #[test]
    fn tombstone_removes_like_absent_rule() {
        let p = plan(&sample(), "prod");
        assert_eq!(p.remove, vec!["site.test".to_string()]);
        assert!(p.insert.is_empty());

        // Absent rule behaves identically.
        assert_eq!(plan(&sample(), "missing"), p);
    }

    #[test]
    fn empty_store_yields_empty_plan() {
        let p = plan(&RuleStore::new(), "dev");
        assert!(p.is_empty());
    }

    #[test]
    fn every_domain_appears_exactly_once() {
        let mut store = sample();
        store.set_rule("api.test", "dev", "10.0.0.1");
        store.set_rule("cdn.test", "prod", "10.0.0.2");
        store.set_rule("mail.test", "dev", "");

        for rule in ["dev", "prod", "missing"] {
            let p = plan(&store, rule);
            let mut seen: Vec<&str> = p
                .remove
                .iter()
                .map(String::as_str)
                .chain(p.insert.iter().map(|(d, _)| d.as_str()))
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, vec!["api.test", "cdn.test", "mail.test", "site.test"]);
        }
    }

    #[test]
    fn plan_order_is_deterministic() {
        let mut store = RuleStore::new();
        store.set_rule("b.test", "dev", "2.2.2.2");
        store.set_rule("a.test", "dev", "1.1.1.1");
        store.set_rule("c.test", "dev", "3.3.3.3");

        let p = plan(&store, "dev");
        let domains: Vec<&str> = p.insert.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(domains, vec!["a.test", "b.test", "c.test"]);
        assert_eq!(p, plan(&store, "dev"));
    }
}
