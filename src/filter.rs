//! Rule listing and filtering.

use crate::store::RuleStore;
use regex::Regex;

/// One compiled list filter.
///
/// Filters are full-string patterns, anchored at both ends. A filter that
/// is not a valid pattern degrades to exact string comparison instead of
/// becoming an error; listing has no failure modes.
enum Filter {
    Pattern(Regex),
    Exact(String),
}

impl Filter {
    fn compile(raw: &str) -> Self {
        Regex::new(&format!("^(?:{raw})$")).map_or_else(
            |_| Self::Exact(raw.to_string()),
            Self::Pattern,
        )
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(name),
            Self::Exact(text) => text == name,
        }
    }
}

/// Returns the subset of `store` matching any of `filters`.
///
/// With no filters the whole store comes back. Otherwise a (domain, rule)
/// pair is included iff at least one filter fully matches either the domain
/// name or the rule name; each filter is tested independently against both
/// fields. Domains with no matching rules are omitted entirely. An empty
/// result is valid output.
#[must_use]
pub fn list(store: &RuleStore, filters: &[String]) -> RuleStore {
    if filters.is_empty() {
        return store.clone();
    }

    let compiled: Vec<Filter> = filters.iter().map(|f| Filter::compile(f)).collect();
    let matches_any = |name: &str| compiled.iter().any(|f| f.matches(name));

    let mut output = RuleStore::new();
    for (domain, rules) in store.iter() {
        for (rule, destination) in rules {
            if matches_any(domain) || matches_any(rule) {
                output.set_rule(domain.clone(), rule.clone(), destination.clone());
            }
        }
    }
    output
}
