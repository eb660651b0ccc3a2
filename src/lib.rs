//! # hostswitch
//!
//! Redirect named domains between alternate destinations — typically a
//! development host and production — by delegating the actual hosts-file
//! edits to an external manager program.
//!
//! Rules live in a small JSON file under the user's home directory:
//! each domain maps rule names ("dev", "prod", ...) to destination address
//! literals. Switching to a rule walks every domain and either inserts its
//! binding for that rule or removes the domain's hosts entry when the rule
//! is absent or empty.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use hostswitch::{RuleStore, hosts, switch};
//!
//! let path = hostswitch::default_config_path()?;
//! let mut store = RuleStore::load(&path)?;
//!
//! store.set_rule("site.test", "dev", "10.0.0.5");
//! store.save(&path)?;
//!
//! let plan = switch::plan(&store, "dev");
//! hosts::apply(&plan, &hosts::HostsmanCli::new())?;
//! ```
//!
//! ## Destinations
//!
//! The hosts file downstream only understands literal addresses, so a
//! destination must be address-shaped (digits, dots, colons). A symbolic
//! host is resolved to one literal at set-time, and only when the caller
//! opts in — never silently. The empty string is a tombstone: for
//! switching it behaves exactly like an absent rule, and it is how rules
//! are "deleted".
//!
//! ## Concurrency
//!
//! One process, one invocation, no locking. Concurrent invocations race on
//! the rule file and the last save wins; this is a documented limitation.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod destination;
pub mod error;
pub mod filter;
pub mod hosts;
pub mod resolve;
pub mod set;
pub mod store;
pub mod switch;

pub use error::{Result, SwitchError};
pub use store::{RuleStore, default_config_path};
pub use switch::SwitchPlan;
