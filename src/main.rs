//! hostswitch CLI.
//!
//! Operations may be combined in one invocation and run in a fixed order:
//! set, then list, then switch.

use anyhow::Context;
use clap::Parser;
use hostswitch::hosts::{self, HostsmanCli};
use hostswitch::resolve::SystemResolver;
use hostswitch::set::set_rules;
use hostswitch::{RuleStore, default_config_path, filter, switch};
use tracing_subscriber::EnvFilter;

/// Redirect domains to dev servers and back to production.
#[derive(Parser, Debug)]
#[command(name = "hostswitch", version, about)]
struct Cli {
    /// Set rules: DOMAIN RULE:DEST [RULE:DEST ...]
    ///
    /// An empty DEST clears the rule. A non-address DEST requires --yes.
    #[arg(short, long, num_args = 2.., value_names = ["DOMAIN", "RULE:DEST"])]
    set: Option<Vec<String>>,

    /// Resolve symbolic destinations to addresses now
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// List rules, optionally filtered by anchored domain/rule patterns
    #[arg(short, long, num_args = 0.., value_name = "FILTER")]
    list: Option<Vec<String>>,

    /// Switch every domain to this rule
    #[arg(value_name = "RULE")]
    to: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = default_config_path()?;
    let mut store =
        RuleStore::load(&path).with_context(|| format!("loading {}", path.display()))?;

    // Set errors abandon their batch but must not block list/switch below.
    let mut set_failed = false;
    if let Some(args) = &cli.set {
        let (domain, tokens) = args.split_first().expect("clap enforces num_args >= 2");
        let outcome = set_rules(&mut store, domain, tokens, cli.yes, &SystemResolver);
        if outcome.needs_save() {
            store
                .save(&path)
                .with_context(|| format!("saving {}", path.display()))?;
        }
        if let Some(error) = outcome.error {
            eprintln!("{error}");
            set_failed = true;
        }
    }

    if let Some(filters) = &cli.list {
        let subset = filter::list(&store, filters);
        println!("{}", serde_json::to_string_pretty(&subset)?);
    }

    if let Some(rule) = &cli.to {
        let plan = switch::plan(&store, rule);
        hosts::apply(&plan, &HostsmanCli::new())
            .with_context(|| format!("switching to \"{rule}\""))?;
    }

    if set_failed {
        std::process::exit(1);
    }
    Ok(())
}
