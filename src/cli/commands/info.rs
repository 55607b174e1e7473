//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("DSE Transform - Specification transformer registry");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Repository: {}", env!("CARGO_PKG_REPOSITORY"));

    if detailed {
        println!("\nDetailed Information:");
        println!("  - Each transformer type is constructed once per configuration");
        println!("  - Duplicate bindings across modules share one instance");
        println!("  - Construction failures abort assembly before any run");
        println!("  - Transformers are applied concurrently to independent specifications");
        println!("  - Configuration discovery: --config, ./.dse-transform.yaml, XDG config dir");
    }

    Ok(())
}
