//! Catalog command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::TransformerCatalog;

pub fn command() -> Command {
    Command::new("catalog").about("List transformers that configurations can enable by name")
}

pub async fn run(_matches: &ArgMatches) -> Result<()> {
    let catalog = TransformerCatalog::with_builtins();

    println!("Known transformers:");
    for (name, descriptor) in catalog.iter() {
        println!("  {name:<20} {descriptor}");
    }

    Ok(())
}
