//! List command implementation

use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::utils;
use crate::AssembledConfiguration;

pub fn command() -> Command {
    Command::new("list")
        .about("Assemble the configuration and list the registered transformers")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format")
                .value_parser(["text", "yaml", "json"])
                .default_value("text"),
        )
}

/// One registered transformer as reported by `list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerListing {
    /// Catalog name, when the type is in the catalog
    pub name: Option<String>,

    /// Implementation type
    pub type_name: String,

    /// Modules that bound the transformer
    pub bound_by: Vec<String>,
}

/// Build the listing for an assembled configuration
pub fn listings(assembled: &AssembledConfiguration) -> Vec<TransformerListing> {
    assembled
        .transformers()
        .descriptors()
        .map(|descriptor| TransformerListing {
            name: assembled.catalog().name_of(descriptor).map(str::to_string),
            type_name: descriptor.type_name().to_string(),
            bound_by: assembled.transformers().bound_by(descriptor).to_vec(),
        })
        .collect()
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let assembled = utils::assemble(config)?;
    let listings = listings(&assembled);

    info!("Listing {} registered transformer(s)", listings.len());

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    print!("{}", render(&listings, format)?);

    Ok(())
}

/// Render listings in the requested output format
pub fn render(listings: &[TransformerListing], format: &str) -> Result<String> {
    match format {
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(listings)?)),
        "yaml" => Ok(serde_yaml::to_string(listings)?),
        "text" => {
            if listings.is_empty() {
                return Ok("No transformers registered.\n".to_string());
            }

            let mut out = String::from("Registered transformers:\n\n");
            for listing in listings {
                out.push_str(&format!(
                    "  {}\n",
                    listing.name.as_deref().unwrap_or(listing.type_name.as_str())
                ));
                out.push_str(&format!("    Type: {}\n", listing.type_name));
                out.push_str(&format!("    Bound by: {}\n", listing.bound_by.join(", ")));
            }
            Ok(out)
        }
        other => Err(anyhow!("Unsupported format: {}", other)),
    }
}
