//! Apply command implementation

use anyhow::{anyhow, Context, Result};
use clap::{ArgMatches, Command};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::cli::utils;
use crate::specification::Specification;
use crate::utils::{ensure_directory, format_duration, sanitize_filename};

pub fn command() -> Command {
    Command::new("apply")
        .about("Apply the configured transformers to specification files")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory for transformed specifications (stdout if omitted)")
                .value_name("DIR"),
        )
        .arg(
            clap::Arg::new("specifications")
                .help("Specification files")
                .value_name("SPEC")
                .num_args(1..)
                .required(true),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let assembled = utils::assemble(config)?;

    let paths: Vec<PathBuf> = matches
        .get_many::<String>("specifications")
        .ok_or_else(|| anyhow!("No specification files given"))?
        .map(PathBuf::from)
        .collect();

    let specifications = paths
        .iter()
        .map(|path| Specification::from_file(path))
        .collect::<Result<Vec<_>>>()?;

    let start = Instant::now();
    let transformed = assembled.stage().apply_all(specifications).await?;
    info!(
        "Transformed {} specification(s) in {}",
        transformed.len(),
        format_duration(start.elapsed())
    );

    match matches.get_one::<String>("output") {
        Some(output) => {
            for target in write_outputs(Path::new(output), &paths, &transformed)? {
                println!("Wrote {}", target.display());
            }
        }
        None => print!("{}", render_documents(&transformed)?),
    }

    Ok(())
}

/// Render specifications as a multi-document YAML stream
pub fn render_documents(specifications: &[Specification]) -> Result<String> {
    let mut out = String::new();
    for specification in specifications {
        out.push_str("---\n");
        out.push_str(&specification.to_yaml()?);
    }
    Ok(out)
}

/// Write each transformed specification into `output`, named after its input.
///
/// Fails without writing anything when two inputs map to the same file name.
pub fn write_outputs(
    output: &Path,
    inputs: &[PathBuf],
    transformed: &[Specification],
) -> Result<Vec<PathBuf>> {
    let mut claimed: HashMap<String, &Path> = HashMap::new();
    let mut planned = Vec::with_capacity(transformed.len());

    for (input, specification) in inputs.iter().zip(transformed) {
        let file_name = input
            .file_name()
            .map(|n| sanitize_filename(&n.to_string_lossy()))
            .unwrap_or_else(|| format!("{}.yaml", sanitize_filename(&specification.name)));

        if let Some(previous) = claimed.insert(file_name.clone(), input) {
            return Err(anyhow!(
                "Inputs {:?} and {:?} would both be written to {:?}",
                previous,
                input,
                output.join(&file_name)
            ));
        }
        planned.push((output.join(file_name), specification));
    }

    ensure_directory(output)?;

    let mut written = Vec::with_capacity(planned.len());
    for (target, specification) in planned {
        std::fs::write(&target, specification.to_yaml()?)
            .with_context(|| format!("Failed to write {:?}", target))?;
        written.push(target);
    }

    Ok(written)
}
