//! # Index Subcommand
//!
//! Runs the documentation keyword indexer over a set of markdown files
//! and writes the annotated copies plus the CSV keyword summary.

use std::path::PathBuf;

use clap::Args;

use solarnet_docs::process_documentation_files;

use crate::schema_args::SchemaArgs;

/// Arguments for the index subcommand.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Markdown files to index. A directory expands to its `.md` files.
    #[arg(required = true, value_name = "PATH")]
    pub sources: Vec<PathBuf>,

    /// Directory for the annotated documents and the CSV summary.
    #[arg(long, default_value = "generated", value_name = "DIR")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub schema: SchemaArgs,
}

pub fn run(args: &IndexArgs) -> anyhow::Result<()> {
    let schema = args.schema.load()?;

    let mut files = Vec::new();
    for source in &args.sources {
        if source.is_dir() {
            for entry in std::fs::read_dir(source)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "md") {
                    files.push(path);
                }
            }
        } else {
            files.push(source.clone());
        }
    }
    files.sort();

    process_documentation_files(&files, &args.output_dir, &schema)?;
    println!(
        "indexed {} document(s) into {}",
        files.len(),
        args.output_dir.display()
    );
    Ok(())
}
