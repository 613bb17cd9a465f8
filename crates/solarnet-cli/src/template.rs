//! # Template Subcommand
//!
//! Prints (or writes as a header-only FITS file) the attribute template
//! for a header with a given role: schema defaults, placeholders for the
//! required keywords, and any conditionally required keywords.

use std::path::PathBuf;

use clap::Args;

use solarnet_core::{fits, render_card_value};

use crate::schema_args::SchemaArgs;

/// Arguments for the template subcommand.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Generate the template for a primary HDU.
    #[arg(long)]
    pub primary: bool,

    /// Generate the template for an observation HDU.
    #[arg(long)]
    pub obs: bool,

    /// Observatory type, e.g. "ground-based"; enables the matching
    /// conditional requirements.
    #[arg(long, value_name = "TYPE")]
    pub obs_type: Option<String>,

    /// Instrument type, e.g. "Spectrograph"; enables the matching
    /// conditional requirements.
    #[arg(long, value_name = "TYPE")]
    pub inst_type: Option<String>,

    /// Write the template as a header-only FITS file instead of printing.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub schema: SchemaArgs,
}

pub fn run(args: &TemplateArgs) -> anyhow::Result<()> {
    let schema = args.schema.load()?;
    let template = schema.attribute_template(
        args.primary,
        args.obs,
        args.obs_type.as_deref(),
        args.inst_type.as_deref(),
    );

    if let Some(output) = &args.output {
        fits::write_headers(output, std::slice::from_ref(&template))?;
        println!(
            "wrote template with {} keyword(s) to {}",
            template.len(),
            output.display()
        );
        return Ok(());
    }

    for card in &template {
        let value = render_card_value(&card.value)
            .unwrap_or_else(|_| card.value.to_string());
        let comment = card.comment.as_str().unwrap_or("");
        println!("{:<8}= {value} / {comment}", card.keyword);
    }
    Ok(())
}
