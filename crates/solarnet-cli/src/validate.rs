//! # Validate Subcommand
//!
//! Validates every header of a FITS file and prints the findings.

use std::path::PathBuf;

use clap::Args;

use solarnet_validate::{validate_file, ValidationOptions};

use crate::schema_args::SchemaArgs;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// FITS file to validate.
    pub file: PathBuf,

    /// Report cards with an empty keyword.
    #[arg(long)]
    pub warn_empty_keyword: bool,

    /// Report keywords with no comment.
    #[arg(long)]
    pub warn_no_comment: bool,

    /// Check values against their schema-declared data types.
    #[arg(long)]
    pub warn_data_type: bool,

    /// Report schema-optional keywords absent from the headers.
    #[arg(long)]
    pub warn_missing_optional: bool,

    #[command(flatten)]
    pub schema: SchemaArgs,
}

pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let schema = args.schema.load()?;
    let options = ValidationOptions {
        warn_empty_keyword: args.warn_empty_keyword,
        warn_no_comment: args.warn_no_comment,
        warn_data_type: args.warn_data_type,
        warn_missing_optional: args.warn_missing_optional,
    };

    let findings = validate_file(&args.file, &options, &schema)?;
    if findings.is_empty() {
        println!("{}: no validation findings", args.file.display());
        return Ok(());
    }
    for finding in &findings {
        println!("{finding}");
    }
    anyhow::bail!(
        "{}: {} validation finding(s)",
        args.file.display(),
        findings.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use solarnet_core::{fits, Header};

    use crate::schema_args::SchemaArgs;

    fn layer_file(dir: &Path) -> PathBuf {
        let path = dir.join("layer.yaml");
        std::fs::write(
            &path,
            "attribute_key:\n  AUTHOR:\n    required: all\n    data_type: str\n",
        )
        .unwrap();
        path
    }

    fn args(file: PathBuf, layer: PathBuf) -> ValidateArgs {
        ValidateArgs {
            file,
            warn_empty_keyword: false,
            warn_no_comment: false,
            warn_data_type: false,
            warn_missing_optional: false,
            schema: SchemaArgs {
                layers: vec![layer],
                no_defaults: true,
            },
        }
    }

    #[test]
    fn test_run_succeeds_on_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let layer = layer_file(dir.path());
        let fits_path = dir.path().join("ok.fits");
        let mut header = Header::new();
        header.set("AUTHOR", "J. Doe", Some("Author"));
        fits::write_headers(&fits_path, &[header]).unwrap();

        assert!(run(&args(fits_path, layer)).is_ok());
    }

    #[test]
    fn test_run_fails_when_findings_exist() {
        let dir = tempfile::tempdir().unwrap();
        let layer = layer_file(dir.path());
        let fits_path = dir.path().join("bad.fits");
        let mut header = Header::new();
        header.set("TELESCOP", "SST", None);
        fits::write_headers(&fits_path, &[header]).unwrap();

        let err = run(&args(fits_path, layer)).unwrap_err();
        assert!(err.to_string().contains("1 validation finding(s)"));
    }
}
