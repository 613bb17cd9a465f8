//! Schema selection flags shared by every subcommand.

use std::path::PathBuf;

use clap::Args;

use solarnet_schema::SolarnetSchema;

/// Which schema to run against: the packaged defaults, optionally
/// overridden by extra layer files applied in order.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Additional schema layer files (YAML), applied in order after the
    /// packaged defaults. Later layers win on conflicts.
    #[arg(long = "schema", value_name = "FILE")]
    pub layers: Vec<PathBuf>,

    /// Do not load the packaged default schema; use only the given
    /// layer files.
    #[arg(long, requires = "layers")]
    pub no_defaults: bool,
}

impl SchemaArgs {
    pub fn load(&self) -> anyhow::Result<SolarnetSchema> {
        Ok(SolarnetSchema::new(!self.no_defaults, &self.layers)?)
    }
}
