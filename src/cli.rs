//! Clap adapter for strictconf.
//!
//! Compiled only with the `clap` Cargo feature (on by default). Embed
//! [`LoadArgs`] in your own `#[derive(Parser)]` struct to let users pick the
//! config files and the variant on the command line; the only bridge to the
//! core is [`LoadArgs::into_builder()`].
//!
//! ```ignore
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     config: LoadArgs,
//! }
//!
//! let cli = Cli::parse();
//! cli.config.into_builder().init(&CONFIG)?;
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::builder::{Strictconf, StrictconfBuilder};

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Configuration file; repeat to merge several, later files win.
    #[arg(long = "config", value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Which `compose` table to use (e.g. "dev", "prod").
    #[arg(long)]
    pub variant: String,

    /// Separator between section names and variant labels.
    #[arg(long)]
    pub separator: Option<String>,
}

impl LoadArgs {
    pub fn into_builder(self) -> StrictconfBuilder {
        let builder = Strictconf::builder()
            .files(self.files)
            .variant(&self.variant);
        match self.separator {
            Some(sep) => builder.separator(&sep),
            None => builder,
        }
    }
}
