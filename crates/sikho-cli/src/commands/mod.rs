pub mod concepts;
pub mod explain;
pub mod init;
pub mod level;
pub mod serve;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use sikho_core::Catalog;

/// Load the catalog, naming the directory in the error.
fn load_catalog(data_dir: &Path) -> Result<Catalog> {
    Catalog::load(data_dir)
        .with_context(|| format!("failed to load datasets from {}", data_dir.display()))
}
