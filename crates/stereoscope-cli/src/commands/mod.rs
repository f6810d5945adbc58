//! Command handlers. Each translates its arguments into calls on the core
//! services and adapters and prints the result; no detection logic lives here.

use std::path::Path;

use tracing::{debug, instrument};

use stereoscope_adapters::{BuiltinCatalog, CodebaseModel, source_for};
use stereoscope_core::{application::CatalogService, domain::Catalog};

use crate::{
    cli::CatalogSelection,
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod catalog;
pub mod completions;
pub mod config;
pub mod detect;
pub mod init;
pub mod tree;

/// Built-in catalog (unless disabled by flag or config), then the configured
/// paths, then the `--catalog` paths, merged in that order.
#[instrument(skip_all)]
pub(crate) fn load_catalog(selection: &CatalogSelection, config: &AppConfig) -> CliResult<Catalog> {
    let mut service = CatalogService::new();
    if config.catalog.builtin && !selection.no_builtin {
        service.add_source(Box::new(BuiltinCatalog::new()));
    }
    for path in config.catalog.paths.iter().chain(&selection.catalogs) {
        if !path.exists() {
            return Err(CliError::FileNotFound { path: path.clone() });
        }
        service.add_source(source_for(path));
    }

    debug!(sources = ?service.locators(), "Loading catalog");
    Ok(service.load()?)
}

pub(crate) fn load_model(path: &Path) -> CliResult<CodebaseModel> {
    if !path.exists() {
        return Err(CliError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(CodebaseModel::load(path)?)
}
