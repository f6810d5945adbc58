//! `stereoscope catalog` - list catalog groups in prioritized order.

use serde::Serialize;
use tracing::instrument;

use stereoscope_core::domain::{Catalog, GroupType, StereotypeGroup};

use crate::{
    cli::{CatalogArgs, CatalogFormat},
    commands::load_catalog,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One listed group plus the number of stereotypes in it.
#[derive(Debug, Serialize)]
struct GroupRow<'a> {
    #[serde(flatten)]
    group: &'a StereotypeGroup,
    stereotypes: usize,
}

#[instrument(skip_all)]
pub fn execute(args: CatalogArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = load_catalog(&args.catalog, &config)?;
    let rows = rows(&catalog, args.group_type.map(GroupType::from));

    match args.format {
        CatalogFormat::Json => output.json(&rows)?,
        CatalogFormat::List => {
            for row in &rows {
                output.data(row.group.id())?;
            }
        }
        CatalogFormat::Table => {
            if rows.is_empty() {
                output.info("No groups found")?;
                return Ok(());
            }
            output.header("Catalog groups:")?;
            for row in &rows {
                output.data(&format!(
                    "  {:<28} {:<16} {:<13} {:>5} {:>4}",
                    row.group.id(),
                    row.group.display_name(),
                    row.group.group_type(),
                    row.group.priority(),
                    row.stereotypes
                ))?;
            }
        }
    }
    Ok(())
}

fn rows(catalog: &Catalog, group_type: Option<GroupType>) -> Vec<GroupRow<'_>> {
    let groups: Vec<&StereotypeGroup> = match group_type {
        Some(group_type) => catalog.groups().by_type(group_type).collect(),
        None => catalog.groups().iter().collect(),
    };
    groups
        .into_iter()
        .map(|group| GroupRow {
            group,
            stereotypes: catalog
                .definitions()
                .iter()
                .filter(|d| catalog.group_ids_for(d.id()).iter().any(|id| id == group.id()))
                .count(),
        })
        .collect()
}
