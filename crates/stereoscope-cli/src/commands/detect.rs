//! `stereoscope detect` - stereotypes of a single type.

use std::sync::Arc;

use tracing::instrument;

use stereoscope_core::{
    application::{IntrospectingStereotypeFactory, StereotypeFactory},
    domain::Stereotypes,
};

use crate::{
    cli::{DetectArgs, DetectFormat},
    commands::{load_catalog, load_model},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(type_name = %args.type_name))]
pub fn execute(args: DetectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let model = load_model(&args.model)?;
    let catalog = Arc::new(load_catalog(&args.catalog, &config)?);
    let factory = IntrospectingStereotypeFactory::new(&model, catalog)
        .local_only(args.local_only || config.detection.local_only);

    let ty = model.type_ref(&args.type_name)?;
    let stereotypes = factory.from_type(&ty)?;

    match args.format {
        DetectFormat::Json => output.json(&stereotypes),
        DetectFormat::Text => {
            if stereotypes.is_empty() {
                output.info(&format!("No stereotypes detected on {ty}"))?;
                return Ok(());
            }
            output.header(&ty.to_string())?;
            for line in text_lines(&stereotypes) {
                output.data(&line)?;
            }
            Ok(())
        }
    }
}

/// `id  name  priority  groups`, in detection order.
fn text_lines(stereotypes: &Stereotypes) -> Vec<String> {
    stereotypes
        .iter()
        .map(|s| {
            format!(
                "{:<40} {:<24} {:>5}  {}",
                s.id(),
                s.display_name(),
                s.priority(),
                s.groups().join(", ")
            )
        })
        .collect()
}
