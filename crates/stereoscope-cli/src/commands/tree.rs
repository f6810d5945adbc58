//! `stereoscope tree` - render the classified package tree.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use stereoscope_adapters::{BufferSink, DefaultNodeHandler, WriterSink};
use stereoscope_core::application::{
    CachingStereotypeFactory, IntrospectingStereotypeFactory, TreeWalker, WalkOptions, WalkReport,
    ports::LineSink,
};

use crate::{
    cli::{OutputFormat, TreeArgs},
    commands::{load_catalog, load_model},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    render::StyledNodeHandler,
};

/// Flags win over configuration; an empty `--group` list falls back to the
/// configured groupers.
fn walk_options(args: &TreeArgs, config: &AppConfig) -> WalkOptions {
    WalkOptions {
        groupers: if args.groupers.is_empty() {
            config.tree.groupers.clone()
        } else {
            args.groupers.clone()
        },
        fail_fast: args.fail_fast || config.tree.fail_fast,
        show_methods: args.methods || config.tree.show_methods,
    }
}

#[instrument(skip_all, fields(model = %args.model.display()))]
pub fn execute(args: TreeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let model = load_model(&args.model)?;
    let catalog = Arc::new(load_catalog(&args.catalog, &config)?);

    let factory = CachingStereotypeFactory::new(
        IntrospectingStereotypeFactory::new(&model, catalog.clone())
            .local_only(args.local_only || config.detection.local_only),
    );
    let options = walk_options(&args, &config);
    let show_methods = options.show_methods;
    let mut walker = TreeWalker::new(&factory, &catalog, &model, &model).with_options(options);
    if show_methods {
        walker = walker.with_methods(&model);
    }

    let roots = match &args.root {
        Some(name) => vec![model.package(name)?],
        None => model.roots(),
    };
    let json = output.format() == OutputFormat::Json;
    if roots.is_empty() && !json {
        output.warning("The model declares no packages")?;
        return Ok(());
    }

    let handler = StyledNodeHandler::new(
        DefaultNodeHandler::new().qualified_types(args.qualified),
        output.supports_color(),
    );
    // JSON mode collects the lines so stdout carries a single document.
    let mut buffer = BufferSink::new();
    let mut writer = WriterSink::new(output.data_writer());
    let sink: &mut dyn LineSink = if json { &mut buffer } else { &mut writer };

    let mut report = WalkReport::default();
    for root in &roots {
        report.merge(walker.walk(root, &handler, sink)?);
    }
    info!(
        packages = report.packages,
        types = report.types,
        cached = factory.cached_counts().types,
        "Tree rendered"
    );

    if json {
        return output.json(&TreeDocument {
            lines: buffer.into_lines(),
            report: &report,
        });
    }
    summarize(&report, &output)
}

/// `--output-format json`: the rendered lines and the walk report.
#[derive(Debug, Serialize)]
struct TreeDocument<'a> {
    lines: Vec<String>,
    report: &'a WalkReport,
}

fn summarize(report: &WalkReport, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.success(&format!(
        "{} packages, {} types ({} stereotyped)",
        report.packages, report.types, report.stereotyped_types
    ))?;
    if !report.is_clean() {
        output.warning(&format!(
            "Detection failed for {} element(s):",
            report.failures.len()
        ))?;
        for failure in &report.failures {
            output.print(&format!("  {}: {}", failure.element, failure.message))?;
        }
    }
    Ok(())
}
