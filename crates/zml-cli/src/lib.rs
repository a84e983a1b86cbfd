//! CLI logic for the ZML diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use zml::{DiagramBuilder, ZmlError};

use error_adapter::warning_reports;

/// Run the ZML CLI application
///
/// Reads the input file, renders it and writes the resulting PNG next to
/// it (or to `--output`). Lines the parser skipped are reported as
/// warnings.
///
/// # Errors
///
/// Returns `ZmlError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ZmlError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path = output_path.display().to_string();
        "Processing diagram"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    config::apply_args(&mut app_config, args);

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let output = builder.parse(&source)?;
    report_warnings(&output.warnings, &source);

    let png = builder.render_png(&output.diagram)?;
    fs::write(&output_path, png)?;

    info!(output_file = output_path.display().to_string(); "PNG exported successfully");

    Ok(())
}

fn report_warnings(warnings: &[zml_parser::error::Diagnostic], source: &str) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in warning_reports(warnings, source) {
        let mut writer = String::new();
        match reporter.render_report(&mut writer, &reportable) {
            Ok(()) => warn!("{writer}"),
            Err(_) => warn!("{reportable}"),
        }
    }
}
