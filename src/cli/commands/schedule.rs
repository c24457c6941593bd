//! Schedule command handler
//!
//! Renders the weekly timetable of the selection in the requested format.

use super::Workspace;
use selector_helper::config::Config;
use selector_helper::core::report::{ReportContext, ReportFormat};
use selector_helper::{error, info};
use std::path::{Path, PathBuf};

/// Heading of rendered schedules
const REPORT_TITLE: &str = "Weekly Schedule";

/// Run the schedule command
pub fn run(workspace: &Workspace, format: ReportFormat, output: Option<&Path>, config: &Config) {
    if let Err(err) = render(workspace, format, output, config) {
        error!("Schedule rendering failed: {err}");
        eprintln!("✗ {err}");
    }
}

fn render(
    workspace: &Workspace,
    format: ReportFormat,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = &workspace.session;
    let ctx = ReportContext::new(REPORT_TITLE, session.selected(), session.marked());
    let reporter = format.reporter();

    let path = match (output, format) {
        (Some(path), _) => path.to_path_buf(),
        (None, ReportFormat::Text) => {
            print!("{}", reporter.render(&ctx)?);
            return Ok(());
        }
        (None, _) => default_output_path(config, format),
    };

    reporter.generate(&ctx, &path)?;
    info!("Wrote {format} schedule to {}", path.display());
    println!("✓ Schedule written: {}", path.display());
    Ok(())
}

/// `<reports_dir>/schedule.<ext>`
fn default_output_path(config: &Config, format: ReportFormat) -> PathBuf {
    let dir = if config.paths.reports_dir.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(&config.paths.reports_dir)
    };
    dir.join(format!("schedule.{}", format.extension()))
}
