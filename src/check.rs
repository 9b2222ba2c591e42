use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::CheckArgs,
    io_utils,
    loader::{LoadReport, load_catalog},
    session::Session,
};

pub fn execute(args: &CheckArgs) -> Result<()> {
    let session = Session::resolve(&args.dataset, None)?;
    let outcome = load_catalog(&session.source, &session.options)
        .with_context(|| format!("Checking {}", session.source.path().display()))?;
    if args.json {
        return io_utils::write_json(&outcome.report);
    }
    print!("{}", render_report(&outcome.report));
    if outcome.report.dropped_total() == 0 && outcome.report.coercions.is_empty() {
        info!("✓ {} is clean", outcome.report.source);
    }
    Ok(())
}

pub fn render_report(report: &LoadReport) -> String {
    let mut lines = vec![
        format!("source: {}", report.source),
        format!("sha256: {}", report.fingerprint),
        format!("records: {}", report.records),
        format!("dropped rows: {}", report.dropped_total()),
    ];
    for (kind, count) in &report.dropped {
        lines.push(format!("  {kind}: {count}"));
    }
    lines.push(format!("coerced values: {}", report.coercions.len()));
    for coercion in &report.coercions {
        lines.push(format!("  {coercion}"));
    }
    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
