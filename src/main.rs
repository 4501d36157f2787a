//! # rmfpack CLI
//!
//! Command-line interface for the rmfpack library.

use std::fs;
use std::io::{self, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use rmfpack::cli::Args;
use rmfpack::core::{Aggregator, build_series, to_json_view};
use rmfpack::format::{OutputFormat, to_format_string};
use rmfpack::session::SessionStore;
use rmfpack::{Record, RmfError, logging};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), RmfError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    logging::init(args.debug);

    let criteria = args.filter_criteria()?;
    let paths = args.report_paths()?;
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();
    // Human-readable progress only when stdout isn't carrying data
    let chatty = !args.writes_stdout();

    if chatty {
        println!("📦 rmfpack v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Reports: {}", paths.len());
        println!("💾 Output:  {output_path}");
        println!("📄 Format:  {format}");
        if let Some(ref class) = criteria.service_class {
            println!("🏷️  Class:   {class}");
        }
        if let Some(ref start) = criteria.start_date {
            println!("📅 After:   {start}");
        }
        if let Some(ref end) = criteria.end_date {
            println!("📅 Before:  {end}");
        }
        println!();
        println!("⏳ Scanning reports...");
    }

    if paths.is_empty() {
        tracing::warn!(pattern = %args.pattern, "No report files matched");
    }

    let batch = Aggregator::with_config(args.scan_config()).scan_paths(&paths);
    let store = SessionStore::new();
    let dataset = store.replace(batch);
    let view = dataset.view(&criteria);

    if chatty {
        println!(
            "   Found {} records in {} of {} files ({:.2}s)",
            dataset.len(),
            dataset.stats.files_success,
            dataset.stats.files_parsed,
            dataset.stats.parse_time_seconds
        );
        for error in &dataset.stats.errors {
            println!("   ⚠️  {error}");
        }
        if criteria.is_active() {
            println!("🔍 {} records after filtering", view.len());
        }
    }

    if args.metadata {
        return print_stdout(&serde_json::to_string_pretty(&dataset.metadata)?);
    }
    if args.series {
        return print_stdout(&serde_json::to_string_pretty(&build_series(&view))?);
    }

    let rendered = render(&view, dataset.len(), format)?;
    if args.output == "-" {
        return print_stdout(&rendered);
    }

    println!("💾 Writing {format}...");
    fs::write(&output_path, rendered)?;

    println!();
    println!("✅ Done! Output saved to {output_path}");
    println!();
    println!("📊 Summary:");
    println!("   Files:     {}", dataset.stats.files_parsed);
    if dataset.stats.has_errors() {
        println!("   Failed:    {}", dataset.stats.files_failed);
    }
    println!("   Records:   {}", dataset.len());
    if criteria.is_active() {
        println!("   Exported:  {}", view.len());
    }
    println!("   Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Renders the export; JSON reports the unfiltered size as `total`.
fn render(view: &[Record], total: usize, format: OutputFormat) -> Result<String, RmfError> {
    match format {
        OutputFormat::Json => to_json_view(view, total),
        other => to_format_string(view, other),
    }
}

fn print_stdout(text: &str) -> Result<(), RmfError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
