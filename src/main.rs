use anyhow::{Context, Result};
use clap::Parser;
use desviar::{
    analyzer::{self, AnalyzerConfig},
    cli::{Cli, OutputFormat},
    csv_output, filter, html_output,
    json_output::JsonReport,
    report, stats,
    table::SignalTable,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    // Parse filter expression if provided
    let filter = if let Some(expr) = &args.filter {
        filter::SignalFilter::from_expr(expr)?
    } else {
        filter::SignalFilter::all()
    };

    let config = AnalyzerConfig {
        filter,
        ..Default::default()
    };

    let table = SignalTable::from_csv_path(&args.input)
        .with_context(|| format!("failed to read recording {}", args.input.display()))?;
    let analysis = analyzer::analyze_table(&table, &config);

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&analysis.report)),
        OutputFormat::Json => println!("{}", JsonReport::from_report(&analysis.report).to_json()?),
        OutputFormat::Csv => print!("{}", csv_output::to_csv(&analysis.report)),
        OutputFormat::Html => print!("{}", html_output::to_html(&analysis.report)),
    }

    if args.stats_extended {
        let extended = analyzer::collect_extended_stats(&table, &analysis.mapping);
        stats::print_extended_summary(&extended);
    }

    Ok(())
}
