//! Microgrid sizer entry point: CLI wiring and report output.

use std::io;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use microgrid_sizer::cli::{Args, OutputFormat};
use microgrid_sizer::report::{SizingReport, profiles_table};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.list_profiles {
        println!("{}", profiles_table());
        return Ok(());
    }

    let site = args.site_config()?;

    // Validate
    let errors = site.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::sync::Arc;

        let state = Arc::new(microgrid_sizer::api::AppState {
            defaults: site.configuration(),
        });
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        return rt
            .block_on(microgrid_sizer::api::serve(state, args.bind))
            .with_context(|| format!("API server on {} failed", args.bind));
    }

    let profile = site.profile()?;
    let report = SizingReport::build(profile, site.inputs()?, site.configuration())?;
    info!(profile = profile.slug(), "sizing complete");
    debug!(?report);

    match args.format {
        OutputFormat::Table => {
            println!("{report}\n");
            println!("{}\n", SizingReport::explanation());
            println!("Calculation Details");
            println!("{}", report.details_table());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            report
                .write_csv(io::stdout().lock())
                .context("failed to write CSV")?;
        }
    }

    Ok(())
}
