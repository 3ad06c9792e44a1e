use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::Path;
use svec::cli::Cli;
use svec::demo::SCENARIOS;
use svec::interpreter;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    setup_logging(cli.verbose);

    if cli.demo {
        println!("Running demo scenarios...");
        run_demos().context("Demo scenarios failed")?;
        println!("All scenarios passed!");
    } else if let Some(file_path) = cli.file {
        run_script(&file_path).with_context(|| format!("Failed to run script: {:?}", file_path))?;
    } else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
    }

    Ok(())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG, when set, overrides the -v count.
    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::debug!(?filter, "logging initialised");
}

fn run_script(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("File not found: {:?}", path));
    }
    if path.extension().and_then(|s| s.to_str()) != Some("svec") {
        return Err(anyhow!("File must have .svec extension: {:?}", path));
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    for line in interpreter::run_source(&source)? {
        println!("{line}");
    }
    Ok(())
}

fn run_demos() -> Result<()> {
    for scenario in SCENARIOS {
        println!("--- Running {} ---", scenario.name);
        let output = interpreter::run_source(scenario.source)
            .with_context(|| format!("Scenario {} did not run", scenario.name))?;
        for line in &output {
            println!("{line}");
        }
        if output != scenario.expected {
            bail!(
                "Scenario {} failed: expected {:?}, got {:?}",
                scenario.name,
                scenario.expected,
                output
            );
        }
    }
    Ok(())
}
