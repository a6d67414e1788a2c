// src/main.rs
// =============================================================================
// Entry point of the metis-linkcheck CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Build the link-check requests (from a JSON file or from the arguments)
// 4. Run the batch, print the report
// 5. Exit with a meaningful code (0 = all reachable, 1 = some failed, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;

use cli::{Cli, Commands};
use metis_linkcheck::logging::init_logger;
use metis_linkcheck::{BatchLinkCheckCoordinator, CheckConfig, FieldCheckStatus, LinkCheckRequest};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Ok(0) = every URL reachable, Ok(1) = at least one failed, Err = exit code 2
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_logger(cli.log_level, cli.log_format).context("Failed to initialize logger")?;

    let config = CheckConfig::from(&cli.check);
    let (requests, json) = match cli.command {
        Commands::Batch { file, json } => (read_requests(&file)?, json),
        Commands::Field { field, urls, json } => (vec![LinkCheckRequest::new(field, urls)], json),
    };

    // Configuration problems surface here, before any request goes out
    let coordinator =
        BatchLinkCheckCoordinator::new(&config).context("Invalid link-check configuration")?;

    // Dropping the batch future on Ctrl-C aborts every in-flight check
    let report = tokio::select! {
        report = coordinator.run_batch(&requests) => report,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("Interrupted, batch abandoned");
        }
    };

    print_results(&report, json)?;

    if report.iter().all(FieldCheckStatus::all_succeeded) {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Reads a JSON array of requests from a file, or from stdin when the path is "-"
fn read_requests(path: &Path) -> Result<Vec<LinkCheckRequest>> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read requests from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid link-check requests in {}", path.display()))
}

fn print_results(report: &[FieldCheckStatus], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &[FieldCheckStatus]) {
    println!("{:<6} {:<14} {:>10} {:>10} {:>10}", "#", "FIELD", "SUCCEEDED", "FAILED", "TOTAL");
    println!("{}", "=".repeat(54));

    for (index, status) in report.iter().enumerate() {
        println!(
            "{:<6} {:<14} {:>10} {:>10} {:>10}",
            index + 1,
            status.field_name,
            status.succeeded_count,
            status.failed_count,
            status.total()
        );
    }

    println!();

    let succeeded: usize = report.iter().map(|s| s.succeeded_count).sum();
    let failed: usize = report.iter().map(|s| s.failed_count).sum();

    println!("Summary:");
    println!("   OK:     {}", succeeded);
    println!("   Failed: {}", failed);
    println!("   Total:  {}", succeeded + failed);
}
