/**
 * Minimal harness for the JSON report sender.
 *
 * Point it at any endpoint that accepts a form POST, then run:
 *
 *   cargo run -p acra_json_demo -- http://localhost:8080/report
 *   cargo run -p acra_json_demo -- --config acra.toml
 *   cargo run -p acra_json_demo -- http://localhost:8080/report --dry-run
 *
 * Logging goes through `tracing`; set `RUST_LOG` to change the filter.
 */
use std::process::ExitCode;

use acra_json::{CrashReportData, ReportField, ReportSender, SenderConfig, NULL_VALUE};
use tracing_subscriber::EnvFilter;

/// Used when no URL or config file is given.
const FORM_URI: &str = "http://localhost:8080/report";

/// `RUST_LOG` fallback: the library's events at debug, the demo's at info.
const DEFAULT_LOG_FILTER: &str = "acra_json_core=debug,acra_json_demo=info";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let dry_run = args.iter().any(|a| a == "--dry-run");

    /*
     * Build the sender from a config file, a bare URL, or the default URL.
     */
    let built = match args.iter().position(|a| a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => SenderConfig::load_from(path).and_then(|config| acra_json::sender(config)),
            None => {
                tracing::error!("--config needs a path");
                return ExitCode::FAILURE;
            }
        },
        None => {
            let uri = args
                .iter()
                .find(|a| !a.starts_with("--"))
                .map(String::as_str)
                .unwrap_or(FORM_URI);
            acra_json::sender(uri)
        }
    };

    let sender = match built {
        Ok(sender) => sender,
        Err(err) => {
            tracing::error!(error = %err, "Could not build sender");
            return ExitCode::FAILURE;
        }
    };

    /*
     * A fake report: a couple of real values and one field the "host"
     * could not collect.
     */
    let mut report = CrashReportData::new();
    report.put(ReportField::ReportId, "3f2b9c1e-demo");
    report.put(ReportField::AppVersionName, "1.0");
    report.put(ReportField::AppVersionCode, "1");
    report.put(ReportField::PackageName, "com.example.demo");
    report.put(
        ReportField::StackTrace,
        "java.lang.IllegalStateException: boom\n\tat com.example.Main.run(Main.java:42)",
    );
    report.put(ReportField::Logcat, NULL_VALUE);

    if dry_run {
        match sender.encode_report(&report) {
            Ok(body) => {
                println!("{body}");
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                tracing::error!(error = %err, "Could not encode report");
                return ExitCode::FAILURE;
            }
        }
    }

    match sender.send(&report) {
        Ok(()) => {
            tracing::info!(url = sender.form_uri(), "Report sent");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Report was not delivered");
            ExitCode::FAILURE
        }
    }
}
