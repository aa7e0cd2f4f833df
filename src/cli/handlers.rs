//! Command execution
//!
//! Each handler turns parsed CLI arguments into configuration, runs the
//! requested operation, prints results, and returns a process exit code:
//! 0 success, 1 analysis/transport failure, 2 usage or configuration error.

use crate::ai::backend::{BackendError, TextRunner};
use crate::analysis::service::AnalyzeService;
use crate::cli::commands::{AnalyzeArgs, HealthArgs};
use crate::cli::output::{HealthStatus, OutputFormatter};
use crate::config::TriageConfig;
use anyhow::Context;
use std::fs;
use std::sync::Arc;
use tracing::{error, info};

/// Troubleshooting hints for transport failures
fn transport_help(error: &BackendError, endpoint: &str) -> String {
    match error {
        BackendError::NetworkError { .. } => format!(
            "Error: {}\n\n\
            Help: Cannot reach the model endpoint. Try:\n\
            1. Install Ollama: https://ollama.ai/\n\
            2. Start Ollama: ollama serve\n\
            3. Pull a model: ollama pull llama3.1\n\n\
            Configured endpoint: {}",
            error, endpoint
        ),
        BackendError::TimeoutError { seconds } => format!(
            "Error: {}\n\n\
            Help: The model did not answer within {} seconds. Large logs or \
            cold models can be slow; raise --timeout or pick a smaller model.",
            error, seconds
        ),
        _ => format!("Error: {}", error),
    }
}

fn config_from_analyze_args(args: &AnalyzeArgs) -> TriageConfig {
    let mut config = TriageConfig::default();
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(max_input_chars) = args.max_input_chars {
        config.max_input_chars = max_input_chars;
    }
    config
}

/// Handles `logtriage analyze <LOG_FILE>`
pub async fn handle_analyze(args: &AnalyzeArgs, quiet: bool) -> i32 {
    let config = config_from_analyze_args(args);

    if let Err(e) = config.validate() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return 2;
    }

    let log = match fs::read_to_string(&args.log_file)
        .with_context(|| format!("Failed to read log file {}", args.log_file.display()))
    {
        Ok(log) => log,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            return 2;
        }
    };

    let filename = args
        .log_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "log.txt".to_string());

    info!(
        filename = %filename,
        bytes = log.len(),
        model = %config.model,
        "Starting analysis"
    );

    let runner = config.create_runner();
    let service =
        AnalyzeService::with_max_input_chars(runner as Arc<dyn TextRunner>, config.max_input_chars);

    let report = match service.analyze(&filename, &log).await {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("{}", transport_help(&e, &config.endpoint));
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    let rendered = match formatter.format(&filename, &report) {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))
            {
                error!("{:#}", e);
                eprintln!("Error: {:#}", e);
                return 1;
            }
            if !quiet {
                println!("Report written to {}", path.display());
            }
        }
        None => println!("{}", rendered),
    }

    0
}

/// Handles `logtriage health`
pub async fn handle_health(args: &HealthArgs) -> i32 {
    let mut config = TriageConfig::default();
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return 2;
    }

    let runner = config.create_runner();
    let healthy = match runner.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            eprintln!("{}", transport_help(&e, &config.endpoint));
            return 1;
        }
    };

    let status = HealthStatus {
        healthy,
        endpoint: config.endpoint.clone(),
        model: config.model.clone(),
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_health(&status) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    }

    if healthy {
        0
    } else {
        1
    }
}
