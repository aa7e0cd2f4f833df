use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// AI-powered CI/CD failure triage from build logs
#[derive(Parser, Debug)]
#[command(
    name = "logtriage",
    about = "AI-powered CI/CD failure triage from build logs",
    version,
    author,
    long_about = "logtriage extracts the failure-relevant excerpt from a CI/CD build log, \
                  classifies the root cause, and proposes a remediation, using a locally \
                  hosted model via Ollama."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose output (debug logging)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a CI/CD build log",
        long_about = "Reads a build log, extracts the failure-focused section, classifies \
                      the root cause, and suggests a fix.\n\n\
                      Examples:\n  \
                      logtriage analyze build.log\n  \
                      logtriage analyze build.log --format json\n  \
                      logtriage analyze build.log --model qwen2.5-coder:7b --timeout 120"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Check model endpoint availability",
        long_about = "Checks that the configured Ollama endpoint is reachable.\n\n\
                      Examples:\n  \
                      logtriage health\n  \
                      logtriage health --format json"
    )]
    Health(HealthArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "LOG_FILE", help = "Path to the build log to analyze")]
    pub log_file: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "URL",
        help = "Ollama endpoint (overrides LOGTRIAGE_ENDPOINT)"
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name to use (overrides LOGTRIAGE_MODEL)"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Request timeout in seconds (overrides LOGTRIAGE_REQUEST_TIMEOUT)"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "CHARS",
        help = "Maximum raw log characters kept, tail-anchored (overrides LOGTRIAGE_MAX_INPUT_CHARS)"
    )]
    pub max_input_chars: Option<usize>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct HealthArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "URL",
        help = "Ollama endpoint (overrides LOGTRIAGE_ENDPOINT)"
    )]
    pub endpoint: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
