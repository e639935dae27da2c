use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use super::session::Session;
use crate::clipboard::{SystemClipboard, copy_output};
use crate::history_store::HistoryStore;
use crate::models::{AnalysisRequest, AnalysisType, DEFAULT_MODEL, MODEL_PRESETS};
use crate::pipeline::Analyzer;
use crate::render::{html_document, result_html};
use crate::transport::OpenRouterClient;
use crate::utils::{Config, init_logging, sanitize_for_terminal};

#[derive(Parser)]
#[command(name = "devpilot")]
#[command(version = "0.1.0")]
#[command(about = "Send code to an AI model to explain, review, refactor, comment or test it", long_about = None)]
pub struct Cli {
    /// Chat-completion endpoint (defaults to OpenRouter)
    #[arg(long, global = true, env = "DEVPILOT_API_URL")]
    pub api_url: Option<String>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze code read from a file or stdin
    Analyze(AnalyzeArgs),
    /// Interactive session with in-memory history
    Session(SessionArgs),
    /// List the analysis types
    Types,
    /// List the preset model identifiers
    Models,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// File containing the code; stdin when omitted or "-"
    pub file: Option<PathBuf>,

    /// Analysis type, e.g. "Find Bugs" or find-bugs
    #[arg(short = 't', long = "type", default_value = "Explain Code")]
    pub analysis_type: AnalysisType,

    /// Model identifier (any OpenRouter model id)
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Print a complete HTML document instead of the bare answer
    #[arg(long)]
    pub html: bool,

    /// Copy the printed output to the clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Args)]
pub struct SessionArgs {
    /// Initial analysis type
    #[arg(short = 't', long = "type", default_value = "Explain Code")]
    pub analysis_type: AnalysisType,

    /// Initial model identifier
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match &cli.command {
        Some(Commands::Analyze(args)) => {
            let analyzer = build_analyzer(cli.api_url.as_deref())?;
            analyze(&analyzer, args)?;
        }
        Some(Commands::Session(args)) => {
            let analyzer = build_analyzer(cli.api_url.as_deref())?;
            let mut session =
                Session::new(analyzer, args.analysis_type, &args.model, Box::new(SystemClipboard));
            let stdin = io::stdin();
            session.run(stdin.lock(), &mut io::stdout())?;
        }
        Some(Commands::Types) => {
            for analysis_type in AnalysisType::ALL {
                println!("{}", analysis_type);
            }
        }
        Some(Commands::Models) => {
            for model in MODEL_PRESETS {
                let marker = if model == DEFAULT_MODEL { " (default)" } else { "" };
                println!("{}{}", model, marker);
            }
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn build_analyzer(api_url: Option<&str>) -> Result<Arc<Analyzer<OpenRouterClient>>> {
    let mut config = Config::from_env()?;
    if let Some(url) = api_url {
        config = config.with_api_url(url)?;
    }

    let client = OpenRouterClient::with_endpoint(config.api_url.clone(), config.timeout)
        .context("Failed to set up HTTP client")?;
    let history = Arc::new(HistoryStore::new());
    Ok(Arc::new(Analyzer::from_config(client, history, &config)))
}

fn read_code(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read code from {}", path.display())),
        _ => {
            let mut code = String::new();
            io::stdin().read_to_string(&mut code).context("Failed to read code from stdin")?;
            Ok(code)
        }
    }
}

fn analyze(analyzer: &Arc<Analyzer<OpenRouterClient>>, args: &AnalyzeArgs) -> Result<()> {
    let code = read_code(args.file.as_deref())?;
    let request = AnalysisRequest::new(code, args.analysis_type, args.model.clone());

    let result = analyzer.spawn_analysis(request)?.wait().context("Analysis failed")?;

    let body = result_html(&result);
    let output = if args.html { html_document(&body) } else { body };
    println!("{}", sanitize_for_terminal(&output));

    if let Some(detail) = result.error_detail {
        bail!("Could not extract the answer from the response: {}", detail);
    }

    if args.copy {
        match copy_output(&output) {
            Ok(()) => eprintln!("Copied to clipboard!"),
            Err(e) => {
                warn!(error = %e, "clipboard copy failed");
                eprintln!("Warning: {:#}", e);
            }
        }
    }

    Ok(())
}
