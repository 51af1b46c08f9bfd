use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solaudit::cli::audit::{self, AuditOptions};
use solaudit::config::{LlmOverrides, ProviderKind};

/// Parse provider name from string
fn parse_provider(s: &str) -> Result<ProviderKind, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "solaudit")]
#[command(
    version,
    about = "Multi-agent LLM security auditor for Solidity smart contracts"
)]
struct Cli {
    #[arg(help = "Path to the Solidity contract file")]
    contract: PathBuf,

    #[arg(
        long,
        short,
        help = "Write the plain-text report to this file instead of stdout"
    )]
    output: Option<PathBuf>,

    #[arg(long, value_parser = parse_provider, help = "LLM provider (openai, anthropic)")]
    provider: Option<ProviderKind>,

    #[arg(long, help = "Model to use")]
    model: Option<String>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // Extract panic message
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        // Log the panic
        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mSolAudit encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    // Install panic handler first
    setup_panic_handler();

    // Run the actual CLI
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rt = Runtime::new()?;
    rt.block_on(audit::run(AuditOptions {
        contract: cli.contract,
        output: cli.output,
        overrides: LlmOverrides {
            provider: cli.provider,
            model: cli.model,
        },
    }))?;

    Ok(())
}
