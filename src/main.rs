use clap::Parser;
use flowwatch::cli::{Cli, Commands};
use flowwatch::detection::RiskSample;
use flowwatch::types::config::{Config, LogFormat};
use flowwatch::FlowWatchResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> FlowWatchResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default_config()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("flowwatch={}", log_level)
            .parse()
            .unwrap_or_else(|_| "flowwatch=info".parse().expect("fallback directive is valid")),
    );

    // Single subscriber for the whole process; the library never installs one
    match config.general.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            flowwatch::cli::commands::init(path).await?;
        }
        Commands::Path { hops } => {
            flowwatch::cli::commands::path(&hops, &config).await?;
        }
        Commands::Risk {
            density,
            age,
            alerts,
            token,
        } => {
            let mut sample = RiskSample::new(density, age, alerts);
            sample.token = token;
            flowwatch::cli::commands::risk(sample, &config).await?;
        }
        Commands::Batch {
            input,
            latest,
            json,
        } => {
            flowwatch::cli::commands::batch(&input, latest, json, &config).await?;
        }
        Commands::Demo => {
            flowwatch::cli::commands::demo(&config).await?;
        }
        Commands::Config => {
            flowwatch::cli::commands::config_cmd(&cli.config, &config).await?;
        }
        Commands::Version => {
            flowwatch::cli::commands::version();
        }
    }

    Ok(())
}
