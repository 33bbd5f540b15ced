//! Tokenlens CLI
//!
//! Command-line interface for the inference service:
//! - Predict masked tokens from typed text
//! - Classify a sketch once, or continuously while it is being drawn
//! - Check the service and generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tokenlens::config::{generate_default_config, Config, LoggingConfig};
use tokenlens::render::{self, color_enabled, OutputFormat, RenderOptions};
use tokenlens::{
    messages, InferenceClient, Locale, MaskPrediction, SketchResult, SketchSession, TextSession,
    TokenPalette,
};

#[derive(Parser)]
#[command(name = "tokenlens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "See what a masked language model or sketch classifier predicts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/tokenlens/config.toml or ./tokenlens.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inference service URL (overrides config)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Output format (pretty, json)
    #[arg(short, long, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Message language (it, en)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the [MASK] token. Reads lines from stdin when no text is given.
    Text {
        /// Text containing [MASK]
        text: Vec<String>,
    },

    /// Watch an image file and classify it while it changes
    Sketch {
        /// Path to the sketch image (JPEG or PNG)
        path: PathBuf,
    },

    /// Classify an image file once
    Classify {
        /// Path to the sketch image (JPEG or PNG)
        path: PathBuf,
    },

    /// Check that the inference service is reachable
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

struct Output {
    format: OutputFormat,
    options: RenderOptions,
}

impl Output {
    fn mask(&self, result: &MaskPrediction) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", render::to_json("mask", result)?),
            OutputFormat::Pretty => {
                println!("{}", render::render_chips(&result.tokens, &self.options));
                println!();
                print!("{}", render::render_bar_chart(&result.predictions, &self.options));
            }
        }
        Ok(())
    }

    fn sketch(&self, result: &SketchResult) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", render::to_json("sketch", result)?),
            OutputFormat::Pretty => {
                println!("{}", render::render_sketch(result, &self.options));
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.server_url {
        config.server.base_url = url.clone();
    }
    if let Some(locale) = cli.locale {
        config.display.locale = locale;
    }

    init_logging(&config.logging);
    tracing::debug!("Tokenlens v{}", env!("CARGO_PKG_VERSION"));

    let output = Output {
        format: cli.format,
        options: RenderOptions {
            enable_color: !cli.no_color && color_enabled(&config.display.color),
            bar_width: config.display.bar_width,
            locale: config.display.locale,
        },
    };

    match cli.command {
        Commands::Text { text } => {
            let client = Arc::new(InferenceClient::new(config.server.clone())?);
            let palette = match config.display.palette_seed {
                Some(seed) => TokenPalette::with_seed(seed),
                None => TokenPalette::new(),
            };
            let mut session = TextSession::new(client, palette);

            if text.is_empty() {
                run_interactive(&mut session, &output).await?;
            } else if !submit(&mut session, &text.join(" "), &output).await? {
                std::process::exit(1);
            }
        }

        Commands::Sketch { path } => {
            let client = Arc::new(InferenceClient::new(config.server.clone())?);
            let mut session = SketchSession::new(client, config.sketch.clone());

            let shutdown = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            session
                .run(
                    &path,
                    |result| {
                        if let Err(e) = output.sketch(result) {
                            tracing::error!(error = %e, "failed to print result");
                        }
                    },
                    shutdown,
                )
                .await?;
        }

        Commands::Classify { path } => {
            let client = Arc::new(InferenceClient::new(config.server.clone())?);
            let session = SketchSession::new(client, config.sketch.clone());

            match session.classify_once(&path).await {
                Ok(result) => output.sketch(&result)?,
                Err(e) => {
                    tracing::error!(error = %e, "sketch classification failed");
                    eprintln!("{}", messages::unknown_error(config.display.locale, &e));
                    std::process::exit(1);
                }
            }
        }

        Commands::Status => {
            let client = InferenceClient::new(config.server.clone())?;

            match client.health_check().await {
                Ok(status) => {
                    println!("Tokenlens v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("Service: {} (HTTP {})", config.server.base_url, status);
                    println!("  Text:   {}", config.server.llm_url());
                    println!("  Sketch: {}", config.server.sketch_url());
                }
                Err(e) => {
                    eprintln!("Cannot connect to inference service at {}", config.server.base_url);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output: path } => {
            let content = generate_default_config();
            match path {
                Some(path) => write_config(&path, &content)?,
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Process one text; false when the request failed
async fn submit(session: &mut TextSession, text: &str, output: &Output) -> anyhow::Result<bool> {
    match session.process_text(text).await {
        Ok(Some(result)) => {
            output.mask(&result)?;
            Ok(true)
        }
        Ok(None) => Ok(true),
        Err(e) => {
            tracing::error!(error = %e, "text request failed");
            eprintln!("{}", messages::for_error(output.options.locale, &e));
            Ok(false)
        }
    }
}

/// Read lines from stdin and submit each one on Enter
async fn run_interactive(session: &mut TextSession, output: &Output) -> anyhow::Result<()> {
    let interactive = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        if interactive {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        submit(session, &line, output).await?;
    }

    tracing::debug!(requests = session.requests(), "input closed");
    Ok(())
}

fn write_config(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    println!("Config written to {:?}", path);
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tokenlens={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
