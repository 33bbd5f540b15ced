//! # Tokenlens
//!
//! Terminal client for a local inference service: type text with a `[MASK]`
//! marker or point it at a sketch, and see the predictions as colored token
//! chips and confidence bars.
//!
//! ## Modules
//!
//! - [`client`]: HTTP client for the masked-token and sketch endpoints
//! - [`session`]: request/render cycles for text and sketches
//! - [`palette`]: stable per-session token colors
//! - [`render`]: terminal and JSON output
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokenlens::{Config, InferenceClient, RenderOptions, TextSession, TokenPalette};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = Arc::new(InferenceClient::new(config.server.clone())?);
//!     let mut session = TextSession::new(client, TokenPalette::new());
//!
//!     if let Some(result) = session.process_text("Il gatto [MASK] sul tetto.").await? {
//!         let options = RenderOptions::default();
//!         println!("{}", tokenlens::render::render_chips(&result.tokens, &options));
//!         print!("{}", tokenlens::render::render_bar_chart(&result.predictions, &options));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod messages;
pub mod model;
pub mod palette;
pub mod render;
pub mod session;

// Re-export top-level types for convenience
pub use client::{ClientError, InferenceBackend, InferenceClient};

pub use config::{Config, ConfigError, DisplayConfig, LoggingConfig, ServerConfig, SketchConfig};

pub use messages::Locale;

pub use model::{MaskPrediction, PredictedToken, Rgb, SketchLabel, SketchResult, Token};

pub use palette::TokenPalette;

pub use render::{OutputFormat, RenderOptions};

pub use session::{ActivityGate, SessionError, SketchSession, TextSession};
