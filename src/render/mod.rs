//! Terminal Rendering
//!
//! Turns inference results into text:
//!
//! - [`render_chips`]: the segmented input as colored token chips
//! - [`render_bar_chart`]: masked-token candidates as horizontal bars on a
//!   fixed 0..100 axis
//! - [`render_sketch`]: ranked sketch labels
//! - [`to_json`]: machine-readable output
//!
//! Renderers return `String`s; printing is left to the caller.

mod chart;
mod chips;
mod json;
mod sketch;

pub use chart::render_bar_chart;
pub use chips::render_chips;
pub use json::to_json;
pub use sketch::render_sketch;

use is_terminal::IsTerminal;
use std::str::FromStr;

use crate::messages::Locale;

/// Options shared by all renderers
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub enable_color: bool,
    /// Columns of a 100% bar
    pub bar_width: usize,
    pub locale: Locale,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            enable_color: false,
            bar_width: 40,
            locale: Locale::default(),
        }
    }
}

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "table" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}. Use: pretty, json", other)),
        }
    }
}

/// Resolve a color mode (`auto`, `always`, `never`) against stdout
pub fn color_enabled(mode: &str) -> bool {
    match mode.trim().to_lowercase().as_str() {
        "always" | "true" | "on" => true,
        "never" | "false" | "off" => false,
        _ => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("Pretty".parse::<OutputFormat>(), Ok(OutputFormat::Pretty));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_explicit_color_modes() {
        assert!(color_enabled("always"));
        assert!(!color_enabled("never"));
    }
}
