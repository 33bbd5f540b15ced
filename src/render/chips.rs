//! Token chips

use owo_colors::{OwoColorize, Style};

use super::RenderOptions;
use crate::model::{Rgb, Token};

/// Black or white, whichever reads better on `bg`
fn contrast_fg(bg: Rgb) -> Rgb {
    let luma = 0.299 * bg.r as f64 + 0.587 * bg.g as f64 + 0.114 * bg.b as f64;
    if luma > 150.0 {
        Rgb::new(0, 0, 0)
    } else {
        Rgb::new(255, 255, 255)
    }
}

fn chip(token: &Token, options: &RenderOptions) -> String {
    if !options.enable_color {
        return format!("[{} #{}]", token.text, token.id);
    }

    let fg = contrast_fg(token.color);
    let style = Style::new()
        .truecolor(fg.r, fg.g, fg.b)
        .on_truecolor(token.color.r, token.color.g, token.color.b);
    let id_style = style.dimmed();

    format!(
        "{}{}",
        format!(" {} ", token.text).style(style),
        format!("{} ", token.id).style(id_style)
    )
}

/// Render tokens as a single line of chips showing text and id
pub fn render_chips(tokens: &[Token], options: &RenderOptions) -> String {
    tokens
        .iter()
        .map(|t| chip(t, options))
        .collect::<Vec<_>>()
        .join(" ")
}
