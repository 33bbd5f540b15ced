//! Sketch ranking

use owo_colors::OwoColorize;
use std::fmt::Write;

use super::RenderOptions;
use crate::model::SketchResult;

/// Render ranked labels as `LABEL - 12.34%` lines, best first and bold
pub fn render_sketch(result: &SketchResult, options: &RenderOptions) -> String {
    let mut out = String::new();

    for (idx, label) in result.labels.iter().enumerate() {
        let line = format!(
            "{} - {:.2}%",
            label.label.to_uppercase(),
            label.display_confidence()
        );

        if options.enable_color && idx == 0 {
            let _ = writeln!(out, "{}", line.bold());
        } else if options.enable_color {
            let _ = writeln!(out, "{}", line.dimmed());
        } else {
            let _ = writeln!(out, "{}", line);
        }
    }

    out
}
