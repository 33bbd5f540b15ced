//! Horizontal confidence bar chart

use owo_colors::OwoColorize;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

use super::RenderOptions;
use crate::messages::Locale;
use crate::model::{PredictedToken, MAX_CONFIDENCE};

const BAR: char = '█';

fn title(locale: Locale) -> &'static str {
    match locale {
        Locale::It => "Confidenza",
        Locale::En => "Confidence",
    }
}

/// Number of cells for a confidence on a bar of `width` cells
fn bar_cells(confidence: f64, width: usize) -> usize {
    ((confidence / MAX_CONFIDENCE) * width as f64).round() as usize
}

/// Render predictions as one bar per row, in the given order.
///
/// The axis is fixed to 0..100 so bars are comparable across requests.
pub fn render_bar_chart(predictions: &[PredictedToken], options: &RenderOptions) -> String {
    let mut out = String::new();
    if predictions.is_empty() {
        return out;
    }

    let width = options.bar_width.max(1);
    let label_width = predictions
        .iter()
        .map(|p| p.text.width())
        .max()
        .unwrap_or(0);

    let heading = title(options.locale);
    if options.enable_color {
        let _ = writeln!(out, "{}", heading.bold());
    } else {
        let _ = writeln!(out, "{}", heading);
    }

    for p in predictions {
        let confidence = p.display_confidence();
        let cells = bar_cells(confidence, width);
        let bar: String = std::iter::repeat(BAR).take(cells).collect();
        let pad = " ".repeat(width - cells);
        let pad_label = " ".repeat(label_width - p.text.width());

        if options.enable_color {
            let _ = writeln!(
                out,
                "{}{} │{}{} {:>6.2}%",
                pad_label,
                p.text,
                bar.truecolor(p.color.r, p.color.g, p.color.b),
                pad,
                confidence
            );
        } else {
            let _ = writeln!(
                out,
                "{}{} │{}{} {:>6.2}%",
                pad_label, p.text, bar, pad, confidence
            );
        }
    }

    // Axis: 0 under the bar origin, 100 under its end
    let _ = writeln!(
        out,
        "{} └{}",
        " ".repeat(label_width),
        "─".repeat(width)
    );
    let _ = writeln!(
        out,
        "{}  0{}100",
        " ".repeat(label_width),
        " ".repeat(width.saturating_sub(3))
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rgb;

    fn prediction(text: &str, confidence: f64) -> PredictedToken {
        PredictedToken {
            text: text.to_string(),
            confidence,
            color: Rgb::new(10, 200, 30),
        }
    }

    fn options(width: usize) -> RenderOptions {
        RenderOptions {
            bar_width: width,
            ..Default::default()
        }
    }

    fn bar_len(line: &str) -> usize {
        line.chars().filter(|c| *c == BAR).count()
    }

    #[test]
    fn test_bar_lengths_follow_confidence() {
        let preds = vec![prediction("cane", 50.0), prediction("gatto", 25.0)];
        let out = render_bar_chart(&preds, &options(20));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Confidenza");
        assert!(lines[1].starts_with(" cane │"));
        assert_eq!(bar_len(lines[1]), 10);
        assert_eq!(bar_len(lines[2]), 5);
        assert!(lines[1].ends_with(" 50.00%"));
        assert!(lines[2].ends_with(" 25.00%"));
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped() {
        let preds = vec![prediction("troppo", 250.0), prediction("meno", -5.0)];
        let out = render_bar_chart(&preds, &options(10));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(bar_len(lines[1]), 10);
        assert!(lines[1].ends_with("100.00%"));
        assert_eq!(bar_len(lines[2]), 0);
        assert!(lines[2].ends_with("  0.00%"));
    }

    #[test]
    fn test_english_title_and_axis() {
        let opts = RenderOptions {
            locale: Locale::En,
            ..options(10)
        };
        let out = render_bar_chart(&[prediction("a", 1.0)], &opts);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Confidence");
        assert!(lines.last().unwrap().ends_with("100"));
    }

    #[test]
    fn test_colored_bars() {
        let opts = RenderOptions {
            enable_color: true,
            ..options(10)
        };
        let out = render_bar_chart(&[prediction("a", 60.0)], &opts);
        assert!(out.contains("38;2;10;200;30"));
    }

    #[test]
    fn test_wide_labels_keep_bars_aligned() {
        let preds = vec![prediction("猫", 50.0), prediction("abc", 25.0)];
        let out = render_bar_chart(&preds, &options(10));
        let lines: Vec<&str> = out.lines().collect();

        // "猫" takes two terminal cells, so it gets one space of padding
        assert!(lines[1].starts_with(" 猫 │"));
        assert!(lines[2].starts_with("abc │"));
        let bar_column = |line: &str| UnicodeWidthStr::width(line.split('│').next().unwrap());
        assert_eq!(bar_column(lines[1]), bar_column(lines[2]));
    }

    #[test]
    fn test_empty_chart() {
        assert!(render_bar_chart(&[], &options(10)).is_empty());
    }
}
