//! Output formats for analysis results.
//!
//! Every exporter numbers colors from 1 in the order given, so sort first.

use crate::models::{OutputFormat, SortOrder};
use palette_match::{relative_luminance, MatchResult};
use serde::ser::{Serialize, Serializer};
use std::fmt::Write;

/// Sort results in place. Ties keep their current order.
pub fn sort_results(results: &mut [MatchResult], order: SortOrder) {
    match order {
        SortOrder::Weight => results.sort_by(|a, b| b.weight.total_cmp(&a.weight)),
        SortOrder::Hue => results.sort_by(|a, b| a.rgb.hue().total_cmp(&b.rgb.hue())),
        SortOrder::Luminance => results.sort_by(|a, b| {
            relative_luminance(a.rgb).total_cmp(&relative_luminance(b.rgb))
        }),
    }
}

/// Render results in the requested format
pub fn render(results: &[MatchResult], format: OutputFormat) -> serde_json::Result<String> {
    Ok(match format {
        OutputFormat::Table => to_table(results),
        OutputFormat::Json => to_json(results)?,
        OutputFormat::Css => to_css(results),
        OutputFormat::Tokens => to_tokens_json(results)?,
        OutputFormat::Tailwind => to_tailwind_config(results.len()),
    })
}

#[derive(serde::Serialize)]
struct PaletteDocument<'a> {
    palette: &'a [MatchResult],
}

/// `{"palette": [...]}`, pretty-printed
pub fn to_json(results: &[MatchResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PaletteDocument { palette: results })
}

/// CSS custom properties on `:root`
pub fn to_css(results: &[MatchResult]) -> String {
    let mut css = String::from(":root{");
    for (i, result) in results.iter().enumerate() {
        let _ = write!(css, "\n  --color-{}: {};", i + 1, result.hex);
    }
    css.push_str("\n}");
    css
}

/// `color-N` keys in result order
struct TokenMap<'a>(&'a [MatchResult]);

impl Serialize for TokenMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .enumerate()
                .map(|(i, result)| (format!("color-{}", i + 1), &result.token)),
        )
    }
}

/// Map of `color-N` to matched palette token
pub fn to_tokens_json(results: &[MatchResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TokenMap(results))
}

/// `tailwind.config.js` extending the theme with the CSS variables from
/// [`to_css`]
pub fn to_tailwind_config(count: usize) -> String {
    let mut config = String::from(
        "module.exports = {\n  theme: {\n    extend: {\n      colors: {\n        palette: {\n",
    );
    for i in 1..=count {
        let _ = writeln!(config, "          {i}: \"var(--color-{i})\",");
    }
    config.push_str("        }\n      }\n    }\n  }\n};");
    config
}

/// Plain text table
pub fn to_table(results: &[MatchResult]) -> String {
    let mut table = format!(
        "{:>2}  {:<7}  {:>6}  {:<14}  {:>6}  {:>7}  {:>7}  {:<5}  {}\n",
        "#", "color", "weight", "token", "ΔE", "white", "black", "text", "WCAG"
    );
    for (i, r) in results.iter().enumerate() {
        let text = if r.ideal_text == palette_match::Rgb::WHITE {
            "white"
        } else {
            "black"
        };
        let _ = writeln!(
            table,
            "{:>2}  {:<7}  {:>5.1}%  {:<14}  {:>6.2}  {:>6.2}:1  {:>6.2}:1  {:<5}  {}",
            i + 1,
            r.hex,
            r.weight * 100.0,
            r.token,
            r.delta_e,
            r.contrast_white,
            r.contrast_black,
            text,
            r.wcag.label(),
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_match::{ColorAnalyzer, Palette, Rgb};
    use pretty_assertions::assert_eq;

    fn results() -> Vec<MatchResult> {
        let palette =
            Palette::from_hex(&[("red-600", "#dc2626"), ("blue-600", "#2563eb")]).unwrap();
        let analyzer = ColorAnalyzer::new(palette);
        let mut red = analyzer.evaluate(Rgb::new(220, 38, 38));
        red.weight = 0.25;
        let mut blue = analyzer.evaluate(Rgb::new(37, 99, 235));
        blue.weight = 0.75;
        vec![red, blue]
    }

    #[test]
    fn test_sort_by_weight_descending() {
        let mut r = results();
        sort_results(&mut r, SortOrder::Weight);
        assert_eq!(r[0].token, "blue-600");
    }

    #[test]
    fn test_sort_by_hue_and_luminance() {
        let mut r = results();
        r.reverse();
        sort_results(&mut r, SortOrder::Hue);
        assert_eq!(r[0].token, "red-600");

        sort_results(&mut r, SortOrder::Luminance);
        // #dc2626 is lighter than #2563eb
        assert_eq!(r[0].token, "blue-600");
    }

    #[test]
    fn test_css() {
        assert_eq!(
            to_css(&results()),
            ":root{\n  --color-1: #dc2626;\n  --color-2: #2563eb;\n}"
        );
    }

    #[test]
    fn test_tokens_keep_result_order() {
        let mut r = results();
        r.reverse();
        assert_eq!(
            to_tokens_json(&r).unwrap(),
            "{\n  \"color-1\": \"blue-600\",\n  \"color-2\": \"red-600\"\n}"
        );
    }

    #[test]
    fn test_tailwind_config() {
        let config = to_tailwind_config(2);
        assert!(config.starts_with("module.exports = {"));
        assert!(config.contains("          1: \"var(--color-1)\",\n"));
        assert!(config.contains("          2: \"var(--color-2)\",\n"));
        assert!(config.ends_with("};"));
    }

    #[test]
    fn test_json_document() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&results()).unwrap()).unwrap();
        let palette = json["palette"].as_array().unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette[0]["token"], "red-600");
        assert_eq!(palette[0]["delta_e"], 0.0);
    }

    #[test]
    fn test_table_lists_every_result() {
        let table = to_table(&results());
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("#dc2626"));
        assert!(table.contains("blue-600"));
        assert!(table.contains("75.0%"));
    }
}
