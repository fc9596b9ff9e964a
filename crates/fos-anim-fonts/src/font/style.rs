//! Style label parsing
//!
//! Animation documents describe a font style with a free-form label such as
//! `"SemiBoldItalic"`. The label is split into a weight prefix and a slant
//! suffix using two fixed tables.

use super::{FontSlant, FontStyle, FontWeight};
use crate::logger::{LogLevel, Logger};

/// Weight prefixes, matched in order. The first hit wins, so a shorter token
/// listed earlier shadows longer ones ("Extra" before "ExtraBold").
const WEIGHT_PREFIXES: &[(&str, FontWeight)] = &[
    ("Regular", FontWeight::NORMAL),
    ("Medium", FontWeight::MEDIUM),
    ("Bold", FontWeight::BOLD),
    ("Light", FontWeight::LIGHT),
    ("Black", FontWeight::BLACK),
    ("Thin", FontWeight::THIN),
    ("Extra", FontWeight::EXTRA_BOLD),
    ("ExtraBold", FontWeight::EXTRA_BOLD),
    ("ExtraLight", FontWeight::EXTRA_LIGHT),
    ("ExtraBlack", FontWeight::EXTRA_BLACK),
    ("SemiBold", FontWeight::SEMI_BOLD),
    ("Hairline", FontWeight::THIN),
    ("Normal", FontWeight::NORMAL),
    ("Plain", FontWeight::NORMAL),
    ("Standard", FontWeight::NORMAL),
    ("Roman", FontWeight::NORMAL),
    ("Heavy", FontWeight::BLACK),
    ("Demi", FontWeight::SEMI_BOLD),
    ("DemiBold", FontWeight::SEMI_BOLD),
    ("Ultra", FontWeight::EXTRA_BOLD),
    ("UltraBold", FontWeight::EXTRA_BOLD),
    ("UltraBlack", FontWeight::EXTRA_BLACK),
    ("UltraHeavy", FontWeight::EXTRA_BLACK),
    ("UltraLight", FontWeight::EXTRA_LIGHT),
];

/// Slant suffixes, matched exactly against what the weight pass left over
const SLANT_SUFFIXES: &[(&str, FontSlant)] = &[
    ("Italic", FontSlant::Italic),
    ("Oblique", FontSlant::Oblique),
];

/// Result of parsing a style label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedStyle<'a> {
    pub style: FontStyle,
    /// Unrecognized tail of the label, empty when fully consumed
    pub remainder: &'a str,
}

impl ParsedStyle<'_> {
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty()
    }
}

/// Parse a style label into a style descriptor.
///
/// Matching is case-sensitive. Leftover characters are reported once as a
/// warning; the weight and slant found so far are still returned.
pub fn parse_font_style<'a>(label: &'a str, logger: &dyn Logger) -> ParsedStyle<'a> {
    let mut rest = label;

    let mut weight = FontWeight::NORMAL;
    if let Some(&(token, w)) = WEIGHT_PREFIXES.iter().find(|(token, _)| rest.starts_with(token)) {
        weight = w;
        rest = &rest[token.len()..];
    }

    let mut slant = FontSlant::Upright;
    if !rest.is_empty() {
        if let Some(&(_, s)) = SLANT_SUFFIXES.iter().find(|(token, _)| rest == *token) {
            slant = s;
            rest = "";
        }
    }

    if !rest.is_empty() {
        logger.log(LogLevel::Warning, None, &format!("Unknown font style: {}.", rest));
    }

    ParsedStyle {
        style: FontStyle::with(weight, slant),
        remainder: rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontWidth;
    use crate::logger::MemoryLogger;

    fn parse(label: &str) -> (FontStyle, usize) {
        let logger = MemoryLogger::new();
        let parsed = parse_font_style(label, &logger);
        (parsed.style, logger.count(LogLevel::Warning))
    }

    #[test]
    fn test_empty_label() {
        let (style, warnings) = parse("");
        assert_eq!(style, FontStyle::default());
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_weight_and_slant_pairs() {
        for &(weight_token, weight) in WEIGHT_PREFIXES {
            // Tokens shadowed by an earlier shorter prefix resolve to that prefix.
            let (first_match, _) = WEIGHT_PREFIXES
                .iter()
                .find(|(t, _)| weight_token.starts_with(t))
                .unwrap();
            if *first_match != weight_token {
                continue;
            }

            for &(slant_token, slant) in SLANT_SUFFIXES {
                let label = format!("{}{}", weight_token, slant_token);
                let (style, warnings) = parse(&label);
                assert_eq!(style.weight, weight, "{}", label);
                assert_eq!(style.slant, slant, "{}", label);
                assert_eq!(style.width, FontWidth::Normal);
                assert_eq!(warnings, 0, "{}", label);
            }
        }
    }

    #[test]
    fn test_bold_italic() {
        let (style, warnings) = parse("BoldItalic");
        assert_eq!(style, FontStyle::bold_italic());
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_slant_only() {
        let (style, _) = parse("Italic");
        assert_eq!(style.weight, FontWeight::NORMAL);
        assert_eq!(style.slant, FontSlant::Italic);
    }

    #[test]
    fn test_trailing_garbage_warns_once() {
        let logger = MemoryLogger::new();
        let parsed = parse_font_style("BoldCondensed", &logger);

        assert_eq!(parsed.style.weight, FontWeight::BOLD);
        assert_eq!(parsed.style.slant, FontSlant::Upright);
        assert_eq!(parsed.remainder, "Condensed");
        assert!(!parsed.is_complete());
        assert_eq!(logger.count(LogLevel::Warning), 1);
        assert_eq!(logger.entries()[0].message, "Unknown font style: Condensed.");
    }

    #[test]
    fn test_table_order_shadows_longer_tokens() {
        // "Extra" is listed before "ExtraLight"
        let logger = MemoryLogger::new();
        let parsed = parse_font_style("ExtraLight", &logger);
        assert_eq!(parsed.style.weight, FontWeight::EXTRA_BOLD);
        assert_eq!(parsed.remainder, "Light");
        assert_eq!(logger.count(LogLevel::Warning), 1);

        // "Demi" is listed before "DemiBold"
        let (style, warnings) = parse("DemiBold");
        assert_eq!(style.weight, FontWeight::SEMI_BOLD);
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_case_sensitive() {
        let (style, warnings) = parse("bold");
        assert_eq!(style, FontStyle::default());
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_slant_must_match_exactly() {
        let (style, warnings) = parse("BoldItalics");
        assert_eq!(style.weight, FontWeight::BOLD);
        assert_eq!(style.slant, FontSlant::Upright);
        assert_eq!(warnings, 1);
    }
}
