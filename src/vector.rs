//! Heuristic checks over vector (SVG) markup.
//!
//! These are superficial text scans, not an XML parse. Malformed markup
//! simply yields negative matches; this inspector never errors.

use regex::Regex;

use crate::report::{check_id, CheckResult};

pub struct VectorInspector {
    wide_stroke: Regex,
    font_family: Regex,
}

impl VectorInspector {
    pub fn new() -> Self {
        Self {
            // A stroke-width with 3+ digits is taken as unreasonably thick.
            wide_stroke: Regex::new(r#"(?i)stroke-width="?\d{3,}"?"#)
                .expect("stroke-width pattern"),
            font_family: Regex::new(r#"(?i)font-family="?([^"'>]+)"#)
                .expect("font-family pattern"),
        }
    }

    /// Run both markup checks, in order: `svg-stroke`, then `svg-font`.
    /// The font check documents presence rather than blocking: a missing
    /// font-family is reported as not passed but carries no more weight
    /// than that.
    pub fn inspect(&self, markup: &str) -> Vec<CheckResult> {
        let mut checks = Vec::with_capacity(2);

        let wide = self.wide_stroke.is_match(markup);
        checks.push(CheckResult::new(
            check_id::SVG_STROKE,
            !wide,
            if wide {
                "SVG has very wide stroke"
            } else {
                "SVG stroke sizes look ok"
            },
        ));

        match self
            .font_family
            .captures(markup)
            .and_then(|c| c.get(1))
        {
            Some(found) => checks.push(CheckResult::pass(
                check_id::SVG_FONT,
                format!("SVG uses font-family: {}", found.as_str()),
            )),
            None => checks.push(CheckResult::fail(
                check_id::SVG_FONT,
                "No explicit font-family found in SVG",
            )),
        }

        checks
    }
}

impl Default for VectorInspector {
    fn default() -> Self {
        Self::new()
    }
}
