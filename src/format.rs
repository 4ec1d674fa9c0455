//! Score rendering.
//!
//! Scores are printed in normalized scientific notation with ten fractional
//! mantissa digits and an explicitly signed exponent: `1.2345678901e-1`,
//! `1.0000000000e+0`.

use std::io::{self, Write};

use crate::pipeline::runner::RankReport;
use crate::pipeline::traits::ResultFormatter;

/// Fractional mantissa digits in rendered scores.
pub const SCORE_PRECISION: usize = 10;

/// Render one score.
pub fn format_score(value: f64) -> String {
    let rendered = format!("{:.*e}", SCORE_PRECISION, value);
    match rendered.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => rendered,
    }
}

/// Line-oriented score output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreFormatter {
    /// Prefix each score with its node key and a tab
    pub with_keys: bool,
    /// Append a final `sum` line
    pub with_sum: bool,
}

impl ScoreFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(mut self, with_keys: bool) -> Self {
        self.with_keys = with_keys;
        self
    }

    pub fn with_sum(mut self, with_sum: bool) -> Self {
        self.with_sum = with_sum;
        self
    }
}

impl ResultFormatter for ScoreFormatter {
    fn write_report(&self, report: &RankReport, out: &mut dyn Write) -> io::Result<()> {
        for (key, score) in report.iter() {
            if self.with_keys {
                writeln!(out, "{key}\t{}", format_score(score))?;
            } else {
                writeln!(out, "{}", format_score(score))?;
            }
        }
        if self.with_sum {
            if self.with_keys {
                writeln!(out, "sum\t{}", format_score(report.result.sum))?;
            } else {
                writeln!(out, "{}", format_score(report.result.sum))?;
            }
        }
        Ok(())
    }
}
