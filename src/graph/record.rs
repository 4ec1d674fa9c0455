//! Edge records in the `source:target1,target2,...` line format.

use crate::errors::{ParseReason, RankError, Result};

/// Separator between the source key and its target list.
pub const SOURCE_SEPARATOR: char = ':';
/// Separator between target keys.
pub const TARGET_SEPARATOR: char = ',';

/// One source node and its ordered outgoing targets.
///
/// Duplicate targets and self-loops are kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: String,
    pub targets: Vec<String>,
}

impl EdgeRecord {
    /// Create a record, trimming surrounding whitespace from every key.
    pub fn new<S, I, T>(source: S, targets: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            source: source.as_ref().trim().to_string(),
            targets: targets
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// A record with no outgoing edges.
    pub fn dangling(source: impl AsRef<str>) -> Self {
        Self::new(source, std::iter::empty::<&str>())
    }

    /// Parse a single line. `record` is the 1-based record number used in
    /// error reports.
    ///
    /// The line is split at its first `:`. An empty target list (`7:`) is a
    /// valid record with no edges.
    pub fn parse(line: &str, record: usize) -> Result<Self> {
        let (source, rest) = line
            .split_once(SOURCE_SEPARATOR)
            .ok_or_else(|| RankError::parse(record, line.trim(), ParseReason::MissingSeparator))?;

        let rest = rest.trim();
        let targets: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split(TARGET_SEPARATOR).collect()
        };

        let parsed = Self::new(source, targets);
        parsed.check(record)?;
        Ok(parsed)
    }

    /// Reject empty keys. Called on every record before graph construction,
    /// whether it came from [`EdgeRecord::parse`] or was built directly.
    pub fn check(&self, record: usize) -> Result<()> {
        if self.source.is_empty() {
            return Err(RankError::parse(record, self.to_line(), ParseReason::EmptySource));
        }
        if self.targets.iter().any(|t| t.is_empty()) {
            return Err(RankError::parse(
                record,
                self.targets.join(","),
                ParseReason::EmptyTarget,
            ));
        }
        Ok(())
    }

    /// Render the record back into the line format.
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.source, SOURCE_SEPARATOR, self.targets.join(","))
    }

    pub fn is_dangling(&self) -> bool {
        self.targets.is_empty()
    }
}

impl std::fmt::Display for EdgeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Parse every line as a record, numbering records from 1.
pub fn parse_records<I, S>(lines: I) -> Result<Vec<EdgeRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| EdgeRecord::parse(line.as_ref(), i + 1))
        .collect()
}
