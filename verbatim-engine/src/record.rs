//! Tab-separated line protocol
//!
//! Every record is one line of tab-separated columns. Inside a column,
//! tokens are separated by whitespace.

use crate::error::{EngineError, Result};

/// One input line split into columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    /// Split `text` on tabs, requiring one of the `expected` column counts.
    ///
    /// A trailing line terminator is ignored. `line` is the 1-based line number
    /// used in error messages.
    pub fn parse(line: usize, text: &'a str, expected: &[usize]) -> Result<Self> {
        let text = text.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = text.split('\t').collect();
        if !expected.contains(&fields.len()) {
            return Err(EngineError::MalformedRecord {
                line,
                reason: format!(
                    "expected {} tab-separated columns, found {}",
                    describe(expected),
                    fields.len()
                ),
            });
        }
        Ok(Self { line, fields })
    }

    /// 1-based line number
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Records always hold at least one column
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw column text
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or("")
    }

    /// Whitespace tokens of a column
    pub fn tokens(&self, index: usize) -> Vec<&'a str> {
        self.field(index).split_whitespace().collect()
    }
}

fn describe(expected: &[usize]) -> String {
    expected
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Join output columns with tabs
pub fn join_columns<I, S>(columns: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    columns
        .into_iter()
        .map(|c| c.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\t")
}
