//! Minimal comma-separated reader for the small tables the inputs use.

use std::path::Path;

use crate::{ProjectError, ProjectResult};

/// A data row with its 1-based line number.
pub(crate) struct Row<'a> {
    pub line: usize,
    pub fields: Vec<&'a str>,
}

impl Row<'_> {
    pub fn field(&self, path: &Path, column: usize, what: &str) -> ProjectResult<&str> {
        self.fields.get(column).copied().ok_or_else(|| {
            ProjectError::input(path, format!("line {}: missing {what} column", self.line))
        })
    }

    pub fn parse<T: std::str::FromStr>(
        &self,
        path: &Path,
        column: usize,
        what: &str,
    ) -> ProjectResult<T> {
        let raw = self.field(path, column, what)?;
        raw.parse().map_err(|_| {
            ProjectError::input(path, format!("line {}: invalid {what} '{raw}'", self.line))
        })
    }
}

fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.lines().enumerate().filter(|(_, line)| {
        let trimmed = line.trim();
        !trimmed.is_empty() && !trimmed.starts_with('#')
    })
}

/// Column names of the header row, trimmed. Empty if there is no header.
pub(crate) fn header(content: &str) -> Vec<&str> {
    content_lines(content)
        .next()
        .map(|(_, line)| line.split(',').map(str::trim).collect())
        .unwrap_or_default()
}

/// Split `content` into rows, skipping the header, blank lines and `#` comments.
pub(crate) fn rows<'a>(content: &'a str) -> Vec<Row<'a>> {
    content_lines(content)
        .skip(1)
        .map(|(i, line)| Row {
            line: i + 1,
            fields: line.split(',').map(str::trim).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_header_and_comments() {
        let rows = rows("# exported\nx,y\n\n1.0, 2.0\n3,4\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 4);
        assert_eq!(rows[0].fields, vec!["1.0", "2.0"]);
    }

    #[test]
    fn header_is_first_content_line() {
        assert_eq!(header("# exported\n\nX, Y ,id\n1,2,3\n"), vec!["X", "Y", "id"]);
        assert!(header("# only a comment\n").is_empty());
    }
}
