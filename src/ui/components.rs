//! Shared text rendering components.

use unicode_width::UnicodeWidthStr;

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Plain-text table sized to its widest cell (wide glyphs count double).
#[derive(Debug, Clone)]
pub struct TextTable {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Create a table; every column is left aligned until told otherwise.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            aligns: vec![Align::Left; headers.len()],
            rows: Vec::new(),
        }
    }

    /// Right-align the given columns (numbers).
    pub fn right(mut self, columns: &[usize]) -> Self {
        for &col in columns {
            if let Some(align) = self.aligns.get_mut(col) {
                *align = Align::Right;
            }
        }
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (col, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(col) {
                    *width = (*width).max(cell.width());
                }
            }
        }
        widths
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        let parts: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(col, &width)| {
                let cell = cells.get(col).map(String::as_str).unwrap_or("");
                let pad = " ".repeat(width.saturating_sub(cell.width()));
                match self.aligns[col] {
                    Align::Left => format!("{cell}{pad}"),
                    Align::Right => format!("{pad}{cell}"),
                }
            })
            .collect();
        parts.join("  ").trim_end().to_string()
    }

    /// Render header, separator and rows.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(self.render_line(&self.headers, &widths));
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            out.push(self.render_line(row, &widths));
        }
        out.join("\n")
    }
}

/// Render a panel header with title.
pub fn panel_header(title: &str) -> String {
    format!("{title}\n{}", "=".repeat(title.width()))
}

/// Hours with one decimal.
pub fn hours(value: f64) -> String {
    format!("{value:.1}")
}
