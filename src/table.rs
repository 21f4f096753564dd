//! Minimal aligned-table rendering for terminal output.
//!
//! Knows nothing about runs or records; callers hand in headers and
//! stringified rows and get back a bordered, column-aligned table.

/// Render headers and rows as a bordered plain-text table:
///
/// ```text
/// +-------+--------+
/// | Order | File   |
/// |-------+--------|
/// | 1     | 1-a.sh |
/// +-------+--------+
/// ```
///
/// Every column is padded to its widest cell. Rows shorter than the header
/// render empty trailing cells; cells beyond the header width are dropped.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(widths.len()).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&rule(&widths, '+'));
    out.push('\n');
    out.push_str(&line(&widths, headers.iter().copied()));
    out.push('\n');
    out.push_str(&rule(&widths, '|'));
    out.push('\n');
    for row in rows {
        out.push_str(&line(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out.push_str(&rule(&widths, '+'));
    out
}

/// A horizontal rule; `edge` is the outermost character (`+` for the top and
/// bottom borders, `|` for the header separator).
fn rule(widths: &[usize], edge: char) -> String {
    let mut out = String::new();
    out.push(edge);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push('+');
        }
        for _ in 0..width + 2 {
            out.push('-');
        }
    }
    out.push(edge);
    out
}

fn line<'a, I>(widths: &[usize], cells: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cells = cells.into_iter();
    let mut out = String::new();
    for width in widths {
        let cell = cells.next().unwrap_or("");
        out.push_str("| ");
        out.push_str(cell);
        for _ in cell.chars().count()..*width {
            out.push(' ');
        }
        out.push(' ');
    }
    out.push('|');
    out
}
