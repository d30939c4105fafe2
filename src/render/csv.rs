//! Delimited-text rendering

/// Join extracted rows into the final CSV byte layout: fields separated by
/// commas, one line per row, every line newline-terminated.
pub fn render(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
