//! Text and JSON rendering for command results

use anyhow::{Context, Result};
use serde::Serialize;

/// Print `value` as pretty JSON, or run `text` for the human-readable form.
pub fn emit<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(),
{
    if json {
        let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{}", rendered);
    } else {
        text();
    }
    Ok(())
}

/// Left-aligned columns sized to their widest cell
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.to_vec()));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push(line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("(none)");
        return;
    }
    println!("{}", render_table(headers, rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let rows = vec![
            vec!["1".to_string(), "Anika Costa".to_string()],
            vec!["12".to_string(), "Li".to_string()],
        ];
        let table = render_table(&["ID", "Name"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ID  Name");
        assert_eq!(lines[1], "--  -----------");
        assert_eq!(lines[2], "1   Anika Costa");
        assert_eq!(lines[3], "12  Li");
    }
}
