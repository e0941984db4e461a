//! Multi-column layout for short listings (`-C`).
//!
//! Names run top-to-bottom, then left-to-right, using the fewest rows whose
//! total width fits the terminal.

use std::io::{self, Write};

/// Spaces between adjacent columns.
const COLUMN_GAP: usize = 2;

/// A computed grid: number of rows and the width of each column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub column_widths: Vec<usize>,
}

fn display_width(name: &str) -> usize {
    name.chars().count()
}

/// Choose the grid for `names` within `max_width` columns. Falls back to a
/// single column when even that does not fit.
pub fn plan_grid(names: &[String], max_width: usize) -> Grid {
    let widths: Vec<usize> = names.iter().map(|n| display_width(n)).collect();
    let count = widths.len();
    if count == 0 {
        return Grid {
            rows: 0,
            column_widths: Vec::new(),
        };
    }

    for rows in 1..=count {
        let column_widths: Vec<usize> = widths
            .chunks(rows)
            .map(|col| col.iter().copied().max().unwrap_or(0))
            .collect();
        let total: usize =
            column_widths.iter().sum::<usize>() + COLUMN_GAP * (column_widths.len() - 1);
        if total <= max_width {
            return Grid {
                rows,
                column_widths,
            };
        }
    }

    Grid {
        rows: count,
        column_widths: vec![widths.iter().copied().max().unwrap_or(0)],
    }
}

/// Write `names` as a grid no wider than `max_width`.
pub fn write_columns<W: Write>(writer: &mut W, names: &[String], max_width: usize) -> io::Result<()> {
    let grid = plan_grid(names, max_width);
    for row in 0..grid.rows {
        let mut line = String::new();
        for (col, col_width) in grid.column_widths.iter().enumerate() {
            let Some(name) = names.get(col * grid.rows + row) else {
                break;
            };
            line.push_str(name);
            // Pad only when another name follows on this row.
            if names.get((col + 1) * grid.rows + row).is_some() {
                let pad = col_width - display_width(name) + COLUMN_GAP;
                line.push_str(&" ".repeat(pad));
            }
        }
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
