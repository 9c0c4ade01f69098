//! Borderless, left-aligned text tables.
//!
//! Cells may span several lines; each line of a row is printed as its own
//! physical line with the other columns left blank.

use unicode_width::UnicodeWidthStr;

/// Render `rows` under `header`, columns separated by a tab.
pub fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let header: Vec<String> = header.iter().map(|h| h.to_uppercase()).collect();
    let columns = header.len();

    let split_rows: Vec<Vec<Vec<&str>>> = rows
        .iter()
        .map(|row| {
            (0..columns)
                .map(|i| row.get(i).map(|cell| cell.lines().collect()).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &split_rows {
        for (i, cell) in row.iter().enumerate() {
            for line in cell {
                widths[i] = widths[i].max(line.width());
            }
        }
    }

    let mut out = String::new();
    let header_cells: Vec<&str> = header.iter().map(String::as_str).collect();
    push_line(&mut out, &header_cells, &widths);

    for row in &split_rows {
        let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for line_no in 0..height {
            let cells: Vec<&str> = row
                .iter()
                .map(|cell| cell.get(line_no).copied().unwrap_or(""))
                .collect();
            push_line(&mut out, &cells, &widths);
        }
    }

    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push('\t');
        }
        line.push_str(cell);
        let pad = widths[i].saturating_sub(cell.width());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
