use super::TruthTable;
use itertools::Itertools;

/// Renders truth tables as fixed-width text.
pub struct TableFormatter;

impl TableFormatter {
    /// Formats the table with one column per switch and light.
    ///
    /// Rows that did not stabilize are marked with a trailing `~`.
    pub fn format(table: &TruthTable) -> String {
        let headers: Vec<&str> = table
            .inputs
            .iter()
            .chain(table.outputs.iter())
            .map(String::as_str)
            .collect();
        let widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(1)).collect();
        let split = table.inputs.len();

        let mut out = String::new();
        out.push_str(&Self::line(&headers, &widths, split));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let rule = "-".repeat(*w);
                    if i == split { format!("+ {}", rule) } else { rule }
                })
                .join(" "),
        );
        out.push('\n');

        for row in &table.rows {
            let cells: Vec<&str> = row
                .inputs
                .iter()
                .chain(row.outputs.iter())
                .map(|v| if *v { "1" } else { "0" })
                .collect();
            out.push_str(&Self::line(&cells, &widths, split));
            if !row.stable {
                out.push_str(" ~");
            }
            out.push('\n');
        }
        out
    }

    fn line(cells: &[&str], widths: &[usize], split: usize) -> String {
        cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                let padded = format!("{:<width$}", cell, width = *width);
                if i == split { format!("| {}", padded) } else { padded }
            })
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableRow;

    #[test]
    fn formats_columns_with_separator() {
        let table = TruthTable {
            inputs: vec!["A".to_string(), "B".to_string()],
            outputs: vec!["Out".to_string()],
            rows: vec![
                TableRow {
                    inputs: vec![false, true],
                    outputs: vec![true],
                    stable: true,
                },
                TableRow {
                    inputs: vec![true, true],
                    outputs: vec![false],
                    stable: false,
                },
            ],
        };
        let text = TableFormatter::format(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "A B | Out");
        assert_eq!(lines[1], "- - + ---");
        assert_eq!(lines[2], "0 1 | 1  ");
        assert_eq!(lines[3], "1 1 | 0   ~");
    }
}
