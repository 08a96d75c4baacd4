/// One spreadsheet row treated as a unit of pending work.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkRow {
    /// 1-based row number, as the sheet addresses it.
    pub row: usize,
    pub input: String,
}

/// Scans a table top to bottom and returns the first row whose input column
/// holds a value and whose status column is still empty. The first table row
/// is the header and is skipped. Rows read from the sheet api can be ragged,
/// a missing trailing cell counts as empty.
pub fn next_pending(
    rows: &[Vec<String>],
    input_column: usize,
    status_column: usize,
) -> Option<WorkRow> {
    rows.iter().enumerate().skip(1).find_map(|(index, row)| {
        let input = cell(row, input_column);
        let status = cell(row, status_column);
        match !input.is_empty() && status.is_empty() {
            true => Some(WorkRow {
                row: index + 1,
                input,
            }),
            false => None,
        }
    })
}

pub fn cell(row: &[String], column: usize) -> String {
    row.get(column)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{cell, next_pending, WorkRow};

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn next_pending_picks_first_open_row() {
        let rows = table(&[
            &["title", "posted", "downloaded"],
            &["Vinpearl Resort", "", "2025-03-01 10:00:00"],
            &["Regalia Gold Hotel", "", ""],
            &["Libera Hotel", "", ""],
        ]);

        let work = next_pending(&rows, 0, 2);

        assert_eq!(
            work,
            Some(WorkRow {
                row: 3,
                input: "Regalia Gold Hotel".to_string()
            })
        );
    }

    #[test]
    fn next_pending_skips_rows_without_input() {
        let rows = table(&[
            &["title", "posted", "downloaded"],
            &["", "", ""],
            &["  ", "", ""],
            &["Libera Hotel", "", ""],
        ]);

        let work = next_pending(&rows, 0, 2).unwrap();

        assert_eq!(work.row, 4);
        assert_eq!(work.input, "Libera Hotel");
    }

    #[test]
    fn next_pending_treats_missing_trailing_cells_as_empty() {
        let rows = table(&[
            &["title", "posted", "downloaded"],
            &["Regalia Gold Hotel"],
        ]);

        let work = next_pending(&rows, 0, 2).unwrap();

        assert_eq!(work.row, 2);
    }

    #[test]
    fn next_pending_none_when_everything_is_done() {
        let rows = table(&[
            &["title", "posted", "downloaded"],
            &["Vinpearl Resort", "", "2025-03-01 10:00:00"],
        ]);

        assert_eq!(next_pending(&rows, 0, 2), None);
    }

    #[test]
    fn cell_trims_and_defaults() {
        let row = vec!["  Vinpearl  ".to_string()];

        assert_eq!(cell(&row, 0), "Vinpearl");
        assert_eq!(cell(&row, 5), "");
    }
}
