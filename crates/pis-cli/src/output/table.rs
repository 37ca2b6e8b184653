/// Column separator between cells.
const GAP: &str = "  ";

/// Narrowest a column is squeezed to when fitting the terminal.
const MIN_COLUMN: usize = 4;

/// Render an aligned plain-text table.
///
/// Numeric cells are right-aligned. When `max_width` is set, the widest
/// columns shrink first and overflowing cells end in `…`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    if let Some(max_width) = max_width {
        fit_widths(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push("-".repeat(widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1)));
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let text = truncate(cell, *width);
                pad(&text, *width, looks_numeric(&text))
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = GAP.len() * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.'))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::render_table;

    #[test]
    fn columns_align_and_numbers_right_align() {
        let rows = vec![
            vec!["1".to_string(), "101".to_string()],
            vec!["22".to_string(), "Lobby".to_string()],
        ];
        let table = render_table(&["suite_id", "suite"], &rows, None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "suite_id  suite");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "       1    101");
        assert_eq!(lines[3], "      22  Lobby");
    }

    #[test]
    fn wide_columns_are_truncated_to_fit() {
        let rows = vec![vec!["P1".to_string(), "x".repeat(60)]];
        let table = render_table(&["yardi", "address"], &rows, Some(30));

        for line in table.lines() {
            assert!(line.chars().count() <= 30, "line too wide: {line}");
        }
        assert!(table.contains('…'));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let rows = vec![vec!["1".to_string()]];
        let table = render_table(&["id", "name"], &rows, None);
        assert!(table.lines().nth(2).is_some_and(|line| line.ends_with('-')));
    }
}
