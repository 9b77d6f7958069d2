//! Plain-text table output

use crate::table::TableView;

/// Longest cell shown before truncating
const MAX_CELL_WIDTH: usize = 48;

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let kept: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", kept)
    }
}

/// Render a table page as aligned text
pub fn render_text(view: &TableView) -> String {
    let mut output = String::new();

    if view.search.is_empty() {
        output.push_str(&format!("{} records\n\n", view.total_count));
    } else {
        output.push_str(&format!(
            "{} of {} records match \"{}\"\n\n",
            view.filtered_count, view.total_count, view.search
        ));
    }

    // Id column first so rows can be targeted by edit/delete
    let mut headers = vec!["Id".to_string()];
    headers.extend(view.headers.iter().cloned());

    let rows: Vec<Vec<String>> = view
        .ids
        .iter()
        .zip(&view.rows)
        .map(|(id, cells)| {
            std::iter::once(id.clone())
                .chain(cells.iter().map(|c| truncate(c)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r.get(i).map_or(0, |c| c.chars().count()))
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    output.push_str(&line(&headers));
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    output.push('\n');

    if rows.is_empty() {
        output.push_str("No locations found.\n");
    }
    for row in &rows {
        output.push_str(&line(row));
        output.push('\n');
    }

    output.push_str(&format!(
        "\nPage {} of {}\n",
        view.current_page,
        view.total_pages.max(1)
    ));

    output
}
