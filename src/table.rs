use std::borrow::Cow;
use std::fmt::Write as _;

/// Cells longer than this many characters are cut and end with `…`.
pub const DEFAULT_MAX_CELL_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct TableLayout {
    pub max_cell_width: usize,
    pub align: Vec<Align>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            align: Vec::new(),
        }
    }
}

impl TableLayout {
    pub fn with_align(mut self, align: &[Align]) -> Self {
        self.align = align.to_vec();
        self
    }

    fn align_of(&self, idx: usize) -> Align {
        self.align.get(idx).copied().unwrap_or(Align::Left)
    }
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    render_table_with(headers, rows, &TableLayout::default())
}

pub fn render_table_with(
    headers: &[String],
    rows: &[Vec<String>],
    layout: &TableLayout,
) -> String {
    let prepare = |value: &String| fit_cell(&sanitize_cell(value), layout.max_cell_width);
    let header_cells = headers.iter().map(prepare).collect::<Vec<_>>();
    let body = rows
        .iter()
        .map(|row| row.iter().take(headers.len()).map(prepare).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = header_cells
        .iter()
        .map(|h| display_width(h).max(1))
        .collect::<Vec<_>>();
    for row in &body {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(&header_cells, &widths, layout));
    let separator = widths
        .iter()
        .map(|w| "-".repeat((*w).max(3)))
        .collect::<Vec<_>>();
    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(
        output,
        "{}",
        format_row(&separator, &separator_widths, &TableLayout::default())
    );
    for row in &body {
        let _ = writeln!(output, "{}", format_row(row, &widths, layout));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>], layout: &TableLayout) {
    print!("{}", render_table_with(headers, rows, layout));
}

fn format_row(values: &[String], widths: &[usize], layout: &TableLayout) -> String {
    let cells = values
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (value, width))| {
            let padding = " ".repeat(width.saturating_sub(display_width(value)));
            match layout.align_of(idx) {
                Align::Left => format!("{value}{padding}"),
                Align::Right => format!("{padding}{value}"),
            }
        })
        .collect::<Vec<_>>();
    cells.join("  ").trim_end().to_string()
}

fn fit_cell(value: &str, max_width: usize) -> String {
    if max_width == 0 || display_width(value) <= max_width {
        return value.to_string();
    }
    let mut cut = value
        .chars()
        .take(max_width.saturating_sub(1))
        .collect::<String>();
    cut.push('…');
    cut
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
