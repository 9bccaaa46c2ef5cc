/// Rendering options derived from the terminal.
#[derive(Clone, Copy, Debug)]
pub struct TableStyle {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// A plain-text table: left-aligned text, right-aligned numbers.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

const MIN_COLUMN: usize = 4;

impl Table {
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn render(&self, style: TableStyle) -> String {
        if self.rows.is_empty() {
            return "(no rows)".to_string();
        }

        let widths = self.widths(style.max_width);
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        let header = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, width)| pad(&clip(name, *width), *width, false))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(header.trim_end().to_string());
        lines.push("-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

        for row in &self.rows {
            let line = widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let text = clip(row.get(index).map_or("-", String::as_str), *width);
                    let numeric = is_numeric(&text);
                    let padded = pad(&text, *width, numeric);
                    if style.color {
                        highlight(&padded, &text)
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    /// Natural column widths, narrowed widest-first to fit `max_width`.
    fn widths(&self, max_width: Option<usize>) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, name)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|text| text.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .max(MIN_COLUMN)
            })
            .collect();

        let Some(max_width) = max_width else {
            return widths;
        };
        let gaps = 2 * widths.len().saturating_sub(1);
        while widths.iter().sum::<usize>() + gaps > max_width {
            let Some((index, _)) = widths
                .iter()
                .enumerate()
                .filter(|(_, width)| **width > MIN_COLUMN)
                .max_by_key(|(_, width)| **width)
            else {
                break;
            };
            widths[index] -= 1;
        }
        widths
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    if right_align {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

fn is_numeric(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty()
        && text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | ',' | '%' | 'e'))
}

/// Colour gap zones and completion states.
fn highlight(padded: &str, text: &str) -> String {
    let code = match text.trim() {
        "no-gaps" | "minor-gaps" | "complete" | "completed" | "true" => "32",
        "considerable-gaps" | "critical-gaps" | "in_progress" | "pending" => "33",
        "very-critical-gaps" | "extremely-critical" | "false" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}
