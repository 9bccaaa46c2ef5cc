use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Table, TableStyle};

/// Render a serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let style = TableStyle {
                max_width: prefs.term_width,
                color: prefs.table_color,
            };
            Ok(to_table(serde_json::to_value(value)?).render(style))
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Arrays of objects become one row per item with the union of their keys
/// as columns; a single object becomes key/value rows.
fn to_table(value: Value) -> Table {
    match value {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            let rows: Vec<Map<String, Value>> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect();
            let mut columns: Vec<String> = Vec::new();
            for row in &rows {
                for key in row.keys() {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
            }
            let cells = rows
                .iter()
                .map(|row| {
                    columns
                        .iter()
                        .map(|column| row.get(column).map_or_else(|| "-".to_string(), cell))
                        .collect()
                })
                .collect();
            Table::new(columns, cells)
        }
        Value::Array(items) => Table::new(
            vec!["value".to_string()],
            items.iter().map(|item| vec![cell(item)]).collect(),
        ),
        Value::Object(map) => Table::new(
            vec!["key".to_string(), "value".to_string()],
            map.iter().map(|(key, value)| vec![key.clone(), cell(value)]).collect(),
        ),
        scalar => Table::new(vec!["value".to_string()], vec![vec![cell(&scalar)]]),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        nested => nested.to_string(),
    }
}
