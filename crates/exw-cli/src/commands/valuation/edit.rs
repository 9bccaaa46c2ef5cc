use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use exw_client::Debouncer;
use exw_core::valuation::ValuationDraft;
use exw_store::ValuationDraftStore;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::draft::load;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

#[derive(Serialize)]
struct EditResponse {
    applied: usize,
    rejected: Vec<String>,
    saves: usize,
}

/// One `<field> <year> <value>` edit. The value may be blank.
#[derive(Debug, PartialEq, Eq)]
struct EditLine<'a> {
    field: &'a str,
    year: i32,
    value: String,
}

fn parse_line(line: &str) -> Result<Option<EditLine<'_>>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let field = parts.next().ok_or_else(|| format!("'{line}': missing field"))?;
    let year = parts
        .next()
        .ok_or_else(|| format!("'{line}': missing year"))?
        .parse::<i32>()
        .map_err(|_| format!("'{line}': year is not a number"))?;
    let value = parts.collect::<Vec<_>>().join(" ");
    Ok(Some(EditLine { field, year, value }))
}

/// Apply edits from stdin as they arrive, recomputing after each one.
/// The draft is written once input has been quiet for the debounce period
/// and once more at end of input if a write is still pending.
pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut draft = load(ctx)?;
    let mut debouncer = Debouncer::new(ctx.config.timing.debounce());
    let saves = Arc::new(AtomicUsize::new(0));
    let mut applied = 0;
    let mut rejected = Vec::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let edit = match parse_line(&line) {
            Ok(Some(edit)) => edit,
            Ok(None) => continue,
            Err(reason) => {
                rejected.push(reason);
                continue;
            }
        };
        if let Err(error) = draft.set_input(edit.field, edit.year, &edit.value) {
            ui::note(&format!("rejected: {error}"));
            rejected.push(error.to_string());
            continue;
        }
        applied += 1;
        tracing::debug!(field = edit.field, year = edit.year, "draft edited");

        debouncer.call(save_later(ctx.drafts.clone(), draft.clone(), Arc::clone(&saves)));
    }
    debouncer.flush().await;

    output(
        &EditResponse {
            applied,
            rejected,
            saves: saves.load(Ordering::SeqCst),
        },
        flags.format,
    )
}

async fn save_later(store: ValuationDraftStore, draft: ValuationDraft, saves: Arc<AtomicUsize>) {
    match store.save(&draft) {
        Ok(()) => {
            saves.fetch_add(1, Ordering::SeqCst);
        }
        Err(error) => {
            tracing::warn!(%error, "valuation draft was not saved");
            ui::note(&format!("warning: draft not saved: {error}"));
        }
    }
}
