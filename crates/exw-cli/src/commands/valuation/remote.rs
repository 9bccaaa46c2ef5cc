use exw_core::financials::{FinancialRecord, fields};
use exw_core::valuation::{Industry, QuickValuationRequest};
use serde::Serialize;

use super::draft::load;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::valuation::ValuationQuickArgs;
use crate::commands::shared::input::read_json;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct IndustryRow {
    id: i64,
    industry_name: String,
    ev_ebitda_median: Option<f64>,
    ev_revenue_median: Option<f64>,
    /// EV/EBITDA median after the draft's private company discount.
    ev_ebitda_discounted: Option<f64>,
    selected: bool,
}

fn industry_row(industry: Industry, discount_pct: f64, selected: Option<&str>) -> IndustryRow {
    IndustryRow {
        id: industry.id,
        ev_ebitda_median: industry.ev_ebitda.median,
        ev_revenue_median: industry.ev_revenue.median,
        ev_ebitda_discounted: industry.ev_ebitda.discounted_median(discount_pct),
        selected: selected == Some(industry.id.to_string().as_str()),
        industry_name: industry.industry_name,
    }
}

pub async fn industries(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = load(ctx)?;
    let rows: Vec<IndustryRow> = ctx
        .api
        .industries()
        .await?
        .into_iter()
        .map(|industry| industry_row(industry, draft.private_discount_pct, draft.industry_id.as_deref()))
        .collect();
    output(&rows, flags.format)
}

pub async fn submit(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = load(ctx)?;
    if !has_entries(&draft.financials) {
        anyhow::bail!("valuation submit: the draft has no financials yet (see `exw valuation set`)");
    }
    if draft.industry_id.is_none() {
        tracing::warn!("no industry selected; the backend will fall back to its defaults");
    }
    let result = ctx.api.advanced_valuation(&draft.submission()).await?;
    output(&result, flags.format)
}

/// Whether any entered (non-derived) cell holds a value.
fn has_entries(record: &FinancialRecord) -> bool {
    record
        .field_names()
        .filter(|field| !fields::is_derived(field))
        .filter_map(|field| record.field(field))
        .any(|per_year| per_year.values().any(|value| !value.trim().is_empty()))
}

pub async fn quick(args: &ValuationQuickArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request: QuickValuationRequest = read_json(&args.file)?;
    let result = ctx.api.quick_valuation(&request).await?;
    output(&result, flags.format)
}

pub async fn history(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.api.valuation_history().await?, flags.format)
}

pub async fn get(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.api.valuation(id).await?, flags.format)
}

#[derive(Serialize)]
struct ArchiveResponse {
    id: i64,
    message: String,
}

pub async fn archive(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let message = ctx.api.archive_valuation(id).await?;
    output(&ArchiveResponse { id, message }, flags.format)
}

#[cfg(test)]
mod tests {
    use exw_core::valuation::{Industry, ValuationDraft};
    use pretty_assertions::assert_eq;

    use super::{has_entries, industry_row};

    #[test]
    fn blank_draft_has_no_entries() {
        let mut draft = ValuationDraft::new(2026);
        assert!(!has_entries(&draft.financials));
        draft.set_input("cash", 2026, "100000").unwrap();
        assert!(has_entries(&draft.financials));
    }

    #[test]
    fn row_applies_discount_and_marks_selection() {
        let industry: Industry = serde_json::from_value(serde_json::json!({
            "id": 4,
            "industry_name": "Software (System & Application)",
            "ev_ebitda": {"low": 12.0, "median": 20.0, "high": 30.0}
        }))
        .unwrap();

        let row = industry_row(industry, 25.0, Some("4"));
        assert_eq!(row.ev_ebitda_discounted, Some(15.0));
        assert_eq!(row.ev_revenue_median, None);
        assert!(row.selected);
    }
}
