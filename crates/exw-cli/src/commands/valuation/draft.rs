use std::collections::BTreeMap;

use anyhow::Context;
use exw_core::financials::{self, FinancialRecord, balance_difference, fields};
use exw_core::valuation::{ValuationDraft, current_year};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::subcommands::valuation::{ValuationRatiosArgs, ValuationSetArgs, ValuationSettingsArgs};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

pub(super) fn load(ctx: &AppContext) -> anyhow::Result<ValuationDraft> {
    ctx.drafts
        .load(current_year())
        .context("failed to load the valuation draft")
}

/// Persist `draft`. A failure is reported but does not undo the edit.
pub(super) fn persist(ctx: &AppContext, draft: &ValuationDraft) -> bool {
    match ctx.drafts.save(draft) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, "valuation draft was not saved");
            ui::note(&format!("warning: draft not saved: {error}"));
            false
        }
    }
}

#[derive(Serialize)]
struct DerivedTotals {
    addbacks_total: f64,
    sde: f64,
    total_assets: f64,
    total_liabilities: f64,
    total_liabilities_equity: f64,
    /// Assets minus liabilities and equity; reported, never corrected.
    balance_difference: f64,
}

impl DerivedTotals {
    fn of(record: &FinancialRecord, year: i32) -> Self {
        Self {
            addbacks_total: record.amount(fields::ADDBACKS_TOTAL, year),
            sde: record.amount(fields::SDE, year),
            total_assets: record.amount(fields::TOTAL_ASSETS, year),
            total_liabilities: record.amount(fields::TOTAL_LIABILITIES, year),
            total_liabilities_equity: record.amount(fields::TOTAL_LIABILITIES_EQUITY, year),
            balance_difference: balance_difference(record, year),
        }
    }
}

#[derive(Serialize)]
struct SetResponse {
    field: String,
    year: i32,
    value: String,
    totals: DerivedTotals,
    saved: bool,
}

pub fn set(args: &ValuationSetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut draft = load(ctx)?;
    draft.set_input(&args.field, args.year, &args.value)?;
    let saved = persist(ctx, &draft);

    output(
        &SetResponse {
            field: args.field.clone(),
            year: args.year,
            value: draft
                .financials
                .get(&args.field, args.year)
                .unwrap_or_default()
                .to_string(),
            totals: DerivedTotals::of(&draft.financials, args.year),
            saved,
        },
        flags.format,
    )
}

#[derive(Serialize)]
struct DraftResponse {
    years: Vec<i32>,
    industry_id: Option<String>,
    private_discount_pct: f64,
    financials: FinancialRecord,
}

pub fn show(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = load(ctx)?;
    if flags.format == OutputFormat::Table {
        return output(&field_rows(&draft), flags.format);
    }
    output(
        &DraftResponse {
            years: draft.years(),
            industry_id: draft.industry_id.clone(),
            private_discount_pct: draft.private_discount_pct,
            financials: draft.financials,
        },
        flags.format,
    )
}

/// One row per field with a column per year, in canonical field order.
fn field_rows(draft: &ValuationDraft) -> Vec<Map<String, Value>> {
    let years = draft.years();
    fields::all()
        .filter(|field| draft.financials.has_field(field))
        .map(|field| {
            let mut row = Map::new();
            row.insert("field".to_string(), Value::String(field.to_string()));
            for year in &years {
                let value = draft.financials.get(field, *year).unwrap_or_default();
                row.insert(year.to_string(), Value::String(value.to_string()));
            }
            row
        })
        .collect()
}

pub fn ratios(args: &ValuationRatiosArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = load(ctx)?;
    match args.year {
        Some(year) => {
            if !draft.years().contains(&year) {
                anyhow::bail!("valuation ratios: year {year} is not in the draft");
            }
            output(&financials::ratios_for_year(&draft.financials, year), flags.format)
        }
        None => output(&financials::ratios(&draft.financials), flags.format),
    }
}

pub fn trend(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = load(ctx)?;
    output(&financials::trend(&draft.financials), flags.format)
}

#[derive(Serialize)]
struct SettingsResponse {
    industry_id: Option<String>,
    private_discount_pct: f64,
    saved: bool,
}

pub fn settings(args: &ValuationSettingsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut draft = load(ctx)?;
    let changed = args.industry.is_some() || args.discount.is_some();
    if let Some(industry) = &args.industry {
        draft.set_industry(Some(industry.clone()));
    }
    if let Some(discount) = args.discount {
        draft.set_discount(discount)?;
    }
    let saved = changed && persist(ctx, &draft);

    output(
        &SettingsResponse {
            industry_id: draft.industry_id,
            private_discount_pct: draft.private_discount_pct,
            saved,
        },
        flags.format,
    )
}

pub fn reset(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.drafts.clear().context("failed to clear the valuation draft")?;
    let mut response = BTreeMap::new();
    response.insert("cleared", true);
    output(&response, flags.format)
}
