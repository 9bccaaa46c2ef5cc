use exw_core::wealth_gap::{NetWorthBreakdown, WealthGap, WealthGapCalculation, WealthGoalMethod};
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WealthGapCommands;
use crate::cli::subcommands::wealth_gap::{WealthGapCalcArgs, WealthGapFileArgs};
use crate::commands::shared::input::read_json;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Handle `exw wealth-gap <subcommand>`.
pub async fn handle(action: &WealthGapCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        WealthGapCommands::Show => show(ctx, flags).await,
        WealthGapCommands::Calc(args) => calc(args, ctx, flags).await,
        WealthGapCommands::Save(args) => save(args, ctx, flags).await,
    }
}

async fn show(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match ctx.api.wealth_gap().await? {
        Some(saved) => output(&saved, flags.format),
        None => {
            ui::note("no wealth gap saved yet; see `exw wealth-gap save <file>`");
            output(&Value::Null, flags.format)
        }
    }
}

#[derive(Serialize)]
struct CalcResponse {
    #[serde(flatten)]
    calculation: WealthGapCalculation,
    net_worth_breakdown: Option<NetWorthBreakdown>,
    source: &'static str,
}

/// Inputs from `path` with net worth derived from its components.
fn read_inputs(path: &std::path::Path) -> anyhow::Result<WealthGap> {
    let mut inputs: WealthGap = read_json(path)?;
    if inputs.wealth_goal_method == WealthGoalMethod::MonthlyNeeds && inputs.years_of_income == 0 {
        anyhow::bail!("wealth gap: years_of_income must be at least 1");
    }
    inputs.derive_net_worth();
    Ok(inputs)
}

async fn calc(args: &WealthGapCalcArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let inputs = read_inputs(&args.file)?;
    let (calculation, source) = if args.local {
        (inputs.calculate(), "local")
    } else {
        (ctx.api.calculate_wealth_gap(&inputs).await?, "server")
    };
    output(
        &CalcResponse {
            calculation,
            net_worth_breakdown: inputs.has_components().then(|| inputs.net_worth_breakdown()),
            source,
        },
        flags.format,
    )
}

async fn save(args: &WealthGapFileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let inputs = read_inputs(&args.file)?;
    output(&ctx.api.save_wealth_gap(&inputs).await?, flags.format)
}
