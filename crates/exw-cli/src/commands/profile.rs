use std::str::FromStr;

use exw_core::profile::{BusinessProfile, ProfileSection};
use exw_core::valuation::current_year;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProfileCommands;
use crate::cli::subcommands::profile::{ProfileSaveArgs, ProfileShowArgs};
use crate::commands::shared::input::read_json;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Handle `exw profile <subcommand>`.
pub async fn handle(action: &ProfileCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ProfileCommands::Show(args) => show(args, ctx, flags).await,
        ProfileCommands::Save(args) => save(args, ctx, flags).await,
    }
}

#[derive(Serialize)]
struct ProfileResponse {
    years_in_business: u32,
    ownership_total: f64,
    ownership_complete: bool,
    profile: BusinessProfile,
}

impl From<BusinessProfile> for ProfileResponse {
    fn from(profile: BusinessProfile) -> Self {
        Self {
            years_in_business: profile.years_in_business(current_year()),
            ownership_total: profile.ownership_total(),
            ownership_complete: profile.ownership_is_complete(),
            profile,
        }
    }
}

fn parse_section(raw: Option<&str>) -> anyhow::Result<Option<ProfileSection>> {
    raw.map(ProfileSection::from_str).transpose().map_err(Into::into)
}

async fn show(args: &ProfileShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let section = parse_section(args.section.as_deref())?;
    let Some(profile) = ctx.api.business_profile().await? else {
        ui::note("no business profile yet; create one with `exw profile save <file>`");
        return output(&Value::Null, flags.format);
    };
    match section {
        Some(section) => output(&profile.section(section), flags.format),
        None => output(&ProfileResponse::from(profile), flags.format),
    }
}

async fn save(args: &ProfileSaveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let saved = match parse_section(args.section.as_deref())? {
        Some(section) => {
            let patch: Value = read_json(&args.file)?;
            ctx.api.save_profile_section(section, &patch).await?
        }
        None => {
            let profile: BusinessProfile = read_json(&args.file)?;
            if profile.business_name.as_deref().is_none_or(|name| name.trim().is_empty()) {
                anyhow::bail!("profile save: business_name is required");
            }
            ctx.api.save_business_profile(&profile).await?
        }
    };
    output(&ProfileResponse::from(saved), flags.format)
}
