use exw_auth::SessionStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatusResponse {
    provider: String,
    api: String,
    #[serde(flatten)]
    session: SessionStatus,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(
        &StatusResponse {
            provider: ctx.auth.kind().to_string(),
            api: ctx.api.base_url().to_string(),
            session: ctx.auth.status(),
        },
        flags.format,
    )
}
