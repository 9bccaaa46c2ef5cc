use exw_auth::{AuthUser, Credentials, Session};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
pub(super) struct SignedInResponse {
    pub authenticated: bool,
    pub provider: String,
    pub user: AuthUser,
    pub expires_at: Option<String>,
}

impl SignedInResponse {
    pub(super) fn new(session: Session, ctx: &AppContext) -> Self {
        Self {
            authenticated: true,
            provider: ctx.auth.kind().to_string(),
            user: session.user,
            expires_at: session.expires_at.map(|at| at.to_rfc3339()),
        }
    }
}

pub async fn handle(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let credentials = Credentials {
        email: args.email.trim().to_string(),
        password: args.password.clone(),
    };
    let session = ctx.auth.login(&credentials).await?;
    output(&SignedInResponse::new(session, ctx), flags.format)
}
