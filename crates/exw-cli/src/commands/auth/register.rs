use exw_auth::{RegisterOutcome, Registration};
use serde::Serialize;

use super::login::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PendingResponse {
    authenticated: bool,
    email: String,
    note: &'static str,
}

pub async fn handle(args: &AuthRegisterArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.name.trim().is_empty() {
        anyhow::bail!("auth register: --name must not be empty");
    }
    let registration = Registration {
        email: args.email.trim().to_string(),
        password: args.password.clone(),
        full_name: args.name.trim().to_string(),
    };

    match ctx.auth.register(&registration).await? {
        RegisterOutcome::SignedIn(session) => output(&SignedInResponse::new(session, ctx), flags.format),
        RegisterOutcome::ConfirmationPending { email } => output(
            &PendingResponse {
                authenticated: false,
                email,
                note: "confirm your email address, then run `exw auth login`",
            },
            flags.format,
        ),
    }
}
