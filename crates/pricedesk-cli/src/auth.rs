//! Install, callback, logout and status handlers for the `auth` command.

use clap::Subcommand;
use pricedesk_session::{FileStore, SessionContext, SessionMode, SessionState};

#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Print the OAuth URL that installs the app on a shop
    Install { shop: String },
    /// Exchange the `code` from the OAuth redirect for an access token
    Callback {
        shop: String,
        #[arg(long)]
        code: String,
    },
    /// Forget the stored shop and token
    Logout,
    /// Show the resolved session
    Status,
}

pub(crate) fn run_auth_install(
    ctx: &mut SessionContext<FileStore>,
    shop: &str,
) -> anyhow::Result<()> {
    ctx.install_app(shop)?;
    Ok(())
}

pub(crate) async fn run_auth_callback(
    ctx: &mut SessionContext<FileStore>,
    shop: &str,
    code: &str,
) -> anyhow::Result<()> {
    ctx.handle_auth_callback(shop, code).await?;
    println!(
        "installed on {shop}; session saved to {}",
        ctx.store().path().display()
    );
    Ok(())
}

pub(crate) fn run_auth_logout(ctx: &mut SessionContext<FileStore>) -> anyhow::Result<()> {
    ctx.logout()?;
    println!("logged out");
    Ok(())
}

pub(crate) fn run_auth_status(ctx: &SessionContext<FileStore>) {
    if let Some(message) = ctx.config_error() {
        println!("auth disabled: {message}");
    }
    println!("{}", describe_state(ctx.state()));
}

pub(crate) fn describe_state(state: &SessionState) -> String {
    match state {
        SessionState::Uninitialized | SessionState::Resolving => "session not resolved".to_string(),
        SessionState::Unauthenticated => "not authenticated".to_string(),
        SessionState::Authenticated(session) => {
            let mode = match &session.mode {
                SessionMode::Embedded { host } => format!("embedded (host {host})"),
                SessionMode::Stored => "stored token".to_string(),
                SessionMode::Installed => "installed".to_string(),
                SessionMode::Development => "development fallback".to_string(),
            };
            format!("authenticated as {} via {mode}", session.shop)
        }
    }
}
