//! Session wiring for the CLI: a file-backed store and a navigator that
//! prints the URL for the user to open.

use pricedesk_client::ServerApiClient;
use pricedesk_core::AppConfig;
use pricedesk_session::{FileStore, LaunchParams, Navigator, SessionContext};
use reqwest::Url;

/// A terminal cannot redirect, so the authorize URL is printed instead.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &Url) {
        println!("Open this URL to install the app:\n{url}");
    }
}

/// Combines `--launch-url` with explicit `--shop`/`--host`; explicit flags
/// win.
pub(crate) fn launch_params(
    launch_url: Option<&str>,
    shop: Option<String>,
    host: Option<String>,
) -> anyhow::Result<LaunchParams> {
    let base = match launch_url {
        Some(url) => LaunchParams::from_url(url)?,
        None => LaunchParams::default(),
    };
    Ok(base.merge(shop, host))
}

/// Builds the session from configuration and resolves it against `launch`.
///
/// A store that cannot be read leaves the session unauthenticated rather
/// than failing, so `auth logout` and `auth install` stay reachable.
pub(crate) fn open_session(
    config: &AppConfig,
    launch: &LaunchParams,
) -> anyhow::Result<SessionContext<FileStore>> {
    let store = FileStore::new(&config.session_path);
    let mut ctx = SessionContext::from_config(config, store, Box::new(PrintNavigator))?;
    if let Err(e) = ctx.resolve(launch) {
        tracing::warn!(error = %e, "could not restore saved session");
    }
    Ok(ctx)
}

pub(crate) fn require_api(ctx: &SessionContext<FileStore>) -> anyhow::Result<&ServerApiClient> {
    ctx.api().ok_or_else(|| {
        anyhow::anyhow!(
            "not authenticated: run `pricedesk auth install <shop>` or pass --shop and --host"
        )
    })
}
