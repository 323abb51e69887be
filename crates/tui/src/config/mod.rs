use api_types::donor::Donor;
use clap::Parser;
use serde::Deserialize;

use crate::{error::Result, session};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Path of the local session record (`{id, name}` of the donor).
    pub session_path: String,
    /// Where receipts and CSV exports are written.
    pub downloads_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            session_path: session::default_session_path().to_string(),
            downloads_dir: "downloads".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hoperaise_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8080).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the session record path.
    #[arg(long)]
    session: Option<String>,
    /// Override the downloads directory.
    #[arg(long)]
    downloads: Option<String>,
    /// Write the session record before starting (with --donor-name).
    ///
    /// Stand-in for the web login flow, which owns authentication.
    #[arg(long, requires = "donor_name")]
    donor_id: Option<i64>,
    /// Donor display name to store alongside --donor-id.
    #[arg(long, requires = "donor_id")]
    donor_name: Option<String>,
}

pub fn load() -> Result<(AppConfig, Option<Donor>)> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("HOPERAISE_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(session) = args.session {
        settings.session_path = session;
    }
    if let Some(downloads) = args.downloads {
        settings.downloads_dir = downloads;
    }

    let sign_in = match (args.donor_id, args.donor_name) {
        (Some(id), Some(name)) => Some(Donor { id, name }),
        _ => None,
    };

    Ok((settings, sign_in))
}
