mod app;
mod client;
mod config;
mod error;
mod export;
mod session;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, sign_in) = config::load()?;
    let mut app = app::App::new(config, sign_in)?;
    app.run().await?;
    Ok(())
}
