use anyhow::Result;
use quotedeck_cli::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
