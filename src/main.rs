mod shutdown;
mod startup;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting reminder sync");

    // Load configuration
    let config = startup::load_config()?;

    // Watch the document until shutdown
    startup::start_sync(config).await
}
