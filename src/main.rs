use std::io;

use anyhow::Result;
use tracing::info;

use tabiya_session::Shell;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries protocol responses only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabiya=info,tabiya_session=info,tabiya_core=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        start = %tabiya_core::STARTING_FEN,
        "tabiya starting"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new().run(stdin.lock(), stdout.lock())?;
    Ok(())
}
