use std::sync::Arc;

use intake_wizard::config::{IntakeConfig, ReceiverConfig};
use intake_wizard::receiver::{self, ReceiverState};
use intake_wizard::submission::HttpSubmissionClient;
use intake_wizard::terminal;
use intake_wizard::wizard::WizardController;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    eprintln!("📝 Intake Wizard v{}", env!("CARGO_PKG_VERSION"));

    // `intake-wizard serve` runs the brief receiver instead of the wizard.
    if std::env::args().nth(1).as_deref() == Some("serve") {
        let config = ReceiverConfig::from_env()?;
        eprintln!("   Brief API: http://0.0.0.0:{}/api/brief\n", config.port);
        receiver::serve(&config, ReceiverState::new()).await?;
        return Ok(());
    }

    let config = IntakeConfig::from_env()?;
    eprintln!("   Endpoint: {}", config.endpoint);
    eprintln!("   Scheduling: {}", config.scheduling_url);
    eprintln!(
        "   Preview fallback on: {}\n",
        config
            .soft_failure_statuses
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let client = Arc::new(HttpSubmissionClient::new(config.clone())?);
    let controller = Arc::new(WizardController::new(&config, client));
    terminal::run(controller).await?;

    Ok(())
}
