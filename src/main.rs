use anyhow::{anyhow, Result};
use mediassist::integration::{IntegrationConfig, Orchestrator};
use mediassist::ui::MediAssistApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediassist=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MediAssist healthcare assistant");

    let config = IntegrationConfig::from_env()?;
    let handle = Orchestrator::new(config).start()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([720.0, 540.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MediAssist AI",
        options,
        Box::new(|cc| Ok(Box::new(MediAssistApp::new(cc, handle)))),
    )
    .map_err(|e| anyhow!("UI error: {}", e))?;

    Ok(())
}
