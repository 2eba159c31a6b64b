use url_registry::{
    configuration::{TelemetrySettings, get_configuration},
    errors::StartupError,
    startup::Application,
    telemetry::{self, get_subscriber, init_subscriber, init_tracer},
};

fn install_telemetry(settings: &TelemetrySettings) -> Result<(), StartupError> {
    let tracer = settings
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| init_tracer("url-registry", endpoint))
        .transpose()?;
    let subscriber = get_subscriber(
        "url-registry".into(),
        settings.log_level.clone(),
        tracer,
        std::io::stdout,
    );
    init_subscriber(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = get_configuration().map_err(StartupError::Configuration)?;
    install_telemetry(&cfg.telemetry)?;

    let version = env!("CARGO_PKG_VERSION");
    tracing::info!(version, "Starting url-registry");

    let application = Application::build(&cfg).await?;
    let outcome = application.run_until_stopped().await;

    telemetry::shutdown();
    outcome?;
    Ok(())
}
