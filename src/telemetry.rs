use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, runtime, trace as sdktrace};
use opentelemetry_semantic_conventions::resource::SERVICE_NAME;
use thiserror::Error;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Cannot build the OTLP span exporter: {0}")]
    Exporter(String),

    #[error("Cannot install the log forwarder")]
    LogTracer(#[from] tracing_log::log::SetLoggerError),

    #[error("Cannot set global tracing subscriber")]
    DefaultSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Builds an OTLP/gRPC tracer and registers its provider globally so that
/// [`shutdown`] can flush it.
pub fn init_tracer(name: &str, endpoint: &str) -> Result<sdktrace::Tracer, TelemetryError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = Resource::new(vec![KeyValue::new(SERVICE_NAME, name.to_string())]);

    let tracer_provider = sdktrace::TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(resource)
        .build();

    let tracer = tracer_provider.tracer(name.to_string());
    opentelemetry::global::set_tracer_provider(tracer_provider);
    Ok(tracer)
}

/// Compose the subscriber: env filter, optional span export, then bunyan
/// JSON lines written to `sink`.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    tracer: Option<sdktrace::Tracer>,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Sync + Send + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let telemetry_layer = tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    Registry::default()
        .with(env_filter)
        .with(telemetry_layer)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink))
}

pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), TelemetryError> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}

/// Flushes pending spans. A no-op when no exporter was installed.
pub fn shutdown() {
    opentelemetry::global::shutdown_tracer_provider();
}
