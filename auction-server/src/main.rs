use {
    anyhow::Result,
    clap::Parser,
    per_metrics::MetricsLayer,
    server::start_server,
    std::io::IsTerminal,
    tracing_subscriber::{
        filter::LevelFilter,
        fmt,
        layer::SubscriberExt,
        util::SubscriberInitExt,
        Layer,
        Registry,
    },
};

mod api;
mod auction;
mod config;
mod kernel;
mod metrics_api;
mod per_metrics;
mod server;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize a Tracing Subscriber
    let log_layer = fmt::layer()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_ansi(std::io::stderr().is_terminal());

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    let log_layer = if std::io::stderr().is_terminal() {
        log_layer.compact().boxed()
    } else {
        log_layer.json().boxed()
    };

    Registry::default()
        .with(MetricsLayer)
        .with(
            log_layer.with_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            ),
        )
        .try_init()?;

    // Parse the command line arguments with clap, will exit automatically on `--help` or
    // with invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
