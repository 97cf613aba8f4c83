use shortlink_api::config::{self, AppEnv, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    init_tracing(&config);
    config.print_summary();

    shortlink_api::server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // The platform timestamps every log line itself.
    match (config.log_format.as_str(), config.app_env) {
        ("json", _) => builder.json().init(),
        (_, AppEnv::Production) => builder.without_time().init(),
        _ => builder.init(),
    }
}
