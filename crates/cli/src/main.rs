use server::{Config, Environment};
use std::env;
use std::net::SocketAddr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // LOG_FORMAT=json switches to one JSON object per line
    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    let app_env = Environment::from_str(&env::var("APP_ENV").unwrap_or_default());
    let port: u16 = match env::var("PORT") {
        Ok(port) => port.parse()?,
        Err(_) => Config::DEFAULT_PORT,
    };
    let data_path = env::var("DATA_PATH")
        .unwrap_or_else(|_| app_env.default_data_path().to_string_lossy().to_string());

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
    tracing::info!(
        "Starting kaori {} ({:?}, data at {})",
        env!("CARGO_PKG_VERSION"),
        app_env,
        data_path
    );

    server::run_server(addr, app_env, &data_path).await
}
