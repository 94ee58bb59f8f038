mod app;
mod config;
mod extractors;
mod meals;
mod mindfulness;
mod nutrition;
mod parsing;
mod settings;
mod state;
mod store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "mindful_meals=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init()?;
    let config = app_state.config.clone();
    tracing::info!(
        max_history_days = config.max_history_days,
        parsing = config.openai.is_some(),
        "starting mindful-meals"
    );

    let app = app::build_app(app_state);
    app::serve(app, &config).await
}
