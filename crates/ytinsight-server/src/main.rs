mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use ytinsight_analyzer::{CommentAnalyzer, OpenAiClient, SamplingConfig};
use ytinsight_youtube::YoutubeClient;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ytinsight_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let llm = OpenAiClient::with_base_url(
        &config.openai_api_key,
        config.llm_timeout_secs,
        &config.llm_base_url,
    )?
    .with_retries(config.llm_max_retries, config.llm_retry_backoff_base_ms);
    let analyzer = CommentAnalyzer::new(Arc::new(llm)).with_sampling(SamplingConfig {
        model: config.llm_model.clone(),
        ..SamplingConfig::default()
    });
    let source = YoutubeClient::new(&config.youtube_api_key, config.youtube_timeout_secs)?;

    let app = build_app(AppState {
        source: Arc::new(source),
        analyzer,
        max_comments: config.max_comments,
    });

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        model = %config.llm_model,
        "starting ytinsight server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
