//! 记录打标服务
//!
//! 提供打标规则管理、记录处理和统计查询的 REST API。

use axum::{Router, http::HeaderValue, routing::get};
use labeling_service::{config::AppConfig, handlers, observability, routes, state::AppState};
use rule_engine::RuleDraft;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：config/default.toml + config/{env}.toml + LABELER_ 环境变量
    // 加载失败回退默认配置，日志初始化后告警
    let (config, config_err) = match AppConfig::load("labeling-service") {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    observability::init(&config.observability)?;

    if let Some(e) = config_err {
        warn!("配置加载失败，已回退默认配置: {e}");
    }

    info!("Starting labeling-service on {}", config.server_addr());

    let state = AppState::new();

    // 按配置预置种子规则，坏的条件文本只告警不阻止启动
    if !config.seed_rules.is_empty() {
        let mut registry = state.registry.write().await;
        for seed in &config.seed_rules {
            let draft = RuleDraft::new(&seed.condition, &seed.label, seed.priority);
            if let Err(e) = registry.create(draft) {
                warn!(
                    condition = %seed.condition,
                    label = %seed.label,
                    "种子规则无效，已跳过: {e}"
                );
            }
        }
        info!(count = registry.len(), "种子规则加载完成");
    }

    // CORS 配置：通过 LABELER_CORS_ORIGINS 环境变量控制允许的来源
    let allowed_origins =
        std::env::var("LABELER_CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = if allowed_origins == "*" {
        if config.is_production() {
            warn!("LABELER_CORS_ORIGINS=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!("CORS allowed_origins: {}", allowed_origins);
        let origins: Vec<_> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = Router::new()
        .nest("/api", routes::api_routes())
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM（K8s 停止 Pod）或 Ctrl+C 时，
    // 停止接收新连接并等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// K8s 通过 SIGTERM 通知 Pod 停止；本地开发通过 Ctrl+C。
/// 收到任一信号后返回，触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
