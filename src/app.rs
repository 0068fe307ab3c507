/*
 * Responsibility
 * - tracing 初期化 → Config読み込み → bindings / KV / DB 生成 → Router 組み立て
 * - Middleware の適用順はここで決める (origin 正規化 → CORS → http → routes)
 *   CORS を最外にするので panic / timeout / 413 の envelope にも CORS ヘッダが付く
 * - axum::serve() で起動, Ctrl-C で graceful shutdown
 */
use std::{panic, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    bindings::{Bindings, ProcessEnv, StaticBindings},
    config::Config,
    middleware::{self, cors::allow_list},
    services::kv::{KvStore, MemoryKv, ValkeyClient},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,mail_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing; CatchPanicLayer turns them into a 500 envelope.
        tracing::error!(?info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook();

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let bindings: Arc<dyn Bindings> = match &config.bindings_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading bindings file");
            Arc::new(StaticBindings::from_json_file(path)?)
        }
        None => Arc::new(ProcessEnv),
    };

    // Only a startup hint; requests resolve the list again every time.
    let origins = allow_list::resolve(bindings.as_ref());
    if origins.is_empty() && config.app_env.is_production() {
        tracing::warn!("no cors origins bound; browser clients will be rejected");
    } else {
        tracing::info!(count = origins.len(), "cors origins bound at startup");
    }

    let kv: Option<Arc<dyn KvStore>> = match config.kv_url.as_deref() {
        None => None,
        Some("memory://") => Some(Arc::new(MemoryKv::default())),
        Some(url) => Some(Arc::new(ValkeyClient::new(url).await?)),
    };
    match &kv {
        Some(kv) => tracing::info!(backend = kv.backend_name(), "kv binding ready"),
        None => tracing::warn!("KV_URL not set; kv routes will answer 502"),
    }

    let db = match config.database_url.as_deref() {
        Some(url) => Some(PgPoolOptions::new().max_connections(5).connect_lazy(url)?),
        None => {
            tracing::warn!("DATABASE_URL not set; db routes will answer 502");
            None
        }
    };

    Ok(AppState::new(bindings, kv, db))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let bindings = state.bindings();

    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .fallback(api::fallback)
        .with_state(state);

    apply_middleware(router, bindings, config)
}

/// Wrap a router with the request boundary: HTTP layers inside, CORS outermost.
pub fn apply_middleware(router: Router, bindings: Arc<dyn Bindings>, config: &Config) -> Router {
    let router = middleware::http::apply(router, config);
    middleware::cors::apply(router, bindings)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
