//! 캠퍼스 포털 인증 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 가입, 로그인, 교직원 승인 관리, 헬스 체크 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Extension, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use portal_api::auth::{AuthService, JwtConfig, PgAccountStore};
use portal_api::openapi::swagger_ui_router;
use portal_api::routes::create_api_router;
use portal_api::state::AppState;
use portal_core::{init_logging, AppConfig, LogConfig};

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
///   예: `https://portal.example.com,https://admin.example.com`
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(std::env::var("CORS_ORIGINS").is_ok())
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    // 미들웨어는 발급과 같은 시크릿으로 토큰을 검증한다
    let jwt_secret = state.auth.jwt_secret().to_string();

    create_api_router()
        .with_state(state)
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        .layer(Extension(JwtConfig { secret: jwt_secret }))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors_layer())
}

/// 종료 시그널 대기.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 설정 로드 (기본값 → config/default.toml → PORTAL__ 환경 변수)
    let config = AppConfig::load_default()?;

    // tracing 초기화 (RUST_LOG가 설정의 레벨보다 우선)
    let log_config = LogConfig::new(&config.logging.level)
        .with_format(config.logging.format.parse().unwrap_or_default());
    init_logging(log_config)?;

    info!("Starting Campus Portal auth server...");

    if config.auth.is_dev_secret() {
        warn!(
            "JWT secret not configured; using the development default. \
             Set PORTAL__AUTH__JWT_SECRET before deploying."
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            error!(
                host = %config.server.host,
                port = config.server.port,
                error = %e,
                "소켓 주소 설정이 유효하지 않습니다. PORTAL__SERVER__HOST, PORTAL__SERVER__PORT를 확인하세요."
            );
            e
        })?;

    // DB 연결 풀 구성. 인증 게이트웨이는 저장소 없이는 의미가 없으므로
    // 연결 실패 시 기동하지 않는다.
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
        .connect(&config.database.connection_url())
        .await
        .map_err(|e| {
            error!(
                host = %config.database.host,
                database = %config.database.database,
                error = %e,
                "데이터베이스 연결 실패"
            );
            e
        })?;

    info!(
        max_connections = config.database.max_connections,
        "Connected to PostgreSQL"
    );

    let store = Arc::new(PgAccountStore::new(pool.clone()));
    let auth = AuthService::new(store, config.auth.jwt_secret.clone());
    let state = Arc::new(AppState::new(auth, Some(pool)));

    let app = create_router(state);

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
