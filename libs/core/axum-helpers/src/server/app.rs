use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Assembles the full application router.
///
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar)
/// - `apis` nested under `api_prefix` (e.g. `/api/v1`)
/// - `root` merged at the top level, for `/health` and `/ready`
/// - tracing, security headers, CORS and compression around everything
/// - JSON 404 fallback
///
/// Domain routers apply their own state before they are passed in.
///
/// ```ignore
/// let router = create_router::<ApiDoc>(
///     &config.server.api_prefix(),
///     api_routes,
///     health_routes,
///     cors_layer_from_env()?,
/// );
/// ```
pub fn create_router<T>(api_prefix: &str, apis: Router, root: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest(api_prefix, apis)
        .merge(root)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        // gzip, br, deflate, zstd based on Accept-Encoding
        .layer(CompressionLayer::new())
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup` under
/// `shutdown_timeout` (closing the database pool, typically).
///
/// ```ignore
/// let db_for_cleanup = db.clone();
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     if let Err(e) = db_for_cleanup.close().await {
///         tracing::error!("Failed to close database pool: {}", e);
///     }
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();
    let shutdown_handle = coordinator.clone();
    let mut shutdown_rx = coordinator.subscribe();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    signal_handle.abort();

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct TestDoc;

    fn app() -> Router {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        let root = Router::new().route("/health", get(|| async { "ok" }));
        create_router::<TestDoc>("/api/v1", apis, root, CorsLayer::permissive())
    }

    async fn get_path(uri: &str) -> axum::response::Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_are_prefixed() {
        assert_eq!(get_path("/api/v1/ping").await.status(), StatusCode::OK);
        assert_eq!(get_path("/ping").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_routes_are_unprefixed() {
        assert_eq!(get_path("/health").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_fallback_is_json_envelope() {
        let response = get_path("/nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-frame-options"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        assert_eq!(get_path("/api-docs/openapi.json").await.status(), StatusCode::OK);
    }
}
