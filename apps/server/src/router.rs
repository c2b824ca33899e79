use axum::Router;
use quire::kernel::server::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Quire", description = "Content and plugin settings API"))]
struct ApiDoc;

/// Application router: API routes plus the Scalar UI at `/api`.
pub fn init(state: ApiState) -> Router {
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(quire::server::router(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(openapi_routes).merge(Scalar::with_url("/api", api_doc))
}
