use crate::{Article, Articles};
use axum::Json;
use axum::extract::{Path, Query, State};
use quire_derive::api_handler;
use quire_domain::constants::ARTICLE_TAG;
use quire_kernel::content::{
    ContentListResponse, ContentPayload, ContentQuery, ContentResponse, ContentService,
};
use quire_kernel::server::{ApiError, ApiState, ErrorEnvelope};
use serde_json::{Map, Value};

type Payload = Json<ContentPayload<Map<String, Value>>>;

fn articles(state: &ApiState) -> Result<&ContentService<Article>, ApiError> {
    Ok(&state.try_get_slice::<Articles>()?.service)
}

#[api_handler(
    get,
    path = "/api/articles",
    params(ContentQuery),
    responses(
        (status = OK, description = "One page of articles", body = ContentListResponse<Article>),
        (status = BAD_REQUEST, description = "Invalid sort or pagination", body = ErrorEnvelope),
    ),
    tag = ARTICLE_TAG,
)]
pub(crate) async fn find(
    State(state): State<ApiState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ContentListResponse<Article>>, ApiError> {
    Ok(Json(articles(&state)?.list(&query).await?))
}

#[api_handler(
    get,
    path = "/api/articles/{id}",
    params(("id" = String, Path, description = "Article id"), ContentQuery),
    responses(
        (status = OK, description = "The article", body = ContentResponse<Article>),
        (status = NOT_FOUND, description = "No such article", body = ErrorEnvelope),
    ),
    tag = ARTICLE_TAG,
)]
pub(crate) async fn find_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ContentResponse<Article>>, ApiError> {
    Ok(Json(articles(&state)?.find_one(&id, &query).await?))
}

#[api_handler(
    post,
    path = "/api/articles",
    request_body = ContentPayload<Article>,
    responses(
        (status = OK, description = "Created article", body = ContentResponse<Article>),
        (status = BAD_REQUEST, description = "Invalid attributes", body = ErrorEnvelope),
    ),
    tag = ARTICLE_TAG,
)]
pub(crate) async fn create(
    State(state): State<ApiState>,
    Json(body): Payload,
) -> Result<Json<ContentResponse<Article>>, ApiError> {
    Ok(Json(articles(&state)?.create(body.data).await?))
}

#[api_handler(
    put,
    path = "/api/articles/{id}",
    params(("id" = String, Path, description = "Article id")),
    request_body = ContentPayload<Article>,
    responses(
        (status = OK, description = "Updated article", body = ContentResponse<Article>),
        (status = BAD_REQUEST, description = "Invalid attributes", body = ErrorEnvelope),
        (status = NOT_FOUND, description = "No such article", body = ErrorEnvelope),
    ),
    tag = ARTICLE_TAG,
)]
pub(crate) async fn update(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Payload,
) -> Result<Json<ContentResponse<Article>>, ApiError> {
    Ok(Json(articles(&state)?.update(&id, body.data).await?))
}

#[api_handler(
    delete,
    path = "/api/articles/{id}",
    params(("id" = String, Path, description = "Article id")),
    responses(
        (status = OK, description = "Deleted article", body = ContentResponse<Article>),
        (status = NOT_FOUND, description = "No such article", body = ErrorEnvelope),
    ),
    tag = ARTICLE_TAG,
)]
pub(crate) async fn delete(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ContentResponse<Article>>, ApiError> {
    Ok(Json(articles(&state)?.delete(&id).await?))
}
