use axum::{
    Router,
    body::Body,
    http::{
        HeaderName, Method, Request, StatusCode,
        header::{
            ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, AUTHORIZATION, CACHE_CONTROL, CONNECTION,
            CONTENT_TYPE, DNT, HOST, LINK, ORIGIN, PRAGMA, REFERER, USER_AGENT,
        },
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::time::Duration;

use crate::{auth::oauth, handlers::rest, state::AppState};

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Builds the full application: note and token routes, docs, and the
/// middleware stack around them.
pub fn build_router(state: AppState) -> Router {
    let notes_router = Router::new()
        .route("/add-note", post(rest::add_note))
        .route("/get-notes", get(rest::get_notes));

    let token_router = Router::new()
        .route("/token", post(oauth::issue_user_token))
        .route("/auth", post(oauth::issue_client_token));

    // Layers run outermost-last: CORS, request id, tracing, panic recovery.
    Router::new()
        .route("/", get(root))
        .merge(notes_router)
        .merge(token_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(state)
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([
            USER_AGENT,
            CONTENT_TYPE,
            ACCEPT,
            ACCEPT_ENCODING,
            ACCEPT_LANGUAGE,
            AUTHORIZATION,
            CACHE_CONTROL,
            CONNECTION,
            DNT,
            HOST,
            ORIGIN,
            PRAGMA,
            REFERER,
        ])
        .expose_headers([LINK])
        .max_age(Duration::from_secs(300))
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}
