use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::constants::routes;
use crate::state::SharedState;

pub mod auth;
mod book;
pub mod cors;
mod error;
mod file;
mod math;
pub mod negotiate;
mod observability;
mod person;
mod types;
mod validation;

pub use cors::OriginPatterns;
pub use error::ApiError;
pub use negotiate::MediaType;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub origins: Arc<OriginPatterns>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let origins = Arc::new(OriginPatterns::parse(
        &shared.config.server.cors_origin_patterns,
    ));

    Arc::new(AppState {
        shared,
        origins,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let protected_routes = create_protected_router(state.clone());

    let auth_routes = Router::new()
        .route("/signin", post(auth::signin))
        .route("/refresh/{username}", put(auth::refresh_token));

    Router::new()
        .merge(protected_routes)
        .nest(routes::AUTH, auth_routes)
        .fallback(auth::fallback)
        .with_state(state.clone())
        .layer(state.origins.layer())
        .layer(middleware::from_fn_with_state(
            state.origins.clone(),
            cors::origin_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let person_routes = Router::new()
        .route(
            "/",
            get(person::find_all).post(person::create).put(person::update),
        )
        .route(
            "/{id}",
            get(person::find_by_id)
                .patch(person::disable)
                .delete(person::delete),
        )
        .route(
            &format!("/{}/{{first_name}}", routes::FIND_PERSON_BY_NAME),
            get(person::find_by_name),
        );

    let book_routes = Router::new()
        .route(
            "/",
            get(book::find_all).post(book::create).put(book::update),
        )
        .route("/{id}", get(book::find_by_id).delete(book::delete));

    let file_routes = Router::new()
        .route("/uploadFile", post(file::upload_file))
        .route("/uploadMultipleFiles", post(file::upload_multiple_files))
        .route(
            &format!("/{}/{{filename}}", routes::DOWNLOAD_FILE),
            get(file::download_file),
        );

    Router::new()
        .nest(routes::PERSON, person_routes)
        .nest(routes::BOOK, book_routes)
        .nest(routes::FILE, file_routes)
        .route("/sum/{a}/{b}", get(math::sum))
        .route("/subtraction/{a}/{b}", get(math::subtraction))
        .route("/multiplication/{a}/{b}", get(math::multiplication))
        .route("/division/{a}/{b}", get(math::division))
        .route("/average/{a}/{b}", get(math::average))
        .route("/sqrt/{a}", get(math::sqrt))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
