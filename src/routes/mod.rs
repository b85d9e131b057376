use axum::http::HeaderValue;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::CampaignId;
use crate::error::{AppError, AppResult};
use crate::params::parse_path_id;
use crate::state::AppState;

pub mod campaign_products;
pub mod campaign_stores;
pub mod campaigns;
pub mod health;

/// Writes require a bearer token through the `AuthenticatedUser` extractor;
/// reads and the status job are open.
pub fn create_router(state: AppState) -> Router<()> {
    let allow_origin = match state.config.cors_allowed_origin.as_ref() {
        Some(origins) => {
            let headers: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .filter_map(|value| match value.parse::<HeaderValue>() {
                    Ok(header) => Some(header),
                    Err(err) => {
                        tracing::warn!(origin = value, error = %err, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(headers)
        }
        None => AllowOrigin::mirror_request(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let campaign_routes = Router::new()
        .route(
            "/",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
        .route("/update-status", put(campaigns::update_campaign_status))
        .route("/products", post(campaign_products::add_products))
        .route(
            "/:campaign_id",
            get(campaigns::get_campaign).put(campaigns::update_campaign),
        )
        .route(
            "/:campaign_id/stores",
            post(campaign_stores::add_stores).delete(campaign_stores::delete_stores),
        )
        .route(
            "/:campaign_id/stores/:id",
            delete(campaign_stores::delete_store),
        )
        .route(
            "/:campaign_id/products",
            put(campaign_products::update_products).delete(campaign_products::delete_products),
        )
        .route(
            "/:campaign_id/products/:id",
            delete(campaign_products::delete_product),
        );

    Router::new()
        .nest("/campaigns", campaign_routes)
        .route("/health", get(health::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub(crate) fn campaign_id_param(raw: &str) -> AppResult<CampaignId> {
    parse_path_id(raw)
        .map(CampaignId)
        .map_err(|err| AppError::bad_request(format!("incorrect campaign id value, err : {err}")))
}
