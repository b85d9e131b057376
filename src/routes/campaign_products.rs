use axum::{
    extract::{Path, State},
    Json,
};
use diesel::PgConnection;

use crate::auth::AuthenticatedUser;
use crate::domain::CampaignId;
use crate::dto::CampaignProductDto;
use crate::error::{AppError, AppResult, MessageResponse};
use crate::extract::ApiJson;
use crate::params::{parse_path_id, ProductsForm, UpdateProductsForm};
use crate::repository::TransactionService;
use crate::state::AppState;

fn product_campaign_id(raw: &str) -> AppResult<CampaignId> {
    parse_path_id(raw)
        .map(CampaignId)
        .map_err(|_| AppError::bad_request("please provide correct campaign_id"))
}

/// The audit actor is the `created_by` carried in the body.
pub async fn add_products(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiJson(form): ApiJson<ProductsForm>,
) -> AppResult<Json<Vec<CampaignProductDto>>> {
    form.validate()?;
    let products = form.to_products();

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    let created = state.tx.run_with_transaction(conn, |conn| {
        state.campaign_products.add_products(conn, &products)
    })?;

    Ok(Json(created))
}

pub async fn update_products(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(raw_id): Path<String>,
    ApiJson(form): ApiJson<UpdateProductsForm>,
) -> AppResult<Json<Vec<CampaignProductDto>>> {
    let campaign_id = product_campaign_id(&raw_id)?;
    form.validate()?;
    let products = form.to_products(campaign_id, user.user_id);

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    if !state.campaigns.exists(conn, campaign_id, "")? {
        return Err(AppError::bad_request(format!(
            "campaign with id {campaign_id} not exists"
        )));
    }
    let updated = state.tx.run_with_transaction(conn, |conn| {
        state.campaign_products.update_products(conn, &products)
    })?;

    Ok(Json(updated))
}

pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((raw_campaign_id, raw_product_id)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let campaign_id = product_campaign_id(&raw_campaign_id)?;
    let product_id = parse_path_id(&raw_product_id)
        .map_err(|_| AppError::bad_request("please provide correct id"))?;

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    let deleted = state.tx.run_with_transaction(conn, |conn| {
        state
            .campaign_products
            .delete_product(conn, campaign_id, product_id, user.user_id)
    });
    match deleted {
        Ok(count) if count > 0 => Ok(MessageResponse::ok(format!(
            "product with id {product_id} deleted successfully"
        ))),
        Ok(_) => Err(AppError::bad_request("product not deleted")),
        Err(err) => {
            tracing::warn!(campaign_id = campaign_id.0, product_id, error = %err, "product delete failed");
            Err(AppError::bad_request("product not deleted"))
        }
    }
}

pub async fn delete_products(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let campaign_id = product_campaign_id(&raw_id)?;

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    state
        .tx
        .run_with_transaction(conn, |conn| {
            state
                .campaign_products
                .delete_all(conn, campaign_id, user.user_id)
        })
        .map_err(|err| {
            tracing::warn!(campaign_id = campaign_id.0, error = %err, "products delete failed");
            AppError::bad_request("products not deleted")
        })?;

    Ok(MessageResponse::ok(format!(
        "all products for campaign id {campaign_id} deleted successfully"
    )))
}
