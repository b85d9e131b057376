use axum::{
    extract::{Path, State},
    Json,
};
use diesel::PgConnection;

use crate::auth::AuthenticatedUser;
use crate::domain::{CampaignId, CampaignStoreId};
use crate::dto::CampaignStoresDto;
use crate::error::{AppError, AppResult, MessageResponse};
use crate::extract::ApiJson;
use crate::params::{parse_path_id, StoresForm};
use crate::repository::TransactionService;
use crate::routes::campaign_id_param;
use crate::state::AppState;

fn ensure_campaign(state: &AppState, conn: &mut PgConnection, id: CampaignId) -> AppResult<()> {
    if state.campaigns.exists(conn, id, "")? {
        Ok(())
    } else {
        Err(AppError::bad_request(format!("campaign with id {id} not exists")))
    }
}

pub async fn add_stores(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(raw_id): Path<String>,
    ApiJson(form): ApiJson<StoresForm>,
) -> AppResult<Json<CampaignStoresDto>> {
    let campaign_id = campaign_id_param(&raw_id)?;
    if form.stores.is_empty() {
        return Err(AppError::bad_request("stores is required"));
    }

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    ensure_campaign(&state, conn, campaign_id)?;

    let stores = state.tx.run_with_transaction(conn, |conn| {
        state
            .campaign_stores
            .attach_stores(conn, campaign_id, &form.stores, user.user_id)
    })?;

    Ok(Json(CampaignStoresDto::new(campaign_id, &stores)))
}

pub async fn delete_stores(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let campaign_id = campaign_id_param(&raw_id)?;

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    ensure_campaign(&state, conn, campaign_id)?;

    state.tx.run_with_transaction(conn, |conn| {
        state
            .campaign_stores
            .delete_all(conn, campaign_id, user.user_id)
    })?;

    Ok(MessageResponse::ok(format!(
        "all campaign stores with campaign id {campaign_id} deleted successfully"
    )))
}

pub async fn delete_store(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((raw_campaign_id, raw_store_id)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let campaign_id = campaign_id_param(&raw_campaign_id)?;
    let store_id = parse_path_id(&raw_store_id).map(CampaignStoreId).map_err(|err| {
        AppError::bad_request(format!("incorrect store id value, err : {err}"))
    })?;

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    ensure_campaign(&state, conn, campaign_id)?;

    let deleted = state.tx.run_with_transaction(conn, |conn| {
        state
            .campaign_stores
            .delete_store(conn, campaign_id, store_id, user.user_id)
    })?;
    if deleted == 0 {
        return Err(AppError::bad_request(format!(
            "store with id {store_id} not exists"
        )));
    }

    Ok(MessageResponse::ok(format!(
        "store with id {store_id} deleted successfully"
    )))
}
