use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use diesel::PgConnection;

use crate::auth::AuthenticatedUser;
use crate::dates::CampaignDates;
use crate::domain::{CampaignDetails, CampaignId};
use crate::dto::{CampaignDto, CampaignListDto, DataResponse};
use crate::error::{AppError, AppResult, ErrorKind, MessageResponse};
use crate::extract::{ApiJson, ApiQuery};
use crate::params::{CampaignForm, FormKind, GetCampaignQuery, ListCampaignsQuery};
use crate::repository::TransactionService;
use crate::routes::campaign_id_param;
use crate::state::AppState;

pub async fn list_campaigns(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListCampaignsQuery>,
) -> AppResult<Json<DataResponse<CampaignListDto>>> {
    let pagination = query.to_pagination(&state.config)?;

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    let list = state.campaigns.list(conn, &pagination)?;

    Ok(DataResponse::success(list))
}

pub async fn get_campaign(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiQuery(query): ApiQuery<GetCampaignQuery>,
) -> AppResult<Json<DataResponse<CampaignDto>>> {
    let campaign_id = campaign_id_param(&raw_id)?;
    let (omit_products, omit_stores) = query.flags()?;

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    let campaign = state.campaigns.get(conn, campaign_id)?;
    let stores = if omit_stores {
        Vec::new()
    } else {
        state.campaign_stores.get_stores(conn, campaign_id)?
    };
    let products = if omit_products {
        Vec::new()
    } else {
        state.campaign_products.get_products(conn, campaign_id)?
    };

    let details = CampaignDetails {
        campaign,
        stores,
        products,
    };
    Ok(DataResponse::success(CampaignDto::from(&details)))
}

pub async fn create_campaign(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(form): ApiJson<CampaignForm>,
) -> AppResult<Json<CampaignDto>> {
    let valid = form.validate(FormKind::Create, state.config.max_date_difference_days)?;

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    if state
        .campaigns
        .exists(conn, CampaignId::default(), form.title.trim())?
    {
        return Err(AppError::conflict("campaign with given name already exists"));
    }

    let campaign = form.to_campaign(CampaignId::default(), valid, user.user_id);
    let details = state.tx.run_with_transaction(conn, |conn| {
        let created = state.campaigns.create(conn, &campaign)?;
        let stores =
            state
                .campaign_stores
                .attach_stores(conn, created.id, &form.stores, user.user_id)?;
        Ok(CampaignDetails {
            campaign: created,
            stores,
            products: Vec::new(),
        })
    })?;

    Ok(Json(CampaignDto::from(&details)))
}

pub async fn update_campaign(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(raw_id): Path<String>,
    ApiJson(form): ApiJson<CampaignForm>,
) -> AppResult<Json<MessageResponse>> {
    let campaign_id = campaign_id_param(&raw_id)?;

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    let stored = match state.campaigns.get(conn, campaign_id) {
        Ok(stored) => stored,
        Err(err) if err.is(ErrorKind::CampaignNotFound) => {
            return Err(AppError::bad_request("campaign with given id not exists"));
        }
        Err(err) => return Err(err.into()),
    };
    // Empty dates keep the stored ones, so the rules run on the merged window.
    let valid = form.validate(
        FormKind::Update(CampaignDates::from(&stored)),
        state.config.max_date_difference_days,
    )?;

    let campaign = form.to_campaign(campaign_id, valid, user.user_id);
    let sync = state.tx.run_with_transaction(conn, |conn| {
        state.campaigns.update(conn, &campaign)?;
        state
            .campaign_stores
            .sync_stores(conn, campaign_id, &form.stores, user.user_id)
    })?;
    tracing::info!(
        campaign_id = campaign_id.0,
        stores_added = sync.added.len(),
        stores_removed = sync.removed.len(),
        "campaign updated"
    );

    Ok(MessageResponse::ok(format!(
        "campaign with id {campaign_id} updated successfully"
    )))
}

/// Advances campaign statuses for the current UTC day. Meant to be hit by an
/// external scheduler.
pub async fn update_campaign_status(
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let today = Utc::now().date_naive();

    let mut pooled = state.db()?;
    let conn: &mut PgConnection = &mut pooled;
    state
        .tx
        .run_with_transaction(conn, |conn| state.campaigns.update_status(conn, today))?;

    Ok(MessageResponse::ok("campaigns status updated successfully"))
}
