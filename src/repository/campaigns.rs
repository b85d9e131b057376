use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::{
    Campaign, CampaignId, CampaignStatus, PaginationConfig, SortColumn, SortOrder,
    StatusTransition,
};
use crate::error::{DomainError, DomainResult, ErrorKind};
use crate::models::{non_zero, CampaignRow, NewCampaignRow};
use crate::repository::CampaignRepository;
use crate::schema::campaigns;

#[derive(Debug, Clone, Copy, Default)]
pub struct PgCampaignRepository;

#[derive(AsChangeset)]
#[diesel(table_name = campaigns)]
struct CampaignChangeset<'a> {
    title: Option<&'a str>,
    order_start_date: Option<NaiveDateTime>,
    order_end_date: Option<NaiveDateTime>,
    collection_start_date: Option<NaiveDateTime>,
    collection_end_date: Option<NaiveDateTime>,
    status_code: i64,
    campaign_type: &'a str,
    listing_title: &'a str,
    listing_description: &'a str,
    listing_image_path: &'a str,
    onboard_title: &'a str,
    onboard_description: &'a str,
    onboard_image_path: &'a str,
    landing_image_path: &'a str,
    lead_time: Option<Option<i32>>,
    offer_id: Option<Option<i64>>,
    tag_id: Option<Option<i64>>,
    is_campaign_published: bool,
    updated_at: NaiveDateTime,
    updated_by: i64,
}

impl<'a> CampaignChangeset<'a> {
    fn new(campaign: &'a Campaign) -> Self {
        Self {
            title: (!campaign.title.is_empty()).then_some(campaign.title.as_str()),
            order_start_date: campaign.order_start_date,
            order_end_date: campaign.order_end_date,
            collection_start_date: campaign.collection_start_date,
            collection_end_date: campaign.collection_end_date,
            status_code: campaign.status.code(),
            campaign_type: &campaign.campaign_type,
            listing_title: &campaign.listing_title,
            listing_description: &campaign.listing_description,
            listing_image_path: &campaign.listing_image_path,
            onboard_title: &campaign.onboard_title,
            onboard_description: &campaign.onboard_description,
            onboard_image_path: &campaign.onboard_image_path,
            landing_image_path: &campaign.landing_image_path,
            lead_time: Some(non_zero(campaign.lead_time)),
            offer_id: Some(non_zero(campaign.offer_id)),
            tag_id: Some(non_zero(campaign.tag_id)),
            is_campaign_published: campaign.is_published,
            updated_at: Utc::now().naive_utc(),
            updated_by: campaign.audit.updated_by.0,
        }
    }
}

fn title_taken(title: &str) -> DomainError {
    DomainError::with_message(
        ErrorKind::TitleTaken,
        format!("campaign with title '{title}' already exists. please provide another title"),
    )
}

fn campaign_not_found(id: CampaignId) -> DomainError {
    DomainError::with_message(
        ErrorKind::CampaignNotFound,
        format!("campaign with id {id} not exists"),
    )
}

fn filtered(pagination: &PaginationConfig) -> campaigns::BoxedQuery<'static, Pg> {
    let mut query = campaigns::table
        .filter(campaigns::deleted_at.is_null())
        .into_boxed();
    if !pagination.name.is_empty() {
        query = query.filter(campaigns::title.like(format!("{}%", pagination.name)));
    }
    if let Some(status) = pagination.status {
        query = query.filter(campaigns::status_code.eq(status.code()));
    }
    query
}

fn ordered(
    query: campaigns::BoxedQuery<'static, Pg>,
    sort: SortOrder,
) -> campaigns::BoxedQuery<'static, Pg> {
    use crate::schema::campaigns::dsl::*;

    let query = match (sort.column, sort.descending) {
        (SortColumn::CampaignId, false) => query.order(campaign_id.asc()),
        (SortColumn::CampaignId, true) => query.order(campaign_id.desc()),
        (SortColumn::Title, false) => query.order(title.asc()),
        (SortColumn::Title, true) => query.order(title.desc()),
        (SortColumn::StatusCode, false) => query.order(status_code.asc()),
        (SortColumn::StatusCode, true) => query.order(status_code.desc()),
        (SortColumn::OrderStartDate, false) => query.order(order_start_date.asc()),
        (SortColumn::OrderStartDate, true) => query.order(order_start_date.desc()),
        (SortColumn::OrderEndDate, false) => query.order(order_end_date.asc()),
        (SortColumn::OrderEndDate, true) => query.order(order_end_date.desc()),
        (SortColumn::CollectionStartDate, false) => query.order(collection_start_date.asc()),
        (SortColumn::CollectionStartDate, true) => query.order(collection_start_date.desc()),
        (SortColumn::CollectionEndDate, false) => query.order(collection_end_date.asc()),
        (SortColumn::CollectionEndDate, true) => query.order(collection_end_date.desc()),
        (SortColumn::CreatedAt, false) => query.order(created_at.asc()),
        (SortColumn::CreatedAt, true) => query.order(created_at.desc()),
        (SortColumn::UpdatedAt, false) => query.order(updated_at.asc()),
        (SortColumn::UpdatedAt, true) => query.order(updated_at.desc()),
    };
    query.then_order_by(campaign_id.asc())
}

impl CampaignRepository<PgConnection> for PgCampaignRepository {
    fn get(&self, conn: &mut PgConnection, id: CampaignId) -> DomainResult<Campaign> {
        let row = campaigns::table
            .filter(campaigns::campaign_id.eq(id.0))
            .filter(campaigns::deleted_at.is_null())
            .first::<CampaignRow>(conn)
            .optional()
            .map_err(|err| DomainError::wrap(ErrorKind::CampaignCantGet, err))?;

        row.ok_or_else(|| campaign_not_found(id))?.into_campaign()
    }

    fn list(
        &self,
        conn: &mut PgConnection,
        pagination: &PaginationConfig,
    ) -> DomainResult<(Vec<Campaign>, i64)> {
        let count: i64 = filtered(pagination)
            .count()
            .get_result(conn)
            .map_err(|err| DomainError::wrap(ErrorKind::CampaignCantGetList, err))?;

        let rows = ordered(filtered(pagination), pagination.sort)
            .limit(pagination.limit)
            .offset(pagination.offset())
            .load::<CampaignRow>(conn)
            .map_err(|err| DomainError::wrap(ErrorKind::CampaignCantGetList, err))?;

        let campaigns = rows
            .into_iter()
            .map(CampaignRow::into_campaign)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((campaigns, count))
    }

    fn create(&self, conn: &mut PgConnection, campaign: &Campaign) -> DomainResult<Campaign> {
        let row = diesel::insert_into(campaigns::table)
            .values(NewCampaignRow::from(campaign))
            .get_result::<CampaignRow>(conn)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    title_taken(&campaign.title)
                }
                other => DomainError::wrap(ErrorKind::CampaignCantCreate, other),
            })?;

        tracing::info!(campaign_id = row.campaign_id, "campaign created");
        row.into_campaign()
    }

    fn exists(&self, conn: &mut PgConnection, id: CampaignId, title: &str) -> DomainResult<bool> {
        let query = campaigns::table
            .filter(campaigns::deleted_at.is_null())
            .select(campaigns::campaign_id)
            .into_boxed();
        let query = if id.is_unset() {
            query.filter(campaigns::title.eq(title.to_string()))
        } else {
            query.filter(campaigns::campaign_id.eq(id.0))
        };

        let found = query
            .first::<i64>(conn)
            .optional()
            .map_err(|err| DomainError::wrap(ErrorKind::CampaignCantExist, err))?;
        Ok(found.is_some())
    }

    fn update(&self, conn: &mut PgConnection, campaign: &Campaign) -> DomainResult<Campaign> {
        if !campaign.title.is_empty() {
            let duplicate = campaigns::table
                .filter(campaigns::campaign_id.ne(campaign.id.0))
                .filter(campaigns::title.eq(campaign.title.as_str()))
                .filter(campaigns::deleted_at.is_null())
                .select(campaigns::campaign_id)
                .first::<i64>(conn)
                .optional()
                .map_err(|err| DomainError::wrap(ErrorKind::CampaignCantUpdate, err))?;
            if duplicate.is_some() {
                return Err(title_taken(&campaign.title));
            }
        }

        let target = campaigns::table
            .filter(campaigns::campaign_id.eq(campaign.id.0))
            .filter(campaigns::deleted_at.is_null());
        let row = diesel::update(target)
            .set(CampaignChangeset::new(campaign))
            .get_result::<CampaignRow>(conn)
            .optional()
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    title_taken(&campaign.title)
                }
                other => DomainError::wrap(ErrorKind::CampaignCantUpdate, other),
            })?;

        row.ok_or_else(|| campaign_not_found(campaign.id))?
            .into_campaign()
    }

    fn update_status(
        &self,
        conn: &mut PgConnection,
        today: NaiveDate,
    ) -> DomainResult<StatusTransition> {
        let today_start = today.and_hms_opt(0, 0, 0).ok_or_else(|| {
            DomainError::with_message(ErrorKind::CampaignStatusCantUpdate, "invalid day")
        })?;
        let tomorrow_start = today_start + Duration::days(1);

        // order_start_date::date <= today
        let activated = diesel::update(
            campaigns::table
                .filter(campaigns::deleted_at.is_null())
                .filter(campaigns::status_code.eq(CampaignStatus::Scheduled.code()))
                .filter(campaigns::order_start_date.lt(tomorrow_start)),
        )
        .set((
            campaigns::status_code.eq(CampaignStatus::Active.code()),
            campaigns::updated_at.eq(diesel::dsl::now),
        ))
        .execute(conn)
        .map_err(|err| DomainError::wrap(ErrorKind::CampaignStatusCantUpdate, err))?;
        if activated == 0 {
            tracing::info!("no campaign to publish");
        } else {
            tracing::info!(count = activated, "published {activated} campaigns");
        }

        // order_end_date::date < today
        let deactivated = diesel::update(
            campaigns::table
                .filter(campaigns::deleted_at.is_null())
                .filter(campaigns::status_code.eq(CampaignStatus::Active.code()))
                .filter(campaigns::order_end_date.lt(today_start)),
        )
        .set((
            campaigns::status_code.eq(CampaignStatus::InActive.code()),
            campaigns::updated_at.eq(diesel::dsl::now),
        ))
        .execute(conn)
        .map_err(|err| DomainError::wrap(ErrorKind::CampaignStatusCantUpdate, err))?;
        if deactivated == 0 {
            tracing::info!("no campaign to deactivate");
        } else {
            tracing::info!(count = deactivated, "deactivated {deactivated} campaigns");
        }

        Ok(StatusTransition {
            activated,
            deactivated,
        })
    }
}
