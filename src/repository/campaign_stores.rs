use diesel::prelude::*;

use crate::domain::{CampaignId, CampaignStore, CampaignStoreId, UserId};
use crate::error::{DomainError, DomainResult, ErrorKind};
use crate::models::{CampaignStoreRow, NewCampaignStoreRow};
use crate::repository::CampaignStoreRepository;
use crate::schema::campaign_stores;

#[derive(Debug, Clone, Copy, Default)]
pub struct PgCampaignStoreRepository;

impl CampaignStoreRepository<PgConnection> for PgCampaignStoreRepository {
    fn create_multiple(
        &self,
        conn: &mut PgConnection,
        stores: &[CampaignStore],
    ) -> DomainResult<Vec<CampaignStore>> {
        if stores.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<NewCampaignStoreRow> = stores.iter().map(NewCampaignStoreRow::from).collect();
        let created = diesel::insert_into(campaign_stores::table)
            .values(&rows)
            .get_results::<CampaignStoreRow>(conn)
            .map_err(|err| DomainError::wrap(ErrorKind::StoreCantCreate, err))?;

        Ok(created.into_iter().map(CampaignStore::from).collect())
    }

    fn get_by_campaign_id(
        &self,
        conn: &mut PgConnection,
        campaign_id: CampaignId,
    ) -> DomainResult<Vec<CampaignStore>> {
        let rows = campaign_stores::table
            .filter(campaign_stores::campaign_id.eq(campaign_id.0))
            .filter(campaign_stores::deleted_at.is_null())
            .order(campaign_stores::campaign_store_id.asc())
            .load::<CampaignStoreRow>(conn)
            .map_err(|err| DomainError::wrap(ErrorKind::StoreCantGet, err))?;

        Ok(rows.into_iter().map(CampaignStore::from).collect())
    }

    fn get_by_store_id(
        &self,
        conn: &mut PgConnection,
        campaign_id: CampaignId,
        store_id: i64,
    ) -> DomainResult<CampaignStore> {
        campaign_stores::table
            .filter(campaign_stores::campaign_id.eq(campaign_id.0))
            .filter(campaign_stores::store_id.eq(store_id))
            .filter(campaign_stores::deleted_at.is_null())
            .first::<CampaignStoreRow>(conn)
            .optional()
            .map_err(|err| DomainError::wrap(ErrorKind::StoreCantGet, err))?
            .map(CampaignStore::from)
            .ok_or_else(|| DomainError::new(ErrorKind::StoreNotExists))
    }

    fn delete(
        &self,
        conn: &mut PgConnection,
        campaign_id: CampaignId,
        id: CampaignStoreId,
        user: UserId,
    ) -> DomainResult<usize> {
        diesel::update(
            campaign_stores::table
                .filter(campaign_stores::campaign_store_id.eq(id.0))
                .filter(campaign_stores::campaign_id.eq(campaign_id.0))
                .filter(campaign_stores::deleted_at.is_null()),
        )
        .set((
            campaign_stores::deleted_at.eq(diesel::dsl::now),
            campaign_stores::deleted_by.eq(user.0),
        ))
        .execute(conn)
        .map_err(|err| DomainError::wrap(ErrorKind::StoreCantDelete, err))
    }

    fn delete_by_store_id(
        &self,
        conn: &mut PgConnection,
        campaign_id: CampaignId,
        store_id: i64,
        user: UserId,
    ) -> DomainResult<usize> {
        diesel::update(
            campaign_stores::table
                .filter(campaign_stores::store_id.eq(store_id))
                .filter(campaign_stores::campaign_id.eq(campaign_id.0))
                .filter(campaign_stores::deleted_at.is_null()),
        )
        .set((
            campaign_stores::deleted_at.eq(diesel::dsl::now),
            campaign_stores::deleted_by.eq(user.0),
        ))
        .execute(conn)
        .map_err(|err| DomainError::wrap(ErrorKind::StoreCantDelete, err))
    }

    fn delete_by_campaign_id(
        &self,
        conn: &mut PgConnection,
        campaign_id: CampaignId,
        user: UserId,
    ) -> DomainResult<usize> {
        let deleted = diesel::update(
            campaign_stores::table
                .filter(campaign_stores::campaign_id.eq(campaign_id.0))
                .filter(campaign_stores::deleted_at.is_null()),
        )
        .set((
            campaign_stores::deleted_at.eq(diesel::dsl::now),
            campaign_stores::deleted_by.eq(user.0),
        ))
        .execute(conn)
        .map_err(|err| DomainError::wrap(ErrorKind::StoreCantDelete, err))?;

        tracing::info!(campaign_id = campaign_id.0, deleted, "removed campaign stores");
        Ok(deleted)
    }
}
