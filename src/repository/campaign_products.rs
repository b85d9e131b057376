use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::{CampaignId, CampaignProduct, UserId};
use crate::error::{DomainError, DomainResult, ErrorKind};
use crate::models::{CampaignProductRow, NewCampaignProductRow};
use crate::repository::CampaignProductRepository;
use crate::schema::campaign_products;

#[derive(Debug, Clone, Copy, Default)]
pub struct PgCampaignProductRepository;

#[derive(AsChangeset)]
#[diesel(table_name = campaign_products)]
struct ProductChangeset<'a> {
    product_id: i64,
    sku_no: i64,
    serial_no: i32,
    sequence_no: i32,
    product_type: &'a str,
    updated_at: NaiveDateTime,
    updated_by: i64,
}

impl CampaignProductRepository<PgConnection> for PgCampaignProductRepository {
    fn create_multiple(
        &self,
        conn: &mut PgConnection,
        products: &[CampaignProduct],
    ) -> DomainResult<Vec<CampaignProduct>> {
        if products.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<NewCampaignProductRow> =
            products.iter().map(NewCampaignProductRow::from).collect();
        let created = diesel::insert_into(campaign_products::table)
            .values(&rows)
            .get_results::<CampaignProductRow>(conn)
            .map_err(|err| DomainError::wrap(ErrorKind::ProductCantCreate, err))?;

        Ok(created.into_iter().map(CampaignProduct::from).collect())
    }

    fn get_by_campaign_id(
        &self,
        conn: &mut PgConnection,
        campaign_id: CampaignId,
    ) -> DomainResult<Vec<CampaignProduct>> {
        let rows = campaign_products::table
            .filter(campaign_products::campaign_id.eq(campaign_id.0))
            .filter(campaign_products::deleted_at.is_null())
            .order((
                campaign_products::sequence_no.asc(),
                campaign_products::campaign_product_id.asc(),
            ))
            .load::<CampaignProductRow>(conn)
            .map_err(|err| DomainError::wrap(ErrorKind::CampaignCantGet, err))?;

        Ok(rows.into_iter().map(CampaignProduct::from).collect())
    }

    fn update(
        &self,
        conn: &mut PgConnection,
        product: &CampaignProduct,
    ) -> DomainResult<CampaignProduct> {
        let changes = ProductChangeset {
            product_id: product.product_id,
            sku_no: product.sku_no,
            serial_no: product.serial_no,
            sequence_no: product.sequence_no,
            product_type: &product.product_type,
            updated_at: Utc::now().naive_utc(),
            updated_by: product.audit.updated_by.0,
        };
        let row = diesel::update(
            campaign_products::table
                .filter(campaign_products::campaign_product_id.eq(product.id.0))
                .filter(campaign_products::campaign_id.eq(product.campaign_id.0))
                .filter(campaign_products::deleted_at.is_null()),
        )
        .set(changes)
        .get_result::<CampaignProductRow>(conn)
        .optional()
        .map_err(|err| DomainError::wrap(ErrorKind::ProductCantUpdate, err))?;

        row.map(CampaignProduct::from).ok_or_else(|| {
            DomainError::with_message(
                ErrorKind::ProductNotExists,
                format!("campaign product with id {} not exists", product.id),
            )
        })
    }

    fn delete(
        &self,
        conn: &mut PgConnection,
        campaign_id: CampaignId,
        product_id: i64,
        user: UserId,
    ) -> DomainResult<usize> {
        diesel::update(
            campaign_products::table
                .filter(campaign_products::campaign_id.eq(campaign_id.0))
                .filter(campaign_products::product_id.eq(product_id))
                .filter(campaign_products::deleted_at.is_null()),
        )
        .set((
            campaign_products::deleted_at.eq(diesel::dsl::now),
            campaign_products::deleted_by.eq(user.0),
        ))
        .execute(conn)
        .map_err(|err| DomainError::wrap(ErrorKind::ProductCantDelete, err))
    }

    fn delete_by_campaign_id(
        &self,
        conn: &mut PgConnection,
        campaign_id: CampaignId,
        user: UserId,
    ) -> DomainResult<usize> {
        let deleted = diesel::update(
            campaign_products::table
                .filter(campaign_products::campaign_id.eq(campaign_id.0))
                .filter(campaign_products::deleted_at.is_null()),
        )
        .set((
            campaign_products::deleted_at.eq(diesel::dsl::now),
            campaign_products::deleted_by.eq(user.0),
        ))
        .execute(conn)
        .map_err(|err| DomainError::wrap(ErrorKind::ProductCantDelete, err))?;

        tracing::info!(campaign_id = campaign_id.0, deleted, "removed campaign products");
        Ok(deleted)
    }
}
