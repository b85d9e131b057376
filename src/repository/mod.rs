//! Persistence seams. Every method takes the connection (or open
//! transaction) explicitly, so callers decide what runs atomically.

use chrono::NaiveDate;

use crate::domain::{
    Campaign, CampaignId, CampaignProduct, CampaignStore, CampaignStoreId, PaginationConfig,
    StatusTransition, UserId,
};
use crate::error::{DomainError, DomainResult};

pub mod campaign_products;
pub mod campaign_stores;
pub mod campaigns;
pub mod transaction;

#[cfg(test)]
pub(crate) mod fakes;

pub use campaign_products::PgCampaignProductRepository;
pub use campaign_stores::PgCampaignStoreRepository;
pub use campaigns::PgCampaignRepository;
pub use transaction::PgTransactionService;

pub trait CampaignRepository<C> {
    fn get(&self, conn: &mut C, id: CampaignId) -> DomainResult<Campaign>;

    /// Returns one page of campaigns and the number of rows matching the filters.
    fn list(
        &self,
        conn: &mut C,
        pagination: &PaginationConfig,
    ) -> DomainResult<(Vec<Campaign>, i64)>;

    fn create(&self, conn: &mut C, campaign: &Campaign) -> DomainResult<Campaign>;

    /// Looks up by id when it is set, otherwise by title.
    fn exists(&self, conn: &mut C, id: CampaignId, title: &str) -> DomainResult<bool>;

    /// Overwrites the mutable fields. An empty title or unset date keeps the
    /// stored value.
    fn update(&self, conn: &mut C, campaign: &Campaign) -> DomainResult<Campaign>;

    /// Activates scheduled campaigns whose order window has opened, then
    /// deactivates active campaigns whose order window closed before `today`.
    fn update_status(&self, conn: &mut C, today: NaiveDate) -> DomainResult<StatusTransition>;
}

pub trait CampaignStoreRepository<C> {
    fn create_multiple(
        &self,
        conn: &mut C,
        stores: &[CampaignStore],
    ) -> DomainResult<Vec<CampaignStore>>;

    fn get_by_campaign_id(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
    ) -> DomainResult<Vec<CampaignStore>>;

    /// Fails with `ErrorKind::StoreNotExists` when the store is not attached.
    fn get_by_store_id(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        store_id: i64,
    ) -> DomainResult<CampaignStore>;

    fn delete(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        id: CampaignStoreId,
        user: UserId,
    ) -> DomainResult<usize>;

    fn delete_by_store_id(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        store_id: i64,
        user: UserId,
    ) -> DomainResult<usize>;

    fn delete_by_campaign_id(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        user: UserId,
    ) -> DomainResult<usize>;
}

pub trait CampaignProductRepository<C> {
    fn create_multiple(
        &self,
        conn: &mut C,
        products: &[CampaignProduct],
    ) -> DomainResult<Vec<CampaignProduct>>;

    fn get_by_campaign_id(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
    ) -> DomainResult<Vec<CampaignProduct>>;

    fn update(&self, conn: &mut C, product: &CampaignProduct) -> DomainResult<CampaignProduct>;

    /// Deletes the rows for `product_id` within the campaign.
    fn delete(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        product_id: i64,
        user: UserId,
    ) -> DomainResult<usize>;

    fn delete_by_campaign_id(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        user: UserId,
    ) -> DomainResult<usize>;
}

pub trait TransactionService<C> {
    fn begin(&self, conn: &mut C) -> DomainResult<()>;
    fn commit(&self, conn: &mut C) -> DomainResult<()>;
    fn rollback(&self, conn: &mut C) -> DomainResult<()>;

    /// Runs `f` inside a transaction. On failure the transaction is rolled
    /// back and the original error returned; if the rollback fails too, its
    /// message is prepended while the original kind is kept.
    fn run_with_transaction<T, F>(&self, conn: &mut C, f: F) -> DomainResult<T>
    where
        F: FnOnce(&mut C) -> DomainResult<T>,
    {
        self.begin(conn)?;
        match f(conn) {
            Ok(value) => {
                self.commit(conn)?;
                Ok(value)
            }
            Err(err) => match self.rollback(conn) {
                Ok(()) => Err(err),
                Err(rollback_err) => Err(DomainError::with_message(
                    err.kind(),
                    format!("{rollback_err}: {err}"),
                )),
            },
        }
    }
}
