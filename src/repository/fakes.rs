//! In-memory repository doubles. The connection type is a unit struct so
//! use cases can be driven without a database.

use std::cell::{Cell, RefCell};

use chrono::NaiveDate;

use crate::domain::{
    Campaign, CampaignId, CampaignProduct, CampaignProductId, CampaignStatus, CampaignStore,
    CampaignStoreId, PaginationConfig, StatusTransition, UserId,
};
use crate::error::{DomainError, DomainResult, ErrorKind};
use crate::repository::{
    CampaignProductRepository, CampaignRepository, CampaignStoreRepository, TransactionService,
};

#[derive(Debug, Default)]
pub struct FakeConn;

#[derive(Default)]
pub struct FakeStoreRepository {
    rows: RefCell<Vec<CampaignStore>>,
    next_id: Cell<i64>,
    pub probe_calls: Cell<usize>,
    pub create_calls: Cell<usize>,
    pub delete_calls: RefCell<Vec<i64>>,
    /// Store id whose probe fails with a storage error.
    pub failing_probe: Cell<Option<i64>>,
}

impl FakeStoreRepository {
    pub fn with_stores(campaign_id: CampaignId, store_ids: &[i64]) -> Self {
        let repo = Self::default();
        for store_id in store_ids {
            repo.insert(CampaignStore::new(campaign_id, *store_id, UserId(1)));
        }
        repo
    }

    fn insert(&self, mut store: CampaignStore) -> CampaignStore {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        store.id = CampaignStoreId(id);
        self.rows.borrow_mut().push(store.clone());
        store
    }

    pub fn active_store_ids(&self, campaign_id: CampaignId) -> Vec<i64> {
        self.rows
            .borrow()
            .iter()
            .filter(|row| row.campaign_id == campaign_id && row.audit.deleted_at.is_none())
            .map(|row| row.store_id)
            .collect()
    }

    pub fn write_calls(&self) -> usize {
        self.create_calls.get() + self.delete_calls.borrow().len()
    }

    fn soft_delete<F>(&self, user: UserId, predicate: F) -> usize
    where
        F: Fn(&CampaignStore) -> bool,
    {
        let mut rows = self.rows.borrow_mut();
        let mut deleted = 0;
        for row in rows.iter_mut() {
            if row.audit.deleted_at.is_none() && predicate(row) {
                row.audit.deleted_at = NaiveDate::from_ymd_opt(2024, 1, 1)
                    .and_then(|day| day.and_hms_opt(0, 0, 0));
                row.audit.deleted_by = user;
                deleted += 1;
            }
        }
        deleted
    }
}

impl CampaignStoreRepository<FakeConn> for FakeStoreRepository {
    fn create_multiple(
        &self,
        _conn: &mut FakeConn,
        stores: &[CampaignStore],
    ) -> DomainResult<Vec<CampaignStore>> {
        self.create_calls.set(self.create_calls.get() + 1);
        Ok(stores.iter().cloned().map(|store| self.insert(store)).collect())
    }

    fn get_by_campaign_id(
        &self,
        _conn: &mut FakeConn,
        campaign_id: CampaignId,
    ) -> DomainResult<Vec<CampaignStore>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|row| row.campaign_id == campaign_id && row.audit.deleted_at.is_none())
            .cloned()
            .collect())
    }

    fn get_by_store_id(
        &self,
        _conn: &mut FakeConn,
        campaign_id: CampaignId,
        store_id: i64,
    ) -> DomainResult<CampaignStore> {
        self.probe_calls.set(self.probe_calls.get() + 1);
        if self.failing_probe.get() == Some(store_id) {
            return Err(DomainError::wrap(ErrorKind::StoreCantGet, "connection reset"));
        }
        self.rows
            .borrow()
            .iter()
            .find(|row| {
                row.campaign_id == campaign_id
                    && row.store_id == store_id
                    && row.audit.deleted_at.is_none()
            })
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorKind::StoreNotExists))
    }

    fn delete(
        &self,
        _conn: &mut FakeConn,
        campaign_id: CampaignId,
        id: CampaignStoreId,
        user: UserId,
    ) -> DomainResult<usize> {
        Ok(self.soft_delete(user, |row| row.campaign_id == campaign_id && row.id == id))
    }

    fn delete_by_store_id(
        &self,
        _conn: &mut FakeConn,
        campaign_id: CampaignId,
        store_id: i64,
        user: UserId,
    ) -> DomainResult<usize> {
        self.delete_calls.borrow_mut().push(store_id);
        Ok(self.soft_delete(user, |row| {
            row.campaign_id == campaign_id && row.store_id == store_id
        }))
    }

    fn delete_by_campaign_id(
        &self,
        _conn: &mut FakeConn,
        campaign_id: CampaignId,
        user: UserId,
    ) -> DomainResult<usize> {
        Ok(self.soft_delete(user, |row| row.campaign_id == campaign_id))
    }
}

/// Records begin/commit/rollback in call order.
#[derive(Default)]
pub struct FakeTransactions {
    pub events: RefCell<Vec<&'static str>>,
    pub fail_commit: Cell<bool>,
    pub fail_rollback: Cell<bool>,
}

impl TransactionService<FakeConn> for FakeTransactions {
    fn begin(&self, _conn: &mut FakeConn) -> DomainResult<()> {
        self.events.borrow_mut().push("begin");
        Ok(())
    }

    fn commit(&self, _conn: &mut FakeConn) -> DomainResult<()> {
        self.events.borrow_mut().push("commit");
        if self.fail_commit.get() {
            return Err(DomainError::wrap(ErrorKind::TxFailed, "commit refused"));
        }
        Ok(())
    }

    fn rollback(&self, _conn: &mut FakeConn) -> DomainResult<()> {
        self.events.borrow_mut().push("rollback");
        if self.fail_rollback.get() {
            return Err(DomainError::wrap(ErrorKind::TxFailed, "rollback refused"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeProductRepository {
    pub rows: RefCell<Vec<CampaignProduct>>,
    next_id: Cell<i64>,
    pub update_calls: Cell<usize>,
}

impl CampaignProductRepository<FakeConn> for FakeProductRepository {
    fn create_multiple(
        &self,
        _conn: &mut FakeConn,
        products: &[CampaignProduct],
    ) -> DomainResult<Vec<CampaignProduct>> {
        let mut rows = self.rows.borrow_mut();
        let created: Vec<CampaignProduct> = products
            .iter()
            .cloned()
            .map(|mut product| {
                let id = self.next_id.get() + 1;
                self.next_id.set(id);
                product.id = CampaignProductId(id);
                product
            })
            .collect();
        rows.extend(created.iter().cloned());
        Ok(created)
    }

    fn get_by_campaign_id(
        &self,
        _conn: &mut FakeConn,
        campaign_id: CampaignId,
    ) -> DomainResult<Vec<CampaignProduct>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|row| row.campaign_id == campaign_id && row.audit.deleted_at.is_none())
            .cloned()
            .collect())
    }

    fn update(
        &self,
        _conn: &mut FakeConn,
        product: &CampaignProduct,
    ) -> DomainResult<CampaignProduct> {
        self.update_calls.set(self.update_calls.get() + 1);
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|row| row.id == product.id && row.campaign_id == product.campaign_id)
            .ok_or_else(|| DomainError::new(ErrorKind::ProductNotExists))?;
        *row = product.clone();
        Ok(row.clone())
    }

    fn delete(
        &self,
        _conn: &mut FakeConn,
        campaign_id: CampaignId,
        product_id: i64,
        user: UserId,
    ) -> DomainResult<usize> {
        let mut deleted = 0;
        for row in self.rows.borrow_mut().iter_mut() {
            if row.campaign_id == campaign_id
                && row.product_id == product_id
                && row.audit.deleted_at.is_none()
            {
                row.audit.deleted_at = NaiveDate::from_ymd_opt(2024, 1, 1)
                    .and_then(|day| day.and_hms_opt(0, 0, 0));
                row.audit.deleted_by = user;
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    fn delete_by_campaign_id(
        &self,
        conn: &mut FakeConn,
        campaign_id: CampaignId,
        user: UserId,
    ) -> DomainResult<usize> {
        let ids: Vec<i64> = self
            .get_by_campaign_id(conn, campaign_id)?
            .iter()
            .map(|row| row.product_id)
            .collect();
        let mut deleted = 0;
        for product_id in ids {
            deleted += self.delete(conn, campaign_id, product_id, user)?;
        }
        Ok(deleted)
    }
}

/// Campaign store with a fixed page of rows; only `list` and `update_status`
/// do real work.
#[derive(Default)]
pub struct FakeCampaignRepository {
    pub campaigns: Vec<Campaign>,
    pub total: i64,
    pub last_status_day: Cell<Option<NaiveDate>>,
}

impl CampaignRepository<FakeConn> for FakeCampaignRepository {
    fn get(&self, _conn: &mut FakeConn, id: CampaignId) -> DomainResult<Campaign> {
        self.campaigns
            .iter()
            .find(|campaign| campaign.id == id)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorKind::CampaignNotFound))
    }

    fn list(
        &self,
        _conn: &mut FakeConn,
        _pagination: &PaginationConfig,
    ) -> DomainResult<(Vec<Campaign>, i64)> {
        Ok((self.campaigns.clone(), self.total))
    }

    fn create(&self, _conn: &mut FakeConn, campaign: &Campaign) -> DomainResult<Campaign> {
        Ok(campaign.clone())
    }

    fn exists(&self, _conn: &mut FakeConn, id: CampaignId, title: &str) -> DomainResult<bool> {
        Ok(self.campaigns.iter().any(|campaign| {
            if id.is_unset() {
                campaign.title == title
            } else {
                campaign.id == id
            }
        }))
    }

    fn update(&self, _conn: &mut FakeConn, campaign: &Campaign) -> DomainResult<Campaign> {
        Ok(campaign.clone())
    }

    fn update_status(
        &self,
        _conn: &mut FakeConn,
        today: NaiveDate,
    ) -> DomainResult<StatusTransition> {
        self.last_status_day.set(Some(today));
        let activated = self
            .campaigns
            .iter()
            .filter(|campaign| campaign.status == CampaignStatus::Scheduled)
            .count();
        Ok(StatusTransition {
            activated,
            deactivated: 0,
        })
    }
}
