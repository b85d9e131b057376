use std::collections::HashSet;

use crate::domain::{CampaignId, CampaignStore, CampaignStoreId, UserId};
use crate::error::{DomainResult, ErrorKind};
use crate::repository::CampaignStoreRepository;

/// Outcome of converging a campaign's stores onto a requested list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSync {
    pub added: Vec<CampaignStore>,
    pub removed: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignStoreUseCase<R> {
    repo: R,
}

impl<R> CampaignStoreUseCase<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Attaches the stores that are not attached yet, in one insert.
    /// Already attached and repeated ids are skipped.
    pub fn attach_stores<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        store_ids: &[i64],
        user: UserId,
    ) -> DomainResult<Vec<CampaignStore>>
    where
        R: CampaignStoreRepository<C>,
    {
        let mut new_stores = Vec::new();
        for store_id in unique_ids(store_ids) {
            match self.get_by_store_id(conn, campaign_id, store_id) {
                Ok(_) => {}
                Err(err) if err.is(ErrorKind::StoreNotExists) => {
                    new_stores.push(CampaignStore::new(campaign_id, store_id, user));
                }
                Err(err) => return Err(err),
            }
        }

        if new_stores.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.create_multiple(conn, &new_stores)
    }

    /// Converges the stored rows onto `desired`: missing stores are created
    /// in one batch, extra stores are deleted one by one, and stores present
    /// on both sides are left untouched.
    pub fn sync_stores<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        desired: &[i64],
        user: UserId,
    ) -> DomainResult<StoreSync>
    where
        R: CampaignStoreRepository<C>,
    {
        let added = self.attach_stores(conn, campaign_id, desired, user)?;

        let current: Vec<i64> = self
            .get_stores(conn, campaign_id)?
            .iter()
            .map(|store| store.store_id)
            .collect();
        let removed = difference(&unique_ids(&current), desired);
        for store_id in &removed {
            self.delete_by_store_id(conn, campaign_id, *store_id, user)?;
        }

        Ok(StoreSync { added, removed })
    }

    pub fn get_stores<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
    ) -> DomainResult<Vec<CampaignStore>>
    where
        R: CampaignStoreRepository<C>,
    {
        self.repo.get_by_campaign_id(conn, campaign_id)
    }

    pub fn get_by_store_id<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        store_id: i64,
    ) -> DomainResult<CampaignStore>
    where
        R: CampaignStoreRepository<C>,
    {
        self.repo.get_by_store_id(conn, campaign_id, store_id)
    }

    pub fn delete_store<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        id: CampaignStoreId,
        user: UserId,
    ) -> DomainResult<usize>
    where
        R: CampaignStoreRepository<C>,
    {
        self.repo.delete(conn, campaign_id, id, user)
    }

    pub fn delete_by_store_id<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        store_id: i64,
        user: UserId,
    ) -> DomainResult<usize>
    where
        R: CampaignStoreRepository<C>,
    {
        self.repo
            .delete_by_store_id(conn, campaign_id, store_id, user)
    }

    pub fn delete_all<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        user: UserId,
    ) -> DomainResult<usize>
    where
        R: CampaignStoreRepository<C>,
    {
        self.repo.delete_by_campaign_id(conn, campaign_id, user)
    }
}

/// Drops repeated ids while keeping first-seen order.
pub fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Ids in `left` that are absent from `right`, in `left` order.
pub fn difference(left: &[i64], right: &[i64]) -> Vec<i64> {
    let right: HashSet<i64> = right.iter().copied().collect();
    left.iter()
        .copied()
        .filter(|id| !right.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fakes::{FakeConn, FakeStoreRepository};

    const CAMPAIGN: CampaignId = CampaignId(7);
    const USER: UserId = UserId(99);

    fn sorted(mut ids: Vec<i64>) -> Vec<i64> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn difference_keeps_left_order() {
        assert_eq!(difference(&[4, 1, 9, 2], &[9, 4]), vec![1, 2]);
        assert!(difference(&[], &[1]).is_empty());
    }

    #[test]
    fn unique_ids_keep_first_seen_order() {
        assert_eq!(unique_ids(&[5, 3, 5, 8, 3]), vec![5, 3, 8]);
    }

    #[test]
    fn sync_converges_onto_requested_stores() {
        let usecase =
            CampaignStoreUseCase::new(FakeStoreRepository::with_stores(CAMPAIGN, &[1, 2, 3]));
        let mut conn = FakeConn;

        let outcome = usecase
            .sync_stores(&mut conn, CAMPAIGN, &[2, 3, 4, 5], USER)
            .unwrap();

        let repo = usecase.repository();
        assert_eq!(sorted(repo.active_store_ids(CAMPAIGN)), vec![2, 3, 4, 5]);
        assert_eq!(
            outcome.added.iter().map(|s| s.store_id).collect::<Vec<_>>(),
            vec![4, 5]
        );
        assert_eq!(outcome.removed, vec![1]);
        assert_eq!(repo.create_calls.get(), 1);
        assert_eq!(*repo.delete_calls.borrow(), vec![1]);
        assert_eq!(repo.probe_calls.get(), 4);
    }

    #[test]
    fn unchanged_stores_trigger_no_writes() {
        let usecase = CampaignStoreUseCase::new(FakeStoreRepository::with_stores(CAMPAIGN, &[8, 9]));
        let mut conn = FakeConn;

        let outcome = usecase
            .sync_stores(&mut conn, CAMPAIGN, &[9, 8], USER)
            .unwrap();

        assert_eq!(outcome, StoreSync::default());
        assert_eq!(usecase.repository().write_calls(), 0);
    }

    #[test]
    fn every_stale_store_gets_its_own_delete() {
        let usecase =
            CampaignStoreUseCase::new(FakeStoreRepository::with_stores(CAMPAIGN, &[1, 2, 3]));
        let mut conn = FakeConn;

        usecase.sync_stores(&mut conn, CAMPAIGN, &[], USER).unwrap();

        let repo = usecase.repository();
        assert!(repo.active_store_ids(CAMPAIGN).is_empty());
        assert_eq!(*repo.delete_calls.borrow(), vec![1, 2, 3]);
        assert_eq!(repo.create_calls.get(), 0);
    }

    #[test]
    fn repeated_requested_ids_create_one_row() {
        let usecase = CampaignStoreUseCase::new(FakeStoreRepository::default());
        let mut conn = FakeConn;

        let outcome = usecase
            .sync_stores(&mut conn, CAMPAIGN, &[83, 83], USER)
            .unwrap();

        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.added[0].audit.created_by, USER);
        assert_eq!(usecase.repository().active_store_ids(CAMPAIGN), vec![83]);
    }

    #[test]
    fn probe_failure_aborts_before_any_write() {
        let repo = FakeStoreRepository::with_stores(CAMPAIGN, &[1]);
        repo.failing_probe.set(Some(4));
        let usecase = CampaignStoreUseCase::new(repo);
        let mut conn = FakeConn;

        let err = usecase
            .sync_stores(&mut conn, CAMPAIGN, &[4, 5], USER)
            .unwrap_err();

        assert!(err.is(ErrorKind::StoreCantGet));
        assert_eq!(usecase.repository().write_calls(), 0);
        assert_eq!(usecase.repository().active_store_ids(CAMPAIGN), vec![1]);
    }

    #[test]
    fn stores_of_other_campaigns_are_untouched() {
        let repo = FakeStoreRepository::with_stores(CAMPAIGN, &[1]);
        let other = CampaignId(8);
        let usecase = CampaignStoreUseCase::new(repo);
        let mut conn = FakeConn;
        usecase.attach_stores(&mut conn, other, &[1, 2], USER).unwrap();

        usecase.sync_stores(&mut conn, CAMPAIGN, &[], USER).unwrap();

        assert_eq!(usecase.repository().active_store_ids(other), vec![1, 2]);
    }

    #[test]
    fn attach_skips_already_attached_stores() {
        let usecase = CampaignStoreUseCase::new(FakeStoreRepository::with_stores(CAMPAIGN, &[1]));
        let mut conn = FakeConn;

        let created = usecase
            .attach_stores(&mut conn, CAMPAIGN, &[1, 2], USER)
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].store_id, 2);
        assert_eq!(sorted(usecase.repository().active_store_ids(CAMPAIGN)), vec![1, 2]);

        let none = usecase
            .attach_stores(&mut conn, CAMPAIGN, &[1, 2], USER)
            .unwrap();
        assert!(none.is_empty());
        assert_eq!(usecase.repository().create_calls.get(), 1);
    }

    #[test]
    fn delete_by_campaign_store_id_records_actor() {
        let usecase = CampaignStoreUseCase::new(FakeStoreRepository::with_stores(CAMPAIGN, &[1, 2]));
        let mut conn = FakeConn;
        let target = usecase.get_by_store_id(&mut conn, CAMPAIGN, 2).unwrap();

        let deleted = usecase
            .delete_store(&mut conn, CAMPAIGN, target.id, USER)
            .unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(usecase.repository().active_store_ids(CAMPAIGN), vec![1]);
        let err = usecase.get_by_store_id(&mut conn, CAMPAIGN, 2).unwrap_err();
        assert!(err.is(ErrorKind::StoreNotExists));
    }
}
