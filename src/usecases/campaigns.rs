use chrono::NaiveDate;

use crate::domain::{Campaign, CampaignId, PaginationConfig, StatusTransition};
use crate::dto::{CampaignDto, CampaignListDto};
use crate::error::DomainResult;
use crate::repository::CampaignRepository;

#[derive(Debug, Clone, Default)]
pub struct CampaignUseCase<R> {
    repo: R,
}

impl<R> CampaignUseCase<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get<C>(&self, conn: &mut C, id: CampaignId) -> DomainResult<Campaign>
    where
        R: CampaignRepository<C>,
    {
        self.repo.get(conn, id)
    }

    pub fn list<C>(
        &self,
        conn: &mut C,
        pagination: &PaginationConfig,
    ) -> DomainResult<CampaignListDto>
    where
        R: CampaignRepository<C>,
    {
        let (campaigns, count) = self.repo.list(conn, pagination)?;
        Ok(CampaignListDto {
            count,
            limit: pagination.limit,
            offset: pagination.offset(),
            campaigns: campaigns.iter().map(CampaignDto::from).collect(),
        })
    }

    pub fn create<C>(&self, conn: &mut C, campaign: &Campaign) -> DomainResult<Campaign>
    where
        R: CampaignRepository<C>,
    {
        self.repo.create(conn, campaign)
    }

    pub fn exists<C>(&self, conn: &mut C, id: CampaignId, title: &str) -> DomainResult<bool>
    where
        R: CampaignRepository<C>,
    {
        self.repo.exists(conn, id, title)
    }

    pub fn update<C>(&self, conn: &mut C, campaign: &Campaign) -> DomainResult<Campaign>
    where
        R: CampaignRepository<C>,
    {
        self.repo.update(conn, campaign)
    }

    pub fn update_status<C>(&self, conn: &mut C, today: NaiveDate) -> DomainResult<StatusTransition>
    where
        R: CampaignRepository<C>,
    {
        self.repo.update_status(conn, today)
    }
}
