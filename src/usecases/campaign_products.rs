use crate::domain::{CampaignId, CampaignProduct, UserId};
use crate::dto::CampaignProductDto;
use crate::error::DomainResult;
use crate::repository::CampaignProductRepository;

#[derive(Debug, Clone, Default)]
pub struct CampaignProductUseCase<R> {
    repo: R,
}

impl<R> CampaignProductUseCase<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_products<C>(
        &self,
        conn: &mut C,
        products: &[CampaignProduct],
    ) -> DomainResult<Vec<CampaignProductDto>>
    where
        R: CampaignProductRepository<C>,
    {
        let created = self.repo.create_multiple(conn, products)?;
        Ok(created.iter().map(CampaignProductDto::from).collect())
    }

    pub fn get_products<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
    ) -> DomainResult<Vec<CampaignProduct>>
    where
        R: CampaignProductRepository<C>,
    {
        self.repo.get_by_campaign_id(conn, campaign_id)
    }

    /// Updates each product on its own row.
    pub fn update_products<C>(
        &self,
        conn: &mut C,
        products: &[CampaignProduct],
    ) -> DomainResult<Vec<CampaignProductDto>>
    where
        R: CampaignProductRepository<C>,
    {
        products
            .iter()
            .map(|product| {
                self.repo
                    .update(conn, product)
                    .map(|updated| CampaignProductDto::from(&updated))
            })
            .collect()
    }

    pub fn delete_product<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        product_id: i64,
        user: UserId,
    ) -> DomainResult<usize>
    where
        R: CampaignProductRepository<C>,
    {
        self.repo.delete(conn, campaign_id, product_id, user)
    }

    pub fn delete_all<C>(
        &self,
        conn: &mut C,
        campaign_id: CampaignId,
        user: UserId,
    ) -> DomainResult<usize>
    where
        R: CampaignProductRepository<C>,
    {
        self.repo.delete_by_campaign_id(conn, campaign_id, user)
    }
}
