use std::sync::Arc;

use diesel::{
    pg::PgConnection,
    r2d2::{ConnectionManager, PooledConnection},
};

use crate::{
    auth::jwt::JwtService,
    config::AppConfig,
    db::PgPool,
    error::{AppError, AppResult},
    repository::{
        PgCampaignProductRepository, PgCampaignRepository, PgCampaignStoreRepository,
        PgTransactionService,
    },
    usecases::{CampaignProductUseCase, CampaignStoreUseCase, CampaignUseCase},
};

pub type PgPooledConnection = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub jwt: JwtService,
    pub campaigns: CampaignUseCase<PgCampaignRepository>,
    pub campaign_stores: CampaignStoreUseCase<PgCampaignStoreRepository>,
    pub campaign_products: CampaignProductUseCase<PgCampaignProductRepository>,
    pub tx: PgTransactionService,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig, jwt: JwtService) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            jwt,
            campaigns: CampaignUseCase::new(PgCampaignRepository),
            campaign_stores: CampaignStoreUseCase::new(PgCampaignStoreRepository),
            campaign_products: CampaignProductUseCase::new(PgCampaignProductRepository),
            tx: PgTransactionService,
        }
    }

    pub fn db(&self) -> AppResult<PgPooledConnection> {
        self.pool
            .get()
            .map_err(|err| AppError::internal(format!("database pool error: {err}")))
    }
}
