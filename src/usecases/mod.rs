//! Orchestration between HTTP handlers and repositories. Each use case is
//! generic over the repository and the connection type so it can run against
//! Postgres or the in-memory fakes.

pub mod campaign_products;
pub mod campaign_stores;
pub mod campaigns;

pub use campaign_products::CampaignProductUseCase;
pub use campaign_stores::{CampaignStoreUseCase, StoreSync};
pub use campaigns::CampaignUseCase;
