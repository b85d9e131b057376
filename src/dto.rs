use axum::Json;
use serde::{Deserialize, Serialize};

use crate::dates::format_date_time;
use crate::domain::{Campaign, CampaignDetails, CampaignId, CampaignProduct, CampaignStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStoreDto {
    pub campaign_store_id: i64,
    pub store_id: i64,
}

impl From<&CampaignStore> for CampaignStoreDto {
    fn from(store: &CampaignStore) -> Self {
        Self {
            campaign_store_id: store.id.0,
            store_id: store.store_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignProductDto {
    pub campaign_product_id: i64,
    pub product_id: i64,
    pub sku_no: i64,
    pub serial_no: i32,
    pub sequence_no: i32,
    pub product_type: String,
}

impl From<&CampaignProduct> for CampaignProductDto {
    fn from(product: &CampaignProduct) -> Self {
        Self {
            campaign_product_id: product.id.0,
            product_id: product.product_id,
            sku_no: product.sku_no,
            serial_no: product.serial_no,
            sequence_no: product.sequence_no,
            product_type: product.product_type.clone(),
        }
    }
}

/// Result of attaching stores to a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStoresDto {
    pub campaign_id: i64,
    pub stores: Vec<CampaignStoreDto>,
}

impl CampaignStoresDto {
    pub fn new(campaign_id: CampaignId, stores: &[CampaignStore]) -> Self {
        Self {
            campaign_id: campaign_id.0,
            stores: stores.iter().map(CampaignStoreDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDto {
    pub id: i64,
    pub campaign_title: String,
    pub name: String,
    pub campaign_status_code: i64,
    pub campaign_type: String,
    pub listing_title: String,
    pub listing_description: String,
    pub listing_image_path: String,
    pub onboarding_title: String,
    pub onboarding_description: String,
    pub onboard_image_path: String,
    pub landing_image_path: String,
    pub order_start_date: String,
    pub order_end_date: String,
    pub collection_start_date: String,
    pub collection_end_date: String,
    pub lead_time: i32,
    pub offer_id: i64,
    pub tag_id: i64,
    pub is_campaign_published: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub campaign_products: Vec<CampaignProductDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub campaign_stores: Vec<CampaignStoreDto>,
}

impl From<&Campaign> for CampaignDto {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id.0,
            campaign_title: campaign.title.clone(),
            name: campaign.title.clone(),
            campaign_status_code: campaign.status.code(),
            campaign_type: campaign.campaign_type.clone(),
            listing_title: campaign.listing_title.clone(),
            listing_description: campaign.listing_description.clone(),
            listing_image_path: campaign.listing_image_path.clone(),
            onboarding_title: campaign.onboard_title.clone(),
            onboarding_description: campaign.onboard_description.clone(),
            onboard_image_path: campaign.onboard_image_path.clone(),
            landing_image_path: campaign.landing_image_path.clone(),
            order_start_date: format_date_time(campaign.order_start_date),
            order_end_date: format_date_time(campaign.order_end_date),
            collection_start_date: format_date_time(campaign.collection_start_date),
            collection_end_date: format_date_time(campaign.collection_end_date),
            lead_time: campaign.lead_time,
            offer_id: campaign.offer_id,
            tag_id: campaign.tag_id,
            is_campaign_published: campaign.is_published,
            campaign_products: Vec::new(),
            campaign_stores: Vec::new(),
        }
    }
}

impl From<&CampaignDetails> for CampaignDto {
    fn from(details: &CampaignDetails) -> Self {
        Self {
            campaign_products: details
                .products
                .iter()
                .map(CampaignProductDto::from)
                .collect(),
            campaign_stores: details.stores.iter().map(CampaignStoreDto::from).collect(),
            ..CampaignDto::from(&details.campaign)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignListDto {
    pub count: i64,
    pub limit: i64,
    pub offset: i64,
    pub campaigns: Vec<CampaignDto>,
}

/// `{"code":200,"status":"SUCCESS","data":...}` envelope used by queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub code: u16,
    pub status: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            code: 200,
            status: "SUCCESS".to_string(),
            data,
        })
    }
}
