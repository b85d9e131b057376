use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    Audit, Campaign, CampaignId, CampaignProduct, CampaignProductId, CampaignStatus,
    CampaignStore, CampaignStoreId, UserId,
};
use crate::error::{DomainError, DomainResult, ErrorKind};
use crate::schema::*;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = campaigns, primary_key(campaign_id))]
pub struct CampaignRow {
    pub campaign_id: i64,
    pub title: String,
    pub order_start_date: Option<NaiveDateTime>,
    pub order_end_date: Option<NaiveDateTime>,
    pub collection_start_date: Option<NaiveDateTime>,
    pub collection_end_date: Option<NaiveDateTime>,
    pub status_code: i64,
    pub campaign_type: String,
    pub listing_title: String,
    pub listing_description: String,
    pub listing_image_path: String,
    pub onboard_title: String,
    pub onboard_description: String,
    pub onboard_image_path: String,
    pub landing_image_path: String,
    pub lead_time: Option<i32>,
    pub offer_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub is_campaign_published: bool,
    pub created_at: NaiveDateTime,
    pub created_by: i64,
    pub updated_at: NaiveDateTime,
    pub updated_by: i64,
    pub deleted_at: Option<NaiveDateTime>,
    pub deleted_by: i64,
}

impl CampaignRow {
    pub fn into_campaign(self) -> DomainResult<Campaign> {
        let status = CampaignStatus::from_code(self.status_code).ok_or_else(|| {
            DomainError::with_message(
                ErrorKind::CampaignCantGet,
                format!(
                    "campaign {} has unknown status code {}",
                    self.campaign_id, self.status_code
                ),
            )
        })?;

        Ok(Campaign {
            id: CampaignId(self.campaign_id),
            title: self.title,
            order_start_date: self.order_start_date,
            order_end_date: self.order_end_date,
            collection_start_date: self.collection_start_date,
            collection_end_date: self.collection_end_date,
            status,
            campaign_type: self.campaign_type,
            listing_title: self.listing_title,
            listing_description: self.listing_description,
            listing_image_path: self.listing_image_path,
            onboard_title: self.onboard_title,
            onboard_description: self.onboard_description,
            onboard_image_path: self.onboard_image_path,
            landing_image_path: self.landing_image_path,
            lead_time: self.lead_time.unwrap_or_default(),
            offer_id: self.offer_id.unwrap_or_default(),
            tag_id: self.tag_id.unwrap_or_default(),
            is_published: self.is_campaign_published,
            audit: Audit {
                created_at: Some(self.created_at),
                created_by: UserId(self.created_by),
                updated_at: Some(self.updated_at),
                updated_by: UserId(self.updated_by),
                deleted_at: self.deleted_at,
                deleted_by: UserId(self.deleted_by),
            },
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = campaigns)]
pub struct NewCampaignRow<'a> {
    pub title: &'a str,
    pub order_start_date: Option<NaiveDateTime>,
    pub order_end_date: Option<NaiveDateTime>,
    pub collection_start_date: Option<NaiveDateTime>,
    pub collection_end_date: Option<NaiveDateTime>,
    pub status_code: i64,
    pub campaign_type: &'a str,
    pub listing_title: &'a str,
    pub listing_description: &'a str,
    pub listing_image_path: &'a str,
    pub onboard_title: &'a str,
    pub onboard_description: &'a str,
    pub onboard_image_path: &'a str,
    pub landing_image_path: &'a str,
    pub lead_time: Option<i32>,
    pub offer_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub is_campaign_published: bool,
    pub created_by: i64,
    pub updated_by: i64,
}

impl<'a> From<&'a Campaign> for NewCampaignRow<'a> {
    fn from(campaign: &'a Campaign) -> Self {
        Self {
            title: &campaign.title,
            order_start_date: campaign.order_start_date,
            order_end_date: campaign.order_end_date,
            collection_start_date: campaign.collection_start_date,
            collection_end_date: campaign.collection_end_date,
            status_code: campaign.status.code(),
            campaign_type: &campaign.campaign_type,
            listing_title: &campaign.listing_title,
            listing_description: &campaign.listing_description,
            listing_image_path: &campaign.listing_image_path,
            onboard_title: &campaign.onboard_title,
            onboard_description: &campaign.onboard_description,
            onboard_image_path: &campaign.onboard_image_path,
            landing_image_path: &campaign.landing_image_path,
            lead_time: non_zero(campaign.lead_time),
            offer_id: non_zero(campaign.offer_id),
            tag_id: non_zero(campaign.tag_id),
            is_campaign_published: campaign.is_published,
            created_by: campaign.audit.created_by.0,
            updated_by: campaign.audit.updated_by.0,
        }
    }
}

/// Zero is stored as NULL for the optional numeric campaign columns.
pub fn non_zero<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = campaign_stores, primary_key(campaign_store_id))]
pub struct CampaignStoreRow {
    pub campaign_store_id: i64,
    pub campaign_id: i64,
    pub store_id: i64,
    pub created_at: NaiveDateTime,
    pub created_by: i64,
    pub updated_at: NaiveDateTime,
    pub updated_by: i64,
    pub deleted_at: Option<NaiveDateTime>,
    pub deleted_by: i64,
}

impl From<CampaignStoreRow> for CampaignStore {
    fn from(row: CampaignStoreRow) -> Self {
        Self {
            id: CampaignStoreId(row.campaign_store_id),
            campaign_id: CampaignId(row.campaign_id),
            store_id: row.store_id,
            audit: Audit {
                created_at: Some(row.created_at),
                created_by: UserId(row.created_by),
                updated_at: Some(row.updated_at),
                updated_by: UserId(row.updated_by),
                deleted_at: row.deleted_at,
                deleted_by: UserId(row.deleted_by),
            },
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = campaign_stores)]
pub struct NewCampaignStoreRow {
    pub campaign_id: i64,
    pub store_id: i64,
    pub created_by: i64,
    pub updated_by: i64,
}

impl From<&CampaignStore> for NewCampaignStoreRow {
    fn from(store: &CampaignStore) -> Self {
        Self {
            campaign_id: store.campaign_id.0,
            store_id: store.store_id,
            created_by: store.audit.created_by.0,
            updated_by: store.audit.updated_by.0,
        }
    }
}

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = campaign_products, primary_key(campaign_product_id))]
pub struct CampaignProductRow {
    pub campaign_product_id: i64,
    pub campaign_id: i64,
    pub product_id: i64,
    pub sku_no: i64,
    pub serial_no: i32,
    pub sequence_no: i32,
    pub product_type: String,
    pub created_at: NaiveDateTime,
    pub created_by: i64,
    pub updated_at: NaiveDateTime,
    pub updated_by: i64,
    pub deleted_at: Option<NaiveDateTime>,
    pub deleted_by: i64,
}

impl From<CampaignProductRow> for CampaignProduct {
    fn from(row: CampaignProductRow) -> Self {
        Self {
            id: CampaignProductId(row.campaign_product_id),
            campaign_id: CampaignId(row.campaign_id),
            product_id: row.product_id,
            sku_no: row.sku_no,
            serial_no: row.serial_no,
            sequence_no: row.sequence_no,
            product_type: row.product_type,
            audit: Audit {
                created_at: Some(row.created_at),
                created_by: UserId(row.created_by),
                updated_at: Some(row.updated_at),
                updated_by: UserId(row.updated_by),
                deleted_at: row.deleted_at,
                deleted_by: UserId(row.deleted_by),
            },
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = campaign_products)]
pub struct NewCampaignProductRow<'a> {
    pub campaign_id: i64,
    pub product_id: i64,
    pub sku_no: i64,
    pub serial_no: i32,
    pub sequence_no: i32,
    pub product_type: &'a str,
    pub created_by: i64,
    pub updated_by: i64,
}

impl<'a> From<&'a CampaignProduct> for NewCampaignProductRow<'a> {
    fn from(product: &'a CampaignProduct) -> Self {
        Self {
            campaign_id: product.campaign_id.0,
            product_id: product.product_id,
            sku_no: product.sku_no,
            serial_no: product.serial_no,
            sequence_no: product.sequence_no,
            product_type: &product.product_type,
            created_by: product.audit.created_by.0,
            updated_by: product.audit.updated_by.0,
        }
    }
}
