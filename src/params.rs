use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::AppConfig;
use crate::dates::{CampaignDates, DateRuleError};
use crate::domain::{
    Audit, Campaign, CampaignId, CampaignProduct, CampaignProductId, CampaignStatus,
    PaginationConfig, SortOrder, UserId,
};
use crate::error::AppError;

const CAMPAIGN_TYPES: [&str; 2] = ["deli", "cash&carry"];
const PRODUCT_TYPES: [&str; 2] = ["cd", "ncd"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Field(String),
    #[error(transparent)]
    Dates(#[from] DateRuleError),
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        AppError::bad_request(value)
    }
}

fn field_error(message: impl Into<String>) -> ValidationError {
    ValidationError::Field(message.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    /// Dates left empty in the form are taken from the stored campaign.
    Update(CampaignDates),
}

/// Body of `POST /campaigns` and `PUT /campaigns/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignForm {
    pub title: String,
    pub campaign_status_code: i64,
    pub campaign_type: String,
    pub listing_title: String,
    pub listing_description: String,
    pub listing_image_path: String,
    pub onboarding_title: String,
    pub onboarding_description: String,
    pub onboarding_image_path: String,
    pub landing_image_path: String,
    pub order_start_date: String,
    pub order_end_date: String,
    pub collection_start_date: String,
    pub collection_end_date: String,
    pub lead_time: i32,
    pub offer_id: i64,
    pub tag_id: i64,
    pub is_campaign_published: bool,
    pub stores: Vec<i64>,
}

/// Output of a successful [`CampaignForm::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidCampaign {
    pub status: CampaignStatus,
    pub dates: CampaignDates,
}

impl CampaignForm {
    pub fn validate(
        &self,
        kind: FormKind,
        max_date_difference: i64,
    ) -> Result<ValidCampaign, ValidationError> {
        if kind == FormKind::Create && self.title.trim().is_empty() {
            return Err(field_error("title is required"));
        }
        let status = CampaignStatus::from_code(self.campaign_status_code)
            .ok_or_else(|| field_error("campaign_status_code must be one of [1 2 3]"))?;
        if !self.campaign_type.is_empty() && !CAMPAIGN_TYPES.contains(&self.campaign_type.as_str())
        {
            return Err(field_error("campaign_type must be one of [deli cash&carry]"));
        }
        for (field, value) in [
            ("listing_image_path", &self.listing_image_path),
            ("onboarding_image_path", &self.onboarding_image_path),
            ("landing_image_path", &self.landing_image_path),
        ] {
            if !value.is_empty() && Url::parse(value).is_err() {
                return Err(field_error(format!("{field} must be a valid url")));
            }
        }
        if self.lead_time < 0 {
            return Err(field_error("lead_time must not be negative"));
        }
        if kind == FormKind::Create {
            for (field, value) in [
                ("order_start_date", &self.order_start_date),
                ("order_end_date", &self.order_end_date),
                ("collection_start_date", &self.collection_start_date),
                ("collection_end_date", &self.collection_end_date),
            ] {
                if value.is_empty() {
                    return Err(field_error(format!("{field} is required")));
                }
            }
        }

        let sent = CampaignDates::parse(
            &self.order_start_date,
            &self.order_end_date,
            &self.collection_start_date,
            &self.collection_end_date,
        )
        .map_err(DateRuleError::from)?;
        let dates = match kind {
            FormKind::Create => sent,
            FormKind::Update(stored) => sent.fill_from(stored),
        };
        dates.validate(self.lead_time, max_date_difference)?;

        Ok(ValidCampaign { status, dates })
    }

    pub fn to_campaign(&self, id: CampaignId, valid: ValidCampaign, user: UserId) -> Campaign {
        Campaign {
            id,
            title: self.title.trim().to_string(),
            order_start_date: valid.dates.order_start,
            order_end_date: valid.dates.order_end,
            collection_start_date: valid.dates.collection_start,
            collection_end_date: valid.dates.collection_end,
            status: valid.status,
            campaign_type: self.campaign_type.clone(),
            listing_title: self.listing_title.clone(),
            listing_description: self.listing_description.clone(),
            listing_image_path: self.listing_image_path.clone(),
            onboard_title: self.onboarding_title.clone(),
            onboard_description: self.onboarding_description.clone(),
            onboard_image_path: self.onboarding_image_path.clone(),
            landing_image_path: self.landing_image_path.clone(),
            lead_time: self.lead_time,
            offer_id: self.offer_id,
            tag_id: self.tag_id,
            is_published: self.is_campaign_published,
            audit: Audit::created_by(user),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoresForm {
    pub stores: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductForm {
    pub product_id: i64,
    #[serde(rename = "SKU_no", alias = "sku_no", default)]
    pub sku_no: i64,
    #[serde(default)]
    pub serial_no: i32,
    #[serde(default)]
    pub sequence_no: i32,
    #[serde(default)]
    pub product_type: String,
}

impl ProductForm {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.product_id <= 0 {
            return Err(field_error("product_id is required"));
        }
        if !self.product_type.is_empty() && !PRODUCT_TYPES.contains(&self.product_type.as_str()) {
            return Err(field_error("product_type must be one of [cd ncd]"));
        }
        Ok(())
    }

    fn to_product(
        &self,
        id: CampaignProductId,
        campaign_id: CampaignId,
        user: UserId,
    ) -> CampaignProduct {
        CampaignProduct {
            id,
            campaign_id,
            product_id: self.product_id,
            sku_no: self.sku_no,
            serial_no: self.serial_no,
            sequence_no: self.sequence_no,
            product_type: self.product_type.clone(),
            audit: Audit::created_by(user),
        }
    }
}

/// Body of `POST /campaigns/products`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductsForm {
    pub campaign_id: i64,
    pub products: Vec<ProductForm>,
    pub created_by: i64,
}

impl ProductsForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.campaign_id <= 0 {
            return Err(field_error("campaign_id is required"));
        }
        if self.created_by <= 0 {
            return Err(field_error("created_by is required"));
        }
        if self.products.is_empty() {
            return Err(field_error("products is required"));
        }
        self.products.iter().try_for_each(ProductForm::validate)
    }

    pub fn to_products(&self) -> Vec<CampaignProduct> {
        let campaign_id = CampaignId(self.campaign_id);
        let user = UserId(self.created_by);
        self.products
            .iter()
            .map(|product| product.to_product(CampaignProductId::default(), campaign_id, user))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateProductForm {
    pub campaign_product_id: i64,
    #[serde(flatten)]
    pub product: ProductForm,
}

/// Body of `PUT /campaigns/{campaign_id}/products`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateProductsForm {
    pub products: Vec<UpdateProductForm>,
}

impl UpdateProductsForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.products.is_empty() {
            return Err(field_error("products is required"));
        }
        for entry in &self.products {
            if entry.campaign_product_id <= 0 {
                return Err(field_error("campaign_product_id is required"));
            }
            entry.product.validate()?;
        }
        Ok(())
    }

    pub fn to_products(&self, campaign_id: CampaignId, user: UserId) -> Vec<CampaignProduct> {
        self.products
            .iter()
            .map(|entry| {
                entry.product.to_product(
                    CampaignProductId(entry.campaign_product_id),
                    campaign_id,
                    user,
                )
            })
            .collect()
    }
}

/// Query string of `GET /campaigns`. Values stay raw so malformed numbers
/// fall back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCampaignsQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
}

impl ListCampaignsQuery {
    pub fn to_pagination(&self, config: &AppConfig) -> Result<PaginationConfig, ValidationError> {
        let limit = positive(self.limit.as_deref()).unwrap_or(config.pagination_default_limit);
        let page = positive(self.page.as_deref()).unwrap_or(1);
        if (page - 1).checked_mul(limit).is_none() {
            return Err(field_error("page is out of range for the given limit"));
        }
        let sort_raw = self
            .sort
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(config.pagination_default_sort.as_str());
        let sort: SortOrder = sort_raw.parse().map_err(ValidationError::Field)?;
        let status = self.status.as_deref().and_then(CampaignStatus::from_name);

        Ok(PaginationConfig {
            limit,
            page,
            sort,
            name: self.name.clone().unwrap_or_default(),
            status,
        })
    }
}

fn positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
}

/// Query string of `GET /campaigns/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetCampaignQuery {
    pub omit_products: Option<String>,
    pub omit_stores: Option<String>,
}

impl GetCampaignQuery {
    /// Returns `(omit_products, omit_stores)`.
    pub fn flags(&self) -> Result<(bool, bool), ValidationError> {
        Ok((
            parse_flag("omit_products", self.omit_products.as_deref())?,
            parse_flag("omit_stores", self.omit_stores.as_deref())?,
        ))
    }
}

fn parse_flag(field: &str, raw: Option<&str>) -> Result<bool, ValidationError> {
    match raw.unwrap_or_default() {
        "" => Ok(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(field_error(format!(
            "invalid boolean value '{other}' for {field}"
        ))),
    }
}

/// Parses a numeric path segment, keeping the parser's message for clients.
pub fn parse_path_id(raw: &str) -> Result<i64, std::num::ParseIntError> {
    raw.trim().parse::<i64>()
}
