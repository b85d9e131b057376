use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CampaignId(pub i64);

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CampaignStoreId(pub i64);

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CampaignProductId(pub i64);

/// Identifier of the acting user, taken from the bearer token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl CampaignId {
    /// Zero means "no id given" in lookups that fall back to the title.
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CampaignStoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CampaignProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignStatus {
    InActive,
    Active,
    Scheduled,
}

impl CampaignStatus {
    pub fn code(self) -> i64 {
        match self {
            CampaignStatus::InActive => 1,
            CampaignStatus::Active => 2,
            CampaignStatus::Scheduled => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(CampaignStatus::InActive),
            2 => Some(CampaignStatus::Active),
            3 => Some(CampaignStatus::Scheduled),
            _ => None,
        }
    }

    /// Parses the literal names accepted by the list filter.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "InActive" => Some(CampaignStatus::InActive),
            "Active" => Some(CampaignStatus::Active),
            "Scheduled" => Some(CampaignStatus::Scheduled),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CampaignStatus::InActive => "InActive",
            CampaignStatus::Active => "Active",
            CampaignStatus::Scheduled => "Scheduled",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audit {
    pub created_at: Option<NaiveDateTime>,
    pub created_by: UserId,
    pub updated_at: Option<NaiveDateTime>,
    pub updated_by: UserId,
    pub deleted_at: Option<NaiveDateTime>,
    pub deleted_by: UserId,
}

impl Audit {
    pub fn created_by(user: UserId) -> Self {
        Self {
            created_by: user,
            updated_by: user,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    pub order_start_date: Option<NaiveDateTime>,
    pub order_end_date: Option<NaiveDateTime>,
    pub collection_start_date: Option<NaiveDateTime>,
    pub collection_end_date: Option<NaiveDateTime>,
    pub status: CampaignStatus,
    pub campaign_type: String,
    pub listing_title: String,
    pub listing_description: String,
    pub listing_image_path: String,
    pub onboard_title: String,
    pub onboard_description: String,
    pub onboard_image_path: String,
    pub landing_image_path: String,
    pub lead_time: i32,
    pub offer_id: i64,
    pub tag_id: i64,
    pub is_published: bool,
    pub audit: Audit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignStore {
    pub id: CampaignStoreId,
    pub campaign_id: CampaignId,
    pub store_id: i64,
    pub audit: Audit,
}

impl CampaignStore {
    pub fn new(campaign_id: CampaignId, store_id: i64, user: UserId) -> Self {
        Self {
            id: CampaignStoreId::default(),
            campaign_id,
            store_id,
            audit: Audit::created_by(user),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignProduct {
    pub id: CampaignProductId,
    pub campaign_id: CampaignId,
    pub product_id: i64,
    pub sku_no: i64,
    pub serial_no: i32,
    pub sequence_no: i32,
    pub product_type: String,
    pub audit: Audit,
}

/// A campaign together with whichever children the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDetails {
    pub campaign: Campaign,
    pub stores: Vec<CampaignStore>,
    pub products: Vec<CampaignProduct>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    CampaignId,
    Title,
    StatusCode,
    OrderStartDate,
    OrderEndDate,
    CollectionStartDate,
    CollectionEndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: SortColumn,
    pub descending: bool,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            column: SortColumn::CreatedAt,
            descending: false,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    /// Accepts `<column>` or `<column> <asc|desc>`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split_whitespace();
        let column = match parts.next() {
            Some("campaign_id") | Some("id") => SortColumn::CampaignId,
            Some("title") => SortColumn::Title,
            Some("status_code") => SortColumn::StatusCode,
            Some("order_start_date") => SortColumn::OrderStartDate,
            Some("order_end_date") => SortColumn::OrderEndDate,
            Some("collection_start_date") => SortColumn::CollectionStartDate,
            Some("collection_end_date") => SortColumn::CollectionEndDate,
            Some("created_at") => SortColumn::CreatedAt,
            Some("updated_at") => SortColumn::UpdatedAt,
            _ => return Err(format!("unsupported sort expression '{raw}'")),
        };
        let descending = match parts.next() {
            None => false,
            Some(direction) if direction.eq_ignore_ascii_case("asc") => false,
            Some(direction) if direction.eq_ignore_ascii_case("desc") => true,
            Some(_) => return Err(format!("unsupported sort expression '{raw}'")),
        };
        if parts.next().is_some() {
            return Err(format!("unsupported sort expression '{raw}'"));
        }
        Ok(Self { column, descending })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    pub limit: i64,
    pub page: i64,
    pub sort: SortOrder,
    /// Prefix match on the campaign title.
    pub name: String,
    pub status: Option<CampaignStatus>,
}

impl PaginationConfig {
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTransition {
    pub activated: usize,
    pub deactivated: usize,
}
