use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::Campaign;

/// Wire format for every campaign date.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reference layout named in parse errors; clients know the format by it.
pub const DATE_TIME_LAYOUT: &str = "2006-01-02 15:04:05";

#[derive(Debug, Error)]
#[error("parsing time {input:?} as {layout:?}: {source}", layout = DATE_TIME_LAYOUT)]
pub struct DateParseError {
    input: String,
    #[source]
    source: chrono::ParseError,
}

#[derive(Debug, Error)]
pub enum DateRuleError {
    #[error(transparent)]
    Parse(#[from] DateParseError),
    #[error("invalid date : order start date should be the date before order end date")]
    OrderStartAfterOrderEnd,
    #[error("invalid date : order start date should be the date before collection start date")]
    OrderStartAfterCollectionStart,
    #[error("invalid date : collection start date should be the date before collection end date")]
    CollectionStartAfterCollectionEnd,
    #[error("invalid date : Collection start date should be at least {0} days greater than order start date")]
    CollectionStartBeforeLeadTime(i32),
    #[error("invalid date : Collection start date should be less than {0} days from order start date")]
    CollectionStartTooLate(i64),
    #[error("invalid date : Collection end date should be at least {0} days greater than order end date")]
    CollectionEndBeforeLeadTime(i32),
    #[error("invalid date : Collection end date should be less than {0} days from order end date")]
    CollectionEndTooLate(i64),
}

/// Parses a wire date. The empty string means "not set".
pub fn parse_date_time(raw: &str) -> Result<Option<NaiveDateTime>, DateParseError> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
        .map(Some)
        .map_err(|source| DateParseError {
            input: raw.to_string(),
            source,
        })
}

pub fn format_date_time(value: Option<NaiveDateTime>) -> String {
    value
        .map(|value| value.format(DATE_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignDates {
    pub order_start: Option<NaiveDateTime>,
    pub order_end: Option<NaiveDateTime>,
    pub collection_start: Option<NaiveDateTime>,
    pub collection_end: Option<NaiveDateTime>,
}

impl From<&Campaign> for CampaignDates {
    fn from(campaign: &Campaign) -> Self {
        Self {
            order_start: campaign.order_start_date,
            order_end: campaign.order_end_date,
            collection_start: campaign.collection_start_date,
            collection_end: campaign.collection_end_date,
        }
    }
}

impl CampaignDates {
    /// Takes each unset date from `stored`.
    pub fn fill_from(self, stored: CampaignDates) -> Self {
        Self {
            order_start: self.order_start.or(stored.order_start),
            order_end: self.order_end.or(stored.order_end),
            collection_start: self.collection_start.or(stored.collection_start),
            collection_end: self.collection_end.or(stored.collection_end),
        }
    }

    pub fn parse(
        order_start: &str,
        order_end: &str,
        collection_start: &str,
        collection_end: &str,
    ) -> Result<Self, DateParseError> {
        Ok(Self {
            order_start: parse_date_time(order_start)?,
            order_end: parse_date_time(order_end)?,
            collection_start: parse_date_time(collection_start)?,
            collection_end: parse_date_time(collection_end)?,
        })
    }

    /// Checks the window ordering and gap rules; the first violation wins.
    ///
    /// An unset date orders before any set date, so a set start against an
    /// unset end fails the ordering checks. The gap checks only run when both
    /// dates of the pair are set.
    pub fn validate(&self, lead_time: i32, max_date_difference: i64) -> Result<(), DateRuleError> {
        if self.order_start > self.order_end {
            return Err(DateRuleError::OrderStartAfterOrderEnd);
        }
        if self.order_start > self.collection_start {
            return Err(DateRuleError::OrderStartAfterCollectionStart);
        }
        if self.collection_start > self.collection_end {
            return Err(DateRuleError::CollectionStartAfterCollectionEnd);
        }

        if let Some(days) = whole_days_between(self.order_start, self.collection_start) {
            if days < i64::from(lead_time) {
                return Err(DateRuleError::CollectionStartBeforeLeadTime(lead_time));
            }
            if days > max_date_difference {
                return Err(DateRuleError::CollectionStartTooLate(max_date_difference));
            }
        }

        if let Some(days) = whole_days_between(self.order_end, self.collection_end) {
            if days < i64::from(lead_time) {
                return Err(DateRuleError::CollectionEndBeforeLeadTime(lead_time));
            }
            if days > max_date_difference {
                return Err(DateRuleError::CollectionEndTooLate(max_date_difference));
            }
        }

        Ok(())
    }
}

fn whole_days_between(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Option<i64> {
    Some((to? - from?).num_days())
}
