//! Promotion Entity
//!
//! A paid campaign on one of the owner's products. Counters start at zero
//! and move only through the atomic increment operations, never through a
//! row update.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ProductId, PromotionId, UserId};
use serde::{Deserialize, Serialize};

use catalog::models::Product;

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl PromotionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PromotionStatus::Active => "active",
            PromotionStatus::Paused => "paused",
            PromotionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PromotionStatus::Active),
            "paused" => Ok(PromotionStatus::Paused),
            "completed" => Ok(PromotionStatus::Completed),
            _ => Err(()),
        }
    }
}

/// Promotion entity
#[derive(Debug, Clone)]
pub struct Promotion {
    pub id: PromotionId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub budget: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PromotionStatus,
    pub clicks: i32,
    pub impressions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A promotion joined with its promoted product
#[derive(Debug, Clone)]
pub struct PromotionWithProduct {
    pub promotion: Promotion,
    pub product: Option<Product>,
}

/// Validated input for a promotion insert; the row always starts
/// `active` with zeroed counters
#[derive(Debug, Clone)]
pub struct NewPromotion {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub budget: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Optional-field update for a promotion row.
///
/// Counters are deliberately absent: they move only through the atomic
/// increments.
#[derive(Debug, Clone, Default)]
pub struct PromotionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<PromotionStatus>,
}
