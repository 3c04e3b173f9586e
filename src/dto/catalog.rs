use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::DiscountType;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub code: String,
    pub display_name: String,
    pub phone_num: String,
    pub email: String,
    pub city: String,
    pub full_address: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_num: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscountRequest {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_fixed_amount: Option<i64>,
    pub min_applicable_price: Option<i64>,
    pub expired_at: Option<DateTime<Utc>>,
}

impl CreateDiscountRequest {
    pub fn fixed(code: impl Into<String>, amount: i64) -> Self {
        Self {
            code: code.into(),
            discount_type: DiscountType::Fixed,
            discount_value: amount as f64,
            max_fixed_amount: None,
            min_applicable_price: None,
            expired_at: None,
        }
    }

    /// `percent` is what the admin types (20 for 20%); the API takes a ratio.
    pub fn percentage(code: impl Into<String>, percent: f64) -> Self {
        Self {
            code: code.into(),
            discount_type: DiscountType::Percentage,
            discount_value: percent / 100.0,
            max_fixed_amount: None,
            min_applicable_price: None,
            expired_at: None,
        }
    }
}
