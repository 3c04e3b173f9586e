use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{cart::OrderMethod, format::format_vnd};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Staff => "STAFF",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "type")]
    pub kind: String,
    pub city: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub phone_num: String,
    #[serde(default)]
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub normalized_name: String,
    pub role: Role,
    #[serde(default)]
    pub staff_of_store_code: Option<String>,
    #[serde(default)]
    pub avt_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub code: String,
    pub display_name: String,
    pub phone_num: String,
    pub email: String,
    pub city: String,
    pub full_address: String,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub normalized_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub products_count: Option<i64>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub children: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionSelection {
    pub id: String,
    pub name: String,
    pub price_change: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: String,
    pub name: String,
    pub selections: Vec<ProductOptionSelection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTopping {
    pub id: String,
    pub name: String,
    pub price_change: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub normalized_name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: i64,
    #[serde(default)]
    pub compare_price: Option<i64>,
    #[serde(default)]
    pub img_urls: Vec<String>,
    #[serde(default)]
    pub unavailable_at_store_codes: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub toppings: Vec<ProductTopping>,
}

impl Product {
    pub fn is_available_at(&self, store_code: &str) -> bool {
        !self
            .unavailable_at_store_codes
            .iter()
            .any(|code| code == store_code)
    }

    /// The selection the menu preselects for each option: its first one.
    pub fn default_selections(&self) -> Vec<crate::cart::SelectedOption> {
        self.options
            .iter()
            .filter_map(|option| {
                option
                    .selections
                    .first()
                    .map(|selection| crate::cart::SelectedOption::new(&option.id, &selection.id))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub max_fixed_amount: Option<i64>,
    #[serde(default)]
    pub min_applicable_price: Option<i64>,
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub used_by_phone_num: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub expired_at: Option<String>,
}

impl Discount {
    pub fn value_display(&self) -> String {
        match self.discount_type {
            DiscountType::Fixed => format!("{}đ", format_vnd(self.discount_value.round() as i64)),
            DiscountType::Percentage => format!("{:.0}%", self.discount_value * 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Fulfilled,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Fulfilled => "FULFILLED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
    Bank,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::Bank => "BANK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedOption {
    pub name: String,
    pub selection: String,
    pub price_change: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedTopping {
    pub name: String,
    pub price_change: i64,
}

/// A priced line as the server returns it, both in previews and in orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    #[serde(default)]
    pub id: Option<String>,
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_img_url: Option<String>,
    #[serde(default)]
    pub selected_options: Vec<PricedOption>,
    #[serde(default)]
    pub selected_toppings: Vec<PricedTopping>,
    pub base_price: i64,
    pub unit_price: i64,
    pub quantity: u32,
    pub line_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub store_code: String,
    pub customer_phone_num: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub customer_name: String,
    #[serde(default)]
    pub message: Option<String>,
    pub order_method: OrderMethod,
    #[serde(default)]
    pub destination: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub discount_code: Option<String>,
    pub subtotal_amount: i64,
    pub discount_amount: i64,
    pub delivery_fee: i64,
    pub total_amount: i64,
    pub paid: bool,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub lines: Vec<PricedLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub occurred_at: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}
