use serde::{Deserialize, Serialize};

use crate::{
    cart::{CartLine, CartState, OrderMethod},
    models::{OrderStatus, PaymentMethod, PricedLine},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub store_code: String,
    pub order_method: OrderMethod,
    pub destination: String,
    pub discount_code: Option<String>,
    pub lines: Vec<CartLine>,
}

impl PreviewRequest {
    /// `None` until the draft has both a store and at least one line.
    pub fn from_cart(cart: &CartState) -> Option<Self> {
        let store_code = cart.store_code.as_ref()?;
        if cart.lines.is_empty() {
            return None;
        }
        Some(Self {
            store_code: store_code.clone(),
            order_method: cart.order_method,
            destination: cart.destination.clone(),
            discount_code: cart.discount_code.clone(),
            lines: cart.lines.clone(),
        })
    }
}

/// Server-priced projection of the draft. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPreview {
    pub store_code: String,
    pub order_method: OrderMethod,
    /// Null when the requested code did not apply.
    #[serde(default)]
    pub discount_code: Option<String>,
    pub subtotal_amount: i64,
    pub discount_amount: i64,
    pub delivery_fee: i64,
    pub total_amount: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub lines: Vec<PricedLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    pub store_code: String,
    pub customer_phone_num: String,
    pub customer_email: Option<String>,
    pub customer_name: String,
    pub message: Option<String>,
    pub order_method: OrderMethod,
    pub destination: String,
    pub discount_code: Option<String>,
    pub status: Option<OrderStatus>,
    pub paid: Option<bool>,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CartLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

impl UpdateOrderRequest {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.paid.is_none() && self.payment_method.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    /// Field name, prefixed with `-` for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_method: Option<OrderMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}
