use crate::{
    api::{self, ApiClient},
    dto::orders::{OrderListQuery, UpdateOrderRequest},
    error::ClientResult,
    models::{Order, OrderStatus, PaymentMethod},
};

pub const LANE_PAGE_SIZE: i64 = 50;

/// Open orders of one store, grouped the way the kitchen works through them.
#[derive(Debug, Clone, Default)]
pub struct StaffBoard {
    pub store_code: String,
    pub pending: Vec<Order>,
    pub preparing: Vec<Order>,
    pub fulfilled: Vec<Order>,
}

impl StaffBoard {
    pub async fn load(api: &ApiClient, token: &str, store_code: &str) -> ClientResult<Self> {
        let pending = fetch_lane(api, token, store_code, OrderStatus::Pending, "createdAt").await?;
        let preparing =
            fetch_lane(api, token, store_code, OrderStatus::Preparing, "createdAt").await?;
        let fulfilled =
            fetch_lane(api, token, store_code, OrderStatus::Fulfilled, "-createdAt").await?;
        tracing::debug!(
            store_code,
            pending = pending.len(),
            preparing = preparing.len(),
            fulfilled = fulfilled.len(),
            "staff board loaded"
        );
        Ok(Self {
            store_code: store_code.to_string(),
            pending,
            preparing,
            fulfilled,
        })
    }

    pub fn lanes(&self) -> [(OrderStatus, &[Order]); 3] {
        [
            (OrderStatus::Pending, self.pending.as_slice()),
            (OrderStatus::Preparing, self.preparing.as_slice()),
            (OrderStatus::Fulfilled, self.fulfilled.as_slice()),
        ]
    }

    pub fn unpaid(&self) -> impl Iterator<Item = &Order> {
        self.pending
            .iter()
            .chain(&self.preparing)
            .chain(&self.fulfilled)
            .filter(|order| !order.paid)
    }
}

async fn fetch_lane(
    api: &ApiClient,
    token: &str,
    store_code: &str,
    status: OrderStatus,
    sort_by: &str,
) -> ClientResult<Vec<Order>> {
    let query = OrderListQuery {
        page_size: Some(LANE_PAGE_SIZE),
        sort_by: Some(sort_by.to_string()),
        store_code: Some(store_code.to_string()),
        status: Some(status),
        ..OrderListQuery::default()
    };
    Ok(api::orders::list_orders(api, token, &query).await?.content)
}

/// The status an order moves to next, if it has one.
pub fn next_status(status: OrderStatus) -> Option<OrderStatus> {
    match status {
        OrderStatus::Pending => Some(OrderStatus::Preparing),
        OrderStatus::Preparing => Some(OrderStatus::Fulfilled),
        OrderStatus::Fulfilled | OrderStatus::Canceled => None,
    }
}

pub async fn advance_order(api: &ApiClient, token: &str, order: &Order) -> ClientResult<Option<Order>> {
    let Some(status) = next_status(order.status) else {
        return Ok(None);
    };
    let payload = UpdateOrderRequest {
        status: Some(status),
        ..UpdateOrderRequest::default()
    };
    api::orders::update_order(api, token, &order.id, &payload)
        .await
        .map(Some)
}

pub async fn mark_paid(
    api: &ApiClient,
    token: &str,
    order_id: &str,
    payment_method: PaymentMethod,
) -> ClientResult<Order> {
    let payload = UpdateOrderRequest {
        paid: Some(true),
        payment_method: Some(payment_method),
        ..UpdateOrderRequest::default()
    };
    api::orders::update_order(api, token, order_id, &payload).await
}
