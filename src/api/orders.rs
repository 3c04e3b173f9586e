use crate::{
    api::ApiClient,
    dto::orders::{OrderCreateRequest, OrderListQuery, OrderPreview, PreviewRequest, UpdateOrderRequest},
    error::{ClientError, ClientResult},
    models::Order,
    response::Page,
};

/// Prices the draft on the server. Works without a session.
pub async fn preview_order(api: &ApiClient, payload: &PreviewRequest) -> ClientResult<OrderPreview> {
    api.post("/orders/preview", None, payload).await
}

/// Guests may order too, so the token is optional.
pub async fn create_order(
    api: &ApiClient,
    token: Option<&str>,
    payload: &OrderCreateRequest,
) -> ClientResult<Order> {
    let order: Order = api.post("/orders", token, payload).await?;
    tracing::info!(order_id = %order.id, total = order.total_amount, "order placed");
    Ok(order)
}

pub async fn list_orders(
    api: &ApiClient,
    token: &str,
    query: &OrderListQuery,
) -> ClientResult<Page<Order>> {
    api.get("/orders", Some(token), query).await
}

pub async fn fetch_order(api: &ApiClient, token: &str, order_id: &str) -> ClientResult<Order> {
    api.get(&format!("/orders/{order_id}"), Some(token), &())
        .await
}

pub async fn update_order(
    api: &ApiClient,
    token: &str,
    order_id: &str,
    payload: &UpdateOrderRequest,
) -> ClientResult<Order> {
    if payload.is_empty() {
        return Err(ClientError::BadRequest("Nothing to update".into()));
    }
    let order: Order = api
        .patch(&format!("/orders/{order_id}"), Some(token), payload)
        .await?;
    tracing::info!(order_id, status = %order.status, paid = order.paid, "order updated");
    Ok(order)
}
