use crate::{
    api::{self, ApiClient},
    dto::orders::OrderListQuery,
    error::ClientResult,
    models::OrderStatus,
};

const PROBE_PAGE_SIZE: i64 = 10;

/// Totals over fulfilled orders. Amounts are the server's `totalAmount`s,
/// only summed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevenueSummary {
    pub total_orders: i64,
    pub total_revenue: i64,
}

impl RevenueSummary {
    pub async fn load(api: &ApiClient, token: &str) -> ClientResult<Self> {
        let probe = api::orders::list_orders(api, token, &fulfilled_query(PROBE_PAGE_SIZE)).await?;
        let total_orders = probe.total_elements;

        let orders = if total_orders <= PROBE_PAGE_SIZE {
            probe.content
        } else {
            api::orders::list_orders(api, token, &fulfilled_query(total_orders))
                .await?
                .content
        };

        let total_revenue = orders.iter().map(|order| order.total_amount).sum();
        Ok(Self {
            total_orders,
            total_revenue,
        })
    }
}

fn fulfilled_query(page_size: i64) -> OrderListQuery {
    OrderListQuery {
        page_number: Some(0),
        page_size: Some(page_size),
        sort_by: Some("-createdAt".to_string()),
        status: Some(OrderStatus::Fulfilled),
        ..OrderListQuery::default()
    }
}
