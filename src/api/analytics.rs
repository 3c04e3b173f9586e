use crate::{
    api::ApiClient,
    error::ClientResult,
    models::AnalyticsEvent,
    response::{Page, Pagination},
};

pub async fn list_events(
    api: &ApiClient,
    token: &str,
    pagination: &Pagination,
) -> ClientResult<Page<AnalyticsEvent>> {
    api.get("/analytics/events", Some(token), pagination).await
}
