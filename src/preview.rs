//! Server-side pricing of the order draft.
//!
//! The client never computes money. Every change to the store, method,
//! destination, discount code or lines produces a new request, and only the
//! response to the most recent request is ever shown.

use crate::{
    api::{self, ApiClient},
    cart::CartState,
    dto::orders::{OrderPreview, PreviewRequest},
    error::ClientResult,
};

pub const INVALID_DISCOUNT_WARNING: &str = "This code is invalid and will not be applied";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    NoStore,
    NoLines,
}

impl IdleReason {
    pub fn message(&self) -> &'static str {
        match self {
            IdleReason::NoStore => "Select a store to continue",
            IdleReason::NoLines => "Add an item to continue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    /// Nothing to price yet.
    Idle(IdleReason),
    Loading,
    Ready(OrderPreview),
    Failed(String),
}

impl PreviewState {
    pub fn preview(&self) -> Option<&OrderPreview> {
        match self {
            PreviewState::Ready(preview) => Some(preview),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreviewTicket {
    generation: u64,
    request: PreviewRequest,
}

impl PreviewTicket {
    pub fn request(&self) -> &PreviewRequest {
        &self.request
    }
}

#[derive(Debug)]
pub struct PreviewTracker {
    generation: u64,
    last_request: Option<PreviewRequest>,
    state: PreviewState,
}

impl Default for PreviewTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewTracker {
    pub fn new() -> Self {
        Self {
            generation: 0,
            last_request: None,
            state: PreviewState::Idle(IdleReason::NoStore),
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// Starts a request if the draft changed since the last one (or the last
    /// one failed). Any ticket issued earlier becomes stale.
    pub fn begin(&mut self, cart: &CartState) -> Option<PreviewTicket> {
        let Some(request) = PreviewRequest::from_cart(cart) else {
            let reason = if cart.store_code.is_none() {
                IdleReason::NoStore
            } else {
                IdleReason::NoLines
            };
            self.generation += 1;
            self.last_request = None;
            self.state = PreviewState::Idle(reason);
            return None;
        };

        let unchanged = self.last_request.as_ref() == Some(&request);
        if unchanged && !matches!(self.state, PreviewState::Failed(_)) {
            return None;
        }

        self.generation += 1;
        self.last_request = Some(request.clone());
        self.state = PreviewState::Loading;
        Some(PreviewTicket {
            generation: self.generation,
            request,
        })
    }

    /// Records the outcome of `ticket`. Returns `false`, leaving the state
    /// alone, when a newer request has been started since.
    pub fn complete(&mut self, ticket: PreviewTicket, result: ClientResult<OrderPreview>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "discarding superseded preview"
            );
            return false;
        }
        self.state = match result {
            Ok(preview) => PreviewState::Ready(preview),
            Err(err) => {
                tracing::warn!(error = %err, "order preview failed");
                PreviewState::Failed(err.user_message("Error loading order preview"))
            }
        };
        true
    }

    pub async fn refresh(&mut self, api: &ApiClient, cart: &CartState) -> &PreviewState {
        if let Some(ticket) = self.begin(cart) {
            let result = api::orders::preview_order(api, ticket.request()).await;
            self.complete(ticket, result);
        }
        &self.state
    }
}

/// Warns when the draft carries a discount code the server did not apply.
/// The code stays in the draft; the user decides whether to remove it.
pub fn discount_warning(cart: &CartState, preview: &OrderPreview) -> Option<&'static str> {
    match (&cart.discount_code, &preview.discount_code) {
        (Some(_), None) => Some(INVALID_DISCOUNT_WARNING),
        _ => None,
    }
}
