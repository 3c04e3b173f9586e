use super::{
    line::{CartLine, SelectedOption},
    persist::CartPersistence,
    state::{CartAction, CartState, OrderMethod},
};
use crate::{
    error::{ClientError, ClientResult},
    storage::KeyValueStore,
};

/// The session's order draft: state transitions from [`CartState::apply`],
/// followed by a write of whatever field changed.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    persistence: CartPersistence<S>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Rehydrates the draft saved by a previous session.
    pub async fn load(store: S) -> ClientResult<Self> {
        let persistence = CartPersistence::new(store);
        let state = persistence.load().await?;
        tracing::debug!(
            lines = state.lines.len(),
            store_code = state.store_code.as_deref().unwrap_or("-"),
            "cart loaded"
        );
        Ok(Self { state, persistence })
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.state.lines
    }

    pub fn discount_code(&self) -> Option<&str> {
        self.state.discount_code.as_deref()
    }

    pub fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    pub async fn dispatch(&mut self, action: CartAction) -> ClientResult<()> {
        if let Some(field) = self.state.apply(action) {
            self.persistence.save(&self.state, field).await?;
        }
        Ok(())
    }

    /// Adds `amount` to the matching line, or appends a new one. Fails with
    /// `BadRequest` when the line's quantity would overflow, leaving the cart
    /// as it was.
    pub async fn increase_line_quantity(
        &mut self,
        product_id: impl Into<String>,
        selected_options: Vec<SelectedOption>,
        selected_topping_ids: Vec<String>,
        amount: u32,
    ) -> ClientResult<()> {
        let product_id = product_id.into();
        let current = self
            .state
            .find_line(&product_id, &selected_options, &selected_topping_ids)
            .map(|index| self.state.lines[index].quantity);
        if let Some(quantity) = current
            && quantity.checked_add(amount).is_none()
        {
            return Err(ClientError::BadRequest("Quantity too large".into()));
        }
        self.dispatch(CartAction::IncreaseLine {
            product_id,
            selected_options,
            selected_topping_ids,
            amount,
        })
        .await
    }

    pub async fn decrease_line_quantity(
        &mut self,
        product_id: impl Into<String>,
        selected_options: Vec<SelectedOption>,
        selected_topping_ids: Vec<String>,
    ) -> ClientResult<()> {
        self.dispatch(CartAction::DecreaseLine {
            product_id: product_id.into(),
            selected_options,
            selected_topping_ids,
        })
        .await
    }

    pub async fn set_store_code(&mut self, code: Option<String>) -> ClientResult<()> {
        self.dispatch(CartAction::SetStore(code)).await
    }

    pub async fn set_order_method(&mut self, method: OrderMethod) -> ClientResult<()> {
        self.dispatch(CartAction::SetMethod(method)).await
    }

    pub async fn set_destination(&mut self, destination: impl Into<String>) -> ClientResult<()> {
        self.dispatch(CartAction::SetDestination(destination.into()))
            .await
    }

    pub async fn set_discount_code(&mut self, code: Option<String>) -> ClientResult<()> {
        self.dispatch(CartAction::SetDiscount(code)).await
    }

    /// Applies a code typed by the user. Blank input leaves the current code
    /// untouched.
    pub async fn apply_discount_input(&mut self, input: &str) -> ClientResult<()> {
        let code = input.trim();
        if code.is_empty() {
            return Ok(());
        }
        self.set_discount_code(Some(code.to_string())).await
    }

    pub async fn set_lines(&mut self, lines: Vec<CartLine>) -> ClientResult<()> {
        self.dispatch(CartAction::ReplaceLines(lines)).await
    }

    pub async fn clear_lines(&mut self) -> ClientResult<()> {
        self.dispatch(CartAction::ClearLines).await
    }
}
