use thiserror::Error;

use crate::{
    api::{self, ApiClient},
    cart::{CartState, CartStore, OrderMethod},
    dto::orders::OrderCreateRequest,
    error::ClientResult,
    models::{Order, PaymentMethod, Role, User},
    preview::{PreviewState, PreviewTracker, discount_warning},
    storage::KeyValueStore,
};

/// Blocking problems found before anything is sent, in the order they are
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Please select a store")]
    MissingStore,
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your phone number")]
    MissingPhone,
    #[error("Please enter delivery address")]
    MissingDestination,
    #[error("Please add items to your order")]
    EmptyCart,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_phone_num: String,
    pub customer_email: String,
    pub message: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Fills contact fields from a logged-in customer. Staff and admins
    /// place orders on behalf of someone else, so theirs are left blank.
    pub fn prefill(&mut self, user: &User) {
        if user.role != Role::Customer {
            return;
        }
        self.customer_name = user.full_name();
        self.customer_phone_num = user.phone_num.clone();
        self.customer_email = user.email.clone().unwrap_or_default();
    }

    pub fn validate(&self, cart: &CartState) -> Result<OrderCreateRequest, CheckoutError> {
        let store_code = cart
            .store_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .ok_or(CheckoutError::MissingStore)?;
        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            return Err(CheckoutError::MissingName);
        }
        let customer_phone_num = self.customer_phone_num.trim();
        if customer_phone_num.is_empty() {
            return Err(CheckoutError::MissingPhone);
        }
        if cart.order_method == OrderMethod::Delivery && cart.destination.trim().is_empty() {
            return Err(CheckoutError::MissingDestination);
        }
        if cart.lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(OrderCreateRequest {
            store_code: store_code.to_string(),
            customer_phone_num: customer_phone_num.to_string(),
            customer_email: non_blank(&self.customer_email),
            customer_name: customer_name.to_string(),
            message: non_blank(&self.message),
            order_method: cart.order_method,
            destination: cart.destination.clone(),
            discount_code: cart.discount_code.clone(),
            status: None,
            paid: None,
            payment_method: self.payment_method,
            lines: cart.lines.clone(),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Prices the draft once more when it carries a discount code and returns
/// the warning to show if the server would not apply that code. A failed
/// preview yields no warning; submitting surfaces the server's error.
pub async fn discount_check(api: &ApiClient, cart: &CartState) -> Option<&'static str> {
    cart.discount_code.as_ref()?;
    let mut tracker = PreviewTracker::new();
    match tracker.refresh(api, cart).await {
        PreviewState::Ready(preview) => discount_warning(cart, preview),
        _ => None,
    }
}

/// Submits the draft. Lines are cleared only once the server has accepted
/// the order; on any failure the draft is left as it was so the user can
/// try again. A retry creates a new order.
pub async fn place_order<S: KeyValueStore>(
    api: &ApiClient,
    token: Option<&str>,
    cart: &mut CartStore<S>,
    form: &CheckoutForm,
) -> ClientResult<Order> {
    let request = form.validate(cart.state())?;
    let order = api::orders::create_order(api, token, &request).await?;
    cart.clear_lines().await?;
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, CartLine};

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            customer_name: "  Lan Nguyen ".into(),
            customer_phone_num: "0901".into(),
            customer_email: "   ".into(),
            message: "".into(),
            payment_method: PaymentMethod::Bank,
        }
    }

    fn ready_cart() -> CartState {
        let mut cart = CartState::new();
        cart.apply(CartAction::SetStore(Some("HCM01".into())));
        cart.apply(CartAction::SetDestination("1 Le Loi".into()));
        cart.apply(CartAction::ReplaceLines(vec![CartLine::new("p1", vec![], vec![], 2)]));
        cart
    }

    #[test]
    fn checks_run_in_order() {
        let empty = CartState::new();
        assert_eq!(
            CheckoutForm::default().validate(&empty),
            Err(CheckoutError::MissingStore)
        );

        let mut cart = CartState::new();
        cart.apply(CartAction::SetStore(Some("HCM01".into())));
        assert_eq!(
            CheckoutForm::default().validate(&cart),
            Err(CheckoutError::MissingName)
        );

        let mut form = filled_form();
        form.customer_phone_num = " ".into();
        assert_eq!(form.validate(&cart), Err(CheckoutError::MissingPhone));

        assert_eq!(
            filled_form().validate(&cart),
            Err(CheckoutError::MissingDestination)
        );

        cart.apply(CartAction::SetMethod(OrderMethod::PickUp));
        assert_eq!(filled_form().validate(&cart), Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn builds_trimmed_request() {
        let request = filled_form().validate(&ready_cart()).expect("valid");
        assert_eq!(request.customer_name, "Lan Nguyen");
        assert_eq!(request.customer_email, None);
        assert_eq!(request.message, None);
        assert_eq!(request.payment_method, PaymentMethod::Bank);
        assert_eq!(request.lines.len(), 1);
        assert_eq!(request.status, None);
    }

    #[test]
    fn prefill_only_for_customers() {
        let mut user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "phoneNum": "0909",
            "email": "lan@example.com",
            "firstName": "Lan",
            "lastName": "Nguyen",
            "role": "CUSTOMER"
        }))
        .expect("user");

        let mut form = CheckoutForm::default();
        form.prefill(&user);
        assert_eq!(form.customer_name, "Lan Nguyen");
        assert_eq!(form.customer_phone_num, "0909");
        assert_eq!(form.customer_email, "lan@example.com");

        user.role = Role::Staff;
        let mut form = CheckoutForm::default();
        form.prefill(&user);
        assert!(form.customer_name.is_empty());
    }
}
