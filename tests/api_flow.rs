mod common;

use fnb_storefront::{
    analytics::RevenueSummary,
    api::{self, ApiClient},
    auth::AuthSession,
    cart::{CartStore, OrderMethod, SelectedOption},
    checkout::{CheckoutError, CheckoutForm, discount_check, place_order},
    dto::{
        auth::LoginRequest,
        orders::UpdateOrderRequest,
    },
    error::ClientError,
    models::{OrderStatus, PaymentMethod},
    preview::{INVALID_DISCOUNT_WARNING, PreviewState, PreviewTracker, discount_warning},
    staff::{self, StaffBoard},
    storage::MemoryStore,
};

use common::{CLOSED_STORE, DELIVERY_FEE, FULFILLED_COUNT, MockBackend, PASSWORD, UNIT_PRICE, VALID_CODE};

fn login_request(password: &str) -> LoginRequest {
    LoginRequest {
        phone_num_or_email: "lan@example.com".into(),
        password: password.into(),
    }
}

async fn ready_cart(store: MemoryStore) -> anyhow::Result<CartStore<MemoryStore>> {
    let mut cart = CartStore::load(store).await?;
    cart.set_store_code(Some("HCM01".into())).await?;
    cart.set_destination("12 Nguyen Hue").await?;
    cart.increase_line_quantity("p-milk-tea", vec![SelectedOption::new("size", "l")], vec![], 2)
        .await?;
    Ok(cart)
}

fn filled_form() -> CheckoutForm {
    CheckoutForm {
        customer_name: "Lan Nguyen".into(),
        customer_phone_num: "0901234567".into(),
        payment_method: PaymentMethod::Cash,
        ..CheckoutForm::default()
    }
}

#[tokio::test]
async fn login_stores_a_usable_session() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    let resp = api::auth::login(&backend.api, &login_request(PASSWORD)).await?;

    let store = MemoryStore::new();
    let mut session = AuthSession::load(store.clone()).await?;
    session.set_token_and_user(&resp.token, resp.user).await?;
    assert!(session.is_authenticated());

    let (token, _) = session.require()?;
    let me = api::users::fetch_current_user(&backend.api, token).await?;
    assert_eq!(me.full_name(), "Lan Nguyen");
    Ok(())
}

#[tokio::test]
async fn server_error_message_reaches_the_user() {
    let backend = MockBackend::start().await;
    let err = api::auth::login(&backend.api, &login_request("wrong"))
        .await
        .expect_err("bad password");

    assert_eq!(err.status(), Some(401));
    assert_eq!(
        err.user_message("Login failed"),
        "Invalid phone number, email or password"
    );
}

#[tokio::test]
async fn blank_credentials_are_rejected_before_sending() {
    let backend = MockBackend::start().await;
    let err = api::auth::login(&backend.api, &login_request(""))
        .await
        .expect_err("blank password");
    assert!(matches!(err, ClientError::BadRequest(_)));
    assert!(backend.recorded().request_ids.is_empty());
}

#[tokio::test]
async fn every_call_carries_a_request_id() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    api::auth::login(&backend.api, &login_request(PASSWORD)).await?;
    api::auth::login(&backend.api, &login_request(PASSWORD)).await?;

    let recorded = backend.recorded();
    assert_eq!(recorded.request_ids.len(), 2);
    assert_ne!(recorded.request_ids[0], recorded.request_ids[1]);
    Ok(())
}

#[tokio::test]
async fn preview_prices_on_the_server_and_flags_bad_codes() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    let mut cart = ready_cart(MemoryStore::new()).await?;
    let mut tracker = PreviewTracker::new();

    let preview = tracker
        .refresh(&backend.api, cart.state())
        .await
        .preview()
        .cloned()
        .expect("priced");
    assert_eq!(preview.subtotal_amount, 2 * UNIT_PRICE);
    assert_eq!(preview.delivery_fee, DELIVERY_FEE);
    assert_eq!(discount_warning(cart.state(), &preview), None);

    cart.apply_discount_input("BOGUS").await?;
    let preview = tracker
        .refresh(&backend.api, cart.state())
        .await
        .preview()
        .cloned()
        .expect("priced");
    assert_eq!(
        discount_warning(cart.state(), &preview),
        Some(INVALID_DISCOUNT_WARNING)
    );
    assert_eq!(cart.discount_code(), Some("BOGUS"));

    cart.apply_discount_input(VALID_CODE).await?;
    cart.set_order_method(OrderMethod::PickUp).await?;
    let preview = tracker
        .refresh(&backend.api, cart.state())
        .await
        .preview()
        .cloned()
        .expect("priced");
    assert_eq!(discount_warning(cart.state(), &preview), None);
    assert_eq!(preview.discount_amount, 2 * UNIT_PRICE / 10);
    assert_eq!(preview.delivery_fee, 0);
    Ok(())
}

#[tokio::test]
async fn preview_failure_is_reported_distinctly() -> anyhow::Result<()> {
    let cart = ready_cart(MemoryStore::new()).await?;
    // Nothing listens on port 9 of localhost.
    let api = ApiClient::new("http://127.0.0.1:9/api")?;
    let mut tracker = PreviewTracker::new();

    let state = tracker.refresh(&api, cart.state()).await;
    assert_eq!(
        state,
        &PreviewState::Failed("Error loading order preview".into())
    );
    Ok(())
}

#[tokio::test]
async fn successful_checkout_clears_only_the_lines() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    let store = MemoryStore::new();
    let mut cart = ready_cart(store.clone()).await?;

    let order = place_order(&backend.api, Some(backend.token.as_str()), &mut cart, &filled_form()).await?;
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(cart.lines().is_empty());
    assert_eq!(cart.state().store_code.as_deref(), Some("HCM01"));

    let reloaded = CartStore::load(store).await?;
    assert!(reloaded.lines().is_empty());

    let recorded = backend.recorded();
    assert_eq!(
        recorded.order_auth,
        vec![Some(format!("Bearer {}", backend.token))]
    );
    let body = &recorded.created_orders[0];
    assert_eq!(body["customerEmail"], serde_json::Value::Null);
    assert_eq!(body["lines"][0]["quantity"], 2);
    Ok(())
}

#[tokio::test]
async fn checkout_warns_about_a_code_the_server_rejects() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    let mut cart = ready_cart(MemoryStore::new()).await?;
    assert_eq!(discount_check(&backend.api, cart.state()).await, None);

    cart.apply_discount_input("BOGUS").await?;
    assert_eq!(
        discount_check(&backend.api, cart.state()).await,
        Some(INVALID_DISCOUNT_WARNING)
    );
    assert_eq!(cart.discount_code(), Some("BOGUS"));

    cart.set_discount_code(Some(VALID_CODE.into())).await?;
    assert_eq!(discount_check(&backend.api, cart.state()).await, None);
    Ok(())
}

#[tokio::test]
async fn guest_checkout_sends_no_authorization() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    let mut cart = ready_cart(MemoryStore::new()).await?;

    place_order(&backend.api, None, &mut cart, &filled_form()).await?;
    assert_eq!(backend.recorded().order_auth, vec![None]);
    Ok(())
}

#[tokio::test]
async fn failed_checkout_keeps_the_draft() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    let mut cart = ready_cart(MemoryStore::new()).await?;
    cart.set_store_code(Some(CLOSED_STORE.into())).await?;
    let before = cart.state().clone();

    let err = place_order(&backend.api, None, &mut cart, &filled_form())
        .await
        .expect_err("closed store");
    assert_eq!(err.user_message("Place order failed"), "Store is closed");
    assert_eq!(cart.state(), &before);
    Ok(())
}

#[tokio::test]
async fn invalid_form_never_reaches_the_server() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    let mut cart = ready_cart(MemoryStore::new()).await?;
    cart.set_destination("   ").await?;

    let err = place_order(&backend.api, None, &mut cart, &filled_form())
        .await
        .expect_err("missing destination");
    assert!(matches!(
        err,
        ClientError::Checkout(CheckoutError::MissingDestination)
    ));
    assert_eq!(err.user_message("Place order failed"), "Please enter delivery address");
    assert!(backend.recorded().created_orders.is_empty());
    assert_eq!(cart.lines().len(), 1);
    Ok(())
}

#[tokio::test]
async fn order_updates_require_the_bearer_token() -> anyhow::Result<()> {
    let backend = MockBackend::start_as("STAFF", Some("HCM01")).await;
    let payload = UpdateOrderRequest {
        status: Some(OrderStatus::Preparing),
        ..UpdateOrderRequest::default()
    };

    let updated = api::orders::update_order(&backend.api, &backend.token, "o-1", &payload).await?;
    assert_eq!(updated.status, OrderStatus::Preparing);

    let err = api::orders::update_order(&backend.api, "stale", "o-1", &payload)
        .await
        .expect_err("bad token");
    assert_eq!(err.status(), Some(401));

    let err = api::orders::update_order(&backend.api, &backend.token, "o-1", &UpdateOrderRequest::default())
        .await
        .expect_err("empty payload");
    assert!(matches!(err, ClientError::BadRequest(_)));

    let recorded = backend.recorded();
    assert_eq!(recorded.order_updates.len(), 1);
    assert_eq!(
        recorded.order_updates[0].1,
        serde_json::json!({ "status": "PREPARING" })
    );
    Ok(())
}

#[tokio::test]
async fn staff_board_groups_and_advances_orders() -> anyhow::Result<()> {
    let backend = MockBackend::start_as("STAFF", Some("HCM01")).await;
    let board = StaffBoard::load(&backend.api, &backend.token, "HCM01").await?;

    let lanes = board.lanes();
    assert_eq!(lanes[0].0, OrderStatus::Pending);
    assert_eq!(lanes[0].1.len(), 2);
    assert_eq!(lanes[1].1.len(), 1);
    assert!(board.unpaid().all(|order| !order.paid));

    {
        let recorded = backend.recorded();
        let sorts: Vec<_> = recorded
            .order_queries
            .iter()
            .map(|q| (q["status"].as_str(), q["sortBy"].as_str(), q["pageSize"].as_str()))
            .collect();
        assert_eq!(
            sorts,
            vec![
                ("PENDING", "createdAt", "50"),
                ("PREPARING", "createdAt", "50"),
                ("FULFILLED", "-createdAt", "50"),
            ]
        );
        assert!(recorded.order_queries.iter().all(|q| q["storeCode"] == "HCM01"));
    }

    let advanced = staff::advance_order(&backend.api, &backend.token, &board.pending[0]).await?;
    assert_eq!(advanced.map(|o| o.status), Some(OrderStatus::Preparing));

    let done = &board.fulfilled[0];
    assert_eq!(staff::advance_order(&backend.api, &backend.token, done).await?, None);

    let paid = staff::mark_paid(&backend.api, &backend.token, "o-9", PaymentMethod::Bank).await?;
    assert!(paid.paid);
    assert_eq!(
        backend.recorded().order_updates.last().map(|(_, body)| body.clone()),
        Some(serde_json::json!({ "paid": true, "paymentMethod": "BANK" }))
    );
    Ok(())
}

#[tokio::test]
async fn revenue_sums_every_fulfilled_order() -> anyhow::Result<()> {
    let backend = MockBackend::start_as("ADMIN", None).await;
    let summary = RevenueSummary::load(&backend.api, &backend.token).await?;

    assert_eq!(summary.total_orders, FULFILLED_COUNT);
    assert_eq!(summary.total_revenue, FULFILLED_COUNT * 10_000);

    let recorded = backend.recorded();
    let sizes: Vec<_> = recorded
        .order_queries
        .iter()
        .map(|q| q["pageSize"].clone())
        .collect();
    assert_eq!(sizes, vec!["10".to_string(), FULFILLED_COUNT.to_string()]);
    Ok(())
}

#[tokio::test]
async fn upload_rejects_non_images_locally() {
    let backend = MockBackend::start_as("ADMIN", None).await;
    let err = api::storage::upload_image(
        &backend.api,
        &backend.token,
        "notes.txt",
        "text/plain",
        b"hello".to_vec(),
    )
    .await
    .expect_err("not an image");
    assert_eq!(err.user_message("Upload failed"), "File is not image");
    assert_eq!(api::storage::guess_image_type("Logo.PNG"), Some("image/png"));
}

#[tokio::test]
async fn product_lookup_exposes_default_selections() -> anyhow::Result<()> {
    let backend = MockBackend::start().await;
    let product = api::products::fetch_product_by_slug(&backend.api, "milk-tea").await?;

    assert_eq!(product.default_selections(), vec![SelectedOption::new("size", "m")]);
    assert!(product.is_available_at("HCM01"));
    assert!(!product.is_available_at("HN02"));

    let err = api::products::fetch_product_by_slug(&backend.api, "nope")
        .await
        .expect_err("missing");
    assert_eq!(err.status(), Some(404));
    Ok(())
}
