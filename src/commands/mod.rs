pub mod account;
pub mod admin;
pub mod cart;
pub mod menu;
pub mod orders;

use anyhow::{Context as _, Result};
use clap::ValueEnum;

use fnb_storefront::{
    api::ApiClient,
    auth::AuthSession,
    cart::{CartStore, OrderMethod},
    config::ClientConfig,
    format::{format_date_time, format_vnd, uppercase_first_letter},
    models::{Order, OrderStatus, PaymentMethod, User},
    storage::SqliteStore,
};

/// What every command needs: the API and the local store behind the
/// session and the cart.
pub struct Context {
    pub api: ApiClient,
    pub storage: SqliteStore,
}

impl Context {
    pub async fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = ApiClient::from_config(config)?;
        let storage = SqliteStore::connect(&config.storage_url)
            .await
            .with_context(|| format!("opening local storage at {}", config.storage_url))?;
        Ok(Self { api, storage })
    }

    pub async fn session(&self) -> Result<AuthSession<SqliteStore>> {
        Ok(AuthSession::load(self.storage.clone()).await?)
    }

    pub async fn cart(&self) -> Result<CartStore<SqliteStore>> {
        Ok(CartStore::load(self.storage.clone()).await?)
    }

    /// Token and user of a live session, or a hint to log in.
    pub async fn require_login(&self) -> Result<(String, User)> {
        let session = self.session().await?;
        match session.require() {
            Ok((token, user)) => Ok((token.to_string(), user.clone())),
            Err(_) => anyhow::bail!("You are not logged in (or your session expired). Run `fnb login`."),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    PickUp,
    Delivery,
}

impl From<MethodArg> for OrderMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::PickUp => OrderMethod::PickUp,
            MethodArg::Delivery => OrderMethod::Delivery,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentArg {
    Cash,
    CreditCard,
    Bank,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(value: PaymentArg) -> Self {
        match value {
            PaymentArg::Cash => PaymentMethod::Cash,
            PaymentArg::CreditCard => PaymentMethod::CreditCard,
            PaymentArg::Bank => PaymentMethod::Bank,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Preparing,
    Fulfilled,
    Canceled,
}

impl From<StatusArg> for OrderStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => OrderStatus::Pending,
            StatusArg::Preparing => OrderStatus::Preparing,
            StatusArg::Fulfilled => OrderStatus::Fulfilled,
            StatusArg::Canceled => OrderStatus::Canceled,
        }
    }
}

pub fn money(amount: i64) -> String {
    format!("{}đ", format_vnd(amount))
}

pub fn print_order_summary(order: &Order) {
    let short_id: String = order.id.chars().take(8).collect();
    println!(
        "#{short_id}  {:<10} {:<9} {:>12}  {}  {}  {}",
        uppercase_first_letter(order.status.as_str()),
        uppercase_first_letter(&order.order_method.as_str().replace('_', " ")),
        money(order.total_amount),
        if order.paid { "paid" } else { "unpaid" },
        order.customer_name,
        format_date_time(&order.created_at),
    );
}

pub fn print_order_detail(order: &Order) {
    println!("Order {}", order.id);
    println!("  Store:    {}", order.store_code);
    println!("  Status:   {}", uppercase_first_letter(order.status.as_str()));
    println!("  Customer: {} ({})", order.customer_name, order.customer_phone_num);
    if let Some(email) = &order.customer_email {
        println!("  Email:    {email}");
    }
    println!("  Method:   {}", order.order_method);
    if !order.destination.is_empty() {
        println!("  Deliver:  {}", order.destination);
    }
    if let Some(message) = &order.message {
        println!("  Note:     {message}");
    }
    println!("  Placed:   {}", format_date_time(&order.created_at));
    println!();
    for line in &order.lines {
        println!(
            "  {} x{:<3} {:>12}",
            line.product_name,
            line.quantity,
            money(line.line_amount)
        );
        for option in &line.selected_options {
            println!("      {}: {}", option.name, option.selection);
        }
        for topping in &line.selected_toppings {
            println!("      + {}", topping.name);
        }
    }
    println!();
    println!("  Subtotal  {:>12}", money(order.subtotal_amount));
    if order.discount_amount > 0 {
        println!(
            "  Discount  {:>12}  ({})",
            format!("-{}", money(order.discount_amount)),
            order.discount_code.as_deref().unwrap_or("-")
        );
    }
    println!("  Delivery  {:>12}", money(order.delivery_fee));
    println!("  Total     {:>12}", money(order.total_amount));
    println!(
        "  Payment   {} ({})",
        order.payment_method.as_str(),
        if order.paid { "paid" } else { "unpaid" }
    );
}
