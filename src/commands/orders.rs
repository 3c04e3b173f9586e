use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use fnb_storefront::{
    api,
    auth::{ensure_order_manager, staff_store_code},
    dto::orders::{OrderListQuery, UpdateOrderRequest},
    format::uppercase_first_letter,
    response::Pagination,
    staff::{self, StaffBoard},
};

use super::{Context, MethodArg, PaymentArg, StatusArg, print_order_detail, print_order_summary};

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    List(ListArgs),
    Show { id: String },
    /// Change status or payment (staff and admins)
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub store: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,
    #[arg(long, default_value = "-createdAt")]
    pub sort_by: String,
    #[arg(long)]
    pub page: Option<i64>,
    #[arg(long)]
    pub size: Option<i64>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    #[arg(long)]
    pub paid: Option<bool>,
    #[arg(long, value_enum)]
    pub payment: Option<PaymentArg>,
}

#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    /// Open orders of your store, by status
    Board,
    /// Move an order to its next status
    Advance { id: String },
    /// Record payment for an order
    Pay {
        id: String,
        #[arg(long, value_enum, default_value = "cash")]
        payment: PaymentArg,
    },
}

pub async fn run(ctx: &Context, command: OrdersCommand) -> Result<()> {
    let (token, user) = ctx.require_login().await?;
    match command {
        OrdersCommand::List(args) => {
            let (page_number, page_size) = Pagination {
                page_number: args.page,
                page_size: args.size,
            }
            .normalize();
            let query = OrderListQuery {
                page_number: Some(page_number),
                page_size: Some(page_size),
                sort_by: Some(args.sort_by),
                search_key: args.search,
                store_code: args.store,
                order_method: args.method.map(Into::into),
                status: args.status.map(Into::into),
            };
            let page = api::orders::list_orders(&ctx.api, &token, &query).await?;
            if page.content.is_empty() {
                println!("No orders found.");
            }
            for order in &page.content {
                print_order_summary(order);
            }
            if !page.is_last() {
                println!("-- more on page {}", page.number + 2);
            }
        }
        OrdersCommand::Show { id } => match api::orders::fetch_order(&ctx.api, &token, &id).await {
            Ok(order) => print_order_detail(&order),
            Err(err) => bail!(err.user_message("Order not found")),
        },
        OrdersCommand::Update(args) => {
            ensure_order_manager(&user)?;
            let payload = UpdateOrderRequest {
                status: args.status.map(Into::into),
                paid: args.paid,
                payment_method: args.payment.map(Into::into),
            };
            match api::orders::update_order(&ctx.api, &token, &args.id, &payload).await {
                Ok(order) => print_order_summary(&order),
                Err(err) => bail!(err.user_message("Update order failed")),
            }
        }
    }
    Ok(())
}

pub async fn staff(ctx: &Context, command: StaffCommand) -> Result<()> {
    let (token, user) = ctx.require_login().await?;
    ensure_order_manager(&user)?;
    match command {
        StaffCommand::Board => {
            let store_code = staff_store_code(&user)?;
            let board = StaffBoard::load(&ctx.api, &token, store_code).await?;
            for (status, orders) in board.lanes() {
                println!("== {} ({})", uppercase_first_letter(status.as_str()), orders.len());
                for order in orders {
                    print_order_summary(order);
                }
            }
            let unpaid = board.unpaid().count();
            if unpaid > 0 {
                println!("{unpaid} order(s) awaiting payment");
            }
        }
        StaffCommand::Advance { id } => {
            let order = api::orders::fetch_order(&ctx.api, &token, &id).await?;
            match staff::advance_order(&ctx.api, &token, &order).await {
                Ok(Some(order)) => print_order_summary(&order),
                Ok(None) => bail!("Order is already {}", order.status.as_str().to_lowercase()),
                Err(err) => bail!(err.user_message("Update order failed")),
            }
        }
        StaffCommand::Pay { id, payment } => {
            match staff::mark_paid(&ctx.api, &token, &id, payment.into()).await {
                Ok(order) => print_order_summary(&order),
                Err(err) => bail!(err.user_message("Update order failed")),
            }
        }
    }
    Ok(())
}
