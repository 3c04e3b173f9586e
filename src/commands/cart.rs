use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use fnb_storefront::{
    api,
    cart::{CartStore, SelectedOption},
    checkout::{CheckoutForm, discount_check, place_order},
    preview::{PreviewState, PreviewTracker, discount_warning},
    storage::SqliteStore,
};

use super::{Context, MethodArg, PaymentArg, money, print_order_detail};

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the draft priced by the server
    Show(DiscountArg),
    /// Add a product by slug
    Add(AddArgs),
    /// Take one off the line at INDEX (as numbered by `cart show`)
    Remove {
        index: usize,
        /// Drop the whole line
        #[arg(long)]
        all: bool,
    },
    /// Remove every line
    Clear,
    /// Select the store to order from
    Store { code: String },
    Method {
        #[arg(value_enum)]
        method: MethodArg,
    },
    Destination { address: String },
}

#[derive(Debug, Args)]
pub struct DiscountArg {
    /// Discount code, applied for this invocation only
    #[arg(long)]
    pub discount: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub slug: String,
    /// OPTION_ID=SELECTION_ID; options left out get their first selection
    #[arg(long = "option", value_parser = parse_selected_option)]
    pub options: Vec<SelectedOption>,
    #[arg(long = "topping")]
    pub toppings: Vec<String>,
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: u32,
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long, value_enum, default_value = "cash")]
    pub payment: PaymentArg,
    #[command(flatten)]
    pub discount: DiscountArg,
}

fn parse_selected_option(raw: &str) -> Result<SelectedOption, String> {
    match raw.split_once('=') {
        Some((option_id, selection_id)) if !option_id.is_empty() && !selection_id.is_empty() => {
            Ok(SelectedOption::new(option_id, selection_id))
        }
        _ => Err(format!("expected OPTION_ID=SELECTION_ID, got `{raw}`")),
    }
}

pub async fn run(ctx: &Context, command: CartCommand) -> Result<()> {
    let mut cart = ctx.cart().await?;
    match command {
        CartCommand::Show(discount) => {
            if let Some(code) = discount.discount {
                cart.apply_discount_input(&code).await?;
            }
            show(ctx, &cart).await?;
        }
        CartCommand::Add(args) => {
            let product = match api::products::fetch_product_by_slug(&ctx.api, &args.slug).await {
                Ok(product) => product,
                Err(err) => bail!(err.user_message("Product not found")),
            };
            if let Some(code) = cart.state().store_code.as_deref()
                && !product.is_available_at(code)
            {
                bail!("{} is not available at {code}", product.name);
            }
            let mut options = product.default_selections();
            for chosen in args.options {
                match options.iter_mut().find(|o| o.option_id == chosen.option_id) {
                    Some(slot) => *slot = chosen,
                    None => bail!("{} has no option {}", product.name, chosen.option_id),
                }
            }
            cart.increase_line_quantity(&product.id, options, args.toppings, args.quantity)
                .await?;
            println!("Added {} x{}", product.name, args.quantity);
        }
        CartCommand::Remove { index, all } => {
            let Some(line) = index
                .checked_sub(1)
                .and_then(|i| cart.lines().get(i))
                .cloned()
            else {
                bail!("No line #{index} in the cart");
            };
            if all {
                let lines = cart
                    .lines()
                    .iter()
                    .filter(|other| !other.same_configuration(&line))
                    .cloned()
                    .collect();
                cart.set_lines(lines).await?;
            } else {
                cart.decrease_line_quantity(
                    line.product_id,
                    line.selected_options,
                    line.selected_topping_ids,
                )
                .await?;
            }
        }
        CartCommand::Clear => {
            cart.clear_lines().await?;
            println!("Cart cleared.");
        }
        CartCommand::Store { code } => {
            let stores = api::catalog::list_stores(&ctx.api).await?;
            if !stores.iter().any(|store| store.code == code) {
                bail!("Unknown store {code}");
            }
            cart.set_store_code(Some(code)).await?;
        }
        CartCommand::Method { method } => cart.set_order_method(method.into()).await?,
        CartCommand::Destination { address } => cart.set_destination(address.trim()).await?,
    }
    Ok(())
}

async fn show(ctx: &Context, cart: &CartStore<SqliteStore>) -> Result<()> {
    let state = cart.state();
    println!(
        "Store: {}   Method: {}",
        state.store_code.as_deref().unwrap_or("(none)"),
        state.order_method
    );
    if !state.destination.is_empty() {
        println!("Deliver to: {}", state.destination);
    }

    let mut tracker = PreviewTracker::new();
    match tracker.refresh(&ctx.api, state).await {
        PreviewState::Idle(reason) => {
            for (i, line) in state.lines.iter().enumerate() {
                println!("{:>3}. {} x{}", i + 1, line.product_id, line.quantity);
            }
            println!("{}", reason.message());
        }
        PreviewState::Loading => {}
        PreviewState::Failed(message) => bail!("{message}"),
        PreviewState::Ready(preview) => {
            for (i, line) in preview.lines.iter().enumerate() {
                println!(
                    "{:>3}. {} x{:<3} {:>12}",
                    i + 1,
                    line.product_name,
                    line.quantity,
                    money(line.line_amount)
                );
                for option in &line.selected_options {
                    println!("       {}: {}", option.name, option.selection);
                }
                for topping in &line.selected_toppings {
                    println!("       + {}", topping.name);
                }
            }
            println!();
            println!("  Subtotal  {:>12}", money(preview.subtotal_amount));
            if preview.discount_amount > 0 {
                println!(
                    "  Discount  {:>12}",
                    format!("-{}", money(preview.discount_amount))
                );
            }
            println!("  Delivery  {:>12}", money(preview.delivery_fee));
            println!("  Total     {:>12}", money(preview.total_amount));
            if let Some(warning) = discount_warning(state, preview) {
                println!("! {warning}");
            }
        }
    }
    Ok(())
}

pub async fn checkout(ctx: &Context, args: CheckoutArgs) -> Result<()> {
    let mut cart = ctx.cart().await?;
    if let Some(code) = args.discount.discount {
        cart.apply_discount_input(&code).await?;
    }

    let session = ctx.session().await?;
    let mut form = CheckoutForm {
        payment_method: args.payment.into(),
        ..CheckoutForm::default()
    };
    if let Some(user) = session.current_user() {
        form.prefill(user);
    }
    if let Some(name) = args.name {
        form.customer_name = name;
    }
    if let Some(phone) = args.phone {
        form.customer_phone_num = phone;
    }
    if let Some(email) = args.email {
        form.customer_email = email;
    }
    form.message = args.message.unwrap_or_default();

    if let Some(warning) = discount_check(&ctx.api, cart.state()).await {
        println!("! {warning}");
    }

    let token = session.require().ok().map(|(token, _)| token);
    match place_order(&ctx.api, token, &mut cart, &form).await {
        Ok(order) => {
            println!("Order placed!");
            print_order_detail(&order);
            Ok(())
        }
        Err(err) => bail!(err.user_message("Place order failed")),
    }
}
