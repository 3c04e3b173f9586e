mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fnb_storefront::config::ClientConfig;

use commands::{
    Context,
    account::{self, LoginArgs, ProfileArgs, RegisterArgs},
    admin::{self, AdminCommand},
    cart::{self, CartCommand, CheckoutArgs},
    menu::{self, MenuArgs},
    orders::{self, OrdersCommand, StaffCommand},
};

#[derive(Debug, Parser)]
#[command(name = "fnb", version, about = "Order food and drinks, or run the store, from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout,
    Whoami,
    /// Update your name or avatar
    Profile(ProfileArgs),
    /// List stores
    Stores,
    /// Browse products
    Menu(MenuArgs),
    /// Show one product with its options and toppings
    Product { slug: String },
    #[command(subcommand)]
    Cart(CartCommand),
    /// Place the order in your cart
    Checkout(CheckoutArgs),
    #[command(subcommand)]
    Orders(OrdersCommand),
    #[command(subcommand)]
    Staff(StaffCommand),
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,fnb_storefront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let ctx = Context::from_config(&config).await?;
    tracing::debug!(api = %ctx.api.base_url(), "client ready");

    match cli.command {
        Command::Login(args) => account::login(&ctx, args).await,
        Command::Register(args) => account::register(&ctx, args).await,
        Command::Logout => account::logout(&ctx).await,
        Command::Whoami => account::whoami(&ctx).await,
        Command::Profile(args) => account::profile(&ctx, args).await,
        Command::Stores => menu::stores(&ctx).await,
        Command::Menu(args) => menu::menu(&ctx, args).await,
        Command::Product { slug } => menu::product(&ctx, &slug).await,
        Command::Cart(command) => cart::run(&ctx, command).await,
        Command::Checkout(args) => cart::checkout(&ctx, args).await,
        Command::Orders(command) => orders::run(&ctx, command).await,
        Command::Staff(command) => orders::staff(&ctx, command).await,
        Command::Admin(command) => admin::run(&ctx, command).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn discount_is_a_per_invocation_flag() {
        let cli = Cli::try_parse_from(["fnb", "checkout", "--discount", "SAVE10", "--payment", "bank"])
            .expect("parses");
        let Command::Checkout(args) = cli.command else {
            panic!("expected checkout");
        };
        assert_eq!(args.discount.discount.as_deref(), Some("SAVE10"));
    }

    #[test]
    fn quantity_must_be_at_least_one() {
        assert!(Cli::try_parse_from(["fnb", "cart", "add", "milk-tea", "--quantity", "0"]).is_err());

        let cli = Cli::try_parse_from(["fnb", "cart", "add", "milk-tea"]).expect("parses");
        let Command::Cart(CartCommand::Add(args)) = cli.command else {
            panic!("expected cart add");
        };
        assert_eq!(args.quantity, 1);
    }
}
