use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand, ValueEnum};

use fnb_storefront::{
    analytics::RevenueSummary,
    api,
    auth::ensure_admin,
    dto::{
        catalog::{CreateCategoryRequest, CreateDiscountRequest, CreateStoreRequest, UpdateStoreRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        users::UserListQuery,
    },
    format::{format_date_time, uppercase_first_letter},
    response::Pagination,
};

use super::{Context, money};

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Fulfilled order count and revenue
    Analytics,
    /// Audit trail recorded by the backend
    Events(PageArgs),
    #[command(subcommand)]
    Discounts(DiscountCommand),
    #[command(subcommand)]
    Categories(CategoryCommand),
    #[command(subcommand)]
    Stores(StoreCommand),
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Products(ProductCommand),
    /// Mark a product (un)available at a store
    Availability {
        product_id: String,
        #[arg(long)]
        store: String,
        #[arg(long, action = clap::ArgAction::Set)]
        available: bool,
    },
    /// Upload an image and print its URL
    Upload { path: PathBuf },
}

#[derive(Debug, Args)]
pub struct PageArgs {
    #[arg(long)]
    pub page: Option<i64>,
    #[arg(long)]
    pub size: Option<i64>,
}

impl PageArgs {
    fn pagination(&self) -> Pagination {
        let (page_number, page_size) = Pagination {
            page_number: self.page,
            page_size: self.size,
        }
        .normalize();
        Pagination::new(page_number, page_size)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DiscountKind {
    Fixed,
    Percentage,
}

#[derive(Debug, Subcommand)]
pub enum DiscountCommand {
    List(PageArgs),
    Create {
        code: String,
        #[arg(long, value_enum)]
        kind: DiscountKind,
        /// Amount in VND for fixed codes, percent (e.g. 20) for percentage codes
        #[arg(long)]
        value: f64,
        #[arg(long)]
        max_amount: Option<i64>,
        #[arg(long)]
        min_price: Option<i64>,
        /// RFC 3339 timestamp
        #[arg(long)]
        expires_at: Option<DateTime<Utc>>,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    List,
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    Create {
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        address: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Make a user staff of a store
    AssignStaff {
        user_id: String,
        #[arg(long)]
        store: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Create from a JSON file shaped like the create payload
    Create { file: PathBuf },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        category: Option<String>,
    },
    Delete { id: String },
}

pub async fn run(ctx: &Context, command: AdminCommand) -> Result<()> {
    let (token, user) = ctx.require_login().await?;
    ensure_admin(&user)?;
    let token = token.as_str();

    match command {
        AdminCommand::Analytics => {
            let summary = RevenueSummary::load(&ctx.api, token).await?;
            println!("Fulfilled orders: {}", summary.total_orders);
            println!("Revenue:          {}", money(summary.total_revenue));
        }
        AdminCommand::Events(page) => {
            let events = api::analytics::list_events(&ctx.api, token, &page.pagination()).await?;
            for event in &events.content {
                println!(
                    "{}  {:<28} {}",
                    format_date_time(&event.occurred_at),
                    event.title,
                    event.description.as_deref().unwrap_or("")
                );
            }
            println!("-- page {} of {}", events.number + 1, events.total_pages.max(1));
        }
        AdminCommand::Discounts(command) => discounts(ctx, token, command).await?,
        AdminCommand::Categories(command) => match command {
            CategoryCommand::List => {
                for category in api::catalog::list_categories(&ctx.api).await? {
                    println!("{:<24} {} [{}]", category.slug, category.name, category.id);
                    for child in &category.children {
                        println!("  {:<22} {} [{}]", child.slug, child.name, child.id);
                    }
                }
            }
            CategoryCommand::Create { name, description } => {
                let payload = CreateCategoryRequest { name, description };
                let category = api::catalog::create_category(&ctx.api, token, &payload).await?;
                println!("Created category {} [{}]", category.name, category.id);
            }
        },
        AdminCommand::Stores(command) => match command {
            StoreCommand::Create {
                code,
                name,
                phone,
                email,
                city,
                address,
            } => {
                let payload = CreateStoreRequest {
                    code,
                    display_name: name,
                    phone_num: phone,
                    email,
                    city,
                    full_address: address,
                };
                let store = api::catalog::create_store(&ctx.api, token, &payload).await?;
                println!("Created store {} [{}]", store.code, store.id);
            }
            StoreCommand::Update {
                id,
                name,
                phone,
                email,
                city,
                address,
            } => {
                let payload = UpdateStoreRequest {
                    display_name: name,
                    phone_num: phone,
                    email,
                    city,
                    full_address: address,
                };
                let store = api::catalog::update_store(&ctx.api, token, &id, &payload).await?;
                println!("Updated store {}", store.code);
            }
        },
        AdminCommand::Users(command) => match command {
            UserCommand::List { search, page } => {
                let pagination = page.pagination();
                let query = UserListQuery {
                    page_number: pagination.page_number,
                    page_size: pagination.page_size,
                    sort_by: Some("-createdAt".to_string()),
                    search_key: search,
                };
                let users = api::users::list_users(&ctx.api, token, &query).await?;
                for user in &users.content {
                    println!(
                        "{:<10} {:<24} {:<14} {} [{}]",
                        uppercase_first_letter(user.role.as_str()),
                        user.full_name(),
                        user.phone_num,
                        user.staff_of_store_code.as_deref().unwrap_or(""),
                        user.id
                    );
                }
            }
            UserCommand::AssignStaff { user_id, store } => {
                api::users::assign_staff_to_store(&ctx.api, token, &user_id, &store).await?;
                println!("User {user_id} is now staff of {store}");
            }
        },
        AdminCommand::Products(command) => products(ctx, token, command).await?,
        AdminCommand::Availability {
            product_id,
            store,
            available,
        } => {
            api::products::update_product_availability(&ctx.api, token, &product_id, &store, available)
                .await?;
            println!(
                "Product {product_id} is now {} at {store}",
                if available { "available" } else { "unavailable" }
            );
        }
        AdminCommand::Upload { path } => {
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload")
                .to_string();
            let content_type = api::storage::guess_image_type(&file_name)
                .unwrap_or("application/octet-stream");
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            match api::storage::upload_image(&ctx.api, token, &file_name, content_type, bytes).await {
                Ok(uploaded) => println!("{}", uploaded.url),
                Err(err) => bail!(err.user_message("Upload failed")),
            }
        }
    }
    Ok(())
}

async fn discounts(ctx: &Context, token: &str, command: DiscountCommand) -> Result<()> {
    match command {
        DiscountCommand::List(page) => {
            let discounts = api::catalog::list_discounts(&ctx.api, token, &page.pagination()).await?;
            for discount in &discounts.content {
                println!(
                    "{:<16} {:>10}  {}  expires {}  [{}]",
                    discount.code,
                    discount.value_display(),
                    if discount.used { "used" } else { "unused" },
                    discount
                        .expired_at
                        .as_deref()
                        .map(format_date_time)
                        .unwrap_or_else(|| "never".to_string()),
                    discount.id
                );
            }
        }
        DiscountCommand::Create {
            code,
            kind,
            value,
            max_amount,
            min_price,
            expires_at,
        } => {
            let code = code.trim().to_uppercase();
            if code.is_empty() {
                bail!("Please enter a discount code");
            }
            let mut payload = match kind {
                DiscountKind::Fixed => CreateDiscountRequest::fixed(code, value.round() as i64),
                DiscountKind::Percentage => CreateDiscountRequest::percentage(code, value),
            };
            payload.max_fixed_amount = max_amount;
            payload.min_applicable_price = min_price;
            payload.expired_at = expires_at;
            match api::catalog::create_discount(&ctx.api, token, &payload).await {
                Ok(discount) => println!("Created {} ({})", discount.code, discount.value_display()),
                Err(err) => bail!(err.user_message("Create discount failed")),
            }
        }
        DiscountCommand::Delete { id } => {
            api::catalog::delete_discount(&ctx.api, token, &id).await?;
            println!("Deleted discount {id}");
        }
    }
    Ok(())
}

async fn products(ctx: &Context, token: &str, command: ProductCommand) -> Result<()> {
    match command {
        ProductCommand::Create { file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let payload: CreateProductRequest = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", file.display()))?;
            let product = api::products::create_product(&ctx.api, token, &payload).await?;
            println!("Created {} ({})", product.name, product.slug);
        }
        ProductCommand::Update {
            id,
            name,
            description,
            price,
            category,
        } => {
            let payload = UpdateProductRequest {
                name,
                description,
                base_price: price,
                category_id: category,
                ..UpdateProductRequest::default()
            };
            let product = api::products::update_product(&ctx.api, token, &id, &payload).await?;
            println!("Updated {} ({})", product.name, money(product.base_price));
        }
        ProductCommand::Delete { id } => {
            api::products::delete_product(&ctx.api, token, &id).await?;
            println!("Deleted product {id}");
        }
    }
    Ok(())
}
