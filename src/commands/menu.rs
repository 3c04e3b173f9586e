use anyhow::{Result, bail};
use clap::Args;

use fnb_storefront::{api, dto::products::ProductQuery, response::Pagination};

use super::{Context, money};

#[derive(Debug, Args)]
pub struct MenuArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// e.g. `basePrice` or `-createdAt`
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long)]
    pub page: Option<i64>,
    #[arg(long)]
    pub size: Option<i64>,
}

pub async fn stores(ctx: &Context) -> Result<()> {
    let stores = api::catalog::list_stores(&ctx.api).await?;
    if stores.is_empty() {
        println!("No stores found.");
    }
    for store in stores {
        println!(
            "{:<8} {:<24} {:<6} {}, {}",
            store.code,
            store.display_name,
            if store.open { "open" } else { "closed" },
            store.full_address,
            store.city
        );
    }
    Ok(())
}

pub async fn menu(ctx: &Context, args: MenuArgs) -> Result<()> {
    let (page_number, page_size) = Pagination {
        page_number: args.page,
        page_size: args.size,
    }
    .normalize();
    let query = ProductQuery {
        search_key: args.search,
        page_number: Some(page_number),
        page_size: Some(page_size),
        sort_by: args.sort_by,
        category_id: args.category,
    };
    let page = api::products::list_products(&ctx.api, &query).await?;

    let cart = ctx.cart().await?;
    let store_code = cart.state().store_code.clone();
    for product in &page.content {
        let unavailable = store_code
            .as_deref()
            .is_some_and(|code| !product.is_available_at(code));
        println!(
            "{:<28} {:>10}  {}{}",
            product.slug,
            money(product.base_price),
            product.name,
            if unavailable { "  (unavailable at your store)" } else { "" }
        );
    }
    println!(
        "-- page {} of {} ({} products)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    );
    Ok(())
}

pub async fn product(ctx: &Context, slug: &str) -> Result<()> {
    let product = match api::products::fetch_product_by_slug(&ctx.api, slug).await {
        Ok(product) => product,
        Err(err) => bail!(err.user_message("Product not found")),
    };
    println!("{}  [{}]", product.name, product.id);
    println!("  {}", money(product.base_price));
    if let Some(compare) = product.compare_price {
        println!("  was {}", money(compare));
    }
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
    for option in &product.options {
        println!("  option {} [{}]", option.name, option.id);
        for selection in &option.selections {
            println!(
                "    {:<20} [{}] +{}",
                selection.name,
                selection.id,
                money(selection.price_change)
            );
        }
    }
    if !product.toppings.is_empty() {
        println!("  toppings");
        for topping in &product.toppings {
            println!(
                "    {:<20} [{}] +{}",
                topping.name,
                topping.id,
                money(topping.price_change)
            );
        }
    }
    if !product.unavailable_at_store_codes.is_empty() {
        println!(
            "  unavailable at: {}",
            product.unavailable_at_store_codes.join(", ")
        );
    }
    Ok(())
}
