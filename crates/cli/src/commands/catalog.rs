//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! storefront-cli sections
//! storefront-cli products
//! storefront-cli product 64f1c2d9e8
//! ```

use storefront_checkout::AppState;
use storefront_checkout::catalog::Product;
use storefront_checkout_core::{CurrencyCode, ProductId};

/// Print the section / category / collection tree.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
#[allow(clippy::print_stdout)]
pub async fn sections(state: &AppState) -> storefront_checkout::Result<()> {
    let sections = state.catalog().fetch_sections().await?;

    for section in &sections {
        println!("{} ({})", section.name, section.id);
        for category in &section.categories {
            println!("  {} ({})", category.name, category.id);
            for collection in &category.collections {
                println!("    {} ({})", collection.name, collection.id);
            }
        }
        for featured in &section.featured {
            println!("  * {} -> {}", featured.name, featured.href);
        }
    }

    Ok(())
}

/// Print one line per product.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
#[allow(clippy::print_stdout)]
pub async fn products(state: &AppState) -> storefront_checkout::Result<()> {
    let currency = state.config().currency;
    let products = state.catalog().fetch_products().await?;

    for product in &products {
        println!("{}", summary_line(product, currency));
    }
    tracing::debug!(count = products.len(), "Listed products");

    Ok(())
}

/// Print a product with every stock variant.
///
/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
#[allow(clippy::print_stdout)]
pub async fn product(state: &AppState, id: &str) -> storefront_checkout::Result<()> {
    let currency = state.config().currency;
    let product = state.catalog().fetch_product(&ProductId::new(id)).await?;

    println!("{}", product.name);
    println!("  id:      {}", product.id);
    println!("  article: {}", product.article_number);
    println!("  image:   {} ({})", product.image.key, product.image.content_type);
    for stock in &product.stock {
        println!(
            "  [{}] size {:<6} {:>14}  {} left",
            stock.id,
            stock.size,
            stock.price(currency).to_string(),
            stock.quantity
        );
    }

    Ok(())
}

fn summary_line(product: &Product, currency: CurrencyCode) -> String {
    let price = product
        .lowest_price(currency)
        .map_or_else(|| "-".to_string(), |p| format!("from {p}"));
    let availability = if product.in_stock() { "" } else { " (sold out)" };
    format!(
        "{}  {}  {}{}",
        product.id, product.name, price, availability
    )
}
