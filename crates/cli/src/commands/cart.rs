//! Cart commands.
//!
//! The cart lives in `STOREFRONT_DATA_DIR/cart.json` as a JSON array of stock
//! ids, one entry per unit.

use storefront_checkout::AppState;
use storefront_checkout::error::add_breadcrumb;
use storefront_checkout_core::StockId;

/// Print the cart resolved against the catalog.
///
/// # Errors
///
/// Returns an error if the stock request fails or the subtotal overflows.
#[allow(clippy::print_stdout)]
pub async fn show(state: &AppState) -> storefront_checkout::Result<()> {
    let currency = state.config().currency;
    let entries = state.cart_store().load();

    if entries.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    let cart = state.catalog().hydrate_cart(&entries).await?;

    for line in &cart.lines {
        let warning = if line.is_within_stock() {
            String::new()
        } else {
            format!("  (only {} left)", line.stock.quantity)
        };
        println!(
            "{:>3} x {} ({}) [{}] {:>14}{}",
            line.quantity,
            line.stock.product.name,
            line.stock.size,
            line.stock.id,
            line.total(currency)?.to_string(),
            warning
        );
    }
    for id in &cart.missing {
        println!("  unavailable: {id}");
    }
    println!("Subtotal: {} ({} items)", cart.subtotal(currency)?, cart.item_count());

    Ok(())
}

/// Add one unit of a stock item.
///
/// The id is checked against the catalog first so unknown stock never
/// reaches the cart.
///
/// # Errors
///
/// Returns an error if the stock is unknown, the request fails, or the cart
/// cannot be written.
#[allow(clippy::print_stdout)]
pub async fn add(state: &AppState, stock_id: &str) -> storefront_checkout::Result<()> {
    let id = StockId::new(stock_id);
    let found = state
        .catalog()
        .fetch_products_by_stock_id(std::slice::from_ref(&id))
        .await?;
    if !found.iter().any(|stock| stock.id == id) {
        return Err(storefront_checkout::AppError::BadRequest(format!(
            "unknown stock id: {id}"
        )));
    }

    let entries = state.cart_store().add(id)?;
    add_breadcrumb("cart", "Added item", Some(&[("stock_id", stock_id)]));
    println!("Added {stock_id} ({} items in cart)", entries.len());

    Ok(())
}

/// Remove one unit of a stock item.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
#[allow(clippy::print_stdout)]
pub fn remove(state: &AppState, stock_id: &str) -> storefront_checkout::Result<()> {
    let mut cart = state.cart_store();
    if cart.remove(&StockId::new(stock_id))? {
        add_breadcrumb("cart", "Removed item", Some(&[("stock_id", stock_id)]));
        println!("Removed {stock_id} ({} items in cart)", cart.count());
    } else {
        println!("{stock_id} is not in the cart");
    }

    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
#[allow(clippy::print_stdout)]
pub fn clear(state: &AppState) -> storefront_checkout::Result<()> {
    state.cart_store().clear()?;
    println!("Cart cleared");
    Ok(())
}
