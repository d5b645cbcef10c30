//! Canned service responses.

use serde_json::{Value, json};

/// A product with the given `(stock_id, size, price, quantity)` variants.
#[must_use]
pub fn product(id: &str, name: &str, variants: &[(&str, &str, i64, u32)]) -> Value {
    let stock: Vec<Value> = variants
        .iter()
        .map(|(stock_id, size, price, quantity)| {
            json!({
                "_id": stock_id,
                "product": id,
                "size": size,
                "price": price,
                "quantity": quantity
            })
        })
        .collect();

    json!({
        "_id": id,
        "name": name,
        "articleNumber": 100_200,
        "stock": stock,
        "image": {"key": format!("products/{id}.jpg"), "type": "image/jpeg"},
        "collections": [],
        "views": 3,
        "timestamp": "2024-03-01T12:00:00Z"
    })
}

/// A `/stock/` entry with its product embedded.
#[must_use]
pub fn hydrated_stock(stock_id: &str, product_id: &str, price: i64, quantity: u32) -> Value {
    json!({
        "_id": stock_id,
        "product": product(product_id, "Runner", &[]),
        "size": "42",
        "price": price,
        "quantity": quantity
    })
}

/// One section with one category and one collection.
#[must_use]
pub fn sections() -> Value {
    json!([{
        "_id": "sec1",
        "name": "Women",
        "categories": [{
            "_id": "cat1",
            "name": "Shoes",
            "parent": "sec1",
            "collections": [{"_id": "col1", "name": "Sneakers", "views": 10, "parent": "cat1"}]
        }],
        "featured": [{
            "name": "Spring",
            "href": "/women/spring",
            "image": "spring.jpg",
            "alt": "Spring collection"
        }]
    }])
}
