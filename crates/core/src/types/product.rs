//! Catalog records served by the inventory API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// A product record.
///
/// Only `id` is interpreted; every other field is kept verbatim so that
/// whatever the catalog returns survives a trip through the cart snapshot.
/// The catalog uses `title`, `price` and `image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Create a product with no attributes.
    #[must_use]
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Display title, if the catalog provided one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").and_then(Value::as_str)
    }

    /// Image URL, if the catalog provided one.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.attributes.get("image").and_then(Value::as_str)
    }

    /// Unit price.
    ///
    /// Accepts both JSON numbers and numeric strings. Returns `None` when the
    /// field is missing or not a decimal.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        match self.attributes.get("price")? {
            Value::Number(n) => n.to_string().parse().ok(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Maximum purchasable quantity for a product.
///
/// Always fetched fresh; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    pub amount: u32,
}

impl StockRecord {
    #[must_use]
    pub const fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }

    /// Whether `requested` units can be purchased.
    #[must_use]
    pub fn allows(&self, requested: u64) -> bool {
        requested <= u64::from(self.amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_keeps_unknown_attributes() {
        let product: Product = serde_json::from_value(json!({
            "id": 5,
            "name": "Shoe",
            "sizes": [38, 39]
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new(5));
        assert_eq!(product.attributes.get("name"), Some(&json!("Shoe")));
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"id": 5, "name": "Shoe", "sizes": [38, 39]})
        );
    }

    #[test]
    fn test_price_from_number_and_string() {
        let numeric = Product::new(ProductId::new(1)).with_attribute("price", 179.9);
        assert_eq!(numeric.price(), Some(Decimal::new(1799, 1)));

        let text = Product::new(ProductId::new(1)).with_attribute("price", "139.90");
        assert_eq!(text.price(), Some(Decimal::new(13990, 2)));

        let missing = Product::new(ProductId::new(1));
        assert_eq!(missing.price(), None);

        let garbage = Product::new(ProductId::new(1)).with_attribute("price", "cheap");
        assert_eq!(garbage.price(), None);
    }

    #[test]
    fn test_title_and_image() {
        let product = Product::new(ProductId::new(2))
            .with_attribute("title", "Tênis de Caminhada Leve Confortável")
            .with_attribute("image", "https://example.com/shoe.jpg");

        assert_eq!(product.title(), Some("Tênis de Caminhada Leve Confortável"));
        assert_eq!(product.image(), Some("https://example.com/shoe.jpg"));
    }

    #[test]
    fn test_stock_allows() {
        let stock = StockRecord::new(ProductId::new(1), 2);
        assert!(stock.allows(0));
        assert!(stock.allows(2));
        assert!(!stock.allows(3));
    }
}
