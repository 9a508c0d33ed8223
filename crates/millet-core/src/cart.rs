//! In-memory shopping cart. Lives as long as the dashboard that owns it.

use millet_types::Product;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    /// Snapshot taken when the product was first added.
    pub product: Product,
    pub qty: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the line for this product id, or append a new line with qty 1.
    /// Quantity is not checked against the listed stock.
    pub fn add(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.qty += 1,
            None => self.lines.push(CartLine {
                product: product.clone(),
                qty: 1,
            }),
        }
    }

    /// Drop the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across lines (the badge count).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.product.price_per_kg * f64::from(l.qty))
            .sum()
    }
}
