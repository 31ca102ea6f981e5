//! In-memory catalog keyed by product code.

use std::collections::BTreeMap;
use std::collections::btree_map::{Entry, Values};

use tracing::debug;

use stockroom_core::{DomainError, DomainResult, Entity, ProductCode};
use stockroom_products::Product;

/// Mapping from product code to product.
///
/// Backed by an ordered map, so iteration is always ascending code order
/// regardless of the order products were loaded in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: BTreeMap<ProductCode, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keyed by entity identity, replacing any previous entry with
    /// the same code.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id(), product);
    }

    pub fn get(&self, code: ProductCode) -> Option<&Product> {
        self.products.get(&code)
    }

    pub(crate) fn get_mut(&mut self, code: ProductCode) -> Option<&mut Product> {
        self.products.get_mut(&code)
    }

    pub fn contains(&self, code: ProductCode) -> bool {
        self.products.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in ascending code order.
    pub fn iter(&self) -> Values<'_, ProductCode, Product> {
        self.products.values()
    }

    /// Remove a product. Guarded: only a product with no remaining stock
    /// (zero or negative) may be deleted.
    pub fn remove(&mut self, code: ProductCode) -> DomainResult<Product> {
        match self.products.entry(code) {
            Entry::Vacant(_) => Err(DomainError::NotFound(code)),
            Entry::Occupied(entry) if !entry.get().is_out_of_stock() => {
                Err(DomainError::StockRemains(code))
            }
            Entry::Occupied(entry) => {
                debug!(%code, "product deleted");
                Ok(entry.remove())
            }
        }
    }

    /// Adjust a product's stock by `delta`. Unbounded: the count may go
    /// negative.
    pub fn adjust_stock(&mut self, code: ProductCode, delta: i64) -> DomainResult<()> {
        let product = self
            .products
            .get_mut(&code)
            .ok_or(DomainError::NotFound(code))?;
        product.adjust_stock(delta);
        Ok(())
    }

    /// Merge `source` into `target`: the source's stock moves over and the
    /// source entry disappears. Requires two distinct, existing products in
    /// the same category at the same price.
    ///
    /// Every validation runs before the first mutation, so a failed combine
    /// leaves both products untouched.
    pub fn combine(&mut self, target: ProductCode, source: ProductCode) -> DomainResult<()> {
        if target == source {
            return Err(DomainError::SameProduct(target));
        }
        let target_ref = self
            .products
            .get(&target)
            .ok_or(DomainError::NotFound(target))?;
        let source_ref = self
            .products
            .get(&source)
            .ok_or(DomainError::NotFound(source))?;
        if !target_ref.same_category(source_ref) {
            return Err(DomainError::CategoryMismatch(
                target_ref.category().to_owned(),
                source_ref.category().to_owned(),
            ));
        }
        if !target_ref.same_price(source_ref) {
            return Err(DomainError::PriceMismatch(
                target_ref.price(),
                source_ref.price(),
            ));
        }

        let absorbed = source_ref.stock();
        self.products.remove(&source);
        if let Some(product) = self.products.get_mut(&target) {
            product.adjust_stock(absorbed);
        }
        debug!(%target, %source, absorbed, "products combined");
        Ok(())
    }

    /// Apply a discount to every product in `category`; a percent of zero
    /// resets prices instead. Returns how many products matched; zero is a
    /// valid outcome.
    pub fn apply_sale(&mut self, category: &str, percent: f64) -> usize {
        self.products
            .values_mut()
            .map(|product| product.apply_category_discount(category, percent))
            .filter(|&matched| matched)
            .count()
    }
}
