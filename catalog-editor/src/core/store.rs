//! Catalog Store - the products currently on display
//!
//! Ordered, one record per id, newest first after an insert. Holds no view
//! state; projections are always rebuilt or patched from here.

use shared::{Product, ProductId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Product not found in store: {0}")]
    NotFound(ProductId),
}

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection
    ///
    /// Later duplicates of an id are dropped so the one-record-per-id rule
    /// holds even for a sloppy upstream page.
    pub fn replace_all(&mut self, products: Vec<Product>) {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if unique.iter().any(|p| p.id == product.id) {
                tracing::warn!(id = %product.id, "Dropping duplicate product from listing");
                continue;
            }
            unique.push(product);
        }
        self.products = unique;
    }

    /// Put a product first, returning a displaced record with the same id
    pub fn insert_front(&mut self, product: Product) -> Option<Product> {
        let displaced = self
            .position(&product.id)
            .map(|index| self.products.remove(index));
        self.products.insert(0, product);
        displaced
    }

    /// Swap a record in place, returning the previous version
    pub fn replace_by_id(&mut self, product: Product) -> Result<Product, StoreError> {
        let index = self
            .position(&product.id)
            .ok_or_else(|| StoreError::NotFound(product.id.clone()))?;
        Ok(std::mem::replace(&mut self.products[index], product))
    }

    pub fn remove_by_id(&mut self, id: &ProductId) -> Result<Product, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(self.products.remove(index))
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }
}
