//! Host catalog and checkout providers
//!
//! Hook handlers read the shop backend through these traits. Production
//! embedders implement them over their storage; [`StaticCatalog`] and
//! [`StaticCheckout`] are the fixed-content implementations used by tests
//! and the demo.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Product attributes as the public product page presents them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageProductRecord {
    pub id: u64,
    /// Merchant reference (SKU); this is the product id the tags see.
    pub reference: String,
    pub name: String,
    pub category: String,
    /// Brand name, empty when the product has no manufacturer.
    pub manufacturer_name: String,
    /// Base price before tax.
    pub price: Decimal,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
}

/// One cart line as the checkout exposes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineRecord {
    pub id: u64,
    pub reference: String,
    pub name: String,
    pub category: String,
    /// Manufacturer id when set; the brand name needs a catalog lookup.
    pub manufacturer_id: Option<u64>,
    /// Unit price after discounts, tax included.
    pub price: Decimal,
    pub quantity: u32,
    /// Attribute combination label, empty for products without variants.
    pub attributes: String,
}

/// Full catalog product, used for cart lines that are already gone from
/// the cart when the removal is observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProductRecord {
    pub id: u64,
    pub reference: String,
    pub name: String,
    pub category: String,
    pub manufacturer_name: String,
    /// Price from the pricing engine, tax included.
    pub price: Decimal,
    /// Variant label resolved for the requested attribute combination.
    pub variant: String,
}

/// Totals of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: u64,
    /// Payment reference shared by payments of the same order.
    pub reference: String,
    pub cart_id: u64,
    pub total_paid_tax_incl: Decimal,
    pub total_paid_tax_excl: Decimal,
    pub total_shipping_tax_incl: Decimal,
}

/// Cart rule applied to a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponRecord {
    /// Voucher code, may be empty for automatic rules.
    pub code: String,
    pub name: String,
}

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Product as the public product page presents it.
    async fn page_product(
        &self,
        product_id: u64,
        language_id: u32,
    ) -> Result<Option<PageProductRecord>, ProviderError>;

    /// Full catalog product with the variant label resolved for
    /// `attribute_id`.
    async fn catalog_product(
        &self,
        product_id: u64,
        attribute_id: Option<u64>,
        language_id: u32,
    ) -> Result<Option<CatalogProductRecord>, ProviderError>;

    async fn manufacturer_name(
        &self,
        manufacturer_id: u64,
    ) -> Result<Option<String>, ProviderError>;
}

/// Read access to carts and orders.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Most recently added cart line, `None` for an empty cart.
    async fn last_cart_product(
        &self,
        cart_id: u64,
    ) -> Result<Option<CartLineRecord>, ProviderError>;

    async fn cart_products(&self, cart_id: u64) -> Result<Vec<CartLineRecord>, ProviderError>;

    async fn cart_coupons(&self, cart_id: u64) -> Result<Vec<CouponRecord>, ProviderError>;

    async fn order_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<OrderRecord>, ProviderError>;

    /// Product reference of one order line.
    async fn order_line_reference(
        &self,
        order_detail_id: u64,
    ) -> Result<Option<String>, ProviderError>;
}

/// Fixed-content catalog for tests and the demo.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    page_products: HashMap<(u64, u32), PageProductRecord>,
    catalog_products: HashMap<(u64, Option<u64>, u32), CatalogProductRecord>,
    manufacturers: HashMap<u64, String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_product(mut self, language_id: u32, record: PageProductRecord) -> Self {
        self.page_products.insert((record.id, language_id), record);
        self
    }

    pub fn with_catalog_product(
        mut self,
        attribute_id: Option<u64>,
        language_id: u32,
        record: CatalogProductRecord,
    ) -> Self {
        self.catalog_products
            .insert((record.id, attribute_id, language_id), record);
        self
    }

    pub fn with_manufacturer(mut self, manufacturer_id: u64, name: &str) -> Self {
        self.manufacturers.insert(manufacturer_id, name.to_string());
        self
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn page_product(
        &self,
        product_id: u64,
        language_id: u32,
    ) -> Result<Option<PageProductRecord>, ProviderError> {
        Ok(self.page_products.get(&(product_id, language_id)).cloned())
    }

    async fn catalog_product(
        &self,
        product_id: u64,
        attribute_id: Option<u64>,
        language_id: u32,
    ) -> Result<Option<CatalogProductRecord>, ProviderError> {
        Ok(self
            .catalog_products
            .get(&(product_id, attribute_id, language_id))
            .cloned())
    }

    async fn manufacturer_name(
        &self,
        manufacturer_id: u64,
    ) -> Result<Option<String>, ProviderError> {
        Ok(self.manufacturers.get(&manufacturer_id).cloned())
    }
}

/// Fixed-content checkout for tests and the demo.
#[derive(Debug, Clone, Default)]
pub struct StaticCheckout {
    last_products: HashMap<u64, CartLineRecord>,
    cart_products: HashMap<u64, Vec<CartLineRecord>>,
    cart_coupons: HashMap<u64, Vec<CouponRecord>>,
    orders: HashMap<String, OrderRecord>,
    line_references: HashMap<u64, String>,
}

impl StaticCheckout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_last_cart_product(mut self, cart_id: u64, record: CartLineRecord) -> Self {
        self.last_products.insert(cart_id, record);
        self
    }

    pub fn with_cart_products(mut self, cart_id: u64, records: Vec<CartLineRecord>) -> Self {
        self.cart_products.insert(cart_id, records);
        self
    }

    pub fn with_cart_coupons(mut self, cart_id: u64, coupons: Vec<CouponRecord>) -> Self {
        self.cart_coupons.insert(cart_id, coupons);
        self
    }

    pub fn with_order(mut self, record: OrderRecord) -> Self {
        self.orders.insert(record.reference.clone(), record);
        self
    }

    pub fn with_line_reference(mut self, order_detail_id: u64, reference: &str) -> Self {
        self.line_references
            .insert(order_detail_id, reference.to_string());
        self
    }
}

#[async_trait]
impl CheckoutProvider for StaticCheckout {
    async fn last_cart_product(
        &self,
        cart_id: u64,
    ) -> Result<Option<CartLineRecord>, ProviderError> {
        Ok(self.last_products.get(&cart_id).cloned())
    }

    async fn cart_products(&self, cart_id: u64) -> Result<Vec<CartLineRecord>, ProviderError> {
        Ok(self.cart_products.get(&cart_id).cloned().unwrap_or_default())
    }

    async fn cart_coupons(&self, cart_id: u64) -> Result<Vec<CouponRecord>, ProviderError> {
        Ok(self.cart_coupons.get(&cart_id).cloned().unwrap_or_default())
    }

    async fn order_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<OrderRecord>, ProviderError> {
        Ok(self.orders.get(reference).cloned())
    }

    async fn order_line_reference(
        &self,
        order_detail_id: u64,
    ) -> Result<Option<String>, ProviderError> {
        Ok(self.line_references.get(&order_detail_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anvil_page_product() -> PageProductRecord {
        PageProductRecord {
            id: 11,
            reference: "AN-1".to_string(),
            name: "Anvil".to_string(),
            category: "home".to_string(),
            manufacturer_name: "Acme".to_string(),
            price: Decimal::new(10000, 2),
            tax_rate: Decimal::new(20, 0),
        }
    }

    #[tokio::test]
    async fn test_static_catalog_keys_products_by_language() {
        let catalog = StaticCatalog::new().with_page_product(1, anvil_page_product());

        let found = catalog.page_product(11, 1).await.unwrap();
        assert_eq!(found.unwrap().reference, "AN-1");
        assert!(catalog.page_product(11, 2).await.unwrap().is_none());
        assert!(catalog.page_product(12, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_static_checkout_defaults_to_empty_collections() {
        let checkout = StaticCheckout::new();

        assert!(checkout.last_cart_product(1).await.unwrap().is_none());
        assert!(checkout.cart_products(1).await.unwrap().is_empty());
        assert!(checkout.cart_coupons(1).await.unwrap().is_empty());
        assert!(checkout.order_by_reference("REF").await.unwrap().is_none());
    }
}
