//! Host request context
//!
//! The hooks never touch the host's request machinery directly. Everything
//! they need from the current request comes through [`RequestContext`], and
//! [`StaticRequest`] is the plain parameter-bag implementation used by
//! tests, the demo, and embedders without a richer request object.

use std::collections::HashMap;

/// Identity of the page the current request is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// Public product detail page.
    ProductDetail { product_id: u64 },
    /// Back-office order detail screen.
    AdminOrders,
    /// Any other storefront page.
    Storefront,
    /// Anything else (admin screens, webservice, cron).
    Other,
}

/// Read-only view of the host request.
pub trait RequestContext: Send + Sync {
    fn page(&self) -> PageView;

    /// Request parameter by name, from the query string or form body.
    fn param(&self, key: &str) -> Option<String>;

    /// Whether the parameter is present at all, even with an empty value.
    fn has_param(&self, key: &str) -> bool {
        self.param(key).is_some()
    }

    /// ISO code of the active display currency.
    fn currency_code(&self) -> String;

    fn shop_name(&self) -> String;

    /// Language of the current visitor.
    fn language_id(&self) -> u32;

    /// The shop-wide default language, used where the visitor language
    /// is not in scope (back-office originated lookups).
    fn default_language_id(&self) -> u32;

    /// The visitor's cart, when one exists for this request.
    fn cart_id(&self) -> Option<u64>;
}

/// Fixed-value request used by tests and the demo.
#[derive(Debug, Clone)]
pub struct StaticRequest {
    page: PageView,
    params: HashMap<String, String>,
    currency_code: String,
    shop_name: String,
    language_id: u32,
    default_language_id: u32,
    cart_id: Option<u64>,
}

impl StaticRequest {
    pub fn new(page: PageView) -> Self {
        Self {
            page,
            params: HashMap::new(),
            currency_code: "EUR".to_string(),
            shop_name: "Demo Shop".to_string(),
            language_id: 1,
            default_language_id: 1,
            cart_id: None,
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_currency(mut self, code: &str) -> Self {
        self.currency_code = code.to_string();
        self
    }

    pub fn with_shop_name(mut self, name: &str) -> Self {
        self.shop_name = name.to_string();
        self
    }

    pub fn with_language(mut self, language_id: u32) -> Self {
        self.language_id = language_id;
        self
    }

    pub fn with_default_language(mut self, language_id: u32) -> Self {
        self.default_language_id = language_id;
        self
    }

    pub fn with_cart(mut self, cart_id: u64) -> Self {
        self.cart_id = Some(cart_id);
        self
    }
}

impl Default for StaticRequest {
    fn default() -> Self {
        Self::new(PageView::Storefront)
    }
}

impl RequestContext for StaticRequest {
    fn page(&self) -> PageView {
        self.page
    }

    fn param(&self, key: &str) -> Option<String> {
        self.params.get(key).cloned()
    }

    fn currency_code(&self) -> String {
        self.currency_code.clone()
    }

    fn shop_name(&self) -> String {
        self.shop_name.clone()
    }

    fn language_id(&self) -> u32 {
        self.language_id
    }

    fn default_language_id(&self) -> u32 {
        self.default_language_id
    }

    fn cart_id(&self) -> Option<u64> {
        self.cart_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_param_is_true_for_empty_value() {
        let request = StaticRequest::default().with_param("SANDBOX", "");
        assert!(request.has_param("SANDBOX"));
        assert!(!request.has_param("add"));
    }

    #[test]
    fn test_static_request_defaults() {
        let request = StaticRequest::default();
        assert_eq!(request.page(), PageView::Storefront);
        assert_eq!(request.currency_code(), "EUR");
        assert_eq!(request.cart_id(), None);
    }
}
