//! Typed data layer payload
//!
//! Wire shapes for the nested structure read by Google Tag Manager tags.
//! Absent subtrees are omitted from JSON entirely, so a payload only ever
//! carries the fragments the recorded events produced. Named setters per
//! subtree keep the structure's invariants enforceable at compile time,
//! instead of free-form path assignment.

use serde::{Deserialize, Serialize};

/// Cart mutation direction, selecting the `ecommerce.add` or
/// `ecommerce.remove` subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
    Add,
    Remove,
}

impl CartAction {
    /// Event tag implied by this action.
    pub fn event(self) -> GtmEvent {
        match self {
            CartAction::Add => GtmEvent::AddToCart,
            CartAction::Remove => GtmEvent::RemoveFromCart,
        }
    }
}

/// Event-kind tags understood by the tag container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GtmEvent {
    AddToCart,
    RemoveFromCart,
    OrderConfirmation,
    OrderUpdate,
}

impl GtmEvent {
    /// Wire name of the event tag.
    pub fn as_str(self) -> &'static str {
        match self {
            GtmEvent::AddToCart => "addToCart",
            GtmEvent::RemoveFromCart => "removeFromCart",
            GtmEvent::OrderConfirmation => "orderConfirmation",
            GtmEvent::OrderUpdate => "orderUpdate",
        }
    }
}

impl std::fmt::Display for GtmEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product as the tag scripts expect it.
///
/// `price` is pre-formatted to two decimals by the mapping layer; the
/// payload never does arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub brand: String,
    pub category: String,
    pub id: String,
    pub name: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub variant: String,
}

/// Order summary under `ecommerce.purchase.actionField`.
///
/// `revenue` and `shipping` are two-decimal strings while `tax` is a raw
/// number; the consuming tags parse the field loosely and this matches
/// what they were configured against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseSummary {
    pub affiliation: String,
    pub coupon: String,
    pub id: u64,
    pub revenue: String,
    pub tax: f64,
    pub shipping: String,
}

/// One refunded line under `ecommerce.refund.actionField.products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundLine {
    pub id: String,
    pub quantity: u32,
}

/// `ecommerce.detail` subtree: the single viewed product.
///
/// `products` is one object here, not an array. The detail view always
/// replaces, never appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub products: Product,
}

/// `ecommerce.add` / `ecommerce.remove` subtree: ordered cart products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}

/// `ecommerce.purchase` subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(rename = "actionField")]
    pub action_field: PurchaseSummary,
    pub products: Vec<Product>,
}

/// `ecommerce.refund` subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(rename = "actionField")]
    pub action_field: RefundActionField,
}

/// Refund target plus optional partial line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefundActionField {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<RefundLine>>,
}

/// The `ecommerce` subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ecommerce {
    #[serde(rename = "currencyCode", skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ProductDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<ProductList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<ProductList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase: Option<Purchase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<Refund>,
}

impl Ecommerce {
    fn is_empty(&self) -> bool {
        self.currency_code.is_none()
            && self.detail.is_none()
            && self.add.is_none()
            && self.remove.is_none()
            && self.purchase.is_none()
            && self.refund.is_none()
    }
}

/// The full data layer payload.
///
/// `event` is kept as a plain string on the wire so a payload slot holding
/// an event tag this crate does not know about still hydrates instead of
/// being discarded as corrupt; [`GtmEvent`] types the values this crate
/// writes itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataLayerPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(rename = "nonInteraction", skip_serializing_if = "Option::is_none")]
    pub non_interaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_conversion_order_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_conversion_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_conversion_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecommerce: Option<Ecommerce>,
    /// Keys written into the shared slot by anything else. Preserved
    /// across a hydrate/commit round trip, never interpreted.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DataLayerPayload {
    /// Whether no event fragment has been recorded at all.
    pub fn is_empty(&self) -> bool {
        self.event.is_none()
            && self.non_interaction.is_none()
            && self.google_conversion_order_id.is_none()
            && self.google_conversion_value.is_none()
            && self.google_conversion_currency.is_none()
            && self.ecommerce.as_ref().is_none_or(|e| e.is_empty())
            && self.extra.is_empty()
    }

    fn ecommerce_mut(&mut self) -> &mut Ecommerce {
        self.ecommerce.get_or_insert_with(Ecommerce::default)
    }

    // === Subtree setters ===

    /// Set `ecommerce.detail.products`, replacing any prior detail view.
    pub fn set_detail_product(&mut self, product: Product) {
        self.ecommerce_mut().detail = Some(ProductDetail { products: product });
    }

    /// Append to `ecommerce.add.products` or `ecommerce.remove.products`.
    pub fn append_cart_product(&mut self, action: CartAction, product: Product) {
        let ecommerce = self.ecommerce_mut();
        let list = match action {
            CartAction::Add => ecommerce.add.get_or_insert_with(ProductList::default),
            CartAction::Remove => ecommerce.remove.get_or_insert_with(ProductList::default),
        };
        list.products.push(product);
    }

    /// Set `ecommerce.currencyCode`.
    pub fn set_currency_code(&mut self, code: String) {
        self.ecommerce_mut().currency_code = Some(code);
    }

    /// Set the three Adwords conversion scalars.
    pub fn set_conversion(&mut self, order_id: u64, value: String, currency: String) {
        self.google_conversion_order_id = Some(order_id);
        self.google_conversion_value = Some(value);
        self.google_conversion_currency = Some(currency);
    }

    /// Set `ecommerce.purchase`, replacing any prior purchase.
    pub fn set_purchase(&mut self, summary: PurchaseSummary, products: Vec<Product>) {
        self.ecommerce_mut().purchase = Some(Purchase {
            action_field: summary,
            products,
        });
    }

    /// Set `ecommerce.refund.actionField.id` only. Line items from an
    /// earlier partial refund in the same payload are left in place.
    pub fn set_refund_id(&mut self, order_id: u64) {
        let refund = self.ecommerce_mut().refund.get_or_insert_with(Refund::default);
        refund.action_field.id = order_id;
    }

    /// Set `ecommerce.refund.actionField` with the partial line items.
    pub fn set_refund(&mut self, order_id: u64, lines: Vec<RefundLine>) {
        let refund = self.ecommerce_mut().refund.get_or_insert_with(Refund::default);
        refund.action_field.id = order_id;
        refund.action_field.products = Some(lines);
    }

    /// Set the top-level `event` tag and `nonInteraction` flag.
    pub fn set_event(&mut self, event: GtmEvent, non_interaction: bool) {
        self.event = Some(event.as_str().to_string());
        self.non_interaction = Some(non_interaction);
    }
}
