//! Data layer buffer
//!
//! Provides a fluent API for accumulating e-commerce events into one
//! payload per visitor and flushing it exactly once on page render.
//!
//! One buffer lives for one request: it hydrates from whatever the
//! backing store holds under its namespace, every mutation persists the
//! full payload back synchronously, and `flush` reads the store's current
//! value and deletes the entry. A request that records events without
//! rendering a page leaves the payload pending; the next request's buffer
//! picks it up and keeps accumulating.

use tracing::{error, warn};

use crate::error::{DataLayerError, DataLayerResult};
use crate::money;
use crate::payload::{
    CartAction, DataLayerPayload, GtmEvent, Product, PurchaseSummary, RefundLine,
};
use crate::sanitize::safe_output;
use crate::store::PayloadStore;

/// Accumulate-then-flush buffer over a per-visitor payload slot.
pub struct DataLayer<S> {
    store: S,
    namespace: String,
    payload: DataLayerPayload,
}

impl<S: PayloadStore> DataLayer<S> {
    /// Create a buffer over `store`, hydrating from the entry at
    /// `namespace`. A present but undecodable entry is recovered as an
    /// empty payload; analytics data is advisory and never worth failing
    /// the host request over.
    pub fn new(store: S, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let payload = match Self::hydrate(&store, &namespace) {
            Ok(Some(payload)) => payload,
            Ok(None) => DataLayerPayload::default(),
            Err(DataLayerError::CorruptPayload(source)) => {
                warn!(namespace = %namespace, error = %source, "stored payload is corrupt, starting empty");
                DataLayerPayload::default()
            }
        };

        Self {
            store,
            namespace,
            payload,
        }
    }

    fn hydrate(store: &S, namespace: &str) -> DataLayerResult<Option<DataLayerPayload>> {
        match store.get(namespace) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// The namespace key this buffer owns in the store.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Current in-memory payload.
    pub fn payload(&self) -> &DataLayerPayload {
        &self.payload
    }

    // === Event recording ===

    /// Record a product detail view, replacing any prior one.
    pub fn add_product_view(&mut self, product: Product) -> &mut Self {
        self.payload.set_detail_product(product);
        self.commit()
    }

    /// Record a cart mutation. The currency code is HTML-entity escaped
    /// because it may be echoed into markup later.
    pub fn add_cart_action(
        &mut self,
        action: CartAction,
        product: Product,
        currency: &str,
    ) -> &mut Self {
        self.payload.set_currency_code(safe_output(currency));
        self.payload.append_cart_product(action, product);
        self.record_event(action.event(), false)
    }

    /// Record an Adwords conversion. `value_cents` is in minor units and
    /// lands on the wire as a two-decimal major-unit string.
    pub fn add_conversion(&mut self, order_id: u64, value_cents: i64, currency: &str) -> &mut Self {
        self.payload
            .set_conversion(order_id, money::format_cents(value_cents), safe_output(currency));
        self.record_event(GtmEvent::OrderConfirmation, false)
    }

    /// Record a purchase. The currency code is stored as given here;
    /// purchase summaries reach the page only through the JSON blob.
    pub fn add_purchase(
        &mut self,
        summary: PurchaseSummary,
        products: Vec<Product>,
        currency: &str,
    ) -> &mut Self {
        self.payload.set_currency_code(currency.to_string());
        self.payload.set_purchase(summary, products);
        self.record_event(GtmEvent::OrderUpdate, true)
    }

    /// Record a full refund of an order.
    pub fn add_refund(&mut self, order_id: u64) -> &mut Self {
        self.payload.set_refund_id(order_id);
        self.record_event(GtmEvent::OrderUpdate, false)
    }

    /// Record a partial refund with the refunded line items.
    pub fn add_partial_refund(&mut self, order_id: u64, lines: Vec<RefundLine>) -> &mut Self {
        self.payload.set_refund(order_id, lines);
        self.record_event(GtmEvent::OrderUpdate, true)
    }

    /// Tag the payload with an event kind and interaction flag.
    /// Every event-bearing `add_*` call ends here.
    pub fn record_event(&mut self, event: GtmEvent, from_admin: bool) -> &mut Self {
        self.payload.set_event(event, from_admin);
        self.commit()
    }

    // === Inspection and flush ===

    /// Whether any event fragment is held in memory.
    pub fn has_data(&self) -> bool {
        !self.payload.is_empty()
    }

    /// Hand off the accumulated payload: return the store's current
    /// serialized value for this namespace and delete the entry, or `""`
    /// when the store holds nothing.
    ///
    /// This reads the store, not the in-memory payload, so it reflects
    /// exactly what the last commit wrote.
    pub fn flush(&mut self) -> String {
        match self.store.get(&self.namespace) {
            Some(raw) => {
                self.store.remove(&self.namespace);
                raw
            }
            None => String::new(),
        }
    }

    /// Persist the full payload to the store.
    fn commit(&mut self) -> &mut Self {
        match serde_json::to_string(&self.payload) {
            Ok(raw) => self.store.set(&self.namespace, &raw),
            Err(source) => {
                // The next mutation rewrites the full payload, so a skipped
                // commit loses this request's events and nothing else.
                error!(namespace = %self.namespace, error = %source, "failed to serialize payload, commit skipped");
            }
        }
        self
    }
}
