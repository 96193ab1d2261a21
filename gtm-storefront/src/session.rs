//! Per-request hook session

use std::collections::HashSet;

use gtm_datalayer::{DataLayer, PayloadStore};
use uuid::Uuid;

use crate::module::MODULE_NAME;

/// One request's hook state.
///
/// Created per request by the embedder, never shared: owns the data layer
/// buffer, the set of product ids already recorded by a cart action this
/// request, and a request id for log correlation.
pub struct HookSession<S: PayloadStore> {
    data_layer: DataLayer<S>,
    processed_products: HashSet<u64>,
    request_id: Uuid,
}

impl<S: PayloadStore> HookSession<S> {
    /// Session over the module's default payload namespace.
    pub fn new(store: S) -> Self {
        Self::with_namespace(store, MODULE_NAME)
    }

    /// Session over an explicit namespace, for embedders running several
    /// containers side by side.
    pub fn with_namespace(store: S, namespace: &str) -> Self {
        Self {
            data_layer: DataLayer::new(store, namespace),
            processed_products: HashSet::new(),
            request_id: Uuid::new_v4(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn data_layer(&mut self) -> &mut DataLayer<S> {
        &mut self.data_layer
    }

    /// Whether a cart action for this product was already recorded in
    /// this request. The cart-save hook fires more than once per request
    /// (cart creation, removals, module-driven cart updates); only the
    /// first firing per product id records anything.
    pub fn is_processed(&self, product_id: u64) -> bool {
        self.processed_products.contains(&product_id)
    }

    pub fn mark_processed(&mut self, product_id: u64) {
        self.processed_products.insert(product_id);
    }
}
