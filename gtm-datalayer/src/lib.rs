//! Google Tag Manager data layer core
//!
//! An accumulate-then-flush buffer for the nested JSON structure read by
//! client-side tag managers. Storefront hooks record e-commerce events
//! (product view, cart action, conversion, purchase, refund) into one
//! payload per visitor; the page-render path flushes the payload exactly
//! once and embeds it into the outgoing HTML.
//!
//! # Module structure
//!
//! ```text
//! gtm-datalayer/src/
//! ├── payload.rs   # Typed payload model and wire shapes
//! ├── buffer.rs    # DataLayer: hydrate, accumulate, commit, flush
//! ├── store.rs     # PayloadStore backing-store contract + MemoryStore
//! ├── money.rs     # Decimal amount formatting
//! ├── sanitize.rs  # HTML-entity escaping for values echoed into markup
//! └── error.rs     # Error types
//! ```
//!
//! The buffer is storage-agnostic: production embeds it over a per-visitor
//! cookie jar, tests over [`MemoryStore`]. Cookie attributes (expiry,
//! domain, flags) are the embedder's concern, never the buffer's.

pub mod buffer;
pub mod error;
pub mod money;
pub mod payload;
pub mod sanitize;
pub mod store;

// Re-exports
pub use buffer::DataLayer;
pub use error::{DataLayerError, DataLayerResult};
pub use payload::{
    CartAction, DataLayerPayload, Ecommerce, GtmEvent, Product, ProductDetail, ProductList,
    Purchase, PurchaseSummary, Refund, RefundActionField, RefundLine,
};
pub use sanitize::safe_output;
pub use store::{MemoryStore, PayloadStore};
