//! Google Tag Manager storefront module
//!
//! Hook-driven orchestration around [`gtm_datalayer`]: cart and order
//! hooks record e-commerce events into the per-visitor payload, the
//! header hooks inject the container loader with the flushed payload,
//! and install, options and render caching follow the host shop's
//! module lifecycle.
//!
//! # Module structure
//!
//! ```text
//! gtm-storefront/src/
//! ├── module.rs     # Module identity, hook registry, install/uninstall
//! ├── config.rs     # Container id and sandbox options
//! ├── context.rs    # RequestContext: read-only view of the host request
//! ├── providers.rs  # CatalogProvider / CheckoutProvider host lookups
//! ├── session.rs    # Per-request state: data layer + cart action dedup
//! ├── mapping.rs    # Provider records to payload products
//! ├── render.rs     # Container snippet assembly + render cache
//! ├── query.rs      # Payload JSON to URL query form
//! ├── logger.rs     # Tracing subscriber setup
//! ├── error.rs      # Error types
//! └── hooks/        # One handler per registered hook
//! ```
//!
//! Embedders implement [`RequestContext`], [`CatalogProvider`],
//! [`CheckoutProvider`] and a [`gtm_datalayer::PayloadStore`] over their
//! host, then feed host events through [`run_hook`].

pub mod config;
pub mod context;
pub mod error;
pub mod hooks;
pub mod logger;
pub mod mapping;
pub mod module;
pub mod providers;
pub mod query;
pub mod render;
pub mod session;

// Re-exports
pub use config::{
    MemoryOptions, ModuleConfig, OptionsError, OptionsStore, load_options, save_options,
};
pub use context::{PageView, RequestContext, StaticRequest};
pub use error::{HookError, HookResult, ProviderError};
pub use module::{
    HookKind, HookRegistrar, InstallError, MODULE_NAME, REGISTERED_HOOKS, install, uninstall,
};
pub use providers::{CatalogProvider, CheckoutProvider, StaticCatalog, StaticCheckout};
pub use render::RenderCache;
pub use session::HookSession;

// Hook dispatch re-exports (for embedders wiring host events)
pub use hooks::{HookContext, HookEvent, HookOutcome, SkipReason, SlipLine, run_hook};
