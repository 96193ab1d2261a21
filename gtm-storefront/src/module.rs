//! Module lifecycle
//!
//! Hook registration on install, teardown on uninstall. The host side of
//! registration is abstracted behind [`HookRegistrar`] so the lifecycle
//! logic stays testable without a real shop.

use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::config::{OPTIONS, OptionsStore};
use crate::render::RenderCache;

/// Module identity. Also the payload namespace in the backing store.
pub const MODULE_NAME: &str = "gtm_ecommerce";

/// The host lifecycle events this module handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    DisplayHeader,
    BackOfficeHeader,
    CartSave,
    OrderConfirmation,
    OrderPaymentAdded,
    OrderSlipAdded,
    OrderRefunded,
}

impl HookKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            HookKind::DisplayHeader => "display_header",
            HookKind::BackOfficeHeader => "back_office_header",
            HookKind::CartSave => "cart_save",
            HookKind::OrderConfirmation => "order_confirmation",
            HookKind::OrderPaymentAdded => "order_payment_added",
            HookKind::OrderSlipAdded => "order_slip_added",
            HookKind::OrderRefunded => "order_refunded",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every hook the module registers on install.
pub const REGISTERED_HOOKS: [HookKind; 7] = [
    HookKind::DisplayHeader,
    HookKind::BackOfficeHeader,
    HookKind::CartSave,
    HookKind::OrderConfirmation,
    HookKind::OrderPaymentAdded,
    HookKind::OrderSlipAdded,
    HookKind::OrderRefunded,
];

/// Host-side hook registration.
pub trait HookRegistrar {
    fn register(&mut self, hook: HookKind) -> Result<(), String>;
    fn unregister(&mut self, hook: HookKind) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    #[error("failed to register hook {hook}: {reason}")]
    Registration { hook: HookKind, reason: String },

    #[error("failed to unregister hook {hook}: {reason}")]
    Unregistration { hook: HookKind, reason: String },
}

/// Register every module hook. Fails on the first registration the host
/// rejects; the host rolls the module install back as a whole.
pub fn install(registrar: &mut dyn HookRegistrar) -> Result<(), InstallError> {
    for hook in REGISTERED_HOOKS {
        registrar
            .register(hook)
            .map_err(|reason| InstallError::Registration { hook, reason })?;
        info!(module = MODULE_NAME, %hook, "registered hook");
    }
    Ok(())
}

/// Unregister the hooks, drop the module's option values and clear the
/// render cache.
pub fn uninstall(
    registrar: &mut dyn HookRegistrar,
    options: &mut dyn OptionsStore,
    cache: &mut RenderCache,
) -> Result<(), InstallError> {
    for hook in REGISTERED_HOOKS {
        registrar
            .unregister(hook)
            .map_err(|reason| InstallError::Unregistration { hook, reason })?;
    }
    for spec in &OPTIONS {
        options.remove_option(spec.key);
    }
    cache.clear();
    info!(module = MODULE_NAME, "uninstalled");
    Ok(())
}
