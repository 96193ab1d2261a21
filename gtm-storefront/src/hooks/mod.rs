//! Hook handler implementations
//!
//! Each handler implements the `HookHandler` trait and services one host
//! lifecycle event. [`run_hook`] is the embedder entry point: it builds
//! the handler for a [`HookEvent`], executes it inside a request-scoped
//! tracing span, and absorbs every handler error into a logged skip so
//! nothing analytics-related can fail a shop request.

use async_trait::async_trait;
use gtm_datalayer::PayloadStore;
use rust_decimal::Decimal;
use tracing::{Instrument, debug, info_span, warn};

use crate::config::ModuleConfig;
use crate::context::RequestContext;
use crate::error::HookResult;
use crate::module::HookKind;
use crate::providers::{CatalogProvider, CheckoutProvider};
use crate::render::RenderCache;
use crate::session::HookSession;

mod back_office_header;
mod cart_save;
mod display_header;
mod order_confirmation;
mod order_payment_added;
mod order_refunded;
mod order_slip_added;

pub use back_office_header::BackOfficeHeaderHook;
pub use cart_save::CartSaveHook;
pub use display_header::DisplayHeaderHook;
pub use order_confirmation::OrderConfirmationHook;
pub use order_payment_added::OrderPaymentAddedHook;
pub use order_refunded::OrderRefundedHook;
pub use order_slip_added::{OrderSlipAddedHook, SlipLine};

/// Everything a handler may touch for one request.
pub struct HookContext<'a, S: PayloadStore> {
    pub config: &'a ModuleConfig,
    pub request: &'a dyn RequestContext,
    pub catalog: &'a dyn CatalogProvider,
    pub checkout: &'a dyn CheckoutProvider,
    pub session: &'a mut HookSession<S>,
    pub cache: &'a mut RenderCache,
}

/// What a hook did with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Render-path hooks produced header markup for the page.
    Rendered { html: String },
    /// An event was recorded into the data layer buffer.
    Recorded,
    /// Nothing was recorded or rendered.
    Skipped(SkipReason),
}

/// Why a hook recorded nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingContainerId,
    DevMode,
    NotCartAction,
    DuplicateCartAction,
    EmptyCart,
    NotAdminOrderPage,
    NoPendingData,
    /// A handler error was absorbed; details are in the log.
    LookupFailed,
}

/// One host lifecycle event with its payload, as the embedder reports it.
#[derive(Debug, Clone, PartialEq)]
pub enum HookEvent {
    DisplayHeader,
    BackOfficeHeader,
    CartSave,
    OrderConfirmation { order_id: u64, total_to_pay: Decimal },
    OrderPaymentAdded { order_reference: String },
    OrderSlipAdded { order_id: u64, lines: Vec<SlipLine> },
    OrderRefunded { order_id: u64 },
}

#[async_trait]
pub trait HookHandler<S: PayloadStore + Send>: Send + Sync {
    /// Lifecycle event this handler services.
    fn kind(&self) -> HookKind;

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome>;
}

/// Execute a handler inside a request-scoped span. Handler errors are
/// logged and absorbed: a failed lookup means no analytics for this
/// request, never a failed page.
pub async fn dispatch<S, H>(handler: &H, ctx: &mut HookContext<'_, S>) -> HookOutcome
where
    S: PayloadStore + Send,
    H: HookHandler<S> + ?Sized,
{
    let span = info_span!(
        "storefront_hook",
        hook = handler.kind().as_str(),
        request_id = %ctx.session.request_id(),
    );

    async {
        match handler.execute(ctx).await {
            Ok(HookOutcome::Rendered { html }) => {
                debug!(bytes = html.len(), "hook rendered header");
                HookOutcome::Rendered { html }
            }
            Ok(HookOutcome::Recorded) => {
                debug!("hook recorded payload data");
                HookOutcome::Recorded
            }
            Ok(HookOutcome::Skipped(reason)) => {
                debug!(?reason, "hook skipped");
                HookOutcome::Skipped(reason)
            }
            Err(error) => {
                warn!(%error, "hook failed, no analytics recorded");
                HookOutcome::Skipped(SkipReason::LookupFailed)
            }
        }
    }
    .instrument(span)
    .await
}

/// Run one host event end to end.
pub async fn run_hook<S>(event: &HookEvent, ctx: &mut HookContext<'_, S>) -> HookOutcome
where
    S: PayloadStore + Send,
{
    let action = HookAction::from(event);
    dispatch(&action, ctx).await
}

/// Brand of a cart line: manufacturer lookup when the line carries an id,
/// empty otherwise. An id the catalog does not know resolves to empty.
pub(crate) async fn resolve_brand(
    catalog: &dyn CatalogProvider,
    manufacturer_id: Option<u64>,
) -> HookResult<String> {
    match manufacturer_id {
        Some(id) => Ok(catalog.manufacturer_name(id).await?.unwrap_or_default()),
        None => Ok(String::new()),
    }
}

/// HookAction enum - dispatches to concrete handler implementations
pub enum HookAction {
    DisplayHeader(DisplayHeaderHook),
    BackOfficeHeader(BackOfficeHeaderHook),
    CartSave(CartSaveHook),
    OrderConfirmation(OrderConfirmationHook),
    OrderPaymentAdded(OrderPaymentAddedHook),
    OrderSlipAdded(OrderSlipAddedHook),
    OrderRefunded(OrderRefundedHook),
}

#[async_trait]
impl<S: PayloadStore + Send> HookHandler<S> for HookAction {
    fn kind(&self) -> HookKind {
        match self {
            HookAction::DisplayHeader(_) => HookKind::DisplayHeader,
            HookAction::BackOfficeHeader(_) => HookKind::BackOfficeHeader,
            HookAction::CartSave(_) => HookKind::CartSave,
            HookAction::OrderConfirmation(_) => HookKind::OrderConfirmation,
            HookAction::OrderPaymentAdded(_) => HookKind::OrderPaymentAdded,
            HookAction::OrderSlipAdded(_) => HookKind::OrderSlipAdded,
            HookAction::OrderRefunded(_) => HookKind::OrderRefunded,
        }
    }

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome> {
        match self {
            HookAction::DisplayHeader(hook) => hook.execute(ctx).await,
            HookAction::BackOfficeHeader(hook) => hook.execute(ctx).await,
            HookAction::CartSave(hook) => hook.execute(ctx).await,
            HookAction::OrderConfirmation(hook) => hook.execute(ctx).await,
            HookAction::OrderPaymentAdded(hook) => hook.execute(ctx).await,
            HookAction::OrderSlipAdded(hook) => hook.execute(ctx).await,
            HookAction::OrderRefunded(hook) => hook.execute(ctx).await,
        }
    }
}

/// Convert a host event to its handler.
///
/// This is the only place matching on `HookEvent`.
impl From<&HookEvent> for HookAction {
    fn from(event: &HookEvent) -> Self {
        match event {
            HookEvent::DisplayHeader => HookAction::DisplayHeader(DisplayHeaderHook),
            HookEvent::BackOfficeHeader => HookAction::BackOfficeHeader(BackOfficeHeaderHook),
            HookEvent::CartSave => HookAction::CartSave(CartSaveHook),
            HookEvent::OrderConfirmation {
                order_id,
                total_to_pay,
            } => HookAction::OrderConfirmation(OrderConfirmationHook {
                order_id: *order_id,
                total_to_pay: *total_to_pay,
            }),
            HookEvent::OrderPaymentAdded { order_reference } => {
                HookAction::OrderPaymentAdded(OrderPaymentAddedHook {
                    order_reference: order_reference.clone(),
                })
            }
            HookEvent::OrderSlipAdded { order_id, lines } => {
                HookAction::OrderSlipAdded(OrderSlipAddedHook {
                    order_id: *order_id,
                    lines: lines.clone(),
                })
            }
            HookEvent::OrderRefunded { order_id } => {
                HookAction::OrderRefunded(OrderRefundedHook {
                    order_id: *order_id,
                })
            }
        }
    }
}
