//! Back-office header hook
//!
//! Purchases and refunds recorded from the order detail screen never
//! see a storefront render, so their payload would sit in the slot
//! until the merchant happens to browse the shop. This hook pushes the
//! container into the back office instead, but only on the order detail
//! screen and only when something is actually pending.

use async_trait::async_trait;
use gtm_datalayer::PayloadStore;

use crate::context::PageView;
use crate::error::HookResult;
use crate::hooks::{DisplayHeaderHook, HookContext, HookHandler, HookOutcome, SkipReason};
use crate::module::HookKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackOfficeHeaderHook;

#[async_trait]
impl<S: PayloadStore + Send> HookHandler<S> for BackOfficeHeaderHook {
    fn kind(&self) -> HookKind {
        HookKind::BackOfficeHeader
    }

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome> {
        // 1. Only the order detail screen, identified by controller and
        //    the id_order parameter.
        if ctx.request.page() != PageView::AdminOrders || !ctx.request.has_param("id_order") {
            return Ok(HookOutcome::Skipped(SkipReason::NotAdminOrderPage));
        }

        // 2. Nothing pending means nothing to push; the back office gets
        //    no tracking of its own.
        if !ctx.session.data_layer().has_data() {
            return Ok(HookOutcome::Skipped(SkipReason::NoPendingData));
        }

        // 3. Same render as the storefront header.
        DisplayHeaderHook.execute(ctx).await
    }
}
