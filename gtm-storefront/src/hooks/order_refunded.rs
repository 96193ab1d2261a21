//! Full refund hook
//!
//! Fires when an order is refunded in full. Only the order id goes on
//! the wire; the tags resolve the amounts from the earlier purchase.

use async_trait::async_trait;
use gtm_datalayer::PayloadStore;

use crate::error::HookResult;
use crate::hooks::{HookContext, HookHandler, HookOutcome};
use crate::module::HookKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRefundedHook {
    pub order_id: u64,
}

#[async_trait]
impl<S: PayloadStore + Send> HookHandler<S> for OrderRefundedHook {
    fn kind(&self) -> HookKind {
        HookKind::OrderRefunded
    }

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome> {
        ctx.session.data_layer().add_refund(self.order_id);
        Ok(HookOutcome::Recorded)
    }
}
