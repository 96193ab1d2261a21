//! Credit slip hook
//!
//! Fires when a credit slip with line items is issued against an order.
//! Each slip line references an order detail row; the payload wants the
//! product reference, so every line costs one lookup.

use async_trait::async_trait;
use gtm_datalayer::{PayloadStore, RefundLine};

use crate::error::{HookError, HookResult};
use crate::hooks::{HookContext, HookHandler, HookOutcome};
use crate::module::HookKind;

/// One refunded line as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlipLine {
    pub order_detail_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSlipAddedHook {
    pub order_id: u64,
    pub lines: Vec<SlipLine>,
}

#[async_trait]
impl<S: PayloadStore + Send> HookHandler<S> for OrderSlipAddedHook {
    fn kind(&self) -> HookKind {
        HookKind::OrderSlipAdded
    }

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome> {
        let mut lines = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let reference = ctx
                .checkout
                .order_line_reference(line.order_detail_id)
                .await?
                .ok_or_else(|| HookError::RecordNotFound {
                    entity: "order line",
                    key: line.order_detail_id.to_string(),
                })?;
            lines.push(RefundLine {
                id: reference,
                quantity: line.quantity,
            });
        }

        ctx.session
            .data_layer()
            .add_partial_refund(self.order_id, lines);
        Ok(HookOutcome::Recorded)
    }
}
