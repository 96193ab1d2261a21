//! Cart mutation hook
//!
//! Fires on every cart save. The host raises this event more than once
//! per request (cart creation, removals, module-driven updates), so the
//! session keeps a per-request set of product ids already recorded and
//! only the first firing per product counts.

use async_trait::async_trait;
use gtm_datalayer::{CartAction, PayloadStore};

use crate::error::{HookError, HookResult};
use crate::hooks::{HookContext, HookHandler, HookOutcome, SkipReason, resolve_brand};
use crate::mapping;
use crate::module::HookKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct CartSaveHook;

#[async_trait]
impl<S: PayloadStore + Send> HookHandler<S> for CartSaveHook {
    fn kind(&self) -> HookKind {
        HookKind::CartSave
    }

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome> {
        // 1. Only visitor-driven cart mutations carry a cart in context
        //    and an add or delete parameter
        if ctx.request.cart_id().is_none() {
            return Ok(HookOutcome::Skipped(SkipReason::NotCartAction));
        }
        let adding = ctx.request.has_param("add");
        let deleting = ctx.request.has_param("delete");
        if !adding && !deleting {
            return Ok(HookOutcome::Skipped(SkipReason::NotCartAction));
        }
        let Some(product_id) = ctx
            .request
            .param("id_product")
            .and_then(|v| v.parse::<u64>().ok())
        else {
            return Ok(HookOutcome::Skipped(SkipReason::NotCartAction));
        };

        // 2. Dedup before any lookup
        if ctx.session.is_processed(product_id) {
            return Ok(HookOutcome::Skipped(SkipReason::DuplicateCartAction));
        }

        let currency = ctx.request.currency_code();
        if adding {
            // 3. The quantity control posts `add` for both directions;
            //    `op=down` is the decrease branch
            let action = if ctx.request.param("op").as_deref() == Some("down") {
                CartAction::Remove
            } else {
                CartAction::Add
            };
            let quantity = ctx
                .request
                .param("qty")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1);

            // 4. A just-created cart has no last line yet; record nothing
            //    and leave the product id eligible for the real add
            let cart_id = ctx.request.cart_id().unwrap_or_default();
            let Some(record) = ctx.checkout.last_cart_product(cart_id).await? else {
                return Ok(HookOutcome::Skipped(SkipReason::EmptyCart));
            };
            let brand = resolve_brand(ctx.catalog, record.manufacturer_id).await?;
            let product = mapping::cart_product(&record, brand, quantity);
            ctx.session
                .data_layer()
                .add_cart_action(action, product, &currency);
        } else {
            // 5. The delete control removes the line before this hook
            //    fires; rebuild the product from the catalog, with the
            //    variant picked by the `ipa` attribute parameter
            let attribute_id = ctx.request.param("ipa").and_then(|v| v.parse().ok());
            let language_id = ctx.request.default_language_id();
            let record = ctx
                .catalog
                .catalog_product(product_id, attribute_id, language_id)
                .await?
                .ok_or(HookError::RecordNotFound {
                    entity: "product",
                    key: product_id.to_string(),
                })?;
            let product = mapping::removed_product(&record);
            ctx.session
                .data_layer()
                .add_cart_action(CartAction::Remove, product, &currency);
        }

        // 6. Mark the id processed only after an event was recorded
        ctx.session.mark_processed(product_id);
        Ok(HookOutcome::Recorded)
    }
}
