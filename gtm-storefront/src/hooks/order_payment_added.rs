//! Order payment hook
//!
//! Fires when a payment is registered against an order, including
//! payments accepted from the back office long after checkout. Records
//! the full purchase: order totals plus every cart line, so a later
//! page render pushes a complete `orderUpdate`.

use async_trait::async_trait;
use gtm_datalayer::PayloadStore;

use crate::error::{HookError, HookResult};
use crate::hooks::{HookContext, HookHandler, HookOutcome, resolve_brand};
use crate::mapping;
use crate::module::HookKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPaymentAddedHook {
    /// Order reference the payment was attached to.
    pub order_reference: String,
}

#[async_trait]
impl<S: PayloadStore + Send> HookHandler<S> for OrderPaymentAddedHook {
    fn kind(&self) -> HookKind {
        HookKind::OrderPaymentAdded
    }

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome> {
        // 1. The payment row only carries the reference; resolve the order.
        let order = ctx
            .checkout
            .order_by_reference(&self.order_reference)
            .await?
            .ok_or_else(|| HookError::RecordNotFound {
                entity: "order",
                key: self.order_reference.clone(),
            })?;

        // 2. Cart lines with their purchased quantities. The brand needs a
        //    manufacturer lookup per line.
        let mut products = Vec::new();
        for record in ctx.checkout.cart_products(order.cart_id).await? {
            let brand = resolve_brand(ctx.catalog, record.manufacturer_id).await?;
            products.push(mapping::cart_product(&record, brand, record.quantity));
        }

        // 3. Order summary. The currency reported is the one of the request
        //    recording the payment, matching what the tags were fed before.
        let coupons = ctx.checkout.cart_coupons(order.cart_id).await?;
        let summary = mapping::purchase_summary(&order, &coupons, &ctx.request.shop_name());
        let currency = ctx.request.currency_code();
        ctx.session
            .data_layer()
            .add_purchase(summary, products, &currency);
        Ok(HookOutcome::Recorded)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::context::{PageView, StaticRequest};
    use crate::hooks::testkit::{TestShop, anvil_cart_line};
    use crate::providers::{CouponRecord, OrderRecord, StaticCheckout};

    fn placed_order() -> OrderRecord {
        OrderRecord {
            id: 7,
            reference: "XKBKNABJK".to_string(),
            cart_id: 123,
            total_paid_tax_incl: Decimal::from(120),
            total_paid_tax_excl: Decimal::from(100),
            total_shipping_tax_incl: Decimal::from(20),
        }
    }

    #[tokio::test]
    async fn test_purchase_carries_summary_and_cart_lines() {
        let request = StaticRequest::new(PageView::Storefront)
            .with_currency("USD")
            .with_shop_name("My shop name");
        let mut shop = TestShop::new(request);
        let mut line = anvil_cart_line();
        line.quantity = 2;
        line.attributes = "Size - S".to_string();
        shop.catalog = shop.catalog.with_manufacturer(3, "Acme");
        shop.checkout = StaticCheckout::new()
            .with_order(placed_order())
            .with_cart_products(123, vec![line])
            .with_cart_coupons(
                123,
                vec![CouponRecord {
                    code: "PROMO-CODE".to_string(),
                    name: "Promo".to_string(),
                }],
            );

        let hook = OrderPaymentAddedHook {
            order_reference: "XKBKNABJK".to_string(),
        };
        let outcome = hook.execute(&mut shop.ctx()).await.unwrap();
        assert_eq!(outcome, HookOutcome::Recorded);

        let value: serde_json::Value =
            serde_json::from_str(&shop.session.data_layer().flush()).unwrap();
        let action_field = &value["ecommerce"]["purchase"]["actionField"];
        assert_eq!(action_field["affiliation"], "My shop name");
        assert_eq!(action_field["coupon"], "PROMO-CODE");
        assert_eq!(action_field["id"], 7);
        assert_eq!(action_field["revenue"], "120.00");
        assert_eq!(action_field["tax"], 20.0);
        assert_eq!(action_field["shipping"], "20.00");

        let products = value["ecommerce"]["purchase"]["products"]
            .as_array()
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["id"], "AN-1");
        assert_eq!(products[0]["brand"], "Acme");
        assert_eq!(products[0]["price"], "120.00");
        assert_eq!(products[0]["quantity"], 2);
        assert_eq!(products[0]["variant"], "Size - S");

        // Currency comes from the request, not the order.
        assert_eq!(value["ecommerce"]["currencyCode"], "USD");
        assert_eq!(value["event"], "orderUpdate");
        assert_eq!(value["nonInteraction"], true);
    }

    #[tokio::test]
    async fn test_unknown_reference_is_an_error() {
        let mut shop = TestShop::new(StaticRequest::default());

        let hook = OrderPaymentAddedHook {
            order_reference: "MISSING".to_string(),
        };
        let err = hook.execute(&mut shop.ctx()).await.unwrap_err();
        assert_eq!(
            err,
            HookError::RecordNotFound {
                entity: "order",
                key: "MISSING".to_string(),
            }
        );
        assert!(!shop.session.data_layer().has_data());
    }

    #[tokio::test]
    async fn test_purchase_without_lines_still_records_totals() {
        let mut shop = TestShop::new(StaticRequest::default());
        shop.checkout = StaticCheckout::new().with_order(placed_order());

        let hook = OrderPaymentAddedHook {
            order_reference: "XKBKNABJK".to_string(),
        };
        hook.execute(&mut shop.ctx()).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&shop.session.data_layer().flush()).unwrap();
        assert_eq!(value["ecommerce"]["purchase"]["actionField"]["id"], 7);
        assert_eq!(
            value["ecommerce"]["purchase"]["products"],
            serde_json::json!([])
        );
    }
}
