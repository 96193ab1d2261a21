//! Order confirmation hook
//!
//! Fires when the visitor lands on the thank-you page. Records the
//! Adwords conversion scalars; the purchase itself is recorded by the
//! payment hook, which also catches orders confirmed out of band.

use async_trait::async_trait;
use gtm_datalayer::{PayloadStore, money};
use rust_decimal::Decimal;

use crate::error::HookResult;
use crate::hooks::{HookContext, HookHandler, HookOutcome};
use crate::module::HookKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderConfirmationHook {
    pub order_id: u64,
    /// Total the visitor was charged, tax included.
    pub total_to_pay: Decimal,
}

#[async_trait]
impl<S: PayloadStore + Send> HookHandler<S> for OrderConfirmationHook {
    fn kind(&self) -> HookKind {
        HookKind::OrderConfirmation
    }

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome> {
        let currency = ctx.request.currency_code();
        let cents = money::to_cents(self.total_to_pay);
        ctx.session
            .data_layer()
            .add_conversion(self.order_id, cents, &currency);
        Ok(HookOutcome::Recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{PageView, StaticRequest};
    use crate::hooks::testkit::TestShop;

    #[tokio::test]
    async fn test_conversion_scalars_reach_the_payload() {
        let request = StaticRequest::new(PageView::Storefront).with_currency("USD");
        let mut shop = TestShop::new(request);

        let hook = OrderConfirmationHook {
            order_id: 42,
            total_to_pay: Decimal::new(100_50, 2),
        };
        let outcome = hook.execute(&mut shop.ctx()).await.unwrap();
        assert_eq!(outcome, HookOutcome::Recorded);

        let value: serde_json::Value =
            serde_json::from_str(&shop.session.data_layer().flush()).unwrap();
        assert_eq!(value["google_conversion_order_id"], 42);
        assert_eq!(value["google_conversion_value"], "100.50");
        assert_eq!(value["google_conversion_currency"], "USD");
        assert_eq!(value["event"], "orderConfirmation");
        assert_eq!(value["nonInteraction"], false);
    }

    #[tokio::test]
    async fn test_fractional_totals_round_half_up() {
        let mut shop = TestShop::new(StaticRequest::default());

        let hook = OrderConfirmationHook {
            order_id: 1,
            total_to_pay: Decimal::new(99_995, 3),
        };
        hook.execute(&mut shop.ctx()).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&shop.session.data_layer().flush()).unwrap();
        assert_eq!(value["google_conversion_value"], "100.00");
    }
}
