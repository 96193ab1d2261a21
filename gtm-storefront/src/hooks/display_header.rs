//! Header injection hook
//!
//! The render path: gates on configuration and environment, records the
//! product detail view on product pages, flushes the pending payload and
//! renders the tag container block. Rendered markup is cached per page
//! shape; a cache hit is served without touching the buffer.

use async_trait::async_trait;
use gtm_datalayer::PayloadStore;

use crate::config::SANDBOX_KEY;
use crate::context::PageView;
use crate::error::{HookError, HookResult};
use crate::hooks::{HookContext, HookHandler, HookOutcome, SkipReason};
use crate::mapping;
use crate::module::HookKind;
use crate::query::query_from_json;
use crate::render::{self, TemplateVars};

#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayHeaderHook;

#[async_trait]
impl<S: PayloadStore + Send> HookHandler<S> for DisplayHeaderHook {
    fn kind(&self) -> HookKind {
        HookKind::DisplayHeader
    }

    async fn execute(&self, ctx: &mut HookContext<'_, S>) -> HookResult<HookOutcome> {
        // 1. Without a container id there is nothing to render
        let Some(container_id) = ctx.config.container_id.clone() else {
            return Ok(HookOutcome::Skipped(SkipReason::MissingContainerId));
        };

        // 2. Development mode stays silent unless sandboxed
        if ctx.config.is_development() && !sandbox_enabled(ctx) {
            return Ok(HookOutcome::Skipped(SkipReason::DevMode));
        }

        // 3. A cached render is served as is, leaving the buffer alone
        let cache_key = render::cache_key(ctx.request);
        if let Some(html) = ctx.cache.get(&cache_key) {
            return Ok(HookOutcome::Rendered {
                html: html.to_string(),
            });
        }

        // 4. Product pages record the detail view before the flush
        if let PageView::ProductDetail { product_id } = ctx.request.page() {
            let language_id = ctx.request.language_id();
            let record = ctx
                .catalog
                .page_product(product_id, language_id)
                .await?
                .ok_or(HookError::RecordNotFound {
                    entity: "product",
                    key: product_id.to_string(),
                })?;
            ctx.session
                .data_layer()
                .add_product_view(mapping::page_view_product(&record));
        }

        // 5. Flush, render, cache
        let data_layer = ctx.session.data_layer().flush();
        let vars = TemplateVars {
            container_id,
            data_layer_query: query_from_json(&data_layer),
            data_layer,
        };
        let html = render::render_header_snippet(&vars);
        ctx.cache.store(&cache_key, &html);

        Ok(HookOutcome::Rendered { html })
    }
}

/// The `SANDBOX` request parameter switches sandbox on for one request,
/// the module option switches it on globally.
fn sandbox_enabled<S: PayloadStore>(ctx: &HookContext<'_, S>) -> bool {
    ctx.request.has_param(SANDBOX_KEY) || ctx.config.sandbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModuleConfig;
    use crate::context::StaticRequest;
    use crate::hooks::testkit::{TestShop, anvil_page_product};
    use crate::providers::StaticCatalog;
    use gtm_datalayer::{CartAction, Product};

    fn storefront_shop() -> TestShop {
        TestShop::new(StaticRequest::new(PageView::Storefront))
    }

    #[tokio::test]
    async fn test_missing_container_id_skips() {
        let mut shop = storefront_shop();
        shop.config = ModuleConfig::with_overrides(None, true, "production");

        let outcome = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        assert_eq!(
            outcome,
            HookOutcome::Skipped(SkipReason::MissingContainerId)
        );
    }

    #[tokio::test]
    async fn test_dev_mode_without_sandbox_skips() {
        let mut shop = storefront_shop();
        shop.config = ModuleConfig::with_overrides(Some("GTM-ABC123"), false, "development");

        let outcome = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        assert_eq!(outcome, HookOutcome::Skipped(SkipReason::DevMode));
    }

    #[tokio::test]
    async fn test_sandbox_option_bypasses_dev_gate() {
        let mut shop = storefront_shop();
        shop.config = ModuleConfig::with_overrides(Some("GTM-ABC123"), true, "development");

        let outcome = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        assert!(matches!(outcome, HookOutcome::Rendered { .. }));
    }

    #[tokio::test]
    async fn test_sandbox_request_param_bypasses_dev_gate() {
        let request = StaticRequest::new(PageView::Storefront).with_param(SANDBOX_KEY, "");
        let mut shop = TestShop::new(request);
        shop.config = ModuleConfig::with_overrides(Some("GTM-ABC123"), false, "development");

        let outcome = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        assert!(matches!(outcome, HookOutcome::Rendered { .. }));
    }

    #[tokio::test]
    async fn test_plain_page_renders_empty_data_layer() {
        let mut shop = storefront_shop();

        let outcome = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        let HookOutcome::Rendered { html } = outcome else {
            panic!("expected a render");
        };
        assert!(html.contains("var dataLayer = [];"));
        assert!(html.contains("GTM-ABC123"));
    }

    #[tokio::test]
    async fn test_product_page_flushes_detail_view() {
        let request = StaticRequest::new(PageView::ProductDetail { product_id: 11 });
        let mut shop = TestShop::new(request);
        shop.catalog = StaticCatalog::new().with_page_product(1, anvil_page_product());

        let outcome = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        let HookOutcome::Rendered { html } = outcome else {
            panic!("expected a render");
        };
        // The exact JSON the tag scripts read on a product page.
        assert!(html.contains(
            r#"var dataLayer = [{"ecommerce":{"detail":{"products":{"brand":"Acme","category":"home","id":"AN-1","name":"Anvil","price":"120.00","variant":""}}}}];"#
        ));
        assert!(html.contains("ns.html?id=GTM-ABC123&ecommerce%5Bdetail%5D"));
        // The payload slot is consumed by the render.
        assert!(!shop.session.data_layer().has_data());
        assert_eq!(shop.session.data_layer().flush(), "");
    }

    #[tokio::test]
    async fn test_unknown_product_page_is_a_lookup_error() {
        let request = StaticRequest::new(PageView::ProductDetail { product_id: 404 });
        let mut shop = TestShop::new(request);

        let error = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap_err();
        assert_eq!(
            error,
            HookError::RecordNotFound {
                entity: "product",
                key: "404".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_cache_hit_serves_snippet_and_keeps_pending_payload() {
        let mut shop = storefront_shop();

        // First render fills the cache.
        let first = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        let HookOutcome::Rendered { html: first_html } = first else {
            panic!("expected a render");
        };

        // A cart event lands after the render was cached.
        shop.session.data_layer().add_cart_action(
            CartAction::Add,
            Product {
                id: "AN-1".to_string(),
                ..Product::default()
            },
            "EUR",
        );

        let second = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        assert_eq!(second, HookOutcome::Rendered { html: first_html });
        // The pending payload is untouched and flushes next uncached render.
        assert!(shop.session.data_layer().has_data());

        shop.cache.clear();
        let third = DisplayHeaderHook.execute(&mut shop.ctx()).await.unwrap();
        let HookOutcome::Rendered { html } = third else {
            panic!("expected a render");
        };
        assert!(html.contains(r#""event":"addToCart""#));
    }
}
