//! Storefront session walkthrough
//!
//! Drives the module the way a host shop would:
//! 1. Install the module and save its options
//! 2. Render the tag container on a product page
//! 3. Record a cart addition from an ajax cart update
//! 4. Render the pending cart event on the next page view
//! 5. Record the conversion on the order confirmation page
//! 6. Register a payment and push the purchase from the back office
//!
//! Run: cargo run --example storefront_session

use gtm_datalayer::MemoryStore;
use gtm_storefront::providers::{
    CartLineRecord, CouponRecord, OrderRecord, PageProductRecord, StaticCatalog, StaticCheckout,
};
use gtm_storefront::{
    HookContext, HookEvent, HookKind, HookOutcome, HookRegistrar, HookSession, MemoryOptions,
    PageView, RenderCache, StaticRequest, install, load_options, run_hook, save_options,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gtm_storefront::logger::init_logger();

    println!("\nGoogle Tag Manager storefront walkthrough");
    println!("=========================================\n");

    // 1. Install: register the hooks with the host and save the options
    //    a merchant would enter on the module configuration screen.
    let mut registrar = PrintRegistrar;
    install(&mut registrar)?;

    let mut options = MemoryOptions::new();
    save_options(&mut options, "GTM-ABC123", true)?;
    let config = load_options(&mut options);
    println!("✅ Installed with container {:?}\n", config.container_id);

    // Shop fixtures: one product, one cart, one order paying for it.
    let catalog = StaticCatalog::new()
        .with_page_product(1, anvil_page_product())
        .with_manufacturer(3, "Acme");
    let checkout = StaticCheckout::new()
        .with_last_cart_product(123, anvil_cart_line())
        .with_cart_products(123, vec![anvil_cart_line()])
        .with_cart_coupons(
            123,
            vec![CouponRecord {
                code: "WELCOME10".to_string(),
                name: "Welcome discount".to_string(),
            }],
        )
        .with_order(OrderRecord {
            id: 7,
            reference: "XKBKNABJK".to_string(),
            cart_id: 123,
            total_paid_tax_incl: Decimal::new(24000, 2),
            total_paid_tax_excl: Decimal::new(20000, 2),
            total_shipping_tax_incl: Decimal::new(4_99, 2),
        });
    let mut cache = RenderCache::new();

    // The visitor's cookie jar, carried across their requests.
    let mut visitor_jar = MemoryStore::new();

    // 2. Product page view: records the detail product and renders the
    //    container with it in one pass.
    println!("--- 2. Product page view ---");
    {
        let request = StaticRequest::new(PageView::ProductDetail { product_id: 11 });
        let mut session = HookSession::new(&mut visitor_jar);
        let mut ctx = HookContext {
            config: &config,
            request: &request,
            catalog: &catalog,
            checkout: &checkout,
            session: &mut session,
            cache: &mut cache,
        };
        show(run_hook(&HookEvent::DisplayHeader, &mut ctx).await);
    }

    // 3. Ajax cart update: records addToCart into the cookie jar. No page
    //    is rendered for this request.
    println!("\n--- 3. Cart addition (ajax) ---");
    {
        let request = StaticRequest::new(PageView::Storefront)
            .with_cart(123)
            .with_param("add", "1")
            .with_param("id_product", "11")
            .with_param("qty", "2");
        let mut session = HookSession::new(&mut visitor_jar);
        let mut ctx = HookContext {
            config: &config,
            request: &request,
            catalog: &catalog,
            checkout: &checkout,
            session: &mut session,
            cache: &mut cache,
        };
        show(run_hook(&HookEvent::CartSave, &mut ctx).await);
    }

    // 4. Next page view: the pending addToCart payload rides out with the
    //    header render. The host invalidated the header cache when the
    //    cart changed.
    println!("\n--- 4. Next page view ---");
    cache.clear();
    {
        let request = StaticRequest::new(PageView::Storefront).with_cart(123);
        let mut session = HookSession::new(&mut visitor_jar);
        let mut ctx = HookContext {
            config: &config,
            request: &request,
            catalog: &catalog,
            checkout: &checkout,
            session: &mut session,
            cache: &mut cache,
        };
        show(run_hook(&HookEvent::DisplayHeader, &mut ctx).await);
    }

    // 5. Order confirmation page: conversion scalars plus the render.
    println!("\n--- 5. Order confirmation ---");
    cache.clear();
    {
        let request = StaticRequest::new(PageView::Storefront);
        let mut session = HookSession::new(&mut visitor_jar);
        let mut ctx = HookContext {
            config: &config,
            request: &request,
            catalog: &catalog,
            checkout: &checkout,
            session: &mut session,
            cache: &mut cache,
        };
        let confirmation = HookEvent::OrderConfirmation {
            order_id: 7,
            total_to_pay: Decimal::new(24000, 2),
        };
        show(run_hook(&confirmation, &mut ctx).await);
        show(run_hook(&HookEvent::DisplayHeader, &mut ctx).await);
    }

    // 6. Back office: the merchant registers the payment on the order
    //    detail screen. The purchase lands in the merchant's own jar and
    //    the back-office header pushes it out in the same request.
    println!("\n--- 6. Payment registered in the back office ---");
    cache.clear();
    let mut merchant_jar = MemoryStore::new();
    {
        let request = StaticRequest::new(PageView::AdminOrders).with_param("id_order", "7");
        let mut session = HookSession::new(&mut merchant_jar);
        let mut ctx = HookContext {
            config: &config,
            request: &request,
            catalog: &catalog,
            checkout: &checkout,
            session: &mut session,
            cache: &mut cache,
        };
        let payment = HookEvent::OrderPaymentAdded {
            order_reference: "XKBKNABJK".to_string(),
        };
        show(run_hook(&payment, &mut ctx).await);
        show(run_hook(&HookEvent::BackOfficeHeader, &mut ctx).await);
    }

    println!("\nDone.");
    Ok(())
}

fn show(outcome: HookOutcome) {
    match outcome {
        HookOutcome::Rendered { html } => println!("rendered header:\n{html}"),
        HookOutcome::Recorded => println!("recorded into the data layer"),
        HookOutcome::Skipped(reason) => println!("skipped: {reason:?}"),
    }
}

fn anvil_page_product() -> PageProductRecord {
    PageProductRecord {
        id: 11,
        reference: "AN-1".to_string(),
        name: "Anvil".to_string(),
        category: "home".to_string(),
        manufacturer_name: "Acme".to_string(),
        price: Decimal::from(100),
        tax_rate: Decimal::from(20),
    }
}

fn anvil_cart_line() -> CartLineRecord {
    CartLineRecord {
        id: 11,
        reference: "AN-1".to_string(),
        name: "Anvil".to_string(),
        category: "home".to_string(),
        manufacturer_id: Some(3),
        price: Decimal::new(12000, 2),
        quantity: 2,
        attributes: String::new(),
    }
}

/// Registrar standing in for the host's hook table.
struct PrintRegistrar;

impl HookRegistrar for PrintRegistrar {
    fn register(&mut self, hook: HookKind) -> Result<(), String> {
        println!("host registered hook: {hook}");
        Ok(())
    }

    fn unregister(&mut self, hook: HookKind) -> Result<(), String> {
        println!("host unregistered hook: {hook}");
        Ok(())
    }
}
