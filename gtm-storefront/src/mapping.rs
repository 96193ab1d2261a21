//! Host record to payload field mapping
//!
//! Pure translation from provider records to the product and purchase
//! shapes the tag scripts expect. All price formatting funnels through
//! `gtm_datalayer::money` so every amount reaches the wire as a
//! two-decimal string.

use gtm_datalayer::money;
use gtm_datalayer::{Product, PurchaseSummary};
use rust_decimal::Decimal;

use crate::providers::{
    CartLineRecord, CatalogProductRecord, CouponRecord, OrderRecord, PageProductRecord,
};

/// Product for a detail view. The page shows the price tax included,
/// derived from the base price and the tax rate. The variant is not
/// observable on the page and stays empty.
pub fn page_view_product(record: &PageProductRecord) -> Product {
    let tax_factor = Decimal::ONE + record.tax_rate / Decimal::ONE_HUNDRED;
    Product {
        brand: record.manufacturer_name.clone(),
        category: record.category.clone(),
        id: record.reference.clone(),
        name: record.name.clone(),
        price: money::format_amount(record.price * tax_factor),
        quantity: None,
        variant: String::new(),
    }
}

/// Product for a cart line. `brand` is resolved by the caller via the
/// manufacturer lookup; `quantity` comes from the request on cart actions
/// and from the line itself on purchases.
pub fn cart_product(record: &CartLineRecord, brand: String, quantity: u32) -> Product {
    Product {
        brand,
        category: record.category.clone(),
        id: record.reference.clone(),
        name: record.name.clone(),
        price: money::format_amount(record.price),
        quantity: Some(quantity),
        variant: record.attributes.clone(),
    }
}

/// Product for a cart line removed through the delete control. The
/// removed quantity is not observable and is reported as 1.
pub fn removed_product(record: &CatalogProductRecord) -> Product {
    Product {
        brand: record.manufacturer_name.clone(),
        category: record.category.clone(),
        id: record.reference.clone(),
        name: record.name.clone(),
        price: money::format_amount(record.price),
        quantity: Some(1),
        variant: record.variant.clone(),
    }
}

/// Purchase summary for an order. `tax` stays a raw number while
/// `revenue` and `shipping` are two-decimal strings.
pub fn purchase_summary(
    order: &OrderRecord,
    coupons: &[CouponRecord],
    shop_name: &str,
) -> PurchaseSummary {
    PurchaseSummary {
        affiliation: shop_name.to_string(),
        coupon: join_coupons(coupons),
        id: order.id,
        revenue: money::format_amount(order.total_paid_tax_incl),
        tax: money::to_f64(order.total_paid_tax_incl - order.total_paid_tax_excl),
        shipping: money::format_amount(order.total_shipping_tax_incl),
    }
}

/// Coupon codes joined by `", "`. A rule's display name substitutes for
/// an empty code so automatic rules still show up.
pub fn join_coupons(coupons: &[CouponRecord]) -> String {
    coupons
        .iter()
        .map(|coupon| {
            if coupon.code.is_empty() {
                coupon.name.as_str()
            } else {
                coupon.code.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_view_product_applies_tax_rate() {
        let record = PageProductRecord {
            id: 11,
            reference: "reference".to_string(),
            name: "name".to_string(),
            category: "category".to_string(),
            manufacturer_name: "brand".to_string(),
            price: Decimal::from(100),
            tax_rate: Decimal::from(20),
        };

        let product = page_view_product(&record);
        assert_eq!(product.price, "120.00");
        assert_eq!(product.id, "reference");
        assert_eq!(product.brand, "brand");
        assert_eq!(product.quantity, None);
        assert_eq!(product.variant, "");
    }

    #[test]
    fn test_cart_product_takes_brand_and_quantity_from_caller() {
        let record = CartLineRecord {
            id: 11,
            reference: "AN-1".to_string(),
            name: "Anvil".to_string(),
            category: "home".to_string(),
            manufacturer_id: Some(3),
            price: Decimal::new(9995, 2),
            quantity: 1,
            attributes: "Size - S".to_string(),
        };

        let product = cart_product(&record, "Acme".to_string(), 3);
        assert_eq!(product.brand, "Acme");
        assert_eq!(product.price, "99.95");
        assert_eq!(product.quantity, Some(3));
        assert_eq!(product.variant, "Size - S");
    }

    #[test]
    fn test_removed_product_reports_quantity_one() {
        let record = CatalogProductRecord {
            id: 11,
            reference: "AN-1".to_string(),
            name: "Anvil".to_string(),
            category: "home".to_string(),
            manufacturer_name: "Acme".to_string(),
            price: Decimal::from(100),
            variant: "Size - S".to_string(),
        };

        let product = removed_product(&record);
        assert_eq!(product.quantity, Some(1));
        assert_eq!(product.price, "100.00");
        assert_eq!(product.variant, "Size - S");
    }

    #[test]
    fn test_purchase_summary_formats_totals() {
        let order = OrderRecord {
            id: 1,
            reference: "REFERENCE".to_string(),
            cart_id: 123,
            total_paid_tax_incl: Decimal::from(120),
            total_paid_tax_excl: Decimal::from(100),
            total_shipping_tax_incl: Decimal::from(20),
        };

        let summary = purchase_summary(&order, &[], "My shop name");
        assert_eq!(summary.affiliation, "My shop name");
        assert_eq!(summary.id, 1);
        assert_eq!(summary.revenue, "120.00");
        assert_eq!(summary.tax, 20.0);
        assert_eq!(summary.shipping, "20.00");
        assert_eq!(summary.coupon, "");
    }

    #[test]
    fn test_join_coupons_prefers_codes_over_names() {
        let coupons = vec![
            CouponRecord {
                code: "PROMO-CODE-1".to_string(),
                name: "Spring sale".to_string(),
            },
            CouponRecord {
                code: String::new(),
                name: "Loyalty discount".to_string(),
            },
            CouponRecord {
                code: "PROMO-CODE-2".to_string(),
                name: String::new(),
            },
        ];

        assert_eq!(
            join_coupons(&coupons),
            "PROMO-CODE-1, Loyalty discount, PROMO-CODE-2"
        );
    }
}
