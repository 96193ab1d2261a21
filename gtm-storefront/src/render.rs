//! Header snippet rendering
//!
//! Produces the tag container loader block injected into the page head:
//! a `dataLayer` bootstrap seeded with the flushed payload, the standard
//! asynchronous loader script, and the noscript iframe fallback carrying
//! the payload as URL query parameters.

use std::collections::HashMap;

use crate::context::RequestContext;

const LOADER_HEAD: &str = "<!-- Google Tag Manager -->\n<script>var dataLayer = [";
const LOADER_MID: &str = "];</script>\n<script>(function(w,d,s,l,i){w[l]=w[l]||[];w[l].push({'gtm.start':new Date().getTime(),event:'gtm.js'});var f=d.getElementsByTagName(s)[0],j=d.createElement(s),dl=l!='dataLayer'?'&l='+l:'';j.async=true;j.src='https://www.googletagmanager.com/gtm.js?id='+i+dl;f.parentNode.insertBefore(j,f);})(window,document,'script','dataLayer','";
const LOADER_TAIL: &str = "');</script>\n<!-- End Google Tag Manager -->\n";
const NOSCRIPT_HEAD: &str =
    "<noscript><iframe src=\"https://www.googletagmanager.com/ns.html?id=";
const NOSCRIPT_TAIL: &str =
    "\" height=\"0\" width=\"0\" style=\"display:none;visibility:hidden\"></iframe></noscript>";

/// Everything the header snippet interpolates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateVars {
    pub container_id: String,
    /// Flushed payload JSON, may be empty.
    pub data_layer: String,
    /// `&`-prefixed query encoding of the same payload, may be empty.
    pub data_layer_query: String,
}

/// Render the full header block. An empty `data_layer` seeds an empty
/// `dataLayer` array so the loader still initializes.
pub fn render_header_snippet(vars: &TemplateVars) -> String {
    let mut html = String::with_capacity(
        LOADER_HEAD.len()
            + LOADER_MID.len()
            + LOADER_TAIL.len()
            + NOSCRIPT_HEAD.len()
            + NOSCRIPT_TAIL.len()
            + vars.data_layer.len()
            + vars.data_layer_query.len()
            + vars.container_id.len() * 2,
    );
    html.push_str(LOADER_HEAD);
    html.push_str(&vars.data_layer);
    html.push_str(LOADER_MID);
    html.push_str(&vars.container_id);
    html.push_str(LOADER_TAIL);
    html.push_str(NOSCRIPT_HEAD);
    html.push_str(&vars.container_id);
    html.push_str(&vars.data_layer_query);
    html.push_str(NOSCRIPT_TAIL);
    html
}

/// Per-process cache of rendered header snippets.
///
/// The header only depends on shop, language and currency, so one render
/// serves every visitor sharing those. A hit must not touch the data
/// layer buffer: pending payloads stay in the store until an uncached
/// render flushes them.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    entries: HashMap<String, String>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn store(&mut self, key: &str, html: &str) {
        self.entries.insert(key.to_string(), html.to_string());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cache key for the current request.
pub fn cache_key(request: &dyn RequestContext) -> String {
    format!(
        "header|{}|{}|{}",
        request.shop_name(),
        request.language_id(),
        request.currency_code()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{PageView, StaticRequest};

    #[test]
    fn test_snippet_seeds_data_layer_and_loader() {
        let vars = TemplateVars {
            container_id: "GTM-ABC123".to_string(),
            data_layer: r#"{"event":"addToCart"}"#.to_string(),
            data_layer_query: "&event=addToCart".to_string(),
        };

        let html = render_header_snippet(&vars);
        assert!(html.contains(r#"var dataLayer = [{"event":"addToCart"}];"#));
        assert!(html.contains("'dataLayer','GTM-ABC123'"));
        assert!(html.contains(
            "https://www.googletagmanager.com/ns.html?id=GTM-ABC123&event=addToCart\""
        ));
    }

    #[test]
    fn test_empty_payload_seeds_empty_array() {
        let vars = TemplateVars {
            container_id: "GTM-ABC123".to_string(),
            data_layer: String::new(),
            data_layer_query: String::new(),
        };

        let html = render_header_snippet(&vars);
        assert!(html.contains("var dataLayer = [];"));
        assert!(html.contains("ns.html?id=GTM-ABC123\""));
    }

    #[test]
    fn test_cache_stores_and_clears() {
        let mut cache = RenderCache::new();
        assert!(cache.get("k").is_none());

        cache.store("k", "<script></script>");
        assert_eq!(cache.get("k"), Some("<script></script>"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_key_varies_by_currency_and_language() {
        let base = StaticRequest::new(PageView::Storefront);
        let other_currency = base.clone().with_currency("USD");
        let other_language = base.clone().with_language(2);

        assert_ne!(cache_key(&base), cache_key(&other_currency));
        assert_ne!(cache_key(&base), cache_key(&other_language));
        assert_eq!(cache_key(&base), cache_key(&base.clone()));
    }
}
