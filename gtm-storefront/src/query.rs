//! Query-string encoding of the data layer
//!
//! The noscript iframe cannot run the tag script, so the flushed payload
//! rides on the iframe URL as nested query parameters
//! (`ecommerce[detail][products][id]=...`, fully percent-encoded).

use serde_json::Value;
use urlencoding::encode;

/// Encode a flushed payload JSON string as nested query parameters,
/// prefixed with `&` so it can be appended after `?id=<container>`.
/// Empty, undecodable, and non-object input all encode to `""`.
pub fn query_from_json(json: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(json) else {
        return String::new();
    };
    let Value::Object(map) = value else {
        return String::new();
    };

    let mut pairs = Vec::new();
    for (key, child) in &map {
        collect_pairs(&mut pairs, encode(key).into_owned(), child);
    }

    if pairs.is_empty() {
        String::new()
    } else {
        format!("&{}", pairs.join("&"))
    }
}

fn collect_pairs(pairs: &mut Vec<String>, key: String, value: &Value) {
    match value {
        // Nulls never make it onto the URL.
        Value::Null => {}
        Value::Bool(flag) => pairs.push(format!("{key}={}", if *flag { 1 } else { 0 })),
        Value::Number(number) => pairs.push(format!("{key}={number}")),
        Value::String(text) => pairs.push(format!("{key}={}", encode(text))),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_pairs(pairs, nested_key(&key, &index.to_string()), item);
            }
        }
        Value::Object(map) => {
            for (child_key, child) in map {
                collect_pairs(pairs, nested_key(&key, child_key), child);
            }
        }
    }
}

/// `parent[child]` with the bracket segment percent-encoded, brackets
/// included.
fn nested_key(parent: &str, child: &str) -> String {
    format!("{parent}{}", encode(&format!("[{child}]")))
}
