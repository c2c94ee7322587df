//! Query string parsing with URL decoding.

use std::collections::BTreeMap;

/// Parse a query string into a sorted map with URL decoding.
///
/// A repeated key keeps every value in the order it appeared, the same form
/// [`wire_values`](crate::matching::wire_values) produces for list parameters.
pub fn parse_query_string(query_str: &str) -> BTreeMap<String, Vec<String>> {
    let mut result: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for pair in query_str.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        result.entry(decode(raw_key)).or_default().push(decode(raw_value));
    }

    result
}

fn decode(raw: &str) -> String {
    // Form encoding sends spaces as '+'
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|s| s.into_owned())
        .unwrap_or(raw)
}
