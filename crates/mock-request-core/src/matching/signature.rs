//! Request signatures: the normalised key fixtures are matched on.

use crate::matching::query::parse_query_string;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// URL (without query string) plus parameters in their wire form.
///
/// Each parameter maps to the values it is sent with, in order: a scalar is
/// one value (commas included), a list or a repeated query key is several.
/// Parameter order and the choice between an embedded query string and a
/// params mapping do not affect equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestSignature {
    pub url: String,
    pub params: BTreeMap<String, Vec<String>>,
}

impl RequestSignature {
    pub fn new<'a, I>(url: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let (base, query) = url.split_once('?').unwrap_or((url, ""));
        let mut wire_params = parse_query_string(query);

        for (name, value) in params {
            let values = wire_values(value);
            if !values.is_empty() {
                wire_params.entry(name.clone()).or_default().extend(values);
            }
        }

        Self {
            url: base.to_owned(),
            params: wire_params,
        }
    }
}

impl fmt::Display for RequestSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)?;
        let pairs = self
            .params
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k, v)));
        for (i, (k, v)) in pairs.enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}

/// Values a parameter is sent with on the wire.
///
/// `null` yields nothing: an HTTP client drops the parameter entirely. A list
/// repeats the key once per non-null item.
pub fn wire_values(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().flat_map(wire_values).collect(),
        Value::String(s) => vec![s.clone()],
        Value::Bool(b) => vec![b.to_string()],
        Value::Number(n) => vec![n.to_string()],
        Value::Object(_) => vec![value.to_string()],
    }
}
