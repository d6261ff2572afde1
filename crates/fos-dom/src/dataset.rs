//! DOMStringMap (dataset)
//!
//! Raw `data-*` attribute access plus the typed view of the same attributes
//! that views read at bind time.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Number, Value};

/// DOMStringMap for data-* attributes
#[derive(Debug, Clone, Default)]
pub struct DOMStringMap {
    data: HashMap<String, String>,
}

impl DOMStringMap {
    /// Create empty string map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from data-* attributes
    pub fn from_attributes<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut data = HashMap::new();
        for (name, value) in attrs {
            if let Some(key) = name.strip_prefix("data-") {
                data.insert(to_camel_case(key), value.to_string());
            }
        }
        Self { data }
    }

    /// Get value by camelCase key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }

    /// Check if key exists
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate (camelCase key, raw value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert key to attribute name
    pub fn to_attribute_name(key: &str) -> String {
        format!("data-{}", to_kebab_case(key))
    }
}

/// Typed data attributes.
///
/// Values are coerced the way jQuery's `.data()` reads them: booleans,
/// `null`, numbers that survive a round trip, JSON objects and arrays, and
/// plain strings for everything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    values: BTreeMap<String, Value>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every entry of a raw string map
    pub fn from_string_map(map: &DOMStringMap) -> Self {
        map.iter()
            .map(|(key, raw)| (key, parse_data_value(raw)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Coerce a raw attribute string into a typed value
pub fn parse_data_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Some(number) = parse_exact_number(raw) {
        return Value::Number(number);
    }

    let looks_like_json = (raw.starts_with('{') && raw.ends_with('}'))
        || (raw.starts_with('[') && raw.ends_with(']'));
    if looks_like_json {
        if let Ok(value) = serde_json::from_str(raw) {
            return value;
        }
    }

    Value::String(raw.to_string())
}

/// Numbers are only accepted when printing them back gives the same text,
/// so "007" or "1.50" stay strings.
fn parse_exact_number(raw: &str) -> Option<Number> {
    if let Ok(int) = raw.parse::<i64>() {
        return (int.to_string() == raw).then(|| Number::from(int));
    }
    let float = raw.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if float.to_string() == raw {
        Number::from_f64(float)
    } else {
        None
    }
}

/// Convert kebab-case to camelCase
fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase to kebab-case
fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
