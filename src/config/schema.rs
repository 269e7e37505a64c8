use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recognized configuration keys. The config file is a flat JSON object;
/// unknown keys are carried along but never read.
pub mod keys {
    pub const NAME1: &str = "data-name1";
    pub const NAME2: &str = "data-name2";
    pub const LASTNAME: &str = "data-lastname";
    pub const REGION: &str = "data-region";
    pub const RENT_LIMIT: &str = "data-rent-limit";
    pub const STUDY_FIELD: &str = "data-study-field";
    pub const HOBBY_PERSON2: &str = "data-hobby-person2";
    pub const PHONE: &str = "data-phone";
    pub const EMAIL: &str = "data-email";
    pub const NAME1_STUDY: &str = "data-name1-study";
    pub const NAME2_HOBBY: &str = "data-name2-hobby";
    pub const CITY: &str = "data-city";
}

/// The eleven keys bound 1:1 into the page slot carrying the same id.
/// City and last name have dedicated defaulting logic and are not listed here.
pub const DIRECT_KEYS: [&str; 11] = [
    keys::NAME1,
    keys::NAME2,
    keys::LASTNAME,
    keys::REGION,
    keys::RENT_LIMIT,
    keys::STUDY_FIELD,
    keys::HOBBY_PERSON2,
    keys::PHONE,
    keys::EMAIL,
    keys::NAME1_STUDY,
    keys::NAME2_HOBBY,
];

/// The personal data injected into the page: a flat map from key to value.
/// Values are expected to be strings (occasionally numeric); no schema is
/// enforced beyond presence checks at hydration time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SiteConfig {
    values: Map<String, Value>,
}

impl SiteConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String form of the value under `key`; empty when the key is absent.
    pub fn get_str(&self, key: &str) -> String {
        self.get(key).map(value_text).unwrap_or_default()
    }

    /// String form of the value under `key`, falling back to `default` when
    /// the value is missing. The original page read `config[key] || default`,
    /// so null, the empty string, `0` and `false` fall back exactly like an
    /// absent key.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(value) if !is_falsy(value) => value_text(value),
            _ => default.to_string(),
        }
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Self { values }
    }
}

/// Display form of a JSON scalar for text binding.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(_) => "{...}".to_string(),
    }
}

/// The values a JavaScript `||` fallback skips over.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
