//! Fixture index records.

use crate::matching::RequestSignature;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

const BASE_URL_KEY: &str = "base_url";
const URL_KEY: &str = "url";
const PICKLE_PATH_KEY: &str = "pickle_path";
const ARTIFACT_PATH_KEY: &str = "artifact_path";
const PARAMS_KEY: &str = "params";

const RESERVED_KEYS: [&str; 5] = [
    BASE_URL_KEY,
    URL_KEY,
    PICKLE_PATH_KEY,
    ARTIFACT_PATH_KEY,
    PARAMS_KEY,
];

/// Request signature mapped to a stored response artifact.
///
/// On disk a record is one flat mapping: `base_url` (or `url`), `pickle_path`
/// (or `artifact_path`), and every other key is a request parameter. A nested
/// `params` mapping is merged into the flat parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessFixtureRecord {
    pub url: String,
    pub params: BTreeMap<String, Value>,
    pub artifact_path: PathBuf,
}

impl SuccessFixtureRecord {
    pub fn signature(&self) -> RequestSignature {
        RequestSignature::new(&self.url, &self.params)
    }
}

impl Serialize for SuccessFixtureRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let path = self.artifact_path.to_str().ok_or_else(|| {
            <S::Error as serde::ser::Error>::custom("artifact path is not valid UTF-8")
        })?;

        let mut map = Map::new();
        map.insert(BASE_URL_KEY.into(), Value::String(self.url.clone()));

        // A parameter shadowing a reserved key can only round-trip nested
        let params = self.params.iter().map(|(k, v)| (k.clone(), v.clone()));
        if self.params.keys().any(|k| RESERVED_KEYS.contains(&k.as_str())) {
            map.insert(PARAMS_KEY.into(), Value::Object(params.collect()));
        } else {
            map.extend(params);
        }

        map.insert(PICKLE_PATH_KEY.into(), Value::String(path.to_owned()));
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SuccessFixtureRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(mut map) = Value::deserialize(deserializer)? else {
            return Err(D::Error::custom("fixture record must be a mapping"));
        };

        let url = match (map.remove(BASE_URL_KEY), map.remove(URL_KEY)) {
            (Some(Value::String(url)), None) | (None, Some(Value::String(url))) => url,
            (Some(_), Some(_)) => {
                return Err(D::Error::custom(
                    "fixture record has both `base_url` and `url`",
                ))
            }
            (None, None) => {
                return Err(D::Error::custom(
                    "fixture record is missing `base_url` or `url`",
                ))
            }
            _ => return Err(D::Error::custom("fixture record url must be a string")),
        };

        let pickle_path = map.remove(PICKLE_PATH_KEY);
        let artifact_path = match pickle_path.or(map.remove(ARTIFACT_PATH_KEY)) {
            Some(Value::String(path)) => PathBuf::from(path),
            Some(_) => return Err(D::Error::custom("fixture record path must be a string")),
            None => {
                return Err(D::Error::custom(
                    "fixture record is missing `pickle_path`",
                ))
            }
        };

        let nested = match map.remove(PARAMS_KEY) {
            Some(Value::Object(nested)) => nested,
            Some(Value::Null) | None => Map::new(),
            Some(_) => return Err(D::Error::custom("fixture record `params` must be a mapping")),
        };

        let params = map.into_iter().chain(nested).collect();

        Ok(Self {
            url,
            params,
            artifact_path,
        })
    }
}

/// HTTP error code mapped to a stored response artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFixtureRecord {
    /// HTTP status code of the stored error response
    #[serde(rename = "error_type")]
    pub error_code: u16,
    #[serde(rename = "pickle_path")]
    pub artifact_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_success_record_flat_yaml() {
        let yaml = r#"
base_url: https://api.yelp.com/v3/businesses/search
location: Newark, NJ
term: laundromat
limit: 5
pickle_path: fixtures/laundromats.json
"#;
        let record: SuccessFixtureRecord = serde_yaml::from_str(yaml).expect("Should deserialize");
        assert_eq!(record.url, "https://api.yelp.com/v3/businesses/search");
        assert_eq!(record.artifact_path, PathBuf::from("fixtures/laundromats.json"));
        assert_eq!(record.params.len(), 3);
        assert_eq!(record.params["limit"], json!(5));
        assert_eq!(record.params["location"], json!("Newark, NJ"));
    }

    #[rstest]
    #[case(json!({"url": "https://a", "pickle_path": "a.json", "q": "x"}))]
    #[case(json!({"base_url": "https://a", "artifact_path": "a.json", "q": "x"}))]
    #[case(json!({"url": "https://a", "pickle_path": "a.json", "params": {"q": "x"}}))]
    fn test_success_record_key_aliases(#[case] input: Value) {
        let record: SuccessFixtureRecord =
            serde_json::from_value(input).expect("Should deserialize");
        assert_eq!(record.url, "https://a");
        assert_eq!(record.artifact_path, PathBuf::from("a.json"));
        assert_eq!(record.params.get("q"), Some(&json!("x")));
    }

    #[rstest]
    #[case(json!({"pickle_path": "a.json"}), "missing `base_url`")]
    #[case(json!({"base_url": "https://a"}), "missing `pickle_path`")]
    #[case(json!({"base_url": "https://a", "url": "https://b", "pickle_path": "a"}), "both")]
    #[case(json!({"base_url": 5, "pickle_path": "a"}), "url must be a string")]
    #[case(json!({"base_url": "https://a", "pickle_path": "a", "params": [1]}), "`params` must be a mapping")]
    #[case(json!(["not", "a", "mapping"]), "must be a mapping")]
    fn test_success_record_rejects_malformed(#[case] input: Value, #[case] message: &str) {
        let err = serde_json::from_value::<SuccessFixtureRecord>(input).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "unexpected error: {}",
            err
        );
    }

    #[rstest]
    fn test_success_record_serializes_flat() {
        let record = SuccessFixtureRecord {
            url: "https://a".to_string(),
            params: BTreeMap::from([("term".to_string(), json!("laundromat"))]),
            artifact_path: PathBuf::from("a.json"),
        };
        let value = serde_json::to_value(&record).expect("Should serialize");
        assert_eq!(
            value,
            json!({"base_url": "https://a", "term": "laundromat", "pickle_path": "a.json"})
        );
    }

    #[rstest]
    fn test_success_record_nests_params_shadowing_reserved_keys() {
        let record = SuccessFixtureRecord {
            url: "https://a".to_string(),
            params: BTreeMap::from([("url".to_string(), json!("https://target"))]),
            artifact_path: PathBuf::from("a.json"),
        };
        let value = serde_json::to_value(&record).expect("Should serialize");
        assert_eq!(value["params"], json!({"url": "https://target"}));

        let back: SuccessFixtureRecord = serde_json::from_value(value).expect("Should deserialize");
        assert_eq!(back, record);
    }

    #[rstest]
    fn test_error_record_csv_columns() {
        let csv_text = "error_type,pickle_path\n404,errors/not_found.json\n";
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let records: Vec<ErrorFixtureRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("Should deserialize");
        assert_eq!(
            records,
            vec![ErrorFixtureRecord {
                error_code: 404,
                artifact_path: PathBuf::from("errors/not_found.json"),
            }]
        );
    }
}
