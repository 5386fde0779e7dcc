use serde::de::{Deserialize, Deserializer};
use serde_json::Value;

/// Read any scalar as its string form. Values which have no sensible string
/// form (`null`, arrays, objects) are treated as absent.
pub fn scalar_string<'a, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'a>,
{
    Value::deserialize(deserializer).map(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

#[test]
fn test_scalar_string() {
    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct T {
        #[serde(default, deserialize_with = "scalar_string")]
        val: Option<String>,
    }

    let de = |s: &str| serde_json::from_str::<T>(s).unwrap().val;

    assert_eq!(de(r#"{"val": "abc"}"#), Some("abc".to_owned()));
    assert_eq!(de(r#"{"val": 123}"#), Some("123".to_owned()));
    assert_eq!(de(r#"{"val": true}"#), Some("true".to_owned()));
    assert_eq!(de(r#"{"val": null}"#), None);
    assert_eq!(de(r#"{"val": ["abc"]}"#), None);
    assert_eq!(de(r#"{"val": {"abc": 1}}"#), None);
    assert_eq!(de(r#"{}"#), None);
}
