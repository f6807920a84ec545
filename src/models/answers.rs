use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Questionnaire answers sent by the storefront widget
///
/// Every field is optional; an absent field carries no preference.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub profile: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub intensity: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub occasion: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sensitivity: Option<String>,
}

impl Answers {
    /// Parses the `q` query parameter, falling back to no preferences on bad input
    pub fn from_query(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str::<Map<String, Value>>(raw)
            .and_then(|fields| serde_json::from_value(Value::Object(fields)))
        {
            Ok(answers) => answers,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed answers payload");
                Self::default()
            }
        }
    }
}

/// A single answer value; booleans and numbers keep their JSON spelling
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Flag(bool),
    Number(serde_json::Number),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_string(self) -> Option<String> {
        match self {
            Scalar::Text(value) => Some(value),
            Scalar::Flag(value) => Some(value.to_string()),
            Scalar::Number(value) => Some(value.to_string()),
            Scalar::Other(_) => None,
        }
    }
}

/// Wrongly typed values become an absent answer instead of failing the payload
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_string))
}

/// Occasion arrives either as a string or as a list of strings
fn string_or_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Many(Vec<Scalar>),
        One(Scalar),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::One(value)) => value.into_string(),
        Some(Raw::Many(values)) => {
            let values: Vec<String> = values.into_iter().filter_map(Scalar::into_string).collect();
            (!values.is_empty()).then(|| values.join(", "))
        }
        None => None,
    })
}
