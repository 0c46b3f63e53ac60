use serde::{Deserialize, Deserializer, Serialize};

/// Role type Oyez attaches to sitting justices
pub const JUSTICE_ROLE_TYPE: &str = "scotus_justice";

/// Root of an Oyez oral-argument case file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OyezCase {
    #[serde(default)]
    pub transcript: Option<OyezTranscript>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub advocates: Vec<AdvocateEntry>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub docket_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub argument_date: Option<String>,
    /// Argument time in seconds since the epoch
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub unix_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OyezTranscript {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<OyezSection>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OyezSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub turns: Vec<OyezTurn>,
}

/// A single speaking turn as Oyez records it
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OyezTurn {
    #[serde(default)]
    pub speaker: Option<OyezSpeaker>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text_blocks: Vec<TextBlock>,
}

impl OyezTurn {
    /// Concatenate all text fragments of this turn with single spaces
    pub fn joined_text(&self) -> String {
        self.text_blocks
            .iter()
            .map(|tb| tb.text.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: Option<String>,
}

/// Speaker attached to a turn
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OyezSpeaker {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "ID", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// Free-form role records; entries that are not objects are ignored
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<serde_json::Value>,
}

impl OyezSpeaker {
    /// Whether any role record marks this speaker as a sitting justice
    pub fn is_justice(&self) -> bool {
        self.roles.iter().any(|role| {
            role.get("type").and_then(|t| t.as_str()) == Some(JUSTICE_ROLE_TYPE)
        })
    }
}

/// One entry of the case's advocate roster
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdvocateEntry {
    #[serde(default)]
    pub advocate: Option<AdvocatePerson>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub advocate_description: Option<String>,
}

impl AdvocateEntry {
    pub fn name(&self) -> Option<&str> {
        self.advocate.as_ref().and_then(|a| a.name.as_deref())
    }

    pub fn id(&self) -> Option<&str> {
        self.advocate.as_ref().and_then(|a| a.id.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.advocate_description.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdvocatePerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "ID", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Oyez identifiers show up as numbers or strings; compare them as strings
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Optional text metadata; any non-string value reads as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Epoch seconds as an integer, a float (truncated), or a numeric string
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
