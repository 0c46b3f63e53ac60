use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// End-year markers meaning the attorney is still serving
const OPEN_MARKERS: &[&str] = &["present", "open", "current", "ongoing"];

/// One stint of service in the Solicitor General's office
///
/// A missing `start_year` makes the interval unusable; a missing `end_year`
/// means the attorney is still serving. An end year that is present but
/// unreadable also makes the interval unusable, so a closed stint can never
/// turn into an open one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawInterval")]
pub struct ServiceInterval {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl ServiceInterval {
    pub fn closed(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year: Some(start_year),
            end_year: Some(end_year),
        }
    }

    pub fn open(start_year: i32) -> Self {
        Self {
            start_year: Some(start_year),
            end_year: None,
        }
    }

    /// Whether this interval covers `year`
    pub fn covers(&self, year: i32) -> bool {
        match self.start_year {
            Some(start) => start <= year && self.end_year.is_none_or(|end| year <= end),
            None => false,
        }
    }
}

/// A year field as it appears in a registry file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum YearField {
    /// Absent, `null`, or an explicit marker like "present"
    #[default]
    Open,
    Year(i32),
    Malformed,
}

#[derive(Deserialize)]
struct RawInterval {
    #[serde(default, deserialize_with = "lenient_year")]
    start_year: YearField,
    #[serde(default, deserialize_with = "lenient_year")]
    end_year: YearField,
}

impl From<RawInterval> for ServiceInterval {
    fn from(raw: RawInterval) -> Self {
        let start_year = match raw.start_year {
            YearField::Year(year) => Some(year),
            YearField::Open | YearField::Malformed => None,
        };

        match raw.end_year {
            YearField::Open => Self {
                start_year,
                end_year: None,
            },
            YearField::Year(year) => Self {
                start_year,
                end_year: Some(year),
            },
            YearField::Malformed => {
                warn!(
                    "Unreadable end year for interval starting {:?}; interval ignored",
                    start_year
                );
                Self {
                    start_year: None,
                    end_year: None,
                }
            }
        }
    }
}

/// Years arrive as integers, integral floats, numeric strings, `null`, or
/// markers like "present"
fn lenient_year<'de, D>(deserializer: D) -> Result<YearField, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => YearField::Open,
        Some(serde_json::Value::Number(n)) => number_year(&n),
        Some(serde_json::Value::String(s)) => string_year(&s),
        Some(_) => YearField::Malformed,
    })
}

fn number_year(n: &serde_json::Number) -> YearField {
    let year = match n.as_i64() {
        Some(y) => i32::try_from(y).ok(),
        None => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
            .map(|f| f as i32),
    };
    year.map_or(YearField::Malformed, YearField::Year)
}

fn string_year(s: &str) -> YearField {
    let trimmed = s.trim();
    if trimmed.is_empty()
        || OPEN_MARKERS
            .iter()
            .any(|m| trimmed.eq_ignore_ascii_case(m))
    {
        return YearField::Open;
    }
    trimmed
        .parse::<i32>()
        .map_or(YearField::Malformed, YearField::Year)
}
