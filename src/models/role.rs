use std::fmt;

use serde::{Deserialize, Serialize};

/// Role an advocate played in a specific argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Solicitor General")]
    SolicitorGeneral,
    #[serde(rename = "Government Counsel")]
    GovernmentCounsel,
    #[serde(rename = "State Counsel")]
    StateCounsel,
    #[serde(rename = "Private Counsel")]
    PrivateCounsel,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SolicitorGeneral => "Solicitor General",
            Role::GovernmentCounsel => "Government Counsel",
            Role::StateCounsel => "State Counsel",
            Role::PrivateCounsel => "Private Counsel",
        }
    }

    pub fn speaker_type(&self) -> SpeakerType {
        match self {
            Role::SolicitorGeneral => SpeakerType::Sg,
            _ => SpeakerType::Other,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Procedural side taken from the advocate description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Petitioner,
    Respondent,
    Amicus,
    Unknown,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Petitioner => "Petitioner",
            Side::Respondent => "Respondent",
            Side::Amicus => "Amicus",
            Side::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary label used by downstream analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeakerType {
    #[serde(rename = "SG")]
    Sg,
    Other,
}

impl SpeakerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeakerType::Sg => "SG",
            SpeakerType::Other => "Other",
        }
    }
}

impl fmt::Display for SpeakerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort affiliation; `Unknown` when the description gave nothing usable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Affiliation {
    Named(String),
    #[default]
    Unknown,
}

impl Affiliation {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn as_str(&self) -> &str {
        match self {
            Affiliation::Named(name) => name,
            Affiliation::Unknown => Self::UNKNOWN,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Affiliation::Unknown)
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Affiliation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Affiliation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(if value == Self::UNKNOWN {
            Affiliation::Unknown
        } else {
            Affiliation::Named(value)
        })
    }
}

/// Output of the role classifier for one (speaker, case, year)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub role: Role,
    pub side: Side,
    pub affiliation: Affiliation,
}

impl Classification {
    /// Result used when nothing is known about the speaker
    pub fn unknown_private() -> Self {
        Self {
            role: Role::PrivateCounsel,
            side: Side::Unknown,
            affiliation: Affiliation::Unknown,
        }
    }

    pub fn speaker_type(&self) -> SpeakerType {
        self.role.speaker_type()
    }
}
