use tracing::debug;

use super::description::parse_description;
use crate::models::{AdvocateEntry, Classification, Role};
use crate::roster::TenureRegistry;

/// Substring in a speaker's own name taken as a Solicitor General hint
///
/// Also matches anyone whose name merely contains "general"; kept for
/// parity with the labels already published from this pipeline.
const GENERAL_NAME_HINT: &str = "general";

/// Affiliation prefix marking state-government counsel
const STATE_AFFILIATION_MARKER: &str = "state of";

/// Assigns a role, side and affiliation to one advocate in one argument
///
/// Pure function of its inputs plus the injected, read-only registry.
#[derive(Debug, Clone, Copy)]
pub struct RoleClassifier<'a> {
    registry: &'a TenureRegistry,
}

impl<'a> RoleClassifier<'a> {
    pub fn new(registry: &'a TenureRegistry) -> Self {
        Self { registry }
    }

    /// Classify a speaker against the case's advocate roster
    ///
    /// Steps, each able to override the previous:
    /// 1. Match the roster entry by id, then by exact name
    /// 2. Parse its description
    /// 3. Check tenure for `year`
    /// 4. Base role from description signals
    /// 5. Active tenure forces Solicitor General
    pub fn classify(
        &self,
        speaker_name: Option<&str>,
        speaker_id: Option<&str>,
        advocates: &[AdvocateEntry],
        year: Option<i32>,
    ) -> Classification {
        let Some(entry) = find_advocate(advocates, speaker_name, speaker_id) else {
            debug!("No roster entry for {:?}; defaulting to private counsel", speaker_name);
            return Classification::unknown_private();
        };

        let signals = parse_description(entry.description());
        let is_active = self.registry.is_active(speaker_name, year);
        let name_hint = speaker_name
            .map(|n| n.to_lowercase().contains(GENERAL_NAME_HINT))
            .unwrap_or(false);

        let mut role = if signals.mentions_us_government {
            if is_active || name_hint {
                Role::SolicitorGeneral
            } else {
                Role::GovernmentCounsel
            }
        } else if signals
            .affiliation
            .as_str()
            .to_lowercase()
            .contains(STATE_AFFILIATION_MARKER)
        {
            Role::StateCounsel
        } else {
            Role::PrivateCounsel
        };

        // Tenure records outrank sparse descriptions such as "for Respondent"
        if is_active && role != Role::SolicitorGeneral {
            debug!(
                "Tenure override: {:?} active in {:?}, {} -> {}",
                speaker_name,
                year,
                role,
                Role::SolicitorGeneral
            );
            role = Role::SolicitorGeneral;
        }

        Classification {
            role,
            side: signals.side,
            affiliation: signals.affiliation,
        }
    }
}

/// Roster lookup: exact id match preferred, exact name match as fallback
fn find_advocate<'e>(
    advocates: &'e [AdvocateEntry],
    speaker_name: Option<&str>,
    speaker_id: Option<&str>,
) -> Option<&'e AdvocateEntry> {
    speaker_id
        .and_then(|id| advocates.iter().find(|a| a.id() == Some(id)))
        .or_else(|| speaker_name.and_then(|name| advocates.iter().find(|a| a.name() == Some(name))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Affiliation, AdvocatePerson, ServiceInterval, Side, SpeakerType};

    fn advocate(name: &str, id: Option<&str>, description: Option<&str>) -> AdvocateEntry {
        AdvocateEntry {
            advocate: Some(AdvocatePerson {
                name: Some(name.to_string()),
                id: id.map(str::to_string),
            }),
            advocate_description: description.map(str::to_string),
        }
    }

    fn registry() -> TenureRegistry {
        TenureRegistry::from_entries([
            ("Michael Dreeben", vec![ServiceInterval::open(2010)]),
            ("Elena Kagan", vec![ServiceInterval::closed(2009, 2010)]),
        ])
    }

    #[test]
    fn test_tenure_override_with_plain_description() {
        let registry = registry();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate("Elena Kagan", Some("1"), Some("for the Respondent"))];

        let result = classifier.classify(Some("Elena Kagan"), Some("1"), &roster, Some(2009));

        assert_eq!(result.role, Role::SolicitorGeneral);
        assert_eq!(result.side, Side::Respondent);
        assert_eq!(result.speaker_type(), SpeakerType::Sg);
    }

    #[test]
    fn test_private_attorney_without_tenure_not_sg() {
        // Former assistant to the SG arguing in private practice
        let registry = registry();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate("Lisa S. Blatt", Some("12345"), Some("for the Respondent"))];

        let result =
            classifier.classify(Some("Lisa S. Blatt"), Some("12345"), &roster, Some(2019));

        assert_eq!(result.role, Role::PrivateCounsel);
        assert_eq!(result.side, Side::Respondent);
        assert_eq!(result.affiliation, Affiliation::Named("Respondent".to_string()));
        assert_eq!(result.speaker_type(), SpeakerType::Other);
    }

    #[test]
    fn test_float_end_year_keeps_stint_closed() {
        let registry = TenureRegistry::from_json(
            r#"{"Lisa Schiavo Blatt": [{"start_year": 1996, "end_year": 2009.0}]}"#,
        )
        .unwrap();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate("Lisa S. Blatt", None, Some("for the Respondent"))];

        let result = classifier.classify(Some("Lisa S. Blatt"), None, &roster, Some(2019));

        assert_eq!(result.role, Role::PrivateCounsel);
        assert_eq!(result.speaker_type(), SpeakerType::Other);
    }

    #[test]
    fn test_normalized_tenure_match_without_description() {
        let registry = registry();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate("Michael R. Dreeben", None, None)];

        let result = classifier.classify(Some("Michael R. Dreeben"), None, &roster, Some(2015));

        assert_eq!(result.role, Role::SolicitorGeneral);
        assert_eq!(result.side, Side::Unknown);
        assert_eq!(result.affiliation, Affiliation::Unknown);
        assert_eq!(result.speaker_type(), SpeakerType::Sg);
    }

    #[test]
    fn test_state_counsel() {
        let registry = registry();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate("Jane Doe", Some("7"), Some("for the State of Ohio"))];

        let result = classifier.classify(Some("Jane Doe"), Some("7"), &roster, Some(2015));

        assert_eq!(result.role, Role::StateCounsel);
        assert_eq!(result.side, Side::Unknown);
        assert_eq!(result.affiliation, Affiliation::Named("State of Ohio".to_string()));
    }

    #[test]
    fn test_government_counsel_outside_tenure() {
        let registry = registry();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate(
            "John Roe",
            None,
            Some("Department of Justice, for the United States, as amicus curiae"),
        )];

        let result = classifier.classify(Some("John Roe"), None, &roster, Some(2015));

        assert_eq!(result.role, Role::GovernmentCounsel);
        assert_eq!(result.side, Side::Amicus);
        assert_eq!(result.affiliation, Affiliation::Named("United States".to_string()));
    }

    #[test]
    fn test_general_in_name_promotes_government_counsel() {
        let registry = TenureRegistry::new();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate(
            "Solicitor General Paul Clement",
            None,
            Some("for the United States"),
        )];

        let result = classifier.classify(
            Some("Solicitor General Paul Clement"),
            None,
            &roster,
            Some(2006),
        );

        assert_eq!(result.role, Role::SolicitorGeneral);
    }

    #[test]
    fn test_general_in_name_needs_government_description() {
        let registry = TenureRegistry::new();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate("Attorney General Smith", None, Some("for the petitioner"))];

        let result = classifier.classify(Some("Attorney General Smith"), None, &roster, Some(2006));

        assert_eq!(result.role, Role::PrivateCounsel);
    }

    #[test]
    fn test_tenure_outside_year_not_overridden() {
        let registry = registry();
        let classifier = RoleClassifier::new(&registry);
        let roster = [advocate("Elena Kagan", None, Some("for the Respondent"))];

        let result = classifier.classify(Some("Elena Kagan"), None, &roster, Some(2012));

        assert_eq!(result.role, Role::PrivateCounsel);
    }

    #[test]
    fn test_no_roster_entry_short_circuits() {
        let registry = registry();
        let classifier = RoleClassifier::new(&registry);

        // Active tenure is never consulted without a roster entry
        let result = classifier.classify(Some("Michael R. Dreeben"), Some("9"), &[], Some(2015));

        assert_eq!(result, Classification::unknown_private());
    }

    #[test]
    fn test_id_match_preferred_over_name() {
        let registry = TenureRegistry::new();
        let classifier = RoleClassifier::new(&registry);
        let roster = [
            advocate("Alex Smith", Some("1"), Some("for the State of Texas")),
            advocate("Alex Smith", Some("2"), Some("for the petitioner")),
        ];

        let by_id = classifier.classify(Some("Alex Smith"), Some("2"), &roster, Some(2015));
        assert_eq!(by_id.role, Role::PrivateCounsel);
        assert_eq!(by_id.side, Side::Petitioner);

        let by_name = classifier.classify(Some("Alex Smith"), Some("99"), &roster, Some(2015));
        assert_eq!(by_name.role, Role::StateCounsel);
    }

    #[test]
    fn test_missing_everything_never_panics() {
        let registry = registry();
        let classifier = RoleClassifier::new(&registry);
        let roster = [AdvocateEntry::default()];

        let result = classifier.classify(None, None, &roster, None);
        assert_eq!(result, Classification::unknown_private());
    }
}
