//! Business profile: client, family, business, exit planning and advisory
//! team details.
//!
//! The backend stores some list fields as JSON text and echoes form values
//! back as either numbers or strings, so deserialization here is lenient:
//! list fields accept an array or a JSON-encoded array, and numeric fields
//! accept numbers, numeric strings or blanks.
//!
//! Saving replaces the whole profile on the backend. A section is saved by
//! applying its fields to the current profile with
//! [`BusinessProfile::apply_section`] and sending the result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::financials::parse_amount;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub ownership_percentage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub age: String,
    #[serde(default)]
    pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub firm: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    // Client
    #[serde(default)]
    pub client_first_name: Option<String>,
    #[serde(default)]
    pub client_last_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub client_date_of_birth: Option<String>,
    #[serde(default)]
    pub client_address: Option<String>,
    #[serde(default)]
    pub client_city: Option<String>,
    #[serde(default)]
    pub client_state: Option<String>,
    #[serde(default)]
    pub client_zip: Option<String>,

    // Spouse
    #[serde(default)]
    pub spouse_name: Option<String>,
    #[serde(default)]
    pub spouse_email: Option<String>,
    #[serde(default)]
    pub spouse_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub spouse_involved_in_business: bool,

    // Dependents
    #[serde(default, deserialize_with = "lenient::number")]
    pub num_dependents: Option<u32>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub dependents_info: Vec<Dependent>,

    // Business
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub employees: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub year_founded: Option<i32>,
    #[serde(default)]
    pub primary_location: Option<String>,
    #[serde(default)]
    pub primary_market: Option<String>,
    #[serde(default)]
    pub registration_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub owners: Vec<Owner>,

    // Exit planning
    #[serde(default)]
    pub exit_horizon: Option<String>,
    #[serde(default)]
    pub preferred_exit_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub key_motivations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub deal_breakers: Vec<String>,

    // Strategic assets
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_proprietary_tech: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_patents_ip: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_recurring_revenue: bool,
    #[serde(default, deserialize_with = "lenient::number")]
    pub recurring_revenue_percentage: Option<f64>,

    // Financials
    #[serde(default, deserialize_with = "lenient::number")]
    pub gross_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub customer_concentration: Option<String>,

    // Succession
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_management_team: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub successor_identified: bool,
    #[serde(default)]
    pub successor_type: Option<String>,

    // Advisory team
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_attorney: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_accountant: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_financial_advisor: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_exit_advisor: bool,
    #[serde(default, deserialize_with = "lenient::list")]
    pub custom_advisors: Vec<Advisor>,
}

impl BusinessProfile {
    /// Whole years since the founding year, never negative. 0 when unknown.
    #[must_use]
    pub fn years_in_business(&self, current_year: i32) -> u32 {
        self.year_founded
            .and_then(|founded| u32::try_from(current_year - founded).ok())
            .unwrap_or(0)
    }

    /// Sum of the owners' percentages; unparseable entries count as 0.
    #[must_use]
    pub fn ownership_total(&self) -> f64 {
        self.owners
            .iter()
            .map(|owner| parse_amount(&owner.ownership_percentage))
            .sum()
    }

    /// Whether the owners' percentages add up to 100 (to the cent).
    #[must_use]
    pub fn ownership_is_complete(&self) -> bool {
        (self.ownership_total() - 100.0).abs() < 0.005
    }

    /// The fields of `section` as a JSON object.
    #[must_use]
    pub fn section(&self, section: ProfileSection) -> Value {
        let Ok(Value::Object(all)) = serde_json::to_value(self) else {
            return Value::Object(Map::new());
        };
        let picked = all
            .into_iter()
            .filter(|(key, _)| section.fields().contains(&key.as_str()))
            .collect();
        Value::Object(picked)
    }

    /// Overwrite the fields of `section` with the ones present in `patch`.
    ///
    /// Fields of `section` missing from `patch` are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `patch` is not an object, names a
    /// field outside `section`, or has a value of the wrong type.
    pub fn apply_section(&mut self, section: ProfileSection, patch: &Value) -> Result<(), CoreError> {
        let Value::Object(patch) = patch else {
            return Err(CoreError::Validation(
                "profile section must be a JSON object".to_string(),
            ));
        };
        if let Some(stray) = patch.keys().find(|key| !section.fields().contains(&key.as_str())) {
            return Err(CoreError::Validation(format!(
                "'{stray}' is not a field of the {section} section"
            )));
        }

        let mut merged = match serde_json::to_value(&*self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(error) => return Err(CoreError::Other(error.into())),
        };
        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }
        *self = serde_json::from_value(Value::Object(merged))
            .map_err(|error| CoreError::Validation(format!("invalid {section} section: {error}")))?;
        Ok(())
    }
}

/// Add `value` to `values` if absent, remove it if present.
pub fn toggle(values: &mut Vec<String>, value: &str) {
    if let Some(index) = values.iter().position(|v| v == value) {
        values.remove(index);
    } else {
        values.push(value.to_string());
    }
}

/// Independently saved parts of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSection {
    Client,
    Spouse,
    Dependents,
    Business,
    ExitPlanning,
    StrategicAssets,
    Financials,
    Succession,
    AdvisoryTeam,
}

impl ProfileSection {
    pub const ALL: [Self; 9] = [
        Self::Client,
        Self::Spouse,
        Self::Dependents,
        Self::Business,
        Self::ExitPlanning,
        Self::StrategicAssets,
        Self::Financials,
        Self::Succession,
        Self::AdvisoryTeam,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Spouse => "spouse",
            Self::Dependents => "dependents",
            Self::Business => "business",
            Self::ExitPlanning => "exit_planning",
            Self::StrategicAssets => "strategic_assets",
            Self::Financials => "financials",
            Self::Succession => "succession",
            Self::AdvisoryTeam => "advisory_team",
        }
    }

    /// JSON field names belonging to the section.
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Client => &[
                "client_first_name",
                "client_last_name",
                "client_email",
                "client_phone",
                "client_date_of_birth",
                "client_address",
                "client_city",
                "client_state",
                "client_zip",
            ],
            Self::Spouse => &[
                "spouse_name",
                "spouse_email",
                "spouse_phone",
                "spouse_involved_in_business",
            ],
            Self::Dependents => &["num_dependents", "dependents_info"],
            Self::Business => &[
                "business_name",
                "industry",
                "employees",
                "year_founded",
                "primary_location",
                "primary_market",
                "registration_type",
                "owners",
            ],
            Self::ExitPlanning => &[
                "exit_horizon",
                "preferred_exit_type",
                "key_motivations",
                "deal_breakers",
            ],
            Self::StrategicAssets => &[
                "has_proprietary_tech",
                "has_patents_ip",
                "has_recurring_revenue",
                "recurring_revenue_percentage",
            ],
            Self::Financials => &["gross_margin", "growth_rate", "customer_concentration"],
            Self::Succession => &[
                "has_management_team",
                "successor_identified",
                "successor_type",
            ],
            Self::AdvisoryTeam => &[
                "has_attorney",
                "has_accountant",
                "has_financial_advisor",
                "has_exit_advisor",
                "custom_advisors",
            ],
        }
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileSection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == normalized)
            .ok_or_else(|| CoreError::Validation(format!("unknown profile section '{s}'")))
    }
}

mod lenient {
    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    /// An array, a JSON-encoded array, or null/blank for empty.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Vec::new()),
            Value::String(text) if text.trim().is_empty() => Ok(Vec::new()),
            Value::String(text) => serde_json::from_str(&text).map_err(D::Error::custom),
            other => serde_json::from_value(other).map_err(D::Error::custom),
        }
    }

    /// A number, a numeric string, or null/blank for none.
    pub fn number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(text) if text.trim().is_empty() => Ok(None),
            Value::String(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a number, got '{text}'"))),
            other => serde_json::from_value(other).map(Some).map_err(D::Error::custom),
        }
    }

    /// A boolean, with null meaning false.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
    }

    /// A string or a number rendered as text; null is blank.
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(String::new()),
            Value::String(text) => Ok(text),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(D::Error::custom(format!("expected text, got {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const FIXTURE: &str = r#"{
        "id": 1,
        "user_id": 7,
        "client_first_name": "Dana",
        "client_last_name": "Reyes",
        "spouse_involved_in_business": null,
        "num_dependents": 2,
        "dependents_info": "[{\"name\": \"Sam\", \"age\": 12, \"relationship\": \"child\"}]",
        "business_name": "Reyes Fabrication",
        "employees": "45",
        "year_founded": 2004,
        "owners": [{ "name": "Dana", "ownership_percentage": 60 }, { "name": "Lee", "ownership_percentage": "40" }],
        "key_motivations": "[\"Reduce risk\"]",
        "deal_breakers": "[]",
        "has_recurring_revenue": true,
        "recurring_revenue_percentage": 35.5,
        "gross_margin": "",
        "created_at": "2025-06-01T00:00:00"
    }"#;

    #[test]
    fn parses_backend_profile_leniently() {
        let profile: BusinessProfile = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(profile.client_first_name.as_deref(), Some("Dana"));
        assert!(!profile.spouse_involved_in_business);
        assert_eq!(profile.dependents_info[0].age, "12");
        assert_eq!(profile.employees, Some(45));
        assert_eq!(profile.owners[0].ownership_percentage, "60");
        assert_eq!(profile.key_motivations, vec!["Reduce risk".to_string()]);
        assert!(profile.deal_breakers.is_empty());
        assert_eq!(profile.gross_margin, None);
        assert!(profile.custom_advisors.is_empty());
    }

    #[test]
    fn years_in_business_is_never_negative() {
        let mut profile = BusinessProfile {
            year_founded: Some(2004),
            ..BusinessProfile::default()
        };
        assert_eq!(profile.years_in_business(2026), 22);
        profile.year_founded = Some(2030);
        assert_eq!(profile.years_in_business(2026), 0);
        profile.year_founded = None;
        assert_eq!(profile.years_in_business(2026), 0);
    }

    #[test]
    fn ownership_total_ignores_blank_entries() {
        let profile: BusinessProfile = serde_json::from_str(FIXTURE).unwrap();
        assert!((profile.ownership_total() - 100.0).abs() < f64::EPSILON);
        assert!(profile.ownership_is_complete());

        let partial = BusinessProfile {
            owners: vec![
                Owner {
                    name: "A".into(),
                    ownership_percentage: "33.33".into(),
                },
                Owner::default(),
            ],
            ..BusinessProfile::default()
        };
        assert!(!partial.ownership_is_complete());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut values = vec!["Reduce risk".to_string()];
        toggle(&mut values, "Preserve legacy");
        assert_eq!(values, vec!["Reduce risk".to_string(), "Preserve legacy".to_string()]);
        toggle(&mut values, "Reduce risk");
        assert_eq!(values, vec!["Preserve legacy".to_string()]);
    }

    #[test]
    fn section_extracts_only_its_fields() {
        let profile: BusinessProfile = serde_json::from_str(FIXTURE).unwrap();
        let section = profile.section(ProfileSection::Spouse);
        let keys: Vec<_> = section.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert!(keys.iter().all(|k| k.starts_with("spouse_")));
    }

    #[test]
    fn apply_section_merges_and_rejects_foreign_fields() {
        let mut profile: BusinessProfile = serde_json::from_str(FIXTURE).unwrap();
        profile
            .apply_section(
                ProfileSection::AdvisoryTeam,
                &json!({ "has_attorney": true, "custom_advisors": [{ "name": "Kim", "role": "Wealth manager" }] }),
            )
            .unwrap();
        assert!(profile.has_attorney);
        assert_eq!(profile.custom_advisors[0].role, "Wealth manager");
        assert_eq!(profile.business_name.as_deref(), Some("Reyes Fabrication"));

        let err = profile
            .apply_section(ProfileSection::Spouse, &json!({ "business_name": "x" }))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn section_names_parse_with_dashes() {
        assert_eq!("exit-planning".parse::<ProfileSection>().unwrap(), ProfileSection::ExitPlanning);
        assert!("nope".parse::<ProfileSection>().is_err());
    }
}
