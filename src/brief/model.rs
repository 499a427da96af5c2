//! Project brief data model.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::wizard::WizardStep;

/// How quickly the client wants to hear back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    #[serde(rename = "same-day")]
    SameDay,
    #[serde(rename = "next-day")]
    NextDay,
    #[serde(rename = "72hr")]
    ThreeDays,
}

impl Availability {
    pub const ALL: [Availability; 3] = [Self::SameDay, Self::NextDay, Self::ThreeDays];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameDay => "same-day",
            Self::NextDay => "next-day",
            Self::ThreeDays => "72hr",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Pricing plan picked on the plan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Pilot,
    Standard,
    Pro,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Self::Pilot, Self::Standard, Self::Pro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pilot => "pilot",
            Self::Standard => "standard",
            Self::Pro => "pro",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// What kind of input a field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Choice,
    Flag,
}

/// Every field of the brief, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Company,
    OneLiner,
    Customer,
    Problem,
    Success,
    MustHaves,
    NiceToHaves,
    Integrations,
    Assets,
    TargetDate,
    Deadline,
    Availability,
    Plan,
    AgreeScope,
    CaseStudyOptIn,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Self::Name,
        Self::Email,
        Self::Company,
        Self::OneLiner,
        Self::Customer,
        Self::Problem,
        Self::Success,
        Self::MustHaves,
        Self::NiceToHaves,
        Self::Integrations,
        Self::Assets,
        Self::TargetDate,
        Self::Deadline,
        Self::Availability,
        Self::Plan,
        Self::AgreeScope,
        Self::CaseStudyOptIn,
    ];

    /// Text fields that must be non-empty before the brief can be sent.
    pub const REQUIRED: [Field; 8] = [
        Self::Name,
        Self::Email,
        Self::OneLiner,
        Self::Customer,
        Self::Problem,
        Self::Success,
        Self::MustHaves,
        Self::Integrations,
    ];

    /// JSON key used on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::OneLiner => "oneLiner",
            Self::Customer => "customer",
            Self::Problem => "problem",
            Self::Success => "success",
            Self::MustHaves => "mustHaves",
            Self::NiceToHaves => "niceToHaves",
            Self::Integrations => "integrations",
            Self::Assets => "assets",
            Self::TargetDate => "targetDate",
            Self::Deadline => "deadline",
            Self::Availability => "availability",
            Self::Plan => "plan",
            Self::AgreeScope => "agreeScope",
            Self::CaseStudyOptIn => "caseStudyOptIn",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::OneLiner => "One-liner",
            Self::Customer => "Target customer",
            Self::Problem => "Problem",
            Self::Success => "What success looks like",
            Self::MustHaves => "Must-haves",
            Self::NiceToHaves => "Nice-to-haves",
            Self::Integrations => "Integrations",
            Self::Assets => "Existing assets",
            Self::TargetDate => "Target launch date",
            Self::Deadline => "Hard deadline",
            Self::Availability => "Kickoff availability",
            Self::Plan => "Plan",
            Self::AgreeScope => "Scope agreement",
            Self::CaseStudyOptIn => "Case study opt-in",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Availability | Self::Plan => FieldKind::Choice,
            Self::AgreeScope | Self::CaseStudyOptIn => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// The wizard step that collects this field.
    pub fn step(&self) -> WizardStep {
        match self {
            Self::Name | Self::Email | Self::Company => WizardStep::Contact,
            Self::OneLiner | Self::Customer | Self::Problem | Self::Success => WizardStep::Vision,
            Self::MustHaves | Self::NiceToHaves | Self::Integrations | Self::Assets => {
                WizardStep::Scope
            }
            Self::TargetDate | Self::Deadline | Self::Availability => WizardStep::Timeline,
            Self::Plan | Self::AgreeScope | Self::CaseStudyOptIn => WizardStep::Plan,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// The value currently held by a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Flag(true) => f.write_str("yes"),
            Self::Flag(false) => f.write_str("no"),
        }
    }
}

/// The client's project brief.
///
/// Optional text fields are plain strings that may be empty, so a
/// serialized brief never carries `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub company: String,
    pub one_liner: String,
    pub customer: String,
    pub problem: String,
    pub success: String,
    pub must_haves: String,
    pub nice_to_haves: String,
    pub integrations: String,
    pub assets: String,
    pub target_date: String,
    pub deadline: String,
    pub availability: Availability,
    pub plan: Plan,
    pub agree_scope: bool,
    pub case_study_opt_in: bool,
}

impl FormData {
    fn text(&self, field: Field) -> Option<&String> {
        Some(match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::OneLiner => &self.one_liner,
            Field::Customer => &self.customer,
            Field::Problem => &self.problem,
            Field::Success => &self.success,
            Field::MustHaves => &self.must_haves,
            Field::NiceToHaves => &self.nice_to_haves,
            Field::Integrations => &self.integrations,
            Field::Assets => &self.assets,
            Field::TargetDate => &self.target_date,
            Field::Deadline => &self.deadline,
            _ => return None,
        })
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        Some(match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Company => &mut self.company,
            Field::OneLiner => &mut self.one_liner,
            Field::Customer => &mut self.customer,
            Field::Problem => &mut self.problem,
            Field::Success => &mut self.success,
            Field::MustHaves => &mut self.must_haves,
            Field::NiceToHaves => &mut self.nice_to_haves,
            Field::Integrations => &mut self.integrations,
            Field::Assets => &mut self.assets,
            Field::TargetDate => &mut self.target_date,
            Field::Deadline => &mut self.deadline,
            _ => return None,
        })
    }

    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Availability => FieldValue::Text(self.availability.to_string()),
            Field::Plan => FieldValue::Text(self.plan.to_string()),
            Field::AgreeScope => FieldValue::Flag(self.agree_scope),
            Field::CaseStudyOptIn => FieldValue::Flag(self.case_study_opt_in),
            text => FieldValue::Text(self.text(text).cloned().unwrap_or_default()),
        }
    }

    /// Set a field from user input.
    ///
    /// Choice fields take their wire value (`"next-day"`, `"pro"`); flags
    /// accept the usual yes/no spellings.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), WizardError> {
        let invalid = || WizardError::InvalidValue {
            field,
            value: value.to_string(),
        };
        match field {
            Field::Availability => self.availability = value.parse().map_err(|_| invalid())?,
            Field::Plan => self.plan = value.parse().map_err(|_| invalid())?,
            Field::AgreeScope => self.agree_scope = parse_flag(value).ok_or_else(invalid)?,
            Field::CaseStudyOptIn => {
                self.case_study_opt_in = parse_flag(value).ok_or_else(invalid)?
            }
            text => {
                if let Some(slot) = self.text_mut(text) {
                    *slot = value.to_string();
                }
            }
        }
        Ok(())
    }

    /// Required fields that are still blank, in form order.
    pub fn missing_required(&self) -> Vec<Field> {
        Field::REQUIRED
            .into_iter()
            .filter(|f| self.text(*f).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    /// Check the brief is ready to send.
    pub fn validate(&self) -> Result<(), WizardError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(WizardError::MissingFields { missing });
        }
        if !self.agree_scope {
            return Err(WizardError::ScopeNotAccepted);
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_brief() -> FormData {
        FormData {
            name: "Jane Founder".into(),
            email: "jane@demo.co".into(),
            one_liner: "A thing".into(),
            customer: "SMBs".into(),
            problem: "No time".into(),
            success: "More leads".into(),
            must_haves: "Booking form".into(),
            integrations: "Stripe, HubSpot".into(),
            agree_scope: true,
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_wire_defaults() {
        let data = FormData::default();
        assert_eq!(data.availability, Availability::SameDay);
        assert_eq!(data.plan, Plan::Pilot);
        assert!(!data.agree_scope);
        assert!(!data.case_study_opt_in);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(complete_brief()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), Field::ALL.len());
        for field in Field::ALL {
            assert!(obj.contains_key(field.key()), "missing key {}", field.key());
        }
        assert_eq!(json["oneLiner"], "A thing");
        assert_eq!(json["availability"], "same-day");
        assert_eq!(json["plan"], "pilot");
        assert_eq!(json["agreeScope"], true);
        assert_eq!(json["company"], "");
    }

    #[test]
    fn enum_wire_values() {
        assert_eq!(serde_json::to_string(&Availability::ThreeDays).unwrap(), "\"72hr\"");
        assert_eq!(serde_json::to_string(&Availability::NextDay).unwrap(), "\"next-day\"");
        assert_eq!(serde_json::to_string(&Plan::Standard).unwrap(), "\"standard\"");
        for a in Availability::ALL {
            assert_eq!(a.as_str().parse::<Availability>(), Ok(a));
        }
        for p in Plan::ALL {
            assert_eq!(p.as_str().parse::<Plan>(), Ok(p));
        }
    }

    #[test]
    fn complete_brief_validates() {
        assert!(complete_brief().validate().is_ok());
    }

    #[test]
    fn each_required_field_blocks_validation() {
        for field in Field::REQUIRED {
            let mut data = complete_brief();
            data.set(field, "   ").unwrap();
            assert_eq!(
                data.validate(),
                Err(WizardError::MissingFields {
                    missing: vec![field]
                }),
                "{field} should be required"
            );
        }
    }

    #[test]
    fn optional_fields_do_not_block_validation() {
        let data = complete_brief();
        assert!(data.company.is_empty());
        assert!(data.nice_to_haves.is_empty());
        assert!(data.assets.is_empty());
        assert!(data.validate().is_ok());
    }

    #[test]
    fn scope_agreement_is_required() {
        let mut data = complete_brief();
        data.agree_scope = false;
        assert_eq!(data.validate(), Err(WizardError::ScopeNotAccepted));
    }

    #[test]
    fn missing_fields_reported_in_form_order() {
        let data = FormData::default();
        assert_eq!(data.missing_required(), Field::REQUIRED.to_vec());
    }

    #[test]
    fn set_parses_choices_and_flags() {
        let mut data = FormData::default();
        data.set(Field::Availability, "72hr").unwrap();
        data.set(Field::Plan, "Pro").unwrap();
        data.set(Field::AgreeScope, "yes").unwrap();
        data.set(Field::CaseStudyOptIn, "0").unwrap();
        assert_eq!(data.availability, Availability::ThreeDays);
        assert_eq!(data.plan, Plan::Pro);
        assert!(data.agree_scope);
        assert!(!data.case_study_opt_in);
        assert_eq!(data.get(Field::Plan), FieldValue::Text("pro".into()));
        assert_eq!(data.get(Field::AgreeScope), FieldValue::Flag(true));
    }

    #[test]
    fn set_rejects_unknown_choice() {
        let mut data = FormData::default();
        let err = data.set(Field::Plan, "enterprise").unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidValue {
                field: Field::Plan,
                value: "enterprise".into()
            }
        );
        assert_eq!(data.plan, Plan::Pilot);
        assert!(data.set(Field::AgreeScope, "maybe").is_err());
    }

    #[test]
    fn field_keys_roundtrip() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>(), Ok(field));
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.key()));
        }
        assert!("nope".parse::<Field>().is_err());
    }

    #[test]
    fn every_field_belongs_to_an_editable_step() {
        for field in Field::ALL {
            assert!(field.step().collects_input(), "{field} on a read-only step");
        }
    }
}
