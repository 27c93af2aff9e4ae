// src/intake/mod.rs
//! Dermatology patient intake form, posted as camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod fields;

pub use fields::{FieldId, FieldKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueProgress {
    #[serde(rename = "Getting worse")]
    GettingWorse,
    #[default]
    #[serde(rename = "Staying the same")]
    StayingTheSame,
    Improving,
}

/// Closed option sets shown as radio choices.
pub trait Choice: Copy {
    fn label(self) -> &'static str;
    fn next(self) -> Self;
}

impl Choice for YesNo {
    fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    fn next(self) -> Self {
        match self {
            YesNo::Yes => YesNo::No,
            YesNo::No => YesNo::Yes,
        }
    }
}

impl Choice for Gender {
    fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    fn next(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Other,
            Gender::Other => Gender::Male,
        }
    }
}

impl Choice for IssueProgress {
    fn label(self) -> &'static str {
        match self {
            IssueProgress::GettingWorse => "Getting worse",
            IssueProgress::StayingTheSame => "Staying the same",
            IssueProgress::Improving => "Improving",
        }
    }

    fn next(self) -> Self {
        match self {
            IssueProgress::GettingWorse => IssueProgress::StayingTheSame,
            IssueProgress::StayingTheSame => IssueProgress::Improving,
            IssueProgress::Improving => IssueProgress::GettingWorse,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientIntake {
    // Patient information
    pub name: String,
    pub dob: String,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    // Medical history
    pub chronic_diseases: YesNo,
    pub chronic_diseases_details: String,
    pub surgeries: YesNo,
    pub surgeries_details: String,
    pub allergies: YesNo,
    pub allergies_details: String,
    pub medications: YesNo,
    pub medications_details: String,
    pub skin_conditions: YesNo,
    pub skin_conditions_details: String,
    // Current routine
    pub daily_skincare_products: String,
    pub exfoliation_frequency: String,
    pub prescription_treatments: YesNo,
    pub prescription_treatments_details: String,
    pub wear_sunscreen: YesNo,
    // Family history
    pub family_skin_conditions: YesNo,
    pub family_skin_conditions_details: String,
    pub family_cancer_history: YesNo,
    pub family_cancer_history_details: String,
    // Current skin issues
    pub primary_skin_issue: String,
    pub issue_duration: String,
    pub issue_progress: IssueProgress,
    pub treated_before: YesNo,
    pub treated_before_details: String,
    pub pain_irritation: YesNo,
    // Additional information
    pub other_conditions: String,
    pub additional_notes: String,
}

impl PatientIntake {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Fields the form refuses to submit without.
    pub fn missing_required(&self) -> Vec<FieldId> {
        FieldId::ALL
            .iter()
            .copied()
            .filter(|f| f.is_required() && self.value(*f).trim().is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            return Err(Error::validation(format!("Please fill in: {}", names.join(", "))));
        }
        if chrono::NaiveDate::parse_from_str(self.dob.trim(), "%Y-%m-%d").is_err() {
            return Err(Error::validation("Date of Birth must be YYYY-MM-DD"));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && domain.contains('.') => {}
            _ => return Err(Error::validation(format!("'{}' is not a valid email address", email))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PatientIntake {
        PatientIntake {
            name: "Asha Rao".into(),
            dob: "1990-04-12".into(),
            phone: "555-0100".into(),
            email: "asha@example.com".into(),
            emergency_contact_name: "Ravi Rao".into(),
            emergency_contact_phone: "555-0101".into(),
            primary_skin_issue: "Eczema".into(),
            ..PatientIntake::default()
        }
    }

    #[test]
    fn test_defaults_match_blank_form() {
        let form = PatientIntake::default();
        assert_eq!(form.gender, Gender::Male);
        assert_eq!(form.allergies, YesNo::No);
        assert_eq!(form.issue_progress, IssueProgress::StayingTheSame);
    }

    #[test]
    fn test_serializes_camel_case_labels() {
        let mut form = filled();
        form.issue_progress = IssueProgress::GettingWorse;
        form.family_cancer_history = YesNo::Yes;
        let json = serde_json::to_value(&form).unwrap();

        assert_eq!(json["emergencyContactName"], "Ravi Rao");
        assert_eq!(json["issueProgress"], "Getting worse");
        assert_eq!(json["familyCancerHistory"], "Yes");
        assert_eq!(json["gender"], "Male");
        assert_eq!(json.as_object().unwrap().len(), 34);
    }

    #[test]
    fn test_from_partial_json() {
        let form = PatientIntake::from_json(r#"{"name": "Li", "painIrritation": "Yes"}"#).unwrap();
        assert_eq!(form.name, "Li");
        assert_eq!(form.pain_irritation, YesNo::Yes);
        assert_eq!(form.wear_sunscreen, YesNo::No);
    }

    #[test]
    fn test_validate() {
        assert!(filled().validate().is_ok());

        let err = PatientIntake::default().validate().unwrap_err().to_string();
        assert!(err.contains("Full Name") && err.contains("Email Address"));

        let contact_missing = PatientIntake {
            emergency_contact_name: String::new(),
            emergency_contact_phone: " ".into(),
            primary_skin_issue: String::new(),
            ..filled()
        };
        let err = contact_missing.validate().unwrap_err().to_string();
        assert_eq!(
            err,
            "Please fill in: Emergency Contact Name, Emergency Contact Phone, Primary Skin Issue"
        );

        let bad_date = PatientIntake { dob: "12/04/1990".into(), ..filled() };
        assert!(bad_date.validate().is_err());

        let bad_email = PatientIntake { email: "asha".into(), ..filled() };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_choice_cycles() {
        assert_eq!(Gender::Other.next(), Gender::Male);
        assert_eq!(IssueProgress::Improving.next().label(), "Getting worse");
        assert_eq!(YesNo::No.next(), YesNo::Yes);
    }
}
