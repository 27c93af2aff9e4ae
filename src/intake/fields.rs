// src/intake/fields.rs
//! Field catalogue for the intake screen: labels, sections and typed access
//! to each value of a [`PatientIntake`].

use super::{Choice, PatientIntake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Dob,
    Gender,
    Phone,
    Email,
    EmergencyContactName,
    EmergencyContactPhone,
    ChronicDiseases,
    ChronicDiseasesDetails,
    Surgeries,
    SurgeriesDetails,
    Allergies,
    AllergiesDetails,
    Medications,
    MedicationsDetails,
    SkinConditions,
    SkinConditionsDetails,
    DailySkincareProducts,
    ExfoliationFrequency,
    PrescriptionTreatments,
    PrescriptionTreatmentsDetails,
    WearSunscreen,
    FamilySkinConditions,
    FamilySkinConditionsDetails,
    FamilyCancerHistory,
    FamilyCancerHistoryDetails,
    PrimarySkinIssue,
    IssueDuration,
    IssueProgress,
    TreatedBefore,
    TreatedBeforeDetails,
    PainIrritation,
    OtherConditions,
    AdditionalNotes,
}

impl FieldId {
    /// Form order.
    pub const ALL: [FieldId; 34] = [
        FieldId::Name,
        FieldId::Dob,
        FieldId::Gender,
        FieldId::Phone,
        FieldId::Email,
        FieldId::EmergencyContactName,
        FieldId::EmergencyContactPhone,
        FieldId::ChronicDiseases,
        FieldId::ChronicDiseasesDetails,
        FieldId::Surgeries,
        FieldId::SurgeriesDetails,
        FieldId::Allergies,
        FieldId::AllergiesDetails,
        FieldId::Medications,
        FieldId::MedicationsDetails,
        FieldId::SkinConditions,
        FieldId::SkinConditionsDetails,
        FieldId::DailySkincareProducts,
        FieldId::ExfoliationFrequency,
        FieldId::PrescriptionTreatments,
        FieldId::PrescriptionTreatmentsDetails,
        FieldId::WearSunscreen,
        FieldId::FamilySkinConditions,
        FieldId::FamilySkinConditionsDetails,
        FieldId::FamilyCancerHistory,
        FieldId::FamilyCancerHistoryDetails,
        FieldId::PrimarySkinIssue,
        FieldId::IssueDuration,
        FieldId::IssueProgress,
        FieldId::TreatedBefore,
        FieldId::TreatedBeforeDetails,
        FieldId::PainIrritation,
        FieldId::OtherConditions,
        FieldId::AdditionalNotes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Full Name",
            FieldId::Dob => "Date of Birth",
            FieldId::Gender => "Gender",
            FieldId::Phone => "Phone Number",
            FieldId::Email => "Email Address",
            FieldId::EmergencyContactName => "Emergency Contact Name",
            FieldId::EmergencyContactPhone => "Emergency Contact Phone",
            FieldId::ChronicDiseases => "Chronic diseases?",
            FieldId::Surgeries => "Surgeries?",
            FieldId::Allergies => "Allergies?",
            FieldId::Medications => "Medications?",
            FieldId::SkinConditions => "Skin conditions?",
            FieldId::DailySkincareProducts => "Daily Skincare Products",
            FieldId::ExfoliationFrequency => "Exfoliation Frequency",
            FieldId::PrescriptionTreatments => "Prescription treatments?",
            FieldId::WearSunscreen => "Do you wear sunscreen daily?",
            FieldId::FamilySkinConditions => "Family skin conditions?",
            FieldId::FamilyCancerHistory => "Family cancer history?",
            FieldId::PrimarySkinIssue => "Primary Skin Issue",
            FieldId::IssueDuration => "Issue Duration",
            FieldId::IssueProgress => "Progress",
            FieldId::TreatedBefore => "Treated Before?",
            FieldId::PainIrritation => "Pain/Irritation?",
            FieldId::OtherConditions => "Other Health Conditions",
            FieldId::AdditionalNotes => "Additional Notes",
            _ => "  details",
        }
    }

    /// Free-text field that qualifies the yes/no question above it.
    pub fn is_details(self) -> bool {
        use FieldId::*;
        matches!(
            self,
            ChronicDiseasesDetails
                | SurgeriesDetails
                | AllergiesDetails
                | MedicationsDetails
                | SkinConditionsDetails
                | PrescriptionTreatmentsDetails
                | FamilySkinConditionsDetails
                | FamilyCancerHistoryDetails
                | TreatedBeforeDetails
        )
    }

    pub fn section(self) -> &'static str {
        use FieldId::*;
        match self {
            Name | Dob | Gender | Phone | Email | EmergencyContactName | EmergencyContactPhone => "Patient Information",
            ChronicDiseases | ChronicDiseasesDetails | Surgeries | SurgeriesDetails | Allergies | AllergiesDetails
            | Medications | MedicationsDetails | SkinConditions | SkinConditionsDetails => "Medical History",
            DailySkincareProducts | ExfoliationFrequency | PrescriptionTreatments | PrescriptionTreatmentsDetails
            | WearSunscreen => "Current Routine",
            FamilySkinConditions | FamilySkinConditionsDetails | FamilyCancerHistory | FamilyCancerHistoryDetails => {
                "Family History"
            }
            PrimarySkinIssue | IssueDuration | IssueProgress | TreatedBefore | TreatedBeforeDetails | PainIrritation => {
                "Current Skin Issues"
            }
            OtherConditions | AdditionalNotes => "Additional Information",
        }
    }

    pub fn kind(self) -> FieldKind {
        use FieldId::*;
        match self {
            Gender | ChronicDiseases | Surgeries | Allergies | Medications | SkinConditions | PrescriptionTreatments
            | WearSunscreen | FamilySkinConditions | FamilyCancerHistory | IssueProgress | TreatedBefore
            | PainIrritation => FieldKind::Choice,
            _ => FieldKind::Text,
        }
    }

    pub fn is_required(self) -> bool {
        use FieldId::*;
        matches!(
            self,
            Name | Dob | Phone | Email | EmergencyContactName | EmergencyContactPhone | PrimarySkinIssue
        )
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            FieldId::Dob => Some("YYYY-MM-DD"),
            FieldId::TreatedBeforeDetails => Some("If yes, please describe"),
            f if f.is_details() => Some("If yes, please specify"),
            _ => None,
        }
    }
}

impl PatientIntake {
    pub fn value(&self, field: FieldId) -> String {
        use FieldId as F;
        match field {
            F::Gender => self.gender.label().to_string(),
            F::ChronicDiseases => self.chronic_diseases.label().to_string(),
            F::Surgeries => self.surgeries.label().to_string(),
            F::Allergies => self.allergies.label().to_string(),
            F::Medications => self.medications.label().to_string(),
            F::SkinConditions => self.skin_conditions.label().to_string(),
            F::PrescriptionTreatments => self.prescription_treatments.label().to_string(),
            F::WearSunscreen => self.wear_sunscreen.label().to_string(),
            F::FamilySkinConditions => self.family_skin_conditions.label().to_string(),
            F::FamilyCancerHistory => self.family_cancer_history.label().to_string(),
            F::IssueProgress => self.issue_progress.label().to_string(),
            F::TreatedBefore => self.treated_before.label().to_string(),
            F::PainIrritation => self.pain_irritation.label().to_string(),
            other => self.text(other).cloned().unwrap_or_default(),
        }
    }

    pub fn text(&self, field: FieldId) -> Option<&String> {
        use FieldId as F;
        Some(match field {
            F::Name => &self.name,
            F::Dob => &self.dob,
            F::Phone => &self.phone,
            F::Email => &self.email,
            F::EmergencyContactName => &self.emergency_contact_name,
            F::EmergencyContactPhone => &self.emergency_contact_phone,
            F::ChronicDiseasesDetails => &self.chronic_diseases_details,
            F::SurgeriesDetails => &self.surgeries_details,
            F::AllergiesDetails => &self.allergies_details,
            F::MedicationsDetails => &self.medications_details,
            F::SkinConditionsDetails => &self.skin_conditions_details,
            F::DailySkincareProducts => &self.daily_skincare_products,
            F::ExfoliationFrequency => &self.exfoliation_frequency,
            F::PrescriptionTreatmentsDetails => &self.prescription_treatments_details,
            F::FamilySkinConditionsDetails => &self.family_skin_conditions_details,
            F::FamilyCancerHistoryDetails => &self.family_cancer_history_details,
            F::PrimarySkinIssue => &self.primary_skin_issue,
            F::IssueDuration => &self.issue_duration,
            F::TreatedBeforeDetails => &self.treated_before_details,
            F::OtherConditions => &self.other_conditions,
            F::AdditionalNotes => &self.additional_notes,
            _ => return None,
        })
    }

    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        use FieldId as F;
        Some(match field {
            F::Name => &mut self.name,
            F::Dob => &mut self.dob,
            F::Phone => &mut self.phone,
            F::Email => &mut self.email,
            F::EmergencyContactName => &mut self.emergency_contact_name,
            F::EmergencyContactPhone => &mut self.emergency_contact_phone,
            F::ChronicDiseasesDetails => &mut self.chronic_diseases_details,
            F::SurgeriesDetails => &mut self.surgeries_details,
            F::AllergiesDetails => &mut self.allergies_details,
            F::MedicationsDetails => &mut self.medications_details,
            F::SkinConditionsDetails => &mut self.skin_conditions_details,
            F::DailySkincareProducts => &mut self.daily_skincare_products,
            F::ExfoliationFrequency => &mut self.exfoliation_frequency,
            F::PrescriptionTreatmentsDetails => &mut self.prescription_treatments_details,
            F::FamilySkinConditionsDetails => &mut self.family_skin_conditions_details,
            F::FamilyCancerHistoryDetails => &mut self.family_cancer_history_details,
            F::PrimarySkinIssue => &mut self.primary_skin_issue,
            F::IssueDuration => &mut self.issue_duration,
            F::TreatedBeforeDetails => &mut self.treated_before_details,
            F::OtherConditions => &mut self.other_conditions,
            F::AdditionalNotes => &mut self.additional_notes,
            _ => return None,
        })
    }

    /// Advances a choice field to its next option. Text fields are left alone.
    pub fn cycle(&mut self, field: FieldId) {
        use FieldId as F;
        match field {
            F::Gender => self.gender = self.gender.next(),
            F::ChronicDiseases => self.chronic_diseases = self.chronic_diseases.next(),
            F::Surgeries => self.surgeries = self.surgeries.next(),
            F::Allergies => self.allergies = self.allergies.next(),
            F::Medications => self.medications = self.medications.next(),
            F::SkinConditions => self.skin_conditions = self.skin_conditions.next(),
            F::PrescriptionTreatments => self.prescription_treatments = self.prescription_treatments.next(),
            F::WearSunscreen => self.wear_sunscreen = self.wear_sunscreen.next(),
            F::FamilySkinConditions => self.family_skin_conditions = self.family_skin_conditions.next(),
            F::FamilyCancerHistory => self.family_cancer_history = self.family_cancer_history.next(),
            F::IssueProgress => self.issue_progress = self.issue_progress.next(),
            F::TreatedBefore => self.treated_before = self.treated_before.next(),
            F::PainIrritation => self.pain_irritation = self.pain_irritation.next(),
            _ => {}
        }
    }
}
