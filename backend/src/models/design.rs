// src/models/design.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::html::clean_text;

/// Enumerated form field with a human-readable label per value.
pub trait Labeled: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;
}

/// One selectable value: `id` is the wire value, `label` the display text.
#[derive(Debug, Serialize)]
pub struct Choice<T> {
    pub id: T,
    pub label: &'static str,
}

pub fn choices<T: Labeled>() -> Vec<Choice<T>> {
    T::ALL
        .iter()
        .map(|v| Choice {
            id: *v,
            label: v.label(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Psoriasis,
    RheumatoidArthritis,
    Type1Diabetes,
    MultipleSclerosis,
}

impl Labeled for Disease {
    const ALL: &'static [Self] = &[
        Self::Psoriasis,
        Self::RheumatoidArthritis,
        Self::Type1Diabetes,
        Self::MultipleSclerosis,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Psoriasis => "Psoriasis",
            Self::RheumatoidArthritis => "Rheumatoid Arthritis",
            Self::Type1Diabetes => "Type 1 Diabetes",
            Self::MultipleSclerosis => "Multiple Sclerosis",
        }
    }
}

impl Disease {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Psoriasis => "Autoimmune skin disease causing rapid skin cell turnover",
            Self::RheumatoidArthritis => {
                "Autoimmune attack on joint tissues causing inflammation and damage"
            }
            Self::Type1Diabetes => "Autoimmune destruction of insulin-producing beta cells",
            Self::MultipleSclerosis => "Autoimmune attack on nerve myelin sheath",
        }
    }

    pub fn key_pathway(&self) -> &'static str {
        match self {
            Self::Psoriasis => "IL-23/TYK2 pathway",
            Self::RheumatoidArthritis => "TNF-alpha and IL-6 signaling",
            Self::Type1Diabetes => "T-cell attack on pancreatic islets",
            Self::MultipleSclerosis => "T-cell and B-cell mediated demyelination",
        }
    }

    pub fn current_treatments(&self) -> &'static [&'static str] {
        match self {
            Self::Psoriasis => &[
                "Topical steroids",
                "Biologics (IL-17 blockers)",
                "TYK2 inhibitors",
            ],
            Self::RheumatoidArthritis => &["Methotrexate", "TNF inhibitors", "JAK inhibitors"],
            Self::Type1Diabetes => &["Insulin replacement", "Immunotherapy (teplizumab)"],
            Self::MultipleSclerosis => &[
                "Interferons",
                "B-cell depleting antibodies",
                "S1P modulators",
            ],
        }
    }

    pub fn unmet_needs(&self) -> &'static str {
        match self {
            Self::Psoriasis => "Oral medications with fewer side effects",
            Self::RheumatoidArthritis => "Better disease modification, fewer infections",
            Self::Type1Diabetes => "Prevent or reverse beta cell destruction",
            Self::MultipleSclerosis => "Remyelination therapies, neuroprotection",
        }
    }

    /// Molecular targets a design for this disease may pick from.
    pub fn target_options(&self) -> &'static [&'static str] {
        match self {
            Self::Psoriasis => &["TYK2", "IL-23 receptor", "IL-17", "TNF-alpha"],
            Self::RheumatoidArthritis => &["TNF-alpha", "IL-6 receptor", "JAK1", "B-cells (CD20)"],
            Self::Type1Diabetes => &[
                "CD3 (T-cells)",
                "IL-2 receptor",
                "B-cells",
                "Beta cell regeneration",
            ],
            Self::MultipleSclerosis => &[
                "CD20 (B-cells)",
                "S1P receptor",
                "IL-17",
                "Myelin repair factors",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrugType {
    SmallMoleculeInhibitor,
    MonoclonalAntibody,
    FusionProtein,
    CellTherapy,
    GeneTherapy,
}

impl Labeled for DrugType {
    const ALL: &'static [Self] = &[
        Self::SmallMoleculeInhibitor,
        Self::MonoclonalAntibody,
        Self::FusionProtein,
        Self::CellTherapy,
        Self::GeneTherapy,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::SmallMoleculeInhibitor => "Small Molecule Inhibitor",
            Self::MonoclonalAntibody => "Monoclonal Antibody",
            Self::FusionProtein => "Fusion Protein",
            Self::CellTherapy => "Cell Therapy",
            Self::GeneTherapy => "Gene Therapy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Oral,
    Subcutaneous,
    IvInfusion,
    Topical,
}

impl Labeled for Delivery {
    const ALL: &'static [Self] = &[
        Self::Oral,
        Self::Subcutaneous,
        Self::IvInfusion,
        Self::Topical,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Oral => "Oral (pill)",
            Self::Subcutaneous => "Subcutaneous injection (self-administered)",
            Self::IvInfusion => "IV infusion (clinic visit)",
            Self::Topical => "Topical (cream/patch)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficacyPriority {
    MaximumEfficacy,
    Balanced,
    MaximumSafety,
}

impl Labeled for EfficacyPriority {
    const ALL: &'static [Self] = &[Self::MaximumEfficacy, Self::Balanced, Self::MaximumSafety];

    fn label(&self) -> &'static str {
        match self {
            Self::MaximumEfficacy => "Maximum Efficacy",
            Self::Balanced => "Balanced",
            Self::MaximumSafety => "Maximum Safety",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffect {
    IncreasedInfectionRisk,
    InjectionSiteReactions,
    LiverToxicity,
    GiSymptoms,
    Headache,
    Immunosuppression,
    AllergicReactions,
}

impl Labeled for SideEffect {
    const ALL: &'static [Self] = &[
        Self::IncreasedInfectionRisk,
        Self::InjectionSiteReactions,
        Self::LiverToxicity,
        Self::GiSymptoms,
        Self::Headache,
        Self::Immunosuppression,
        Self::AllergicReactions,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::IncreasedInfectionRisk => "Increased infection risk",
            Self::InjectionSiteReactions => "Injection site reactions",
            Self::LiverToxicity => "Liver toxicity",
            Self::GiSymptoms => "GI symptoms",
            Self::Headache => "Headache",
            Self::Immunosuppression => "Immunosuppression",
            Self::AllergicReactions => "Allergic reactions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostEstimate {
    Under1k,
    From1kTo10k,
    From10kTo50k,
    Over50k,
}

impl Labeled for CostEstimate {
    const ALL: &'static [Self] = &[
        Self::Under1k,
        Self::From1kTo10k,
        Self::From10kTo50k,
        Self::Over50k,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Under1k => "<$1,000",
            Self::From1kTo10k => "$1,000-$10,000",
            Self::From10kTo50k => "$10,000-$50,000",
            Self::Over50k => ">$50,000",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dosing {
    Daily,
    Weekly,
    EveryTwoWeeks,
    Monthly,
    OneTime,
}

impl Labeled for Dosing {
    const ALL: &'static [Self] = &[
        Self::Daily,
        Self::Weekly,
        Self::EveryTwoWeeks,
        Self::Monthly,
        Self::OneTime,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::EveryTwoWeeks => "Every 2 weeks",
            Self::Monthly => "Monthly",
            Self::OneTime => "One-time",
        }
    }
}

/// DTO for submitting a treatment design.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitDesignRequest {
    #[validate(length(max = 100, message = "Treatment name must be at most 100 characters."))]
    #[serde(default)]
    pub name: String,
    pub disease: Disease,
    #[validate(length(min = 1, max = 100))]
    pub target: String,
    pub drug_type: DrugType,
    #[validate(length(max = 2000, message = "Mechanism must be at most 2000 characters."))]
    #[serde(default)]
    pub mechanism: String,
    pub delivery: Delivery,
    pub efficacy_priority: EfficacyPriority,
    #[serde(default)]
    pub side_effects: Vec<SideEffect>,
    pub cost: CostEstimate,
    pub dosing: Dosing,
    #[validate(length(max = 2000, message = "Rationale must be at most 2000 characters."))]
    #[serde(default)]
    pub rationale: String,
}

/// A validated treatment design kept in the session for feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentDesign {
    pub name: Option<String>,
    pub disease: Disease,
    pub target: &'static str,
    pub drug_type: DrugType,
    pub mechanism: Option<String>,
    pub delivery: Delivery,
    pub efficacy_priority: EfficacyPriority,
    pub side_effects: BTreeSet<SideEffect>,
    pub cost: CostEstimate,
    pub dosing: Dosing,
    pub rationale: Option<String>,
}

impl TryFrom<SubmitDesignRequest> for TreatmentDesign {
    type Error = String;

    /// Checks the target against the chosen disease and sanitises the free text.
    fn try_from(req: SubmitDesignRequest) -> Result<Self, Self::Error> {
        let target = req
            .disease
            .target_options()
            .iter()
            .find(|t| **t == req.target)
            .copied()
            .ok_or_else(|| {
                format!(
                    "'{}' is not a target option for {}",
                    req.target,
                    req.disease.label()
                )
            })?;

        Ok(Self {
            name: clean_text(&req.name),
            disease: req.disease,
            target,
            drug_type: req.drug_type,
            mechanism: clean_text(&req.mechanism),
            delivery: req.delivery,
            efficacy_priority: req.efficacy_priority,
            side_effects: req.side_effects.into_iter().collect(),
            cost: req.cost,
            dosing: req.dosing,
            rationale: clean_text(&req.rationale),
        })
    }
}

/// Summary echoed back after a design submission.
#[derive(Debug, Serialize)]
pub struct DesignSummary {
    pub name: Option<String>,
    pub disease: &'static str,
    pub target: &'static str,
    pub drug_type: &'static str,
    pub delivery: &'static str,
    pub dosing: &'static str,
    pub side_effects: Vec<&'static str>,
}

impl From<&TreatmentDesign> for DesignSummary {
    fn from(d: &TreatmentDesign) -> Self {
        Self {
            name: d.name.clone(),
            disease: d.disease.label(),
            target: d.target,
            drug_type: d.drug_type.label(),
            delivery: d.delivery.label(),
            dosing: d.dosing.label(),
            side_effects: d.side_effects.iter().map(|s| s.label()).collect(),
        }
    }
}

/// Disease background shown before the design form.
#[derive(Debug, Serialize)]
pub struct DiseaseProfile {
    pub id: Disease,
    pub label: &'static str,
    pub description: &'static str,
    pub key_pathway: &'static str,
    pub current_treatments: &'static [&'static str],
    pub unmet_needs: &'static str,
    pub target_options: &'static [&'static str],
}

impl From<Disease> for DiseaseProfile {
    fn from(d: Disease) -> Self {
        Self {
            id: d,
            label: d.label(),
            description: d.description(),
            key_pathway: d.key_pathway(),
            current_treatments: d.current_treatments(),
            unmet_needs: d.unmet_needs(),
            target_options: d.target_options(),
        }
    }
}

/// Every allowed value of the design form.
#[derive(Debug, Serialize)]
pub struct DesignOptions {
    pub diseases: Vec<DiseaseProfile>,
    pub drug_types: Vec<Choice<DrugType>>,
    pub deliveries: Vec<Choice<Delivery>>,
    pub efficacy_priorities: Vec<Choice<EfficacyPriority>>,
    pub side_effects: Vec<Choice<SideEffect>>,
    pub costs: Vec<Choice<CostEstimate>>,
    pub dosings: Vec<Choice<Dosing>>,
}

impl DesignOptions {
    pub fn all() -> Self {
        Self {
            diseases: Disease::ALL.iter().copied().map(DiseaseProfile::from).collect(),
            drug_types: choices(),
            deliveries: choices(),
            efficacy_priorities: choices(),
            side_effects: choices(),
            costs: choices(),
            dosings: choices(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(disease: Disease, target: &str) -> SubmitDesignRequest {
        SubmitDesignRequest {
            name: "Immunobalance-X".to_string(),
            disease,
            target: target.to_string(),
            drug_type: DrugType::SmallMoleculeInhibitor,
            mechanism: "Blocks the kinase".to_string(),
            delivery: Delivery::Oral,
            efficacy_priority: EfficacyPriority::Balanced,
            side_effects: vec![SideEffect::Headache, SideEffect::Headache],
            cost: CostEstimate::From10kTo50k,
            dosing: Dosing::Daily,
            rationale: String::new(),
        }
    }

    #[test]
    fn test_target_must_belong_to_disease() {
        let ok = TreatmentDesign::try_from(request(Disease::Psoriasis, "TYK2"));
        assert!(ok.is_ok());

        let err = TreatmentDesign::try_from(request(Disease::Type1Diabetes, "TYK2"));
        assert!(err.unwrap_err().contains("Type 1 Diabetes"));
    }

    #[test]
    fn test_side_effects_are_deduplicated_and_blank_text_dropped() {
        let design = TreatmentDesign::try_from(request(Disease::Psoriasis, "IL-17")).unwrap();
        assert_eq!(design.side_effects.len(), 1);
        assert_eq!(design.rationale, None);
        assert_eq!(design.name.as_deref(), Some("Immunobalance-X"));
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let raw = serde_json::json!({
            "disease": "lupus",
            "target": "TYK2",
            "drug_type": "small_molecule_inhibitor",
            "delivery": "oral",
            "efficacy_priority": "balanced",
            "cost": "under1k",
            "dosing": "daily"
        });
        assert!(serde_json::from_value::<SubmitDesignRequest>(raw).is_err());
    }

    #[test]
    fn test_options_cover_every_value() {
        let options = DesignOptions::all();
        assert_eq!(options.diseases.len(), 4);
        assert_eq!(options.side_effects.len(), 7);
        assert_eq!(options.dosings[2].label, "Every 2 weeks");

        let json = serde_json::to_value(&options.costs[1]).unwrap();
        assert_eq!(json["id"], "from1k_to10k");
    }

    #[test]
    fn test_overlong_name_fails_validation() {
        let mut req = request(Disease::Psoriasis, "TYK2");
        req.name = "x".repeat(101);
        assert!(req.validate().is_err());
    }
}
