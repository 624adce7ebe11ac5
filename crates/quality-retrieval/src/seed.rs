//! Built-in quality-standard corpus.
//!
//! Six widely-used standards covering quality management, dimensional
//! control and the regulated industries the engine serves.

use std::collections::BTreeSet;

use quality_types::{StandardCategory, StandardDocument};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The built-in corpus.
pub fn seed_standards() -> Vec<StandardDocument> {
    vec![
        StandardDocument {
            id: "ISO-9001:2015".to_string(),
            title: "Quality management systems — Requirements".to_string(),
            organization: "ISO".to_string(),
            category: StandardCategory::QualityManagement,
            full_text: "ISO 9001:2015 specifies requirements for a quality management system \
                when an organization needs to demonstrate its ability to consistently provide \
                products and services that meet customer and applicable statutory and regulatory \
                requirements, and aims to enhance customer satisfaction. Key requirements \
                include context of the organization, leadership and commitment, risk-based \
                thinking, a process approach, customer focus and continual improvement."
                .to_string(),
            summary: "ISO 9001:2015 sets out criteria for quality management systems focusing \
                on customer satisfaction and continual improvement"
                .to_string(),
            key_requirements: strings(&[
                "Document control procedures",
                "Management review process",
                "Internal audit program",
                "Corrective action procedures",
                "Preventive action procedures",
                "Control of nonconforming product",
            ]),
            industries: set(&["manufacturing", "aerospace", "automotive", "medical", "electronics"]),
            applicable_processes: set(&["all"]),
        },
        StandardDocument {
            id: "AS9100D".to_string(),
            title: "Quality Management Systems - Requirements for Aviation, Space and Defense \
                Organizations"
                .to_string(),
            organization: "SAE".to_string(),
            category: StandardCategory::QualityManagement,
            full_text: "AS9100D is a widely adopted quality management system for the aerospace \
                industry. It includes all ISO 9001:2015 requirements plus aerospace-specific \
                requirements such as configuration management, product safety, risk management, \
                first article inspection, advanced product quality planning and on-time delivery \
                performance. All special processes must be controlled and validated, with \
                qualified personnel and maintained qualification records. The standard \
                emphasizes prevention of defects and reduction of variation and waste."
                .to_string(),
            summary: "AS9100D extends ISO 9001 for aerospace manufacturing with emphasis on \
                safety and reliability"
                .to_string(),
            key_requirements: strings(&[
                "Configuration management",
                "First article inspection (FAI)",
                "Counterfeit parts prevention",
                "Foreign object debris (FOD) prevention",
                "Critical items control",
                "Key characteristics identification",
            ]),
            industries: set(&["aerospace", "defense", "space"]),
            applicable_processes: set(&["machining", "assembly", "testing", "inspection"]),
        },
        StandardDocument {
            id: "ASME-Y14.5-2018".to_string(),
            title: "Dimensioning and Tolerancing".to_string(),
            organization: "ASME".to_string(),
            category: StandardCategory::Dimensional,
            full_text: "ASME Y14.5-2018 establishes uniform practices for stating and \
                interpreting dimensioning, tolerancing and related requirements. Geometric \
                dimensioning and tolerancing covers form tolerances (straightness, flatness, \
                circularity, cylindricity), orientation tolerances (perpendicularity, \
                angularity, parallelism), location tolerances (position, concentricity, \
                symmetry), profile and runout tolerances. Datum reference frames define \
                primary, secondary and tertiary datums with material condition modifiers \
                (MMC, LMC, RFS). The standard provides precise language for communicating \
                design intent and inspection requirements."
                .to_string(),
            summary: "ASME Y14.5-2018 defines the language of GD&T for precise dimensional \
                control"
                .to_string(),
            key_requirements: strings(&[
                "Datum reference frame establishment",
                "Feature control frame usage",
                "Material condition modifiers",
                "Tolerance stack-up analysis",
                "Inspection planning based on GD&T",
            ]),
            industries: set(&["manufacturing", "aerospace", "automotive", "medical"]),
            applicable_processes: set(&["design", "machining", "inspection", "quality_control"]),
        },
        StandardDocument {
            id: "ISO-1101:2017".to_string(),
            title: "Geometrical product specifications (GPS) — Geometrical tolerancing — \
                Tolerances of form, orientation, location and run-out"
                .to_string(),
            organization: "ISO".to_string(),
            category: StandardCategory::Tolerancing,
            full_text: "ISO 1101:2017 defines geometrical tolerancing to control form, \
                orientation, location and run-out. Form tolerances cover straightness, \
                flatness, roundness and cylindricity. Orientation tolerances cover \
                parallelism, perpendicularity and angularity. Location tolerances cover \
                position, concentricity and symmetry. The standard is compatible with but \
                distinct from ASME Y14.5."
                .to_string(),
            summary: "ISO 1101:2017 provides international standards for geometric tolerancing"
                .to_string(),
            key_requirements: strings(&[
                "Tolerance zone definition",
                "Datum system specification",
                "Material condition application",
                "Verification principles",
            ]),
            industries: set(&["manufacturing", "automotive", "medical", "aerospace"]),
            applicable_processes: set(&["design", "machining", "inspection"]),
        },
        StandardDocument {
            id: "IATF-16949:2016".to_string(),
            title: "Quality management system requirements for automotive production".to_string(),
            organization: "IATF".to_string(),
            category: StandardCategory::Automotive,
            full_text: "IATF 16949:2016 defines quality management system requirements for \
                automotive production and relevant service parts. Advanced Product Quality \
                Planning covers product and process design, validation and corrective action. \
                The Production Part Approval Process requires design records, process flow \
                diagrams, process FMEA, control plans, measurement system analysis, \
                dimensional results and material test results. Manufacturing process \
                requirements include error-proofing, preventive and predictive maintenance \
                and management of production tooling. The standard emphasizes defect \
                prevention and variation reduction in the supply chain."
                .to_string(),
            summary: "IATF 16949:2016 extends ISO 9001 for automotive manufacturing with APQP \
                and PPAP requirements"
                .to_string(),
            key_requirements: strings(&[
                "APQP implementation",
                "PPAP submission",
                "Control plan development",
                "FMEA (Failure Mode Effects Analysis)",
                "MSA (Measurement System Analysis)",
                "Statistical Process Control (SPC)",
            ]),
            industries: set(&["automotive"]),
            applicable_processes: set(&[
                "machining",
                "assembly",
                "testing",
                "inspection",
                "heat_treatment",
            ]),
        },
        StandardDocument {
            id: "ISO-13485:2016".to_string(),
            title: "Medical devices — Quality management systems — Requirements for regulatory \
                purposes"
                .to_string(),
            organization: "ISO".to_string(),
            category: StandardCategory::Medical,
            full_text: "ISO 13485:2016 specifies requirements for a quality management system \
                for medical device manufacturing. Risk management runs throughout the product \
                lifecycle with integration of ISO 14971. Design and development requires \
                planning, design inputs and outputs, review, verification, validation and \
                design transfer. Sterile devices require cleanliness controls and \
                sterilization process validation; implantable devices require traceability \
                and record retention. The standard requires strict documentation, validation \
                and traceability to ensure patient safety."
                .to_string(),
            summary: "ISO 13485:2016 provides quality system requirements for medical device \
                manufacturers"
                .to_string(),
            key_requirements: strings(&[
                "Risk management integration",
                "Design control procedures",
                "Process validation",
                "Sterilization validation (if applicable)",
                "Full traceability",
                "Medical device reporting (MDR)",
                "Post-market surveillance",
            ]),
            industries: set(&["medical", "pharmaceutical"]),
            applicable_processes: set(&[
                "machining",
                "assembly",
                "inspection",
                "sterilization",
                "packaging",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let docs = seed_standards();
        let mut ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), docs.len());
    }

    #[test]
    fn industry_coverage_matches_catalog() {
        let docs = seed_standards();
        let aerospace: Vec<&str> = docs
            .iter()
            .filter(|d| d.applies_to_industry("aerospace"))
            .map(|d| d.id.as_str())
            .collect();
        assert!(aerospace.contains(&"AS9100D"));
        assert!(aerospace.contains(&"ISO-9001:2015"));
        assert!(!aerospace.contains(&"IATF-16949:2016"));
    }

    #[test]
    fn every_standard_has_requirements_and_text() {
        for doc in seed_standards() {
            assert!(!doc.key_requirements.is_empty(), "{} lacks requirements", doc.id);
            assert!(!doc.full_text.is_empty());
            assert!(!doc.industries.is_empty());
        }
    }
}
