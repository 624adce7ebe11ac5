//! Rule-based insight generation.
//!
//! Each rule is an independent predicate over the requirement and the
//! retrieved standards that either produces a message or stays silent.
//! Rules run in a fixed priority order: tolerance analysis first, then
//! material warnings, then standard-specific mandates.

use quality_types::{PartRequirement, RetrievedStandard};

/// How many of the top retrieved standards trigger standard-specific
/// mandates (FAI, PPAP, lot traceability).
const MANDATE_DEPTH: usize = 2;

/// Inputs to a single rule evaluation.
pub struct InsightContext<'a> {
    pub requirement: &'a PartRequirement,
    pub standards: &'a [RetrievedStandard],
    /// Tolerances below this magnitude count as critical
    pub tight_tolerance_threshold: f64,
}

impl InsightContext<'_> {
    fn material_lower(&self) -> String {
        self.requirement.material.to_lowercase()
    }

    /// Top retrieved standards considered for mandates.
    fn mandate_standards(&self) -> impl Iterator<Item = &RetrievedStandard> {
        self.standards.iter().take(MANDATE_DEPTH)
    }
}

/// A single predicate-to-message rule.
pub struct InsightRule {
    /// Stable rule name for logging and tests
    pub name: &'static str,
    apply: fn(&InsightContext) -> Option<String>,
}

impl InsightRule {
    pub fn evaluate(&self, context: &InsightContext) -> Option<String> {
        (self.apply)(context)
    }
}

/// The built-in rule set, in priority order.
pub fn default_rules() -> Vec<InsightRule> {
    vec![
        InsightRule {
            name: "tight-tolerances",
            apply: |ctx| {
                let tight = ctx
                    .requirement
                    .tight_tolerances(ctx.tight_tolerance_threshold);
                if tight.is_empty() {
                    return None;
                }
                Some(format!(
                    "Identified {} critical dimension(s) with tolerances below \u{b1}{}mm. \
                     Recommend CMM inspection with SPC monitoring.",
                    tight.len(),
                    ctx.tight_tolerance_threshold
                ))
            },
        },
        InsightRule {
            name: "titanium-tooling",
            apply: |ctx| {
                ctx.material_lower().contains("titanium").then(|| {
                    "Titanium material requires specialized tooling and cutting parameters. \
                     Monitor tool wear closely and validate process capability."
                        .to_string()
                })
            },
        },
        InsightRule {
            name: "stainless-work-hardening",
            apply: |ctx| {
                ctx.material_lower().contains("stainless").then(|| {
                    "Stainless steel machining may cause work hardening. \
                     Control feed rates and monitor surface finish carefully."
                        .to_string()
                })
            },
        },
        InsightRule {
            name: "hardened-steel-tooling",
            apply: |ctx| {
                ctx.material_lower().contains("hardened").then(|| {
                    "Hardened steel demands rigid setups and frequent tool condition checks. \
                     Verify process capability before committing to production."
                        .to_string()
                })
            },
        },
        InsightRule {
            name: "as9100-mandates",
            apply: |ctx| {
                ctx.mandate_standards()
                    .find(|s| s.standard.id.contains("AS9100"))
                    .map(|s| {
                        format!(
                            "Based on {}, require First Article Inspection (FAI) and \
                             maintain complete traceability.",
                            s.standard.id
                        )
                    })
            },
        },
        InsightRule {
            name: "iso13485-mandates",
            apply: |ctx| {
                ctx.mandate_standards()
                    .find(|s| s.standard.id.contains("13485"))
                    .map(|s| {
                        format!(
                            "Medical device standard {} applies. Ensure process validation \
                             and full lot traceability.",
                            s.standard.id
                        )
                    })
            },
        },
        InsightRule {
            name: "iatf-mandates",
            apply: |ctx| {
                ctx.mandate_standards()
                    .find(|s| s.standard.id.contains("IATF"))
                    .map(|s| {
                        format!(
                            "Automotive standard {} requires PPAP submission and a control \
                             plan with key characteristics identified.",
                            s.standard.id
                        )
                    })
            },
        },
    ]
}

/// Evaluates the rule set in order.
pub struct InsightGenerator {
    rules: Vec<InsightRule>,
}

impl InsightGenerator {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    pub fn with_rules(rules: Vec<InsightRule>) -> Self {
        Self { rules }
    }

    /// All messages from rules that fired, in rule order.
    pub fn generate(&self, context: &InsightContext) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(context))
            .collect()
    }
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}
