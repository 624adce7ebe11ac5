//! Deterministic multi-criteria equipment scoring.
//!
//! Five criteria score independently on their own scales (30/25/20/20/15,
//! raw max 110) and the sum normalizes to 0-100 via
//! `round(raw * 100 / 110)`. The raw scales stay individually tunable
//! while headline scores remain on a familiar range.

use tracing::debug;

use quality_types::{
    AutomationLevel, MachineRecord, PartRequirement, ScoredMachine, ScoringSettings,
};

/// Work-envelope criterion maximum.
pub const SIZE_WEIGHT: f64 = 30.0;
/// Tolerance-capability criterion maximum.
pub const TOLERANCE_WEIGHT: f64 = 25.0;
/// Automation-for-volume criterion maximum.
pub const AUTOMATION_WEIGHT: f64 = 20.0;
/// Operation-match criterion maximum.
pub const OPERATIONS_WEIGHT: f64 = 20.0;
/// Cycle-time criterion maximum.
pub const CYCLE_WEIGHT: f64 = 15.0;
/// Sum of all criterion maxima.
pub const RAW_MAX: f64 = 110.0;

/// Fraction of the size weight earned by an exact fit; slack up to the
/// saturation ratio earns the rest linearly.
const SIZE_BASE: f64 = 0.5;
/// Fraction of the tolerance weight earned by exactly meeting the target.
const TOLERANCE_BASE: f64 = 0.6;
/// Criterion fraction deviation from neutral required to count as a
/// dominant reason.
const REASON_DEVIATION: f64 = 0.15;

/// Annual-volume band for automation fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VolumeBand {
    Low,
    Medium,
    High,
}

/// A machine that passed every hard floor, with its fixed sub-scores.
struct Candidate {
    machine: MachineRecord,
    size: f64,
    tolerance: f64,
    automation: f64,
    operations: f64,
    capability_match: f32,
    gap_reasons: Vec<String>,
}

/// Scores machine candidates against a part requirement.
pub struct EquipmentScorer {
    settings: ScoringSettings,
}

impl EquipmentScorer {
    pub fn new(settings: ScoringSettings) -> Self {
        Self { settings }
    }

    /// Score and rank the candidate set. Pure: no I/O, identical inputs
    /// always produce identical output.
    ///
    /// Machines failing a hard floor (envelope, tolerance capability,
    /// material compatibility) are excluded entirely rather than ranked
    /// last. Ordering: final score descending, then price ascending, then
    /// id ascending. At most `settings.max_results` are returned.
    pub fn rank(&self, machines: &[MachineRecord], requirement: &PartRequirement) -> Vec<ScoredMachine> {
        let candidates: Vec<Candidate> = machines
            .iter()
            .filter_map(|machine| self.evaluate(machine, requirement))
            .collect();

        let cycle_scores = relative_cycle_scores(&candidates);

        let mut scored: Vec<ScoredMachine> = candidates
            .into_iter()
            .zip(cycle_scores)
            .map(|(candidate, cycle)| self.assemble(candidate, cycle, requirement))
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.machine.price.total_cmp(&b.machine.price))
                .then_with(|| a.machine.id.cmp(&b.machine.id))
        });
        scored.truncate(self.settings.max_results);

        debug!(
            candidates = machines.len(),
            ranked = scored.len(),
            "equipment ranking complete"
        );
        scored
    }

    /// Hard floors plus the four candidate-independent sub-scores.
    fn evaluate(&self, machine: &MachineRecord, requirement: &PartRequirement) -> Option<Candidate> {
        if !machine.supports_material(&requirement.material) {
            return None;
        }
        let size = self.size_score(machine, requirement)?;
        let tolerance = self.tolerance_score(machine, requirement)?;
        let automation = self.automation_score(machine, requirement);
        let (operations, capability_match, gap_reasons) =
            self.operations_score(machine, requirement);

        Some(Candidate {
            machine: machine.clone(),
            size,
            tolerance,
            automation,
            operations,
            capability_match,
            gap_reasons,
        })
    }

    /// Envelope fit. `None` when any axis is too small. Slack beyond the
    /// saturation ratio earns no further reward so oversized machines are
    /// not favored.
    fn size_score(&self, machine: &MachineRecord, requirement: &PartRequirement) -> Option<f64> {
        let ratio = machine.work_envelope.slack_ratio(&requirement.dimensions)?;
        let span = self.settings.size_saturation - 1.0;
        let slack_fraction = ((ratio - 1.0) / span).clamp(0.0, 1.0);
        Some(SIZE_WEIGHT * (SIZE_BASE + (1.0 - SIZE_BASE) * slack_fraction))
    }

    /// Tolerance capability. `None` when the machine cannot hold the
    /// target. Tighter capability scores higher until the plateau ratio;
    /// over-precision past that earns nothing extra.
    fn tolerance_score(&self, machine: &MachineRecord, requirement: &PartRequirement) -> Option<f64> {
        if machine.tolerance_capability > requirement.target_tolerance {
            return None;
        }
        let ratio = requirement.target_tolerance / machine.tolerance_capability;
        let span = self.settings.tolerance_plateau - 1.0;
        let margin_fraction = ((ratio - 1.0) / span).clamp(0.0, 1.0);
        Some(TOLERANCE_WEIGHT * (TOLERANCE_BASE + (1.0 - TOLERANCE_BASE) * margin_fraction))
    }

    /// Automation fit for the annual volume. Mismatch in either direction
    /// reduces the score: a manual machine at high volume is the worst
    /// case, but full automation at prototype volume also pays a penalty.
    fn automation_score(&self, machine: &MachineRecord, requirement: &PartRequirement) -> f64 {
        let band = self.volume_band(requirement.annual_volume);
        let fit = match (band, machine.automation_level) {
            (VolumeBand::Low, AutomationLevel::Manual) => 1.0,
            (VolumeBand::Low, AutomationLevel::SemiAuto) => 0.8,
            (VolumeBand::Low, AutomationLevel::FullAuto) => 0.4,
            (VolumeBand::Medium, AutomationLevel::Manual) => 0.5,
            (VolumeBand::Medium, AutomationLevel::SemiAuto) => 1.0,
            (VolumeBand::Medium, AutomationLevel::FullAuto) => 0.8,
            (VolumeBand::High, AutomationLevel::Manual) => 0.1,
            (VolumeBand::High, AutomationLevel::SemiAuto) => 0.5,
            (VolumeBand::High, AutomationLevel::FullAuto) => 1.0,
        };
        AUTOMATION_WEIGHT * fit
    }

    fn volume_band(&self, annual_volume: u32) -> VolumeBand {
        if annual_volume < self.settings.low_volume_max {
            VolumeBand::Low
        } else if annual_volume <= self.settings.high_volume_min {
            VolumeBand::Medium
        } else {
            VolumeBand::High
        }
    }

    /// Operation coverage, proportional to the matched fraction. Every
    /// missing operation produces a gap reason.
    fn operations_score(
        &self,
        machine: &MachineRecord,
        requirement: &PartRequirement,
    ) -> (f64, f32, Vec<String>) {
        let required = requirement.required_operations.len();
        if required == 0 {
            return (OPERATIONS_WEIGHT, 1.0, vec![]);
        }

        let matched = requirement
            .required_operations
            .intersection(&machine.supported_operations)
            .count();
        let gap_reasons = requirement
            .required_operations
            .difference(&machine.supported_operations)
            .map(|op| format!("missing required operation: {op:?}").to_lowercase())
            .collect();

        let fraction = matched as f64 / required as f64;
        (OPERATIONS_WEIGHT * fraction, fraction as f32, gap_reasons)
    }

    fn assemble(&self, candidate: Candidate, cycle: f64, requirement: &PartRequirement) -> ScoredMachine {
        let raw = candidate.size + candidate.tolerance + candidate.automation
            + candidate.operations
            + cycle;
        let score = (raw * 100.0 / RAW_MAX).round() as u32;

        let mut reasons = dominant_reasons(&candidate, cycle, requirement);
        reasons.extend(candidate.gap_reasons.iter().cloned());

        ScoredMachine {
            machine: candidate.machine,
            score,
            reasons,
            capability_match: candidate.capability_match,
        }
    }
}

/// Cycle-time efficiency relative to the candidate set: the fastest
/// feasible machine earns the full weight, the slowest earns zero. A
/// single candidate (or a uniform set) earns the full weight.
fn relative_cycle_scores(candidates: &[Candidate]) -> Vec<f64> {
    let factors: Vec<f64> = candidates
        .iter()
        .map(|c| c.machine.cycle_time_factor)
        .collect();
    let best = factors.iter().copied().fold(f64::INFINITY, f64::min);
    let worst = factors.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    factors
        .iter()
        .map(|f| {
            if worst > best {
                CYCLE_WEIGHT * (worst - f) / (worst - best)
            } else {
                CYCLE_WEIGHT
            }
        })
        .collect()
}

/// The 1-3 most extreme criteria, phrased as contributing or detracting.
fn dominant_reasons(candidate: &Candidate, cycle: f64, requirement: &PartRequirement) -> Vec<String> {
    let machine = &candidate.machine;
    let entries = [
        (
            candidate.size / SIZE_WEIGHT,
            "work envelope comfortably exceeds part dimensions".to_string(),
            "work envelope only just fits the part".to_string(),
        ),
        (
            candidate.tolerance / TOLERANCE_WEIGHT,
            format!(
                "tolerance capability \u{b1}{}mm well inside the \u{b1}{}mm requirement",
                machine.tolerance_capability, requirement.target_tolerance
            ),
            format!(
                "tolerance capability \u{b1}{}mm meets the requirement with little margin",
                machine.tolerance_capability
            ),
        ),
        (
            candidate.automation / AUTOMATION_WEIGHT,
            format!(
                "automation level suits an annual volume of {}",
                requirement.annual_volume
            ),
            format!(
                "automation level poorly matched to an annual volume of {}",
                requirement.annual_volume
            ),
        ),
        (
            candidate.operations / OPERATIONS_WEIGHT,
            "supports all required operations".to_string(),
            "covers only part of the required operations".to_string(),
        ),
        (
            cycle / CYCLE_WEIGHT,
            "cycle time among the fastest of the candidates".to_string(),
            "cycle time lags the candidate set".to_string(),
        ),
    ];

    // Criteria furthest from neutral dominate; stable sort keeps the fixed
    // criterion order for equal deviations
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| {
        let da = (entries[a].0 - 0.5).abs();
        let db = (entries[b].0 - 0.5).abs();
        db.total_cmp(&da)
    });

    let mut reasons = Vec::new();
    for &i in &order {
        let (fraction, ref positive, ref negative) = entries[i];
        let deviation = fraction - 0.5;
        if reasons.len() >= 3 || (deviation.abs() < REASON_DEVIATION && !reasons.is_empty()) {
            break;
        }
        reasons.push(if deviation >= 0.0 {
            positive.clone()
        } else {
            negative.clone()
        });
    }
    reasons
}
