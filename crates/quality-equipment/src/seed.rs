//! Built-in machine catalog.

use std::collections::BTreeSet;

use quality_types::{
    AutomationLevel, MachineCategory, MachineRecord, Operation, WorkEnvelope,
};

fn materials(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn operations(items: &[Operation]) -> BTreeSet<Operation> {
    items.iter().copied().collect()
}

/// The built-in catalog: four representative CNC machines.
pub fn seed_machines() -> Vec<MachineRecord> {
    vec![
        MachineRecord {
            id: "haas-st-30".to_string(),
            name: "Haas ST-30".to_string(),
            manufacturer: "Haas Automation".to_string(),
            category: MachineCategory::Lathe,
            price: 185_000.0,
            work_envelope: WorkEnvelope {
                x: 762.0,
                y: 305.0,
                z: 305.0,
            },
            tolerance_capability: 0.005,
            automation_level: AutomationLevel::SemiAuto,
            supported_operations: operations(&[Operation::Turning, Operation::Drilling]),
            cycle_time_factor: 1.0,
            material_compatibility: materials(&["aluminum", "steel", "stainless steel", "brass"]),
        },
        MachineRecord {
            id: "haas-vf-3".to_string(),
            name: "Haas VF-3".to_string(),
            manufacturer: "Haas Automation".to_string(),
            category: MachineCategory::Mill,
            price: 145_000.0,
            work_envelope: WorkEnvelope {
                x: 1016.0,
                y: 508.0,
                z: 635.0,
            },
            tolerance_capability: 0.008,
            automation_level: AutomationLevel::SemiAuto,
            supported_operations: operations(&[Operation::Milling, Operation::Drilling]),
            cycle_time_factor: 1.0,
            material_compatibility: materials(&[
                "aluminum",
                "steel",
                "stainless steel",
                "titanium",
                "brass",
            ]),
        },
        MachineRecord {
            id: "dmg-mori-nlx-2500".to_string(),
            name: "DMG MORI NLX 2500".to_string(),
            manufacturer: "DMG MORI".to_string(),
            category: MachineCategory::Lathe,
            price: 285_000.0,
            work_envelope: WorkEnvelope {
                x: 650.0,
                y: 350.0,
                z: 350.0,
            },
            tolerance_capability: 0.003,
            automation_level: AutomationLevel::FullAuto,
            supported_operations: operations(&[
                Operation::Turning,
                Operation::Milling,
                Operation::Drilling,
            ]),
            cycle_time_factor: 0.85,
            material_compatibility: materials(&[
                "aluminum",
                "steel",
                "stainless steel",
                "titanium",
                "brass",
            ]),
        },
        MachineRecord {
            id: "mazak-variaxis-i-600".to_string(),
            name: "Mazak Variaxis i-600".to_string(),
            manufacturer: "Mazak".to_string(),
            category: MachineCategory::FiveAxisMill,
            price: 495_000.0,
            work_envelope: WorkEnvelope {
                x: 600.0,
                y: 600.0,
                z: 500.0,
            },
            tolerance_capability: 0.005,
            automation_level: AutomationLevel::FullAuto,
            supported_operations: operations(&[Operation::Milling, Operation::Drilling]),
            cycle_time_factor: 0.7,
            material_compatibility: materials(&[
                "aluminum",
                "steel",
                "stainless steel",
                "titanium",
                "brass",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_machines_have_sane_numbers() {
        for machine in seed_machines() {
            assert!(machine.price > 0.0);
            assert!(machine.tolerance_capability > 0.0);
            assert!(machine.cycle_time_factor > 0.0);
            assert!(!machine.supported_operations.is_empty());
            assert!(!machine.material_compatibility.is_empty());
        }
    }

    #[test]
    fn only_one_seed_machine_holds_three_microns() {
        let tight: Vec<MachineRecord> = seed_machines()
            .into_iter()
            .filter(|m| m.tolerance_capability <= 0.003)
            .collect();
        assert_eq!(tight.len(), 1);
        assert_eq!(tight[0].id, "dmg-mori-nlx-2500");
    }
}
