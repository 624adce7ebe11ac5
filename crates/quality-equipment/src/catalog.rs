//! Machine catalog contract.

use quality_types::MachineRecord;

/// Read access to the equipment catalog. Catalog entries are immutable;
/// the scorer never writes back.
pub trait MachineCatalog: Send + Sync {
    /// Every available machine.
    fn list_all(&self) -> Vec<MachineRecord>;
}

/// In-memory catalog backed by a vector of records.
pub struct InMemoryCatalog {
    machines: Vec<MachineRecord>,
}

impl InMemoryCatalog {
    pub fn new(machines: Vec<MachineRecord>) -> Self {
        Self { machines }
    }

    /// Catalog seeded with the built-in machines.
    pub fn seeded() -> Self {
        Self::new(crate::seed::seed_machines())
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

impl MachineCatalog for InMemoryCatalog {
    fn list_all(&self) -> Vec<MachineRecord> {
        self.machines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_is_nonempty_with_unique_ids() {
        let catalog = InMemoryCatalog::seeded();
        assert!(catalog.len() >= 4);

        let mut ids: Vec<String> = catalog.list_all().iter().map(|m| m.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
