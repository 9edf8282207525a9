use std::collections::BTreeMap;

use serde::Serialize;

/// What deleting one row would do, counted before the delete runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionImpact {
    /// Rows removed per table, the target row included.
    pub deleted: BTreeMap<String, u64>,
    /// Rows whose foreign key is cleared, keyed by constraint name.
    pub cleared: BTreeMap<String, u64>,
}

impl DeletionImpact {
    pub fn deleted_from(&self, table: &str) -> u64 {
        self.deleted.get(table).copied().unwrap_or(0)
    }

    pub fn cleared_by(&self, constraint: &str) -> u64 {
        self.cleared.get(constraint).copied().unwrap_or(0)
    }
}
