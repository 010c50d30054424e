//! Value-id to display-name resolution

use std::collections::HashMap;

/// Which name space a value id belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Factor,
    Measure,
}

/// Lookup port for human readable value names.
/// `None` means the id is unknown; callers display the raw id instead.
pub trait NameResolver {
    fn resolve(&self, kind: ValueKind, value_id: &str) -> Option<String>;

    /// Display name with identity fallback
    fn display_name(&self, kind: ValueKind, value_id: &str) -> String {
        self.resolve(kind, value_id)
            .unwrap_or_else(|| value_id.to_string())
    }
}

/// Name tables shipped with the page configuration
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    factors: HashMap<String, String>,
    measures: HashMap<String, String>,
}

impl NameTable {
    pub fn new(factors: HashMap<String, String>, measures: HashMap<String, String>) -> Self {
        Self { factors, measures }
    }
}

impl NameResolver for NameTable {
    fn resolve(&self, kind: ValueKind, value_id: &str) -> Option<String> {
        let names = match kind {
            ValueKind::Factor => &self.factors,
            ValueKind::Measure => &self.measures,
        };
        names.get(value_id).cloned()
    }
}
