//! Validated, ordered set of instance names.

use std::collections::HashSet;

use crate::casing::{case_variants, CaseVariants};
use crate::error::PlanError;

/// Ordered, distinct identifiers driving per-name slots.
///
/// Order is preserved as given; it decides write order and report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    names: Vec<CaseVariants>,
}

impl NameSet {
    /// Validate every name and reject duplicates.
    pub fn new<I, S>(names: I) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for name in names {
            let name = name.as_ref();
            let variants = case_variants(name)?;
            if !seen.insert(name.to_string()) {
                return Err(PlanError::DuplicateName {
                    name: name.to_string(),
                });
            }
            out.push(variants);
        }
        Ok(Self { names: out })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CaseVariants> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
