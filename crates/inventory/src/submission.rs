use std::collections::HashMap;

use crate::catalog::{Catalog, CatalogEntry, ItemKey};
use crate::processor::ProcessingError;

/// One validated end-of-shift count, built per request.
///
/// Holds exactly one quantity per catalog entry. Fields the form did not send
/// at all count as zero rather than failing the submission; a field that was
/// sent must hold a non-negative integer, even when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    employee: String,
    counts: HashMap<ItemKey, u32>,
}

impl Submission {
    /// Validate raw form values against the catalog.
    ///
    /// Fails on the first entry (in catalog order) whose value is not a
    /// non-negative integer; nothing is partially accepted.
    pub fn parse(
        catalog: &Catalog,
        employee: &str,
        raw_counts: &HashMap<String, String>,
    ) -> Result<Self, ProcessingError> {
        // Blank names are rejected, but the name is reported as typed.
        if employee.trim().is_empty() {
            return Err(ProcessingError::MissingField(crate::EMPLOYEE_FIELD));
        }

        let mut counts = HashMap::with_capacity(catalog.len());
        for (_, entry) in catalog.entries() {
            let key = entry.key();
            let raw = raw_counts.get(key.as_str()).map(String::as_str).unwrap_or("0");
            let quantity = parse_quantity(raw).ok_or_else(|| {
                ProcessingError::InvalidQuantity(entry.name().to_string(), raw.to_string())
            })?;
            counts.insert(key, quantity);
        }

        Ok(Self {
            employee: employee.to_string(),
            counts,
        })
    }

    pub fn employee(&self) -> &str {
        &self.employee
    }

    /// Quantity recorded for an entry; zero for entries outside the catalog
    /// this submission was parsed against.
    pub fn quantity(&self, entry: &CatalogEntry) -> u32 {
        self.counts.get(&entry.key()).copied().unwrap_or(0)
    }
}

fn parse_quantity(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    match trimmed.strip_prefix('-') {
        // "-0" is still zero; any other sign-prefixed value is negative.
        Some(digits) => match digits.parse::<u32>() {
            Ok(0) if !digits.starts_with('+') => Some(0),
            _ => None,
        },
        None => trimmed.parse::<u32>().ok(),
    }
}
