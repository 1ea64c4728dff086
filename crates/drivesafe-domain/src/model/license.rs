//! Driving license categories and their subcategory codes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main license category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LicenseCategory {
    A,
    B,
    C,
    D,
}

impl LicenseCategory {
    pub const ALL: [LicenseCategory; 4] = [
        LicenseCategory::A,
        LicenseCategory::B,
        LicenseCategory::C,
        LicenseCategory::D,
    ];

    /// Subcategory codes in display order
    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            LicenseCategory::A => &["AM", "A1", "A2", "A"],
            LicenseCategory::B => &["B1", "B", "BE"],
            LicenseCategory::C => &["C1", "C", "C1E", "CE"],
            LicenseCategory::D => &["D1", "D", "D1E", "DE"],
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            LicenseCategory::A => "A",
            LicenseCategory::B => "B",
            LicenseCategory::C => "C",
            LicenseCategory::D => "D",
        }
    }
}

impl std::fmt::Display for LicenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown license code: {0}")]
pub struct UnknownLicense(pub String);

/// Category owning a subcategory code (exact, upper-case match)
pub fn category_of(code: &str) -> Option<LicenseCategory> {
    LicenseCategory::ALL
        .into_iter()
        .find(|cat| cat.subcategories().contains(&code))
}

/// Position of a code in the catalog, used for stable ordering
fn catalog_index(code: &str) -> Option<(LicenseCategory, usize)> {
    let category = category_of(code)?;
    let index = category.subcategories().iter().position(|c| *c == code)?;
    Some((category, index))
}

/// Group held codes by category. Unknown codes are left out.
pub fn group_by_category<S: AsRef<str>>(licenses: &[S]) -> BTreeMap<LicenseCategory, Vec<&str>> {
    let mut groups: BTreeMap<LicenseCategory, Vec<&str>> = BTreeMap::new();
    for code in licenses.iter().map(AsRef::as_ref) {
        if let Some(category) = category_of(code) {
            groups.entry(category).or_default().push(code);
        }
    }
    for codes in groups.values_mut() {
        codes.sort_by_key(|c| catalog_index(c));
        codes.dedup();
    }
    groups
}

/// Trim, upper-case, de-duplicate and sort codes in catalog order
pub fn normalize_licenses<S: AsRef<str>>(licenses: &[S]) -> Result<Vec<String>, UnknownLicense> {
    let mut indexed = Vec::with_capacity(licenses.len());
    for raw in licenses {
        let code = raw.as_ref().trim().to_uppercase();
        if code.is_empty() {
            continue;
        }
        let index = catalog_index(&code).ok_or_else(|| UnknownLicense(code.clone()))?;
        indexed.push((index, code));
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.dedup_by(|a, b| a.0 == b.0);
    Ok(indexed.into_iter().map(|(_, code)| code).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("AM"), Some(LicenseCategory::A));
        assert_eq!(category_of("A"), Some(LicenseCategory::A));
        assert_eq!(category_of("BE"), Some(LicenseCategory::B));
        assert_eq!(category_of("C1E"), Some(LicenseCategory::C));
        assert_eq!(category_of("DE"), Some(LicenseCategory::D));
        assert_eq!(category_of("E"), None);
        assert_eq!(category_of("b"), None);
    }

    #[test]
    fn test_normalize_licenses_orders_and_dedups() {
        let input = vec![" be", "B", "a1", "b", "AM", ""];
        let normalized = normalize_licenses(input.as_slice()).unwrap();
        assert_eq!(normalized, vec!["AM", "A1", "B", "BE"]);
    }

    #[test]
    fn test_normalize_licenses_rejects_unknown() {
        let err = normalize_licenses(&["B", "Z9"]).unwrap_err();
        assert_eq!(err, UnknownLicense("Z9".to_string()));
    }

    #[test]
    fn test_group_by_category() {
        let held = vec!["CE".to_string(), "B".to_string(), "C1".to_string(), "X".to_string()];
        let groups = group_by_category(held.as_slice());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&LicenseCategory::B], vec!["B"]);
        assert_eq!(groups[&LicenseCategory::C], vec!["C1", "CE"]);
    }
}
