//! Casing variants for user-supplied identifiers.
//!
//! Names are single-word identifiers (`dashboard`, `userProfile`, `Tasks2`), so no
//! word splitting happens: PascalCase and camelCase only touch the first letter,
//! and kebab-case is the lower-cased form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// One of the capitalization forms a placeholder can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    Raw,
    Lower,
    Pascal,
    Camel,
    Kebab,
}

impl Casing {
    pub const ALL: [Casing; 5] = [
        Casing::Raw,
        Casing::Lower,
        Casing::Pascal,
        Casing::Camel,
        Casing::Kebab,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Lower => "lower",
            Self::Pascal => "pascal",
            Self::Camel => "camel",
            Self::Kebab => "kebab",
        }
    }
}

impl fmt::Display for Casing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Casing {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PlanError::UnknownCasing {
                casing: s.to_string(),
            })
    }
}

/// Every casing form of one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseVariants {
    pub raw: String,
    pub lower: String,
    pub pascal: String,
    pub camel: String,
    pub kebab: String,
}

impl CaseVariants {
    /// Select the form named by `casing`.
    pub fn get(&self, casing: Casing) -> &str {
        match casing {
            Casing::Raw => &self.raw,
            Casing::Lower => &self.lower,
            Casing::Pascal => &self.pascal,
            Casing::Camel => &self.camel,
            Casing::Kebab => &self.kebab,
        }
    }
}

/// Check that `name` matches `[A-Za-z][A-Za-z0-9]*`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Compute all casing variants of `name`.
pub fn case_variants(name: &str) -> Result<CaseVariants, PlanError> {
    if !is_valid_name(name) {
        return Err(PlanError::InvalidName {
            name: name.to_string(),
        });
    }

    // Validated as ASCII above, so byte slicing at 1 is a char boundary.
    let (head, tail) = name.split_at(1);
    let lower = name.to_ascii_lowercase();

    Ok(CaseVariants {
        raw: name.to_string(),
        pascal: format!("{}{tail}", head.to_ascii_uppercase()),
        camel: format!("{}{tail}", head.to_ascii_lowercase()),
        kebab: lower.clone(),
        lower,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_of_lowercase_name() {
        let v = case_variants("dashboard").unwrap();
        assert_eq!(v.raw, "dashboard");
        assert_eq!(v.lower, "dashboard");
        assert_eq!(v.pascal, "Dashboard");
        assert_eq!(v.camel, "dashboard");
        assert_eq!(v.kebab, "dashboard");
    }

    #[test]
    fn test_variants_keep_inner_capitals() {
        let v = case_variants("userProfile2").unwrap();
        assert_eq!(v.pascal, "UserProfile2");
        assert_eq!(v.camel, "userProfile2");
        assert_eq!(v.lower, "userprofile2");
        assert_eq!(v.kebab, "userprofile2");
    }

    #[test]
    fn test_camel_lowers_first_letter() {
        let v = case_variants("Tasks").unwrap();
        assert_eq!(v.camel, "tasks");
        assert_eq!(v.pascal, "Tasks");
    }

    #[test]
    fn test_pascal_differs_only_in_first_letter() {
        for name in ["a", "Z", "tasks", "TaskList", "x9y8", "ABC"] {
            let v = case_variants(name).unwrap();
            assert!(v.pascal.starts_with(|c: char| c.is_ascii_uppercase()));
            assert_eq!(v.pascal[1..], name[1..]);
            assert!(v.pascal[..1].eq_ignore_ascii_case(&name[..1]));
            assert_eq!(v.lower, v.lower.to_lowercase());
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "1page", "my-page", "my_page", "page name", "pagé", "_x"] {
            assert!(
                matches!(case_variants(name), Err(PlanError::InvalidName { .. })),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_casing_from_str() {
        assert_eq!("pascal".parse::<Casing>().unwrap(), Casing::Pascal);
        assert_eq!("kebab".parse::<Casing>().unwrap(), Casing::Kebab);
        assert!(matches!(
            "snake".parse::<Casing>(),
            Err(PlanError::UnknownCasing { .. })
        ));
    }

    #[test]
    fn test_get_selects_field() {
        let v = case_variants("tasks").unwrap();
        assert_eq!(v.get(Casing::Pascal), "Tasks");
        assert_eq!(v.get(Casing::Raw), "tasks");
    }
}
