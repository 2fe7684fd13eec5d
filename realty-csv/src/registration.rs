//! Registration types: the kind of right or restriction a contract registers.
//!
//! Extracts carry a numeric registry code; tables show the human-readable label.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Kind of registered right or restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegistrationType {
    Ownership,
    SharedOwnership,
    JointOwnership,
    EconomicManagement,
    OperationalManagement,
    LifetimeInheritablePossession,
    PermanentUse,
    Servitude,
    Lease,
    Mortgage,
    MortgageByLaw,
    FreeUse,
    TrustManagement,
    SharedConstruction,
    /// A code absent from [`REGISTRATION_TYPES`], or no code at all.
    #[default]
    Unknown,
}

/// Registry code and display label for every known registration type.
pub const REGISTRATION_TYPES: &[(RegistrationType, &str, &str)] = &[
    (RegistrationType::Ownership, "001001000000", "Право собственности"),
    (RegistrationType::SharedOwnership, "001002000000", "Общая долевая собственность"),
    (RegistrationType::JointOwnership, "001003000000", "Общая совместная собственность"),
    (RegistrationType::EconomicManagement, "001004000000", "Хозяйственное ведение"),
    (RegistrationType::OperationalManagement, "001005000000", "Оперативное управление"),
    (
        RegistrationType::LifetimeInheritablePossession,
        "001006000000",
        "Пожизненное наследуемое владение",
    ),
    (RegistrationType::PermanentUse, "001007000000", "Постоянное (бессрочное) пользование"),
    (RegistrationType::Servitude, "022001000000", "Сервитут"),
    (RegistrationType::Lease, "022006000000", "Аренда (в том числе, субаренда)"),
    (RegistrationType::Mortgage, "022007000000", "Ипотека"),
    (RegistrationType::MortgageByLaw, "022008000000", "Ипотека в силу закона"),
    (RegistrationType::FreeUse, "022009000000", "Безвозмездное (срочное) пользование"),
    (RegistrationType::TrustManagement, "022010000000", "Доверительное управление"),
    (
        RegistrationType::SharedConstruction,
        "022024000000",
        "Участие в долевом строительстве",
    ),
];

impl RegistrationType {
    /// Looks a registry code up. Unmapped codes resolve to [`RegistrationType::Unknown`].
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        REGISTRATION_TYPES
            .iter()
            .find(|(_, known, _)| *known == code)
            .map(|(kind, _, _)| *kind)
            .unwrap_or(RegistrationType::Unknown)
    }

    /// Human-readable label; empty for unmapped types.
    pub fn label(&self) -> &'static str {
        self.entry().map(|(_, _, label)| *label).unwrap_or_default()
    }

    fn entry(&self) -> Option<&'static (RegistrationType, &'static str, &'static str)> {
        REGISTRATION_TYPES.iter().find(|(kind, _, _)| kind == self)
    }
}

impl fmt::Display for RegistrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RegistrationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(RegistrationType::from_code(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_resolves_label() {
        let kind = RegistrationType::from_code("001001000000");
        assert_eq!(kind, RegistrationType::Ownership);
        assert_eq!(kind.label(), "Право собственности");
    }

    #[test]
    fn test_code_is_trimmed() {
        assert_eq!(
            RegistrationType::from_code("  022006000000\n"),
            RegistrationType::Lease
        );
    }

    #[test]
    fn test_unmapped_code_has_empty_label() {
        let kind = RegistrationType::from_code("999999999999");
        assert_eq!(kind, RegistrationType::Unknown);
        assert_eq!(kind.label(), "");
    }

    #[test]
    fn test_label_resolution_is_stable() {
        for (kind, _, label) in REGISTRATION_TYPES {
            assert_eq!(kind.label(), *label);
            assert_eq!(kind.label(), kind.label());
        }
    }

    #[test]
    fn test_table_codes_are_unique() {
        for (i, (_, code, _)) in REGISTRATION_TYPES.iter().enumerate() {
            assert!(
                REGISTRATION_TYPES[i + 1..].iter().all(|(_, other, _)| other != code),
                "duplicate code {code}"
            );
        }
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(RegistrationType::Mortgage.to_string(), "Ипотека");
    }
}
