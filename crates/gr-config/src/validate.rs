//! Load-time validation and non-fatal lint for taxonomy documents.
//!
//! Validation is the hard gate: a class or weapon with an empty `ID`, `Name`
//! or `RoleID` rejects the whole document. Lint reports internal drift (order
//! hints naming things that do not exist) without rejecting anything.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use gr_common::{ClassLabel, WeaponId};
use thiserror::Error;

use crate::taxonomy::{Class, Taxonomy, Weapon};

/// Which kind of taxonomy entry failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    Class,
    Weapon,
}

/// Document keys that were empty or absent on an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid class '{label}': missing {missing}")]
    InvalidClass {
        label: ClassLabel,
        missing: MissingFields,
    },

    #[error("invalid weapon in class '{label}' (Weapons[{position}]): missing {missing}")]
    InvalidWeapon {
        label: ClassLabel,
        position: usize,
        missing: MissingFields,
    },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("failed to parse {format} config: {message}")]
    Parse { format: String, message: String },
}

impl ConfigError {
    /// The entry kind for validation failures, `None` for read/parse errors.
    pub fn kind(&self) -> Option<InvalidKind> {
        match self {
            ConfigError::InvalidClass { .. } => Some(InvalidKind::Class),
            ConfigError::InvalidWeapon { .. } => Some(InvalidKind::Weapon),
            _ => None,
        }
    }

    /// The class label the failure is filed under, if any.
    pub fn label(&self) -> Option<&ClassLabel> {
        match self {
            ConfigError::InvalidClass { label, .. } | ConfigError::InvalidWeapon { label, .. } => {
                Some(label)
            }
            _ => None,
        }
    }
}

impl From<ConfigError> for gr_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidClass { label, missing } => gr_common::Error::InvalidClass {
                label: label.0,
                detail: format!("missing {}", missing),
            },
            ConfigError::InvalidWeapon {
                label,
                position,
                missing,
            } => gr_common::Error::InvalidWeapon {
                label: label.0,
                detail: format!("Weapons[{}] missing {}", position, missing),
            },
            other => gr_common::Error::Config(other.to_string()),
        }
    }
}

fn missing_fields(id: &str, name: &str, role: &str) -> Option<MissingFields> {
    let mut missing = Vec::new();
    if id.is_empty() {
        missing.push("ID");
    }
    if name.is_empty() {
        missing.push("Name");
    }
    if role.is_empty() {
        missing.push("RoleID");
    }
    if missing.is_empty() {
        None
    } else {
        Some(MissingFields(missing))
    }
}

fn check_class(label: &ClassLabel, class: &Class) -> Result<(), ConfigError> {
    if let Some(missing) = missing_fields(
        class.id.as_str(),
        &class.display_name,
        class.role_ref.as_str(),
    ) {
        return Err(ConfigError::InvalidClass {
            label: label.clone(),
            missing,
        });
    }
    for (position, weapon) in class.weapons.iter().enumerate() {
        check_weapon(label, position, weapon)?;
    }
    Ok(())
}

fn check_weapon(label: &ClassLabel, position: usize, weapon: &Weapon) -> Result<(), ConfigError> {
    match missing_fields(
        weapon.id.as_str(),
        &weapon.display_name,
        weapon.role_ref.as_str(),
    ) {
        Some(missing) => Err(ConfigError::InvalidWeapon {
            label: label.clone(),
            position,
            missing,
        }),
        None => Ok(()),
    }
}

/// Check every class and weapon for the required fields.
///
/// Classes are visited in label order and each class is checked before its
/// weapons; the first failure is returned.
pub fn validate(taxonomy: &Taxonomy) -> Result<(), ConfigError> {
    for (label, class) in &taxonomy.classes {
        check_class(label, class)?;
    }
    Ok(())
}

/// Non-fatal inconsistency inside a valid taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `ClassOrder` names a label with no class entry.
    UnknownOrderedClass { label: ClassLabel },
    /// `WeaponOrder` is keyed by a label with no class entry.
    UnknownWeaponOrderClass { label: ClassLabel },
    /// `WeaponOrder` lists a weapon id the class does not declare.
    UnknownOrderedWeapon { label: ClassLabel, weapon: WeaponId },
    /// A class declares the same weapon id more than once.
    DuplicateWeaponId { label: ClassLabel, weapon: WeaponId },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::UnknownOrderedClass { label } => {
                write!(f, "ClassOrder references unknown class '{}'", label)
            }
            ConfigWarning::UnknownWeaponOrderClass { label } => {
                write!(f, "WeaponOrder references unknown class '{}'", label)
            }
            ConfigWarning::UnknownOrderedWeapon { label, weapon } => write!(
                f,
                "WeaponOrder for '{}' references unknown weapon '{}'",
                label, weapon
            ),
            ConfigWarning::DuplicateWeaponId { label, weapon } => {
                write!(f, "class '{}' declares weapon '{}' twice", label, weapon)
            }
        }
    }
}

/// Collect order hints that point nowhere and duplicated weapon ids.
pub fn lint(taxonomy: &Taxonomy) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    for label in &taxonomy.class_order {
        if !taxonomy.classes.contains_key(label) {
            warnings.push(ConfigWarning::UnknownOrderedClass {
                label: label.clone(),
            });
        }
    }

    for (label, order) in &taxonomy.weapon_order {
        let Some(class) = taxonomy.classes.get(label) else {
            warnings.push(ConfigWarning::UnknownWeaponOrderClass {
                label: label.clone(),
            });
            continue;
        };
        for weapon in order {
            if class.weapon(weapon.as_str()).is_none() {
                warnings.push(ConfigWarning::UnknownOrderedWeapon {
                    label: label.clone(),
                    weapon: weapon.clone(),
                });
            }
        }
    }

    for (label, class) in &taxonomy.classes {
        let mut seen = BTreeSet::new();
        for weapon in &class.weapons {
            if !seen.insert(weapon.id.as_str()) {
                warnings.push(ConfigWarning::DuplicateWeaponId {
                    label: label.clone(),
                    weapon: weapon.id.clone(),
                });
            }
        }
    }

    warnings
}
