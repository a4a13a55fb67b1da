//! Class/weapon taxonomy types.
//!
//! These types match the guild configuration document: a `Classes` mapping of
//! label to class entry, plus optional `ClassOrder` and `WeaponOrder` display
//! hints. Keys are PascalCase on the wire but matched case-insensitively;
//! unknown keys are ignored and `null` reads as an absent key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use gr_common::{ClassId, ClassLabel, RoleId, WeaponId};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::validate::{validate, ConfigError};

/// A selectable sub-role under a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Weapon {
    #[serde(rename = "ID", default, deserialize_with = "null_as_default")]
    #[schemars(with = "WeaponId")]
    pub id: WeaponId,

    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    #[schemars(with = "String")]
    pub display_name: String,

    #[serde(rename = "RoleID", default, deserialize_with = "null_as_default")]
    #[schemars(with = "RoleId")]
    pub role_ref: RoleId,

    #[serde(rename = "Specialisation", default, deserialize_with = "null_as_default")]
    #[schemars(with = "i64")]
    pub specialisation: i64,
}

/// Top-level role category (Tank, Heal, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Class {
    #[serde(rename = "ID", default, deserialize_with = "null_as_default")]
    #[schemars(with = "ClassId")]
    pub id: ClassId,

    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    #[schemars(with = "String")]
    pub display_name: String,

    #[serde(rename = "RoleID", default, deserialize_with = "null_as_default")]
    #[schemars(with = "RoleId")]
    pub role_ref: RoleId,

    #[serde(rename = "Weapons", default, deserialize_with = "null_as_default")]
    #[schemars(with = "Vec<Weapon>")]
    pub weapons: Vec<Weapon>,
}

impl Class {
    /// Look up a weapon by id. When a class declares the same id twice the
    /// later entry wins.
    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.iter().rev().find(|w| w.id.as_str() == id)
    }
}

/// Everything the roster needs for one guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Taxonomy {
    #[serde(rename = "Classes", default, deserialize_with = "null_as_default")]
    #[schemars(with = "BTreeMap<ClassLabel, Class>")]
    pub classes: BTreeMap<ClassLabel, Class>,

    #[serde(
        rename = "ClassOrder",
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    #[schemars(with = "Vec<ClassLabel>")]
    pub class_order: Vec<ClassLabel>,

    #[serde(
        rename = "WeaponOrder",
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "null_as_default"
    )]
    #[schemars(with = "BTreeMap<ClassLabel, Vec<WeaponId>>")]
    pub weapon_order: BTreeMap<ClassLabel, Vec<WeaponId>>,
}

/// Explicit `null` reads the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

const TAXONOMY_KEYS: &[&str] = &["Classes", "ClassOrder", "WeaponOrder"];
const CLASS_KEYS: &[&str] = &["ID", "Name", "RoleID", "Weapons"];
const WEAPON_KEYS: &[&str] = &["ID", "Name", "RoleID", "Specialisation"];

/// Rename keys that match a known field case-insensitively to the field's
/// canonical spelling. An exact match always wins over a folded one.
fn fold_keys(object: &mut Map<String, Value>, known: &[&str]) {
    for &canonical in known {
        if object.contains_key(canonical) {
            continue;
        }
        let folded = object
            .keys()
            .find(|key| key.eq_ignore_ascii_case(canonical))
            .cloned();
        if let Some(value) = folded.and_then(|key| object.remove(&key)) {
            object.insert(canonical.to_string(), value);
        }
    }
}

/// Canonicalize field keys throughout a raw document. Class labels and
/// `WeaponOrder` keys are data and keep their spelling.
fn fold_document_keys(document: &mut Value) {
    let Some(root) = document.as_object_mut() else {
        return;
    };
    fold_keys(root, TAXONOMY_KEYS);
    let Some(classes) = root.get_mut("Classes").and_then(Value::as_object_mut) else {
        return;
    };
    for class in classes.values_mut().filter_map(Value::as_object_mut) {
        fold_keys(class, CLASS_KEYS);
        if let Some(weapons) = class.get_mut("Weapons").and_then(Value::as_array_mut) {
            for weapon in weapons.iter_mut().filter_map(Value::as_object_mut) {
                fold_keys(weapon, WEAPON_KEYS);
            }
        }
    }
}

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
    Yaml,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
        }
    }

    /// Pick a format from a file extension.
    pub fn detect(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat { extension: ext }),
        }
    }
}

impl Taxonomy {
    /// Load and validate a taxonomy file, choosing the parser by extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = DocumentFormat::detect(path)?;
        let taxonomy = Self::parse_str(&content, format)?;
        debug!(
            path = %path.display(),
            classes = taxonomy.classes.len(),
            weapons = taxonomy.weapon_count(),
            "taxonomy loaded"
        );
        Ok(taxonomy)
    }

    /// Parse and validate a JSON document.
    pub fn parse_json(json: &str) -> Result<Self, ConfigError> {
        Self::parse_str(json, DocumentFormat::Json)
    }

    /// Parse a document in the given format, then validate it.
    ///
    /// Nothing is returned unless every class and weapon passes validation.
    pub fn parse_str(content: &str, format: DocumentFormat) -> Result<Self, ConfigError> {
        let parse_err = |message: String| ConfigError::Parse {
            format: format.as_str().to_string(),
            message,
        };
        let mut document: Value = match format {
            DocumentFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            DocumentFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
        };
        fold_document_keys(&mut document);
        let taxonomy: Taxonomy =
            serde_json::from_value(document).map_err(|e| parse_err(e.to_string()))?;
        validate(&taxonomy)?;
        Ok(taxonomy)
    }

    pub fn class(&self, label: &str) -> Option<&Class> {
        self.classes.get(label)
    }

    /// Configured weapon order for a class label, empty when none is set.
    pub fn weapon_order_for(&self, label: &str) -> &[WeaponId] {
        self.weapon_order
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn weapon_count(&self) -> usize {
        self.classes.values().map(|c| c.weapons.len()).sum()
    }
}

/// JSON Schema describing the configuration document.
pub fn taxonomy_schema() -> schemars::Schema {
    schemars::schema_for!(Taxonomy)
}
