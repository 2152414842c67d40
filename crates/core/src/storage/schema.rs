use std::collections::HashSet;

use serde::{de::DeserializeOwned, Serialize};

use super::{RepositoryError, Result};

/// The scalar kind a declared field is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Stored as decimal text. Non-finite floats (NaN, infinities) have no
    /// representation: they serialize as `Null` and decode to the default.
    Number,
    Binary,
    Bool,
}

/// A statically declared entity field (name + kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A record type persisted in its own table.
///
/// `FIELDS` lists the stored fields in their stable column order, using the
/// names the entity serializes under. Fields absent from a stored item take
/// the serde default, so implementors should carry `#[serde(default)]`.
pub trait Entity: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    const TABLE_NAME: &'static str;
    const KEY_FIELD: &'static str;
    const FIELDS: &'static [FieldDef];

    /// The identity of this entity (value of the key field).
    fn key_value(&self) -> String;
}

/// Table identity derived once from an entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table_name: String,
    key_field: &'static str,
    fields: Vec<FieldDef>,
}

impl TableSchema {
    /// Derives and validates the schema of `T`.
    pub fn of<T: Entity>() -> Result<Self> {
        Self::new(T::TABLE_NAME, T::KEY_FIELD, T::FIELDS)
    }

    /// Builds a schema from its parts, enforcing that the column list is
    /// non-empty, duplicate-free and contains the key field.
    pub fn new(
        table_name: impl Into<String>,
        key_field: &'static str,
        fields: &[FieldDef],
    ) -> Result<Self> {
        let table_name = table_name.into();

        if table_name.is_empty() {
            return Err(RepositoryError::Schema("table name is empty".to_string()));
        }
        if fields.is_empty() {
            return Err(RepositoryError::Schema(format!(
                "table '{table_name}' declares no fields"
            )));
        }

        let mut seen = HashSet::new();
        for field in fields {
            if !seen.insert(field.name) {
                return Err(RepositoryError::Schema(format!(
                    "table '{table_name}' declares field '{}' twice",
                    field.name
                )));
            }
        }

        if !seen.contains(key_field) {
            return Err(RepositoryError::Schema(format!(
                "key field '{key_field}' is not a column of table '{table_name}'"
            )));
        }

        Ok(Self {
            table_name,
            key_field,
            fields: fields.to_vec(),
        })
    }

    /// Returns a copy of this schema bound to a different physical table name.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn key_field(&self) -> &'static str {
        self.key_field
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}
