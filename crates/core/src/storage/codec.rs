//! Conversion between typed entities and attribute maps.
//!
//! Entities are walked through their serde representation, so the only
//! per-type knowledge needed is the static field list in [`TableSchema`].
//! These are pure functions, testable without any store.

use std::marker::PhantomData;

use serde_json::{Map, Number, Value};

use super::{
    AttributeMap, AttributeValue, Entity, FieldDef, FieldKind, RepositoryError, Result,
    TableSchema,
};

/// Encodes and decodes one entity type against its table schema.
#[derive(Debug, Clone)]
pub struct AttributeCodec<T> {
    schema: TableSchema,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> AttributeCodec<T> {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            _entity: PhantomData,
        }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Converts an entity into an attribute map holding every declared field.
    pub fn encode(&self, entity: &T) -> Result<AttributeMap> {
        let value = serde_json::to_value(entity)
            .map_err(|e| RepositoryError::encoding(self.schema.table_name(), e.to_string()))?;

        let Value::Object(mut object) = value else {
            return Err(RepositoryError::encoding(
                self.schema.table_name(),
                "entity does not serialize as a record",
            ));
        };

        let mut item = AttributeMap::with_capacity(self.schema.fields().len());
        for field in self.schema.fields() {
            let value = object.remove(field.name).ok_or_else(|| {
                RepositoryError::encoding(field.name, "field missing from serialized entity")
            })?;
            item.insert(field.name.to_string(), encode_value(field, value)?);
        }

        Ok(item)
    }

    /// Rebuilds an entity from an attribute map.
    ///
    /// Keys not declared in the schema are ignored; declared fields that are
    /// missing from the map or hold `Null` take the entity's default value
    /// (`None` for optional fields).
    pub fn decode(&self, item: &AttributeMap) -> Result<T> {
        let mut object = Map::new();
        for field in self.schema.fields() {
            match item.get(field.name) {
                None | Some(AttributeValue::Null) => {}
                Some(attr) => {
                    object.insert(field.name.to_string(), decode_value(field, attr)?);
                }
            }
        }

        serde_json::from_value(Value::Object(object)).map_err(|e| {
            RepositoryError::decoding(
                RECORD_FIELD,
                format!("{}: {e}", self.schema.table_name()),
            )
        })
    }
}

/// Field name reported when the assembled record fails to deserialize as a
/// whole, rather than at one attribute.
pub const RECORD_FIELD: &str = "<record>";

fn encode_value(field: &FieldDef, value: Value) -> Result<AttributeValue> {
    match (field.kind, value) {
        (_, Value::Null) => Ok(AttributeValue::Null),
        (FieldKind::String, Value::String(s)) => Ok(AttributeValue::S(s)),
        (FieldKind::Number, Value::Number(n)) => Ok(AttributeValue::N(n.to_string())),
        (FieldKind::Bool, Value::Bool(b)) => Ok(AttributeValue::Bool(b)),
        (FieldKind::Binary, Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|byte| u8::try_from(byte).ok())
                    .ok_or_else(|| {
                        RepositoryError::encoding(field.name, "binary field holds a non-byte element")
                    })
            })
            .collect::<Result<Vec<u8>>>()
            .map(AttributeValue::B),
        (_, Value::Object(_)) => Err(RepositoryError::encoding(
            field.name,
            "nested objects have no scalar representation",
        )),
        (_, Value::Array(_)) => Err(RepositoryError::encoding(
            field.name,
            "sequences have no scalar representation",
        )),
        (kind, other) => Err(RepositoryError::encoding(
            field.name,
            format!("declared {:?} but value is a {}", kind, json_type_name(&other)),
        )),
    }
}

fn decode_value(field: &FieldDef, attr: &AttributeValue) -> Result<Value> {
    match (field.kind, attr) {
        (FieldKind::String, AttributeValue::S(s)) => Ok(Value::String(s.clone())),
        (FieldKind::Number, AttributeValue::N(n)) => parse_number(n)
            .map(Value::Number)
            .ok_or_else(|| RepositoryError::decoding(field.name, format!("'{n}' is not a number"))),
        (FieldKind::Binary, AttributeValue::B(bytes)) => Ok(Value::Array(
            bytes.iter().map(|b| Value::Number((*b).into())).collect(),
        )),
        (FieldKind::Bool, AttributeValue::Bool(b)) => Ok(Value::Bool(*b)),
        (kind, other) => Err(RepositoryError::decoding(
            field.name,
            format!(
                "expected {} for {:?} field, found {}",
                expected_tag(kind),
                kind,
                other.type_name()
            ),
        )),
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(i.into());
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(u.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn expected_tag(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::String => "S",
        FieldKind::Number => "N",
        FieldKind::Binary => "B",
        FieldKind::Bool => "BOOL",
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::model::{Comment, Post};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct Reading {
        id: String,
        value: f64,
        count: i64,
        raw: Vec<u8>,
        note: Option<String>,
        valid: bool,
    }

    impl Entity for Reading {
        const TABLE_NAME: &'static str = "Reading";
        const KEY_FIELD: &'static str = "id";
        const FIELDS: &'static [FieldDef] = &[
            FieldDef::new("id", FieldKind::String),
            FieldDef::new("value", FieldKind::Number),
            FieldDef::new("count", FieldKind::Number),
            FieldDef::new("raw", FieldKind::Binary),
            FieldDef::new("note", FieldKind::String),
            FieldDef::new("valid", FieldKind::Bool),
        ];

        fn key_value(&self) -> String {
            self.id.clone()
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct Nested {
        id: String,
        meta: Vec<String>,
    }

    impl Entity for Nested {
        const TABLE_NAME: &'static str = "Nested";
        const KEY_FIELD: &'static str = "id";
        const FIELDS: &'static [FieldDef] = &[
            FieldDef::new("id", FieldKind::String),
            FieldDef::new("meta", FieldKind::String),
        ];

        fn key_value(&self) -> String {
            self.id.clone()
        }
    }

    /// Requires `level`, so decoding without it fails as a whole record.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Strict {
        #[serde(default)]
        id: String,
        level: u8,
    }

    impl Entity for Strict {
        const TABLE_NAME: &'static str = "Strict";
        const KEY_FIELD: &'static str = "id";
        const FIELDS: &'static [FieldDef] = &[
            FieldDef::new("id", FieldKind::String),
            FieldDef::new("level", FieldKind::Number),
        ];

        fn key_value(&self) -> String {
            self.id.clone()
        }
    }

    fn codec<T: Entity>() -> AttributeCodec<T> {
        AttributeCodec::new(TableSchema::of::<T>().unwrap())
    }

    fn sample_reading() -> Reading {
        Reading {
            id: "r1".to_string(),
            value: 21.5,
            count: -3,
            raw: vec![0, 127, 255],
            note: Some("calibrated".to_string()),
            valid: true,
        }
    }

    #[test]
    fn test_comment_encodes_to_flat_map() {
        let comment = Comment {
            id: "c1".to_string(),
            post_id: "p1".to_string(),
            text: "hi".to_string(),
        };

        let item = codec::<Comment>().encode(&comment).unwrap();

        assert_eq!(item.len(), 3);
        assert_eq!(item["id"], AttributeValue::from("c1"));
        assert_eq!(item["postId"], AttributeValue::from("p1"));
        assert_eq!(item["text"], AttributeValue::from("hi"));
        assert_eq!(codec::<Comment>().decode(&item).unwrap(), comment);
    }

    #[test]
    fn test_round_trip_all_kinds() {
        let codec = codec::<Reading>();
        let reading = sample_reading();

        let item = codec.encode(&reading).unwrap();

        assert_eq!(item["value"], AttributeValue::N("21.5".to_string()));
        assert_eq!(item["count"], AttributeValue::N("-3".to_string()));
        assert_eq!(item["raw"], AttributeValue::B(vec![0, 127, 255]));
        assert_eq!(item["valid"], AttributeValue::Bool(true));
        assert_eq!(codec.decode(&item).unwrap(), reading);
    }

    #[test]
    fn test_none_encodes_as_null_and_back() {
        let codec = codec::<Reading>();
        let reading = Reading {
            note: None,
            ..sample_reading()
        };

        let item = codec.encode(&reading).unwrap();

        assert!(item["note"].is_null());
        assert_eq!(codec.decode(&item).unwrap(), reading);
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let codec = codec::<Reading>();
        let mut item = codec.encode(&sample_reading()).unwrap();
        item.insert("addedLater".to_string(), AttributeValue::from("whatever"));

        assert_eq!(codec.decode(&item).unwrap(), sample_reading());
    }

    #[test]
    fn test_decode_leaves_absent_fields_at_default() {
        let codec = codec::<Reading>();
        let item = AttributeMap::from([("id".to_string(), AttributeValue::from("r2"))]);

        let reading = codec.decode(&item).unwrap();

        assert_eq!(
            reading,
            Reading {
                id: "r2".to_string(),
                ..Reading::default()
            }
        );
    }

    #[test]
    fn test_decode_rejects_incompatible_tag() {
        let codec = codec::<Reading>();
        let mut item = codec.encode(&sample_reading()).unwrap();
        item.insert("count".to_string(), AttributeValue::from("three"));

        let err = codec.decode(&item).unwrap_err();

        assert!(matches!(err, RepositoryError::Decoding { ref field, .. } if field == "count"));
    }

    #[test]
    fn test_decode_rejects_unparsable_number() {
        let codec = codec::<Reading>();
        let mut item = codec.encode(&sample_reading()).unwrap();
        item.insert("value".to_string(), AttributeValue::N("1.2.3".to_string()));

        let err = codec.decode(&item).unwrap_err();

        assert!(matches!(err, RepositoryError::Decoding { ref field, .. } if field == "value"));
    }

    #[test]
    fn test_encode_rejects_sequences_on_scalar_fields() {
        let nested = Nested {
            id: "n1".to_string(),
            meta: vec!["a".to_string()],
        };

        let err = codec::<Nested>().encode(&nested).unwrap_err();

        assert!(matches!(err, RepositoryError::Encoding { ref field, .. } if field == "meta"));
    }

    #[test]
    fn test_null_decodes_to_default_for_every_kind() {
        let codec = codec::<Reading>();
        let item = AttributeMap::from([
            ("id".to_string(), AttributeValue::from("r3")),
            ("value".to_string(), AttributeValue::Null),
            ("count".to_string(), AttributeValue::Null),
            ("raw".to_string(), AttributeValue::Null),
            ("note".to_string(), AttributeValue::Null),
            ("valid".to_string(), AttributeValue::Null),
        ]);

        let reading = codec.decode(&item).unwrap();

        assert_eq!(
            reading,
            Reading {
                id: "r3".to_string(),
                ..Reading::default()
            }
        );
    }

    #[test]
    fn test_null_on_entity_fields_falls_back_to_default() {
        let comment = codec::<Comment>()
            .decode(&AttributeMap::from([
                ("id".to_string(), AttributeValue::from("c1")),
                ("postId".to_string(), AttributeValue::from("p1")),
                ("text".to_string(), AttributeValue::Null),
            ]))
            .unwrap();
        assert_eq!(comment.text, "");

        let post = codec::<Post>()
            .decode(&AttributeMap::from([
                ("id".to_string(), AttributeValue::from("p1")),
                ("createdAt".to_string(), AttributeValue::Null),
            ]))
            .unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.created_at, 0);
    }

    #[test]
    fn test_non_finite_numbers_store_as_null() {
        let codec = codec::<Reading>();
        let reading = Reading {
            value: f64::NAN,
            ..sample_reading()
        };

        let item = codec.encode(&reading).unwrap();
        assert!(item["value"].is_null());

        let decoded = codec.decode(&item).unwrap();
        assert_eq!(decoded.value, 0.0);
        assert_eq!(decoded.count, reading.count);
    }

    #[test]
    fn test_record_level_failure_is_marked() {
        let codec = codec::<Strict>();
        let item = AttributeMap::from([("id".to_string(), AttributeValue::from("s1"))]);

        let err = codec.decode(&item).unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Decoding { ref field, ref reason }
                if field == RECORD_FIELD && reason.starts_with("Strict:")
        ));
    }
}
