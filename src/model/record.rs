//! Records: identity, timestamps and attributes
//!
//! A record is either created fresh (new id, current timestamps, registered
//! in the storage table) or reconstructed from its keyed representation
//! (the flat JSON object the storage file holds per key).
//!
//! `reconstruct(to_representation(r))` yields a record equal to `r`.

use std::fmt;

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::attributes::Attributes;
use super::errors::{ModelError, ModelResult};
use super::timestamp;
use crate::registry::ClassName;
use crate::storage::{FileStorage, StorageResult};

/// Field naming the class in the keyed representation.
pub const CLASS_FIELD: &str = "__class__";

/// Fields managed by the record itself; never assigned by callers.
pub const READ_ONLY_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_FIELD];

/// Builds the storage key `<ClassName>.<id>`.
pub fn composite_key(class: ClassName, id: &str) -> String {
    format!("{}.{}", class.as_str(), id)
}

/// A typed, identified, timestamped unit of persisted data.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    attributes: Attributes,
    /// Attributes the class does not declare
    extra: Map<String, Value>,
}

impl Record {
    /// Creates a fresh record of `class` and registers it in `storage`.
    ///
    /// The id is a v4 UUID; a collision with an existing key is re-rolled.
    pub fn create(class: ClassName, storage: &mut FileStorage) -> Record {
        let mut id = Uuid::new_v4().to_string();
        while storage.contains(&composite_key(class, &id)) {
            id = Uuid::new_v4().to_string();
        }

        let now = timestamp::now();
        let record = Record {
            id,
            created_at: now,
            updated_at: now,
            attributes: Attributes::empty(class),
            extra: Map::new(),
        };
        storage.register(record.clone());
        record
    }

    /// Rebuilds a record from its keyed representation.
    ///
    /// `id`, `created_at` and `updated_at` are required; `__class__` is
    /// ignored (the class is chosen by the caller). Declared attributes go
    /// through their coercion, anything else is kept verbatim. An
    /// `updated_at` earlier than `created_at` is rejected. The record is not
    /// registered anywhere.
    pub fn reconstruct(class: ClassName, fields: &Map<String, Value>) -> ModelResult<Record> {
        let id = match fields.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(_) => return Err(ModelError::invalid("id", "expected text")),
            None => return Err(ModelError::MissingField("id".into())),
        };
        let created_at = timestamp_field(fields, "created_at")?;
        let updated_at = timestamp_field(fields, "updated_at")?;
        if updated_at < created_at {
            return Err(ModelError::invalid("updated_at", "earlier than created_at"));
        }

        let mut attributes = Attributes::empty(class);
        let mut extra = Map::new();
        for (name, value) in fields {
            if READ_ONLY_FIELDS.contains(&name.as_str()) {
                continue;
            }
            match class.coercion_for(name) {
                Some(coercion) => {
                    let coerced = coercion
                        .apply(value)
                        .map_err(|e| ModelError::invalid(name, e.to_string()))?;
                    if !attributes.set(name, &coerced) {
                        return Err(ModelError::invalid(name, "type mismatch"));
                    }
                }
                None => {
                    extra.insert(name.clone(), value.clone());
                }
            }
        }

        Ok(Record {
            id,
            created_at,
            updated_at,
            attributes,
            extra,
        })
    }

    /// Every field plus `__class__`, timestamps rendered as text.
    pub fn to_representation(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        for (name, value) in self.attributes.assigned() {
            map.insert(name.to_string(), value);
        }
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert(
            "created_at".into(),
            Value::String(timestamp::format(&self.created_at)),
        );
        map.insert(
            "updated_at".into(),
            Value::String(timestamp::format(&self.updated_at)),
        );
        map.insert(
            CLASS_FIELD.into(),
            Value::String(self.class_name().as_str().into()),
        );
        map
    }

    /// Refreshes `updated_at`, writes this record into `storage` and
    /// persists the whole table.
    pub fn save(&mut self, storage: &mut FileStorage) -> StorageResult<()> {
        self.touch();
        storage.register(self.clone());
        storage.persist()
    }

    /// Sets `updated_at` to now, never earlier than `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = timestamp::now().max(self.created_at);
    }

    /// Assigns an attribute.
    ///
    /// Declared attributes are coerced to their type; undeclared ones are
    /// stored as given. Identity and timestamps are read-only.
    pub fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
        if READ_ONLY_FIELDS.contains(&name) {
            return Err(ModelError::ReadOnlyField(name.to_string()));
        }
        match self.class_name().coercion_for(name) {
            Some(coercion) => {
                let coerced = coercion
                    .apply(&value)
                    .map_err(|e| ModelError::invalid(name, e.to_string()))?;
                if self.attributes.set(name, &coerced) {
                    Ok(())
                } else {
                    Err(ModelError::invalid(name, "type mismatch"))
                }
            }
            None => {
                self.extra.insert(name.to_string(), value);
                Ok(())
            }
        }
    }

    /// Current value of any field, as it would be persisted.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "created_at" => Some(Value::String(timestamp::format(&self.created_at))),
            "updated_at" => Some(Value::String(timestamp::format(&self.updated_at))),
            _ => self
                .attributes
                .get(name)
                .or_else(|| self.extra.get(name).cloned()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class_name(&self) -> ClassName {
        self.attributes.class_name()
    }

    /// Storage key `<ClassName>.<id>`
    pub fn key(&self) -> String {
        composite_key(self.class_name(), &self.id)
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Attributes not declared by the class
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

fn timestamp_field(fields: &Map<String, Value>, name: &str) -> ModelResult<NaiveDateTime> {
    match fields.get(name) {
        Some(Value::String(text)) => timestamp::parse(name, text),
        Some(other) => Err(ModelError::MalformedTimestamp {
            field: name.to_string(),
            value: other.to_string(),
        }),
        None => Err(ModelError::MissingField(name.to_string())),
    }
}

/// `[<ClassName>] (<id>) {<fields>}`; display only, not parseable.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({}) {{", self.class_name(), self.id)?;
        let representation = self.to_representation();
        let fields = representation
            .iter()
            .filter(|(name, _)| name.as_str() != CLASS_FIELD);
        for (i, (name, value)) in fields.enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", Value::String(name.clone()), value)?;
        }
        f.write_str("}")
    }
}
