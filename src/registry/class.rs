//! Record class names

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::coercion::Coercion;
use crate::model::{Attributes, Record};
use crate::storage::FileStorage;

/// Returned when a class name is not part of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown class: {0}")]
pub struct UnknownClass(pub String);

/// Every class a record can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassName {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl ClassName {
    /// All registered classes, in registration order.
    pub const ALL: [ClassName; 7] = [
        ClassName::BaseModel,
        ClassName::User,
        ClassName::State,
        ClassName::City,
        ClassName::Amenity,
        ClassName::Place,
        ClassName::Review,
    ];

    /// Returns the class name as it appears in keys and in `__class__`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassName::BaseModel => "BaseModel",
            ClassName::User => "User",
            ClassName::State => "State",
            ClassName::City => "City",
            ClassName::Amenity => "Amenity",
            ClassName::Place => "Place",
            ClassName::Review => "Review",
        }
    }

    /// Resolves a class name. Matching is exact and case-sensitive.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.as_str() == name)
    }

    /// Declared attributes of this class and the coercion each accepts.
    pub fn coercions(&self) -> &'static [(&'static str, Coercion)] {
        Attributes::declared(*self)
    }

    /// Returns the declared coercion for `attribute`, if any.
    pub fn coercion_for(&self, attribute: &str) -> Option<Coercion> {
        self.coercions()
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, coercion)| *coercion)
    }

    /// Builds a fresh record of this class and registers it in `storage`.
    pub fn construct(&self, storage: &mut FileStorage) -> Record {
        Record::create(*self, storage)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassName {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| UnknownClass(s.to_string()))
    }
}
