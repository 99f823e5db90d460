//! Declared attributes per record class
//!
//! Each class gets a struct with one optional field per declared attribute.
//! A field is `None` until something assigns it, so a fresh record persists
//! only its identity and timestamps.

use serde_json::Value;

use crate::registry::{ClassName, Coercion};

/// Conversion between a declared field type and its JSON form.
pub trait FieldValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
    fn to_value(&self) -> Value;
}

impl FieldValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for Vec<String> {
    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect()
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().cloned().map(Value::String).collect())
    }
}

macro_rules! record_classes {
    ($(
        $(#[$meta:meta])*
        $class:ident { $($field:ident : $ty:ty => $coercion:ident),* $(,)? }
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct $class {
                $(pub $field: Option<$ty>,)*
            }

            impl $class {
                /// Declared attributes and the coercion each accepts.
                pub const FIELDS: &'static [(&'static str, Coercion)] =
                    &[$((stringify!($field), Coercion::$coercion),)*];

                fn get(&self, name: &str) -> Option<Value> {
                    match name {
                        $(stringify!($field) => self.$field.as_ref().map(FieldValue::to_value),)*
                        _ => None,
                    }
                }

                fn set(&mut self, name: &str, value: &Value) -> bool {
                    match name {
                        $(stringify!($field) => match <$ty as FieldValue>::from_value(value) {
                            Some(v) => {
                                self.$field = Some(v);
                                true
                            }
                            None => false,
                        },)*
                        _ => {
                            let _ = value;
                            false
                        }
                    }
                }

                #[allow(unused_mut)]
                fn assigned(&self) -> Vec<(&'static str, Value)> {
                    let mut out = Vec::new();
                    $(
                        if let Some(v) = &self.$field {
                            out.push((stringify!($field), v.to_value()));
                        }
                    )*
                    out
                }
            }
        )*

        /// Declared attributes of a record, one variant per class.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Attributes {
            $($class($class),)*
        }

        impl Attributes {
            /// Empty attribute set for `class`.
            pub fn empty(class: ClassName) -> Self {
                match class {
                    $(ClassName::$class => Attributes::$class($class::default()),)*
                }
            }

            pub fn class_name(&self) -> ClassName {
                match self {
                    $(Attributes::$class(_) => ClassName::$class,)*
                }
            }

            /// Declared attribute table for `class`.
            pub fn declared(class: ClassName) -> &'static [(&'static str, Coercion)] {
                match class {
                    $(ClassName::$class => $class::FIELDS,)*
                }
            }

            /// Value of a declared attribute, `None` if unset or undeclared.
            pub fn get(&self, name: &str) -> Option<Value> {
                match self {
                    $(Attributes::$class(a) => a.get(name),)*
                }
            }

            /// Stores an already-coerced value. Returns `false` if `name` is
            /// not declared or `value` has the wrong JSON type.
            pub fn set(&mut self, name: &str, value: &Value) -> bool {
                match self {
                    $(Attributes::$class(a) => a.set(name, value),)*
                }
            }

            /// Every assigned attribute with its JSON value.
            pub fn assigned(&self) -> Vec<(&'static str, Value)> {
                match self {
                    $(Attributes::$class(a) => a.assigned(),)*
                }
            }
        }
    };
}

record_classes! {
    /// The base class: identity and timestamps only.
    BaseModel {}

    User {
        email: String => Text,
        password: String => Text,
        first_name: String => Text,
        last_name: String => Text,
    }

    State {
        name: String => Text,
    }

    City {
        state_id: String => Text,
        name: String => Text,
    }

    Amenity {
        name: String => Text,
    }

    /// A rentable place. Counts are integers, coordinates floats.
    Place {
        city_id: String => Text,
        user_id: String => Text,
        name: String => Text,
        description: String => Text,
        number_rooms: i64 => Integer,
        number_bathrooms: i64 => Integer,
        max_guest: i64 => Integer,
        price_by_night: i64 => Integer,
        latitude: f64 => Float,
        longitude: f64 => Float,
        amenity_ids: Vec<String> => TextList,
    }

    Review {
        place_id: String => Text,
        user_id: String => Text,
        text: String => Text,
    }
}
