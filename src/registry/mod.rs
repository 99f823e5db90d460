//! Class registry
//!
//! A closed set of record classes. Each class maps to a constructor
//! (`ClassName::construct`) and to a table of attribute name -> coercion used
//! to validate assignments before they reach a record.
//!
//! Class names are resolved here before storage is touched; an unknown name
//! is always an `UnknownClass` error, never a silent fallback.

mod class;
mod coercion;

pub use class::{ClassName, UnknownClass};
pub use coercion::{Coercion, CoercionError};
