//! Fixed console diagnostics
//!
//! Validation is ordered: class name missing, class doesn't exist, instance
//! id missing, no instance found, attribute name missing, value missing. The
//! first failing check is the only one reported.

use std::fmt;

/// A user-facing diagnostic. Always non-fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    ClassNameMissing,
    ClassDoesNotExist,
    InstanceIdMissing,
    NoInstanceFound,
    AttributeNameMissing,
    ValueMissing,
    AttributeReadOnly,
    /// Declared coercion rejected the value for this attribute
    InvalidValue(String),
    /// Bulk update argument is not a JSON object
    MalformedDictionary,
    UnknownSyntax(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ClassNameMissing => f.write_str("** class name missing **"),
            Diagnostic::ClassDoesNotExist => f.write_str("** class doesn't exist **"),
            Diagnostic::InstanceIdMissing => f.write_str("** instance id missing **"),
            Diagnostic::NoInstanceFound => f.write_str("** no instance found **"),
            Diagnostic::AttributeNameMissing => f.write_str("** attribute name missing **"),
            Diagnostic::ValueMissing => f.write_str("** value missing **"),
            Diagnostic::AttributeReadOnly => f.write_str("** attribute can't be updated **"),
            Diagnostic::InvalidValue(attr) => write!(f, "** invalid value for {} **", attr),
            Diagnostic::MalformedDictionary => f.write_str("** invalid dictionary **"),
            Diagnostic::UnknownSyntax(line) => write!(f, "*** Unknown syntax: {}", line),
        }
    }
}
