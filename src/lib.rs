//! hbnb - a file-backed object store with an interactive command console
//!
//! Records of a closed set of classes live in a single in-memory table keyed
//! by `<ClassName>.<id>` and are persisted as one JSON object.

pub mod cli;
pub mod console;
pub mod model;
pub mod observability;
pub mod registry;
pub mod storage;
