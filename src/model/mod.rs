//! Record model
//!
//! Defines record identity, timestamps and field sets, and the conversion
//! to and from the keyed representation stored on disk:
//!
//! ```text
//! {
//!   "__class__": "User",
//!   "id": "4d8e6bd5-...",
//!   "created_at": "2017-09-28T21:05:54.119427",
//!   "updated_at": "2017-09-28T21:05:54.119572",
//!   "email": "airbnb@mail.com"
//! }
//! ```

mod attributes;
mod errors;
mod record;
pub mod timestamp;

pub use attributes::{
    Amenity, Attributes, BaseModel, City, FieldValue, Place, Review, State, User,
};
pub use errors::{ModelError, ModelResult};
pub use record::{composite_key, Record, CLASS_FIELD, READ_ONLY_FIELDS};
