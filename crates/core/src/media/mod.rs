//! Media descriptors handed to the searcher by the identity resolver.
//!
//! The descriptor is read-only to the search core: it only derives season and
//! episode lists and a plain snapshot for event payloads from it.

mod types;

pub use types::*;
