//! Schema-driven decoding of multi-valued query parameters into typed records.
//!
//! ```ignore
//! use gauss_query::{ParamMap, QueryRecord, from_params};
//!
//! #[derive(Debug, QueryRecord)]
//! struct Search {
//!     #[query(name = "q", required)]
//!     query: String,
//!     #[query(default = "20")]
//!     limit: u32,
//!     tags: Vec<String>,
//! }
//!
//! let params: ParamMap = [("q", "rust"), ("tags[]", "a"), ("tags[]", "b")]
//!     .into_iter()
//!     .collect();
//! let search: Search = from_params(&params)?;
//! ```
//!
//! Key convention: `name` for scalars, `name[<index>]`, `name[]` or a
//! repeated bare `name` for sequence elements, `name[field]` for nested
//! records. Nesting composes, e.g. `orders[0][items][]`.

extern crate self as gauss_query;

pub mod coerce;
mod collection;
pub mod config;
mod decoder;
pub mod error;
mod field;
mod hydrate;
pub mod params;
pub mod schema;
pub mod value;

pub use gauss_query_derive::QueryRecord;

pub use config::DecoderConfig;
pub use decoder::{Decoder, from_params};
pub use error::DecodeError;
pub use field::{QueryField, QueryRecord};
pub use params::ParamMap;
