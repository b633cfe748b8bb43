//! Reference data for the Infosiga SP cleaning pipeline.
//!
//! The municipality lookup joins incident rows to their IBGE code and
//! administrative region. Reference extracts are embedded at compile time so
//! the crate works offline; another registry vintage can be supplied through
//! [`LookupTable::from_readers`].
//!
//! ```rust,ignore
//! use infosiga_standards::LookupTable;
//!
//! let lookup = LookupTable::embedded()?;
//! let entry = lookup.find_by_name("SAO PAULO").unwrap();
//! assert_eq!(entry.ibge_code, 3_550_308);
//! ```

pub mod embedded;
mod error;
mod lookup;

pub use error::{Result, StandardsError};
pub use lookup::{LookupTable, MunicipalityEntry, SOURCE_STATE};
