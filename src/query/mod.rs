//! Query building for foreign records.
//!
//! - **Select**: `SelectQuery`, the SeaQuery-backed query scope
//! - **Scope**: `QueryScope`, the capability relations filter through
//! - **Dialect**: `SqlDialect`, quoting and placeholder style used when rendering

pub mod dialect;
#[doc(inline)]
pub use dialect::SqlDialect;

pub mod scope;
#[doc(inline)]
pub use scope::QueryScope;

pub mod select;
#[doc(inline)]
pub use select::SelectQuery;
