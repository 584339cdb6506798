//! Mapping of dataset descriptors to Opal dictionary rows.
//!
//! The mapping runs in four steps over an immutable descriptor:
//!
//! 1. **Entity type**: derived once from the encounter class, if any
//! 2. **Value types**: resolved per feature, `error` on failure
//! 3. **Variables**: one row per feature and outcome
//! 4. **Categories**: one row per concept of each nominal feature
//!
//! Per-record failures are collected in the [`MappingReport`]; the mapping
//! itself never fails.

pub mod categories;
pub mod entity_type;
pub mod report;
pub mod value_type;
pub mod variables;

pub use categories::extract_categories;
pub use entity_type::resolve_entity_type;
pub use report::{
    ENTITY_TYPE_FEATURE, IssueLog, MapOptions, MappingReport, map_dataset, resolve_or_sentinel,
};
pub use value_type::resolve_value_type;
pub use variables::extract_variables;
