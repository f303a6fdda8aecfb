//! REdI seed reconciliation engine.
//!
//! Sources are folded into per-entity stores under declared merge rules,
//! relationship sets are derived from the census, and the finished stores
//! are assembled into upsert batches.

pub mod batch;
pub mod entities;
pub mod pipeline;
pub mod reconcile;
pub mod relationships;
pub mod store;

pub use batch::{BatchLayout, ReconciledData, assemble_batches, ward_unit_map_batch};
pub use pipeline::{
    CensusColumns, PipelineReport, SeedOutput, SeedSettings, SeedSources, SourceLoad,
    SourceWarning, TransferColumns, run_pipeline,
};
pub use reconcile::{FieldSpec, KeySpec, SourceSpec, apply_source, reconcile};
pub use relationships::{EnrichField, Relationships, derive_relationships};
pub use store::EntityStore;
