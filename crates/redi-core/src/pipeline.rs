//! Seed pipeline: load every source, reconcile, assemble.
//!
//! A source that fails to load is skipped with a [`SourceWarning`] and
//! contributes no rows. Nothing else about the run changes; the remaining
//! sources and entity kinds are processed as usual.

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use redi_ingest::RowSource;
use redi_model::{Row, UpsertBatch};
use redi_transform::normalization::datetime::{
    DAY_ABBREVIATED_MONTH_YEAR, DAY_MONTH_YEAR_NUMERIC,
};

use crate::batch::{ReconciledData, assemble_batches};
use crate::entities::{
    OrgUnitColumns, alert_rule_store, course_source, faculty_member_source, org_unit_source,
    staff_sources,
};
use crate::reconcile::{apply_source, reconcile};
use crate::relationships::{EnrichField, derive_relationships};
use crate::store::EntityStore;

/// Census columns naming a ward and the admitting unit of a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusColumns {
    pub ward: String,
    pub unit: String,
}

impl Default for CensusColumns {
    fn default() -> Self {
        Self {
            ward: "Ward".to_string(),
            unit: "AdmUnit".to_string(),
        }
    }
}

/// Transfer-extract columns describing an admitting unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferColumns {
    pub unit: String,
    pub division: String,
    pub subdivision: String,
}

impl Default for TransferColumns {
    fn default() -> Self {
        Self {
            unit: "AdmUnit".to_string(),
            division: "Division".to_string(),
            subdivision: "SubDivision".to_string(),
        }
    }
}

/// Extract layout details that vary between deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSettings {
    pub org_unit_columns: OrgUnitColumns,
    pub census_columns: CensusColumns,
    pub transfer_columns: TransferColumns,
    pub events_date_format: String,
    pub faculty_date_format: String,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            org_unit_columns: OrgUnitColumns::default(),
            census_columns: CensusColumns::default(),
            transfer_columns: TransferColumns::default(),
            events_date_format: DAY_ABBREVIATED_MONTH_YEAR.to_string(),
            faculty_date_format: DAY_MONTH_YEAR_NUMERIC.to_string(),
        }
    }
}

/// One row source per extract.
pub struct SeedSources {
    pub org_units: Box<dyn RowSource>,
    pub census: Box<dyn RowSource>,
    pub transfers: Box<dyn RowSource>,
    pub als_certification: Box<dyn RowSource>,
    pub bls_certification: Box<dyn RowSource>,
    pub participants: Box<dyn RowSource>,
    pub faculty_list: Box<dyn RowSource>,
    pub events: Box<dyn RowSource>,
}

/// A source that was skipped because it could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceWarning {
    pub source: String,
    pub message: String,
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLoad {
    pub source: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub loaded: Vec<SourceLoad>,
    pub warnings: Vec<SourceWarning>,
}

impl PipelineReport {
    /// True when at least one source was skipped.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SeedOutput {
    pub batches: Vec<UpsertBatch>,
    pub report: PipelineReport,
}

fn load_rows(source: &dyn RowSource, report: &mut PipelineReport) -> Vec<Row> {
    match source.load() {
        Ok(rows) => {
            debug!(source = source.name(), rows = rows.len(), "source loaded");
            report.loaded.push(SourceLoad {
                source: source.name().to_string(),
                rows: rows.len(),
            });
            rows
        }
        Err(err) => {
            warn!(source = source.name(), error = %err, "skipping source");
            report.warnings.push(SourceWarning {
                source: source.name().to_string(),
                message: err.to_string(),
            });
            Vec::new()
        }
    }
}

/// Reconcile every source and assemble the batches.
pub fn run_pipeline(sources: &SeedSources, settings: &SeedSettings) -> SeedOutput {
    let start = Instant::now();
    let mut report = PipelineReport::default();

    // =========================================================================
    // Stage 1: Load
    // =========================================================================
    let rows = info_span!("load").in_scope(|| LoadedRows {
        org_units: load_rows(sources.org_units.as_ref(), &mut report),
        census: load_rows(sources.census.as_ref(), &mut report),
        transfers: load_rows(sources.transfers.as_ref(), &mut report),
        als_certification: load_rows(sources.als_certification.as_ref(), &mut report),
        bls_certification: load_rows(sources.bls_certification.as_ref(), &mut report),
        participants: load_rows(sources.participants.as_ref(), &mut report),
        faculty_list: load_rows(sources.faculty_list.as_ref(), &mut report),
        events: load_rows(sources.events.as_ref(), &mut report),
    });

    // =========================================================================
    // Stage 2: Reconcile
    // =========================================================================
    let data = info_span!("reconcile").in_scope(|| reconcile_all(&rows, settings));
    info!(
        org_units = data.org_units.len(),
        wards = data.wards_and_units.left_codes().count(),
        admitting_units = data.wards_and_units.right_codes().count(),
        ward_unit_pairs = data.wards_and_units.pair_count(),
        staff = data.staff.len(),
        courses = data.courses.len(),
        faculty_members = data.faculty_members.len(),
        "reconcile complete"
    );

    // =========================================================================
    // Stage 3: Assemble
    // =========================================================================
    let batches = info_span!("assemble").in_scope(|| assemble_batches(&data));
    info!(
        batches = batches.len(),
        rows = batches.iter().map(UpsertBatch::len).sum::<usize>(),
        skipped_sources = report.warnings.len(),
        duration_ms = start.elapsed().as_millis(),
        "seed pipeline complete"
    );

    SeedOutput { batches, report }
}

struct LoadedRows {
    org_units: Vec<Row>,
    census: Vec<Row>,
    transfers: Vec<Row>,
    als_certification: Vec<Row>,
    bls_certification: Vec<Row>,
    participants: Vec<Row>,
    faculty_list: Vec<Row>,
    events: Vec<Row>,
}

fn reconcile_all(rows: &LoadedRows, settings: &SeedSettings) -> ReconciledData {
    let org_units = apply_source(
        EntityStore::new(),
        &org_unit_source(&settings.org_unit_columns),
        &rows.org_units,
    );

    let census = &settings.census_columns;
    let mut wards_and_units = derive_relationships(&rows.census, &census.ward, &census.unit);
    let transfers = &settings.transfer_columns;
    wards_and_units.enrich(
        &rows.transfers,
        &transfers.unit,
        &[
            EnrichField::new("division", &transfers.division),
            EnrichField::new("subdivision", &transfers.subdivision),
        ],
    );

    let staff_specs = staff_sources();
    let staff_rows: [&[Row]; 4] = [
        &rows.als_certification,
        &rows.bls_certification,
        &rows.participants,
        &rows.faculty_list,
    ];
    let staff = reconcile(staff_specs.iter().zip(staff_rows));

    let courses = apply_source(
        EntityStore::new(),
        &course_source(&settings.events_date_format),
        &rows.events,
    );
    let faculty_members = apply_source(
        EntityStore::new(),
        &faculty_member_source(&settings.faculty_date_format),
        &rows.faculty_list,
    );

    ReconciledData {
        org_units,
        wards_and_units,
        staff,
        courses,
        faculty_members,
        alert_rules: alert_rule_store(),
    }
}
