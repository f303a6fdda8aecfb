//! Staff, keyed by payroll number, merged from four extracts.
//!
//! | Source | Key column | Rule |
//! |---|---|---|
//! | ALS certification | `Person Person No.` | overwrite |
//! | BLS certification | `Person Person No.` | fill-if-absent |
//! | Participants | `QHPayroll` | overwrite-if-present |
//! | Faculty list | `Payroll` | overwrite-if-present |
//!
//! Discipline/stream from the certification extracts is derived from the job
//! family label and only written when that label is present.

use redi_model::{EntityKind, MergeRule};
use redi_transform::{JOB_FAMILY, STREAM, given_name_from_full, surname_from_full};

use crate::reconcile::{FieldSpec, SourceSpec};

pub const ALS_CERTIFICATION: &str = "als_certification";
pub const BLS_CERTIFICATION: &str = "bls_certification";
pub const PARTICIPANTS: &str = "participants";
pub const FACULTY_LIST: &str = "faculty_list";

const CERT_PAYROLL: &str = "Person Person No.";
const CERT_FULL_NAME: &str = "Person Full Name";
const CERT_JOB_FAMILY: &str = "Job Family Name";
const CERT_ORG_UNIT: &str = "Person Organisation Number";
const CERT_MANAGER: &str = "Manager Full Name";

/// ALS, BLS, participants and faculty list, in fold order.
pub fn staff_sources() -> Vec<SourceSpec> {
    vec![
        als_certification(),
        bls_certification(),
        participants(),
        faculty_list(),
    ]
}

fn als_certification() -> SourceSpec {
    let rule = MergeRule::Overwrite;
    SourceSpec::keyed_by(ALS_CERTIFICATION, EntityKind::Staff, CERT_PAYROLL)
        .field(FieldSpec::new("given_name", CERT_FULL_NAME, rule, |row| {
            given_name_from_full(row.get(CERT_FULL_NAME))
        }))
        .field(FieldSpec::new("surname", CERT_FULL_NAME, rule, |row| {
            surname_from_full(row.get(CERT_FULL_NAME))
        }))
        .field(FieldSpec::code("job_family_code", CERT_JOB_FAMILY, &JOB_FAMILY, rule))
        .field(
            FieldSpec::code("discipline_stream_code", CERT_JOB_FAMILY, &STREAM, rule)
                .labelled_only(),
        )
        .field(FieldSpec::integer("org_unit_id", CERT_ORG_UNIT, rule))
        .field(FieldSpec::text("manager_name", CERT_MANAGER, rule))
}

fn bls_certification() -> SourceSpec {
    let rule = MergeRule::FillIfAbsent;
    SourceSpec::keyed_by(BLS_CERTIFICATION, EntityKind::Staff, CERT_PAYROLL)
        .field(FieldSpec::code("job_family_code", CERT_JOB_FAMILY, &JOB_FAMILY, rule))
        .field(
            FieldSpec::code("discipline_stream_code", CERT_JOB_FAMILY, &STREAM, rule)
                .labelled_only(),
        )
        .field(FieldSpec::integer("org_unit_id", CERT_ORG_UNIT, rule))
        .field(FieldSpec::text("manager_name", CERT_MANAGER, rule))
}

fn participants() -> SourceSpec {
    let rule = MergeRule::OverwriteIfPresent;
    SourceSpec::keyed_by(PARTICIPANTS, EntityKind::Staff, "QHPayroll")
        .field(FieldSpec::text("given_name", "GivenName", rule))
        .field(FieldSpec::text("surname", "Surname", rule))
        .field(FieldSpec::text("email", "Mail", rule))
        .field(FieldSpec::code("discipline_stream_code", "Stream", &STREAM, rule))
        .field(FieldSpec::text("facility", "Facility", rule))
}

fn faculty_list() -> SourceSpec {
    let rule = MergeRule::OverwriteIfPresent;
    SourceSpec::keyed_by(FACULTY_LIST, EntityKind::Staff, "Payroll")
        .field(FieldSpec::text("given_name", "GivenName", rule))
        .field(FieldSpec::text("surname", "Surname", rule))
        .field(FieldSpec::text("email", "Mail", rule))
        .field(FieldSpec::code("discipline_stream_code", "Stream", &STREAM, rule))
}
