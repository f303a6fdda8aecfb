use redi_model::{EntityKind, Literal, MergeRule};
use redi_transform::STREAM;

use crate::reconcile::{FieldSpec, KeySpec, SourceSpec};

pub const FACULTY_MEMBERS: &str = "faculty_members";

/// One faculty member per faculty-list row, keyed by 1-based row position.
///
/// `is_inactive` is TRUE only for an `Inactive` cell of "true" (any case) and
/// FALSE otherwise, never NULL.
pub fn faculty_member_source(date_format: &str) -> SourceSpec {
    let rule = MergeRule::Overwrite;
    SourceSpec::new(FACULTY_MEMBERS, EntityKind::FacultyMember, KeySpec::RowPosition)
        .field(FieldSpec::text("given_name", "GivenName", rule))
        .field(FieldSpec::text("surname", "Surname", rule))
        .field(FieldSpec::text("email", "Mail", rule))
        .field(FieldSpec::text("mobile", "Mobile", rule))
        .field(FieldSpec::text("payroll_id", "Payroll", rule))
        .field(FieldSpec::text("discipline", "Discipline", rule))
        .field(FieldSpec::code("discipline_stream_code", "Stream", &STREAM, rule))
        .field(FieldSpec::date(
            "certification_date",
            "CertificationDate",
            date_format,
            rule,
        ))
        .field(FieldSpec::new("is_inactive", "Inactive", rule, |row| {
            Literal::Boolean(row.text("Inactive").eq_ignore_ascii_case("true"))
        }))
}
