use redi_model::{EntityKind, MergeRule};
use redi_transform::{COURSE_STATUS, COURSE_TYPE, clock_duration_hours};

use crate::reconcile::{FieldSpec, SourceSpec};

pub const EVENTS: &str = "events";

const START: &str = "CourseStart";
const END: &str = "CourseEnd";

/// Courses from the events export, keyed by the numeric `ID`. Every field overwrites.
pub fn course_source(date_format: &str) -> SourceSpec {
    let rule = MergeRule::Overwrite;
    SourceSpec::keyed_by_integer(EVENTS, EntityKind::Course, "ID")
        .field(FieldSpec::text("title", "CourseTitle", rule))
        .field(FieldSpec::code("course_type_code", "CourseType", &COURSE_TYPE, rule))
        .field(FieldSpec::date("course_date", "CourseDate", date_format, rule))
        .field(FieldSpec::text("start_time", START, rule))
        .field(FieldSpec::text("end_time", END, rule))
        .field(FieldSpec::new("duration_hours", START, rule, |row| {
            clock_duration_hours(row.get(START), row.get(END))
        }))
        .field(FieldSpec::text("venue", "CourseVenue", rule))
        .field(FieldSpec::integer("capacity", "CourseCap", rule))
        .field(FieldSpec::code("status_code", "CourseStatus", &COURSE_STATUS, rule))
        .field(FieldSpec::text("outlook_id", "OutlookID", rule))
}

#[cfg(test)]
mod tests {
    use redi_model::{Literal, Row};
    use redi_transform::normalization::datetime::DAY_ABBREVIATED_MONTH_YEAR;

    use super::*;
    use crate::reconcile::apply_source;
    use crate::store::EntityStore;

    #[test]
    fn encodes_event_fields() {
        let rows = vec![Row::from_pairs([
            ("ID", "42"),
            ("CourseTitle", "ALS Full Course"),
            ("CourseType", "Full Course"),
            ("CourseDate", "05-Mar-2024"),
            ("CourseStart", "08:00"),
            ("CourseEnd", "16:30"),
            ("CourseCap", "12.0"),
            ("CourseStatus", "Archived"),
        ])];
        let store = apply_source(
            EntityStore::new(),
            &course_source(DAY_ABBREVIATED_MONTH_YEAR),
            &rows,
        );
        let course = store.get("42").unwrap();
        assert_eq!(course.get("course_type_code"), &Literal::text("full_course"));
        assert_eq!(course.get("course_date").to_string(), "'2024-03-05'");
        assert_eq!(course.get("duration_hours"), &Literal::Decimal(8.5));
        assert_eq!(course.get("capacity"), &Literal::Integer(12));
        assert_eq!(course.get("status_code"), &Literal::text("closed"));
        assert!(course.get("venue").is_null());
    }
}
