//! Tests for categorical normalization.

use redi_model::Literal;
use redi_transform::normalization::categorical::ALL;
use redi_transform::{
    BOOKING_STATUS, CERT_STATUS, COURSE_STATUS, COURSE_TYPE, JOB_FAMILY, MissPolicy, STREAM,
};

#[test]
fn stream_variants_collapse() {
    assert_eq!(STREAM.resolve("Nursing & Midwifery"), Some("nursing"));
    assert_eq!(STREAM.resolve("Nursing or Midwifery"), Some("nursing"));
    assert_eq!(STREAM.resolve("Health Practitioners"), Some("allied_health"));
    assert_eq!(STREAM.resolve(""), Some("other"));
}

#[test]
fn miss_with_default_uses_default() {
    assert_eq!(STREAM.encode("Dentistry"), Literal::text("other"));
    assert_eq!(BOOKING_STATUS.encode("Waitlisted"), Literal::text("enrolled"));
    assert_eq!(COURSE_STATUS.encode(""), Literal::text("closed"));
    assert_eq!(CERT_STATUS.encode("Lapsed"), Literal::text("assigned"));
}

#[test]
fn miss_without_default_stays_unresolved() {
    assert_eq!(JOB_FAMILY.encode("Executive"), Literal::Null);
    assert_eq!(JOB_FAMILY.encode(""), Literal::Null);
    assert_eq!(COURSE_TYPE.encode("Webinar"), Literal::Null);
    assert_eq!(JOB_FAMILY.on_miss, MissPolicy::Unresolved);
}

#[test]
fn known_labels_resolve_exactly() {
    assert_eq!(
        JOB_FAMILY.resolve("Registered / Clinical Nurse - Grades 5-6"),
        Some("rn_cn_5_6")
    );
    assert_eq!(COURSE_TYPE.resolve("ANZCA Refresher"), Some("anzca_refresher"));
    assert_eq!(BOOKING_STATUS.resolve("Did Not Attend"), Some("did_not_attend"));
    assert_eq!(CERT_STATUS.resolve("In Progress"), Some("in_progress"));
    assert_eq!(COURSE_TYPE.resolve("full course"), None);
}

#[test]
fn every_table_label_resolves_to_a_listed_code() {
    for normalizer in ALL {
        let codes = normalizer.codes();
        for label in normalizer.labels() {
            let code = normalizer.lookup(label).expect("listed label");
            assert!(codes.contains(&code), "{}: {label}", normalizer.name);
        }
    }
}
