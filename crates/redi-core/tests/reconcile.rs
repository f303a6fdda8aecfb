//! Tests for source folding and merge-rule precedence.

use proptest::prelude::*;
use redi_core::batch::COURSE_LAYOUT;
use redi_core::entities::{OrgUnitColumns, course_source, org_unit_source, staff_sources};
use redi_core::{EntityStore, FieldSpec, SourceSpec, apply_source, reconcile};
use redi_model::{Cell, EntityKind, Literal, MergeRule, Row};
use redi_transform::normalization::datetime::DAY_ABBREVIATED_MONTH_YEAR;

fn surname_source(name: &str, rule: MergeRule) -> SourceSpec {
    SourceSpec::keyed_by(name, EntityKind::Staff, "Payroll")
        .field(FieldSpec::text("surname", "Surname", rule))
}

fn surname_row(surname: &str) -> Vec<Row> {
    vec![Row::from_pairs([("Payroll", "100234"), ("Surname", surname)])]
}

fn surname_of(store: &EntityStore) -> Literal {
    store
        .get("100234")
        .map(|record| record.get("surname").clone())
        .unwrap_or_default()
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn overwrite_then_fill_then_blank_present_keeps_first() {
    let a = surname_source("a", MergeRule::Overwrite);
    let b = surname_source("b", MergeRule::FillIfAbsent);
    let c = surname_source("c", MergeRule::OverwriteIfPresent);
    let (rows_a, rows_b, rows_c) = (surname_row("Smith"), surname_row("Jones"), surname_row(""));

    let store = reconcile([
        (&a, rows_a.as_slice()),
        (&b, rows_b.as_slice()),
        (&c, rows_c.as_slice()),
    ]);
    assert_eq!(surname_of(&store), Literal::text("Smith"));
}

#[test]
fn fill_if_absent_fills_gaps_only() {
    let a = surname_source("a", MergeRule::Overwrite);
    let b = surname_source("b", MergeRule::FillIfAbsent);
    let (rows_a, rows_b) = (surname_row(""), surname_row("Jones"));

    let store = reconcile([(&a, rows_a.as_slice()), (&b, rows_b.as_slice())]);
    assert_eq!(surname_of(&store), Literal::text("Jones"));
}

#[test]
fn overwrite_replaces_with_null() {
    let a = surname_source("a", MergeRule::OverwriteIfPresent);
    let b = surname_source("b", MergeRule::Overwrite);
    let (rows_a, rows_b) = (surname_row("Smith"), surname_row("  "));

    let store = reconcile([(&a, rows_a.as_slice()), (&b, rows_b.as_slice())]);
    assert!(surname_of(&store).is_null());
}

#[test]
fn source_order_changes_the_outcome() {
    let a = surname_source("a", MergeRule::Overwrite);
    let b = surname_source("b", MergeRule::Overwrite);
    let (rows_a, rows_b) = (surname_row("Smith"), surname_row("Jones"));

    let forward = reconcile([(&a, rows_a.as_slice()), (&b, rows_b.as_slice())]);
    let backward = reconcile([(&b, rows_b.as_slice()), (&a, rows_a.as_slice())]);
    assert_eq!(surname_of(&forward), Literal::text("Jones"));
    assert_eq!(surname_of(&backward), Literal::text("Smith"));
}

#[test]
fn records_keep_first_sighting_order_across_sources() {
    let a = surname_source("a", MergeRule::Overwrite);
    let rows_a = vec![
        Row::from_pairs([("Payroll", "3"), ("Surname", "C")]),
        Row::from_pairs([("Payroll", "1"), ("Surname", "A")]),
    ];
    let rows_b = vec![
        Row::from_pairs([("Payroll", "2"), ("Surname", "B")]),
        Row::from_pairs([("Payroll", "3"), ("Surname", "C2")]),
    ];
    let store = apply_source(apply_source(EntityStore::new(), &a, &rows_a), &a, &rows_b);
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["3", "1", "2"]);
}

#[test]
fn numeric_ids_written_differently_merge_into_one_course() {
    let rows = vec![
        Row::from_pairs([("ID", "42"), ("CourseTitle", "ALS"), ("CourseStatus", "Open")]),
        Row::from_pairs([("ID", "042"), ("CourseTitle", "BLS")]),
        Row::from_pairs([("ID", " 42.0 "), ("CourseTitle", "ALS Refresher")]),
    ];
    let store = apply_source(
        EntityStore::new(),
        &course_source(DAY_ABBREVIATED_MONTH_YEAR),
        &rows,
    );
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["42"]);

    let batch = COURSE_LAYOUT.assemble(&store);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.rows[0].key, vec![Cell::Value(Literal::Integer(42))]);
    assert_eq!(
        batch.rows[0].values[0],
        Cell::Value(Literal::text("ALS Refresher"))
    );
}

#[test]
fn org_unit_ids_merge_on_numeric_value() {
    let rows = vec![
        Row::from_pairs([("ID", "7"), ("Name", "Cardiology")]),
        Row::from_pairs([("ID", "7.0"), ("Name", ""), ("Directorate", "Medicine")]),
    ];
    let store = apply_source(
        EntityStore::new(),
        &org_unit_source(&OrgUnitColumns::default()),
        &rows,
    );
    assert_eq!(store.len(), 1);
    let unit = store.get("7").expect("org unit 7");
    assert_eq!(unit.get("directorate"), &Literal::text("Medicine"));
}

// ============================================================================
// Declared staff sources
// ============================================================================

fn staff_store(als: &[Row], bls: &[Row], participants: &[Row], faculty: &[Row]) -> EntityStore {
    let specs = staff_sources();
    reconcile(specs.iter().zip([als, bls, participants, faculty]))
}

#[test]
fn staff_sources_are_declared_in_fold_order() {
    let names: Vec<String> = staff_sources()
        .iter()
        .map(|spec| spec.name().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "als_certification",
            "bls_certification",
            "participants",
            "faculty_list"
        ]
    );
}

#[test]
fn certification_sources_build_staff_profile() {
    let als = vec![Row::from_pairs([
        ("Person Person No.", "100234"),
        ("Person Full Name", "SMITH, Jane"),
        ("Job Family Name", ""),
        ("Person Organisation Number", "4101.0"),
        ("Manager Full Name", ""),
    ])];
    let bls = vec![Row::from_pairs([
        ("Person Person No.", "100234"),
        ("Person Full Name", "SMITH, Janet"),
        ("Job Family Name", "Medical"),
        ("Person Organisation Number", "9999"),
        ("Manager Full Name", "BROWN, Ann"),
    ])];

    let store = staff_store(&als, &bls, &[], &[]);
    let staff = store.get("100234").expect("staff record");
    assert_eq!(staff.get("given_name"), &Literal::text("Jane"));
    assert_eq!(staff.get("surname"), &Literal::text("SMITH"));
    assert_eq!(staff.get("job_family_code"), &Literal::text("medical"));
    assert_eq!(staff.get("discipline_stream_code"), &Literal::text("medical"));
    assert_eq!(staff.get("org_unit_id"), &Literal::Integer(4101));
    assert_eq!(staff.get("manager_name"), &Literal::text("BROWN, Ann"));
}

#[test]
fn blank_participant_stream_does_not_clobber_certification_stream() {
    let als = vec![Row::from_pairs([
        ("Person Person No.", "100234"),
        ("Job Family Name", "Health Practitioners"),
    ])];
    let participants = vec![Row::from_pairs([
        ("QHPayroll", "100234"),
        ("GivenName", "Janey"),
        ("Stream", ""),
        ("Facility", "RBWH"),
    ])];
    let faculty = vec![Row::from_pairs([
        ("Payroll", "100234"),
        ("Mail", "jane.smith@example.org"),
        ("Stream", "Nursing"),
    ])];

    let store = staff_store(&als, &[], &participants, &faculty);
    let staff = store.get("100234").expect("staff record");
    assert_eq!(staff.get("job_family_code"), &Literal::text("health_prac"));
    assert_eq!(staff.get("given_name"), &Literal::text("Janey"));
    assert_eq!(staff.get("facility"), &Literal::text("RBWH"));
    assert_eq!(staff.get("email"), &Literal::text("jane.smith@example.org"));
    assert_eq!(staff.get("discipline_stream_code"), &Literal::text("nursing"));
}

#[test]
fn participants_unknown_stream_label_maps_to_other() {
    let participants = vec![Row::from_pairs([("QHPayroll", "7"), ("Stream", "Volunteer")])];
    let store = staff_store(&[], &[], &participants, &[]);
    assert_eq!(
        store.get("7").map(|r| r.get("discipline_stream_code").clone()),
        Some(Literal::text("other"))
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn reconciling_twice_is_deterministic(
        surnames in proptest::collection::vec("[A-Za-z ]{0,8}", 0..12),
        keys in proptest::collection::vec(0u8..5, 0..12),
    ) {
        let rows: Vec<Row> = keys
            .iter()
            .zip(surnames.iter())
            .map(|(key, surname)| {
                Row::from_pairs([("Payroll", key.to_string()), ("Surname", surname.clone())])
            })
            .collect();
        let a = surname_source("a", MergeRule::Overwrite);
        let b = surname_source("b", MergeRule::OverwriteIfPresent);

        let first = reconcile([(&a, rows.as_slice()), (&b, rows.as_slice())]);
        let second = reconcile([(&a, rows.as_slice()), (&b, rows.as_slice())]);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fill_if_absent_never_replaces_a_value(existing in "[A-Za-z]{1,8}", incoming in ".{0,8}") {
        let a = surname_source("a", MergeRule::Overwrite);
        let b = surname_source("b", MergeRule::FillIfAbsent);
        let (rows_a, rows_b) = (surname_row(&existing), surname_row(&incoming));

        let store = reconcile([(&a, rows_a.as_slice()), (&b, rows_b.as_slice())]);
        prop_assert_eq!(surname_of(&store), Literal::text(existing));
    }
}
