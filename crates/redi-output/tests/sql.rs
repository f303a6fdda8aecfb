//! Tests for SQL script rendering.

use chrono::NaiveDate;
use redi_model::{
    Cell, ConflictRule, EntityKind, KeyLookup, Literal, UpsertBatch, UpsertRow,
};
use redi_output::{SqlScriptOptions, render_cell, render_json, render_sql_script, write_sql_script};

fn org_units() -> UpsertBatch {
    let mut batch = UpsertBatch::new(
        EntityKind::OrgUnit,
        &["id"],
        &["name", "directorate", "service_line"],
        ConflictRule::coalesce(&["name", "directorate", "service_line"], &["updated_at"]),
    );
    batch.push(UpsertRow::new(
        vec![Literal::Integer(4101).into()],
        vec![
            Literal::text("Women's & Newborn").into(),
            Literal::Null.into(),
            Literal::text("Maternity").into(),
        ],
    ));
    batch
}

fn wards() -> UpsertBatch {
    let mut batch = UpsertBatch::new(EntityKind::Ward, &["code"], &[], ConflictRule::DoNothing);
    batch.push(UpsertRow::new(vec![Literal::text("4A").into()], Vec::new()));
    batch.push(UpsertRow::new(vec![Literal::text("5B").into()], Vec::new()));
    batch
}

fn options() -> SqlScriptOptions {
    SqlScriptOptions {
        generated_at: None,
        include_verification: false,
    }
}

#[test]
fn renders_coalesce_conflict_with_touch_columns() {
    let script = render_sql_script(&[org_units()], &options());
    let expected = "\
INSERT INTO core.org_units (id, name, directorate, service_line) VALUES
  (4101, 'Women''s & Newborn', NULL, 'Maternity')
ON CONFLICT (id) DO UPDATE SET
  name = COALESCE(EXCLUDED.name, core.org_units.name),
  directorate = COALESCE(EXCLUDED.directorate, core.org_units.directorate),
  service_line = COALESCE(EXCLUDED.service_line, core.org_units.service_line),
  updated_at = NOW();
";
    assert!(script.contains(expected), "script was:\n{script}");
}

#[test]
fn renders_do_nothing_with_key_target() {
    let script = render_sql_script(&[wards()], &options());
    let expected = "\
INSERT INTO core.wards (code) VALUES
  ('4A'),
  ('5B')
ON CONFLICT (code) DO NOTHING;
";
    assert!(script.contains(expected), "script was:\n{script}");
}

#[test]
fn wraps_in_one_transaction_and_skips_empty_batches() {
    let empty = UpsertBatch::new(EntityKind::Staff, &["payroll_id"], &[], ConflictRule::DoNothing);
    let script = render_sql_script(&[wards(), empty], &options());

    assert_eq!(script.matches("BEGIN;").count(), 1);
    assert_eq!(script.matches("COMMIT;").count(), 1);
    assert!(script.find("BEGIN;") < script.find("INSERT INTO core.wards"));
    assert!(script.find("INSERT INTO core.wards") < script.find("COMMIT;"));
    assert!(!script.contains("core.staff"));
    assert!(!script.contains("Generated:"));
}

#[test]
fn header_and_verification_are_optional() {
    let options = SqlScriptOptions {
        generated_at: Some("2026-02-03T10:00:00".to_string()),
        include_verification: true,
    };
    let script = render_sql_script(&[wards()], &options);

    assert!(script.contains("-- Generated: 2026-02-03T10:00:00\n"));
    assert!(script.contains("  RAISE NOTICE 'Ward-unit mappings: %', (SELECT COUNT(*) FROM core.ward_unit_map);\n"));
    assert!(script.trim_end().ends_with("END $$;"));
    assert!(script.find("COMMIT;") < script.find("DO $$"));
}

#[test]
fn renders_lookups_and_typed_literals() {
    let lookup = Cell::Lookup(KeyLookup::id_by("core.staff", "payroll_id", Literal::text("100234")));
    assert_eq!(
        render_cell(&lookup),
        "(SELECT id FROM core.staff WHERE payroll_id = '100234')"
    );
    let missing = Cell::Lookup(KeyLookup::id_by("core.staff", "payroll_id", Literal::Null));
    assert_eq!(
        render_cell(&missing),
        "(SELECT id FROM core.staff WHERE payroll_id = NULL)"
    );
    let date = NaiveDate::from_ymd_opt(2023, 2, 1).map_or(Literal::Null, Literal::Date);
    assert_eq!(render_cell(&Cell::Value(date)), "'2023-02-01'");
    assert_eq!(render_cell(&Cell::Value(Literal::Decimal(8.5))), "8.5");
    assert_eq!(render_cell(&Cell::Value(Literal::Boolean(false))), "FALSE");
}

#[test]
fn json_keeps_batch_structure() {
    let json = render_json(&[wards()]).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value[0]["entity"], "ward");
    assert_eq!(value[0]["table"], "core.wards");
    assert_eq!(value[0]["conflict"]["action"], "do_nothing");
    assert_eq!(value[0]["rows"].as_array().map(Vec::len), Some(2));
}

#[test]
fn writes_script_into_missing_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("migrations").join("seed_data.sql");
    write_sql_script(&path, &[wards()], &options()).expect("write");
    let written = std::fs::read_to_string(&path).expect("read");
    assert!(written.starts_with("-- ===="));
    assert!(written.contains("('5B')"));
}
