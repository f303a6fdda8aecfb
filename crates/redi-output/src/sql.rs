//! SQL script rendering.
//!
//! The script wraps every non-empty batch in a single `BEGIN … COMMIT`
//! transaction. Each batch becomes one multi-row `INSERT` whose conflict
//! clause follows the batch's [`ConflictRule`], so the script can be applied
//! repeatedly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use redi_model::{Cell, ConflictRule, EntityKind, UpsertBatch};

use crate::common::ensure_parent_dir;

const BANNER: &str =
    "-- ============================================================================";
const SECTION: &str =
    "-- ========================================================================";

#[derive(Debug, Clone)]
pub struct SqlScriptOptions {
    /// Timestamp written into the header comment, if any.
    pub generated_at: Option<String>,
    /// Append a block that reports row counts of every table after loading.
    pub include_verification: bool,
}

impl Default for SqlScriptOptions {
    fn default() -> Self {
        Self {
            generated_at: None,
            include_verification: true,
        }
    }
}

/// A cell as a SQL expression. Lookups become scalar subqueries.
pub fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Value(literal) => literal.to_string(),
        Cell::Lookup(lookup) => format!(
            "(SELECT {} FROM {} WHERE {} = {})",
            lookup.id_column, lookup.table, lookup.key_column, lookup.key
        ),
    }
}

fn render_conflict(batch: &UpsertBatch) -> String {
    let target = batch.key_columns.join(", ");
    let (columns, touch) = match &batch.conflict {
        ConflictRule::Coalesce { columns, touch } if !(columns.is_empty() && touch.is_empty()) => {
            (columns, touch)
        }
        _ => return format!("ON CONFLICT ({target}) DO NOTHING;"),
    };
    let mut assignments: Vec<String> = columns
        .iter()
        .map(|column| {
            format!(
                "  {column} = COALESCE(EXCLUDED.{column}, {table}.{column})",
                table = batch.table
            )
        })
        .collect();
    assignments.extend(touch.iter().map(|column| format!("  {column} = NOW()")));
    format!(
        "ON CONFLICT ({target}) DO UPDATE SET\n{};",
        assignments.join(",\n")
    )
}

fn render_batch(batch: &UpsertBatch) -> String {
    let columns: Vec<&str> = batch.columns().collect();
    let rows: Vec<String> = batch
        .rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.cells().map(render_cell).collect();
            format!("  ({})", cells.join(", "))
        })
        .collect();
    [
        SECTION.to_string(),
        format!("-- {}", batch.entity.label().to_uppercase()),
        SECTION.to_string(),
        format!("INSERT INTO {} ({}) VALUES", batch.table, columns.join(", ")),
        rows.join(",\n"),
        render_conflict(batch),
        String::new(),
    ]
    .join("\n")
}

fn render_verification() -> String {
    let mut lines = vec![
        BANNER.to_string(),
        "-- POST-SEED: Verify counts".to_string(),
        BANNER.to_string(),
        "DO $$".to_string(),
        "BEGIN".to_string(),
    ];
    for kind in EntityKind::ALL {
        lines.push(format!(
            "  RAISE NOTICE '{}: %', (SELECT COUNT(*) FROM {});",
            kind.label(),
            kind.table()
        ));
    }
    lines.push("END $$;".to_string());
    lines.join("\n")
}

/// Render the whole seed script. Empty batches are left out.
pub fn render_sql_script(batches: &[UpsertBatch], options: &SqlScriptOptions) -> String {
    let mut parts = vec![
        BANNER.to_string(),
        "-- REdI Data Platform: Seed Data".to_string(),
    ];
    if let Some(generated_at) = &options.generated_at {
        parts.push(format!("-- Generated: {generated_at}"));
    }
    parts.push(BANNER.to_string());
    parts.push(String::new());
    parts.push("BEGIN;".to_string());
    parts.push(String::new());
    for batch in batches.iter().filter(|batch| !batch.is_empty()) {
        parts.push(render_batch(batch));
    }
    parts.push("COMMIT;".to_string());
    if options.include_verification {
        parts.push(String::new());
        parts.push(render_verification());
    }
    let mut script = parts.join("\n");
    script.push('\n');
    script
}

/// Render and write the script to `path`.
pub fn write_sql_script(
    path: &Path,
    batches: &[UpsertBatch],
    options: &SqlScriptOptions,
) -> Result<()> {
    ensure_parent_dir(path)?;
    let script = render_sql_script(batches, options);
    fs::write(path, &script).with_context(|| format!("write {}", path.display()))?;
    info!(
        path = %path.display(),
        lines = script.lines().count(),
        "sql script written"
    );
    Ok(())
}
