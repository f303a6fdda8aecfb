use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use comfy_table::Table;
use tracing::{info, info_span};

use redi_core::entities::{
    ALS_CERTIFICATION, BLS_CERTIFICATION, FACULTY_LIST, PARTICIPANTS, course_source,
    faculty_member_source, org_unit_source, staff_sources,
};
use redi_core::{SeedSources, SourceSpec, run_pipeline};
use redi_ingest::{CsvSource, ExcelSource, RowSource};
use redi_output::{SqlScriptOptions, write_json, write_sql_script};
use redi_transform::IdentifierHasher;

use redi_cli::config::SeedConfig;

use crate::cli::{GenerateArgs, HashIdArgs, OutputFormatArg, SourcesArgs};
use crate::summary::apply_table_style;
use crate::types::{EntitySummary, GenerateResult};

/// CSV extracts by extension; everything else is read as a workbook.
fn file_source(
    name: &str,
    path: &Path,
    sheet: Option<&str>,
    header_row: Option<usize>,
) -> Box<dyn RowSource> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        return Box::new(CsvSource::new(name, path));
    }
    let mut source = ExcelSource::new(name, path);
    if let Some(sheet) = sheet {
        source = source.with_sheet(sheet);
    }
    if let Some(row) = header_row {
        source = source.with_header_row(row);
    }
    Box::new(source)
}

pub fn build_sources(input_dir: &Path, config: &SeedConfig) -> SeedSources {
    let files = &config.files;
    let source = |name: &str, file: &str| {
        file_source(name, &input_dir.join(file), config.sheet_for(name), None)
    };
    SeedSources {
        org_units: source("org_units", &files.org_units),
        census: source("census", &files.census),
        transfers: file_source(
            "transfers",
            &input_dir.join(&files.transfers),
            config.sheet_for("transfers"),
            Some(config.transfer_columns.header_row),
        ),
        als_certification: source(ALS_CERTIFICATION, &files.als_certification),
        bls_certification: source(BLS_CERTIFICATION, &files.bls_certification),
        participants: source(PARTICIPANTS, &files.participants),
        faculty_list: source(FACULTY_LIST, &files.faculty_list),
        events: source("events", &files.events),
    }
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let config = SeedConfig::load(args.config.as_deref()).context("load config")?;
    let generate_span = info_span!("generate", input_dir = %args.input_dir.display());
    let _generate_guard = generate_span.enter();

    let sources = build_sources(&args.input_dir, &config);
    let output = run_pipeline(&sources, &config.settings());

    let entities = output
        .batches
        .iter()
        .map(|batch| EntitySummary {
            entity: batch.entity,
            table: batch.table.clone(),
            rows: batch.len(),
        })
        .collect();

    let written = if args.dry_run {
        info!("dry run, output not written");
        None
    } else {
        match args.format {
            OutputFormatArg::Sql => {
                let options = SqlScriptOptions {
                    generated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                    include_verification: !args.no_verify_block,
                };
                write_sql_script(&args.output, &output.batches, &options)?;
            }
            OutputFormatArg::Json => write_json(&args.output, &output.batches)?,
        }
        Some(args.output.clone())
    };

    Ok(GenerateResult {
        input_dir: args.input_dir.clone(),
        output: written,
        entities,
        warnings: output.report.warnings,
    })
}

fn describe_fields(spec: &SourceSpec) -> String {
    spec.fields()
        .iter()
        .map(|field| {
            if field.is_labelled_only() {
                format!("{} ({}, labelled only)", field.field(), field.rule())
            } else {
                format!("{} ({})", field.field(), field.rule())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run_sources(args: &SourcesArgs) -> Result<()> {
    let config = SeedConfig::load(args.config.as_deref()).context("load config")?;
    let settings = config.settings();
    let files = &config.files;

    let mut table = Table::new();
    table.set_header(vec!["Source", "File", "Entity", "Fields"]);
    apply_table_style(&mut table);

    let org_units = org_unit_source(&settings.org_unit_columns);
    table.add_row(vec![
        org_units.name().to_string(),
        files.org_units.clone(),
        org_units.entity().to_string(),
        describe_fields(&org_units),
    ]);
    table.add_row(vec![
        "census".to_string(),
        files.census.clone(),
        "wards, admitting_units".to_string(),
        format!(
            "{} / {} pairs",
            settings.census_columns.ward, settings.census_columns.unit
        ),
    ]);
    table.add_row(vec![
        "transfers".to_string(),
        files.transfers.clone(),
        "admitting_units".to_string(),
        "division (first value wins)\nsubdivision (first value wins)".to_string(),
    ]);
    let staff_files = [
        &files.als_certification,
        &files.bls_certification,
        &files.participants,
        &files.faculty_list,
    ];
    for (spec, file) in staff_sources().iter().zip(staff_files) {
        table.add_row(vec![
            spec.name().to_string(),
            file.clone(),
            spec.entity().to_string(),
            describe_fields(spec),
        ]);
    }
    for (spec, file) in [
        (course_source(&settings.events_date_format), &files.events),
        (
            faculty_member_source(&settings.faculty_date_format),
            &files.faculty_list,
        ),
    ] {
        table.add_row(vec![
            spec.name().to_string(),
            file.clone(),
            spec.entity().to_string(),
            describe_fields(&spec),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_hash_id(args: &HashIdArgs) -> Result<()> {
    let config = SeedConfig::load(args.config.as_deref()).context("load config")?;
    let hasher = IdentifierHasher::new(config.hash_salt);
    for identifier in &args.identifiers {
        let hashed = hasher.hash(Some(identifier));
        println!("{identifier}\t{}", hashed.as_text().unwrap_or("NULL"));
    }
    Ok(())
}
