use std::path::PathBuf;

use redi_core::SourceWarning;
use redi_model::EntityKind;

#[derive(Debug)]
pub struct GenerateResult {
    pub input_dir: PathBuf,
    /// `None` for a dry run.
    pub output: Option<PathBuf>,
    pub entities: Vec<EntitySummary>,
    pub warnings: Vec<SourceWarning>,
}

#[derive(Debug)]
pub struct EntitySummary {
    pub entity: EntityKind,
    pub table: String,
    pub rows: usize,
}
