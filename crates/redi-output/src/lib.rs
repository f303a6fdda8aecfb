//! Seed output generation.
//!
//! - **SQL**: one transactional script of idempotent `INSERT … ON CONFLICT` statements
//! - **JSON**: the batches themselves, for inspection or other loaders

mod common;
mod json;
mod sql;

pub use common::ensure_parent_dir;
pub use json::{render_json, write_json};
pub use sql::{SqlScriptOptions, render_cell, render_sql_script, write_sql_script};
