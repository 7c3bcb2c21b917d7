//! Export module for Hearth
//!
//! Provides data export in two formats:
//! - CSV: expenses (one row per split), balances and settlements
//! - JSON: machine-readable full household export

pub mod csv;
pub mod json;

pub use self::csv::{export_balances_csv, export_expenses_csv, export_settlements_csv};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
