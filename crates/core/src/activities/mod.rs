//! Activities module - the transaction ledger and the brokerage importer.

mod activities_constants;
mod activities_model;
mod activities_service;
mod activities_traits;
mod csv_parser;
mod import_mapper;


// Re-export the public interface
pub use activities_constants::{classify_action, ACTION_RULES, OPTION_MULTIPLIER};
pub use activities_model::{
    Activity, ActivityDetails, ActivityType, ImportMode, ImportSummary, ImportWarning,
    NewActivity,
};
pub use activities_service::ActivityService;
pub use activities_traits::ActivityRepositoryTrait;
pub use csv_parser::{parse_csv, ParseError, ParsedCsv};
pub use import_mapper::{
    detect_asset_type, extract_option_meta, map_rows, normalize_date, normalize_header,
    parse_numeric_cell, resolve_columns, ColumnMap, ImportedActivity, MappedImport, ParsedCell,
};
