mod format;
mod json;
mod table;

pub(crate) use format::NumberFormat;
pub(crate) use json::{output_estimate_json, output_models_json};
pub(crate) use table::{TableOptions, print_estimate_table, print_models_table};
