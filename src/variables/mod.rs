// ABOUTME: Variable store module for docrender
// ABOUTME: Loads and merges template variables from directories of YAML files

pub mod error;
pub mod store;

pub use error::{Result, VariableError};
pub use store::{split_directories, VariableMapping, VariableStore, DEFAULT_VARIABLE_EXTENSIONS};
