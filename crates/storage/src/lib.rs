#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod file;

pub use file::{
    FileStorage, load_config, load_program_references, load_week_templates, read_csv, read_json,
    read_yaml,
};
