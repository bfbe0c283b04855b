use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use serde::de::DeserializeOwned;
use trainweek_domain::{
    AssistantConfig, CatalogRepository, Config, ProgramReferences, RawExercise, ReadError,
    StorageError, WeekTemplates,
};

/// Reads the exercise catalog from a CSV file with a header row, or from a JSON
/// file containing an array of rows. The format follows the file extension.
///
/// The file is read again on every call, so a reload picks up changes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    catalog: PathBuf,
}

impl FileStorage {
    pub fn new(catalog: impl Into<PathBuf>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }
}

impl CatalogRepository for FileStorage {
    fn read_catalog(&self) -> Result<Vec<RawExercise>, ReadError> {
        let rows: Vec<RawExercise> = if is_csv(&self.catalog) {
            read_csv(&self.catalog)?
        } else {
            read_json(&self.catalog)?
        };
        debug!(
            "read {} catalog rows from {}",
            rows.len(),
            self.catalog.display()
        );
        Ok(rows)
    }
}

pub fn load_config(path: &Path) -> Result<Config, ReadError> {
    Ok(read_yaml(path)?)
}

/// Without a file the built-in week templates are used.
pub fn load_week_templates(path: Option<&Path>) -> Result<WeekTemplates, ReadError> {
    match path {
        Some(path) => Ok(read_json(path)?),
        None => Ok(WeekTemplates::default()),
    }
}

/// Missing paths yield empty texts.
pub fn load_program_references(config: &AssistantConfig) -> Result<ProgramReferences, ReadError> {
    let examples = match &config.training_program_examples_dir {
        Some(dir) => read_examples(dir)?,
        None => String::new(),
    };
    let recommendations = match &config.recommendations_path {
        Some(path) => match read(path) {
            Ok(content) => content.trim().to_string(),
            Err(StorageError::NotFound(path)) => {
                debug!("no recommendations at {path}");
                String::new()
            }
            Err(err) => return Err(err.into()),
        },
        None => String::new(),
    };
    Ok(ProgramReferences {
        examples,
        recommendations,
    })
}

/// Concatenates the `*.txt` files of `dir` in name order.
fn read_examples(dir: &Path) -> Result<String, StorageError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("no example programs at {}", dir.display());
            return Ok(String::new());
        }
        Err(err) => return Err(StorageError::Other(Box::new(err))),
    };
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| StorageError::Other(Box::new(err)))?;
    paths.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"));
    paths.sort();
    let examples = paths
        .iter()
        .map(|path| read(path).map(|content| content.trim().to_string()))
        .collect::<Result<Vec<_>, StorageError>>()?;
    debug!(
        "read {} example programs from {}",
        examples.len(),
        dir.display()
    );
    Ok(examples.join("\n\n"))
}

pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let content = read(path)?;
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes())
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|err| invalid(path, &err))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    serde_json::from_str(&read(path)?).map_err(|err| invalid(path, &err))
}

pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    serde_yaml::from_str(&read(path)?).map_err(|err| invalid(path, &err))
}

fn read(path: &Path) -> Result<String, StorageError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::Other(Box::new(err)),
    })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn invalid(path: &Path, err: &impl ToString) -> StorageError {
    StorageError::Invalid {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
