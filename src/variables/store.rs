// ABOUTME: Variable store that discovers, parses and merges YAML variable files
// ABOUTME: Later directories and files override earlier ones on top-level key collisions

use serde_json::{Map, Value as JsonValue};
use serde_yaml::Value as YamlValue;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::error::{Result, VariableError};

/// Merged variables handed to the renderer. Values keep their YAML shape.
pub type VariableMapping = Map<String, JsonValue>;

pub const DEFAULT_VARIABLE_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Split a `;`-separated list of directories, trimming each entry.
pub fn split_directories(arg: &str) -> Vec<PathBuf> {
    arg.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[derive(Debug, Clone)]
pub struct VariableStore {
    extensions: Vec<String>,
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableStore {
    /// Create a store that reads `.yaml` and `.yml` files
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_VARIABLE_EXTENSIONS)
    }

    /// Create a store that reads files with the given extensions
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        Self { extensions }
    }

    /// Load every variable file from `directories`, in order, into one mapping
    pub fn load<P: AsRef<Path>>(&self, directories: &[P]) -> Result<VariableMapping> {
        let mut variables = VariableMapping::new();
        let mut file_count = 0;

        for directory in directories {
            let files = self.discover(directory.as_ref())?;
            if files.is_empty() {
                warn!(
                    "No variable files found in {}",
                    directory.as_ref().display()
                );
            }

            for file in files {
                let document = Self::load_file(&file)?;
                debug!(
                    "Loaded {} variable(s) from {}",
                    document.len(),
                    file.display()
                );

                for (key, value) in document {
                    if variables.contains_key(&key) {
                        debug!("Variable '{}' overridden by {}", key, file.display());
                    }
                    variables.insert(key, value);
                }
                file_count += 1;
            }
        }

        info!(
            "Loaded {} variable(s) from {} file(s) in {} director{}",
            variables.len(),
            file_count,
            directories.len(),
            if directories.len() == 1 { "y" } else { "ies" }
        );

        Ok(variables)
    }

    /// List the variable files directly inside `directory`, sorted by name
    pub fn discover(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        if !directory.is_dir() {
            return Err(VariableError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let entries = fs::read_dir(directory).map_err(|source| VariableError::Io {
            path: directory.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| VariableError::Io {
                path: directory.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && self.is_variable_file(&path) {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }

    fn is_variable_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// Read and parse a single variable file
    pub fn load_file(path: &Path) -> Result<VariableMapping> {
        let content = fs::read_to_string(path).map_err(|source| VariableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        parse_document(&content).map_err(|message| VariableError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// Parse one YAML document into a mapping. An empty document yields no variables.
pub fn parse_document(content: &str) -> std::result::Result<VariableMapping, String> {
    let document: YamlValue = serde_yaml::from_str(content).map_err(|e| e.to_string())?;

    match document {
        YamlValue::Null => Ok(VariableMapping::new()),
        YamlValue::Mapping(mapping) => {
            let mut variables = VariableMapping::new();
            for (key, value) in mapping {
                let key = mapping_key(&key)?;
                let value = serde_json::to_value(&value)
                    .map_err(|e| format!("unsupported value for '{}': {}", key, e))?;
                variables.insert(key, value);
            }
            Ok(variables)
        }
        other => Err(format!(
            "top-level value must be a mapping, found {}",
            describe(&other)
        )),
    }
}

fn mapping_key(key: &YamlValue) -> std::result::Result<String, String> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        other => Err(format!("unsupported key type: {}", describe(other))),
    }
}

fn describe(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_split_directories() {
        let dirs = split_directories(" vars/common ; vars/prod;;");
        assert_eq!(
            dirs,
            vec![PathBuf::from("vars/common"), PathBuf::from("vars/prod")]
        );

        assert_eq!(split_directories("single"), vec![PathBuf::from("single")]);
        assert!(split_directories(" ; ").is_empty());
    }

    #[test]
    fn test_load_single_directory() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "vars.yaml", "name: John Doe\ncount: 3\n");

        let variables = VariableStore::new().load(&[temp_dir.path()]).unwrap();

        assert_eq!(variables["name"], json!("John Doe"));
        assert_eq!(variables["count"], json!(3));
    }

    #[test]
    fn test_later_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write(first.path(), "vars.yaml", "x: 1\nonly_first: a\n");
        write(second.path(), "vars.yaml", "x: 2\n");

        let variables = VariableStore::new()
            .load(&[first.path(), second.path()])
            .unwrap();

        assert_eq!(variables["x"], json!(2));
        assert_eq!(variables["only_first"], json!("a"));
    }

    #[test]
    fn test_files_merge_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "b.yml", "greeting: from b\n");
        write(temp_dir.path(), "a.yaml", "greeting: from a\nextra: true\n");

        let variables = VariableStore::new().load(&[temp_dir.path()]).unwrap();

        assert_eq!(variables["greeting"], json!("from b"));
        assert_eq!(variables["extra"], json!(true));
    }

    #[test]
    fn test_merge_is_shallow() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "1.yaml", "user:\n  name: Ann\n  role: admin\n");
        write(temp_dir.path(), "2.yaml", "user:\n  name: Bob\n");

        let variables = VariableStore::new().load(&[temp_dir.path()]).unwrap();

        assert_eq!(variables["user"], json!({ "name": "Bob" }));
    }

    #[test]
    fn test_ignores_other_extensions() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "vars.yaml", "a: 1\n");
        write(temp_dir.path(), "notes.txt", "not: loaded\n");
        fs::create_dir(temp_dir.path().join("nested.yaml")).unwrap();

        let files = VariableStore::new().discover(temp_dir.path()).unwrap();
        assert_eq!(files, vec![temp_dir.path().join("vars.yaml")]);
    }

    #[test]
    fn test_custom_extensions() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "vars.YAML", "a: 1\n");
        write(temp_dir.path(), "data.json", "{\"b\": 2}\n");

        let store = VariableStore::with_extensions([".json", "yaml"]);
        let variables = store.load(&[temp_dir.path()]).unwrap();

        assert_eq!(variables["a"], json!(1));
        assert_eq!(variables["b"], json!(2));
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = VariableStore::new().load(&[missing.clone()]);
        match result {
            Err(VariableError::DirectoryNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected DirectoryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "broken.yaml", "name: [unterminated\n");

        let result = VariableStore::new().load(&[temp_dir.path()]);
        match result {
            Err(VariableError::ConfigParse { path, .. }) => {
                assert_eq!(path, temp_dir.path().join("broken.yaml"))
            }
            other => panic!("expected ConfigParse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_document_shapes() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("- a\n- b\n").is_err());
        assert!(parse_document("just a string").is_err());

        let variables = parse_document("1: one\nitems: [a, b]\nnested: {k: v}\n").unwrap();
        assert_eq!(variables["1"], json!("one"));
        assert_eq!(variables["items"], json!(["a", "b"]));
        assert_eq!(variables["nested"], json!({ "k": "v" }));
    }
}
