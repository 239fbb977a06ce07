//! YAML and JSON (de)serialization helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

/// Serializes a value to a YAML string.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    serde_yaml::to_string(data).context("Failed to serialize to YAML")
}

/// Serializes a value to pretty-printed JSON.
pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize to JSON")
}

/// Deserializes a value from a YAML string.
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T> {
    serde_yaml::from_str(yaml).context("Failed to deserialize YAML")
}

/// Reads and parses a YAML file.
pub fn read_yaml_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
}

/// Writes a value to a file as YAML.
pub fn write_yaml_file<T: Serialize, P: AsRef<Path>>(data: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let yaml_content = to_yaml(data)?;

    fs::write(path, yaml_content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        note: String,
    }

    #[test]
    fn yaml_file_round_trip_keeps_multiline_strings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.yaml");
        let sample = Sample {
            name: "policy".to_string(),
            note: "first line\nsecond line".to_string(),
        };

        write_yaml_file(&sample, &path).unwrap();
        let loaded: Sample = read_yaml_file(&path).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn missing_file_error_names_path() {
        let err = read_yaml_file::<Sample, _>("/nonexistent/subjects.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/subjects.yaml"));
    }

    #[test]
    fn json_output_is_pretty() {
        let sample = Sample {
            name: "a".to_string(),
            note: "b".to_string(),
        };
        let json = to_json(&sample).unwrap();
        assert!(json.contains("\n  \"name\": \"a\""));
    }
}
