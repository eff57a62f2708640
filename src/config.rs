//! Driver configuration.
//!
//! Configuration is read from a JSON file; every field is optional.
//!
//! ```json
//! {
//!   "input_path": "data/data_batch_1.bin",
//!   "output_dir": "images",
//!   "record_count": 10,
//!   "seed": 42,
//!   "file_naming": "indexed_label"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use crate::error::{Error, Result};
use crate::ppm::FileNaming;

/// Number of records processed when none is configured.
pub const DEFAULT_RECORD_COUNT: usize = 10;
/// Input file read when none is configured.
pub const DEFAULT_INPUT_PATH: &str = "train-images.bin";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// The CIFAR binary file to read records from.
    pub input_path: PathBuf,
    /// Directory the inspection images are written to.
    pub output_dir: PathBuf,
    /// How many records to process.
    pub record_count: usize,
    /// Seed for weight initialization. Seeded from the clock when absent.
    pub seed: Option<u64>,
    pub file_naming: FileNaming,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from("."),
            record_count: DEFAULT_RECORD_COUNT,
            seed: None,
            file_naming: FileNaming::Label,
        }
    }
}

impl DriverConfig {
    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.record_count == 0 {
            return Err(Error::Config("record_count must be positive".to_string()));
        }
        if self.input_path.as_os_str().is_empty() {
            return Err(Error::Config("input_path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Loads and validates a configuration from the JSON file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DriverConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses and validates a JSON configuration.
pub fn parse_config(json: &str) -> Result<DriverConfig> {
    let config: DriverConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_uses_defaults() {
        assert_eq!(parse_config("{}").unwrap(), DriverConfig::default());
    }

    #[test]
    fn all_fields() {
        let config = parse_config(
            r#"{
                "input_path": "data.bin",
                "output_dir": "out",
                "record_count": 3,
                "seed": 42,
                "file_naming": "indexed_label"
            }"#,
        )
        .unwrap();
        assert_eq!(config.input_path, PathBuf::from("data.bin"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.record_count, 3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.file_naming, FileNaming::IndexedLabel);
    }

    #[test]
    fn zero_records_rejected() {
        assert!(matches!(
            parse_config(r#"{"record_count": 0}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(matches!(
            parse_config(r#"{"learning_rate": 0.1}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn unknown_naming_rejected() {
        assert!(parse_config(r#"{"file_naming": "random"}"#).is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"record_count": 5}}"#).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.record_count, 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_config("/definitely/not/here.json"),
            Err(Error::Io(_))
        ));
    }
}
