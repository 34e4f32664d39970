use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::StoreError;

/// CsvConnection manages the base data directory and the per-goal
/// directories underneath it
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, StoreError> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new CSV connection in the default data directory
    /// (~/Documents/Zone)
    pub fn new_default() -> Result<Self, StoreError> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine home directory",
                ))
            })?;

        let data_dir = PathBuf::from(home_dir).join("Documents").join("Zone");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding one goal aggregate, named from the goal id
    pub fn goal_directory(&self, goal_id: &str) -> PathBuf {
        self.base_directory.join(Self::safe_directory_name(goal_id))
    }

    /// Turn a goal id into a filesystem-safe directory name
    /// (`goal::<uuid>` becomes `goal__<uuid>`)
    pub fn safe_directory_name(goal_id: &str) -> String {
        goal_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}
