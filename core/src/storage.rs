use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::FoodCatalog;
use crate::error::Result;
use crate::log_store::{EntryLog, PreloadSummary};

pub const FOOD_FILE_NAME: &str = "foods.txt";
pub const ENTRY_FILE_NAME: &str = "entries.txt";

/// Flat-file persistence for the catalog and the entry log.
///
/// Every call opens its file, reads or writes it completely, and closes it
/// before returning.
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn food_path(&self) -> PathBuf {
        self.data_dir.join(FOOD_FILE_NAME)
    }

    #[must_use]
    pub fn entry_path(&self) -> PathBuf {
        self.data_dir.join(ENTRY_FILE_NAME)
    }

    /// A missing file yields an empty catalog. A malformed file is an error.
    pub fn load_catalog(&self) -> Result<FoodCatalog> {
        let mut catalog = FoodCatalog::new();
        if let Some(reader) = open_if_exists(&self.food_path())? {
            catalog.preload(reader)?;
        }
        Ok(catalog)
    }

    /// A missing file yields an empty log. Malformed lines are skipped.
    pub fn load_entries(&self) -> Result<(EntryLog, PreloadSummary)> {
        let mut log = EntryLog::new();
        let summary = match open_if_exists(&self.entry_path())? {
            Some(reader) => log.preload(reader)?,
            None => PreloadSummary::default(),
        };
        Ok((log, summary))
    }

    pub fn save_catalog(&self, catalog: &FoodCatalog) -> Result<()> {
        self.write(&self.food_path(), &catalog.to_records())
    }

    pub fn save_entries(&self, log: &EntryLog) -> Result<()> {
        self.write(&self.entry_path(), &log.to_records())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(path, contents)?;
        debug!(path = %path.display(), bytes = contents.len(), "storage: saved");
        Ok(())
    }
}

fn open_if_exists(path: &Path) -> Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "storage: no file yet");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
