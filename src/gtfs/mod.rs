use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use zip::ZipArchive;

use crate::graph::EntityType;

mod config;
pub mod models;
mod writer;
pub use config::*;
pub use models::*;
pub use writer::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error in {file_name}: {source}")]
    Csv {
        file_name: String,
        #[source]
        source: csv::Error,
    },
    #[error("Required file {0} is missing from the feed")]
    MissingFile(String),
    #[error("Invalid time '{value}' in {file_name}")]
    InvalidTime { file_name: String, value: String },
    #[error("Invalid date '{value}' in {file_name}")]
    InvalidDate { file_name: String, value: String },
    #[error("{file_name} has more rows than fit a u32 id, row {row} is out of range")]
    TooManyRows { file_name: String, row: usize },
    #[error("{0} is neither a zip file nor a directory")]
    NotFileNorDirectory(PathBuf),
}

#[derive(Debug, Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// Streams the rows of a GTFS feed stored as a zip archive or a directory.
#[derive(Default)]
pub struct GtfsReader {
    config: Config,
    storage: StorageType,
}

impl GtfsReader {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn from_zip<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.into());
        self
    }

    pub fn from_directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.storage = StorageType::Directory(path.into());
        self
    }

    /// Picks zip or directory storage from what `path` points at.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<Self, self::Error> {
        let path = path.as_ref();
        if path.is_dir() {
            Ok(self.from_directory(path))
        } else if path.is_file() {
            Ok(self.from_zip(path))
        } else {
            Err(self::Error::NotFileNorDirectory(path.to_path_buf()))
        }
    }

    /// Hands every row of the file holding `kind` to `f`, with its row index.
    ///
    /// An absent optional file streams nothing; an absent required file is
    /// [`Error::MissingFile`].
    pub fn stream<T, F>(&self, kind: EntityType, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut(usize, T) -> Result<(), self::Error>,
    {
        let file_name = self.config.file_name(kind);
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                let mut archive = ZipArchive::new(File::open(path)?)?;
                match find_in_archive(&archive, file_name) {
                    Some(index) => stream_csv(archive.by_index(index)?, file_name, f),
                    None => missing(kind, file_name),
                }
            }
            StorageType::Directory(path) => {
                let path = path.join(file_name);
                if path.is_file() {
                    stream_csv(File::open(path)?, file_name, f)
                } else {
                    missing(kind, file_name)
                }
            }
        }
    }
}

fn missing(kind: EntityType, file_name: &str) -> Result<(), self::Error> {
    if kind.is_required() {
        Err(self::Error::MissingFile(file_name.to_string()))
    } else {
        Ok(())
    }
}

/// Archives zipped from a folder carry their files one level down.
fn find_in_archive(archive: &ZipArchive<File>, name: &str) -> Option<usize> {
    archive.index_for_name(name).or_else(|| {
        let suffix = format!("/{name}");
        let nested = archive
            .file_names()
            .find(|candidate| candidate.ends_with(&suffix))?
            .to_string();
        archive.index_for_name(&nested)
    })
}

fn stream_csv<R, T, F>(reader: R, file_name: &str, mut f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(usize, T) -> Result<(), self::Error>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    for (i, row) in reader.deserialize().enumerate() {
        let row: T = row.map_err(|source| self::Error::Csv {
            file_name: file_name.to_string(),
            source,
        })?;
        f(i, row)?;
    }
    Ok(())
}
