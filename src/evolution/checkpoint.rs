//! Binary persistence for populations and the best genome.
//!
//! Both are plain `bincode` encodings of the serde types; nothing else is
//! written alongside them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::genome::Genome;
use super::population::Population;
use crate::error::PersistError;

/// Saves the population every `interval` generations to `<prefix><generation>`
#[derive(Debug, Clone)]
pub struct Checkpointer {
    interval: u32,
    prefix: String,
}

impl Checkpointer {
    pub fn new(interval: u32, prefix: impl Into<String>) -> Self {
        Self {
            interval,
            prefix: prefix.into(),
        }
    }

    pub fn path_for(&self, generation: u32) -> PathBuf {
        PathBuf::from(format!("{}{}", self.prefix, generation))
    }

    /// True when `generation` falls on the checkpoint interval
    pub fn is_due(&self, generation: u32) -> bool {
        self.interval > 0 && generation > 0 && generation % self.interval == 0
    }

    pub fn save(&self, population: &Population) -> Result<PathBuf, PersistError> {
        let path = self.path_for(population.generation);
        write_bincode(&path, population)?;
        info!(
            "Saved checkpoint for generation {} to {}",
            population.generation,
            path.display()
        );
        Ok(path)
    }
}

pub fn restore_checkpoint(path: &Path) -> Result<Population, PersistError> {
    read_bincode(path)
}

pub fn save_genome(path: &Path, genome: &Genome) -> Result<(), PersistError> {
    write_bincode(path, genome)
}

pub fn load_genome(path: &Path) -> Result<Genome, PersistError> {
    read_bincode(path)
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let bytes = bincode::serialize(value).map_err(|source| PersistError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, bytes).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let bytes = fs::read(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    bincode::deserialize(&bytes).map_err(|source| PersistError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
