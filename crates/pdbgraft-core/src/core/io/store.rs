use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::{PendingWrite, StructureFile, StructureLoader, StructureWriter};
use crate::core::models::structure::Structure;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Loads and writes structures as files of format `F`, treating plan locations as paths.
pub struct FileStore<F> {
    _format: PhantomData<F>,
}

/// File store for the PDB format.
pub type PdbStore = FileStore<PdbFile>;

impl<F> FileStore<F> {
    pub fn new() -> Self {
        Self {
            _format: PhantomData,
        }
    }
}

impl<F> Default for FileStore<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> StructureLoader for FileStore<F>
where
    F: StructureFile,
    F::Error: Send + Sync + 'static,
{
    type Error = F::Error;

    fn load(&self, name: &str, location: &str) -> Result<Structure, Self::Error> {
        debug!("Reading structure '{}' from {}", name, location);
        F::read_from_path(name, location)
    }
}

impl<F> StructureWriter for FileStore<F>
where
    F: StructureFile,
    F::Error: Send + Sync + 'static,
{
    type Error = F::Error;
    type Pending = StagedFile<F>;

    fn stage(&self, structure: &Structure, destination: &str) -> Result<StagedFile<F>, F::Error> {
        debug!("Staging structure '{}' for {}", structure.name, destination);
        let destination = PathBuf::from(destination);
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(&mut file);
            F::write_to(structure, &mut writer)?;
            writer.flush()?;
        }

        Ok(StagedFile {
            file,
            destination,
            _format: PhantomData,
        })
    }
}

/// A fully written temporary file next to its destination.
///
/// Committing renames it over the destination; dropping it deletes it.
#[derive(Debug)]
pub struct StagedFile<F> {
    file: NamedTempFile,
    destination: PathBuf,
    _format: PhantomData<F>,
}

impl<F> StagedFile<F> {
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl<F: StructureFile> PendingWrite for StagedFile<F> {
    type Error = F::Error;

    fn commit(self) -> Result<(), F::Error> {
        debug!("Moving staged output into {}", self.destination.display());
        self.file
            .persist(&self.destination)
            .map_err(|e| e.error)?;
        Ok(())
    }
}
