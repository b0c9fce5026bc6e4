use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Defines the interface for reading and writing a structure file format.
///
/// Implementors handle format-specific parsing and serialization; the
/// path-based helper wraps reading with a buffered file handle.
pub trait StructureFile {
    /// The error type for I/O and parsing failures.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `name` - The name given to the resulting structure.
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(name: &str, reader: &mut impl BufRead) -> Result<Structure, Self::Error>;

    /// Writes the current state of a structure to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(name: &str, path: P) -> Result<Structure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(name, &mut reader)
    }
}

/// Produces structures for the names and locations declared in a plan.
pub trait StructureLoader {
    type Error: Error + Send + Sync + 'static;

    /// Loads the structure stored at `location` under the name `name`.
    fn load(&self, name: &str, location: &str) -> Result<Structure, Self::Error>;
}

/// Output serialized by [`StructureWriter::stage`] but not yet visible at its
/// destination. Dropping it without calling [`commit`](PendingWrite::commit)
/// discards it.
pub trait PendingWrite {
    type Error;

    /// Moves the staged output into place.
    fn commit(self) -> Result<(), Self::Error>;
}

/// Persists structures to the destinations declared in a plan.
pub trait StructureWriter {
    type Error: Error + Send + Sync + 'static;
    type Pending: PendingWrite<Error = Self::Error>;

    /// Serializes the current in-memory state of `structure` for `destination`
    /// without touching the destination itself.
    fn stage(
        &self,
        structure: &Structure,
        destination: &str,
    ) -> Result<Self::Pending, Self::Error>;

    /// Serializes `structure` to `destination` immediately.
    fn write(&self, structure: &Structure, destination: &str) -> Result<(), Self::Error> {
        self.stage(structure, destination)?.commit()
    }
}
