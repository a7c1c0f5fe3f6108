use super::{codec, default_header, DataStore, Inventory};
use crate::error::{Result, StockError};
use crate::model::Record;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// The production store: a single `;`-delimited text file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the data file, so the final rename never crosses filesystems.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stock".to_string());
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        dir.join(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }

    /// The temp file takes over the data file's permissions before the rename.
    fn write_temp(&self, tmp: &Path, inventory: &Inventory) -> Result<()> {
        let mut file = File::create(tmp)?;
        match fs::metadata(&self.path) {
            Ok(meta) => file.set_permissions(meta.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StockError::Io(e)),
        }
        codec::write_lines(&mut file, Some(&inventory.header), &inventory.records)?;
        file.sync_all()?;
        Ok(())
    }
}

/// True when the file is empty or its last byte is a newline.
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl DataStore for FileStore {
    fn load(&self) -> Result<Inventory> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let inventory = codec::parse(&content)?;
                debug!(
                    path = %self.path.display(),
                    records = inventory.records.len(),
                    "loaded datastore"
                );
                Ok(inventory)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "datastore file not found");
                Ok(Inventory::missing())
            }
            Err(e) => Err(StockError::Io(e)),
        }
    }

    fn rewrite(&mut self, inventory: &Inventory) -> Result<()> {
        let tmp = self.temp_path();
        let written = self
            .write_temp(&tmp, inventory)
            .and_then(|_| fs::rename(&tmp, &self.path).map_err(StockError::Io));

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        debug!(
            path = %self.path.display(),
            records = inventory.records.len(),
            "rewrote datastore"
        );
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<()> {
        codec::ensure_storable(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        let fresh = file.metadata()?.len() == 0;
        if !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let header = default_header();
        let header = if fresh { Some(header.as_slice()) } else { None };
        codec::write_lines(&mut file, header, std::slice::from_ref(record))?;

        debug!(path = %self.path.display(), fresh, "appended record");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
