//! Saving and restoring the transcript.

use std::path::Path;

use tracing::{info, warn};

use crate::transcript::Transcript;
use crate::usage::UsageStats;

use super::error::PersistenceError;
use super::manager::{lock, ConversationSession};

impl ConversationSession {
    /// The transcript as a JSON array of `{role, content}` records.
    pub fn serialize(&self) -> Result<Vec<u8>, PersistenceError> {
        lock(&self.transcript).to_json_bytes()
    }

    /// Replace the transcript with one parsed from `bytes` and reset usage.
    ///
    /// On error the session is left unchanged.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), PersistenceError> {
        let transcript = Transcript::from_json_bytes(bytes)?;
        info!(
            session = %self.id.short(),
            turns = transcript.len(),
            "Transcript restored"
        );
        *self.transcript.get_mut().unwrap_or_else(|e| e.into_inner()) = transcript;
        *self.usage.get_mut().unwrap_or_else(|e| e.into_inner()) = UsageStats::new();
        Ok(())
    }

    /// Write the transcript to `path`.
    ///
    /// Writes `<path>.tmp` and renames it over `path` so an interrupted save
    /// never truncates an earlier file.
    pub fn save_to_path(&self, path: &Path) -> Result<(), PersistenceError> {
        let bytes = self.serialize()?;
        let io_err = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = Path::new(&tmp_name);
        std::fs::write(tmp_path, &bytes).map_err(io_err)?;

        if let Err(e) = std::fs::rename(tmp_path, path) {
            // Some platforms refuse to rename over an existing file; write in place.
            warn!(path = %path.display(), "rename failed ({e}), writing in place");
            if let Err(e) = std::fs::remove_file(tmp_path) {
                warn!(path = %tmp_path.display(), "could not remove temporary file: {e}");
            }
            std::fs::write(path, &bytes).map_err(io_err)?;
        }

        info!(session = %self.id.short(), path = %path.display(), "Transcript saved");
        Ok(())
    }

    /// Read `path` and [`restore`](Self::restore) from it.
    pub fn load_from_path(&mut self, path: &Path) -> Result<(), PersistenceError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PersistenceError::NotFound(path.to_path_buf()),
            _ => PersistenceError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        self.restore(&bytes)
    }
}
