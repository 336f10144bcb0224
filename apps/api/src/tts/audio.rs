//! On-disk storage for generated narration, served back by file name.

use std::path::PathBuf;

use bytes::Bytes;
use tracing::info;

use crate::tts::TtsError;

const FILE_PREFIX: &str = "tts-";
const FILE_SUFFIX: &str = ".mp3";

#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writes `audio` to a fresh uniquely-named file and returns its file name.
    pub async fn save(&self, audio: Bytes) -> Result<String, TtsError> {
        let dir = self.dir.clone();
        let path = tokio::task::spawn_blocking(move || -> std::io::Result<PathBuf> {
            std::fs::create_dir_all(&dir)?;
            let file = tempfile::Builder::new()
                .prefix(FILE_PREFIX)
                .suffix(FILE_SUFFIX)
                .tempfile_in(&dir)?;
            std::fs::write(file.path(), &audio)?;
            let (_, path) = file.keep().map_err(|e| e.error)?;
            Ok(path)
        })
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "non UTF-8 audio file name")
            })?;

        info!("Saved narration to {}", path.display());
        Ok(file_name)
    }

    /// Reads a previously saved file. `Ok(None)` for unknown or unsafe names.
    pub async fn load(&self, file_name: &str) -> Result<Option<Bytes>, TtsError> {
        if !is_audio_file_name(file_name) {
            return Ok(None);
        }
        match tokio::fs::read(self.dir.join(file_name)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Only names this store could have produced are served.
fn is_audio_file_name(name: &str) -> bool {
    name.starts_with(FILE_PREFIX)
        && name.ends_with(FILE_SUFFIX)
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}
