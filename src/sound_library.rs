//! The folder of alert clips the user manages from the main window.
//!
//! Only `.wav` files are listed. Clips are referred to by file stem, which is
//! what the sound chooser shows and what the settings file stores.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_DIR_NAME: &str = "music";
const EXTENSION: &str = "wav";

#[derive(Debug, Error)]
pub enum SoundLibraryError {
    #[error("a sound named \"{0}\" already exists")]
    AlreadyExists(String),
    #[error("{} is not a .wav file", .0.display())]
    NotWav(PathBuf),
    #[error("no sound named \"{0}\"")]
    NotFound(String),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> SoundLibraryError {
    move |source| SoundLibraryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(EXTENSION))
}

#[derive(Debug, Clone)]
pub struct SoundLibrary {
    dir: PathBuf,
}

impl SoundLibrary {
    /// Open the library, creating its directory if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SoundLibraryError> {
        let dir = dir.into();
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(io_err(&dir))?;
            info!(dir = %dir.display(), "created sound folder");
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stems of every `.wav` in the folder, sorted.
    pub fn list(&self) -> Result<Vec<String>, SoundLibraryError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err(&self.dir))? {
            let path = entry.map_err(io_err(&self.dir))?.path();
            if !path.is_file() || !is_wav(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        // `bell.wav` and `bell.WAV` can coexist; list the stem once.
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        names.dedup();
        Ok(names)
    }

    /// Locate the clip for `stem`, whatever the case of its extension.
    pub fn path_for(&self, stem: &str) -> Result<PathBuf, SoundLibraryError> {
        let exact = self.dir.join(format!("{stem}.{EXTENSION}"));
        if exact.is_file() {
            return Ok(exact);
        }
        for entry in fs::read_dir(&self.dir).map_err(io_err(&self.dir))? {
            let path = entry.map_err(io_err(&self.dir))?.path();
            if is_wav(&path) && path.file_stem().and_then(|s| s.to_str()) == Some(stem) {
                return Ok(path);
            }
        }
        Err(SoundLibraryError::NotFound(stem.to_string()))
    }

    /// Copy a clip into the folder. Returns its stem.
    pub fn add(&self, source: &Path) -> Result<String, SoundLibraryError> {
        if !is_wav(source) {
            return Err(SoundLibraryError::NotWav(source.to_path_buf()));
        }
        let (Some(file_name), Some(stem)) = (
            source.file_name(),
            source.file_stem().and_then(|s| s.to_str()),
        ) else {
            return Err(SoundLibraryError::NotWav(source.to_path_buf()));
        };

        if self.path_for(stem).is_ok() {
            return Err(SoundLibraryError::AlreadyExists(stem.to_string()));
        }

        let target = self.dir.join(file_name);
        fs::copy(source, &target).map_err(io_err(source))?;
        info!(from = %source.display(), to = %target.display(), "sound added");
        Ok(stem.to_string())
    }

    pub fn remove(&self, stem: &str) -> Result<(), SoundLibraryError> {
        let path = self.path_for(stem)?;
        fs::remove_file(&path).map_err(io_err(&path))?;
        debug!(path = %path.display(), "sound removed");
        Ok(())
    }
}
