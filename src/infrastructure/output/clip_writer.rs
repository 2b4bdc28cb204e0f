use crate::domain::audio::AudioClip;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes finished clips into the output directory.
pub struct ClipWriter {
    output_dir: PathBuf,
}

impl ClipWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn ensure_output_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir)
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Write `clip` as `file_name`, replacing any previous file.
    ///
    /// Data goes to a hidden temporary file first, so readers never see a
    /// half-written clip.
    pub fn write(&self, file_name: &str, clip: &AudioClip) -> io::Result<PathBuf> {
        let final_path = self.path_for(file_name);
        let temp_path = self.path_for(&format!(".{}.partial", file_name));

        if let Err(e) = fs::write(&temp_path, &clip.data) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp_path, &final_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        Ok(final_path)
    }
}
