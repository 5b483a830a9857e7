//! Temporary files: the segments and manifest of a multi-segment cut, and
//! staged final outputs

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempPath};
use tracing::{debug, warn};

use crate::domain::errors::DomainError;
use crate::utils::path::PathUtils;

/// Segment files and concat manifest of a single cut.
///
/// Names are random and created exclusively, so concurrent cuts in the same
/// directory never collide. Every file is removed when the set is released
/// or dropped, whichever comes first.
pub struct TempArtifacts {
    dir: PathBuf,
    segments: Vec<TempPath>,
    manifest: Option<TempPath>,
}

impl TempArtifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            segments: Vec::new(),
            manifest: None,
        }
    }

    /// Reserve a fresh segment file and return its path
    pub fn reserve_segment(&mut self, index: usize, extension: &str) -> Result<PathBuf, DomainError> {
        let suffix = format!(".{}", extension);
        let prefix = format!("temp_segment_{}_", index);
        let file = Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(&self.dir)
            .map_err(|e| DomainError::fs("creating temporary segment", e))?;
        let path = file.into_temp_path();
        let owned = path.to_path_buf();
        self.segments.push(path);
        Ok(owned)
    }

    /// Write the concat manifest listing every reserved segment in order
    pub fn write_manifest(&mut self) -> Result<PathBuf, DomainError> {
        let mut file = Builder::new()
            .prefix("concat_")
            .suffix(".txt")
            .tempfile_in(&self.dir)
            .map_err(|e| DomainError::fs("creating concat manifest", e))?;

        let mut listing = String::new();
        for segment in &self.segments {
            listing.push_str(&PathUtils::concat_manifest_line(segment));
            listing.push('\n');
        }
        file.write_all(listing.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| DomainError::fs("writing concat manifest", e))?;

        let path = file.into_temp_path();
        let owned = path.to_path_buf();
        self.manifest = Some(path);
        Ok(owned)
    }

    /// Paths currently owned, segments first
    pub fn paths(&self) -> Vec<&Path> {
        self.segments
            .iter()
            .chain(self.manifest.iter())
            .map(|p| &**p)
            .collect()
    }

    /// Delete every owned file, logging removals that fail
    pub fn release(mut self) {
        let owned = self.segments.drain(..).chain(self.manifest.take());
        for path in owned {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => debug!(path = %shown, "removed temporary file"),
                Err(e) => warn!(path = %shown, "failed to remove temporary file: {}", e),
            }
        }
    }
}

/// A final output written under a temporary name next to its target.
///
/// ffmpeg writes into [`StagedOutput::path`]; [`StagedOutput::commit`] renames
/// the file onto the target. Dropping an uncommitted stage removes only the
/// temporary file, so whatever already sits at the target is left alone.
pub struct StagedOutput {
    staging: TempPath,
    target: PathBuf,
}

impl StagedOutput {
    /// Reserve a staging file in the target's directory, keeping its
    /// extension so ffmpeg picks the same muxer
    pub fn reserve(target: PathBuf) -> Result<Self, DomainError> {
        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let suffix = target
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let staging = Builder::new()
            .prefix("staging_")
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| DomainError::fs("creating staging output", e))?
            .into_temp_path();
        Ok(Self { staging, target })
    }

    pub fn path(&self) -> &Path {
        &self.staging
    }

    /// Move the finished file onto the target, replacing it
    pub fn commit(self) -> Result<PathBuf, DomainError> {
        let Self { staging, target } = self;
        staging
            .persist(&target)
            .map_err(|e| DomainError::fs(&format!("moving output to {}", target.display()), e.error))?;
        debug!(path = %target.display(), "output committed");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut artifacts = TempArtifacts::new(dir.path());
        let a = artifacts.reserve_segment(0, "mp4").unwrap();
        let b = artifacts.reserve_segment(1, "mp4").unwrap();
        let manifest = artifacts.write_manifest().unwrap();

        assert_ne!(a, b);
        assert!(a.file_name().unwrap().to_string_lossy().starts_with("temp_segment_0_"));
        let listing = std::fs::read_to_string(&manifest).unwrap();
        assert_eq!(
            listing,
            format!(
                "{}\n{}\n",
                PathUtils::concat_manifest_line(&a),
                PathUtils::concat_manifest_line(&b)
            )
        );

        artifacts.release();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_drop_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut artifacts = TempArtifacts::new(dir.path());
            artifacts.reserve_segment(0, "mkv").unwrap();
            artifacts.write_manifest().unwrap();
            assert_eq!(artifacts.paths().len(), 2);
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_staged_output_commit_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("clip.mp4");
        std::fs::write(&target, b"old").unwrap();

        let staged = StagedOutput::reserve(target.clone()).unwrap();
        assert_eq!(staged.path().parent(), Some(dir.path()));
        assert_eq!(staged.path().extension().unwrap(), "mp4");
        std::fs::write(staged.path(), b"new").unwrap();

        assert_eq!(staged.commit().unwrap(), target);
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_dropped_stage_leaves_target_alone() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("thumb.jpg");
        std::fs::write(&target, b"existing").unwrap();

        {
            let staged = StagedOutput::reserve(target.clone()).unwrap();
            std::fs::write(staged.path(), b"half written").unwrap();
        }

        assert_eq!(std::fs::read(&target).unwrap(), b"existing");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
