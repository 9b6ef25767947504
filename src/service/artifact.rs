use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use anyhow::Context as _;

use crate::{
    foundation::error::OrreryResult,
    generator::{GenerateOpts, generate_with},
};

/// The single cached GIF on disk plus the options used to (re)build it.
///
/// Generation holds an internal lock, so two callers never write the file at the same time.
pub struct ArtifactStore {
    path: PathBuf,
    opts: GenerateOpts,
    generation: Mutex<()>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ensured {
    AlreadyPresent,
    Generated,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>, opts: GenerateOpts) -> Self {
        Self {
            path: path.into(),
            opts,
            generation: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn opts(&self) -> &GenerateOpts {
        &self.opts
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Generate the artifact only if it is missing.
    pub fn ensure(&self) -> OrreryResult<Ensured> {
        let _guard = self.lock();
        // Re-check under the lock: another caller may have just produced it.
        if self.exists() {
            return Ok(Ensured::AlreadyPresent);
        }
        tracing::info!(path = %self.path.display(), "artifact missing, generating");
        generate_with(&self.path, &self.opts)?;
        Ok(Ensured::Generated)
    }

    /// Always generate, replacing any existing file.
    pub fn regenerate(&self) -> OrreryResult<()> {
        let _guard = self.lock();
        tracing::info!(path = %self.path.display(), "regenerating artifact");
        generate_with(&self.path, &self.opts)?;
        Ok(())
    }

    /// Ensure the artifact, then return its bytes.
    pub fn read_bytes(&self) -> OrreryResult<Vec<u8>> {
        self.ensure()?;
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read artifact '{}'", self.path.display()))?;
        Ok(bytes)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // A panic mid-generation leaves nothing to repair: the file is swapped in atomically.
        self.generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/artifact.rs"]
mod tests;
