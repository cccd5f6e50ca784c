//! Artifact delivery
//!
//! A sink is where a finished artifact goes: a directory on disk, a browser
//! download, or an in-memory list. Resources a sink acquires (staging files,
//! object URLs) are owned by guards that release them on drop, so a failed
//! delivery never leaves anything behind.

use crate::{ExportArtifact, ExportError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for finished exports
pub trait ArtifactSink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()>;
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for &mut S {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
        (**self).deliver(artifact)
    }
}

/// Collects artifacts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<ExportArtifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[ExportArtifact] {
        &self.artifacts
    }

    pub fn last(&self) -> Option<&ExportArtifact> {
        self.artifacts.last()
    }

    pub fn into_artifacts(self) -> Vec<ExportArtifact> {
        self.artifacts
    }
}

impl ArtifactSink for MemorySink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}

/// Writes artifacts into a directory.
///
/// Bytes are staged to `<name>.part` and renamed into place, so the target
/// file either appears complete or not at all.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `artifact` lands once delivered
    pub fn target_path(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        let name = artifact.file_name.as_str();
        let is_plain_name = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !is_plain_name {
            return Err(ExportError::Delivery(format!(
                "'{}' is not a plain file name",
                name
            )));
        }
        Ok(self.dir.join(name))
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
        let target = self.target_path(artifact)?;
        fs::create_dir_all(&self.dir)?;

        let staged = StagedFile::write(&target, &artifact.bytes)?;
        staged.commit(&target)?;

        tracing::debug!("Wrote {} ({} bytes)", target.display(), artifact.len());
        Ok(())
    }
}

/// A `.part` file that is removed on drop unless committed
struct StagedFile {
    path: PathBuf,
    committed: bool,
}

impl StagedFile {
    fn write(target: &Path, bytes: &[u8]) -> Result<Self> {
        let mut part_name = target.file_name().unwrap_or_default().to_os_string();
        part_name.push(".part");

        // Guard exists before the first byte so a failed write is cleaned up
        let staged = Self {
            path: target.with_file_name(part_name),
            committed: false,
        };

        let mut writer = BufWriter::new(File::create(&staged.path)?);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        Ok(staged)
    }

    fn commit(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        "Failed to remove staging file {}: {}",
                        self.path.display(),
                        e
                    );
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserDownload;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::ArtifactSink;
    use crate::{ExportArtifact, ExportError, Result};
    use wasm_bindgen::JsCast;

    /// Triggers a browser download through a hidden anchor element
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserDownload;

    impl BrowserDownload {
        pub fn new() -> Self {
            Self
        }
    }

    /// An object URL that is revoked when dropped
    struct ObjectUrl(String);

    impl ObjectUrl {
        fn for_bytes(bytes: &[u8], mime_type: &str) -> Result<Self> {
            let parts = js_sys::Array::new();
            parts.push(&js_sys::Uint8Array::from(bytes));

            let options = web_sys::BlobPropertyBag::new();
            options.set_type(mime_type);

            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|_| delivery("Failed to create blob"))?;
            let url = web_sys::Url::create_object_url_with_blob(&blob)
                .map_err(|_| delivery("Failed to create object URL"))?;
            Ok(Self(url))
        }
    }

    impl Drop for ObjectUrl {
        fn drop(&mut self) {
            if web_sys::Url::revoke_object_url(&self.0).is_err() {
                tracing::warn!("Failed to revoke object URL {}", self.0);
            }
        }
    }

    fn delivery(message: &str) -> ExportError {
        ExportError::Delivery(message.to_string())
    }

    impl ArtifactSink for BrowserDownload {
        fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
            let window = web_sys::window().ok_or_else(|| delivery("No window found"))?;
            let document = window
                .document()
                .ok_or_else(|| delivery("No document found"))?;
            let body = document.body().ok_or_else(|| delivery("No body found"))?;

            let url = ObjectUrl::for_bytes(&artifact.bytes, artifact.mime_type())?;

            let anchor = document
                .create_element("a")
                .map_err(|_| delivery("Failed to create anchor element"))?
                .dyn_into::<web_sys::HtmlAnchorElement>()
                .map_err(|_| delivery("Failed to cast to anchor element"))?;
            anchor.set_href(&url.0);
            anchor.set_download(&artifact.file_name);
            let _ = anchor.style().set_property("display", "none");

            body.append_child(&anchor)
                .map_err(|_| delivery("Failed to append anchor"))?;
            anchor.click();
            body.remove_child(&anchor)
                .map_err(|_| delivery("Failed to remove anchor"))?;

            Ok(())
        }
    }
}
