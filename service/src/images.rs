//! Ingestion of local image files into inline [`Image`]s.

use std::{
    io,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use derive_more::{Display, Error};
use futures::future;
use tracing as log;

use crate::domain::residence::Image;

/// MIME type of files whose type cannot be guessed.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Error of transcoding a single file into an [`Image`].
#[derive(Debug, Display, Error)]
#[display("failed to transcode `{}`: {source}", path.display())]
pub struct TranscodingError {
    /// Path of the file failed to be transcoded.
    #[error(not(source))]
    pub path: PathBuf,

    /// Underlying I/O error.
    pub source: io::Error,
}

/// Transcodes the file at the provided `path` into an inline [`Image`].
///
/// # Errors
///
/// If the file cannot be read.
pub async fn transcode(path: &Path) -> Result<Image, TranscodingError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| TranscodingError {
            path: path.to_path_buf(),
            source,
        })?;
    let mime = mime_guess::from_path(path).first_raw().unwrap_or(FALLBACK_MIME);
    Ok(Image::inline(mime, &STANDARD.encode(bytes)))
}

/// Transcodes all the files at the provided `paths` concurrently.
///
/// Returns the successfully transcoded [`Image`]s in the order of their
/// `paths`. Files failed to be transcoded are logged and skipped, without
/// affecting the others.
pub async fn ingest<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> Vec<Image> {
    let paths = paths.into_iter().collect::<Vec<_>>();
    future::join_all(paths.iter().map(|p| transcode(p.as_ref())))
        .await
        .into_iter()
        .filter_map(|res| {
            res.map_err(|e| log::warn!("skipping image: {e}")).ok()
        })
        .collect()
}
