//! Response body stream for a temporary audio artifact.
//!
//! The stream owns the artifact file. It is removed as soon as the last
//! chunk has been handed out, or when the stream is dropped early (client
//! disconnect, server error while sending). Removal happens exactly once.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use tempfile::TempPath;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

const READ_CHUNK_BYTES: usize = 16 * 1024;

pub struct ArtifactStream {
    reader: Option<ReaderStream<File>>,
    path: Option<TempPath>,
    len: u64,
    sent: u64,
}

impl ArtifactStream {
    pub(crate) fn new(file: File, path: TempPath, len: u64) -> Self {
        Self {
            reader: Some(ReaderStream::with_capacity(file, READ_CHUNK_BYTES)),
            path: Some(path),
            len,
            sent: 0,
        }
    }

    /// Bytes handed out so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Whether the backing file has been removed already.
    pub fn is_cleaned(&self) -> bool {
        self.path.is_none()
    }

    fn cleanup(&mut self) {
        // close the handle before unlinking
        self.reader.take();
        let Some(path) = self.path.take() else {
            return;
        };
        let shown = path.display().to_string();
        match path.close() {
            Ok(()) => debug!(
                path = %shown,
                sent = self.sent,
                len = self.len,
                "audio artifact removed"
            ),
            Err(e) => warn!(path = %shown, "failed to remove audio artifact: {e}"),
        }
    }
}

impl Stream for ArtifactStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(reader) = this.reader.as_mut() else {
            return Poll::Ready(None);
        };

        match Pin::new(reader).poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.sent += chunk.len() as u64;
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(None) => {
                this.cleanup();
                Poll::Ready(None)
            }
            other => other,
        }
    }
}

impl Drop for ArtifactStream {
    fn drop(&mut self) {
        if self.path.is_some() {
            debug!(sent = self.sent, len = self.len, "audio stream dropped before completion");
        }
        self.cleanup();
    }
}

impl std::fmt::Debug for ArtifactStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStream")
            .field("path", &self.path.as_ref().map(|p| p.to_path_buf()))
            .field("len", &self.len)
            .field("sent", &self.sent)
            .finish()
    }
}
