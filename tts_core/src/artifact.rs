use std::io::{self, SeekFrom};
use std::path::Path;

use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

use crate::error::TtsResult;
use crate::stream::ArtifactStream;

pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

const ARTIFACT_PREFIX: &str = "speech-";
const ARTIFACT_SUFFIX: &str = ".mp3";

/// Synthesized audio parked in a uniquely named temporary file.
///
/// The file belongs to this value: dropping it, or dropping the
/// [`ArtifactStream`] it turns into, removes the file from disk.
#[derive(Debug)]
pub struct AudioArtifact {
    file: File,
    path: TempPath,
    len: u64,
}

impl AudioArtifact {
    /// Write `audio` into a fresh file under `dir`, rewound and ready to stream.
    pub async fn materialize(dir: &Path, audio: &[u8]) -> TtsResult<Self> {
        // file creation is blocking; keep it off the async workers
        let dir = dir.to_path_buf();
        let named = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(ARTIFACT_PREFIX)
                .suffix(ARTIFACT_SUFFIX)
                .tempfile_in(&dir)
        })
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;
        // From here on `path` removes the file if any step below fails.
        let (file, path) = named.into_parts();

        let mut file = File::from_std(file);
        file.write_all(audio).await?;
        file.flush().await?;
        file.seek(SeekFrom::Start(0)).await?;

        Ok(Self {
            file,
            path,
            len: audio.len() as u64,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn mime_type(&self) -> &'static str {
        AUDIO_MIME_TYPE
    }

    /// Hand the file over to a body stream that deletes it once finished or dropped.
    pub fn into_stream(self) -> ArtifactStream {
        ArtifactStream::new(self.file, self.path, self.len)
    }
}
