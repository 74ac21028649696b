use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use kernel::Progress;

/// Size of the pieces the buffered file is fed to the transport in.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Receives upload progress. Observers cannot fail, so a misbehaving sink
/// never interrupts the transfer.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: Progress);
}

impl<F> ProgressObserver for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn on_progress(&self, progress: Progress) {
        self(progress);
    }
}

/// Splits `content` into chunks and reports progress as each one is pulled.
/// Empty content yields a single empty chunk so observers still see 100%.
pub fn progress_stream(
    content: Bytes,
    observer: Option<Arc<dyn ProgressObserver>>,
) -> impl Stream<Item = io::Result<Bytes>> + Send + Sync + 'static {
    let total = content.len() as u64;
    let mut chunks: Vec<Bytes> = (0..content.len())
        .step_by(CHUNK_SIZE)
        .map(|start| content.slice(start..content.len().min(start + CHUNK_SIZE)))
        .collect();
    // an empty file still reports completion once
    if chunks.is_empty() {
        chunks.push(Bytes::new());
    }

    let mut sent = 0u64;
    futures::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        let progress = Progress::new(sent, total);
        tracing::debug!("upload progress {progress} ({sent}/{total} bytes)");
        if let Some(observer) = &observer {
            observer.on_progress(progress);
        }
        Ok::<_, io::Error>(chunk)
    })
}

pub(crate) fn progress_body(
    content: Bytes,
    observer: Option<Arc<dyn ProgressObserver>>,
) -> reqwest::Body {
    reqwest::Body::wrap_stream(progress_stream(content, observer))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use futures::TryStreamExt;
    use rstest::rstest;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<Progress>>>, Arc<dyn ProgressObserver>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let observer: Arc<dyn ProgressObserver> =
            Arc::new(move |p: Progress| sink.lock().unwrap().push(p));
        (seen, observer)
    }

    #[rstest]
    #[case(1, 1)]
    #[case(CHUNK_SIZE, 1)]
    #[case(CHUNK_SIZE + 1, 2)]
    #[case(3 * CHUNK_SIZE + 17, 4)]
    #[tokio::test]
    async fn stream_keeps_bytes_and_reports_each_chunk(
        #[case] len: usize,
        #[case] chunks: usize,
    ) {
        // Arrange
        let content: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let (seen, observer) = recorder();

        // Act
        let parts: Vec<Bytes> = progress_stream(Bytes::from(content.clone()), Some(observer))
            .try_collect()
            .await
            .unwrap();

        // Assert
        assert_eq!(parts.len(), chunks);
        assert_eq!(parts.concat(), content);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), chunks);
        assert!(seen.windows(2).all(|w| w[0].sent < w[1].sent));
        assert_eq!(seen.last().copied(), Some(Progress::new(len as u64, len as u64)));
    }

    #[tokio::test]
    async fn stream_empty_content_reports_completion() {
        // Arrange
        let (seen, observer) = recorder();

        // Act
        let parts: Vec<Bytes> = progress_stream(Bytes::new(), Some(observer))
            .try_collect()
            .await
            .unwrap();

        // Assert
        assert_eq!(parts, vec![Bytes::new()]);
        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![Progress::new(0, 0)]);
        assert_eq!(seen[0].to_string(), "100.00%");
    }

    #[tokio::test]
    async fn stream_without_observer() {
        // Act
        let parts: Vec<Bytes> = progress_stream(Bytes::from_static(b"sitmc"), None)
            .try_collect()
            .await
            .unwrap();

        // Assert
        assert_eq!(parts, vec![Bytes::from_static(b"sitmc")]);
    }
}
