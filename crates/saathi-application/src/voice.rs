//! Voice capture state machine.
//!
//! Dictated input re-enters the normal turn pipeline as text; this module
//! only manages the capture lifecycle and the transcription call. Start is
//! idempotent-guarded so overlapping press events never acquire the device
//! twice, and capture failures stay advisory: they never touch the
//! conversation log or the pending-turn flag.

use async_trait::async_trait;
use saathi_core::{Result, SaathiError};
use saathi_interaction::SaathiBackend;
use std::path::PathBuf;

/// Device seam for audio recording.
///
/// Implementations wrap whatever platform capture API is available;
/// `begin` may fail on permission denial.
#[async_trait]
pub trait AudioRecorder: Send {
    /// Acquires the device and starts capturing.
    async fn begin(&mut self) -> Result<()>;

    /// Stops capturing and returns the recorded audio file.
    async fn finish(&mut self) -> Result<PathBuf>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    /// Device acquisition in progress; a second start during this window
    /// must not acquire the device again.
    Preparing,
    Recording,
}

/// Push-to-talk capture around an [`AudioRecorder`].
pub struct VoiceCapture<R> {
    recorder: R,
    state: CaptureState,
}

impl<R: AudioRecorder> VoiceCapture<R> {
    pub fn new(recorder: R) -> Self {
        Self {
            recorder,
            state: CaptureState::Idle,
        }
    }

    /// True while audio is being captured.
    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    /// Starts capturing. A second start while already preparing or
    /// recording is a no-op and returns `Ok(false)`.
    pub async fn start(&mut self) -> Result<bool> {
        if self.state != CaptureState::Idle {
            return Ok(false);
        }

        self.state = CaptureState::Preparing;
        match self.recorder.begin().await {
            Ok(()) => {
                self.state = CaptureState::Recording;
                Ok(true)
            }
            Err(e) => {
                self.state = CaptureState::Idle;
                tracing::warn!("[VoiceCapture] failed to start recording: {e}");
                Err(SaathiError::Recording(format!(
                    "Failed to start voice recording: {e}"
                )))
            }
        }
    }

    /// Stops capturing and transcribes the recording.
    ///
    /// Returns `Ok(None)` when nothing was being recorded or the
    /// transcription came back empty; the caller feeds a `Some` result
    /// into the normal submit pipeline.
    pub async fn stop<B: SaathiBackend>(&mut self, backend: &B) -> Result<Option<String>> {
        if self.state != CaptureState::Recording {
            return Ok(None);
        }
        self.state = CaptureState::Idle;

        let audio = self.recorder.finish().await.map_err(|e| {
            tracing::warn!("[VoiceCapture] failed to stop recording: {e}");
            SaathiError::Recording(format!("Failed to process voice recording: {e}"))
        })?;

        let text = backend.transcribe(&audio).await?;
        let text = text.trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saathi_core::chat::WireMessage;
    use saathi_core::scan::UrlScanResult;
    use saathi_interaction::dto::{HealthReport, NewsArticle};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingRecorder {
        begins: Arc<AtomicUsize>,
        deny_permission: bool,
    }

    #[async_trait]
    impl AudioRecorder for CountingRecorder {
        async fn begin(&mut self) -> Result<()> {
            if self.deny_permission {
                return Err(SaathiError::Recording("microphone permission denied".into()));
            }
            self.begins.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn finish(&mut self) -> Result<PathBuf> {
            Ok(PathBuf::from("/tmp/capture.m4a"))
        }
    }

    struct TranscribeBackend {
        text: String,
    }

    #[async_trait]
    impl SaathiBackend for TranscribeBackend {
        async fn chat(&self, _messages: &[WireMessage]) -> Result<String> {
            unimplemented!()
        }

        async fn scan_url(&self, _url: &str) -> Result<UrlScanResult> {
            unimplemented!()
        }

        async fn health(&self) -> Result<HealthReport> {
            unimplemented!()
        }

        async fn transcribe(&self, _audio: &Path) -> Result<String> {
            Ok(self.text.clone())
        }

        async fn news(&self) -> Result<Vec<NewsArticle>> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_double_start_acquires_device_once() {
        let begins = Arc::new(AtomicUsize::new(0));
        let mut capture = VoiceCapture::new(CountingRecorder {
            begins: Arc::clone(&begins),
            deny_permission: false,
        });

        assert!(capture.start().await.unwrap());
        assert!(!capture.start().await.unwrap());
        assert_eq!(begins.load(Ordering::SeqCst), 1);
        assert!(capture.is_recording());
    }

    #[tokio::test]
    async fn test_permission_denial_leaves_idle() {
        let mut capture = VoiceCapture::new(CountingRecorder {
            begins: Arc::new(AtomicUsize::new(0)),
            deny_permission: true,
        });

        assert!(capture.start().await.is_err());
        assert!(!capture.is_recording());
        assert_eq!(capture.state, CaptureState::Idle);
    }

    #[tokio::test]
    async fn test_start_can_retry_after_failed_acquisition() {
        let begins = Arc::new(AtomicUsize::new(0));
        let mut capture = VoiceCapture::new(CountingRecorder {
            begins: Arc::clone(&begins),
            deny_permission: true,
        });

        assert!(capture.start().await.is_err());

        // Once the device becomes available, a retry must not be stuck
        // behind a stale preparing state.
        capture.recorder.deny_permission = false;
        assert!(capture.start().await.unwrap());
        assert_eq!(begins.load(Ordering::SeqCst), 1);
        assert!(capture.is_recording());
    }

    #[tokio::test]
    async fn test_stop_without_recording_is_a_no_op() {
        let mut capture = VoiceCapture::new(CountingRecorder {
            begins: Arc::new(AtomicUsize::new(0)),
            deny_permission: false,
        });
        let backend = TranscribeBackend {
            text: "hello".into(),
        };

        assert_eq!(capture.stop(&backend).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stop_transcribes_and_trims() {
        let mut capture = VoiceCapture::new(CountingRecorder {
            begins: Arc::new(AtomicUsize::new(0)),
            deny_permission: false,
        });
        let backend = TranscribeBackend {
            text: "  scan url https://example.com  ".into(),
        };

        capture.start().await.unwrap();
        let text = capture.stop(&backend).await.unwrap();
        assert_eq!(text.as_deref(), Some("scan url https://example.com"));
        assert!(!capture.is_recording());
    }

    #[tokio::test]
    async fn test_blank_transcription_yields_none() {
        let mut capture = VoiceCapture::new(CountingRecorder {
            begins: Arc::new(AtomicUsize::new(0)),
            deny_permission: false,
        });
        let backend = TranscribeBackend { text: "   ".into() };

        capture.start().await.unwrap();
        assert_eq!(capture.stop(&backend).await.unwrap(), None);
    }
}
