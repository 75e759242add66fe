#[cfg(test)]
#[path = "voice_test.rs"]
mod tests;

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Event;
use crate::domain::models::VoiceBox;

/// Tracks the recording state of a voice capability and forwards its results
/// to the event loop, where transcripts go through the normal submit path.
pub struct VoiceService {
    input: VoiceBox,
    recording: Arc<AtomicBool>,
}

impl VoiceService {
    pub fn new(input: VoiceBox) -> VoiceService {
        return VoiceService {
            input,
            recording: Arc::new(AtomicBool::new(false)),
        };
    }

    pub fn available(&self) -> bool {
        return self.input.available();
    }

    pub fn is_recording(&self) -> bool {
        return self.recording.load(Ordering::SeqCst);
    }

    /// Starts recording when idle and stops it when recording. Returns whether
    /// a recording is now in progress.
    pub fn toggle(&mut self, tx: &mpsc::UnboundedSender<Event>) -> Result<bool> {
        if self.is_recording() {
            self.input.stop();
            self.recording.store(false, Ordering::SeqCst);
            return Ok(false);
        }

        if !self.input.available() {
            bail!("Voice input is not supported on this platform.");
        }

        let result_tx = tx.clone();
        let result_recording = self.recording.clone();
        let on_result = Box::new(move |transcript: String| {
            result_recording.store(false, Ordering::SeqCst);
            if let Err(err) = result_tx.send(Event::VoiceTranscript(transcript)) {
                tracing::error!(error = ?err, "Failed to forward voice transcript");
            }
        });

        let error_tx = tx.clone();
        let error_recording = self.recording.clone();
        let on_error = Box::new(move |detail: String| {
            error_recording.store(false, Ordering::SeqCst);
            if let Err(err) = error_tx.send(Event::VoiceFailed(detail)) {
                tracing::error!(error = ?err, "Failed to forward voice error");
            }
        });

        self.recording.store(true, Ordering::SeqCst);
        if let Err(err) = self.input.start(on_result, on_error) {
            self.recording.store(false, Ordering::SeqCst);
            return Err(err);
        }

        return Ok(true);
    }

    /// Stops any recording in progress, used on shutdown.
    pub fn stop(&mut self) {
        if self.is_recording() {
            self.input.stop();
            self.recording.store(false, Ordering::SeqCst);
        }
    }
}
