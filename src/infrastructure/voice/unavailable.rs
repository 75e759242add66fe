#[cfg(test)]
#[path = "unavailable_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::VoiceErrorCallback;
use crate::domain::models::VoiceInput;
use crate::domain::models::VoiceResultCallback;

/// Stand-in for platforms without a speech recognition engine.
#[derive(Default)]
pub struct Unavailable {}

impl VoiceInput for Unavailable {
    fn available(&self) -> bool {
        return false;
    }

    fn start(
        &mut self,
        _on_result: VoiceResultCallback,
        _on_error: VoiceErrorCallback,
    ) -> Result<()> {
        bail!("Voice input is not supported on this platform.");
    }

    fn stop(&mut self) {}
}
