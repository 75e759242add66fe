use anyhow::Result;

pub type VoiceResultCallback = Box<dyn FnOnce(String) + Send>;
pub type VoiceErrorCallback = Box<dyn FnOnce(String) + Send>;

/// Speech to text capability. Implementations call exactly one of the
/// callbacks per recording, from whichever thread the engine reports on.
pub trait VoiceInput {
    /// Whether a recognition engine exists on this platform.
    fn available(&self) -> bool;

    /// Begins a single recording.
    fn start(&mut self, on_result: VoiceResultCallback, on_error: VoiceErrorCallback)
        -> Result<()>;

    /// Stops recording early. Pending callbacks may never fire.
    fn stop(&mut self);
}

pub type VoiceBox = Box<dyn VoiceInput + Send>;
