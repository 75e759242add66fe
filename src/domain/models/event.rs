/// Signals sent to the presentation layer. Consumers re-read the session
/// snapshot from the controller rather than receiving message payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SessionCleared(),
    SessionUpdated(),
    TypingIndicator(bool),
    VoiceFailed(String),
    VoiceTranscript(String),
}
