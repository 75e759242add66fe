use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::VoiceService;
use crate::domain::models::Event;
use crate::domain::models::VoiceErrorCallback;
use crate::domain::models::VoiceInput;
use crate::domain::models::VoiceResultCallback;

type Callbacks = Arc<Mutex<Option<(VoiceResultCallback, VoiceErrorCallback)>>>;

struct FakeVoice {
    available: bool,
    callbacks: Callbacks,
    stopped: Arc<Mutex<bool>>,
}

impl VoiceInput for FakeVoice {
    fn available(&self) -> bool {
        return self.available;
    }

    fn start(
        &mut self,
        on_result: VoiceResultCallback,
        on_error: VoiceErrorCallback,
    ) -> Result<()> {
        if !self.available {
            bail!("unavailable");
        }
        *self.callbacks.lock().unwrap() = Some((on_result, on_error));
        return Ok(());
    }

    fn stop(&mut self) {
        *self.stopped.lock().unwrap() = true;
    }
}

fn service(available: bool) -> (VoiceService, Callbacks, Arc<Mutex<bool>>) {
    let callbacks: Callbacks = Arc::new(Mutex::new(None));
    let stopped = Arc::new(Mutex::new(false));
    let voice = FakeVoice {
        available,
        callbacks: callbacks.clone(),
        stopped: stopped.clone(),
    };

    return (VoiceService::new(Box::new(voice)), callbacks, stopped);
}

#[test]
fn it_forwards_transcripts() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let (mut voice, callbacks, _stopped) = service(true);

    assert!(voice.toggle(&tx)?);
    assert!(voice.is_recording());

    let (on_result, _on_error) = callbacks.lock().unwrap().take().unwrap();
    on_result("Tell me about France".to_string());

    assert!(!voice.is_recording());
    assert_eq!(
        rx.try_recv()?,
        Event::VoiceTranscript("Tell me about France".to_string())
    );
    return Ok(());
}

#[test]
fn it_forwards_errors() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let (mut voice, callbacks, _stopped) = service(true);

    voice.toggle(&tx)?;
    let (_on_result, on_error) = callbacks.lock().unwrap().take().unwrap();
    on_error("no-speech".to_string());

    assert!(!voice.is_recording());
    assert_eq!(rx.try_recv()?, Event::VoiceFailed("no-speech".to_string()));
    return Ok(());
}

#[test]
fn it_stops_when_toggled_while_recording() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let (mut voice, _callbacks, stopped) = service(true);

    assert!(voice.toggle(&tx)?);
    assert!(!voice.toggle(&tx)?);

    assert!(!voice.is_recording());
    assert!(*stopped.lock().unwrap());
    return Ok(());
}

#[test]
fn it_fails_when_unavailable() {
    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let (mut voice, _callbacks, _stopped) = service(false);

    assert!(!voice.available());
    let err = voice.toggle(&tx).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"Voice input is not supported on this platform.");
    assert!(!voice.is_recording());
}
