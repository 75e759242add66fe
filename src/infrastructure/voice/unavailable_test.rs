use super::Unavailable;
use crate::domain::models::VoiceInput;

#[test]
fn it_is_not_available() {
    assert!(!Unavailable::default().available());
}

#[test]
fn it_fails_to_start() {
    let err = Unavailable::default()
        .start(Box::new(|_| {}), Box::new(|_| {}))
        .unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"Voice input is not supported on this platform.");
}
