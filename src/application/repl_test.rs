use super::help_text;
use super::message_at;
use super::Transcript;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;

fn messages(texts: &[&str]) -> Vec<Message> {
    return texts
        .iter()
        .map(|text| return Message::new(Role::User, text))
        .collect();
}

fn contents(messages: &[Message]) -> Vec<&str> {
    return messages.iter().map(|e| return e.content()).collect();
}

mod transcript {
    use super::*;

    #[test]
    fn it_prints_everything_the_first_time() {
        let snapshot = messages(&["Hello", "Hi"]);
        let mut transcript = Transcript::default();

        assert_eq!(contents(transcript.updated(&snapshot)), vec!["Hello", "Hi"]);
    }

    #[test]
    fn it_prints_only_new_messages() {
        let mut snapshot = messages(&["Hello"]);
        let mut transcript = Transcript::default();
        transcript.updated(&snapshot);

        snapshot.extend(messages(&["Tell me a joke", "Why did the chicken..."]));
        assert_eq!(
            contents(transcript.updated(&snapshot)),
            vec!["Tell me a joke", "Why did the chicken..."]
        );
        assert!(transcript.updated(&snapshot).is_empty());
    }

    #[test]
    fn it_reprints_after_clearing() {
        let snapshot = messages(&["Hello", "Hi", "Joke"]);
        let mut transcript = Transcript::default();
        transcript.updated(&snapshot);

        let cleared = messages(&["Chat cleared!"]);
        assert_eq!(contents(transcript.cleared(&cleared)), vec!["Chat cleared!"]);
    }

    #[test]
    fn it_starts_over_when_the_session_shrinks() {
        let snapshot = messages(&["Hello", "Hi", "Joke"]);
        let mut transcript = Transcript::default();
        transcript.updated(&snapshot);

        let shorter = messages(&["Chat cleared!", "Hi again"]);
        assert_eq!(
            contents(transcript.updated(&shorter)),
            vec!["Chat cleared!", "Hi again"]
        );
    }
}

mod help {
    use super::*;

    #[test]
    fn it_documents_every_command() {
        let text = help_text();
        for line in text.lines().filter(|line| return line.starts_with("- /")) {
            let command = line
                .trim_start_matches("- ")
                .split_whitespace()
                .next()
                .unwrap_or_default();
            assert!(
                SlashCommand::parse(command).is_some(),
                "{command} is not a known command"
            );
        }
    }
}

mod copy {
    use super::*;

    #[test]
    fn it_picks_the_last_message_by_default() {
        let snapshot = messages(&["Hello", "Hi"]);
        let message = message_at(&snapshot, None).map(|e| return e.content());

        assert_eq!(message, Some("Hi"));
    }

    #[test]
    fn it_picks_messages_by_position() {
        let snapshot = messages(&["Hello", "Hi"]);
        let message = message_at(&snapshot, Some(1)).map(|e| return e.content());

        assert_eq!(message, Some("Hello"));
    }

    #[test]
    fn it_rejects_position_zero() {
        let snapshot = messages(&["Hello", "Hi"]);
        assert!(message_at(&snapshot, Some(0)).is_none());
    }

    #[test]
    fn it_rejects_positions_past_the_end() {
        let snapshot = messages(&["Hello", "Hi"]);
        assert!(message_at(&snapshot, Some(3)).is_none());
    }
}
