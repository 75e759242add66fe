#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::domain::models::suggestion;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::models::ASSISTANT_NAME;
use crate::domain::models::SUGGESTIONS;
use crate::domain::services::clipboard::ClipboardService;
use crate::domain::services::ConversationController;
use crate::domain::services::VoiceService;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /suggestions (/s) - Lists the suggested questions.
- /suggest (/sg) [SUGGESTION_NUMBER] - Sends a suggested question from /suggestions.
- /copy (/c) [MESSAGE_NUMBER?] - Copies a message to your clipboard. Defaults to the last message.
- /voice (/v) - Starts or stops voice input, where the platform supports it.
- /cancel (/x) - Stops waiting for the reply in progress.
- /clear (/cl) - Clears the chat history.
- /quit /exit (/q) - Exit JnanaMitra.
- /help (/h) - Provides this help menu.
        "#;

    return text.trim().to_string();
}

/// Tracks how much of the session has been written to the terminal, so each
/// update only prints the messages that arrived since the last one.
#[derive(Default)]
pub struct Transcript {
    printed: usize,
}

impl Transcript {
    pub fn updated<'a>(&mut self, snapshot: &'a [Message]) -> &'a [Message] {
        // A shorter session means it was reset underneath us.
        if self.printed > snapshot.len() {
            self.printed = 0;
        }

        let start = self.printed;
        self.printed = snapshot.len();
        return &snapshot[start..];
    }

    pub fn cleared<'a>(&mut self, snapshot: &'a [Message]) -> &'a [Message] {
        self.printed = 0;
        return self.updated(snapshot);
    }
}

fn print_message(message: &Message) {
    let mut lines = message.as_string_lines().into_iter();
    if let Some(header) = lines.next() {
        let header = match message.role() {
            Role::User => Paint::cyan(header).bold(),
            Role::Assistant => Paint::magenta(header).bold(),
        };
        println!("{header}");
    }

    for line in lines {
        if message.message_type() == MessageType::Error {
            println!("{}", Paint::red(line));
        } else {
            println!("{line}");
        }
    }
    println!();
}

/// Picks the message `/copy` refers to: the 1-based `number`, or the last
/// message when no number was given.
pub fn message_at(snapshot: &[Message], number: Option<usize>) -> Option<&Message> {
    return match number {
        Some(0) => None,
        Some(number) => snapshot.get(number - 1),
        None => snapshot.last(),
    };
}

fn print_notice(text: &str) {
    println!("{}", Paint::new(text).dimmed());
}

pub struct Repl {
    controller: Arc<ConversationController>,
    voice: VoiceService,
    tx: mpsc::UnboundedSender<Event>,
    transcript: Transcript,
}

impl Repl {
    pub fn new(
        controller: Arc<ConversationController>,
        voice: VoiceService,
        tx: mpsc::UnboundedSender<Event>,
    ) -> Repl {
        return Repl {
            controller,
            voice,
            tx,
            transcript: Transcript::default(),
        };
    }

    fn submit(&self, text: &str) {
        if self.controller.request_state().is_pending() {
            print_notice("Still waiting on the last reply. Use /cancel to stop waiting.");
            return;
        }

        let controller = self.controller.clone();
        let text = text.to_string();
        tokio::spawn(async move {
            controller.submit(&text).await;
        });
    }

    fn copy(&self, command: &SlashCommand) {
        let snapshot = self.controller.snapshot();
        let res = match message_at(&snapshot, command.number_arg()) {
            Some(message) => ClipboardService::copy_message(message),
            None => {
                print_notice("There is no message with that number.");
                return;
            }
        };

        match res {
            Ok(()) => print_notice("Copied to clipboard."),
            Err(err) => println!("{}", Paint::red(format!("Failed to copy: {err}"))),
        }
    }

    fn toggle_voice(&mut self) {
        match self.voice.toggle(&self.tx) {
            Ok(true) => print_notice("Listening... Send /voice again to stop."),
            Ok(false) => print_notice("Stopped listening."),
            Err(err) => println!("{}", Paint::red(err.to_string())),
        }
    }

    fn print_voice_notice(&self) {
        if !self.voice.available() {
            print_notice("Voice input is not available on this platform, so /voice is disabled.");
        }
    }

    /// Returns false once the user asks to leave.
    fn handle_line(&mut self, line: &str) -> bool {
        let command = match SlashCommand::parse(line) {
            Some(command) => command,
            None => {
                self.submit(line);
                return true;
            }
        };

        if command.is_quit() {
            return false;
        }

        if command.is_clear() {
            self.controller.clear();
        } else if command.is_cancel() {
            if self.controller.cancel() {
                print_notice("Stopped waiting for the reply.");
            } else {
                print_notice("There is no reply in progress.");
            }
        } else if command.is_suggestions() {
            for (idx, text) in SUGGESTIONS.iter().enumerate() {
                println!("({}) {text}", idx + 1);
            }
        } else if command.is_suggest() {
            match command.number_arg().and_then(suggestion) {
                Some(text) => self.submit(text),
                None => print_notice("Pick a suggestion number from /suggestions."),
            }
        } else if command.is_copy() {
            self.copy(&command);
        } else if command.is_voice() {
            self.toggle_voice();
        } else if command.is_help() {
            println!("{}", help_text());
            self.print_voice_notice();
        }

        return true;
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::SessionUpdated() => {
                let snapshot = self.controller.snapshot();
                self.transcript
                    .updated(&snapshot)
                    .iter()
                    .for_each(print_message);
            }
            Event::SessionCleared() => {
                let snapshot = self.controller.snapshot();
                println!();
                self.transcript
                    .cleared(&snapshot)
                    .iter()
                    .for_each(print_message);
            }
            Event::TypingIndicator(true) => {
                print_notice(&format!("{ASSISTANT_NAME} is typing..."));
            }
            Event::TypingIndicator(false) => (),
            Event::VoiceTranscript(transcript) => {
                print_notice(&format!("Heard: {transcript}"));
                self.submit(&transcript);
            }
            Event::VoiceFailed(detail) => {
                self.controller.voice_failed(&detail);
            }
        }
    }

    pub async fn start(mut self, mut rx: mpsc::UnboundedReceiver<Event>) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let snapshot = self.controller.snapshot();
        self.transcript
            .updated(&snapshot)
            .iter()
            .for_each(print_message);
        print_notice("Type a message, or /help for commands.");
        self.print_voice_notice();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = match line? {
                        Some(line) => line,
                        None => break,
                    };
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Some(event) = rx.recv() => {
                    self.handle_event(event);
                }
            }
        }

        self.voice.stop();
        return Ok(());
    }
}
