#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;

use super::SessionStore;
use crate::domain::models::media;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::RequestState;
use crate::domain::models::Role;

pub const GREETING_TEXT: &str =
    "Hello! I'm VIGNAN JnanaMitra, your AI assistant. How can I help you today? 😊";
pub const CLEARED_TEXT: &str = "Chat cleared! How can I assist you now? 😊";
pub const VOICE_FAILED_TEXT: &str = "Speech recognition failed. Please try typing instead.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Empty or whitespace only text.
    EmptyInput,
    /// Another submission is still waiting on the backend.
    RequestPending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The exchange settled, and the reply (or error message) was appended.
    Completed(Message),
    /// The chat was cleared or the request cancelled before the reply arrived.
    Discarded,
    Rejected(Rejection),
}

fn greeting(text: &str) -> Message {
    return Message::new_with_media(text, Some(media::GREETING_IMAGE_URL.to_string()));
}

fn error_reply(detail: &str) -> Message {
    return Message::new_with_type(
        Role::Assistant,
        MessageType::Error,
        &format!("Error: {detail} 😓"),
    );
}

struct ConversationState {
    store: SessionStore,
    request_state: RequestState,
    /// Bumped by clear and cancel so late replies can be recognised.
    generation: u64,
}

/// Releases the in-flight guard if a submission is dropped before the backend
/// settles, so a stuck `Pending` can never block the chat.
struct PendingRequest<'a> {
    controller: &'a ConversationController,
    generation: u64,
    settled: bool,
}

impl PendingRequest<'_> {
    fn settle(mut self, reply: Message) -> Submission {
        self.settled = true;
        return self.controller.settle(self.generation, reply);
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        if self.controller.release(self.generation) {
            tracing::warn!(
                generation = self.generation,
                "Submission dropped before the backend responded"
            );
            self.controller.notify(Event::TypingIndicator(false));
        }
    }
}

pub struct ConversationController {
    backend: BackendBox,
    state: Mutex<ConversationState>,
    tx: mpsc::UnboundedSender<Event>,
    typing_delay: Duration,
}

impl ConversationController {
    /// `typing_delay` is the minimum time the typing indicator stays on,
    /// regardless of how fast the backend responds.
    pub fn new(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        typing_delay: Duration,
    ) -> ConversationController {
        return ConversationController {
            backend,
            state: Mutex::new(ConversationState {
                store: SessionStore::new(greeting(GREETING_TEXT)),
                request_state: RequestState::Idle,
                generation: 0,
            }),
            tx,
            typing_delay,
        };
    }

    pub fn snapshot(&self) -> Vec<Message> {
        return self.lock().store.snapshot().to_vec();
    }

    pub fn request_state(&self) -> RequestState {
        return self.lock().request_state;
    }

    pub fn is_typing(&self) -> bool {
        return self.request_state().is_pending();
    }

    /// Runs one full request/response cycle. Never fails: backend errors are
    /// appended to the chat as error messages.
    pub async fn submit(&self, raw_text: &str) -> Submission {
        let (history, generation) = match self.begin(raw_text) {
            Ok(res) => res,
            Err(rejection) => {
                tracing::debug!(rejection = ?rejection, "Submission ignored");
                return Submission::Rejected(rejection);
            }
        };

        let pending = PendingRequest {
            controller: self,
            generation,
            settled: false,
        };
        self.notify(Event::SessionUpdated());
        self.notify(Event::TypingIndicator(true));

        let prompt = BackendPrompt::new(history, raw_text.to_string());
        let completion = self.backend.get_completion(prompt);
        let res = if self.typing_delay.is_zero() {
            completion.await
        } else {
            let (res, _) = tokio::join!(completion, time::sleep(self.typing_delay));
            res
        };

        let reply = self.reply_for(raw_text, res);
        return pending.settle(reply);
    }

    /// Resets the chat to a fresh greeting. A request still in flight is
    /// abandoned, and its reply will be dropped.
    pub fn clear(&self) {
        let was_pending = {
            let mut state = self.lock();
            let was_pending = state.request_state.is_pending();
            state.store.reset(greeting(CLEARED_TEXT));
            state.request_state = RequestState::Idle;
            state.generation += 1;
            was_pending
        };

        tracing::debug!(was_pending, "Chat cleared");
        self.notify(Event::SessionCleared());
        if was_pending {
            self.notify(Event::TypingIndicator(false));
        }
    }

    /// Abandons the in-flight request, if any. No reply is appended for it.
    pub fn cancel(&self) -> bool {
        {
            let mut state = self.lock();
            if !state.request_state.is_pending() {
                return false;
            }
            state.request_state = RequestState::Idle;
            state.generation += 1;
        }

        tracing::debug!("Request cancelled");
        self.notify(Event::TypingIndicator(false));
        return true;
    }

    pub fn voice_failed(&self, detail: &str) {
        tracing::warn!(detail, "Speech recognition failed");

        let message = Message::new_with_type(Role::Assistant, MessageType::Error, VOICE_FAILED_TEXT);
        if let Err(err) = self.lock().store.append(message) {
            tracing::error!(error = ?err, "Failed to append voice failure message");
            return;
        }

        self.notify(Event::SessionUpdated());
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        return self.state.lock().unwrap_or_else(PoisonError::into_inner);
    }

    fn notify(&self, event: Event) {
        if let Err(err) = self.tx.send(event) {
            tracing::debug!(error = ?err, "No listener for conversation events");
        }
    }

    /// Appends the user message and flips the guard to `Pending`. Returns the
    /// history prior to the new message along with the current generation.
    fn begin(&self, raw_text: &str) -> Result<(Vec<Message>, u64), Rejection> {
        if raw_text.trim().is_empty() {
            return Err(Rejection::EmptyInput);
        }

        let mut state = self.lock();
        if state.request_state.is_pending() {
            return Err(Rejection::RequestPending);
        }

        let history = state.store.snapshot().to_vec();
        if let Err(err) = state.store.append(Message::new(Role::User, raw_text)) {
            tracing::warn!(error = ?err, "Failed to append user message");
            return Err(Rejection::EmptyInput);
        }
        state.request_state = RequestState::Pending;

        tracing::debug!(
            generation = state.generation,
            history = history.len(),
            "Submission accepted"
        );

        return Ok((history, state.generation));
    }

    fn reply_for(&self, raw_text: &str, res: Result<BackendResponse>) -> Message {
        let response = match res {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(
                    error = ?err,
                    backend = %self.backend.name(),
                    "Chat completion failed"
                );
                return error_reply(&err.to_string());
            }
        };

        let media = media::media_for(raw_text);
        if response.message.is_empty() && media.is_none() {
            tracing::warn!(backend = %self.backend.name(), "Backend returned an empty reply");
            return error_reply("The assistant returned an empty reply");
        }

        return Message::new_with_media(&response.message, media);
    }

    fn settle(&self, generation: u64, reply: Message) -> Submission {
        {
            let mut state = self.lock();
            if state.generation != generation {
                tracing::debug!(
                    generation,
                    current = state.generation,
                    "Dropping reply for an abandoned request"
                );
                return Submission::Discarded;
            }

            state.request_state = RequestState::Idle;
            if let Err(err) = state.store.append(reply.clone()) {
                tracing::error!(error = ?err, "Failed to append reply");
            }
        }

        self.notify(Event::SessionUpdated());
        self.notify(Event::TypingIndicator(false));
        return Submission::Completed(reply);
    }

    /// Returns true when the guard belonged to `generation` and was reset.
    fn release(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.generation != generation || !state.request_state.is_pending() {
            return false;
        }

        state.request_state = RequestState::Idle;
        return true;
    }
}
