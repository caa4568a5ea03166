//! The chat widget controller.
//!
//! [`ChatController`] is owned by a single event loop.  A submission runs in
//! three steps:
//!
//! 1. [`begin_submit`](ChatController::begin_submit) appends the user
//!    message, clears the input, shows the pending indicator and hands back
//!    the request to send.
//! 2. The host sends it (the only suspension point) while it keeps feeding
//!    input events to the controller.
//! 3. [`finish_submit`](ChatController::finish_submit) clears the pending
//!    indicator and renders the reply or the fixed error text.
//!
//! [`on_submit_requested`](ChatController::on_submit_requested) chains the
//! three for hosts that do not need to interleave other events.
//!
//! Only one request may be in flight: the send action stays disabled from
//! step 1 until step 3 completes.

use prism_models::{
    ChatReply, ChatRequest, InputState, Message, PendingId, Transcript, CONNECTION_ERROR_TEXT,
};
use prism_sdk::{ChatClient, SdkError};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::event::WidgetEvent;
use crate::phase::RequestPhase;

/// Key presses the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKey {
    /// A printable character typed into the input box.
    Char(char),
    /// Delete the last character.
    Backspace,
    /// Submit, if the send action is enabled.
    Enter,
}

/// A request handed to the host by [`ChatController::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// Pending indicator to clear once the request resolves.
    pub pending: PendingId,
    /// Body to post to the backend.
    pub request: ChatRequest,
}

/// Controller of one chat widget.
pub struct ChatController {
    client: ChatClient,
    transcript: Transcript,
    input: InputState,
    phase: RequestPhase,
    in_flight: Option<PendingId>,
    send_enabled: bool,
    subscribers: Vec<mpsc::UnboundedSender<WidgetEvent>>,
}

impl ChatController {
    /// Controller talking to the backend behind `client`, with an empty transcript.
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            transcript: Transcript::new(),
            input: InputState::default(),
            phase: RequestPhase::Idle,
            in_flight: None,
            send_enabled: false,
            subscribers: Vec::new(),
        }
    }

    /// Register a view.  Every subsequent change is published to it.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<WidgetEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// The input box now holds `text`.
    pub fn on_input_changed(&mut self, text: impl Into<String>) {
        self.input.set(text);
        self.refresh_send_enabled();
    }

    /// Apply a key press.
    ///
    /// Returns the request to send when Enter triggered a submission.
    pub fn on_key(&mut self, key: WidgetKey) -> Option<OutgoingRequest> {
        match key {
            WidgetKey::Char(c) => {
                self.input.push(c);
                self.refresh_send_enabled();
                None
            }
            WidgetKey::Backspace => {
                self.input.pop();
                self.refresh_send_enabled();
                None
            }
            WidgetKey::Enter if self.is_send_enabled() => self.begin_submit(),
            WidgetKey::Enter => None,
        }
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Submit the current input and wait for the backend.
    ///
    /// Returns the terminal phase of the cycle ([`RequestPhase::Rendered`]
    /// or [`RequestPhase::Failed`]), or `None` when there was nothing to
    /// submit.  Backend failures never escape: they become a bot message.
    pub async fn on_submit_requested(&mut self) -> Option<RequestPhase> {
        let outgoing = self.begin_submit()?;
        let outcome = self.client.send(&outgoing.request).await;
        self.finish_submit(outgoing.pending, outcome)
    }

    /// First half of a submission, up to the point where the request must
    /// be sent.
    ///
    /// A no-op returning `None` when the trimmed input is blank or a
    /// request is already in flight.
    pub fn begin_submit(&mut self) -> Option<OutgoingRequest> {
        if !self.is_send_enabled() {
            debug!(phase = %self.phase, "submit ignored");
            return None;
        }

        let text = self.input.trimmed().to_string();
        self.set_phase(RequestPhase::Submitted);

        self.append(Message::user(text.clone()));

        self.input.clear();
        self.emit(WidgetEvent::InputCleared);
        self.refresh_send_enabled();

        let pending = self.transcript.push_pending();
        self.in_flight = Some(pending);
        self.emit(WidgetEvent::PendingShown(pending));

        self.set_phase(RequestPhase::AwaitingResponse);
        info!(%pending, "chat request issued");

        Some(OutgoingRequest {
            pending,
            request: ChatRequest::new(text),
        })
    }

    /// Second half of a submission: render the outcome of the request that
    /// showed `pending`.
    ///
    /// Outcomes for anything but the in-flight request are ignored.
    pub fn finish_submit(
        &mut self,
        pending: PendingId,
        outcome: Result<ChatReply, SdkError>,
    ) -> Option<RequestPhase> {
        if self.in_flight != Some(pending) {
            warn!(%pending, "ignoring outcome of a request that is not in flight");
            return None;
        }
        self.in_flight = None;

        // Both outcomes clear the indicator before rendering.
        self.clear_pending(pending);

        let terminal = match outcome {
            Ok(reply) => {
                self.append(Message::bot(reply.display_text()));
                RequestPhase::Rendered
            }
            Err(e) => {
                error!(error = %e, status = ?e.status(), "chat request failed");
                self.append(Message::bot(CONNECTION_ERROR_TEXT));
                RequestPhase::Failed
            }
        };
        self.set_phase(terminal);

        self.set_phase(RequestPhase::Idle);
        self.refresh_send_enabled();
        Some(terminal)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The display list.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The input box.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Current step of the request cycle.
    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// `true` iff the trimmed input is non-blank and no request is in flight.
    pub fn is_send_enabled(&self) -> bool {
        self.input.is_send_enabled() && !self.phase.is_busy()
    }

    /// The backend client, for hosts that send requests themselves.
    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn append(&mut self, message: Message) {
        self.transcript.push_message(message.clone());
        self.emit(WidgetEvent::MessageAppended(message));
    }

    fn clear_pending(&mut self, pending: PendingId) {
        if self.transcript.remove_pending(pending) {
            self.emit(WidgetEvent::PendingCleared(pending));
        }
    }

    fn set_phase(&mut self, phase: RequestPhase) {
        if self.phase != phase {
            debug!(from = %self.phase, to = %phase, "phase change");
            self.phase = phase;
            self.emit(WidgetEvent::PhaseChanged(phase));
        }
    }

    fn refresh_send_enabled(&mut self) {
        let enabled = self.is_send_enabled();
        if enabled != self.send_enabled {
            self.send_enabled = enabled;
            self.emit(WidgetEvent::SendEnabledChanged(enabled));
        }
    }

    fn emit(&mut self, event: WidgetEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
