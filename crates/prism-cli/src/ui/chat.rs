use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use prism_chat::{ChatController, OutgoingRequest, RequestPhase, WidgetEvent, WidgetKey};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::app_state::{AppController, ChatLine};
use crate::tui::Action;

pub struct ChatApp {
    controller: ChatController,
    events: UnboundedReceiver<WidgetEvent>,
    tx: UnboundedSender<Action>,
    should_quit: bool,

    // UI State
    tick: u64,
    follow_tail: bool,
    scroll: u16,
    status: String,
}

impl ChatApp {
    pub fn new(mut controller: ChatController, tx: UnboundedSender<Action>) -> Self {
        let events = controller.subscribe();
        let status = format!("backend: {}", controller.client().endpoint());
        Self {
            controller,
            events,
            tx,
            should_quit: false,
            tick: 0,
            follow_tail: true,
            scroll: 0,
            status,
        }
    }

    /// Run the round-trip on its own task so the event loop keeps drawing.
    fn dispatch(&self, outgoing: OutgoingRequest) {
        let client = self.controller.client().clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.send(&outgoing.request).await;
            let _ = tx.send(Action::ReplyReceived(outgoing.pending, outcome));
        });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        // Shortcuts, not text.
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return;
        }

        let widget_key = match key.code {
            KeyCode::Char(c) => WidgetKey::Char(c),
            KeyCode::Backspace => WidgetKey::Backspace,
            KeyCode::Enter => WidgetKey::Enter,
            KeyCode::Up => {
                self.follow_tail = false;
                self.scroll = self.scroll.saturating_sub(1);
                return;
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                return;
            }
            KeyCode::End => {
                self.follow_tail = true;
                return;
            }
            _ => return,
        };

        if let Some(outgoing) = self.controller.on_key(widget_key) {
            self.dispatch(outgoing);
        }
    }

    /// Apply what the controller published since the last frame.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "widget event");
            match event {
                WidgetEvent::MessageAppended(_) => self.follow_tail = true,
                WidgetEvent::PhaseChanged(RequestPhase::AwaitingResponse) => {
                    self.status = "waiting for the backend...".to_string();
                }
                WidgetEvent::PhaseChanged(RequestPhase::Rendered) => {
                    self.status = "reply received".to_string();
                }
                WidgetEvent::PhaseChanged(RequestPhase::Failed) => {
                    self.status = "request failed (see log)".to_string();
                }
                _ => {}
            }
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        self.controller
            .transcript()
            .entries()
            .iter()
            .map(|entry| {
                let line = ChatLine::from_entry(entry, self.tick);
                let style = if line.is_pending {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
                } else if line.is_user {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Line::from(vec![
                    Span::raw(format!("{:>8} [{}]: ", line.timestamp, line.label)),
                    Span::styled(line.content, style),
                ])
            })
            .collect()
    }
}

impl AppController for ChatApp {
    fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::ReplyReceived(pending, outcome) => {
                self.controller.finish_submit(pending, outcome);
            }
            Action::Tick => self.tick = self.tick.wrapping_add(1),
            Action::Resize(_, _) => {}
        }
        self.drain_events();
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        // Top: Transcript
        let lines = self.lines();
        let visible = chunks[0].height.saturating_sub(2);
        let max_scroll = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_sub(visible);
        if self.follow_tail || self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
        let log = Paragraph::new(lines)
            .scroll((self.scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("PRISM Assistant"));
        f.render_widget(log, chunks[0]);

        // Middle: Input
        let (title, title_style) = if self.controller.is_send_enabled() {
            ("Message (Enter to send)", Style::default().fg(Color::Yellow))
        } else {
            ("Message", Style::default().fg(Color::DarkGray))
        };
        let input = Paragraph::new(self.controller.input().text()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, title_style)),
        );
        f.render_widget(input, chunks[1]);

        // Bottom: Status
        let status = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", self.controller.phase()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.status.as_str()),
            Span::styled("  Esc quit", Style::default().fg(Color::DarkGray)),
        ]));
        f.render_widget(status, chunks[2]);
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
