use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::client::{Reply, VexClient};
use crate::config::Config;
use crate::page;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Busy,
    Reply,
    Error,
}

/// The one-line status area under the command input.
#[derive(Debug, Clone)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Info }
    }

    pub fn busy(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Busy }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Error }
    }

    pub fn from_reply(reply: &Reply) -> Self {
        Self {
            text: reply.text.clone(),
            kind: if reply.is_error { StatusKind::Error } else { StatusKind::Reply },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    You,
    Vex,
}

/// One entry of the session transcript shown in the console panel.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub is_error: bool,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub theme: Theme,
    pub input_mode: InputMode,

    // Command console state
    pub command_input: String,
    pub command_cursor: usize, // cursor position in command_input, in chars
    pub status: Status,
    pub busy: bool,
    pending: Option<JoinHandle<Reply>>,
    pub transcript: Vec<ChatMessage>,

    // Page chrome state
    pub scroll: u16,
    pub scroll_target: Option<u16>,
    pub active_section: usize,
    pub viewport_height: u16, // updated during render

    // Animation state
    pub animation_frame: u8, // 0-2 for the ellipsis animation

    pub client: VexClient,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            theme: config.default_theme(),
            input_mode: InputMode::Normal,

            command_input: String::new(),
            command_cursor: 0,
            status: Status::info("Type a command and press Enter."),
            busy: false,
            pending: None,
            transcript: Vec::new(),

            scroll: 0,
            scroll_target: None,
            active_section: 0,
            viewport_height: 0,

            animation_frame: 0,

            client: VexClient::new(&config.server_url()),
        }
    }

    // Command console --------------------------------------------------

    /// Validate and send the current input. While a request is in flight
    /// submission is disabled, so a second Enter does nothing.
    pub fn submit_command(&mut self) {
        if self.busy {
            return;
        }

        let command = self.command_input.trim().to_string();
        if command.is_empty() {
            self.status = Status::error("Please type a command.");
            return;
        }

        self.command_input.clear();
        self.command_cursor = 0;
        self.transcript.push(ChatMessage {
            role: ChatRole::You,
            content: command.clone(),
            is_error: false,
        });
        self.status = Status::busy("Thinking");
        self.busy = true;

        debug!(%command, "submitting command");
        let client = self.client.clone();
        self.pending = Some(tokio::spawn(async move {
            match client.send_command(&command).await {
                Ok(reply) => reply,
                Err(e) => Reply::error(format!("Network error: {e}")),
            }
        }));
    }

    /// Fire a launch request at the backend. Shares the single in-flight
    /// slot with command submission, so it is also gated by the busy flag.
    pub fn launch(&mut self) {
        if self.busy {
            return;
        }

        self.status = Status::busy("Launching");
        self.busy = true;

        let client = self.client.clone();
        self.pending = Some(tokio::spawn(async move {
            match client.launch().await {
                Ok(reply) => reply,
                Err(e) => Reply::error(format!("Launch error: {e}")),
            }
        }));
    }

    /// Check whether the in-flight request settled and surface its result.
    /// The busy flag clears on every path out of here, including a panicked
    /// task, so the input is never left disabled.
    pub async fn poll_pending(&mut self) {
        let finished = self.pending.as_ref().is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.pending.take() {
            let reply = match task.await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("request task failed: {e}");
                    Reply::error(format!("Network error: {e}"))
                }
            };

            self.busy = false;
            self.status = Status::from_reply(&reply);
            self.transcript.push(ChatMessage {
                role: ChatRole::Vex,
                content: reply.text,
                is_error: reply.is_error,
            });
        }
    }

    /// Scroll the Console section into view and move focus into the input.
    pub fn focus_command_input(&mut self) {
        self.scroll_to_section(page::console_index());
        self.input_mode = InputMode::Editing;
        self.command_cursor = self.command_input.chars().count();
    }

    // Page chrome --------------------------------------------------------

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    /// Activate a nav link: start a smooth scroll toward its section,
    /// offset upward so the section title stays clear of the nav bar.
    pub fn activate_nav(&mut self, idx: usize) {
        if idx < page::sections().len() {
            self.scroll_to_section(idx);
        }
    }

    pub fn next_nav(&mut self) {
        let next = (self.active_section + 1) % page::sections().len();
        self.activate_nav(next);
    }

    pub fn prev_nav(&mut self) {
        let len = page::sections().len();
        let prev = (self.active_section + len - 1) % len;
        self.activate_nav(prev);
    }

    fn scroll_to_section(&mut self, idx: usize) {
        let start = page::section_starts()[idx];
        self.scroll_target = Some(start.saturating_sub(page::NAV_OFFSET).min(self.max_scroll()));
    }

    /// Manual scrolling cancels any smooth-scroll in progress.
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll_target = None;
        let next = (self.scroll as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll = next as u16;
        self.update_active_section();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_target = None;
        self.scroll = 0;
        self.update_active_section();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_target = None;
        self.scroll = self.max_scroll();
        self.update_active_section();
    }

    pub fn max_scroll(&self) -> u16 {
        page::total_lines().saturating_sub(self.viewport_height)
    }

    /// Scroll-spy: mark the section whose line range contains the viewport
    /// reference point. Recomputed after every scroll change, unthrottled.
    pub fn update_active_section(&mut self) {
        self.active_section = page::section_at(self.scroll.saturating_add(page::SPY_MARGIN));
    }

    /// Timer tick: advance the thinking animation and step any smooth
    /// scroll a fraction of the remaining distance (at least one line).
    pub fn tick(&mut self) {
        if self.busy {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }

        if let Some(target) = self.scroll_target {
            let target = target.min(self.max_scroll());
            let current = self.scroll as i32;
            let remaining = target as i32 - current;

            if remaining == 0 {
                self.scroll_target = None;
            } else {
                let step = (remaining.abs() / 3).max(1) * remaining.signum();
                self.scroll = (current + step) as u16;
                self.update_active_section();
            }
        }
    }

    pub fn thinking_text(&self) -> String {
        format!("{}{}", self.status.text, ".".repeat(self.animation_frame as usize + 1))
    }
}
