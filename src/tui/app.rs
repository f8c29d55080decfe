//! Application state and event loop.
//!
//! The dataset and gateway arrive as shared read-only handles; every view
//! borrows them. A generate action spawns the gateway call on a task and the
//! result comes back over a channel, so the loop keeps drawing the busy
//! indicator while a request is in flight. While one request is pending all
//! generate triggers are ignored — no cancellation, no queuing.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::widgets::Widget;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::data::analytics::{contacts_for_account, opportunities_for_account};
use crate::data::Dataset;
use crate::gateway::CompletionGateway;
use crate::prompts;
use crate::tui::event::{key_to_action, Action};
use crate::tui::theme::Theme;
use crate::tui::views::assistant::{AssistantState, AssistantView};
use crate::tui::views::dashboard::{DashboardState, DashboardView};
use crate::tui::views::meeting::{MeetingState, MeetingView};
use crate::tui::views::outreach::{OutreachState, OutreachView};

const SPINNER: [char; 4] = ['⠋', '⠙', '⠸', '⠴'];

/// The four screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Aggregate metrics, stage chart, on-demand insight.
    #[default]
    Dashboard,
    /// Free-form Q&A grounded in the opportunity slice.
    Assistant,
    /// Per-account meeting brief.
    Meeting,
    /// Templated outreach email drafting.
    Outreach,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Assistant, Tab::Meeting, Tab::Outreach];

    fn name(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Assistant => "AI Assistant",
            Tab::Meeting => "Meeting Prep",
            Tab::Outreach => "Outreach",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Assistant => 1,
            Tab::Meeting => 2,
            Tab::Outreach => 3,
        }
    }

    fn from_index(index: usize) -> Self {
        Tab::ALL.get(index).copied().unwrap_or_default()
    }
}

/// Which text field currently receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Command keys active.
    #[default]
    Normal,
    /// Typing the assistant question.
    EditQuestion,
    /// Typing the outreach purpose.
    EditPurpose,
    /// Editing the generated outreach email.
    EditEmail,
}

/// A completed gateway call, delivered back to the event loop.
#[derive(Debug)]
pub struct Reply {
    tab: Tab,
    text: String,
}

/// Main application state.
pub struct App {
    dataset: Arc<Dataset>,
    gateway: Arc<dyn CompletionGateway>,
    reply_tx: mpsc::UnboundedSender<Reply>,

    tab: Tab,
    input_mode: InputMode,
    should_quit: bool,
    /// The tab whose request is in flight, if any. Set on trigger, cleared
    /// when the reply arrives; all triggers are ignored while set.
    pending: Option<Tab>,
    spinner_frame: usize,

    dashboard: DashboardState,
    assistant: AssistantState,
    meeting: MeetingState,
    outreach: OutreachState,
}

impl App {
    /// Build the app over the already-loaded dataset and gateway handle.
    pub fn new(
        dataset: Arc<Dataset>,
        gateway: Arc<dyn CompletionGateway>,
        reply_tx: mpsc::UnboundedSender<Reply>,
    ) -> Self {
        let dashboard = DashboardState::new(&dataset);
        let meeting = MeetingState::new(&dataset);
        let outreach = OutreachState::new(&dataset);
        Self {
            dataset,
            gateway,
            reply_tx,
            tab: Tab::Dashboard,
            input_mode: InputMode::Normal,
            should_quit: false,
            pending: None,
            spinner_frame: 0,
            dashboard,
            assistant: AssistantState::default(),
            meeting,
            outreach,
        }
    }

    fn busy(&self) -> bool {
        self.pending.is_some()
    }

    fn spinner(&self) -> char {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    /// Apply one UI action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwitchTab(index) => {
                self.tab = Tab::from_index(index);
                self.input_mode = InputMode::Normal;
            }
            Action::NextTab => {
                self.tab = Tab::from_index((self.tab.index() + 1) % Tab::ALL.len());
                self.input_mode = InputMode::Normal;
            }
            Action::Up => self.navigate(-1),
            Action::Down => self.navigate(1),
            Action::Left => {
                if self.tab == Tab::Outreach {
                    self.outreach.focus_prev();
                }
            }
            Action::Right => {
                if self.tab == Tab::Outreach {
                    self.outreach.focus_next();
                }
            }
            Action::ScrollUp => self.scroll(-3),
            Action::ScrollDown => self.scroll(3),
            Action::StartEdit => match self.tab {
                Tab::Assistant => self.input_mode = InputMode::EditQuestion,
                Tab::Outreach => self.input_mode = InputMode::EditPurpose,
                _ => {}
            },
            Action::EditOutput => {
                if self.tab == Tab::Outreach && self.outreach.email.is_some() {
                    self.input_mode = InputMode::EditEmail;
                }
            }
            Action::Generate => self.trigger_generate(),
            Action::Back => {
                if self.input_mode != InputMode::Normal {
                    self.input_mode = InputMode::Normal;
                } else if self.tab != Tab::Dashboard {
                    self.tab = Tab::Dashboard;
                }
            }
            Action::Submit => match self.input_mode {
                InputMode::EditQuestion => {
                    self.input_mode = InputMode::Normal;
                    self.trigger_generate();
                }
                InputMode::EditPurpose => self.input_mode = InputMode::Normal,
                InputMode::EditEmail => {
                    if let Some(email) = self.outreach.email.as_mut() {
                        email.push('\n');
                    }
                }
                InputMode::Normal => {}
            },
            Action::Input(c) => match self.input_mode {
                InputMode::EditQuestion => self.assistant.question.push(c),
                InputMode::EditPurpose => self.outreach.purpose.push(c),
                InputMode::EditEmail => {
                    if let Some(email) = self.outreach.email.as_mut() {
                        email.push(c);
                    }
                }
                InputMode::Normal => {}
            },
            Action::DeleteChar => match self.input_mode {
                InputMode::EditQuestion => {
                    self.assistant.question.pop();
                }
                InputMode::EditPurpose => {
                    self.outreach.purpose.pop();
                }
                InputMode::EditEmail => {
                    if let Some(email) = self.outreach.email.as_mut() {
                        email.pop();
                    }
                }
                InputMode::Normal => {}
            },
            Action::None => {}
        }
    }

    fn navigate(&mut self, delta: i32) {
        match self.tab {
            Tab::Meeting => {
                if delta < 0 {
                    self.meeting.select_prev();
                } else {
                    self.meeting.select_next();
                }
            }
            Tab::Outreach => {
                let account_changed = if delta < 0 {
                    self.outreach.select_prev()
                } else {
                    self.outreach.select_next()
                };
                if account_changed {
                    self.outreach.refresh_contacts(&self.dataset);
                }
            }
            _ => self.scroll(delta),
        }
    }

    fn scroll(&mut self, delta: i32) {
        let pane = match self.tab {
            Tab::Dashboard => &mut self.dashboard.scroll,
            Tab::Assistant => &mut self.assistant.scroll,
            Tab::Meeting => &mut self.meeting.scroll,
            Tab::Outreach => &mut self.outreach.scroll,
        };
        *pane = pane.saturating_add_signed(i16::try_from(delta).unwrap_or(0));
    }

    /// Start a generation for the current tab, unless one is already
    /// pending or the tab's inputs do not gate through.
    fn trigger_generate(&mut self) {
        if self.busy() {
            debug!("generation already pending, ignoring trigger");
            return;
        }
        let Some(prompt) = self.build_prompt() else {
            return;
        };

        let tab = self.tab;
        self.pending = Some(tab);
        let gateway = Arc::clone(&self.gateway);
        let tx = self.reply_tx.clone();
        info!(tab = tab.name(), "generation requested");
        tokio::spawn(async move {
            let text = gateway.ask(&prompt).await;
            // The loop may already be gone on shutdown; nothing to do then.
            let _ = tx.send(Reply { tab, text });
        });
    }

    /// Build the current tab's prompt, or `None` when its inputs are not
    /// ready (empty question/purpose, no selectable account).
    fn build_prompt(&self) -> Option<String> {
        match self.tab {
            Tab::Dashboard => Some(prompts::pipeline_insights(&self.dashboard.stages)),
            Tab::Assistant => {
                // Non-emptiness gates on the trimmed value, but the prompt
                // embeds the raw text exactly as typed.
                if self.assistant.question.trim().is_empty() {
                    return None;
                }
                Some(prompts::assistant_answer(
                    &self.dataset.opportunities,
                    &self.assistant.question,
                ))
            }
            Tab::Meeting => {
                let account = self.meeting.selected_account()?;
                let opps = opportunities_for_account(&self.dataset.opportunities, account);
                let contacts = contacts_for_account(&self.dataset.contacts, account);
                Some(prompts::meeting_brief(account, &opps, &contacts))
            }
            Tab::Outreach => {
                if self.outreach.purpose.trim().is_empty() {
                    return None;
                }
                let account = self.outreach.selected_account()?;
                Some(prompts::outreach_email(
                    self.outreach.selected_tone(),
                    self.outreach.selected_contact(),
                    account,
                    &self.outreach.purpose,
                ))
            }
        }
    }

    /// Store a finished generation in its tab's output pane.
    pub fn apply_reply(&mut self, reply: Reply) {
        self.pending = None;
        match reply.tab {
            Tab::Dashboard => {
                self.dashboard.insight = Some(reply.text);
                self.dashboard.scroll = 0;
            }
            Tab::Assistant => {
                self.assistant.answer = Some(reply.text);
                self.assistant.scroll = 0;
            }
            Tab::Meeting => {
                self.meeting.brief = Some(reply.text);
                self.meeting.scroll = 0;
            }
            Tab::Outreach => {
                self.outreach.email = Some(reply.text);
                self.outreach.scroll = 0;
            }
        }
    }
}

/// Run the dashboard until the user quits.
///
/// # Errors
///
/// Returns an error when the terminal cannot be initialised or drawn to.
pub async fn run(dataset: Arc<Dataset>, gateway: Arc<dyn CompletionGateway>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    let mut app = App::new(dataset, gateway, reply_tx);

    // Terminal input is blocking; a dedicated task forwards events over a
    // channel so the select loop never contends with the poll timeout. The
    // task exits once the receiver is dropped.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || loop {
        if event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if let Ok(ev) = event::read() {
                if input_tx.send(ev).is_err() {
                    return;
                }
            }
        } else if input_tx.is_closed() {
            return;
        }
    });

    let mut tick = interval(Duration::from_millis(120));

    loop {
        terminal.draw(|f| {
            render_app(&app, f.area(), f.buffer_mut());
        })?;

        tokio::select! {
            _ = tick.tick() => {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            Some(reply) = reply_rx.recv() => {
                app.apply_reply(reply);
            }
            Some(ev) = input_rx.recv() => {
                if let CrosstermEvent::Key(key) = ev {
                    if key.kind == KeyEventKind::Press {
                        let editing = app.input_mode != InputMode::Normal;
                        app.handle_action(key_to_action(key, editing));
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

/// Render the whole application frame.
fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header with tabs
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Footer with keybindings
        ])
        .split(area);

    render_header(app, chunks[0], buf);

    let busy = app.pending == Some(app.tab);
    match app.tab {
        Tab::Dashboard => {
            DashboardView::new(&app.dashboard, busy, app.spinner()).render(chunks[1], buf);
        }
        Tab::Assistant => AssistantView::new(
            &app.assistant,
            busy,
            app.spinner(),
            app.input_mode == InputMode::EditQuestion,
        )
        .render(chunks[1], buf),
        Tab::Meeting => {
            MeetingView::new(&app.meeting, busy, app.spinner()).render(chunks[1], buf);
        }
        Tab::Outreach => OutreachView::new(
            &app.outreach,
            busy,
            app.spinner(),
            app.input_mode == InputMode::EditPurpose,
            app.input_mode == InputMode::EditEmail,
        )
        .render(chunks[1], buf),
    }

    render_footer(app, chunks[2], buf);
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let title = "DealDesk";
    buf.set_string(
        area.x.saturating_add(1),
        area.y,
        title,
        Style::default().fg(Theme::ACCENT).bold(),
    );

    let mut x = area
        .x
        .saturating_add(u16::try_from(title.len()).unwrap_or(0))
        .saturating_add(3);
    for tab in Tab::ALL {
        let label = format!("[{}]{} ", tab.index() + 1, tab.name());
        let style = if tab == app.tab {
            Style::default().fg(Theme::ACCENT).bold()
        } else {
            Style::default().fg(Theme::SUBTEXT)
        };
        buf.set_string(x, area.y, &label, style);
        x = x.saturating_add(u16::try_from(label.len()).unwrap_or(0));
    }

    // Pending indicator on the right edge.
    if app.busy() {
        let status = format!("{} working", app.spinner());
        let status_x = area
            .x
            .saturating_add(area.width)
            .saturating_sub(u16::try_from(status.len()).unwrap_or(0))
            .saturating_sub(2);
        buf.set_string(status_x, area.y, &status, Style::default().fg(Theme::BUSY));
    }

    for x in area.x..area.x.saturating_add(area.width) {
        buf[(x, area.y.saturating_add(1))]
            .set_char('─')
            .set_fg(Theme::BORDER);
    }
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let keybindings = match app.input_mode {
        InputMode::Normal => match app.tab {
            Tab::Dashboard => "q:Quit  1-4:Tabs  g:Insights  PgUp/PgDn:Scroll",
            Tab::Assistant => "q:Quit  1-4:Tabs  e:Question  g:Ask  PgUp/PgDn:Scroll",
            Tab::Meeting => "q:Quit  1-4:Tabs  j/k:Account  g:Brief  PgUp/PgDn:Scroll",
            Tab::Outreach => "q:Quit  h/l:Focus  j/k:Choose  e:Purpose  g:Email  i:Edit email",
        },
        InputMode::EditQuestion => "Enter:Ask  Esc:Done  Type your question...",
        InputMode::EditPurpose => "Enter/Esc:Done  Type the email purpose...",
        InputMode::EditEmail => "Esc:Done  Enter:Newline  Edit the draft...",
    };
    buf.set_string(
        area.x.saturating_add(1),
        area.y,
        keybindings,
        Style::default().fg(Theme::SUBTEXT),
    );
}
