use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use log::{debug, info};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Size;

use crate::error::AppError;
use crate::input::{InputProbe, KeyboardProbe};
use crate::surface::{Surface, TerminalSurface, cells_for, centered, fit_scale};

/// Set while keyboard enhancement flags pushed by this process are active.
static KEYBOARD_FLAGS_PUSHED: AtomicBool = AtomicBool::new(false);

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Contract between the host loop and a game.
pub trait Game {
    /// Returns the logical screen size in pixels for the given outside size.
    fn layout(&self, outside: Size) -> Size;

    /// Advances the game by one host frame.
    fn update(&mut self, input: &dyn InputProbe);

    /// Draws the current state. Must not change it.
    fn draw(&self, surface: &mut dyn Surface);
}

/// Host loop settings.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub title: String,
    /// Largest display scale to use when the terminal has room for it.
    pub max_scale: u16,
    pub frames_per_second: u32,
}

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    ///
    /// Key release reporting is requested when the terminal supports it.
    pub fn enter(title: &str) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide, SetTitle(title)) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let keyboard_enhanced =
            !cfg!(windows) && matches!(supports_keyboard_enhancement(), Ok(true));
        if keyboard_enhanced {
            if let Err(error) = execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            ) {
                let _ = cleanup_terminal_best_effort();
                return Err(error);
            }
            mark_keyboard_flags_pushed();
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self {
                terminal,
                keyboard_enhanced,
            }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    /// Returns true when the terminal sends key release events.
    #[must_use]
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced || cfg!(windows)
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Restores the terminal from any state, e.g. while a panic unwinds.
///
/// Keyboard enhancement flags are popped at most once per push, so a panic
/// hook followed by the session drop leaves the terminal's own stack intact.
pub fn restore_terminal_best_effort() {
    let _ = cleanup_terminal_best_effort();
}

fn mark_keyboard_flags_pushed() {
    KEYBOARD_FLAGS_PUSHED.store(true, Ordering::SeqCst);
}

fn take_keyboard_flags_pushed() -> bool {
    KEYBOARD_FLAGS_PUSHED.swap(false, Ordering::SeqCst)
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let mut stdout = io::stdout();
    if take_keyboard_flags_pushed() {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// Runs `game` at a fixed frame rate until the player closes it.
pub fn run_game<G: Game>(game: &mut G, options: &RunOptions) -> Result<(), AppError> {
    let mut session = TerminalSession::enter(&options.title).map_err(AppError::TerminalInit)?;
    let mut probe = KeyboardProbe::new(session.reports_key_release());
    info!(
        "terminal session started, key release events: {}",
        session.reports_key_release()
    );

    let frame_interval = Duration::from_secs(1) / options.frames_per_second.max(1);
    let mut next_frame = Instant::now();

    loop {
        probe.expire_stale(Instant::now());
        while event::poll(Duration::ZERO).map_err(AppError::Input)? {
            if let Event::Key(key_event) = event::read().map_err(AppError::Input)? {
                probe.handle_key_event(key_event, Instant::now());
            }
        }

        if probe.close_requested() {
            info!("close requested");
            break;
        }

        game.update(&probe);
        probe.end_frame();

        session
            .terminal_mut()
            .draw(|frame| draw_frame(&*game, frame, options.max_scale))
            .map_err(AppError::Draw)?;

        next_frame += frame_interval;
        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
        } else {
            debug!("frame overran by {:?}", now - next_frame);
            next_frame = now;
        }
    }

    Ok(())
}

fn draw_frame<G: Game>(game: &G, frame: &mut Frame<'_>, max_scale: u16) {
    let area = frame.area();
    let available = Size {
        width: area.width,
        height: area.height,
    };
    let logical = game.layout(available);
    let scale = fit_scale(available, logical, max_scale);
    let play_area = centered(area, cells_for(logical, scale));

    let mut surface = TerminalSurface::new(frame.buffer_mut(), play_area, scale);
    game.draw(&mut surface);
}
