//! Play command implementation - Interactive TUI run.
//!
//! Two activities share the run cooperatively: an input thread that
//! translates key events into semantic intents and queues them over an
//! mpsc channel, and the main loop that exclusively owns the [`Game`],
//! drains the queue, dispatches commands and redraws at ~60 Hz. The
//! engine is never aliased across threads; termination is a shared
//! atomic flag polled by both sides.

// CLI play uses intentional casts for display and timing
#![allow(clippy::needless_pass_by_value, clippy::cast_possible_truncation)]

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use spire::game::{Game, GameState};
use std::io::stdout;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Frame budget for the render loop (~60 Hz).
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Semantic input intents, the closed set the engine's controller
/// understands. The input thread owns the translation from raw key
/// events; everything else sees only these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    /// Quit the program.
    Exit,
    /// Select the item under the cursor.
    Confirm,
    /// Context-dependent secondary action (end turn, skip reward).
    Secondary,
    /// Move the cursor up.
    Up,
    /// Move the cursor down.
    Down,
    /// Move the cursor left (treated as up in vertical lists).
    Left,
    /// Move the cursor right (treated as down in vertical lists).
    Right,
    /// Directly select slot `n` (0-based).
    Slot(usize),
    /// Any other key; only meaningful on acknowledge-to-continue screens.
    Other,
}

/// Translate a key code into a semantic intent.
fn translate(code: KeyCode) -> Intent {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Intent::Exit,
        KeyCode::Enter | KeyCode::Char(' ') => Intent::Confirm,
        KeyCode::Char('e' | 's') => Intent::Secondary,
        KeyCode::Up | KeyCode::Char('k') => Intent::Up,
        KeyCode::Down | KeyCode::Char('j') => Intent::Down,
        KeyCode::Left | KeyCode::Char('h') => Intent::Left,
        KeyCode::Right | KeyCode::Char('l') => Intent::Right,
        KeyCode::Char(c @ '1'..='9') => {
            Intent::Slot(c.to_digit(10).map_or(0, |d| (d - 1) as usize))
        }
        _ => Intent::Other,
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub(crate) fn execute(seed: Option<u64>) -> Result<(), CliError> {
    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let game = Game::new(seed);
    run_tui(game, seed)
}

/// Controller state for the TUI: the engine plus cursor bookkeeping.
struct App {
    game: Game,
    seed: u64,
    cursor: usize,
}

impl App {
    fn new(game: Game, seed: u64) -> Self {
        Self {
            game,
            seed,
            cursor: 0,
        }
    }

    /// Number of selectable items on the current screen.
    fn cursor_max(&self) -> usize {
        match self.game.state {
            GameState::Map => self.game.map.connections().len(),
            GameState::Combat => self.game.player.hand.len(),
            GameState::Reward => self.game.card_rewards.len(),
            GameState::Rest => 2,
            GameState::Shop | GameState::Event | GameState::GameOver => 0,
        }
    }

    /// Apply one intent to the engine. Rejected commands are simply
    /// ignored; the next frame shows the unchanged state.
    fn dispatch(&mut self, intent: Intent) {
        if intent == Intent::Exit {
            self.game.set_done(true);
            return;
        }

        match intent {
            Intent::Up | Intent::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                return;
            }
            Intent::Down | Intent::Right => {
                if self.cursor + 1 < self.cursor_max() {
                    self.cursor += 1;
                }
                return;
            }
            _ => {}
        }

        let state = self.game.state;
        match state {
            GameState::Map => {
                let index = match intent {
                    Intent::Confirm => Some(self.cursor),
                    Intent::Slot(n) => Some(n),
                    _ => None,
                };
                if let Some(index) = index {
                    let target = self.game.map.connections().get(index).copied();
                    if let Some(target) = target
                        && self.game.select_map_node(target).is_ok()
                    {
                        self.cursor = 0;
                    }
                }
            }
            GameState::Combat => match intent {
                Intent::Confirm => {
                    let _ = self.game.use_card(self.cursor);
                }
                Intent::Slot(n) => {
                    let _ = self.game.use_card(n);
                }
                Intent::Secondary => {
                    let _ = self.game.end_turn();
                }
                _ => {}
            },
            GameState::Reward => match intent {
                Intent::Confirm => {
                    if self.game.select_card_reward(self.cursor).is_ok() {
                        self.cursor = 0;
                    }
                }
                Intent::Slot(n) => {
                    if self.game.select_card_reward(n).is_ok() {
                        self.cursor = 0;
                    }
                }
                Intent::Secondary => {
                    self.game.skip_card_reward();
                    self.cursor = 0;
                }
                _ => {}
            },
            GameState::Rest => {
                if intent == Intent::Confirm {
                    if self.cursor == 0 {
                        self.game.rest_heal();
                    } else {
                        self.game.rest_upgrade();
                    }
                    self.cursor = 0;
                }
            }
            GameState::Shop | GameState::Event => {
                // Placeholder screens: any key returns to the map
                self.game.return_to_map();
                self.cursor = 0;
            }
            GameState::GameOver => {
                self.game.set_done(true);
            }
        }

        // A transition may have shrunk the selectable list
        let max = self.cursor_max();
        if self.cursor >= max {
            self.cursor = max.saturating_sub(1);
        }
    }
}

fn run_tui(game: Game, seed: u64) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    // Input thread: raw events in, semantic intents out
    let (tx, rx) = mpsc::channel::<Intent>();
    let done = Arc::new(AtomicBool::new(false));
    let input_done = Arc::clone(&done);
    let input_thread = thread::spawn(move || {
        while !input_done.load(Ordering::Relaxed) {
            let ready = event::poll(Duration::from_millis(50)).unwrap_or(false);
            if !ready {
                continue;
            }
            if let Ok(Event::Key(key)) = event::read()
                && key.kind == KeyEventKind::Press
                && tx.send(translate(key.code)).is_err()
            {
                break;
            }
        }
    });

    let mut app = App::new(game, seed);

    loop {
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        // Block for at most one frame, then drain whatever queued up
        match rx.recv_timeout(FRAME_TIME) {
            Ok(intent) => {
                app.dispatch(intent);
                while let Ok(queued) = rx.try_recv() {
                    app.dispatch(queued);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if app.game.is_done() {
            break;
        }
    }

    // Stop the input thread, restore terminal
    done.store(true, Ordering::Relaxed);
    let _ = input_thread.join();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    match app.game.state {
        GameState::Map => render_map(f, chunks[1], app),
        GameState::Combat => render_combat(f, chunks[1], app),
        GameState::Reward => render_reward(f, chunks[1], app),
        GameState::Rest => render_rest(f, chunks[1], app),
        GameState::Shop => render_notice(f, chunks[1], "Shop", "The shelves are bare."),
        GameState::Event => render_notice(f, chunks[1], "Event", "Nothing happens."),
        GameState::GameOver => render_game_over(f, chunks[1], app),
    }

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let player = &app.game.player;
    let floor = app.game.map.current().floor;

    let title = format!(
        " Spire | Floor {}/{} | HP {}/{} | Gold {} | Seed {} ",
        floor + 1,
        app.game.map.floor_count(),
        player.health,
        player.max_health,
        player.gold,
        app.seed
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let map = &app.game.map;
    let mut lines: Vec<Line> = Vec::new();

    let here = map.current_node();
    lines.push(Line::from(format!(
        "You stand at a {} node on floor {}.",
        here.kind.label(),
        here.id.floor + 1
    )));
    lines.push(Line::from(""));

    if map.connections().is_empty() {
        lines.push(Line::from("No paths lead onward from here."));
    } else {
        lines.push(Line::from("Choose the next node:"));
        for (i, id) in map.connections().iter().enumerate() {
            let label = map
                .node(*id)
                .map_or("?", |node| node.kind.label());
            let text = format!("  {}. {} (lane {})", i + 1, label, id.lane + 1);
            let style = if i == app.cursor {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            };
            lines.push(Line::styled(text, style));
        }
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Map "))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_combat(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(6)])
        .split(area);

    let player = &app.game.player;
    let mut enemy_lines: Vec<Line> = Vec::new();

    if let Some(enemy) = app.game.enemy.as_ref() {
        let intent = enemy.intention();
        enemy_lines.push(Line::from(vec![
            Span::styled(
                enemy.name,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}/{} HP", enemy.health, enemy.max_health)),
        ]));
        enemy_lines.push(Line::from(format!(
            "Block {}  Str {}  Vuln {}  Weak {}",
            enemy.block, enemy.strength, enemy.vulnerable, enemy.weak
        )));
        let preview = if intent.damage > 0 {
            format!("Intent: {} {}", intent.label, intent.damage)
        } else {
            format!("Intent: {}", intent.label)
        };
        enemy_lines.push(Line::styled(preview, Style::default().fg(Color::Yellow)));
    }

    let enemy_widget = Paragraph::new(enemy_lines)
        .block(Block::default().borders(Borders::ALL).title(" Enemy "));
    f.render_widget(enemy_widget, chunks[0]);

    let mut hand_lines: Vec<Line> = Vec::new();
    hand_lines.push(Line::from(format!(
        "Energy {}/{}  Block {}  Str {}  Vuln {}  Weak {}",
        player.energy, player.max_energy, player.block, player.strength, player.vulnerable,
        player.weak
    )));
    hand_lines.push(Line::from(format!(
        "Draw pile {}  Discard {}",
        player.draw_pile.len(),
        player.discard_pile.len()
    )));
    hand_lines.push(Line::from(""));

    for (i, card) in player.hand.iter().enumerate() {
        let text = format!(
            "  {}. {} ({}) - {}",
            i + 1,
            card.name,
            card.energy_cost,
            card.description
        );
        let style = if i == app.cursor {
            Style::default().fg(Color::Black).bg(Color::White)
        } else if card.energy_cost > player.energy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        hand_lines.push(Line::styled(text, style));
    }

    let hand_widget = Paragraph::new(hand_lines)
        .block(Block::default().borders(Borders::ALL).title(" Hand "))
        .wrap(Wrap { trim: false });
    f.render_widget(hand_widget, chunks[1]);
}

fn render_reward(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from("Victory! Choose a card to add to your deck:"));
    lines.push(Line::from(""));

    for (i, card) in app.game.card_rewards.iter().enumerate() {
        let text = format!(
            "  {}. {} ({}) - {}",
            i + 1,
            card.name,
            card.energy_cost,
            card.description
        );
        let style = if i == app.cursor {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default()
        };
        lines.push(Line::styled(text, style));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Reward "));
    f.render_widget(widget, area);
}

fn render_rest(f: &mut Frame, area: Rect, app: &App) {
    let heal = app.game.player.max_health / 3;
    let options = [
        format!("Rest (heal {heal} HP)"),
        "Smith (upgrade a card - coming soon)".to_string(),
    ];

    let mut lines: Vec<Line> = vec![Line::from("The campfire crackles."), Line::from("")];
    for (i, option) in options.iter().enumerate() {
        let text = format!("  {}. {option}", i + 1);
        let style = if i == app.cursor {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default()
        };
        lines.push(Line::styled(text, style));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Rest "));
    f.render_widget(widget, area);
}

fn render_notice(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("Press any key to return to the map."),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")));
    f.render_widget(widget, area);
}

fn render_game_over(f: &mut Frame, area: Rect, app: &App) {
    let player = &app.game.player;
    let lines = vec![
        Line::styled(
            "You have fallen.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!(
            "Floor reached: {}   Gold: {}   Deck size: {}",
            app.game.map.current().floor + 1,
            player.gold,
            player.deck.len()
        )),
        Line::from(""),
        Line::from("Press any key to exit."),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Game Over "));
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = match app.game.state {
        GameState::Map => " [↑/↓] Select  [Enter] Travel  [1-9] Direct  [q] Quit ",
        GameState::Combat => " [↑/↓] Select  [Enter] Play card  [e] End turn  [q] Quit ",
        GameState::Reward => " [↑/↓] Select  [Enter] Take card  [s] Skip  [q] Quit ",
        GameState::Rest => " [↑/↓] Select  [Enter] Choose  [q] Quit ",
        GameState::Shop | GameState::Event => " [any key] Continue  [q] Quit ",
        GameState::GameOver => " [any key] Exit ",
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
