use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::{Action, Direction, GameState};

/// Smallest pointer drag, in terminal cells, that counts as a swipe.
pub const MIN_SWIPE_CELLS: f64 = 2.0;

/// What the player asked for, before it is checked against the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    Restart,
    Quit,
}

/// Arrow keys and WASD steer. Unknown keys map to `None`.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    let cmd = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,

        KeyCode::Up | KeyCode::Char('w') => Command::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Command::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Command::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Command::Steer(Direction::Right),

        KeyCode::Char(' ') | KeyCode::Enter => Command::Start,
        KeyCode::Char('r') => Command::Restart,
        _ => return None,
    };
    Some(cmd)
}

/// Direction of the dominant axis of a drag, if it is long enough.
pub fn swipe_direction(dx: f64, dy: f64, min_distance: f64) -> Option<Direction> {
    if dx.abs().max(dy.abs()) < min_distance {
        return None;
    }
    let dir = if dx.abs() > dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(dir)
}

/// Turns a left-button press/release pair into a steering command.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, ev: MouseEvent) -> Option<Command> {
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = Some((ev.column, ev.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.origin.take()?;
                let dx = f64::from(ev.column) - f64::from(x0);
                let dy = f64::from(ev.row) - f64::from(y0);
                swipe_direction(dx, dy, MIN_SWIPE_CELLS).map(Command::Steer)
            }
            _ => None,
        }
    }
}

/// Width of one on-screen arrow button, in cells.
const BUTTON_WIDTH: u16 = 5;

/// Clickable arrow buttons drawn under the board: a 3x3 grid with the four
/// arrows on the edges and empty corners and centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonPad {
    pub x: u16,
    pub y: u16,
}

impl ButtonPad {
    pub const LINES: [&'static str; 3] = ["     [ ↑ ]     ", "[ ← ]     [ → ]", "     [ ↓ ]     "];
    pub const WIDTH: u16 = BUTTON_WIDTH * 3;
    pub const HEIGHT: u16 = 3;

    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<Direction> {
        let col = column.checked_sub(self.x)? / BUTTON_WIDTH;
        let row = row.checked_sub(self.y)?;
        match (col, row) {
            (1, 0) => Some(Direction::Up),
            (0, 1) => Some(Direction::Left),
            (2, 1) => Some(Direction::Right),
            (1, 2) => Some(Direction::Down),
            _ => None,
        }
    }

    /// A left press on an arrow steers.
    pub fn handle(&self, ev: MouseEvent) -> Option<Command> {
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.button_at(ev.column, ev.row).map(Command::Steer)
            }
            _ => None,
        }
    }
}

/// Actions to enqueue for `cmd`. The first steer on an idle game also starts
/// it, ahead of the direction change.
pub fn actions_for(cmd: Command, state: &GameState) -> Vec<Action> {
    match cmd {
        Command::Steer(dir) if !state.is_game_started => {
            vec![Action::Start, Action::ChangeDirection(dir)]
        }
        Command::Steer(dir) => vec![Action::ChangeDirection(dir)],
        Command::Start => vec![Action::Start],
        Command::Restart => vec![Action::Restart],
        Command::Quit => Vec::new(),
    }
}
