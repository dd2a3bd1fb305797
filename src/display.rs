//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session.  No game logic is performed; the world (800 × 600 units) is
//! scaled onto whatever terminal size is available.

use std::io::Write;

use crossterm::{
    cursor,
    event::DisableMouseCapture,
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};

use crate::entities::{Phase, SpriteView};
use crate::menu::{buttons, TITLE};
use crate::session::GameSession;
use crate::tuning::{GROUND_LINE, HERO_PREFIX, WORLD_HEIGHT, WORLD_WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::White;
const C_GROUND: Color = Color::DarkYellow;
const C_HERO: Color = Color::Cyan;
const C_ENEMY: Color = Color::Green;
const C_TITLE: Color = Color::Green;
const C_BUTTON: Color = Color::Blue;
const C_BUTTON_TEXT: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── World ↔ terminal mapping ─────────────────────────────────────────────────

/// Maps world units onto terminal cells.  Row 0 is the HUD and the last row
/// the controls hint; the world fills the rows in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    fn play_rows(&self) -> f64 {
        f64::from(self.rows.saturating_sub(2).max(1))
    }

    pub fn col(&self, x: f64) -> i32 {
        (x / WORLD_WIDTH * f64::from(self.cols)).floor() as i32
    }

    pub fn row(&self, y: f64) -> i32 {
        1 + (y / WORLD_HEIGHT * self.play_rows()).floor() as i32
    }

    /// World point at the center of a terminal cell.
    pub fn to_world(&self, col: u16, row: u16) -> (f64, f64) {
        let x = (f64::from(col) + 0.5) * WORLD_WIDTH / f64::from(self.cols.max(1));
        let y = (f64::from(row) - 0.5) * WORLD_HEIGHT / self.play_rows();
        (x, y)
    }

    /// Cells covered by a world rectangle, clipped to the play area.  Always
    /// at least one cell when any part is visible.
    pub fn cells(&self, left: f64, top: f64, width: f64, height: f64) -> Option<CellRect> {
        let c0 = self.col(left);
        let r0 = self.row(top);
        let c1 = self.col(left + width).max(c0 + 1);
        let r1 = self.row(top + height).max(r0 + 1);

        let max_col = i32::from(self.cols);
        let max_row = i32::from(self.rows.saturating_sub(1));
        let (c0, c1) = (c0.max(0), c1.min(max_col));
        let (r0, r1) = (r0.max(1), r1.min(max_row));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16,
            width: (c1 - c0) as u16,
            height: (r1 - r0) as u16,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

// ── Terminal teardown ────────────────────────────────────────────────────────

/// Hand the screen back to the shell: release the mouse, show the cursor and
/// leave the alternate screen.  Errors are ignored; this also runs from the
/// panic hook.
pub fn restore_terminal<W: Write>(out: &mut W) {
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for the current phase.
pub fn render<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.phase {
        Phase::Menu => draw_menu(out, session, view)?,
        Phase::Playing => {
            draw_ground(out, view)?;
            for sprite in session.sprites() {
                draw_sprite(out, &sprite, view)?;
            }
            draw_hud(out, session)?;
        }
        Phase::GameOver => draw_game_over(out, session, view)?,
    }
    draw_controls_hint(out, session, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, session: &GameSession, view: Viewport) -> std::io::Result<()> {
    let title_row = view.row(120.0).max(1) as u16;
    print_centered(out, view, title_row, TITLE, C_TITLE)?;

    for button in buttons() {
        let r = button.rect;
        let Some(cells) = view.cells(r.x, r.y, r.w, r.h) else {
            continue;
        };
        out.queue(style::SetForegroundColor(C_BUTTON))?;
        for row in cells.row..cells.row + cells.height {
            out.queue(cursor::MoveTo(cells.col, row))?;
            out.queue(Print("█".repeat(cells.width as usize)))?;
        }

        let label = button.label(session.audio_enabled);
        let label_row = cells.row + cells.height / 2;
        let label_col = (cells.col + cells.width / 2)
            .saturating_sub(label.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(label_col, label_row))?;
        out.queue(style::SetBackgroundColor(C_BUTTON))?;
        out.queue(style::SetForegroundColor(C_BUTTON_TEXT))?;
        out.queue(Print(&label))?;
        out.queue(style::ResetColor)?;
    }
    Ok(())
}

// ── Playing ───────────────────────────────────────────────────────────────────

fn draw_ground<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let Some(cells) = view.cells(0.0, GROUND_LINE, WORLD_WIDTH, WORLD_HEIGHT - GROUND_LINE)
    else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_GROUND))?;
    for row in cells.row..cells.row + cells.height {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print("▒".repeat(cells.width as usize)))?;
    }
    Ok(())
}

/// Filled block with a leg row that changes with the animation frame.
fn draw_sprite<W: Write>(out: &mut W, sprite: &SpriteView, view: Viewport) -> std::io::Result<()> {
    let Some(cells) = view.cells(sprite.left, sprite.top, sprite.width, sprite.height) else {
        return Ok(());
    };
    let color = if sprite.frame.starts_with(HERO_PREFIX) {
        C_HERO
    } else {
        C_ENEMY
    };
    let legs = match sprite.frame.chars().last() {
        Some('1') => '/',
        Some('2') => '|',
        _ => '\\',
    };

    out.queue(style::SetForegroundColor(color))?;
    let last = cells.row + cells.height - 1;
    for row in cells.row..=last {
        let fill = if row == last && cells.height > 1 { legs } else { '█' };
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(fill.to_string().repeat(cells.width as usize)))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("SCORE: {}", session.display_score())))?;
    Ok(())
}

// ── Game over ─────────────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: Viewport,
) -> std::io::Result<()> {
    let score_line = format!("SCORE: {}", session.display_score());
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", C_GAME_OVER),
        ("║    GAME  OVER    ║", C_GAME_OVER),
        ("╚══════════════════╝", C_GAME_OVER),
        (&score_line, C_HUD_SCORE),
        ("Press SPACE for Menu", C_HINT),
    ];

    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, view, start_row + i as u16, msg, *color)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: Viewport,
) -> std::io::Result<()> {
    let hint = match session.phase {
        Phase::Menu => "Click a button   ENTER : Start   M : Audio   Q : Quit",
        Phase::Playing => "↑ / W : Jump (hold to bounce)   Q : Quit",
        Phase::GameOver => "SPACE : Menu   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
