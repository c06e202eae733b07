//! Rendering layer. All terminal I/O lives here.
//!
//! Functions take a mutable writer plus an immutable state snapshot and
//! translate it into queued terminal commands; nothing here touches game
//! logic. Entity positions are logical canvas units, scaled onto whatever
//! cell grid the terminal currently has.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use last_survivor::entities::{GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_FPS: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// One arrow per 45° octant of the heading, starting at +x and wrapping
/// through +y (down on screen).
const PLAYER_GLYPHS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];

fn player_glyph(angle: f32) -> &'static str {
    let octant = ((angle.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    PLAYER_GLYPHS[octant]
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Print `text` centered on `row`. Shared with the menu in `main`.
pub fn print_centered<W: Write>(
    out: &mut W,
    cols: u16,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Map a logical canvas position onto the playfield cell grid. The playfield
/// spans columns 1..=cols-2 and rows 2..=rows-3, inside the border.
fn to_cell(pos: Vec2, state: &GameState, cols: u16, rows: u16) -> (u16, u16) {
    let play_w = cols.saturating_sub(2).max(1) as f32;
    let play_h = rows.saturating_sub(4).max(1) as f32;
    let fx = (pos.x / state.width).clamp(0.0, 1.0);
    let fy = (pos.y / state.height).clamp(0.0, 1.0);
    let cx = 1 + (fx * (play_w - 1.0)).round() as u16;
    let cy = 2 + (fy * (play_h - 1.0)).round() as u16;
    (cx, cy)
}

fn draw_glyph<W: Write>(
    out: &mut W,
    pos: Vec2,
    glyph: &str,
    color: Color,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (cx, cy) = to_cell(pos, state, cols, rows);
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, fps: Option<f32>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (cols, rows) = terminal::size()?;

    draw_border(out, cols, rows)?;
    draw_hud(out, state, fps, cols)?;

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        draw_glyph(out, enemy.pos, "Ψ", C_ENEMY, state, cols, rows)?;
    }
    for bullet in &state.bullets {
        draw_glyph(out, bullet.pos, "•", C_BULLET_PLAYER, state, cols, rows)?;
    }
    for bullet in &state.enemy_bullets {
        draw_glyph(out, bullet.pos, "·", C_BULLET_ENEMY, state, cols, rows)?;
    }
    draw_glyph(
        out,
        state.player.pos,
        player_glyph(state.player.angle),
        C_PLAYER,
        state,
        cols,
        rows,
    )?;

    draw_controls_hint(out, rows)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

/// Box around the playfield. Row 0 stays free for the HUD and the last row
/// for the controls hint.
fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let (top, bottom) = (1, rows.saturating_sub(2));
    let inner = cols.saturating_sub(2) as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    for row in top + 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    fps: Option<f32>,
    cols: u16,
) -> std::io::Result<()> {
    // Score (and best, once one exists) on the left
    let score_str = if state.high_score > 0 {
        format!("Score:{:>6}  Hi:{:>6}", state.score, state.high_score)
    } else {
        format!("Score:{:>6}", state.score)
    };
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_str))?;

    // Frame-rate readout in the centre, only when enabled in settings
    if let Some(fps) = fps {
        print_centered(out, cols, 0, C_HUD_FPS, &format!("{fps:>5.1} fps"))?;
    }

    // Lives as hearts on the right
    let lives_str = format!("Lives:{}", "♥".repeat(state.player.lives as usize));
    let col = cols.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Turn   ↑ ↓ / W S : Thrust   SPACE : Fire   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let best = state.high_score.max(state.score);
    let new_best = state.score >= state.high_score && state.score > 0;
    let (best_line, best_color) = if new_best {
        (format!("★ NEW BEST: {best:>6} ★"), Color::Yellow)
    } else {
        (format!("Best Score:  {best:>6}"), Color::DarkGrey)
    };

    let lines: [(String, Color); 6] = [
        ("╔════════════════════╗".into(), Color::Red),
        ("║    GAME  OVER      ║".into(), Color::Red),
        ("╚════════════════════╝".into(), Color::Red),
        (format!("Final Score: {:>6}", state.score), Color::Yellow),
        (best_line, best_color),
        ("R - Play Again  Q - Quit".into(), Color::White),
    ];

    let top = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        print_centered(out, cols, top + i as u16, *color, text)?;
    }

    Ok(())
}
