//! Game entity records. Pure data, no logic.

use glam::Vec2;

// ── Session & input ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    /// Menu is up, simulation not started.
    Ready,
    Running,
    GameOver,
}

/// One frame's worth of sampled key state. The shell collapses its live key
/// map into this snapshot once per frame; the core never sees raw events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub back: bool,
    pub fire: bool,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner in canvas units.
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    /// Heading in degrees, unnormalized. 0 points along +x, angles grow
    /// toward +y.
    pub angle: f32,
    /// Signed thrust applied on the last update (canvas units per second).
    pub speed: f32,
    pub max_speed: f32,
    /// Seconds until the next shot is allowed.
    pub cooldown: f32,
    pub lives: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    /// Homing speed rolled at spawn (canvas units per second).
    pub speed: f32,
    /// Dead enemies stay in the list until the next wave check filters them.
    pub alive: bool,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A projectile from either side. Ownership is positional: player bullets
/// live in `GameState::bullets`, enemy bullets in `GameState::enemy_bullets`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: f32,
    pub h: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can return a
/// new snapshot without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<Bullet>,
    pub score: u32,
    /// Highest score seen across sessions, carried for the HUD.
    pub high_score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Logical canvas size.
    pub width: f32,
    pub height: f32,
}
