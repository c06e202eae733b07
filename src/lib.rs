//! Last Survivor, a single-screen terminal survival shooter.
//!
//! Core modules:
//! - `entities`: plain-data game records (player, enemies, bullets, state)
//! - `compute`: pure per-frame state transitions, the entire game logic
//! - `settings`: host-shell preferences persisted as a JSON dotfile
//!
//! The binary adds the terminal shell on top: input capture, frame pacing,
//! and rendering.

pub mod compute;
pub mod entities;
pub mod settings;

pub use settings::Settings;

use glam::Vec2;

/// Gameplay constants. Positions are logical canvas units, not terminal
/// cells; the renderer scales them onto whatever grid it has.
pub mod consts {
    /// Logical canvas size.
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Per-frame time step ceiling in seconds, so a stalled frame cannot
    /// teleport entities.
    pub const MAX_DT: f32 = 0.05;

    /// Player ship.
    pub const PLAYER_W: f32 = 50.0;
    pub const PLAYER_H: f32 = 40.0;
    /// Degrees per second while a turn key is held.
    pub const PLAYER_TURN_RATE: f32 = 180.0;
    /// Canvas units per second at full thrust.
    pub const PLAYER_MAX_SPEED: f32 = 220.0;
    /// Seconds between consecutive shots.
    pub const PLAYER_FIRE_COOLDOWN: f32 = 0.25;
    pub const PLAYER_START_LIVES: u32 = 3;

    /// Player bullets.
    pub const BULLET_SPEED: f32 = 400.0;
    pub const BULLET_SIZE: f32 = 6.0;
    /// Bullets spawn this far ahead of the ship along its heading.
    pub const BULLET_MUZZLE_OFFSET: f32 = 30.0;

    /// Enemies.
    pub const ENEMY_W: f32 = 36.0;
    pub const ENEMY_H: f32 = 28.0;
    /// Per-enemy speed is rolled uniformly from this range at spawn.
    pub const ENEMY_SPEED_MIN: f32 = 60.0;
    pub const ENEMY_SPEED_MAX: f32 = 120.0;

    /// Enemy fire.
    pub const ENEMY_FIRE_RADIUS: f32 = 200.0;
    /// Chance per enemy per frame while inside `ENEMY_FIRE_RADIUS`.
    pub const ENEMY_FIRE_CHANCE: f64 = 0.01;
    pub const ENEMY_BULLET_SPEED: f32 = 200.0;
    pub const ENEMY_BULLET_SIZE: f32 = 5.0;
    pub const ENEMY_MUZZLE_OFFSET: f32 = 20.0;

    /// Waves and scoring.
    pub const WAVE_BASE_COUNT: u32 = 5;
    /// Every this many points adds one enemy to the next wave.
    pub const WAVE_SCORE_STEP: u32 = 50;
    pub const KILL_SCORE: u32 = 10;
}

/// Unit vector for a heading in degrees. 0° points along +x and angles grow
/// toward +y, which is downward on the canvas.
#[inline]
pub fn heading_vec(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
