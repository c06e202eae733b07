//! Pure game-logic functions.
//!
//! Every public function takes immutable references (plus, where needed, an
//! RNG handle) and returns brand-new values; side effects are limited to the
//! injected RNG. The one in-place mutation in the module is the `alive` flag
//! flip inside `process_bullets`, on a list cloned at entry.

use glam::Vec2;
use rand::Rng;

use crate::consts;
use crate::entities::{Bullet, Enemy, GameState, GameStatus, InputState, Player};
use crate::heading_vec;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Player at canvas center, facing +x, gun ready.
pub fn init_player(width: f32, height: f32) -> Player {
    Player {
        pos: Vec2::new(width / 2.0, height / 2.0),
        w: consts::PLAYER_W,
        h: consts::PLAYER_H,
        angle: 0.0,
        speed: 0.0,
        max_speed: consts::PLAYER_MAX_SPEED,
        cooldown: 0.0,
        lives: consts::PLAYER_START_LIVES,
    }
}

/// Build the initial game state for a given logical canvas size.
pub fn init_state(width: f32, height: f32, high_score: u32) -> GameState {
    GameState {
        player: init_player(width, height),
        bullets: Vec::new(),
        enemies: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        high_score,
        status: GameStatus::Ready,
        frame: 0,
        width,
        height,
    }
}

// ── Enemy waves ──────────────────────────────────────────────────────────────

/// Roll one enemy on a uniformly chosen canvas edge, with its own speed.
pub fn spawn_enemy(width: f32, height: f32, rng: &mut impl Rng) -> Enemy {
    let (x, y) = match rng.gen_range(0..4) {
        0 => (rng.gen_range(0.0..width), 0.0),    // top
        1 => (width, rng.gen_range(0.0..height)), // right
        2 => (rng.gen_range(0.0..width), height), // bottom
        _ => (0.0, rng.gen_range(0.0..height)),   // left
    };
    Enemy {
        pos: Vec2::new(x, y),
        w: consts::ENEMY_W,
        h: consts::ENEMY_H,
        speed: rng.gen_range(consts::ENEMY_SPEED_MIN..consts::ENEMY_SPEED_MAX),
        alive: true,
    }
}

/// Spawn `count` independent enemies.
pub fn spawn_wave(width: f32, height: f32, count: u32, rng: &mut impl Rng) -> Vec<Enemy> {
    (0..count).map(|_| spawn_enemy(width, height, rng)).collect()
}

/// Size of the next wave. Grows by one enemy per `WAVE_SCORE_STEP` points.
pub fn wave_size(score: u32) -> u32 {
    consts::WAVE_BASE_COUNT + score / consts::WAVE_SCORE_STEP
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Integrate heading, thrust, and position for one frame; clamp into the
/// canvas and run down the fire cooldown.
pub fn update_player(
    player: &Player,
    input: &InputState,
    dt: f32,
    width: f32,
    height: f32,
) -> Player {
    let mut angle = player.angle;
    if input.left {
        angle -= consts::PLAYER_TURN_RATE * dt;
    }
    if input.right {
        angle += consts::PLAYER_TURN_RATE * dt;
    }

    // Forward wins when both thrust keys are held.
    let speed = if input.forward {
        player.max_speed
    } else if input.back {
        -player.max_speed
    } else {
        0.0
    };

    let pos = (player.pos + heading_vec(angle) * speed * dt)
        .clamp(Vec2::ZERO, Vec2::new(width, height));

    Player {
        pos,
        angle,
        speed,
        cooldown: (player.cooldown - dt).max(0.0),
        ..player.clone()
    }
}

/// Fire one bullet from the ship's nose and start the cooldown. While the
/// gun is still cooling this is a no-op clone.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.player.cooldown > 0.0 {
        return state.clone();
    }
    let dir = heading_vec(state.player.angle);
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        pos: state.player.pos + dir * consts::BULLET_MUZZLE_OFFSET,
        vel: dir * consts::BULLET_SPEED,
        w: consts::BULLET_SIZE,
        h: consts::BULLET_SIZE,
    });
    GameState {
        player: Player {
            cooldown: consts::PLAYER_FIRE_COOLDOWN,
            ..state.player.clone()
        },
        bullets,
        ..state.clone()
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Advance bullets by their velocity and keep only those strictly inside the
/// canvas. A bullet sitting exactly on an edge is culled.
pub fn update_bullets(bullets: &[Bullet], dt: f32, width: f32, height: f32) -> Vec<Bullet> {
    bullets
        .iter()
        .map(|b| Bullet {
            pos: b.pos + b.vel * dt,
            ..b.clone()
        })
        .filter(|b| b.pos.x > 0.0 && b.pos.x < width && b.pos.y > 0.0 && b.pos.y < height)
        .collect()
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Living enemies home toward the player at their own speed; dead ones pass
/// through unchanged.
pub fn update_enemies(enemies: &[Enemy], player: &Player, dt: f32) -> Vec<Enemy> {
    enemies
        .iter()
        .map(|e| {
            if !e.alive {
                return e.clone();
            }
            let delta = player.pos - e.pos;
            // Divisor 1 when the enemy sits exactly on the player: zero
            // movement that frame instead of NaN.
            let dist = delta.length();
            let dist = if dist == 0.0 { 1.0 } else { dist };
            Enemy {
                pos: e.pos + delta / dist * e.speed * dt,
                ..e.clone()
            }
        })
        .collect()
}

/// Every living enemy strictly inside the fire radius rolls the fire chance
/// once; on success it launches a bullet aimed at the player from 20 units
/// out along the aim line, appended to `enemy_bullets`. The RNG is consulted
/// only for enemies that pass the alive-and-radius gate, so seeded runs stay
/// reproducible.
pub fn enemy_shoot(
    enemies: &[Enemy],
    player: &Player,
    enemy_bullets: Vec<Bullet>,
    rng: &mut impl Rng,
) -> Vec<Bullet> {
    let mut bullets = enemy_bullets;
    for e in enemies {
        let delta = player.pos - e.pos;
        let dist = delta.length();
        if e.alive && dist < consts::ENEMY_FIRE_RADIUS && rng.gen_bool(consts::ENEMY_FIRE_CHANCE) {
            let dist = if dist == 0.0 { 1.0 } else { dist };
            let dir = delta / dist;
            bullets.push(Bullet {
                pos: e.pos + dir * consts::ENEMY_MUZZLE_OFFSET,
                vel: dir * consts::ENEMY_BULLET_SPEED,
                w: consts::ENEMY_BULLET_SIZE,
                h: consts::ENEMY_BULLET_SIZE,
            });
        }
    }
    bullets
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Axis-aligned overlap over min-corner rectangles. Strict on every edge:
/// touching rectangles do not collide.
pub fn aabb_overlap(a_pos: Vec2, a_w: f32, a_h: f32, b_pos: Vec2, b_w: f32, b_h: f32) -> bool {
    a_pos.x < b_pos.x + b_w
        && a_pos.x + a_w > b_pos.x
        && a_pos.y < b_pos.y + b_h
        && a_pos.y + a_h > b_pos.y
}

/// What one player-bullets-versus-enemies pass produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BulletOutcome {
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
}

/// Resolve player bullets against enemies. Each bullet stops at its first
/// overlapping living enemy in list order; that enemy is marked dead (it
/// stays in the list until the next wave check) and the bullet is consumed.
pub fn process_bullets(bullets: &[Bullet], enemies: &[Enemy], score: u32) -> BulletOutcome {
    let mut enemies = enemies.to_vec();
    let mut score = score;
    let mut surviving = Vec::new();

    for b in bullets {
        let mut hit = false;
        for e in enemies.iter_mut() {
            if e.alive && aabb_overlap(b.pos, b.w, b.h, e.pos, e.w, e.h) {
                e.alive = false;
                score += consts::KILL_SCORE;
                hit = true;
                break;
            }
        }
        if !hit {
            surviving.push(b.clone());
        }
    }

    BulletOutcome {
        bullets: surviving,
        enemies,
        score,
    }
}

/// What one enemy-bullets-versus-player pass produced.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerHitOutcome {
    pub player: Player,
    pub enemy_bullets: Vec<Bullet>,
}

/// Resolve enemy bullets against the player. Every overlapping bullet costs
/// one life (stopping at zero) and is consumed; the rest carry over.
pub fn process_player_hit(player: &Player, enemy_bullets: &[Bullet]) -> PlayerHitOutcome {
    let mut player = player.clone();
    let mut kept = Vec::new();

    for b in enemy_bullets {
        if aabb_overlap(b.pos, b.w, b.h, player.pos, player.w, player.h) {
            player.lives = player.lives.saturating_sub(1);
        } else {
            kept.push(b.clone());
        }
    }

    PlayerHitOutcome {
        player,
        enemy_bullets: kept,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// The step order is fixed and observable: waves refill from last frame's
/// list, enemies fire from positions already moved this frame, and the same
/// moved positions are used for bullet collisions, so a bullet and an enemy
/// converging in one frame still register a hit. Bullets fired by enemies
/// this frame start moving next frame; the player's own shot moves (and can
/// hit) on the frame it is fired.
pub fn tick(state: &GameState, input: &InputState, dt: f32, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;

    // ── 1. Refill the field when it is empty or fully cleared ────────────────
    let need_wave = state.enemies.is_empty() || state.enemies.iter().all(|e| !e.alive);
    let mut enemies: Vec<Enemy> = state.enemies.iter().filter(|e| e.alive).cloned().collect();
    if need_wave {
        enemies.extend(spawn_wave(
            state.width,
            state.height,
            wave_size(state.score),
            rng,
        ));
    }

    // ── 2. Move the player ───────────────────────────────────────────────────
    let player = update_player(&state.player, input, dt, state.width, state.height);

    // ── 3. Fire (the cooldown gate lives in player_shoot) ────────────────────
    let staged = GameState {
        player,
        ..state.clone()
    };
    let staged = if input.fire {
        player_shoot(&staged)
    } else {
        staged
    };
    let GameState {
        player, bullets, ..
    } = staged;

    // ── 4. Advance player bullets; a shot fired above moves this frame ───────
    let bullets = update_bullets(&bullets, dt, state.width, state.height);

    // ── 5. Enemies home in on the moved player ───────────────────────────────
    let enemies = update_enemies(&enemies, &player, dt);

    // ── 6. Advance old enemy bullets, then let enemies fire new ones ─────────
    let enemy_bullets = update_bullets(&state.enemy_bullets, dt, state.width, state.height);
    let enemy_bullets = enemy_shoot(&enemies, &player, enemy_bullets, rng);

    // ── 7. Player bullets vs enemies ─────────────────────────────────────────
    let BulletOutcome {
        bullets,
        enemies,
        score,
    } = process_bullets(&bullets, &enemies, state.score);

    // ── 8. Enemy bullets vs player ───────────────────────────────────────────
    let PlayerHitOutcome {
        player,
        enemy_bullets,
    } = process_player_hit(&player, &enemy_bullets);

    // ── 9. Session status from remaining lives ───────────────────────────────
    let status = if player.lives == 0 {
        GameStatus::GameOver
    } else {
        GameStatus::Running
    };

    GameState {
        player,
        bullets,
        enemies,
        enemy_bullets,
        score,
        status,
        frame,
        ..state.clone()
    }
}
