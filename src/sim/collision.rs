//! Collision detection and response for boxes against tiles
//!
//! Platformer bodies resolve one axis at a time: move horizontally, push out
//! of any wall, then move vertically and push out of floor or ceiling. Two
//! probe points per leading edge catch tile corners without a full sweep.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::{TileWorld, tile_floor};
use crate::consts::{MAX_STEP, TILE_SIZE, WALL_EPSILON};

/// Probe inset from the bottom edge for the horizontal pass
const SIDE_PROBE_INSET: f32 = 0.1;
/// Probe inset from the left/right edges for the vertical pass
const FOOT_PROBE_INSET: f32 = 2.0;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Which sides a body touched during one resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
    pub floor: bool,
    pub ceiling: bool,
}

impl Contacts {
    pub fn wall(&self) -> bool {
        self.left || self.right
    }
}

/// Kinematic box moved against a tile world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Put the body back at `pos`, at rest and airborne
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }
}

/// Advance `body` by its velocity for `dt`, resolving against `world`.
///
/// `on_ground` is cleared before the vertical pass and only set again by a
/// floor contact this tick.
pub fn move_and_collide<W: TileWorld + ?Sized>(body: &mut Body, world: &W, dt: f32) -> Contacts {
    let mut contacts = Contacts::default();
    let (w, h) = (body.size.x, body.size.y);

    // Horizontal pass
    let dx = (body.vel.x * dt).clamp(-MAX_STEP, MAX_STEP);
    body.pos.x += dx;

    if body.vel.x > 0.0 {
        let edge = body.pos.x + w;
        if world.is_solid(edge, body.pos.y) || world.is_solid(edge, body.pos.y + h - SIDE_PROBE_INSET) {
            body.pos.x = tile_floor(edge) - w - WALL_EPSILON;
            body.vel.x = 0.0;
            contacts.right = true;
        }
    } else if body.vel.x < 0.0 {
        let edge = body.pos.x;
        if world.is_solid(edge, body.pos.y) || world.is_solid(edge, body.pos.y + h - SIDE_PROBE_INSET) {
            body.pos.x = tile_floor(edge) + TILE_SIZE + WALL_EPSILON;
            body.vel.x = 0.0;
            contacts.left = true;
        }
    }

    // Vertical pass
    let dy = (body.vel.y * dt).clamp(-MAX_STEP, MAX_STEP);
    body.pos.y += dy;
    body.on_ground = false;

    if body.vel.y >= 0.0 {
        // Resting contact (vy == 0) counts as support
        let feet = body.pos.y + h;
        if world.is_solid(body.pos.x + FOOT_PROBE_INSET, feet)
            || world.is_solid(body.pos.x + w - FOOT_PROBE_INSET, feet)
        {
            body.pos.y = tile_floor(feet) - h;
            body.vel.y = 0.0;
            body.on_ground = true;
            contacts.floor = true;
        }
    } else {
        let head = body.pos.y;
        if world.is_solid(body.pos.x + FOOT_PROBE_INSET, head)
            || world.is_solid(body.pos.x + w - FOOT_PROBE_INSET, head)
        {
            body.pos.y = tile_floor(head) + TILE_SIZE;
            body.vel.y = 0.0;
            contacts.ceiling = true;
        }
    }

    contacts
}
