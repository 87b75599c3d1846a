use std::f64::consts::TAU;

use crate::geom::Point;

pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 30.0;
/// Per-axis bound on the composite organic offset.
pub const MAX_ORGANIC_OFFSET: f64 = 50.0;
pub const FOLLOW_FACTOR: f64 = 0.18;
pub const DRAG_FACTOR: f64 = 0.35;
pub const IMPULSE_CHANCE: f64 = 0.02;
pub const IMPULSE_DURATION_MS: f64 = 600.0;
pub const IMPULSE_STRENGTH: f64 = 26.0;
pub const STRETCH_DISTANCE: f64 = 120.0;
pub const STRETCH_MAX: f64 = 1.6;
pub const SQUASH_MIN: f64 = 0.7;

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

pub fn rand_unit(seed: u32, salt: u32) -> f64 {
    let mixed = splitmix32(seed ^ salt.wrapping_mul(0x2545_F491));
    let top = mixed >> 8;
    top as f64 / (1u32 << 24) as f64
}

/// Lets a per-frame callback through at most once per interval.
#[derive(Clone, Debug)]
pub struct FrameThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl FrameThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.interval_ms && now_ms >= last => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_MS)
    }
}

fn breathing(t: f64) -> Point {
    Point::new(
        (t * 0.8).sin() * 10.0 + (t * 0.53).cos() * 6.0,
        (t * 0.7).cos() * 9.0 + (t * 0.41).sin() * 5.0,
    )
}

fn chaotic(t: f64) -> Point {
    Point::new(
        (t * 3.7).sin() * (t * 2.3).cos() * 4.0,
        (t * 4.1).cos() * (t * 1.9).sin() * 4.0,
    )
}

/// Composite offset of the glow relative to the pointer, clamped per axis to
/// [`MAX_ORGANIC_OFFSET`] whatever the inputs.
pub fn organic_offset(now_ms: f64, velocity: Point, impulse: Point) -> Point {
    let t = now_ms / 1000.0;
    let drag = velocity * -DRAG_FACTOR;
    let raw = breathing(t) + chaotic(t) + impulse + drag;
    raw.clamp_axes(MAX_ORGANIC_OFFSET)
}

#[derive(Clone, Copy, Debug)]
struct Impulse {
    vector: Point,
    started_ms: f64,
}

impl Impulse {
    fn at(&self, now_ms: f64) -> Option<Point> {
        let elapsed = now_ms - self.started_ms;
        if !(0.0..IMPULSE_DURATION_MS).contains(&elapsed) {
            return None;
        }
        Some(self.vector * (1.0 - elapsed / IMPULSE_DURATION_MS))
    }
}

/// Lagged glow position that eases toward the pointer plus an organic offset.
#[derive(Clone, Debug)]
pub struct OrganicMotion {
    glow: Point,
    last_pointer: Option<Point>,
    velocity: Point,
    impulse: Option<Impulse>,
    seed: u32,
    ticks: u32,
    throttle: FrameThrottle,
}

impl OrganicMotion {
    pub fn new(seed: u32) -> Self {
        Self {
            glow: Point::ZERO,
            last_pointer: None,
            velocity: Point::ZERO,
            impulse: None,
            seed,
            ticks: 0,
            throttle: FrameThrottle::default(),
        }
    }

    pub fn glow(&self) -> Point {
        self.glow
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Forget history so the next tick starts at the pointer.
    pub fn reset(&mut self) {
        self.last_pointer = None;
        self.velocity = Point::ZERO;
        self.impulse = None;
        self.throttle.reset();
    }

    /// Advances one frame. Returns the new glow position, or `None` when the
    /// throttle swallowed this frame.
    pub fn tick(&mut self, now_ms: f64, pointer: Point) -> Option<Point> {
        if !self.throttle.ready(now_ms) {
            return None;
        }
        self.ticks = self.ticks.wrapping_add(1);
        let Some(last) = self.last_pointer.replace(pointer) else {
            self.glow = pointer;
            return Some(self.glow);
        };
        self.velocity = pointer - last;
        self.maybe_spawn_impulse(now_ms);
        let impulse = self
            .impulse
            .and_then(|impulse| impulse.at(now_ms))
            .unwrap_or(Point::ZERO);
        let target = pointer + organic_offset(now_ms, self.velocity, impulse);
        self.glow = self.glow + (target - self.glow) * FOLLOW_FACTOR;
        Some(self.glow)
    }

    /// [`tick`](Self::tick) that idles until a pointer position is known, so
    /// the glow never starts out from the viewport origin.
    pub fn follow(&mut self, now_ms: f64, pointer: Option<Point>) -> Option<Point> {
        self.tick(now_ms, pointer?)
    }

    fn maybe_spawn_impulse(&mut self, now_ms: f64) {
        if self
            .impulse
            .is_some_and(|impulse| impulse.at(now_ms).is_some())
        {
            return;
        }
        self.impulse = None;
        if rand_unit(self.seed, self.ticks) >= IMPULSE_CHANCE {
            return;
        }
        let angle = rand_unit(self.seed, self.ticks ^ 0xA5A5_A5A5) * TAU;
        let strength = IMPULSE_STRENGTH * (0.5 + rand_unit(self.seed, !self.ticks) * 0.5);
        self.impulse = Some(Impulse {
            vector: Point::new(angle.cos() * strength, angle.sin() * strength),
            started_ms: now_ms,
        });
    }
}

/// Ellipse deformation of the glow, stretched along the glow→pointer vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowShape {
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle_deg: f64,
}

impl Default for GlowShape {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            angle_deg: 0.0,
        }
    }
}

pub fn glow_stretch(glow: Point, pointer: Point) -> GlowShape {
    let delta = pointer - glow;
    let distance = delta.length();
    if !distance.is_finite() || distance < f64::EPSILON {
        return GlowShape::default();
    }
    let amount = (distance / STRETCH_DISTANCE).min(1.0);
    GlowShape {
        scale_x: 1.0 + amount * (STRETCH_MAX - 1.0),
        scale_y: 1.0 - amount * (1.0 - SQUASH_MIN),
        angle_deg: delta.y.atan2(delta.x).to_degrees(),
    }
}
