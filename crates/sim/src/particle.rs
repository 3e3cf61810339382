//! Simulated particle.

use glam::Vec2;
use quadtree::Positioned;

/// A point mass moving in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in world coordinates.
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub mass: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: 1.0,
        }
    }
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, mass: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            mass,
        }
    }

    /// Explicit Euler step.
    ///
    /// Velocity components past `max_speed` keep growing, but only with the
    /// square root of the excess.
    pub fn integrate(&mut self, dt: f32, max_speed: f32) {
        self.velocity += self.acceleration * dt;
        self.velocity.x = soften(self.velocity.x, max_speed);
        self.velocity.y = soften(self.velocity.y, max_speed);
        self.position += self.velocity * dt;
    }
}

impl Positioned for Particle {
    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }
}

#[inline]
fn soften(v: f32, max_speed: f32) -> f32 {
    let speed = v.abs();
    if speed > max_speed {
        ((max_speed * 4.0 * speed).sqrt() - max_speed).copysign(v)
    } else {
        v
    }
}
