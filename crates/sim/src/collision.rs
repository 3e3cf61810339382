//! Collision response between particles of equal radius.

use glam::Vec2;

use crate::particle::Particle;

/// Contact between two overlapping particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first particle towards the second.
    pub normal: Vec2,
    /// Centre distance.
    pub distance: f32,
    /// Penetration depth (`2r - distance`).
    pub overlap: f32,
    /// Impulse magnitude applied, 0 when the pair was already separating.
    pub impulse: f32,
}

/// Geometry of a potential contact, without touching velocities.
#[inline]
pub fn check_contact(a: Vec2, b: Vec2, radius: f32) -> Option<(Vec2, f32)> {
    let delta = b - a;
    let squared = delta.length_squared();
    let reach = 2.0 * radius;
    if squared >= reach * reach || squared == 0.0 {
        return None;
    }
    let distance = squared.sqrt();
    Some((delta / distance, distance))
}

/// Exchange momentum along the contact normal.
///
/// Coincident particles have no normal and are left alone.
pub fn resolve_elastic(a: &mut Particle, b: &mut Particle, radius: f32) -> Option<Contact> {
    let (normal, distance) = check_contact(a.position, b.position, radius)?;

    let approach = (a.velocity - b.velocity).dot(normal);
    let impulse = if approach > 0.0 {
        2.0 * approach / (a.mass + b.mass)
    } else {
        0.0
    };

    a.velocity -= normal * (impulse * b.mass);
    b.velocity += normal * (impulse * a.mass);

    Some(Contact {
        normal,
        distance,
        overlap: 2.0 * radius - distance,
        impulse,
    })
}
