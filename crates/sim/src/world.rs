//! Simulation state.
//!
//! Owns the particle storage and the quadtree built over it. The particle
//! vector is allocated once and never resized, so the indices held by the
//! tree stay valid for the whole run.

use crate::collision;
use crate::config::{Config, IndexConfig, ParticleConfig};
use crate::error::SimError;
use crate::particle::Particle;
use glam::Vec2;
use quadtree::{Circle, QuadTree, Rect, RefreshStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Per-frame diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Points found in the index after refresh.
    pub indexed: usize,
    /// Cells in the index.
    pub cells: usize,
    /// Deepest cell level.
    pub depth: usize,
    /// Candidate pairs returned by the broad phase.
    pub candidates: usize,
    /// Pairs that were actually overlapping.
    pub contacts: usize,
    /// Particles the index could not place.
    pub dropped: usize,
    /// Whether this frame used a full rebuild.
    pub rebuilt: bool,
}

/// The particle world.
#[derive(Debug)]
pub struct Simulation {
    particles: Vec<Particle>,
    index: QuadTree,
    size: Vec2,
    settings: ParticleConfig,
    index_settings: IndexConfig,
    attractor: Option<Vec2>,
    frame: u64,
    /// Reused broad-phase pair buffer.
    pairs: Vec<(usize, usize)>,
}

impl Simulation {
    /// Create a world with randomly placed particles.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = match config.sim.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let p = &config.particles;
        let (w, h) = (config.world.width as f32, config.world.height as f32);
        let particles = (0..p.count)
            .map(|_| {
                let position = Vec2::new(
                    rng.random_range(p.radius..w - p.radius),
                    rng.random_range(p.radius..h - p.radius),
                );
                let velocity = if p.initial_max_speed > 0.0 {
                    Vec2::new(
                        rng.random_range(-p.initial_max_speed..p.initial_max_speed),
                        rng.random_range(-p.initial_max_speed..p.initial_max_speed),
                    )
                } else {
                    Vec2::ZERO
                };
                Particle::new(position, velocity, p.mass)
            })
            .collect();

        Self::with_particles(config, particles)
    }

    /// Create a world over an explicit particle set.
    pub fn with_particles(config: &Config, particles: Vec<Particle>) -> Result<Self, SimError> {
        config.validate()?;
        let boundary = Rect::new(0, 0, config.world.width as i32, config.world.height as i32);
        let (index, report) =
            QuadTree::from_points(boundary, config.index.capacity, config.index.max_depth, &particles)?;

        if !report.dropped.is_empty() {
            warn!(count = report.dropped.len(), "Particles spawned outside the world");
        }
        info!(
            particles = particles.len(),
            cells = index.stats().cells,
            refresh = ?config.index.refresh,
            "Simulation initialized"
        );

        Ok(Self {
            pairs: Vec::with_capacity(particles.len()),
            particles,
            index,
            size: Vec2::new(config.world.width as f32, config.world.height as f32),
            settings: config.particles.clone(),
            index_settings: config.index.clone(),
            attractor: config.particles.attractor.map(Vec2::from),
            frame: 0,
        })
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn index(&self) -> &QuadTree {
        &self.index
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Cell rectangles for an overlay renderer.
    pub fn cell_boundaries(&self) -> Vec<Rect> {
        self.index.cell_boundaries()
    }

    pub fn set_attractor(&mut self, attractor: Option<Vec2>) {
        self.attractor = attractor;
    }

    /// Advance the world by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> Result<FrameStats, SimError> {
        self.frame += 1;

        let mut strategy = self.refresh_strategy();
        let mut report = self.index.refresh(&self.particles, strategy)?;
        if self.index.count() != self.particles.len() {
            // Refresh only moves points the tree still holds; particles dropped
            // earlier come back through a build over the whole set.
            warn!(
                frame = self.frame,
                indexed = self.index.count(),
                particles = self.particles.len(),
                "Index lost track of particles, rebuilding from all particles"
            );
            let (index, recovered) = QuadTree::from_points(
                self.index.boundary(),
                self.index.capacity(),
                self.index.max_depth(),
                &self.particles,
            )?;
            self.index = index;
            report = recovered;
            strategy = RefreshStrategy::Rebuild;
        }
        let tree = self.index.stats();

        self.collect_pairs();
        let contacts = self.resolve_collisions(dt);
        self.advance(dt);

        let stats = FrameStats {
            frame: self.frame,
            indexed: tree.points,
            cells: tree.cells,
            depth: tree.max_depth,
            candidates: self.pairs.len(),
            contacts,
            dropped: report.dropped.len(),
            rebuilt: strategy == RefreshStrategy::Rebuild,
        };
        debug!(?stats, "Frame complete");
        Ok(stats)
    }

    fn refresh_strategy(&self) -> RefreshStrategy {
        match self.index_settings.refresh {
            RefreshStrategy::Incremental
                if self.index_settings.rebuild_interval > 0
                    && self.frame % self.index_settings.rebuild_interval == 0 =>
            {
                RefreshStrategy::Rebuild
            }
            strategy => strategy,
        }
    }

    /// Broad phase: every unordered pair within reach, once.
    fn collect_pairs(&mut self) {
        self.pairs.clear();
        let reach = 2.0 * self.settings.radius;
        for (i, particle) in self.particles.iter().enumerate() {
            let range = Circle::new(particle.position, reach).into();
            for j in self.index.query(&self.particles, &range) {
                if j > i {
                    self.pairs.push((i, j));
                }
            }
        }
    }

    fn resolve_collisions(&mut self, dt: f32) -> usize {
        let radius = self.settings.radius;
        let max_speed = self.settings.max_speed;
        let mut contacts = 0;

        for &(i, j) in &self.pairs {
            let (a, b) = pair_mut(&mut self.particles, i, j);
            if collision::resolve_elastic(a, b, radius).is_some() {
                // Push the pair apart along their new velocities.
                a.integrate(2.0 * dt, max_speed);
                b.integrate(2.0 * dt, max_speed);
                contacts += 1;
            }
        }

        contacts
    }

    fn advance(&mut self, dt: f32) {
        let radius = self.settings.radius;
        let max_speed = self.settings.max_speed;
        let attraction = self.settings.attraction;

        for particle in &mut self.particles {
            particle.acceleration = match self.attractor {
                Some(target) => (target - particle.position) * (attraction / particle.mass),
                None => Vec2::ZERO,
            };
            particle.integrate(dt, max_speed);
            bounce(particle, radius, self.size);
        }
    }
}

/// Reflect off the world edges, keeping the particle fully inside.
fn bounce(particle: &mut Particle, radius: f32, size: Vec2) {
    let p = &mut particle.position;
    let v = &mut particle.velocity;

    if p.x < radius || p.x > size.x - radius {
        v.x = -v.x;
        p.x = if p.x < radius { radius } else { size.x - radius };
    }
    if p.y < radius || p.y > size.y - radius {
        v.y = -v.y;
        p.y = if p.y < radius { radius } else { size.y - radius };
    }
}

/// Two distinct mutable particles, `i < j`.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
