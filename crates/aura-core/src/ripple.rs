//! Expanding ripple rings and the fixed ring buffer that recycles them.

use crate::constants::*;
use glam::Vec3;
use std::time::Duration;

/// Ripple alpha for a given radius: full `base_alpha` at the center, zero at
/// `max_radius`.
#[inline]
pub fn ripple_alpha(radius: f32, max_radius: f32, base_alpha: f32) -> f32 {
    if max_radius <= 0.0 {
        return 0.0;
    }
    (1.0 - radius / max_radius).clamp(0.0, 1.0) * base_alpha
}

#[derive(Clone, Debug, PartialEq)]
pub struct RippleInstance {
    pub origin: Vec3,
    pub radius: f32,
    pub max_radius: f32,
    pub speed: f32,
    pub base_alpha: f32,
    pub active: bool,
}

impl RippleInstance {
    pub fn new(max_radius: f32, base_alpha: f32) -> Self {
        Self {
            origin: Vec3::ZERO,
            radius: 0.0,
            max_radius,
            speed: RIPPLE_SPEED,
            base_alpha,
            active: false,
        }
    }

    pub fn start(&mut self, origin: Vec3) {
        self.origin = origin;
        self.radius = 0.0;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Grow the ring. Returns false once it has reached its full radius.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.radius = (self.radius + dt.as_secs_f32() * self.speed).min(self.max_radius);
        if self.radius >= self.max_radius {
            self.active = false;
        }
        self.active
    }

    pub fn progress(&self) -> f32 {
        if self.max_radius <= 0.0 {
            1.0
        } else {
            (self.radius / self.max_radius).clamp(0.0, 1.0)
        }
    }

    pub fn alpha(&self) -> f32 {
        if self.active {
            ripple_alpha(self.radius, self.max_radius, self.base_alpha)
        } else {
            0.0
        }
    }
}

/// Fixed set of ripples handed out round-robin; the oldest is overwritten
/// when all are busy.
#[derive(Clone, Debug)]
pub struct RipplePool {
    ripples: Vec<RippleInstance>,
    next: usize,
}

impl RipplePool {
    pub fn new(count: usize, max_radius: f32, base_alpha: f32) -> Self {
        let count = count.clamp(1, RIPPLE_POOL_MAX);
        Self {
            ripples: vec![RippleInstance::new(max_radius, base_alpha); count],
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    /// Start the next ripple in the ring at `origin`; returns its slot.
    pub fn fire(&mut self, origin: Vec3) -> usize {
        let slot = self.next;
        self.ripples[slot].start(origin);
        self.next = (self.next + 1) % self.ripples.len();
        slot
    }

    pub fn tick(&mut self, dt: Duration) {
        for ripple in &mut self.ripples {
            ripple.tick(dt);
        }
    }

    pub fn stop_all(&mut self) {
        for ripple in &mut self.ripples {
            ripple.stop();
        }
    }

    pub fn set_max_radius(&mut self, max_radius: f32) {
        for ripple in &mut self.ripples {
            ripple.max_radius = max_radius;
            ripple.radius = ripple.radius.min(max_radius);
        }
    }

    pub fn ripples(&self) -> &[RippleInstance] {
        &self.ripples
    }

    pub fn active(&self) -> impl Iterator<Item = &RippleInstance> {
        self.ripples.iter().filter(|r| r.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}
