// Ripple rings, bloom growth and the procedural meshes.

use aura_core::constants::{FLOWER_PETALS, RIPPLE_POOL_MAX};
use aura_core::{
    bloom_alpha, bloom_scale, flower_mesh, flower_ring, ripple_alpha, ripple_quad,
    BloomInstance, BloomPhase, MeshVertex, RippleInstance, RipplePool,
};
use glam::Vec3;
use std::time::Duration;

const DT: Duration = Duration::from_millis(125);

#[test]
fn ripple_alpha_never_increases_with_progress() {
    let mut last = f32::INFINITY;
    for i in 0..=100 {
        let radius = i as f32 * 0.05;
        let a = ripple_alpha(radius, 5.0, 0.7);
        assert!(a <= last, "alpha rose at radius {radius}");
        last = a;
    }
    assert_eq!(ripple_alpha(0.0, 5.0, 0.7), 0.7);
    assert_eq!(ripple_alpha(5.0, 5.0, 0.7), 0.0);
    assert_eq!(ripple_alpha(1.0, 0.0, 0.7), 0.0);
}

#[test]
fn ripple_expands_then_stops() {
    let mut ripple = RippleInstance::new(5.0, 0.7);
    ripple.start(Vec3::Y);
    assert!(ripple.tick(DT));
    assert_eq!(ripple.radius, 0.625);
    assert!((ripple.progress() - 0.125).abs() < 1e-6);

    let mut ticks = 1;
    while ripple.tick(DT) {
        ticks += 1;
    }
    // 5 units at 5 units/s is one second.
    assert_eq!(ticks + 1, 8);
    assert!(!ripple.active);
    assert_eq!(ripple.alpha(), 0.0);
}

#[test]
fn pool_round_robins_and_clamps_size() {
    assert_eq!(RipplePool::new(0, 5.0, 1.0).len(), 1);
    assert_eq!(RipplePool::new(99, 5.0, 1.0).len(), RIPPLE_POOL_MAX);

    let mut pool = RipplePool::new(3, 5.0, 1.0);
    let slots: Vec<usize> = (0..5).map(|i| pool.fire(Vec3::X * i as f32)).collect();
    assert_eq!(slots, vec![0, 1, 2, 0, 1]);
    assert_eq!(pool.active_count(), 3);
    assert_eq!(pool.ripples()[0].origin, Vec3::X * 3.0);

    pool.stop_all();
    assert_eq!(pool.active_count(), 0);
}

#[test]
fn pool_max_radius_shrinks_running_rings() {
    let mut pool = RipplePool::new(2, 5.0, 1.0);
    pool.fire(Vec3::ZERO);
    for _ in 0..4 {
        pool.tick(DT);
    }
    pool.set_max_radius(2.0);
    assert_eq!(pool.ripples()[0].radius, 2.0);
    pool.tick(DT);
    assert_eq!(pool.active_count(), 0);
}

#[test]
fn bloom_grows_linearly_and_saturates() {
    let mut bloom = BloomInstance::new(0.5);
    assert!(bloom.is_dormant());
    bloom.grow();
    for _ in 0..8 {
        bloom.tick(DT);
    }
    assert_eq!(bloom.growth(), 0.5);
    for _ in 0..20 {
        bloom.tick(DT);
    }
    assert_eq!(bloom.growth(), 1.0);
    assert_eq!(bloom.phase(), BloomPhase::Growing);
}

#[test]
fn bloom_withers_over_two_seconds() {
    let mut bloom = BloomInstance::new(1.0);
    bloom.grow();
    for _ in 0..8 {
        bloom.tick(DT);
    }
    bloom.wither();
    for _ in 0..8 {
        bloom.tick(DT);
    }
    assert_eq!(bloom.growth(), 0.5);
    assert!(matches!(bloom.phase(), BloomPhase::Withering { .. }));
    for _ in 0..8 {
        bloom.tick(DT);
    }
    assert_eq!(bloom.growth(), 0.0);
    assert!(bloom.is_dormant());
}

#[test]
fn wither_from_partial_growth_starts_where_it_was() {
    let mut bloom = BloomInstance::new(0.5);
    bloom.grow();
    for _ in 0..4 {
        bloom.tick(DT);
    }
    bloom.wither();
    assert_eq!(
        bloom.phase(),
        BloomPhase::Withering {
            from: 0.25,
            elapsed: 0.0
        }
    );
    // Wither while dormant or withering does nothing.
    bloom.wither();
    assert_eq!(bloom.phase(), BloomPhase::Withering { from: 0.25, elapsed: 0.0 });

    let mut idle = BloomInstance::new(0.5);
    idle.wither();
    assert!(idle.is_dormant());
}

#[test]
fn regrow_resumes_from_current_growth() {
    let mut bloom = BloomInstance::new(1.0);
    bloom.grow();
    for _ in 0..8 {
        bloom.tick(DT);
    }
    bloom.wither();
    for _ in 0..4 {
        bloom.tick(DT);
    }
    assert_eq!(bloom.growth(), 1.0 * (1.0 - 0.5 / 2.0));
    bloom.grow();
    bloom.tick(DT);
    assert_eq!(bloom.growth(), 0.875);
}

#[test]
fn bloom_scale_and_alpha_follow_growth() {
    assert_eq!(bloom_scale(0.5, 1.5), 0.75);
    assert_eq!(bloom_scale(2.0, 1.5), 1.5);
    assert_eq!(bloom_alpha(1.0), 0.8);
    assert_eq!(bloom_alpha(0.0), 0.0);
}

#[test]
fn ripple_quad_covers_max_radius() {
    let quad = ripple_quad(5.0);
    assert_eq!(quad.vertices.len(), 4);
    assert_eq!(quad.triangle_count(), 2);
    for v in &quad.vertices {
        assert_eq!(v.position[0].abs(), 5.0);
        assert_eq!(v.position[1], 0.0);
        assert_eq!(v.position[2].abs(), 5.0);
    }
    assert_eq!(quad.vertex_bytes().len(), 4 * std::mem::size_of::<MeshVertex>());
}

#[test]
fn flower_mesh_has_three_vertices_per_petal() {
    let flower = flower_mesh(FLOWER_PETALS);
    assert_eq!(flower.vertices.len(), 1 + 3 * FLOWER_PETALS);
    assert_eq!(flower.indices.len(), 6 * FLOWER_PETALS);
    assert_eq!(flower.triangle_count(), 2 * FLOWER_PETALS);
    assert!(flower
        .indices
        .iter()
        .all(|&i| (i as usize) < flower.vertices.len()));
    assert_eq!(flower.vertices[0].position, [0.0, 0.0, 0.0]);
}

#[test]
fn flower_ring_is_evenly_spaced() {
    let ring = flower_ring(8, 1.2);
    assert_eq!(ring.len(), 8);
    for p in &ring {
        assert!((p.length() - 1.2).abs() < 1e-5);
        assert_eq!(p.y, 0.0);
    }
    let gap = ring[0].distance(ring[1]);
    for pair in ring.windows(2) {
        assert!((pair[0].distance(pair[1]) - gap).abs() < 1e-5);
    }
    assert!(flower_ring(0, 1.0).is_empty());
}
