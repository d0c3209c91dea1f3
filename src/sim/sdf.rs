//! Distance field queries
//!
//! Evaluates the level layer as one signed distance field. Circles are
//! smooth-blended so neighbouring bodies merge into one surface, boxes use a
//! hard union, and trigger shapes (portals, maggots) feed a separate
//! "overlapping" minimum that never blocks movement.
//!
//! Any GPU shader drawing the scene must use the same formulas or the visuals
//! drift from what the player collides with.

use glam::Vec2;

use super::player::Player;
use super::primitive::{PrimitiveKind, PrimitiveLayer};
use crate::consts::*;
use crate::math::{lerp_growth, smooth_min};
use crate::settings::FieldTuning;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box centered at the origin
#[inline]
pub fn sd_box(p: Vec2, half_extents: Vec2) -> f32 {
    let d = p.abs() - half_extents;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Compute SDF gradient (surface normal) using central differences
///
/// Returns zero where the field is flat instead of dividing by zero.
pub fn sdf_gradient<F>(p: Vec2, eps: f32, sdf: F) -> Vec2
where
    F: Fn(Vec2) -> f32,
{
    let dx = sdf(p + Vec2::new(eps, 0.0)) - sdf(p - Vec2::new(eps, 0.0));
    let dy = sdf(p + Vec2::new(0.0, eps)) - sdf(p - Vec2::new(0.0, eps));
    Vec2::new(dx, dy).normalize_or_zero()
}

/// Result of a distance query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdfResult {
    /// Clearance to the nearest solid surface (negative when penetrating)
    pub distance: f32,
    /// Level primitive that last lowered `distance`
    pub closest: Option<usize>,
    /// Clearance to the nearest trigger shape
    pub overlapped_distance: f32,
    /// Trigger primitive that last lowered `overlapped_distance`
    pub overlapped: Option<usize>,
}

impl SdfResult {
    /// Nothing found
    pub fn none() -> Self {
        Self {
            distance: DISTANCE_NONE,
            closest: None,
            overlapped_distance: DISTANCE_NONE,
            overlapped: None,
        }
    }

    /// Touching (or inside) a solid surface
    pub fn is_contact(&self, threshold: f32) -> bool {
        self.distance < threshold
    }

    /// Touching (or inside) a trigger shape
    pub fn is_overlapping(&self, threshold: f32) -> bool {
        self.overlapped_distance < threshold
    }
}

/// Evaluate the field at `pos` for a player of the given radius.
///
/// Scans primitives in order up to the first `Invalid`. Primitives whose
/// sampled size is `<= 0` are skipped entirely, which is how shapes switch off
/// at some growth states. The player's animation clock does not affect the
/// field.
pub fn sdf_distance(
    layer: &PrimitiveLayer,
    pos: Vec2,
    player: &Player,
    tuning: &FieldTuning,
) -> SdfResult {
    let mut result = SdfResult::none();

    for (i, primitive) in layer.live() {
        let prev_distance = result.distance;
        let prev_overlapped = result.overlapped_distance;

        let size1 = lerp_growth(primitive.growth_sizes1, player.growth_factor);
        let size2 = lerp_growth(primitive.growth_sizes2, player.growth_factor);
        if size1 <= 0.0 {
            continue;
        }

        match primitive.kind {
            PrimitiveKind::Circle | PrimitiveKind::SpikedCircle => {
                let d = sd_circle(pos, primitive.position, size1);
                result.distance = smooth_min(result.distance, d, tuning.smooth_min_blend);
            }
            PrimitiveKind::Box => {
                let half = Vec2::new(size1, size2) * tuning.box_scale;
                let d = sd_box(pos - primitive.position, half);
                result.distance = result.distance.min(d);
            }
            kind if kind.is_overlapping() => {
                let d = sd_circle(pos, primitive.position, size1);
                result.overlapped_distance = result.overlapped_distance.min(d);
            }
            // Decoration only
            _ => {}
        }

        if prev_distance > result.distance {
            result.closest = Some(i);
        }
        if prev_overlapped > result.overlapped_distance {
            result.overlapped = Some(i);
        }
    }

    result.distance -= player.radius;
    result.overlapped_distance -= player.radius;
    result
}

/// Outward surface normal of the solid field at `pos`
///
/// Uses a wide sample offset (`FieldTuning::normal_epsilon`) so the estimate
/// stays stable across the creases where shapes meet. Triggers are ignored.
/// Returns zero where the field is flat.
pub fn surface_normal(
    layer: &PrimitiveLayer,
    pos: Vec2,
    player: &Player,
    tuning: &FieldTuning,
) -> Vec2 {
    sdf_gradient(pos, tuning.normal_epsilon, |p| {
        sdf_distance(layer, p, player, tuning).distance
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::primitive::Primitive;
    use glam::Vec3;

    fn player(radius: f32) -> Player {
        Player::new(Vec2::ZERO, radius)
    }

    fn layer(prims: &[Primitive]) -> PrimitiveLayer {
        let mut layer = PrimitiveLayer::default();
        for p in prims {
            layer.push(*p);
        }
        layer
    }

    fn circle(entity: usize, pos: Vec2, r: f32) -> Primitive {
        Primitive::new(PrimitiveKind::Circle, entity, pos, Vec3::splat(r))
    }

    #[test]
    fn test_sd_circle() {
        let center = Vec2::new(100.0, 100.0);
        assert!((sd_circle(center, center, 50.0) - (-50.0)).abs() < 0.001);
        assert!(sd_circle(Vec2::new(150.0, 100.0), center, 50.0).abs() < 0.001);
        assert!((sd_circle(Vec2::new(200.0, 100.0), center, 50.0) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_sd_box() {
        let half = Vec2::new(10.0, 5.0);
        assert!((sd_box(Vec2::ZERO, half) - (-5.0)).abs() < 1e-5);
        assert!((sd_box(Vec2::new(15.0, 0.0), half) - 5.0).abs() < 1e-5);
        // Corner region uses euclidean distance
        assert!((sd_box(Vec2::new(13.0, 9.0), half) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_lone_circle_at_center() {
        let l = layer(&[circle(0, Vec2::new(200.0, 200.0), 40.0)]);
        let r = sdf_distance(&l, Vec2::new(200.0, 200.0), &player(25.0), &FieldTuning::default());
        // Blending against the empty seed is a no-op
        assert!((r.distance - (-40.0 - 25.0)).abs() < 1e-3);
        assert_eq!(r.closest, Some(0));
        assert_eq!(r.overlapped, None);
    }

    #[test]
    fn test_empty_layer_reports_nothing() {
        let l = PrimitiveLayer::default();
        let r = sdf_distance(&l, Vec2::ZERO, &player(10.0), &FieldTuning::default());
        assert_eq!(r.closest, None);
        assert_eq!(r.overlapped, None);
        assert_eq!(r.distance, DISTANCE_NONE - 10.0);
    }

    #[test]
    fn test_smooth_blend_fills_seam() {
        let tuning = FieldTuning::default();
        let a = circle(0, Vec2::new(0.0, 0.0), 20.0);
        let b = circle(1, Vec2::new(42.0, 0.0), 20.0);
        let both = layer(&[a, b]);
        let q = Vec2::new(21.0, 0.0);

        let d1 = sd_circle(q, a.position, 20.0);
        let d2 = sd_circle(q, b.position, 20.0);
        let p = player(0.0);
        let combined = sdf_distance(&both, q, &p, &tuning).distance;
        assert!(combined < d1 && combined < d2);
        assert!(combined >= d1.min(d2) - tuning.smooth_min_blend / 4.0);
    }

    #[test]
    fn test_zero_size_skipped() {
        let l = layer(&[
            Primitive::new(PrimitiveKind::Circle, 0, Vec2::ZERO, Vec3::new(0.0, 50.0, 50.0)),
            circle(1, Vec2::new(500.0, 0.0), 10.0),
        ]);
        let r = sdf_distance(&l, Vec2::ZERO, &player(0.0), &FieldTuning::default());
        assert_eq!(r.closest, Some(1));
        assert!((r.distance - 490.0).abs() < 1e-3);
    }

    #[test]
    fn test_box_uses_collision_scale() {
        let l = layer(&[Primitive::new(PrimitiveKind::Box, 0, Vec2::ZERO, Vec3::splat(100.0))
            .with_sizes2(Vec3::splat(50.0))]);
        let r = sdf_distance(&l, Vec2::new(200.0, 0.0), &player(0.0), &FieldTuning::default());
        assert!((r.distance - (200.0 - 85.0)).abs() < 1e-3);
    }

    #[test]
    fn test_triggers_do_not_block() {
        let l = layer(&[
            Primitive::new(PrimitiveKind::Portal, 0, Vec2::ZERO, Vec3::splat(30.0)),
            Primitive::new(PrimitiveKind::Maggot, 1, Vec2::new(10.0, 0.0), Vec3::splat(10.0)),
        ]);
        let r = sdf_distance(&l, Vec2::ZERO, &player(5.0), &FieldTuning::default());
        assert_eq!(r.closest, None);
        assert_eq!(r.overlapped, Some(0));
        assert!((r.overlapped_distance - (-35.0)).abs() < 1e-3);
    }

    #[test]
    fn test_closest_tie_goes_to_first() {
        let l = layer(&[
            Primitive::new(PrimitiveKind::Portal, 0, Vec2::new(-10.0, 0.0), Vec3::splat(5.0)),
            Primitive::new(PrimitiveKind::Portal, 1, Vec2::new(10.0, 0.0), Vec3::splat(5.0)),
        ]);
        let r = sdf_distance(&l, Vec2::ZERO, &player(0.0), &FieldTuning::default());
        assert_eq!(r.overlapped, Some(0));
    }

    #[test]
    fn test_decoration_ignored() {
        let l = layer(&[Primitive::new(
            PrimitiveKind::BoxTextured,
            0,
            Vec2::ZERO,
            Vec3::splat(100.0),
        )]);
        let r = sdf_distance(&l, Vec2::ZERO, &player(0.0), &FieldTuning::default());
        assert_eq!(r, SdfResult::none());
    }

    #[test]
    fn test_normal_points_away_from_circle() {
        let l = layer(&[circle(0, Vec2::ZERO, 50.0)]);
        let n = surface_normal(&l, Vec2::new(60.0, 0.0), &player(0.0), &FieldTuning::default());
        assert!((n - Vec2::X).length() < 1e-3, "got {n:?}");
    }

    #[test]
    fn test_normal_of_flat_field_is_zero() {
        let l = PrimitiveLayer::default();
        let n = surface_normal(&l, Vec2::new(60.0, 0.0), &player(0.0), &FieldTuning::default());
        assert_eq!(n, Vec2::ZERO);
    }
}
