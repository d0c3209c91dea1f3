//! Entity-to-primitive compiler
//!
//! Rebuilds both primitive layers from the live entity list. Runs once per
//! step after gameplay has mutated the entities, so the layers always describe
//! the scene the next movement query and the renderer will see.

use glam::{Vec2, Vec3};

use super::entity::{EntityKind, EntityList};
use super::player::Player;
use super::primitive::{Primitive, PrimitiveKind, PrimitiveLayer};
use crate::math::lerp_growth;

/// Face sprites are 48x16
const FACE_ASPECT: f32 = 16.0 / 48.0;
/// Mother's mouth toggles open/closed every half second
const MOUTH_STATE_TIME: f32 = 0.5;
/// Mother's face sits below her body center
const MOTHER_FACE_OFFSET: Vec2 = Vec2::new(0.0, 150.0);
const MOTHER_FLOWER_OFFSET: Vec2 = Vec2::new(280.0, 180.0);
const MOTHER_FLOWER_SPRITE: Vec2 = Vec2::new(8.0, 1.0);
const MOTHER_FACE_SPRITE_COLUMN: f32 = 2.0;
const MOTHER_FACE_SPRITE_ROW: f32 = 2.0;
/// Progress per second for particle bursts and text boxes
const PROGRESS_RATE: f32 = 2.0;

/// The two primitive layers of one step
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Collidable shapes (and triggers)
    pub level: PrimitiveLayer,
    /// Decoration drawn on top, never collided against
    pub overlay: PrimitiveLayer,
}

impl Scene {
    /// Clear both layers and refill them from the live entities.
    ///
    /// Also advances per-entity animation state (mouth timer, particle and
    /// text progress) by `dt`.
    pub fn rebuild(&mut self, entities: &mut EntityList, player: &Player, dt: f32) {
        self.level.clear();
        self.overlay.clear();

        for (index, entity) in entities.live_mut() {
            match entity.kind {
                EntityKind::Tumor => {
                    self.level.push(Primitive::new(
                        PrimitiveKind::Circle,
                        index,
                        entity.position,
                        entity.growth_sizes1,
                    ));

                    let (width, height) = face_size(entity.growth_sizes1, player);
                    let face = track_player(entity.position, player.position, width);
                    self.overlay.push(
                        Primitive::new(PrimitiveKind::BoxTextured, index, face, Vec3::splat(width))
                            .with_sizes2(Vec3::splat(height))
                            .with_sprite(entity.sprite_index),
                    );
                }
                EntityKind::Mother => {
                    let mouth_open = entity.timer < MOUTH_STATE_TIME;
                    if entity.is_talking || mouth_open {
                        entity.timer += dt;
                        if entity.timer >= MOUTH_STATE_TIME * 2.0 {
                            entity.timer = 0.0;
                        }
                    }

                    self.level.push(Primitive::new(
                        PrimitiveKind::Circle,
                        index,
                        entity.position,
                        entity.growth_sizes1,
                    ));

                    let (width, height) = face_size(entity.growth_sizes1, player);
                    let mut face =
                        track_player(entity.position + MOTHER_FACE_OFFSET, player.position, width);
                    // Keep the face clear of the flower
                    face.x = face.x.clamp(
                        entity.position.x - width / 2.0,
                        entity.position.x + width / 4.0,
                    );
                    face.y = face.y.max(entity.position.y + height / 4.0);

                    let flower = lerp_growth(entity.growth_sizes1, player.growth_factor) / 8.0;
                    self.overlay.push(
                        Primitive::new(
                            PrimitiveKind::BoxFlower,
                            index,
                            entity.position + MOTHER_FLOWER_OFFSET,
                            Vec3::splat(flower),
                        )
                        .with_sizes2(Vec3::splat(flower))
                        .with_sprite(MOTHER_FLOWER_SPRITE),
                    );

                    let row = MOTHER_FACE_SPRITE_ROW + if mouth_open { 1.0 } else { 0.0 };
                    self.overlay.push(
                        Primitive::new(PrimitiveKind::BoxTextured, index, face, Vec3::splat(width))
                            .with_sizes2(Vec3::splat(height))
                            .with_sprite(Vec2::new(MOTHER_FACE_SPRITE_COLUMN, row)),
                    );
                }
                EntityKind::TCell => {
                    self.level.push(Primitive::new(
                        PrimitiveKind::SpikedCircle,
                        index,
                        entity.position,
                        entity.growth_sizes1,
                    ));
                }
                EntityKind::Wall => {
                    self.level.push(
                        Primitive::new(
                            PrimitiveKind::Box,
                            index,
                            entity.position,
                            entity.growth_sizes1,
                        )
                        .with_sizes2(entity.growth_sizes2),
                    );
                }
                EntityKind::Portal => {
                    self.level.push(Primitive::new(
                        PrimitiveKind::Portal,
                        index,
                        entity.position,
                        entity.growth_sizes1,
                    ));
                }
                EntityKind::Maggot => {
                    self.level.push(Primitive::new(
                        PrimitiveKind::Maggot,
                        index,
                        entity.position,
                        entity.growth_sizes1,
                    ));
                }
                EntityKind::Particles => {
                    entity.growth_sizes1.z = (entity.growth_sizes1.z + dt * PROGRESS_RATE).min(1.0);
                    self.overlay.push(Primitive::new(
                        PrimitiveKind::Particles,
                        index,
                        entity.position,
                        entity.growth_sizes1,
                    ));
                }
                EntityKind::BoxText => {
                    let step = dt * PROGRESS_RATE;
                    let z = if entity.should_grow {
                        entity.growth_sizes1.z + step
                    } else {
                        entity.growth_sizes1.z - step
                    };
                    entity.growth_sizes1.z = z.clamp(0.0, 1.0);
                    self.overlay.push(
                        Primitive::new(
                            PrimitiveKind::BoxText,
                            index,
                            entity.position,
                            entity.growth_sizes1,
                        )
                        .with_sizes2(entity.growth_sizes2)
                        .with_sprite(entity.sprite_index),
                    );
                }
                // Ends the live range; never yielded
                EntityKind::Invalid => {}
            }
        }
    }
}

/// Face box half-width and half-height for a body of the given sizes
fn face_size(growth_sizes: Vec3, player: &Player) -> (f32, f32) {
    let width = lerp_growth(growth_sizes, player.growth_factor) / 2.0;
    (width, width * FACE_ASPECT)
}

/// Move a face from its anchor toward the player, at most `max_offset` away.
///
/// A player sitting exactly on the anchor leaves the face at the anchor.
fn track_player(anchor: Vec2, player: Vec2, max_offset: f32) -> Vec2 {
    let to_player = player - anchor;
    let reach = (to_player.length() / 4.0).min(max_offset);
    anchor + to_player.normalize_or_zero() * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Entity;

    fn compile(entities: &mut EntityList, player: &Player) -> Scene {
        let mut scene = Scene::default();
        scene.rebuild(entities, player, 1.0 / 60.0);
        scene
    }

    #[test]
    fn test_layers_per_kind() {
        let mut entities = EntityList::default();
        entities.push(Entity::fixed(EntityKind::Tumor, Vec2::new(100.0, 100.0), 80.0));
        entities.push(Entity::fixed(EntityKind::TCell, Vec2::new(300.0, 100.0), 40.0));
        entities.push(
            Entity::fixed(EntityKind::Wall, Vec2::new(500.0, 100.0), 50.0)
                .with_sizes2(Vec3::splat(20.0)),
        );
        entities.push(Entity::fixed(EntityKind::Portal, Vec2::new(700.0, 100.0), 30.0));
        entities.push(Entity::fixed(EntityKind::Maggot, Vec2::new(900.0, 100.0), 15.0));
        entities.push(Entity::fixed(EntityKind::Particles, Vec2::new(50.0, 50.0), 0.0));
        entities.push(Entity::fixed(EntityKind::BoxText, Vec2::new(800.0, 400.0), 100.0));
        entities.push(Entity::fixed(EntityKind::Mother, Vec2::new(800.0, 600.0), 200.0));

        let scene = compile(&mut entities, &Player::default());

        let level: Vec<(PrimitiveKind, usize)> =
            scene.level.live().map(|(_, p)| (p.kind, p.entity)).collect();
        assert_eq!(
            level,
            vec![
                (PrimitiveKind::Circle, 0),
                (PrimitiveKind::SpikedCircle, 1),
                (PrimitiveKind::Box, 2),
                (PrimitiveKind::Portal, 3),
                (PrimitiveKind::Maggot, 4),
                (PrimitiveKind::Circle, 7),
            ]
        );

        let overlay: Vec<(PrimitiveKind, usize)> =
            scene.overlay.live().map(|(_, p)| (p.kind, p.entity)).collect();
        assert_eq!(
            overlay,
            vec![
                (PrimitiveKind::BoxTextured, 0),
                (PrimitiveKind::Particles, 5),
                (PrimitiveKind::BoxText, 6),
                (PrimitiveKind::BoxFlower, 7),
                (PrimitiveKind::BoxTextured, 7),
            ]
        );

        let wall = scene.level.get(2).unwrap();
        assert_eq!(wall.growth_sizes2, Vec3::splat(20.0));
    }

    #[test]
    fn test_nothing_past_sentinel() {
        let mut entities = EntityList::default();
        entities.push(Entity::fixed(EntityKind::TCell, Vec2::ZERO, 10.0));
        entities.push(Entity::fixed(EntityKind::Tumor, Vec2::ZERO, 10.0));
        entities.push(Entity::default());
        entities.push(Entity::fixed(EntityKind::Wall, Vec2::ZERO, 10.0));
        entities.push(Entity::fixed(EntityKind::Particles, Vec2::ZERO, 0.0));

        let scene = compile(&mut entities, &Player::default());
        for layer in [&scene.level, &scene.overlay] {
            assert!(layer.live().all(|(_, p)| p.entity < 2));
        }
        assert_eq!(scene.level.len(), 2);
        assert_eq!(scene.overlay.len(), 1);
    }

    #[test]
    fn test_rebuild_drops_stale_primitives() {
        let mut entities = EntityList::default();
        entities.push(Entity::fixed(EntityKind::TCell, Vec2::ZERO, 10.0));
        entities.push(Entity::fixed(EntityKind::Maggot, Vec2::ZERO, 10.0));
        let mut scene = compile(&mut entities, &Player::default());
        assert_eq!(scene.level.len(), 2);

        entities.get_mut(1).unwrap().kind = EntityKind::Particles;
        scene.rebuild(&mut entities, &Player::default(), 0.0);
        assert_eq!(scene.level.len(), 1);
        assert_eq!(scene.overlay.len(), 1);
    }

    #[test]
    fn test_tumor_face_tracks_player_within_body() {
        let mut entities = EntityList::default();
        entities.push(
            Entity::fixed(EntityKind::Tumor, Vec2::new(100.0, 100.0), 80.0)
                .with_sprite(Vec2::new(1.0, 4.0)),
        );

        // Far away: offset capped at the face half-width (40)
        let far = Player::new(Vec2::new(1000.0, 100.0), 25.0);
        let scene = compile(&mut entities, &far);
        let face = scene.overlay.get(0).unwrap();
        assert!((face.position - Vec2::new(140.0, 100.0)).length() < 1e-3);
        assert_eq!(face.growth_sizes1, Vec3::splat(40.0));
        assert!((face.growth_sizes2.x - 40.0 / 3.0).abs() < 1e-4);
        assert_eq!(face.sprite_index, Vec2::new(1.0, 4.0));

        // Close: a quarter of the distance
        let near = Player::new(Vec2::new(100.0, 140.0), 25.0);
        let scene = compile(&mut entities, &near);
        let face = scene.overlay.get(0).unwrap();
        assert!((face.position - Vec2::new(100.0, 110.0)).length() < 1e-3);
    }

    #[test]
    fn test_face_stays_put_when_player_on_anchor() {
        let mut entities = EntityList::default();
        entities.push(Entity::fixed(EntityKind::Tumor, Vec2::new(100.0, 100.0), 80.0));
        let scene = compile(&mut entities, &Player::new(Vec2::new(100.0, 100.0), 25.0));
        let face = scene.overlay.get(0).unwrap();
        assert_eq!(face.position, Vec2::new(100.0, 100.0));
        assert!(face.position.is_finite());
    }

    #[test]
    fn test_mother_face_clamped_and_mouth_animates() {
        let mut entities = EntityList::default();
        let mut mother = Entity::fixed(EntityKind::Mother, Vec2::new(800.0, 300.0), 200.0);
        mother.is_talking = true;
        entities.push(mother);

        // Player far to the right: face x clamps to px + w/4 = 825
        let player = Player::new(Vec2::new(1600.0, 450.0), 25.0);
        let mut scene = Scene::default();
        scene.rebuild(&mut entities, &player, 0.125);

        let flower = scene.overlay.get(0).unwrap();
        assert_eq!(flower.kind, PrimitiveKind::BoxFlower);
        assert_eq!(flower.position, Vec2::new(1080.0, 480.0));
        assert_eq!(flower.growth_sizes1, Vec3::splat(25.0));
        assert_eq!(flower.sprite_index, MOTHER_FLOWER_SPRITE);

        let face = scene.overlay.get(1).unwrap();
        assert!((face.position.x - 825.0).abs() < 1e-3);
        assert!(face.position.y >= 300.0 + (100.0 * FACE_ASPECT) / 4.0);
        // Timer started at 0: mouth open
        assert_eq!(face.sprite_index, Vec2::new(2.0, 3.0));

        // Half a second in, the mouth closes
        for _ in 0..4 {
            scene.rebuild(&mut entities, &player, 0.125);
        }
        let face = scene.overlay.get(1).unwrap();
        assert_eq!(face.sprite_index, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_quiet_mother_closes_mouth_and_stops() {
        let mut entities = EntityList::default();
        entities.push(Entity::fixed(EntityKind::Mother, Vec2::new(800.0, 300.0), 200.0));
        let player = Player::default();
        let mut scene = Scene::default();
        for _ in 0..20 {
            scene.rebuild(&mut entities, &player, 0.1);
        }
        let timer = entities.get(0).unwrap().timer;
        assert!(timer >= MOUTH_STATE_TIME && timer < MOUTH_STATE_TIME * 2.0);
    }

    #[test]
    fn test_particles_progress_caps_at_one() {
        let mut entities = EntityList::default();
        entities.push(Entity::fixed(EntityKind::Particles, Vec2::ZERO, 0.0));
        let mut scene = Scene::default();
        scene.rebuild(&mut entities, &Player::default(), 0.25);
        assert!((entities.get(0).unwrap().growth_sizes1.z - 0.5).abs() < 1e-6);
        scene.rebuild(&mut entities, &Player::default(), 1.0);
        assert_eq!(entities.get(0).unwrap().growth_sizes1.z, 1.0);
        assert_eq!(scene.overlay.get(0).unwrap().growth_sizes1.z, 1.0);
    }

    #[test]
    fn test_box_text_ramps_both_ways() {
        let mut entities = EntityList::default();
        let mut text = Entity::new(EntityKind::BoxText, Vec2::ZERO, Vec3::new(200.0, 0.0, 0.0));
        text.should_grow = true;
        entities.push(text);
        let mut scene = Scene::default();

        scene.rebuild(&mut entities, &Player::default(), 1.0);
        assert_eq!(entities.get(0).unwrap().growth_sizes1.z, 1.0);

        entities.get_mut(0).unwrap().should_grow = false;
        scene.rebuild(&mut entities, &Player::default(), 0.25);
        assert!((entities.get(0).unwrap().growth_sizes1.z - 0.5).abs() < 1e-6);
        scene.rebuild(&mut entities, &Player::default(), 1.0);
        assert_eq!(entities.get(0).unwrap().growth_sizes1.z, 0.0);
    }
}
