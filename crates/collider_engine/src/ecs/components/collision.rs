//! Collider component
//!
//! Attaches one collision shape to an entity. The shape is stored relative
//! to the collider position, so moving the collider moves the shape with
//! it. Queries are pull-based: gameplay asks whether this collider touches
//! another one, or any peer carrying a given tag, and the answer is also
//! cached for the debug overlay.

use std::any::Any;
use std::cell::Cell;

use crate::debug::{shape_outline, CollisionDebugStyle};
use crate::ecs::component::{Component, ComponentError};
use crate::ecs::Entity;
use crate::foundation::math::{xy, Vec2, Vec3};
use crate::physics::collision::{ColliderShape, GeometryError, ShapeKind};
use crate::render::{RenderBackend, RenderContext, ShapeRenderer};

use super::tag_registry::TagRegistry;

/// Resolves a peer entity to its collider
///
/// Implemented by [`crate::ecs::World`]. Returning `None` means the peer no
/// longer exists or has no collider.
pub trait ColliderLookup {
    /// Collider attached to `entity`, if any
    fn collider(&self, entity: Entity) -> Option<&ColliderComponent>;
}

/// Component carrying a collision shape, a tag and a peer registry
#[derive(Debug)]
pub struct ColliderComponent {
    position: Vec3,
    tag: char,
    /// Local to `position`
    shape: ColliderShape,
    tags: TagRegistry,
    style: CollisionDebugStyle,
    renderer: Option<ShapeRenderer>,
    has_collided: Cell<bool>,
}

impl Default for ColliderComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            tag: '\0',
            shape: ColliderShape::None,
            tags: TagRegistry::new(),
            style: CollisionDebugStyle::default(),
            renderer: None,
            has_collided: Cell::new(false),
        }
    }
}

impl ColliderComponent {
    /// Create a collider with no shape at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Set the tag other colliders know this one by
    pub fn with_tag(mut self, tag: char) -> Self {
        self.tag = tag;
        self
    }

    /// Use a specific debug draw style
    pub fn with_debug_style(mut self, style: CollisionDebugStyle) -> Self {
        self.style = style;
        self
    }

    fn local(&self, world_point: &Vec3) -> Vec2 {
        xy(world_point) - xy(&self.position)
    }

    /// Replace the shape with a circle centred at `center` (world space)
    pub fn add_circle(&mut self, center: Vec3, radius: f32) {
        let local = self.local(&center);
        self.shape.set_circle(local, radius);
    }

    /// Replace the shape with a box whose minimum corner is `origin` (world space)
    pub fn add_aabb(&mut self, origin: Vec3, width: f32, height: f32) {
        let local = self.local(&origin);
        self.shape.set_aabb(local, width, height);
    }

    /// Replace the shape with the capsule inscribed in the box at `origin`
    pub fn add_capsule(&mut self, origin: Vec3, width: f32, height: f32) {
        let local = self.local(&origin);
        self.shape.set_fitted_capsule(local, width, height);
    }

    /// Replace the shape with a capsule around the segment `a..b` (world space)
    pub fn add_capsule_segment(&mut self, a: Vec3, b: Vec3, radius: f32) {
        let (a, b) = (self.local(&a), self.local(&b));
        self.shape.set_capsule(a, b, radius);
    }

    /// Replace the shape with a box-shaped polygon at `origin`.
    ///
    /// On error the previous shape is kept.
    pub fn add_polygon(&mut self, origin: Vec3, width: f32, height: f32) -> Result<(), GeometryError> {
        let local = self.local(&origin);
        self.shape.set_box_polygon(local, width, height)
    }

    /// Replace the shape with the convex hull of `points` (world space).
    ///
    /// On error the previous shape is kept.
    pub fn add_polygon_points(&mut self, points: &[Vec3]) -> Result<(), GeometryError> {
        let local: Vec<Vec2> = points.iter().map(|p| self.local(p)).collect();
        self.shape.set_polygon(&local)
    }

    /// Drop the shape. The collider stops colliding with anything.
    pub fn clear_shape(&mut self) {
        self.shape.clear();
    }

    /// Collider position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the collider. The shape moves rigidly with it.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Tag other colliders know this one by
    pub fn tag(&self) -> char {
        self.tag
    }

    /// Change this collider's own tag
    pub fn set_tag(&mut self, tag: char) {
        self.tag = tag;
    }

    /// Peer registry
    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Mutable peer registry
    pub fn tags_mut(&mut self) -> &mut TagRegistry {
        &mut self.tags
    }

    /// Replace the peer registry, returning the old one
    pub fn set_tags(&mut self, tags: TagRegistry) -> TagRegistry {
        std::mem::replace(&mut self.tags, tags)
    }

    /// Label `peer` in the registry
    pub fn register_peer(&mut self, peer: Entity, label: char) -> Option<char> {
        self.tags.insert(peer, label)
    }

    /// Which shape is active
    pub fn shape_kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Shape relative to the collider position
    pub fn local_shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Shape in world space
    pub fn world_shape(&self) -> ColliderShape {
        self.shape.translated(xy(&self.position))
    }

    /// Result of the most recent query
    pub fn has_collided(&self) -> bool {
        self.has_collided.get()
    }

    /// Outline style
    pub fn debug_style(&self) -> &CollisionDebugStyle {
        &self.style
    }

    /// Toggle the outline overlay
    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.style.enabled = enabled;
    }

    /// Whether creation succeeded and the debug buffer is held
    pub fn is_created(&self) -> bool {
        self.renderer.is_some()
    }

    /// Narrow-phase test against another collider.
    ///
    /// Symmetric in its operands. A collider without a shape never collides.
    pub fn is_colliding(&self, other: &ColliderComponent) -> bool {
        let hit = self.world_shape().intersects(&other.world_shape());
        self.has_collided.set(hit);
        hit
    }

    /// Whether any registered peer labelled `label` overlaps this collider.
    ///
    /// Peers that `lookup` cannot resolve are skipped.
    pub fn is_colliding_with_tag<L>(&self, label: char, lookup: &L) -> bool
    where
        L: ColliderLookup + ?Sized,
    {
        let own = self.world_shape();
        let hit = own.kind() != ShapeKind::None
            && self.tags.peers_with(label).any(|peer| match lookup.collider(peer) {
                Some(collider) => own.intersects(&collider.world_shape()),
                None => {
                    log::trace!("Skipping stale peer {} tagged '{}'", peer.id(), label);
                    false
                }
            });
        self.has_collided.set(hit);
        hit
    }
}

impl Component for ColliderComponent {
    fn on_create(&mut self, backend: &mut dyn RenderBackend) -> Result<(), ComponentError> {
        if self.renderer.is_some() {
            return Ok(());
        }

        let renderer = ShapeRenderer::acquire(backend, self.style.max_outline_vertices).map_err(|source| {
            ComponentError::ResourceAcquisition {
                component: "ColliderComponent",
                source,
            }
        })?;
        log::debug!(
            "Collider '{}' created with {:?} shape, debug buffer {:?} ({} vertices)",
            self.tag,
            self.shape.kind(),
            renderer.buffer(),
            renderer.capacity()
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_destroy(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(renderer) = self.renderer.take() {
            log::debug!("Collider '{}' releasing debug buffer {:?}", self.tag, renderer.buffer());
            renderer.release(backend);
        }
    }

    fn update(&mut self, delta_time: f32) {
        log::trace!(
            "Collider '{}' at ({:.2}, {:.2}) update {:.4}s",
            self.tag,
            self.position.x,
            self.position.y,
            delta_time
        );
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        if !self.style.enabled {
            return;
        }
        let Some(renderer) = &self.renderer else {
            return;
        };

        let outline = shape_outline(&self.world_shape(), self.position.z, self.style.circle_segments);
        let color = self.style.colors.color_for(self.has_collided.get());
        if let Err(e) = renderer.draw(ctx, &outline, color) {
            log::warn!("Collider '{}' outline draw failed: {}", self.tag, e);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "ColliderComponent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::render::{Camera, HeadlessBackend};

    fn circle_at(x: f32, y: f32, radius: f32) -> ColliderComponent {
        let mut collider = ColliderComponent::new(Vec3::new(x, y, 0.0));
        collider.add_circle(Vec3::new(x, y, 0.0), radius);
        collider
    }

    #[test]
    fn test_circles() {
        let a = circle_at(0.0, 0.0, 5.0);
        let mut b = circle_at(8.0, 0.0, 4.0);

        assert!(a.is_colliding(&b));
        assert!(a.has_collided());

        b.set_position(Vec3::new(10.0, 0.0, 0.0));
        assert!(!a.is_colliding(&b));
        assert!(!a.has_collided());

        // Touching counts
        let c = circle_at(9.0, 0.0, 4.0);
        assert!(a.is_colliding(&c));
    }

    #[test]
    fn test_aabbs() {
        let mut a = ColliderComponent::default();
        a.add_aabb(Vec3::new(0.0, 0.0, 0.0), 10.0, 10.0);
        let mut b = ColliderComponent::default();
        b.add_aabb(Vec3::new(5.0, 5.0, 0.0), 10.0, 10.0);
        let mut c = ColliderComponent::default();
        c.add_aabb(Vec3::new(11.0, 0.0, 0.0), 2.0, 2.0);

        assert!(a.is_colliding(&b));
        assert!(b.is_colliding(&a));
        assert!(!a.is_colliding(&c));
    }

    #[test]
    fn test_symmetric() {
        let mut capsule = ColliderComponent::default();
        capsule.add_capsule(Vec3::new(0.0, 0.0, 0.0), 2.0, 6.0);
        let mut polygon = ColliderComponent::default();
        polygon.add_polygon(Vec3::new(1.5, 4.0, 0.0), 3.0, 3.0).unwrap();
        let far = circle_at(50.0, 50.0, 1.0);

        assert_eq!(capsule.is_colliding(&polygon), polygon.is_colliding(&capsule));
        assert!(capsule.is_colliding(&polygon));
        assert_eq!(capsule.is_colliding(&far), far.is_colliding(&capsule));
    }

    #[test]
    fn test_without_shape_never_collides() {
        let empty = ColliderComponent::default();
        let big = circle_at(0.0, 0.0, 100.0);
        assert!(!empty.is_colliding(&big));
        assert!(!big.is_colliding(&empty));
        assert!(!empty.is_colliding(&ColliderComponent::default()));
    }

    #[test]
    fn test_shape_moves_with_position() {
        let mut moving = ColliderComponent::new(Vec3::new(10.0, 0.0, 0.0));
        moving.add_circle(Vec3::new(12.0, 0.0, 0.0), 1.0);
        let target = circle_at(2.0, 0.0, 1.0);

        assert!(!moving.is_colliding(&target));
        moving.set_position(Vec3::new(0.0, 0.0, 0.0));
        // Centre stays 2.0 from the position
        assert!(moving.is_colliding(&target));
        assert_eq!(moving.world_shape().as_circle().unwrap().center, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_invalid_polygon_keeps_previous_shape() {
        let mut collider = circle_at(0.0, 0.0, 1.0);
        let collinear = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
        assert!(matches!(
            collider.add_polygon_points(&collinear),
            Err(GeometryError::DegeneratePolygon(_))
        ));
        assert_eq!(collider.shape_kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_tag_query() {
        let mut backend = HeadlessBackend::new();
        let mut world = World::new();

        let near = world.create_entity();
        world.add_component(near, circle_at(8.0, 0.0, 5.0), &mut backend).unwrap();
        let far = world.create_entity();
        world.add_component(far, circle_at(100.0, 0.0, 5.0), &mut backend).unwrap();
        let wall = world.create_entity();
        world.add_component(wall, circle_at(0.0, 3.0, 1.0), &mut backend).unwrap();

        let mut player = circle_at(0.0, 0.0, 5.0);
        player.register_peer(near, 'E');
        player.register_peer(far, 'E');
        player.register_peer(wall, 'W');

        assert!(player.is_colliding_with_tag('E', &world));
        assert!(player.is_colliding_with_tag('W', &world));
        assert!(!player.is_colliding_with_tag('X', &world));
        assert!(!player.has_collided());

        // Destroyed peer stays registered but is skipped
        world.destroy_entity(near, &mut backend);
        assert!(player.tags().contains(near));
        assert!(!player.is_colliding_with_tag('E', &world));
    }

    #[test]
    fn test_set_tags_returns_previous() {
        let mut backend = HeadlessBackend::new();
        let mut world = World::new();
        let peer = world.create_entity();
        world.add_component(peer, circle_at(1.0, 0.0, 1.0), &mut backend).unwrap();

        let mut collider = circle_at(0.0, 0.0, 1.0);
        let mut registry = TagRegistry::new();
        registry.insert(peer, 'E');

        let old = collider.set_tags(registry.clone());
        assert!(old.is_empty());
        // Registry was copied in; changing ours does not affect the collider
        registry.clear();
        assert!(collider.is_colliding_with_tag('E', &world));
    }

    #[test]
    fn test_creation_failure() {
        let mut backend = HeadlessBackend::with_buffer_limit(0);
        let mut collider = circle_at(0.0, 0.0, 1.0);
        let err = collider.on_create(&mut backend).unwrap_err();
        assert!(matches!(err, ComponentError::ResourceAcquisition { .. }));
        assert!(!collider.is_created());
    }

    #[test]
    fn test_destroy_idempotent() {
        let mut backend = HeadlessBackend::new();
        let mut collider = circle_at(0.0, 0.0, 1.0);
        collider.on_create(&mut backend).unwrap();
        collider.on_create(&mut backend).unwrap();
        assert_eq!(backend.live_buffers(), 1);

        collider.on_destroy(&mut backend);
        collider.on_destroy(&mut backend);
        assert_eq!(backend.live_buffers(), 0);
        assert!(!collider.is_created());
    }

    #[test]
    fn test_render_uses_last_query_colour() {
        let mut backend = HeadlessBackend::new();
        let camera = Camera::default();
        let mut a = circle_at(0.0, 0.0, 1.0);
        a.set_debug_draw(true);
        a.on_create(&mut backend).unwrap();
        let style = a.debug_style().clone();

        a.render(&mut RenderContext::new(&mut backend, &camera));
        a.is_colliding(&circle_at(1.0, 0.0, 1.0));
        a.render(&mut RenderContext::new(&mut backend, &camera));

        let draws = backend.take_draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].color, style.colors.idle);
        assert_eq!(draws[1].color, style.colors.colliding);
        assert_eq!(draws[0].vertices.len(), style.circle_segments * 2);

        a.set_debug_draw(false);
        a.render(&mut RenderContext::new(&mut backend, &camera));
        assert!(backend.draws().is_empty());
    }

    #[test]
    fn test_flat_box_ignores_distant_capsule() {
        let mut point_box = ColliderComponent::new(Vec3::zeros());
        point_box.add_aabb(Vec3::zeros(), 0.0, 0.0);
        let mut far = ColliderComponent::new(Vec3::new(500.0, 500.0, 0.0));
        far.add_capsule_segment(Vec3::new(500.0, 500.0, 0.0), Vec3::new(501.0, 500.0, 0.0), 0.1);
        assert!(!point_box.is_colliding(&far));
        assert!(!far.is_colliding(&point_box));

        let mut thin = ColliderComponent::new(Vec3::new(1.0, 1.0, 0.0));
        thin.add_aabb(Vec3::new(1.0, 1.0, 0.0), 0.0, 4.0);
        let mut above = ColliderComponent::new(Vec3::new(1.0, 100.0, 0.0));
        above.add_capsule_segment(Vec3::new(1.0, 100.0, 0.0), Vec3::new(1.0, 101.0, 0.0), 0.5);
        assert!(!thin.is_colliding(&above));

        // Sliding the capsule down onto the segment makes it touch
        above.set_position(Vec3::new(1.0, 4.0, 0.0));
        assert!(thin.is_colliding(&above));
        assert!(thin.has_collided());
    }

    #[test]
    fn test_update_keeps_state_and_buffer_sized_from_style() {
        let mut backend = HeadlessBackend::new();
        let mut collider = circle_at(2.0, 3.0, 1.0);
        collider.on_create(&mut backend).unwrap();
        let capacity = collider.renderer.as_ref().map(ShapeRenderer::capacity);
        assert_eq!(capacity, Some(collider.debug_style().max_outline_vertices));

        collider.update(0.016);
        assert_eq!(collider.position(), Vec3::new(2.0, 3.0, 0.0));
        assert_eq!(collider.shape_kind(), ShapeKind::Circle);
        assert!(collider.is_created());
        collider.on_destroy(&mut backend);
    }
}
