//! ECS World implementation

use slotmap::SlotMap;
use thiserror::Error;

use super::component::{Component, ComponentError};
use super::components::{ColliderComponent, ColliderLookup};
use super::Entity;
use crate::render::{RenderBackend, RenderContext};

/// World errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// Entity was never created or has been destroyed
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),

    /// Component creation failed; the component was not attached
    #[error(transparent)]
    Component(#[from] ComponentError),
}

#[derive(Default)]
struct EntityRecord {
    components: Vec<Box<dyn Component>>,
}

/// ECS World containing all entities and components
///
/// Each entity owns a list of boxed components. The world drives their
/// lifecycle: creation on attach, update and render every frame, destroy
/// when the entity goes away.
#[derive(Default)]
pub struct World {
    entities: SlotMap<Entity, EntityRecord>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(EntityRecord::default())
    }

    /// Whether `entity` is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Create `component` and attach it to `entity`.
    ///
    /// If creation fails the component is dropped and the entity is left
    /// unchanged.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        mut component: T,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), WorldError> {
        let record = self
            .entities
            .get_mut(entity)
            .ok_or(WorldError::NoSuchEntity(entity))?;

        if let Err(e) = component.on_create(backend) {
            log::error!("Failed to create {} on entity {}: {}", component.name(), entity.id(), e);
            return Err(e.into());
        }

        log::trace!("Attached {} to entity {}", component.name(), entity.id());
        record.components.push(Box::new(component));
        Ok(())
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.entities
            .get(entity)?
            .components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.entities
            .get_mut(entity)?
            .components
            .iter_mut()
            .find_map(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Destroy `entity` and all its components. Returns false if it was
    /// already gone.
    pub fn destroy_entity(&mut self, entity: Entity, backend: &mut dyn RenderBackend) -> bool {
        let Some(mut record) = self.entities.remove(entity) else {
            return false;
        };
        for component in record.components.iter_mut() {
            component.on_destroy(backend);
        }
        log::trace!("Destroyed entity {}", entity.id());
        true
    }

    /// Destroy every entity
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        for (_, mut record) in self.entities.drain() {
            for component in record.components.iter_mut() {
                component.on_destroy(backend);
            }
        }
    }

    /// Update every component
    pub fn update(&mut self, delta_time: f32) {
        for record in self.entities.values_mut() {
            for component in record.components.iter_mut() {
                component.update(delta_time);
            }
        }
    }

    /// Render every component
    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        for record in self.entities.values() {
            for component in &record.components {
                component.render(ctx);
            }
        }
    }
}

impl ColliderLookup for World {
    fn collider(&self, entity: Entity) -> Option<&ColliderComponent> {
        self.get_component::<ColliderComponent>(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::HeadlessBackend;

    fn collider() -> ColliderComponent {
        let mut c = ColliderComponent::default();
        c.add_circle(Vec3::zeros(), 1.0);
        c
    }

    #[test]
    fn test_lifecycle() {
        let mut backend = HeadlessBackend::new();
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, collider(), &mut backend).unwrap();

        assert_eq!(world.entity_count(), 1);
        assert_eq!(backend.live_buffers(), 1);
        assert!(world.get_component::<ColliderComponent>(e).is_some());

        assert!(world.destroy_entity(e, &mut backend));
        assert!(!world.destroy_entity(e, &mut backend));
        assert!(!world.contains(e));
        assert_eq!(backend.live_buffers(), 0);
        assert!(world.get_component::<ColliderComponent>(e).is_none());
    }

    #[test]
    fn test_failed_creation_is_not_attached() {
        let mut backend = HeadlessBackend::with_buffer_limit(1);
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();

        world.add_component(a, collider(), &mut backend).unwrap();
        let err = world.add_component(b, collider(), &mut backend).unwrap_err();
        assert!(matches!(err, WorldError::Component(_)));
        assert!(world.get_component::<ColliderComponent>(b).is_none());
        assert!(world.contains(b));
    }

    #[test]
    fn test_add_to_missing_entity() {
        let mut backend = HeadlessBackend::new();
        let mut world = World::new();
        let e = world.create_entity();
        world.destroy_entity(e, &mut backend);

        assert_eq!(
            world.add_component(e, collider(), &mut backend),
            Err(WorldError::NoSuchEntity(e))
        );
        assert_eq!(backend.live_buffers(), 0);
    }

    #[test]
    fn test_get_component_mut() {
        let mut backend = HeadlessBackend::new();
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, collider(), &mut backend).unwrap();

        world
            .get_component_mut::<ColliderComponent>(e)
            .unwrap()
            .set_position(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(world.collider(e).unwrap().position(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut backend = HeadlessBackend::new();
        let mut world = World::new();
        for _ in 0..3 {
            let e = world.create_entity();
            world.add_component(e, collider(), &mut backend).unwrap();
        }
        world.clear(&mut backend);
        assert_eq!(world.entity_count(), 0);
        assert_eq!(backend.live_buffers(), 0);
    }
}
