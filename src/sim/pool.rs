//! Fixed-capacity entity pools
//!
//! Every dynamic entity kind lives in a `Pool`. Slots are allocated once when
//! the pool is built and only toggled between active and inactive afterwards.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Entity categories that own a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Enemy,
    Item,
    Wall,
    Projectile,
}

/// Stable identity of one occupancy of a slot.
///
/// The generation increments on every spawn, so a slot that is released and
/// reused is a different target than its previous occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    pub kind: EntityKind,
    pub index: u16,
    pub generation: u32,
}

/// Position, orientation and scale of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// A pooled entity
#[derive(Debug, Clone)]
pub struct Slot<T> {
    index: u16,
    generation: u32,
    active: bool,
    pub transform: Transform,
    /// Kind-specific data, stale while the slot is inactive
    pub payload: T,
}

impl<T> Slot<T> {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Inactive slots are never drawn
    pub fn visible(&self) -> bool {
        self.active
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Fixed-capacity container of reusable slots for one entity kind
#[derive(Debug, Clone)]
pub struct Pool<T> {
    kind: EntityKind,
    slots: Vec<Slot<T>>,
}

impl<T: Default> Pool<T> {
    pub fn new(kind: EntityKind, capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|index| Slot {
                index: index as u16,
                generation: 0,
                active: false,
                transform: Transform::default(),
                payload: T::default(),
            })
            .collect();
        Self { kind, slots }
    }
}

impl<T> Pool<T> {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.active)
    }

    /// Claim the first inactive slot.
    ///
    /// The slot is marked active by this call, before the caller configures
    /// it. Returns `None` when every slot is in use.
    pub fn acquire(&mut self) -> Option<&mut Slot<T>> {
        let slot = self.slots.iter_mut().find(|s| !s.active)?;
        slot.active = true;
        slot.generation = slot.generation.wrapping_add(1);
        Some(slot)
    }

    /// Acquire and configure a slot in one step
    pub fn spawn(&mut self, transform: Transform, payload: T) -> Option<EntityId> {
        let kind = self.kind;
        let slot = self.acquire()?;
        slot.transform = transform;
        slot.payload = payload;
        Some(EntityId {
            kind,
            index: slot.index,
            generation: slot.generation,
        })
    }

    /// Deactivate a slot; releasing an inactive or stale id is a no-op
    pub fn release(&mut self, id: EntityId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.active && slot.generation == id.generation => {
                slot.active = false;
                true
            }
            _ => false,
        }
    }

    /// Deactivate every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    pub fn id_of(&self, slot: &Slot<T>) -> EntityId {
        EntityId {
            kind: self.kind,
            index: slot.index,
            generation: slot.generation,
        }
    }

    /// Active entity by id (stale ids resolve to `None`)
    pub fn get(&self, id: EntityId) -> Option<&Slot<T>> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.active && s.generation == id.generation)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.active && s.generation == id.generation)
    }

    /// All slots, active or not, in index order
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Slot<T>> {
        self.slots.iter().filter(|s| s.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Slot<T>> {
        self.slots.iter_mut().filter(|s| s.active)
    }

    /// Active slots paired with their ids
    pub fn iter_active_ids_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Slot<T>)> {
        let kind = self.kind;
        self.slots.iter_mut().filter(|s| s.active).map(move |s| {
            let id = EntityId {
                kind,
                index: s.index,
                generation: s.generation,
            };
            (id, s)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_acquire_marks_active() {
        let mut pool: Pool<u32> = Pool::new(EntityKind::Item, 2);
        let slot = pool.acquire().unwrap();
        assert!(slot.is_active());
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_full_pool_returns_none() {
        let mut pool: Pool<u32> = Pool::new(EntityKind::Wall, 3);
        let ids: Vec<_> = (0..3)
            .map(|i| pool.spawn(Transform::default(), i).unwrap())
            .collect();
        assert!(pool.is_full());
        assert!(pool.acquire().is_none());
        assert!(pool.spawn(Transform::default(), 9).is_none());
        // Existing occupants untouched
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(pool.get(*id).unwrap().payload, i as u32);
        }
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut pool: Pool<u32> = Pool::new(EntityKind::Enemy, 2);
        let id = pool.spawn(Transform::default(), 5).unwrap();
        assert!(pool.release(id));
        assert!(!pool.release(id));
        assert_eq!(pool.active_count(), 0);
        assert!(!pool.slots()[0].visible());
    }

    #[test]
    fn test_reuse_bumps_generation() {
        let mut pool: Pool<u32> = Pool::new(EntityKind::Enemy, 1);
        let first = pool.spawn(Transform::default(), 1).unwrap();
        pool.release(first);
        let second = pool.spawn(Transform::default(), 2).unwrap();
        assert_eq!(first.index, second.index);
        assert_ne!(first, second);
        // The stale id no longer resolves and cannot release the new occupant
        assert!(pool.get(first).is_none());
        assert!(!pool.release(first));
        assert_eq!(pool.get(second).unwrap().payload, 2);
    }

    #[test]
    fn test_first_inactive_slot_is_reused() {
        let mut pool: Pool<u32> = Pool::new(EntityKind::Obstacle, 3);
        let a = pool.spawn(Transform::default(), 0).unwrap();
        let _b = pool.spawn(Transform::default(), 1).unwrap();
        pool.release(a);
        let c = pool.spawn(Transform::default(), 2).unwrap();
        assert_eq!(c.index, 0);
    }

    proptest! {
        #[test]
        fn prop_active_never_exceeds_capacity(
            capacity in 1usize..16,
            ops in proptest::collection::vec(any::<(bool, u8)>(), 0..200),
        ) {
            let mut pool: Pool<u8> = Pool::new(EntityKind::Projectile, capacity);
            let mut live: Vec<EntityId> = Vec::new();
            for (spawn, value) in ops {
                if spawn {
                    let was_full = pool.is_full();
                    match pool.spawn(Transform::default(), value) {
                        Some(id) => {
                            prop_assert!(!was_full);
                            prop_assert!(!live.iter().any(|l| l.index == id.index));
                            live.push(id);
                        }
                        None => prop_assert!(was_full),
                    }
                } else if !live.is_empty() {
                    let id = live.remove(value as usize % live.len());
                    prop_assert!(pool.release(id));
                }
                prop_assert!(pool.active_count() <= capacity);
                prop_assert_eq!(pool.active_count(), live.len());
            }
        }
    }
}
