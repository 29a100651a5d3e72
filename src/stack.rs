use tracing::debug;

use crate::error::{ImageError, Result};
use crate::slot::ImageSet;

const INITIAL_HANDLES: usize = 8;

/// Handle of the default image, live for the whole subsystem lifetime.
pub const DEFAULT_IMAGE: u32 = 0;
/// Handle of the scratch image used for temporary work.
pub const TEMP_IMAGE: u32 = 1;

/// Sparse table of image sets indexed by handle. A `None` slot is a freed
/// handle awaiting reuse.
#[derive(Debug)]
pub struct ImageRegistry {
    slots: Vec<Option<ImageSet>>,
}

impl ImageRegistry {
    /// Builds the registry and populates the reserved default (0) and
    /// scratch (1) handles.
    pub fn new() -> Result<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(INITIAL_HANDLES)?;
        slots.push(Some(ImageSet::new()?));
        slots.push(Some(ImageSet::new()?));
        Ok(Self { slots })
    }

    #[must_use]
    pub fn is_valid(&self, handle: u32) -> bool {
        self.slots
            .get(handle as usize)
            .is_some_and(Option::is_some)
    }

    /// Allocates a handle, preferring the lowest freed slot before
    /// appending. Appends double the capacity when full; a failed growth
    /// leaves every existing slot untouched.
    pub fn allocate(&mut self) -> Result<u32> {
        let set = ImageSet::new()?;
        let index = match self.slots.iter().position(Option::is_none) {
            Some(free) => free,
            None => {
                if self.slots.len() == self.slots.capacity() {
                    self.slots.try_reserve_exact(self.slots.capacity())?;
                }
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        self.slots[index] = Some(set);
        debug!(handle = index, "allocated image handle");
        Ok(index as u32)
    }

    #[must_use]
    pub fn get(&self, handle: u32) -> Option<&ImageSet> {
        self.slots.get(handle as usize)?.as_ref()
    }

    #[must_use]
    pub fn get_mut(&mut self, handle: u32) -> Option<&mut ImageSet> {
        self.slots.get_mut(handle as usize)?.as_mut()
    }

    /// Drops the handle's set, cascading through every owned sub-image,
    /// and marks the slot reusable.
    pub fn release(&mut self, handle: u32) -> Result<()> {
        let slot = self
            .slots
            .get_mut(handle as usize)
            .filter(|slot| slot.is_some())
            .ok_or_else(|| {
                ImageError::InvalidValue(format!("handle {handle} is not a live image"))
            })?;
        *slot = None;
        debug!(handle, "released image handle");
        Ok(())
    }

    /// Drops every live set and the backing storage. Safe to call twice.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}
