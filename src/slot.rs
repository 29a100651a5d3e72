use crate::error::Result;
use crate::image::ImageNode;
use crate::key::SubImageId;

const INITIAL_ENTRIES: usize = 8;

#[derive(Debug)]
struct SubEntry {
    id: SubImageId,
    image: ImageNode,
}

/// All sub-images owned by one handle, keyed by [`SubImageId`].
///
/// Entries are append-only: removal of a single entry is unsupported, the
/// whole set is dropped when its handle is released. Indices returned by
/// `find`/`insert` therefore stay valid for the lifetime of the set.
#[derive(Debug)]
pub struct ImageSet {
    entries: Vec<SubEntry>,
    extents: SubImageId,
}

impl ImageSet {
    /// Creates a set seeded with the base entry at [`SubImageId::ZERO`].
    pub fn new() -> Result<Self> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(INITIAL_ENTRIES)?;
        let mut set = Self {
            entries,
            extents: SubImageId::ZERO,
        };
        set.insert(SubImageId::ZERO)?;
        Ok(set)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the ZERO entry is created with the set and never
    /// removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Componentwise running maximum over every id ever inserted.
    #[must_use]
    pub fn extents(&self) -> SubImageId {
        self.extents
    }

    /// Index of the entry with this id, if present. Linear scan; sets stay
    /// small in practice.
    #[must_use]
    pub fn find(&self, id: SubImageId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Inserts a fresh minimal image at `id` and returns its index. The id
    /// must not already be present. On failure the set is left unchanged.
    pub fn insert(&mut self, id: SubImageId) -> Result<usize> {
        debug_assert!(self.find(id).is_none());
        if self.entries.len() == self.entries.capacity() {
            self.entries.try_reserve_exact(self.entries.capacity())?;
        }
        let image = ImageNode::minimal()?;
        let index = self.entries.len();
        self.entries.push(SubEntry { id, image });
        self.extents = self.extents.componentwise_max(id);
        Ok(index)
    }

    /// Find-or-create primitive shared by every axis operation.
    pub fn get_or_insert(&mut self, id: SubImageId) -> Result<usize> {
        match self.find(id) {
            Some(index) => Ok(index),
            None => self.insert(id),
        }
    }

    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<SubImageId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    #[must_use]
    pub fn image(&self, index: usize) -> Option<&ImageNode> {
        self.entries.get(index).map(|entry| &entry.image)
    }

    #[must_use]
    pub fn image_mut(&mut self, index: usize) -> Option<&mut ImageNode> {
        self.entries.get_mut(index).map(|entry| &mut entry.image)
    }

    /// The base sub-image. The ZERO entry is created in `new` and never
    /// removed, so every live set has one.
    #[must_use]
    pub fn base(&self) -> &ImageNode {
        &self.entries[0].image
    }

    #[must_use]
    pub fn base_mut(&mut self) -> &mut ImageNode {
        &mut self.entries[0].image
    }

    /// Swaps in a replacement image at `index`, returning the old one.
    /// Returns `None` (and leaves the replacement behind untaken) only if
    /// the index is out of range.
    pub fn replace(&mut self, index: usize, image: ImageNode) -> Option<ImageNode> {
        let entry = self.entries.get_mut(index)?;
        Some(std::mem::replace(&mut entry.image, image))
    }
}
