use tracing::{debug, trace};

use crate::error::{ImageError, Result};
use crate::image::ImageNode;
use crate::key::{Axis, SubImageId};
use crate::slot::ImageSet;
use crate::stack::{DEFAULT_IMAGE, ImageRegistry, TEMP_IMAGE};

/// The currently bound handle and sub-image.
///
/// `index` caches the entry's position inside the bound handle's set.
/// Entries are append-only, so the index stays valid until the handle is
/// released; resolution re-checks the id to catch slot reuse.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    name: u32,
    id: SubImageId,
    index: usize,
}

impl Cursor {
    const fn rebound(name: u32) -> Self {
        Self {
            name,
            id: SubImageId::ZERO,
            index: 0,
        }
    }
}

/// One independent instance of the image subsystem: the handle registry
/// plus the active-image cursor. Every bind-style operation of the
/// surrounding library goes through here.
#[derive(Debug)]
pub struct ImageContext {
    registry: ImageRegistry,
    cursor: Cursor,
    initialized: bool,
}

impl ImageContext {
    /// Initializes the subsystem: builds the registry, populates the
    /// reserved default and scratch handles, and binds the default image.
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: ImageRegistry::new()?,
            cursor: Cursor::rebound(DEFAULT_IMAGE),
            initialized: true,
        })
    }

    /// Tears the subsystem down, releasing every live handle. Fails with
    /// `IllegalOperation` if the context was already shut down; all other
    /// operations fail the same way afterwards.
    pub fn shutdown(&mut self) -> Result<()> {
        self.guard()?;
        self.registry.clear();
        self.cursor = Cursor::rebound(DEFAULT_IMAGE);
        self.initialized = false;
        debug!("image subsystem shut down");
        Ok(())
    }

    fn guard(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(ImageError::IllegalOperation(
                "image subsystem is not initialized".into(),
            ))
        }
    }

    /// Allocates one image handle.
    pub fn gen_image(&mut self) -> Result<u32> {
        self.guard()?;
        self.registry.allocate()
    }

    /// Allocates `count` image handles. If any allocation fails, the
    /// handles created so far are released again before the error is
    /// returned, so a failed call changes nothing.
    pub fn gen_images(&mut self, count: usize) -> Result<Vec<u32>> {
        self.guard()?;
        if count == 0 {
            return Err(ImageError::InvalidValue(
                "image count must be at least 1".into(),
            ));
        }
        let mut handles = Vec::new();
        handles.try_reserve_exact(count)?;
        for _ in 0..count {
            match self.registry.allocate() {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    for handle in handles {
                        let _ = self.registry.release(handle);
                    }
                    return Err(err);
                }
            }
        }
        Ok(handles)
    }

    /// Releases one handle and everything it owns. The handle id becomes
    /// eligible for reuse.
    pub fn delete_image(&mut self, handle: u32) -> Result<()> {
        self.guard()?;
        self.registry.release(handle)
    }

    /// Releases every listed handle. Invalid ids are skipped and reported
    /// through the first error once all live ones have been released.
    pub fn delete_images(&mut self, handles: &[u32]) -> Result<()> {
        self.guard()?;
        let mut first_err = None;
        for &handle in handles {
            if let Err(err) = self.registry.release(handle) {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn is_image(&self, handle: u32) -> bool {
        self.initialized && self.registry.is_valid(handle)
    }

    /// Read access to a handle's sub-image set, for layers that inspect
    /// what a handle holds without binding it.
    #[must_use]
    pub fn image_set(&self, handle: u32) -> Option<&ImageSet> {
        if !self.initialized {
            return None;
        }
        self.registry.get(handle)
    }

    /// Makes `handle` current and points the cursor at its base
    /// sub-image. The cursor is left unchanged on failure.
    pub fn bind(&mut self, handle: u32) -> Result<()> {
        self.guard()?;
        if !self.registry.is_valid(handle) {
            return Err(ImageError::InvalidValue(format!(
                "cannot bind handle {handle}: not a live image"
            )));
        }
        self.cursor = Cursor::rebound(handle);
        debug!(handle, "bound image");
        Ok(())
    }

    /// Binds the reserved scratch image.
    pub fn bind_temp(&mut self) -> Result<()> {
        self.bind(TEMP_IMAGE)
    }

    #[must_use]
    pub fn cur_name(&self) -> u32 {
        self.cursor.name
    }

    #[must_use]
    pub fn cur_id(&self) -> SubImageId {
        self.cursor.id
    }

    fn cur_set(&self) -> Result<&ImageSet> {
        self.guard()?;
        self.registry.get(self.cursor.name).ok_or_else(|| {
            ImageError::InvalidValue(format!(
                "current handle {} is not a live image",
                self.cursor.name
            ))
        })
    }

    fn cur_set_mut(&mut self) -> Result<&mut ImageSet> {
        self.guard()?;
        let name = self.cursor.name;
        self.registry.get_mut(name).ok_or_else(|| {
            ImageError::InvalidValue(format!("current handle {name} is not a live image"))
        })
    }

    fn unresolved_cursor(name: u32) -> ImageError {
        ImageError::InvalidValue(format!(
            "cursor does not resolve to a live sub-image of handle {name}"
        ))
    }

    /// The image the cursor points at.
    pub fn cur_image(&self) -> Result<&ImageNode> {
        let cursor = self.cursor;
        let set = self.cur_set()?;
        if set.id_at(cursor.index) != Some(cursor.id) {
            return Err(Self::unresolved_cursor(cursor.name));
        }
        set.image(cursor.index)
            .ok_or_else(|| Self::unresolved_cursor(cursor.name))
    }

    /// Mutable access to the image the cursor points at, for layers that
    /// decode or transform pixels in place.
    pub fn cur_image_mut(&mut self) -> Result<&mut ImageNode> {
        let cursor = self.cursor;
        let set = self.cur_set_mut()?;
        if set.id_at(cursor.index) != Some(cursor.id) {
            return Err(Self::unresolved_cursor(cursor.name));
        }
        match set.image_mut(cursor.index) {
            Some(image) => Ok(image),
            None => Err(Self::unresolved_cursor(cursor.name)),
        }
    }

    /// The base (ZERO-id) sub-image of the current handle, regardless of
    /// where the cursor sits.
    pub fn base_image(&self) -> Result<&ImageNode> {
        Ok(self.cur_set()?.base())
    }

    /// Moves the cursor along one axis of the current handle's grid,
    /// materializing the target sub-image if it does not exist yet. The
    /// cursor is left at its prior position on failure.
    pub fn activate(&mut self, axis: Axis, delta: u32) -> Result<()> {
        let id = self.cursor.id.advanced(axis, delta);
        let name = self.cursor.name;
        let set = self.cur_set_mut()?;
        let missing = set.find(id).is_none();
        let index = set.get_or_insert(id)?;
        if missing {
            trace!(handle = name, ?id, "materialized sub-image");
        }
        self.cursor.id = id;
        self.cursor.index = index;
        Ok(())
    }

    /// Advances to a later frame of the current animation.
    pub fn active_frame(&mut self, delta: u32) -> Result<()> {
        self.activate(Axis::Frame, delta)
    }

    /// Advances to a smaller mipmap level.
    pub fn active_mipmap(&mut self, delta: u32) -> Result<()> {
        self.activate(Axis::Mipmap, delta)
    }

    /// Advances to a deeper layer.
    pub fn active_layer(&mut self, delta: u32) -> Result<()> {
        self.activate(Axis::Layer, delta)
    }

    /// Advances to another cubemap face.
    pub fn active_face(&mut self, delta: u32) -> Result<()> {
        self.activate(Axis::Face, delta)
    }

    /// Destroys the image at the cursor and substitutes `image` in place
    /// within the owning set. Used when a decode or transform produces a
    /// wholesale replacement.
    pub fn replace_cur_image(&mut self, image: ImageNode) -> Result<()> {
        let cursor = self.cursor;
        let set = self.cur_set_mut()?;
        if set.id_at(cursor.index) != Some(cursor.id) {
            return Err(Self::unresolved_cursor(cursor.name));
        }
        set.replace(cursor.index, image);
        Ok(())
    }

    /// Rebuilds the current image's child chain along one axis: the old
    /// chain is destroyed and `count` fresh minimal nodes are linked in
    /// its place through their `next` pointers. Faces cannot be created
    /// this way. Returns the number of nodes created.
    pub fn create_sub_images(&mut self, axis: Axis, count: u32) -> Result<u32> {
        let image = self.cur_image_mut()?;
        if count == 0 {
            return Ok(0);
        }
        let head = match axis {
            Axis::Frame => &mut image.next,
            Axis::Mipmap => &mut image.mipmaps,
            Axis::Layer => &mut image.layers,
            Axis::Face => {
                return Err(ImageError::InvalidEnum(
                    "faces cannot be created as a sub-image chain".into(),
                ));
            }
        };
        // replacing the head drops whatever chain hung off it
        let mut tail = head.insert(Box::new(ImageNode::minimal()?));
        let mut created = 1;
        while created < count {
            tail = tail.next.insert(Box::new(ImageNode::minimal()?));
            created += 1;
        }
        Ok(created)
    }
}
