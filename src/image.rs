use crate::error::{ImageError, Result};

/// Layout of a palette's color entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaletteKind {
    #[default]
    None,
    Rgb24,
    Rgb32,
    Rgba32,
    Bgr24,
    Bgr32,
    Bgra32,
}

#[derive(Debug, Default)]
pub struct Palette {
    pub kind: PaletteKind,
    pub data: Vec<u8>,
}

impl Palette {
    /// A palette is usable only if it has a recognized layout and at
    /// least one color entry.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kind != PaletteKind::None && !self.data.is_empty()
    }
}

/// Compression scheme of an attached compressed-texture payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DxtcFormat {
    #[default]
    None,
    Dxt1,
    Dxt3,
    Dxt5,
}

/// One owned image resource: a pixel buffer plus up to four owned child
/// subtrees, one per addressing axis. The children are not mutually
/// exclusive; a node may carry all four at once.
#[derive(Debug)]
pub struct ImageNode {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub channels: u8,
    pub bytes_per_channel: u8,
    pub data: Vec<u8>,
    pub palette: Option<Palette>,
    /// Following frame of an animation sequence.
    pub next: Option<Box<ImageNode>>,
    pub mipmaps: Option<Box<ImageNode>>,
    pub layers: Option<Box<ImageNode>>,
    pub faces: Option<Box<ImageNode>>,
    pub anim_list: Vec<u32>,
    pub profile: Vec<u8>,
    pub dxtc_format: DxtcFormat,
    pub dxtc_data: Vec<u8>,
}

impl ImageNode {
    /// Allocates a zero-filled image of the given geometry. Fails with
    /// `InvalidValue` if the geometry overflows a byte count, and with
    /// `OutOfMemory` if the pixel buffer cannot be reserved.
    pub fn new(
        width: u32,
        height: u32,
        depth: u32,
        channels: u8,
        bytes_per_channel: u8,
    ) -> Result<Self> {
        let size = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(depth as usize))
            .and_then(|n| n.checked_mul(channels as usize))
            .and_then(|n| n.checked_mul(bytes_per_channel as usize))
            .ok_or_else(|| {
                ImageError::InvalidValue(format!(
                    "image geometry {width}x{height}x{depth} with {channels} channels \
                     overflows the pixel buffer size"
                ))
            })?;
        let mut data = Vec::new();
        data.try_reserve_exact(size)?;
        data.resize(size, 0);
        Ok(Self {
            width,
            height,
            depth,
            channels,
            bytes_per_channel,
            data,
            palette: None,
            next: None,
            mipmaps: None,
            layers: None,
            faces: None,
            anim_list: Vec::new(),
            profile: Vec::new(),
            dxtc_format: DxtcFormat::None,
            dxtc_data: Vec::new(),
        })
    }

    /// 1x1x1 single-channel placeholder used to seed new sub-image entries.
    pub fn minimal() -> Result<Self> {
        Self::new(1, 1, 1, 1, 1)
    }
}

// Frame chains can run thousands of nodes long, and a derived drop would
// recurse once per node. Detach every child edge onto a worklist and free
// nodes one at a time instead; each pointer is taken before its subtree
// is released, so no edge is walked twice.
impl Drop for ImageNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<ImageNode>> = Vec::new();
        pending.extend(self.next.take());
        pending.extend(self.faces.take());
        pending.extend(self.mipmaps.take());
        pending.extend(self.layers.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.next.take());
            pending.extend(node.faces.take());
            pending.extend(node.mipmaps.take());
            pending.extend(node.layers.take());
        }
    }
}
