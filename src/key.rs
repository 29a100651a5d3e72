/// Axis along which a handle's sub-images are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Frame,
    Mipmap,
    Layer,
    Face,
}

impl Axis {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Mipmap => "mipmap",
            Self::Layer => "layer",
            Self::Face => "face",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Position of one sub-image within a handle's addressable grid.
///
/// The derived ordering is lexicographic by (frame, mipmap, layer, face),
/// which matches the field order below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubImageId {
    pub frame: u32,
    pub mipmap: u32,
    pub layer: u32,
    pub face: u32,
}

impl SubImageId {
    /// The base sub-image every handle starts with.
    pub const ZERO: SubImageId = SubImageId {
        frame: 0,
        mipmap: 0,
        layer: 0,
        face: 0,
    };

    #[must_use]
    pub const fn new(frame: u32, mipmap: u32, layer: u32, face: u32) -> Self {
        Self {
            frame,
            mipmap,
            layer,
            face,
        }
    }

    /// Id with one axis advanced by `delta`.
    #[must_use]
    pub const fn advanced(mut self, axis: Axis, delta: u32) -> Self {
        match axis {
            Axis::Frame => self.frame = self.frame.saturating_add(delta),
            Axis::Mipmap => self.mipmap = self.mipmap.saturating_add(delta),
            Axis::Layer => self.layer = self.layer.saturating_add(delta),
            Axis::Face => self.face = self.face.saturating_add(delta),
        }
        self
    }

    /// Componentwise maximum, used for extents tracking. Distinct from
    /// `Ord::max`, which picks the lexicographically greater id whole.
    #[must_use]
    pub const fn componentwise_max(self, other: Self) -> Self {
        Self {
            frame: if self.frame > other.frame {
                self.frame
            } else {
                other.frame
            },
            mipmap: if self.mipmap > other.mipmap {
                self.mipmap
            } else {
                other.mipmap
            },
            layer: if self.layer > other.layer {
                self.layer
            } else {
                other.layer
            },
            face: if self.face > other.face {
                self.face
            } else {
                other.face
            },
        }
    }
}
