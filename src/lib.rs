mod context;
mod error;
mod image;
mod key;
mod slot;
mod stack;

pub use context::ImageContext;
pub use error::{ImageError, Result};
pub use image::{DxtcFormat, ImageNode, Palette, PaletteKind};
pub use key::{Axis, SubImageId};
pub use slot::ImageSet;
pub use stack::{DEFAULT_IMAGE, ImageRegistry, TEMP_IMAGE};
