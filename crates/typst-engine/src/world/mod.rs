//! In-memory Typst world: generated source, mounted images and fonts

pub mod fonts;
pub mod virtual_fs;
pub mod virtual_world;

pub use fonts::{global_font_cache, FontCache};
pub use virtual_fs::VirtualFilesystem;
pub use virtual_world::VirtualWorld;
