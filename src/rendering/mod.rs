pub mod canvas;
pub mod indexed_png;
pub mod source;
pub mod surface;
pub mod terminal;

pub use canvas::Canvas;
pub use indexed_png::encode_indexed_png;
pub use source::{decode_source, load_source, target_size};
pub use surface::DisplaySurface;
pub use terminal::TerminalSurface;
