//! Label overlays for cisterns images: a translucent box centered on the
//! image with the per-side classification text drawn inside it.

pub mod font;
pub mod overlay;

pub use font::{builtin_font, load_font_file, load_label_font};
pub use overlay::{centered_box, BoxPlacement, LabelRenderer, LabelStyle};
