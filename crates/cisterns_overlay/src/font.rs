use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, FontVec};
use tracing::{debug, info};

/// DejaVu Sans, bundled so labels always carry text. License in `assets/`.
static BUILTIN_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Directories searched for the preferred font when it is given as a bare file name.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/TTF",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

pub fn load_font_file(path: &Path) -> Option<FontVec> {
    let data = std::fs::read(path).ok()?;
    match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(_) => {
            debug!("not a usable font file: {}", path.display());
            None
        }
    }
}

/// The bundled fallback font.
pub fn builtin_font() -> FontArc {
    FontArc::try_from_slice(BUILTIN_FONT).expect("bundled font is a valid TrueType file")
}

fn candidates(preferred: &Path) -> Vec<PathBuf> {
    let mut out = vec![preferred.to_path_buf()];
    if preferred.components().count() == 1 {
        out.extend(FONT_DIRS.iter().map(|dir| Path::new(dir).join(preferred)));
    }
    out
}

/// Load the preferred font, falling back to the bundled one.
pub fn load_label_font(preferred: &Path) -> FontArc {
    for path in candidates(preferred) {
        if let Some(font) = load_font_file(&path) {
            info!("label font: {}", path.display());
            return FontArc::new(font);
        }
    }
    info!(
        "{} not found; using bundled DejaVu Sans",
        preferred.display()
    );
    builtin_font()
}
