//! Pure Rust decoding backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Open + sniff format | `image::ImageReader::open` / `with_guessed_format` |
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image` crate decoders |
//! | Color model → RGB8 | `DynamicImage::to_rgb8` (grayscale, 16-bit, float, CMYK) |
//! | Alpha compositing | `DynamicImage::to_rgba8` + [`AlphaMode::flatten`] |

use super::backend::{BackendError, ImageBackend, ImageSource, PixelMatrix};
use super::params::{AlphaMode, DecodeOptions};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions mapped to the formats whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Whether `path` has one of the [`supported_input_extensions`] (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Decoding backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-step mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image file. The format is sniffed from the content,
/// so a mislabelled extension still decodes.
fn load_path(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::DecodeFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Decode an encoded image held in memory.
fn load_bytes(bytes: &[u8]) -> Result<DynamicImage, BackendError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| BackendError::DecodeFailed(format!("Failed to decode buffer: {}", e)))
}

/// Normalize any color model to RGB8, flattening alpha per `mode`.
fn to_rgb(img: DynamicImage, mode: AlphaMode) -> RgbImage {
    match mode {
        AlphaMode::Composite { .. } if img.color().has_alpha() => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            RgbImage::from_fn(width, height, |x, y| {
                image::Rgb(mode.flatten(rgba.get_pixel(x, y).0))
            })
        }
        _ => img.to_rgb8(),
    }
}

impl ImageBackend for RustBackend {
    fn decode(
        &self,
        source: ImageSource<'_>,
        options: &DecodeOptions,
    ) -> Result<PixelMatrix, BackendError> {
        let img = match source {
            ImageSource::Path(path) => load_path(path)?,
            ImageSource::Bytes(bytes) => load_bytes(bytes)?,
        };
        log::trace!(
            "decoded {source} as {:?} ({}x{})",
            img.color(),
            img.width(),
            img.height()
        );
        Ok(PixelMatrix::from(to_rgb(img, options.alpha)))
    }
}
