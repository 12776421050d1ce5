//! Image decoding backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the single operation the metrics
//! calculator needs from a decoder: turn an [`ImageSource`] into an RGB
//! [`PixelMatrix`].
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below so the pure
//! aggregation logic can be exercised without encoding files.

use super::params::DecodeOptions;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    DecodeFailed(String),
}

/// A borrowed handle to an encoded image.
///
/// The calculator reads the resource once per computation and never keeps
/// a reference to it afterwards.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a Path> for ImageSource<'a> {
    fn from(path: &'a Path) -> Self {
        ImageSource::Path(path)
    }
}

impl<'a> From<&'a [u8]> for ImageSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ImageSource::Bytes(bytes)
    }
}

impl fmt::Display for ImageSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Bytes(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
        }
    }
}

/// Width and height of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Decoded image as a row-major grid of `[r, g, b]` triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelMatrix {
    /// Wrap interleaved RGB8 data. Returns `None` when the buffer length
    /// does not match `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(3)?;
        (data.len() == expected).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// A matrix where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let data = rgb.iter().copied().cycle().take(count * 3).collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}

impl From<image::RgbImage> for PixelMatrix {
    fn from(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// Trait for image decoding backends.
///
/// `Sync` so one backend can serve a rayon batch.
pub trait ImageBackend: Sync {
    /// Decode the source and normalize it to three 8-bit channels.
    fn decode(
        &self,
        source: ImageSource<'_>,
        options: &DecodeOptions,
    ) -> Result<PixelMatrix, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that hands out prepared matrices and records each call.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockBackend {
        pub matrices: Mutex<Vec<PixelMatrix>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Matrices are popped from the end, so the last one is served first.
        pub fn with_matrices(matrices: Vec<PixelMatrix>) -> Self {
            Self {
                matrices: Mutex::new(matrices),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn get_calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(
            &self,
            source: ImageSource<'_>,
            _options: &DecodeOptions,
        ) -> Result<PixelMatrix, BackendError> {
            self.calls.lock().unwrap().push(source.to_string());
            self.matrices
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::DecodeFailed("No mock matrix".to_string()))
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_matrices(vec![PixelMatrix::filled(2, 2, [1, 2, 3])]);

        let matrix = backend
            .decode(
                ImageSource::Path(Path::new("/test/image.jpg")),
                &DecodeOptions::default(),
            )
            .unwrap();
        assert_eq!(matrix.pixel_count(), 4);

        let calls = backend.get_calls();
        assert_eq!(calls, vec!["/test/image.jpg".to_string()]);
    }

    #[test]
    fn mock_without_matrices_fails() {
        let backend = MockBackend::new();
        let result = backend.decode(ImageSource::Bytes(&[1, 2, 3]), &DecodeOptions::default());
        assert!(matches!(result, Err(BackendError::DecodeFailed(_))));
        assert_eq!(backend.get_calls(), vec!["<3 bytes in memory>".to_string()]);
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(PixelMatrix::from_raw(2, 2, vec![0; 11]).is_none());
        assert!(PixelMatrix::from_raw(2, 2, vec![0; 12]).is_some());
    }

    #[test]
    fn from_raw_accepts_empty() {
        let matrix = PixelMatrix::from_raw(0, 5, Vec::new()).unwrap();
        assert_eq!(matrix.pixel_count(), 0);
        assert_eq!(matrix.pixels().count(), 0);
    }

    #[test]
    fn filled_repeats_color() {
        let matrix = PixelMatrix::filled(3, 2, [10, 20, 30]);
        assert_eq!(matrix.dimensions(), Dimensions { width: 3, height: 2 });
        assert!(matrix.pixels().all(|p| p == [10, 20, 30]));
        assert_eq!(matrix.pixels().count(), 6);
    }

    #[test]
    fn from_rgb_image_keeps_layout() {
        let img = image::RgbImage::from_fn(2, 1, |x, _| image::Rgb([x as u8, 0, 255]));
        let matrix = PixelMatrix::from(img);
        let pixels: Vec<[u8; 3]> = matrix.pixels().collect();
        assert_eq!(pixels, vec![[0, 0, 255], [1, 0, 255]]);
    }
}
