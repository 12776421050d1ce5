//! High-level metrics operations.
//!
//! These functions combine a backend decode with the pure calculations.
//! Each call decodes once, aggregates once, and returns either all five
//! scalars or an error.

use super::backend::{BackendError, ImageBackend, ImageSource};
use super::calculations::{brightness, channel_means, saturation};
use super::params::DecodeOptions;
use super::rust_backend::RustBackend;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] BackendError),
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Result type for metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Aggregate color statistics for one image.
///
/// Means are on the 0–255 channel scale; `brightness` and `saturation` are
/// on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub mean_red: f64,
    pub mean_green: f64,
    pub mean_blue: f64,
    pub brightness: f64,
    pub saturation: f64,
}

impl MetricsResult {
    /// Derive brightness and saturation from the three channel means.
    pub fn from_means(means: [f64; 3]) -> Self {
        let [mean_red, mean_green, mean_blue] = means;
        Self {
            mean_red,
            mean_green,
            mean_blue,
            brightness: brightness(means),
            saturation: saturation(means),
        }
    }

    pub fn means(&self) -> [f64; 3] {
        [self.mean_red, self.mean_green, self.mean_blue]
    }
}

/// Decode `source` with `backend` and compute its metrics.
pub fn compute_metrics(
    backend: &impl ImageBackend,
    source: ImageSource<'_>,
    options: &DecodeOptions,
) -> Result<MetricsResult> {
    let matrix = backend.decode(source, options)?;
    let dims = matrix.dimensions();
    let means = channel_means(&matrix).ok_or(MetricsError::EmptyImage {
        width: dims.width,
        height: dims.height,
    })?;

    let result = MetricsResult::from_means(means);
    log::debug!(
        "{source}: {}x{} -> mean rgb ({:.2}, {:.2}, {:.2}), brightness {:.2}, saturation {:.2}",
        dims.width,
        dims.height,
        result.mean_red,
        result.mean_green,
        result.mean_blue,
        result.brightness,
        result.saturation
    );
    Ok(result)
}

/// Compute metrics for an image file using the default [`RustBackend`].
pub fn compute_metrics_from_path(path: &Path, options: &DecodeOptions) -> Result<MetricsResult> {
    compute_metrics(&RustBackend::new(), ImageSource::Path(path), options)
}

/// Compute metrics for an in-memory encoded image using the default [`RustBackend`].
pub fn compute_metrics_from_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<MetricsResult> {
    compute_metrics(&RustBackend::new(), ImageSource::Bytes(bytes), options)
}

/// Read a stream to its end, then compute metrics for the buffered bytes.
pub fn compute_metrics_from_reader(
    mut reader: impl Read,
    options: &DecodeOptions,
) -> Result<MetricsResult> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(BackendError::Io)?;
    compute_metrics_from_bytes(&bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::PixelMatrix;
    use crate::imaging::backend::tests::MockBackend;

    fn compute_solid(rgb: [u8; 3]) -> MetricsResult {
        let backend = MockBackend::with_matrices(vec![PixelMatrix::filled(8, 8, rgb)]);
        compute_metrics(
            &backend,
            ImageSource::Path(Path::new("/solid.png")),
            &DecodeOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn solid_black() {
        let m = compute_solid([0, 0, 0]);
        assert_eq!(m.means(), [0.0, 0.0, 0.0]);
        assert_eq!(m.brightness, 0.0);
        assert_eq!(m.saturation, 0.0);
    }

    #[test]
    fn solid_white() {
        let m = compute_solid([255, 255, 255]);
        assert_eq!(m.means(), [255.0, 255.0, 255.0]);
        assert_eq!(m.brightness, 100.0);
        assert_eq!(m.saturation, 0.0);
    }

    #[test]
    fn solid_red() {
        let m = compute_solid([255, 0, 0]);
        assert_eq!(m.means(), [255.0, 0.0, 0.0]);
        assert_eq!(m.brightness, 100.0);
        assert_eq!(m.saturation, 100.0);
    }

    #[test]
    fn solid_mid_gray() {
        let m = compute_solid([128, 128, 128]);
        assert_eq!(m.means(), [128.0, 128.0, 128.0]);
        assert!((m.brightness - 50.2).abs() < 0.01);
        assert_eq!(m.saturation, 0.0);
    }

    #[test]
    fn single_pixel() {
        let backend =
            MockBackend::with_matrices(vec![PixelMatrix::from_raw(1, 1, vec![51, 102, 204]).unwrap()]);
        let m = compute_metrics(
            &backend,
            ImageSource::Bytes(&[0]),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(m.means(), [51.0, 102.0, 204.0]);
        assert!((m.brightness - 80.0).abs() < 1e-9);
        assert!((m.saturation - 75.0).abs() < 1e-9);
    }

    #[test]
    fn empty_matrix_is_empty_image_error() {
        let backend =
            MockBackend::with_matrices(vec![PixelMatrix::from_raw(0, 10, Vec::new()).unwrap()]);
        let result = compute_metrics(
            &backend,
            ImageSource::Path(Path::new("/empty.png")),
            &DecodeOptions::default(),
        );
        assert!(matches!(
            result,
            Err(MetricsError::EmptyImage {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn backend_failure_is_decode_error() {
        let backend = MockBackend::new();
        let result = compute_metrics(
            &backend,
            ImageSource::Path(Path::new("/missing.png")),
            &DecodeOptions::default(),
        );
        assert!(matches!(result, Err(MetricsError::Decode(_))));
    }

    #[test]
    fn decodes_exactly_once() {
        let backend = MockBackend::with_matrices(vec![PixelMatrix::filled(1, 1, [1, 1, 1])]);
        compute_metrics(
            &backend,
            ImageSource::Path(Path::new("/once.png")),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(backend.get_calls(), vec!["/once.png".to_string()]);
    }

    #[test]
    fn from_means_matches_calculations() {
        let m = MetricsResult::from_means([200.0, 50.0, 100.0]);
        assert_eq!(m.mean_red, 200.0);
        assert!((m.brightness - 200.0 / 255.0 * 100.0).abs() < 1e-9);
        assert!((m.saturation - 75.0).abs() < 1e-9);
    }

    #[test]
    fn reader_failure_is_decode_error() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("stream closed"))
            }
        }

        let result = compute_metrics_from_reader(FailingReader, &DecodeOptions::default());
        assert!(matches!(
            result,
            Err(MetricsError::Decode(BackendError::Io(_)))
        ));
    }

    #[test]
    fn result_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(MetricsResult::from_means([0.0, 0.0, 0.0])).unwrap();
        for key in [
            "mean_red",
            "mean_green",
            "mean_blue",
            "brightness",
            "saturation",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
