//! Image metrics: decode an image, aggregate its channels, derive scores.
//!
//! | Step | Where |
//! |---|---|
//! | **Decode → RGB8** | [`RustBackend`] (`image` crate) behind [`ImageBackend`] |
//! | **Channel means** | `calculations::channel_means` (`u64` accumulators) |
//! | **Brightness** | max normalized mean × 100 |
//! | **Saturation** | (max − min) / max × 100, zero for black |
//!
//! The module is split into:
//! - **Calculations**: Pure functions over pixel data (unit testable)
//! - **Parameters**: Decode options such as alpha handling
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining backend + calculations

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, ImageSource, PixelMatrix};
pub use operations::{
    MetricsError, MetricsResult, compute_metrics, compute_metrics_from_bytes,
    compute_metrics_from_path, compute_metrics_from_reader,
};
pub use params::{AlphaMode, DecodeOptions};
pub use rust_backend::{RustBackend, is_supported_image, supported_input_extensions};
