//! # Artwork Metrics
//!
//! Aggregate color statistics for artwork images: the mean of each RGB
//! channel, a brightness score and a saturation score.
//!
//! ```text
//! image file / bytes ──decode──▶ RGB pixel matrix ──mean──▶ (R̄, Ḡ, B̄)
//!                                                             │
//!                     brightness = max / 255 × 100  ◀─────────┤
//!                     saturation = (max − min) / max × 100 ◀──┘
//! ```
//!
//! The calculation is a pure function of the decoded pixels: the same bytes
//! always give the same five numbers. It keeps no state between calls, so
//! any number of images can be measured concurrently.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Decoding backend, channel aggregation, brightness/saturation |
//! | [`records`] | Artist and artwork value types; attaching metrics to an artwork |
//! | [`fingerprint`] | SHA-256 of image bytes, to tell when metrics are stale |
//! | [`scan`] | Discovers decodable image files under a directory |
//! | [`process`] | Measures many files in parallel with progress events |
//! | [`config`] | `config.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Example
//!
//! ```no_run
//! use artwork_metrics::imaging::{DecodeOptions, compute_metrics_from_path};
//! use std::path::Path;
//!
//! let metrics = compute_metrics_from_path(Path::new("wave.jpg"), &DecodeOptions::default())?;
//! println!("brightness {:.1}", metrics.brightness);
//! # Ok::<(), artwork_metrics::imaging::MetricsError>(())
//! ```
//!
//! # Design Decisions
//!
//! ## Brightness From Channel Means
//!
//! Brightness is the largest of the three *mean* channel values, not the
//! average of per-pixel brightness. An image split evenly between pure red
//! and pure blue scores 50, not 100. This is the literal definition the
//! scores were specified with, and it is kept as is.
//!
//! ## No Save Lifecycle
//!
//! Computing metrics is not tied to saving a record. Whoever stores the image
//! calls [`records::Artwork::refresh_metrics`] (or the `imaging` functions
//! directly) once the file is durably written, and decides what to persist.

pub mod config;
pub mod fingerprint;
pub mod imaging;
pub mod output;
pub mod process;
pub mod records;
pub mod scan;
