//! Artist and artwork records.
//!
//! Plain value types describing who made a work and what it is. They carry
//! no storage logic: a caller loads and saves them however it likes, and
//! hands an [`Artwork`] back here once its image file is durably stored so
//! the color metrics can be attached.
//!
//! Metric fields are read-only from the outside. The only way to set them is
//! [`Artwork::attach_metrics`] (or [`Artwork::refresh_metrics`], which
//! computes and attaches in one step), so an artwork never carries a
//! hand-edited brightness that doesn't match its image.

use crate::fingerprint::hash_bytes;
use crate::imaging::{
    BackendError, DecodeOptions, ImageBackend, ImageSource, MetricsError, MetricsResult,
    compute_metrics,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Gender of an artist, stored as a numeric code (1 = male, 2 = female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn code(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl TryFrom<u8> for Gender {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Gender::from_code(code).ok_or_else(|| format!("unknown gender code {code}"))
    }
}

impl From<Gender> for u8 {
    fn from(gender: Gender) -> Self {
        gender.code()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A visual artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
}

impl Artist {
    /// Artworks in `catalog` credited to this artist, in catalog order.
    pub fn artworks<'a>(&'a self, catalog: &'a [Artwork]) -> impl Iterator<Item = &'a Artwork> {
        catalog.iter().filter(move |artwork| artwork.artist == *self)
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Metrics attached to an artwork, with the fingerprint of the image bytes
/// they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkMetrics {
    #[serde(flatten)]
    pub result: MetricsResult,
    /// SHA-256 hex digest of the image file.
    pub source_hash: String,
}

/// An artwork and its stored image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: u64,
    pub title: String,
    pub artist: Artist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_creation: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub techniques_used: Option<String>,
    /// Location of the stored image file.
    pub image: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metrics: Option<ArtworkMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

impl Artwork {
    pub fn new(id: u64, title: impl Into<String>, artist: Artist, image: impl Into<PathBuf>) -> Self {
        Self {
            id,
            title: title.into(),
            artist,
            year_of_creation: None,
            techniques_used: None,
            image: image.into(),
            metrics: None,
            emotion: None,
        }
    }

    pub fn metrics(&self) -> Option<&ArtworkMetrics> {
        self.metrics.as_ref()
    }

    /// Attach a freshly computed result, replacing any previous metrics.
    pub fn attach_metrics(&mut self, result: MetricsResult, source_hash: impl Into<String>) {
        self.metrics = Some(ArtworkMetrics {
            result,
            source_hash: source_hash.into(),
        });
    }

    pub fn clear_metrics(&mut self) {
        self.metrics = None;
    }

    /// Whether metrics are missing or were computed from different bytes.
    pub fn needs_metrics(&self, current_hash: &str) -> bool {
        self.metrics
            .as_ref()
            .is_none_or(|m| m.source_hash != current_hash)
    }

    /// Read the stored image, and recompute metrics if the image changed
    /// since they were last attached.
    ///
    /// Returns `Ok(true)` when metrics were (re)computed and `Ok(false)` when
    /// the attached metrics already match the file. On error the previously
    /// attached metrics are left as they were.
    pub fn refresh_metrics(
        &mut self,
        backend: &impl ImageBackend,
        options: &DecodeOptions,
    ) -> Result<bool, MetricsError> {
        let bytes = std::fs::read(&self.image).map_err(BackendError::Io)?;
        let hash = hash_bytes(&bytes);
        if !self.needs_metrics(&hash) {
            log::debug!("{}: metrics up to date", self);
            return Ok(false);
        }

        let result = compute_metrics(backend, ImageSource::Bytes(&bytes), options)?;
        self.attach_metrics(result, hash);
        log::info!("{}: metrics computed", self);
        Ok(true)
    }
}

impl fmt::Display for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.title)
    }
}
