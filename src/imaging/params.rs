//! Parameter types for decoding.
//!
//! These structs describe *what* normalization to apply, not *how*. They are
//! the interface between [`operations`](super::operations) and the
//! [`backend`](super::backend), which does the actual pixel work.
//!
//! ## Types
//!
//! - [`AlphaMode`]: how a transparency channel is flattened to RGB.
//! - [`DecodeOptions`]: everything a backend needs besides the source itself.

/// How a transparency channel is flattened before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    /// Drop the alpha channel and keep the stored color values.
    #[default]
    Discard,
    /// Blend every pixel onto a solid background color.
    Composite { background: [u8; 3] },
}

impl AlphaMode {
    /// Flatten one RGBA pixel to RGB.
    pub fn flatten(self, [r, g, b, a]: [u8; 4]) -> [u8; 3] {
        match self {
            AlphaMode::Discard => [r, g, b],
            AlphaMode::Composite { background } => {
                let alpha = f32::from(a) / 255.0;
                let blend = |c: u8, bg: u8| {
                    (f32::from(c) * alpha + f32::from(bg) * (1.0 - alpha))
                        .round()
                        .clamp(0.0, 255.0) as u8
                };
                [
                    blend(r, background[0]),
                    blend(g, background[1]),
                    blend(b, background[2]),
                ]
            }
        }
    }
}

/// Options for a decode operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub alpha: AlphaMode,
}

impl DecodeOptions {
    /// Composite transparent pixels onto `background`.
    pub fn composite_onto(background: [u8; 3]) -> Self {
        Self {
            alpha: AlphaMode::Composite { background },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_discards_alpha() {
        assert_eq!(DecodeOptions::default().alpha, AlphaMode::Discard);
    }

    #[test]
    fn discard_keeps_stored_color() {
        assert_eq!(AlphaMode::Discard.flatten([200, 100, 50, 0]), [200, 100, 50]);
    }

    #[test]
    fn composite_opaque_keeps_color() {
        let mode = AlphaMode::Composite {
            background: [255, 255, 255],
        };
        assert_eq!(mode.flatten([10, 20, 30, 255]), [10, 20, 30]);
    }

    #[test]
    fn composite_transparent_becomes_background() {
        let mode = AlphaMode::Composite {
            background: [255, 255, 255],
        };
        assert_eq!(mode.flatten([10, 20, 30, 0]), [255, 255, 255]);
    }

    #[test]
    fn composite_half_alpha_blends() {
        let options = DecodeOptions::composite_onto([0, 0, 0]);
        // 200 * 128/255 = 100.39 -> 100
        assert_eq!(options.alpha.flatten([200, 0, 0, 128]), [100, 0, 0]);
    }
}
