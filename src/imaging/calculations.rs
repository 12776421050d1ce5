//! Pure calculation functions for color metrics.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::PixelMatrix;

/// Maximum value of an 8-bit channel.
pub const CHANNEL_MAX: f64 = 255.0;

/// Arithmetic mean of each channel across every pixel, as `[r, g, b]`.
///
/// Sums are accumulated in `u64`, which cannot overflow for any image that
/// fits in memory. Returns `None` for a matrix with no pixels.
pub fn channel_means(matrix: &PixelMatrix) -> Option<[f64; 3]> {
    let count = matrix.pixel_count();
    if count == 0 {
        return None;
    }

    let mut sums = [0u64; 3];
    for [r, g, b] in matrix.pixels() {
        sums[0] += u64::from(r);
        sums[1] += u64::from(g);
        sums[2] += u64::from(b);
    }

    let count = count as f64;
    Some(sums.map(|sum| sum as f64 / count))
}

/// Largest and smallest of the three means, each divided by 255.
fn normalized_extremes(means: [f64; 3]) -> (f64, f64) {
    let max = means.iter().copied().fold(f64::MIN, f64::max);
    let min = means.iter().copied().fold(f64::MAX, f64::min);
    (max / CHANNEL_MAX, min / CHANNEL_MAX)
}

/// Brightness on a 0–100 scale: the largest normalized channel mean.
pub fn brightness(means: [f64; 3]) -> f64 {
    let (max, _) = normalized_extremes(means);
    max * 100.0
}

/// Saturation on a 0–100 scale: spread between the largest and smallest
/// normalized channel means relative to the largest. Zero when every mean
/// is zero.
pub fn saturation(means: [f64; 3]) -> f64 {
    let (max, min) = normalized_extremes(means);
    if max == 0.0 {
        0.0
    } else {
        (max - min) / max * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn means_of_solid_color() {
        let matrix = PixelMatrix::filled(4, 3, [255, 128, 0]);
        assert_eq!(channel_means(&matrix), Some([255.0, 128.0, 0.0]));
    }

    #[test]
    fn means_average_mixed_pixels() {
        // Two pixels: (0, 10, 255) and (255, 20, 0)
        let matrix = PixelMatrix::from_raw(2, 1, vec![0, 10, 255, 255, 20, 0]).unwrap();
        assert_eq!(channel_means(&matrix), Some([127.5, 15.0, 127.5]));
    }

    #[test]
    fn means_of_empty_matrix_is_none() {
        let matrix = PixelMatrix::from_raw(0, 0, Vec::new()).unwrap();
        assert_eq!(channel_means(&matrix), None);
    }

    #[test]
    fn brightness_uses_max_mean() {
        assert_eq!(brightness([0.0, 0.0, 0.0]), 0.0);
        assert_eq!(brightness([255.0, 0.0, 0.0]), 100.0);
        assert_eq!(brightness([10.0, 255.0, 30.0]), 100.0);
        assert!((brightness([128.0, 128.0, 128.0]) - 50.196).abs() < 0.001);
    }

    #[test]
    fn saturation_of_black_is_zero() {
        assert_eq!(saturation([0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn saturation_of_gray_is_zero() {
        assert_eq!(saturation([128.0, 128.0, 128.0]), 0.0);
        assert_eq!(saturation([255.0, 255.0, 255.0]), 0.0);
    }

    #[test]
    fn saturation_of_primary_is_full() {
        assert_eq!(saturation([255.0, 0.0, 0.0]), 100.0);
        assert_eq!(saturation([0.0, 0.0, 64.0]), 100.0);
    }

    #[test]
    fn saturation_partial_spread() {
        // max 200, min 50 -> (200-50)/200 = 75%
        assert!((saturation([200.0, 50.0, 100.0]) - 75.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn scores_stay_in_range(r in 0.0f64..=255.0, g in 0.0f64..=255.0, b in 0.0f64..=255.0) {
            let means = [r, g, b];
            let brightness = brightness(means);
            let saturation = saturation(means);
            prop_assert!((0.0..=100.0).contains(&brightness));
            prop_assert!((0.0..=100.0).contains(&saturation));
        }

        #[test]
        fn means_stay_in_channel_range(data in proptest::collection::vec(any::<u8>(), 3..=300)) {
            let len = data.len() / 3 * 3;
            let width = (len / 3) as u32;
            let matrix = PixelMatrix::from_raw(width, 1, data[..len].to_vec()).unwrap();
            let means = channel_means(&matrix).unwrap();
            for mean in means {
                prop_assert!((0.0..=CHANNEL_MAX).contains(&mean));
            }
        }
    }
}
