//! Normalized video timing modes, the static timing catalogs and the traversal over an EDID
//! tree.

use std::fmt;

use crate::descriptor::DetailedTimingDescriptor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod tables;
pub mod traversal;
pub mod vic;

pub use tables::standard_timing_mode;
pub use traversal::TimingModes;
pub use vic::{
    get_cta861_video_timing, get_cta861_video_timing_mode, hdmi_vic_to_vic, Cta861VideoTiming,
    PictureAspectRatio,
};

/// A non-negative rational number, always stored in lowest terms.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rational {
    pub numerator: u64,
    pub denominator: u64,
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Rational {
    /// Returns `None` for a zero denominator.
    pub const fn new(numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let divisor = gcd(numerator, denominator);
        Some(Rational {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    pub const fn integer(value: u64) -> Self {
        Rational {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Snaps a measured frame rate to the nearer of `n/1` and `n*1000/1001` when that value is
    /// within 0.1 %, which is how nominal and NTSC rates are told apart. Other rates are
    /// returned unchanged.
    pub fn rationalize(self) -> Self {
        let value = self.as_f64();
        let tolerance = value * 0.001;

        let integer = value.round();
        let integer_error = (value - integer).abs();
        let ntsc_base = (value * 1.001).round();
        let ntsc_error = (value - ntsc_base * 1000.0 / 1001.0).abs();

        if integer >= 1.0 && integer_error <= tolerance && integer_error <= ntsc_error {
            Rational::integer(integer as u64)
        } else if ntsc_base >= 1.0 && ntsc_error <= tolerance {
            Rational::new(ntsc_base as u64 * 1000, 1001).unwrap_or(self)
        } else {
            self
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// The common currency of the timing catalogs: resolution, field rate and scan type.
///
/// For interlaced modes `v_res` is the frame height and `v_rate` the field rate.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VideoTimingMode {
    pub h_res: u32,
    pub v_res: u32,
    pub v_rate: Rational,
    pub interlaced: bool,
}

impl VideoTimingMode {
    pub const fn progressive(h_res: u32, v_res: u32, v_rate_hz: u64) -> Self {
        VideoTimingMode {
            h_res,
            v_res,
            v_rate: Rational::integer(v_rate_hz),
            interlaced: false,
        }
    }

    pub const fn interlaced(h_res: u32, v_res: u32, v_rate_hz: u64) -> Self {
        VideoTimingMode {
            interlaced: true,
            ..Self::progressive(h_res, v_res, v_rate_hz)
        }
    }

    /// Derives the exact mode of a detailed timing, or `None` when a total is zero.
    pub fn from_detailed_timing(dtd: &DetailedTimingDescriptor) -> Option<Self> {
        let h_total = u64::from(dtd.horizontal_total());
        let v_total = u64::from(dtd.vertical_total());
        if h_total == 0 || v_total == 0 {
            return None;
        }
        let clock_hz = u64::from(dtd.pixel_clock_khz) * 1000;
        let v_active = u32::from(dtd.vertical_active_lines);

        // An interlaced DTD describes one field; the frame adds half a line per field.
        let (v_res, v_rate) = if dtd.features.interlaced {
            (v_active * 2, Rational::new(2 * clock_hz, h_total * (2 * v_total + 1))?)
        } else {
            (v_active, Rational::new(clock_hz, h_total * v_total)?)
        };

        Some(VideoTimingMode {
            h_res: u32::from(dtd.horizontal_active_pixels),
            v_res,
            v_rate,
            interlaced: dtd.features.interlaced,
        })
    }
}

impl fmt::Display for VideoTimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scan = if self.interlaced { "i" } else { "p" };
        write!(f, "{}x{}{}@{}", self.h_res, self.v_res, scan, self.v_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EighteenByteDescriptor;

    fn dtd(bytes: [u8; 18]) -> DetailedTimingDescriptor {
        match EighteenByteDescriptor::decode(&bytes).unwrap() {
            EighteenByteDescriptor::DetailedTiming(dtd) => dtd,
            other => panic!("not a detailed timing: {other:?}"),
        }
    }

    #[test]
    fn rational_is_reduced() {
        assert_eq!(
            Rational::new(148_500_000, 2_475_000),
            Some(Rational::integer(60))
        );
        assert_eq!(
            Rational::new(120, 1001 * 2),
            Some(Rational {
                numerator: 60,
                denominator: 1001
            })
        );
        assert_eq!(Rational::new(1, 0), None);
    }

    #[test]
    fn progressive_dtd_rate() {
        let mode = VideoTimingMode::from_detailed_timing(&dtd([
            0x02, 0x3A, 0x80, 0x18, 0x71, 0x38, 0x2D, 0x40, 0x58, 0x2C, 0x45, 0x00, 0xC4, 0x8E,
            0x21, 0x00, 0x00, 0x1E,
        ]))
        .unwrap();
        assert_eq!(mode, VideoTimingMode::progressive(1920, 1080, 60));
        assert_eq!(mode.to_string(), "1920x1080p@60");
    }

    #[test]
    fn interlaced_dtd_counts_half_lines() {
        // 1920x1080i, 74.25 MHz, 22 blanking lines per field.
        let mode = VideoTimingMode::from_detailed_timing(&dtd([
            0x01, 0x1D, 0x80, 0x18, 0x71, 0x1C, 0x16, 0x20, 0x58, 0x2C, 0x25, 0x00, 0xC4, 0x8E,
            0x21, 0x00, 0x00, 0x9E,
        ]))
        .unwrap();
        assert_eq!(mode, VideoTimingMode::interlaced(1920, 1080, 60));
    }

    #[test]
    fn rationalize_snaps_ntsc_rates() {
        // 640x480 at 25.175 MHz.
        let rate = Rational::new(25_175_000, 800 * 525).unwrap();
        assert_eq!(rate.rationalize(), Rational::new(60_000, 1001).unwrap());

        let rate = Rational::new(74_176_000, 2750 * 1125).unwrap();
        assert_eq!(rate.rationalize(), Rational::new(24_000, 1001).unwrap());

        let rate = Rational::new(27_000_000, 1716 * 262).unwrap();
        assert_eq!(rate.rationalize(), Rational::integer(60));

        let odd = Rational::new(1, 3).unwrap();
        assert_eq!(odd.rationalize(), odd);
    }
}
