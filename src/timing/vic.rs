//! The CTA-861 video format catalog, indexed by Video Identification Code.

use crate::{
    descriptor::{DetailedTimingDescriptor, FeaturesBitmap, StereoMode, SyncSignal},
    error::{EdidError, Result},
};

use super::VideoTimingMode;

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PictureAspectRatio {
    Ratio4x3,
    Ratio16x9,
    Ratio64x27,
    Ratio256x135,
}

/// One entry of the VIC catalog.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Cta861VideoTiming {
    pub vic: u8,
    /// Timing as transmitted, with repeated pixels counted in the active width.
    pub dtd: DetailedTimingDescriptor,
    /// Allowed pixel repetition factors; the first one is the default.
    pub pixel_repetition: &'static [u8],
    /// Nominal field rate.
    pub v_rate_hz: u16,
    pub aspect_ratio: PictureAspectRatio,
}

const POSITIVE: (bool, bool) = (true, true);
const NEGATIVE: (bool, bool) = (false, false);

/// `h` and `v` are `[active, sync start, sync end, total]` over the whole frame; interlaced
/// timings are halved into one field. `sync` is the (horizontal, vertical) polarity.
const fn timing(
    pixel_clock_khz: u32,
    h: [u16; 4],
    v: [u16; 4],
    interlaced: bool,
    sync: (bool, bool),
) -> DetailedTimingDescriptor {
    let fields = if interlaced { 2 } else { 1 };
    DetailedTimingDescriptor {
        pixel_clock_khz,
        horizontal_active_pixels: h[0],
        horizontal_blanking_pixels: h[3] - h[0],
        vertical_active_lines: v[0] / fields,
        vertical_blanking_lines: (v[3] - v[0]) / fields,
        horizontal_front_porch: h[1] - h[0],
        horizontal_sync_width: h[2] - h[1],
        vertical_front_porch: (v[1] - v[0]) / fields,
        vertical_sync_width: (v[2] - v[1]) / fields,
        horizontal_image_size_mm: 0,
        vertical_image_size_mm: 0,
        horizontal_border_pixels: 0,
        vertical_border_lines: 0,
        features: FeaturesBitmap {
            interlaced,
            stereo_mode: StereoMode::None,
            sync: SyncSignal::DigitalSeparate {
                v_sync_positive: sync.1,
                h_sync_positive: sync.0,
            },
        },
    }
}

const fn p(clock: u32, h: [u16; 4], v: [u16; 4], sync: (bool, bool)) -> DetailedTimingDescriptor {
    timing(clock, h, v, false, sync)
}

const fn i(clock: u32, h: [u16; 4], v: [u16; 4], sync: (bool, bool)) -> DetailedTimingDescriptor {
    timing(clock, h, v, true, sync)
}

const V480: [u16; 4] = [480, 489, 495, 525];
const V480I: [u16; 4] = [480, 488, 494, 525];
const V240: [u16; 4] = [240, 244, 247, 262];
const V576: [u16; 4] = [576, 581, 586, 625];
const V576I: [u16; 4] = [576, 580, 586, 625];
const V288: [u16; 4] = [288, 290, 293, 312];
const V720: [u16; 4] = [720, 725, 730, 750];
const V1080: [u16; 4] = [1080, 1084, 1089, 1125];
const V1080I: [u16; 4] = [1080, 1084, 1094, 1125];
const V2160: [u16; 4] = [2160, 2168, 2178, 2250];

const H720_60: [u16; 4] = [720, 736, 798, 858];
const H1440_60: [u16; 4] = [1440, 1478, 1602, 1716];
const H720_50: [u16; 4] = [720, 732, 796, 864];
const H1440_50: [u16; 4] = [1440, 1464, 1590, 1728];
const H1280_60: [u16; 4] = [1280, 1390, 1430, 1650];
const H1280_50: [u16; 4] = [1280, 1720, 1760, 1980];
const H1280_30: [u16; 4] = [1280, 3040, 3080, 3300];
const H1920_60: [u16; 4] = [1920, 2008, 2052, 2200];
const H1920_50: [u16; 4] = [1920, 2448, 2492, 2640];
const H1920_24: [u16; 4] = [1920, 2558, 2602, 2750];

const DTD_640X480P60: DetailedTimingDescriptor = p(25_175, [640, 656, 752, 800], [480, 490, 492, 525], NEGATIVE);
const DTD_480P60: DetailedTimingDescriptor = p(27_000, H720_60, V480, NEGATIVE);
const DTD_720P60: DetailedTimingDescriptor = p(74_250, H1280_60, V720, POSITIVE);
const DTD_1080I60: DetailedTimingDescriptor = i(74_250, H1920_60, V1080I, POSITIVE);
const DTD_480I60: DetailedTimingDescriptor = i(27_000, H1440_60, V480I, NEGATIVE);
const DTD_240P60: DetailedTimingDescriptor = p(27_000, H1440_60, V240, NEGATIVE);
const DTD_2880X480I60: DetailedTimingDescriptor = i(54_000, [2880, 2956, 3204, 3432], V480I, NEGATIVE);
const DTD_2880X240P60: DetailedTimingDescriptor = p(54_000, [2880, 2956, 3204, 3432], V240, NEGATIVE);
const DTD_1440X480P60: DetailedTimingDescriptor = p(54_000, [1440, 1472, 1596, 1716], V480, NEGATIVE);
const DTD_1080P60: DetailedTimingDescriptor = p(148_500, H1920_60, V1080, POSITIVE);
const DTD_576P50: DetailedTimingDescriptor = p(27_000, H720_50, V576, NEGATIVE);
const DTD_720P50: DetailedTimingDescriptor = p(74_250, H1280_50, V720, POSITIVE);
const DTD_1080I50: DetailedTimingDescriptor = i(74_250, H1920_50, V1080I, POSITIVE);
const DTD_576I50: DetailedTimingDescriptor = i(27_000, H1440_50, V576I, NEGATIVE);
const DTD_288P50: DetailedTimingDescriptor = p(27_000, H1440_50, V288, NEGATIVE);
const DTD_2880X576I50: DetailedTimingDescriptor = i(54_000, [2880, 2928, 3180, 3456], V576I, NEGATIVE);
const DTD_2880X288P50: DetailedTimingDescriptor = p(54_000, [2880, 2928, 3180, 3456], V288, NEGATIVE);
const DTD_1440X576P50: DetailedTimingDescriptor = p(54_000, [1440, 1464, 1592, 1728], V576, NEGATIVE);
const DTD_1080P50: DetailedTimingDescriptor = p(148_500, H1920_50, V1080, POSITIVE);
const DTD_1080P24: DetailedTimingDescriptor = p(74_250, H1920_24, V1080, POSITIVE);
const DTD_1080P25: DetailedTimingDescriptor = p(74_250, H1920_50, V1080, POSITIVE);
const DTD_1080P30: DetailedTimingDescriptor = p(74_250, H1920_60, V1080, POSITIVE);
const DTD_2880X480P60: DetailedTimingDescriptor = p(108_000, [2880, 2944, 3192, 3432], V480, NEGATIVE);
const DTD_2880X576P50: DetailedTimingDescriptor = p(108_000, [2880, 2928, 3184, 3456], V576, NEGATIVE);
// 1250 line system: the field total is a whole number of lines.
const DTD_1080I50_1250: DetailedTimingDescriptor = i(72_000, [1920, 1952, 2120, 2304], [1080, 1126, 1136, 1250], (true, false));
const DTD_1080I100: DetailedTimingDescriptor = i(148_500, H1920_50, V1080I, POSITIVE);
const DTD_720P100: DetailedTimingDescriptor = p(148_500, H1280_50, V720, POSITIVE);
const DTD_576P100: DetailedTimingDescriptor = p(54_000, H720_50, V576, NEGATIVE);
const DTD_576I100: DetailedTimingDescriptor = i(54_000, H1440_50, V576I, NEGATIVE);
const DTD_1080I120: DetailedTimingDescriptor = i(148_500, H1920_60, V1080I, POSITIVE);
const DTD_720P120: DetailedTimingDescriptor = p(148_500, H1280_60, V720, POSITIVE);
const DTD_480P120: DetailedTimingDescriptor = p(54_000, H720_60, V480, NEGATIVE);
const DTD_480I120: DetailedTimingDescriptor = i(54_000, H1440_60, V480I, NEGATIVE);
const DTD_576P200: DetailedTimingDescriptor = p(108_000, H720_50, V576, NEGATIVE);
const DTD_576I200: DetailedTimingDescriptor = i(108_000, H1440_50, V576I, NEGATIVE);
const DTD_480P240: DetailedTimingDescriptor = p(108_000, H720_60, V480, NEGATIVE);
const DTD_480I240: DetailedTimingDescriptor = i(108_000, H1440_60, V480I, NEGATIVE);
const DTD_720P24: DetailedTimingDescriptor = p(59_400, H1280_30, V720, POSITIVE);
const DTD_720P25: DetailedTimingDescriptor = p(74_250, [1280, 3700, 3740, 3960], V720, POSITIVE);
const DTD_720P30: DetailedTimingDescriptor = p(74_250, H1280_30, V720, POSITIVE);
const DTD_1080P120: DetailedTimingDescriptor = p(297_000, H1920_60, V1080, POSITIVE);
const DTD_1080P100: DetailedTimingDescriptor = p(297_000, H1920_50, V1080, POSITIVE);
const DTD_720P48: DetailedTimingDescriptor = p(90_000, [1280, 2240, 2280, 2500], V720, POSITIVE);
const DTD_1080P48: DetailedTimingDescriptor = p(148_500, H1920_24, V1080, POSITIVE);

const DTD_2160P24: DetailedTimingDescriptor = p(297_000, [3840, 5116, 5204, 5500], V2160, POSITIVE);
const DTD_2160P25: DetailedTimingDescriptor = p(297_000, [3840, 4896, 4984, 5280], V2160, POSITIVE);
const DTD_2160P30: DetailedTimingDescriptor = p(297_000, [3840, 4016, 4104, 4400], V2160, POSITIVE);
const DTD_2160P48: DetailedTimingDescriptor = p(594_000, [3840, 5116, 5204, 5500], V2160, POSITIVE);
const DTD_2160P50: DetailedTimingDescriptor = p(594_000, [3840, 4896, 4984, 5280], V2160, POSITIVE);
const DTD_2160P60: DetailedTimingDescriptor = p(594_000, [3840, 4016, 4104, 4400], V2160, POSITIVE);
const DTD_2160P100: DetailedTimingDescriptor = p(1_188_000, [3840, 4896, 4984, 5280], V2160, POSITIVE);
const DTD_2160P120: DetailedTimingDescriptor = p(1_188_000, [3840, 4016, 4104, 4400], V2160, POSITIVE);

const V4320_A: [u16; 4] = [4320, 4336, 4356, 4500];
const V4320_B: [u16; 4] = [4320, 4336, 4356, 4400];
const DTD_4320P24: DetailedTimingDescriptor = p(1_188_000, [7680, 10232, 10408, 11000], V4320_A, POSITIVE);
const DTD_4320P25: DetailedTimingDescriptor = p(1_188_000, [7680, 10032, 10208, 10800], V4320_B, POSITIVE);
const DTD_4320P30: DetailedTimingDescriptor = p(1_188_000, [7680, 8232, 8408, 9000], V4320_B, POSITIVE);
const DTD_4320P48: DetailedTimingDescriptor = p(2_376_000, [7680, 10232, 10408, 11000], V4320_A, POSITIVE);
const DTD_4320P50: DetailedTimingDescriptor = p(2_376_000, [7680, 10032, 10208, 10800], V4320_B, POSITIVE);
const DTD_4320P60: DetailedTimingDescriptor = p(2_376_000, [7680, 8232, 8408, 9000], V4320_B, POSITIVE);
const DTD_4320P100: DetailedTimingDescriptor = p(4_752_000, [7680, 9792, 9968, 10560], V4320_A, POSITIVE);
const DTD_4320P120: DetailedTimingDescriptor = p(4_752_000, [7680, 8032, 8208, 8800], V4320_A, POSITIVE);

const REP_1: &[u8] = &[1];
const REP_2: &[u8] = &[2];
const REP_1_2: &[u8] = &[1, 2];
const REP_1_2_4: &[u8] = &[1, 2, 4];
const REP_1_TO_10: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

use self::PictureAspectRatio::{Ratio16x9 as W, Ratio256x135 as D, Ratio4x3 as A, Ratio64x27 as U};

const fn vic(
    vic: u8,
    v_rate_hz: u16,
    aspect_ratio: PictureAspectRatio,
    pixel_repetition: &'static [u8],
    dtd: DetailedTimingDescriptor,
) -> Cta861VideoTiming {
    Cta861VideoTiming {
        vic,
        dtd,
        pixel_repetition,
        v_rate_hz,
        aspect_ratio,
    }
}

/// VICs 1 to 127 followed by VICs 193 to 219.
static CTA861_VIDEO_TIMINGS: [Cta861VideoTiming; 154] = [
    vic(1, 60, A, REP_1, DTD_640X480P60),
    vic(2, 60, A, REP_1, DTD_480P60),
    vic(3, 60, W, REP_1, DTD_480P60),
    vic(4, 60, W, REP_1, DTD_720P60),
    vic(5, 60, W, REP_1, DTD_1080I60),
    vic(6, 60, A, REP_2, DTD_480I60),
    vic(7, 60, W, REP_2, DTD_480I60),
    vic(8, 60, A, REP_2, DTD_240P60),
    vic(9, 60, W, REP_2, DTD_240P60),
    vic(10, 60, A, REP_1_TO_10, DTD_2880X480I60),
    vic(11, 60, W, REP_1_TO_10, DTD_2880X480I60),
    vic(12, 60, A, REP_1_TO_10, DTD_2880X240P60),
    vic(13, 60, W, REP_1_TO_10, DTD_2880X240P60),
    vic(14, 60, A, REP_1_2, DTD_1440X480P60),
    vic(15, 60, W, REP_1_2, DTD_1440X480P60),
    vic(16, 60, W, REP_1, DTD_1080P60),
    vic(17, 50, A, REP_1, DTD_576P50),
    vic(18, 50, W, REP_1, DTD_576P50),
    vic(19, 50, W, REP_1, DTD_720P50),
    vic(20, 50, W, REP_1, DTD_1080I50),
    vic(21, 50, A, REP_2, DTD_576I50),
    vic(22, 50, W, REP_2, DTD_576I50),
    vic(23, 50, A, REP_2, DTD_288P50),
    vic(24, 50, W, REP_2, DTD_288P50),
    vic(25, 50, A, REP_1_TO_10, DTD_2880X576I50),
    vic(26, 50, W, REP_1_TO_10, DTD_2880X576I50),
    vic(27, 50, A, REP_1_TO_10, DTD_2880X288P50),
    vic(28, 50, W, REP_1_TO_10, DTD_2880X288P50),
    vic(29, 50, A, REP_1_2, DTD_1440X576P50),
    vic(30, 50, W, REP_1_2, DTD_1440X576P50),
    vic(31, 50, W, REP_1, DTD_1080P50),
    vic(32, 24, W, REP_1, DTD_1080P24),
    vic(33, 25, W, REP_1, DTD_1080P25),
    vic(34, 30, W, REP_1, DTD_1080P30),
    vic(35, 60, A, REP_1_2_4, DTD_2880X480P60),
    vic(36, 60, W, REP_1_2_4, DTD_2880X480P60),
    vic(37, 50, A, REP_1_2_4, DTD_2880X576P50),
    vic(38, 50, W, REP_1_2_4, DTD_2880X576P50),
    vic(39, 50, W, REP_1, DTD_1080I50_1250),
    vic(40, 100, W, REP_1, DTD_1080I100),
    vic(41, 100, W, REP_1, DTD_720P100),
    vic(42, 100, A, REP_1, DTD_576P100),
    vic(43, 100, W, REP_1, DTD_576P100),
    vic(44, 100, A, REP_2, DTD_576I100),
    vic(45, 100, W, REP_2, DTD_576I100),
    vic(46, 120, W, REP_1, DTD_1080I120),
    vic(47, 120, W, REP_1, DTD_720P120),
    vic(48, 120, A, REP_1, DTD_480P120),
    vic(49, 120, W, REP_1, DTD_480P120),
    vic(50, 120, A, REP_2, DTD_480I120),
    vic(51, 120, W, REP_2, DTD_480I120),
    vic(52, 200, A, REP_1, DTD_576P200),
    vic(53, 200, W, REP_1, DTD_576P200),
    vic(54, 200, A, REP_2, DTD_576I200),
    vic(55, 200, W, REP_2, DTD_576I200),
    vic(56, 240, A, REP_1, DTD_480P240),
    vic(57, 240, W, REP_1, DTD_480P240),
    vic(58, 240, A, REP_2, DTD_480I240),
    vic(59, 240, W, REP_2, DTD_480I240),
    vic(60, 24, W, REP_1, DTD_720P24),
    vic(61, 25, W, REP_1, DTD_720P25),
    vic(62, 30, W, REP_1, DTD_720P30),
    vic(63, 120, W, REP_1, DTD_1080P120),
    vic(64, 100, W, REP_1, DTD_1080P100),
    vic(65, 24, U, REP_1, DTD_720P24),
    vic(66, 25, U, REP_1, DTD_720P25),
    vic(67, 30, U, REP_1, DTD_720P30),
    vic(68, 50, U, REP_1, DTD_720P50),
    vic(69, 60, U, REP_1, DTD_720P60),
    vic(70, 100, U, REP_1, DTD_720P100),
    vic(71, 120, U, REP_1, DTD_720P120),
    vic(72, 24, U, REP_1, DTD_1080P24),
    vic(73, 25, U, REP_1, DTD_1080P25),
    vic(74, 30, U, REP_1, DTD_1080P30),
    vic(75, 50, U, REP_1, DTD_1080P50),
    vic(76, 60, U, REP_1, DTD_1080P60),
    vic(77, 100, U, REP_1, DTD_1080P100),
    vic(78, 120, U, REP_1, DTD_1080P120),
    vic(79, 24, U, REP_1, p(59_400, [1680, 3040, 3080, 3300], V720, POSITIVE)),
    vic(80, 25, U, REP_1, p(59_400, [1680, 2908, 2948, 3168], V720, POSITIVE)),
    vic(81, 30, U, REP_1, p(59_400, [1680, 2380, 2420, 2640], V720, POSITIVE)),
    vic(82, 50, U, REP_1, p(82_500, [1680, 1940, 1980, 2200], V720, POSITIVE)),
    vic(83, 60, U, REP_1, p(99_000, [1680, 1940, 1980, 2200], V720, POSITIVE)),
    vic(84, 100, U, REP_1, p(165_000, [1680, 1740, 1780, 2000], [720, 725, 730, 825], POSITIVE)),
    vic(85, 120, U, REP_1, p(198_000, [1680, 1740, 1780, 2000], [720, 725, 730, 825], POSITIVE)),
    vic(86, 24, U, REP_1, p(99_000, [2560, 3558, 3602, 3750], [1080, 1084, 1089, 1100], POSITIVE)),
    vic(87, 25, U, REP_1, p(90_000, [2560, 3008, 3052, 3200], V1080, POSITIVE)),
    vic(88, 30, U, REP_1, p(118_800, [2560, 3328, 3372, 3520], V1080, POSITIVE)),
    vic(89, 50, U, REP_1, p(185_625, [2560, 3108, 3152, 3300], V1080, POSITIVE)),
    vic(90, 60, U, REP_1, p(198_000, [2560, 2808, 2852, 3000], [1080, 1084, 1089, 1100], POSITIVE)),
    vic(91, 100, U, REP_1, p(371_250, [2560, 2778, 2822, 2970], [1080, 1084, 1089, 1250], POSITIVE)),
    vic(92, 120, U, REP_1, p(495_000, [2560, 3108, 3152, 3300], [1080, 1084, 1089, 1250], POSITIVE)),
    vic(93, 24, W, REP_1, DTD_2160P24),
    vic(94, 25, W, REP_1, DTD_2160P25),
    vic(95, 30, W, REP_1, DTD_2160P30),
    vic(96, 50, W, REP_1, DTD_2160P50),
    vic(97, 60, W, REP_1, DTD_2160P60),
    vic(98, 24, D, REP_1, p(297_000, [4096, 5116, 5204, 5500], V2160, POSITIVE)),
    vic(99, 25, D, REP_1, p(297_000, [4096, 5064, 5152, 5280], V2160, POSITIVE)),
    vic(100, 30, D, REP_1, p(297_000, [4096, 4184, 4272, 4400], V2160, POSITIVE)),
    vic(101, 50, D, REP_1, p(594_000, [4096, 5064, 5152, 5280], V2160, POSITIVE)),
    vic(102, 60, D, REP_1, p(594_000, [4096, 4184, 4272, 4400], V2160, POSITIVE)),
    vic(103, 24, U, REP_1, DTD_2160P24),
    vic(104, 25, U, REP_1, DTD_2160P25),
    vic(105, 30, U, REP_1, DTD_2160P30),
    vic(106, 50, U, REP_1, DTD_2160P50),
    vic(107, 60, U, REP_1, DTD_2160P60),
    vic(108, 48, W, REP_1, DTD_720P48),
    vic(109, 48, U, REP_1, DTD_720P48),
    vic(110, 48, U, REP_1, p(99_000, [1680, 2490, 2530, 2750], V720, POSITIVE)),
    vic(111, 48, W, REP_1, DTD_1080P48),
    vic(112, 48, U, REP_1, DTD_1080P48),
    vic(113, 48, U, REP_1, p(198_000, [2560, 3558, 3602, 3750], [1080, 1084, 1089, 1100], POSITIVE)),
    vic(114, 48, W, REP_1, DTD_2160P48),
    vic(115, 48, D, REP_1, p(594_000, [4096, 5116, 5204, 5500], V2160, POSITIVE)),
    vic(116, 48, U, REP_1, DTD_2160P48),
    vic(117, 100, W, REP_1, DTD_2160P100),
    vic(118, 120, W, REP_1, DTD_2160P120),
    vic(119, 100, U, REP_1, DTD_2160P100),
    vic(120, 120, U, REP_1, DTD_2160P120),
    vic(121, 24, U, REP_1, p(396_000, [5120, 7116, 7204, 7500], [2160, 2168, 2178, 2200], POSITIVE)),
    vic(122, 25, U, REP_1, p(396_000, [5120, 6816, 6904, 7200], [2160, 2168, 2178, 2200], POSITIVE)),
    vic(123, 30, U, REP_1, p(396_000, [5120, 5784, 5872, 6000], [2160, 2168, 2178, 2200], POSITIVE)),
    vic(124, 48, U, REP_1, p(742_500, [5120, 5866, 5954, 6250], [2160, 2168, 2178, 2475], POSITIVE)),
    vic(125, 50, U, REP_1, p(742_500, [5120, 6216, 6304, 6600], V2160, POSITIVE)),
    vic(126, 60, U, REP_1, p(742_500, [5120, 5284, 5372, 5500], V2160, POSITIVE)),
    vic(127, 100, U, REP_1, p(1_485_000, [5120, 6216, 6304, 6600], V2160, POSITIVE)),
    vic(193, 120, U, REP_1, p(1_485_000, [5120, 5284, 5372, 5500], V2160, POSITIVE)),
    vic(194, 24, W, REP_1, DTD_4320P24),
    vic(195, 25, W, REP_1, DTD_4320P25),
    vic(196, 30, W, REP_1, DTD_4320P30),
    vic(197, 48, W, REP_1, DTD_4320P48),
    vic(198, 50, W, REP_1, DTD_4320P50),
    vic(199, 60, W, REP_1, DTD_4320P60),
    vic(200, 100, W, REP_1, DTD_4320P100),
    vic(201, 120, W, REP_1, DTD_4320P120),
    vic(202, 24, U, REP_1, DTD_4320P24),
    vic(203, 25, U, REP_1, DTD_4320P25),
    vic(204, 30, U, REP_1, DTD_4320P30),
    vic(205, 48, U, REP_1, DTD_4320P48),
    vic(206, 50, U, REP_1, DTD_4320P50),
    vic(207, 60, U, REP_1, DTD_4320P60),
    vic(208, 100, U, REP_1, DTD_4320P100),
    vic(209, 120, U, REP_1, DTD_4320P120),
    vic(210, 24, U, REP_1, p(1_485_000, [10240, 11732, 11908, 12500], [4320, 4336, 4356, 4950], POSITIVE)),
    vic(211, 25, U, REP_1, p(1_485_000, [10240, 12732, 12908, 13500], V4320_B, POSITIVE)),
    vic(212, 30, U, REP_1, p(1_485_000, [10240, 10528, 10704, 11000], V4320_A, POSITIVE)),
    vic(213, 48, U, REP_1, p(2_970_000, [10240, 11732, 11908, 12500], [4320, 4336, 4356, 4950], POSITIVE)),
    vic(214, 50, U, REP_1, p(2_970_000, [10240, 12732, 12908, 13500], V4320_B, POSITIVE)),
    vic(215, 60, U, REP_1, p(2_970_000, [10240, 10528, 10704, 11000], V4320_A, POSITIVE)),
    vic(216, 100, U, REP_1, p(5_940_000, [10240, 12432, 12608, 13200], V4320_A, POSITIVE)),
    vic(217, 120, U, REP_1, p(5_940_000, [10240, 10528, 10704, 11000], V4320_A, POSITIVE)),
    vic(218, 100, D, REP_1, p(1_188_000, [4096, 4896, 4984, 5280], V2160, POSITIVE)),
    vic(219, 120, D, REP_1, p(1_188_000, [4096, 4184, 4272, 4400], V2160, POSITIVE)),
];

/// Looks up a VIC. SVD values 129 to 192 (native VICs 1 to 64) resolve to their base entry.
pub fn get_cta861_video_timing(vic: u8) -> Result<&'static Cta861VideoTiming> {
    let index = match vic {
        1..=127 => usize::from(vic) - 1,
        129..=192 => usize::from(vic) - 129,
        193..=219 => usize::from(vic) - 193 + 127,
        _ => return Err(EdidError::InvalidVic(vic)),
    };
    Ok(&CTA861_VIDEO_TIMINGS[index])
}

/// The normalized mode of a VIC, with repeated pixels folded back by the default factor.
pub fn get_cta861_video_timing_mode(vic: u8) -> Result<VideoTimingMode> {
    let timing = get_cta861_video_timing(vic)?;
    let mut mode =
        VideoTimingMode::from_detailed_timing(&timing.dtd).ok_or(EdidError::InvalidVic(vic))?;
    if let Some(&factor) = timing.pixel_repetition.first() {
        mode.h_res /= u32::from(factor);
    }
    Ok(mode)
}

/// Maps an HDMI VIC from the vendor block to the equivalent CTA VIC.
pub fn hdmi_vic_to_vic(hdmi_vic: u8) -> Option<u8> {
    match hdmi_vic {
        1 => Some(95),
        2 => Some(94),
        3 => Some(93),
        4 => Some(98),
        _ => None,
    }
}
