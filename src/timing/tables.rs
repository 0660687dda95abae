//! Bit and code tables of the base block timing fields.
//!
//! Established and standard timings carry nominal refresh rates, so their modes use integer
//! rates. Tables are ordered the way the traversal visits them, most significant bit first.

use crate::{
    descriptor::established_timings3::{
        EstablishedTimings3Byte10, EstablishedTimings3Byte11, EstablishedTimings3Byte6,
        EstablishedTimings3Byte7, EstablishedTimings3Byte8, EstablishedTimings3Byte9,
    },
    established_timings::{EstablishedTimings1, EstablishedTimings2, ManufacturerTimings},
    standard_timing::StandardTiming,
};

use super::VideoTimingMode;

const fn p(h_res: u32, v_res: u32, rate: u64) -> VideoTimingMode {
    VideoTimingMode::progressive(h_res, v_res, rate)
}

pub static ESTABLISHED_TIMINGS_1: [(EstablishedTimings1, VideoTimingMode); 8] = [
    (EstablishedTimings1::H720V400F70, p(720, 400, 70)),
    (EstablishedTimings1::H720V400F88, p(720, 400, 88)),
    (EstablishedTimings1::H640V480F60, p(640, 480, 60)),
    (EstablishedTimings1::H640V480F67, p(640, 480, 67)),
    (EstablishedTimings1::H640V480F72, p(640, 480, 72)),
    (EstablishedTimings1::H640V480F75, p(640, 480, 75)),
    (EstablishedTimings1::H800V600F56, p(800, 600, 56)),
    (EstablishedTimings1::H800V600F60, p(800, 600, 60)),
];

pub static ESTABLISHED_TIMINGS_2: [(EstablishedTimings2, VideoTimingMode); 8] = [
    (EstablishedTimings2::H800V600F72, p(800, 600, 72)),
    (EstablishedTimings2::H800V600F75, p(800, 600, 75)),
    (EstablishedTimings2::H832V624F75, p(832, 624, 75)),
    (
        EstablishedTimings2::H1024V768F87,
        VideoTimingMode::interlaced(1024, 768, 87),
    ),
    (EstablishedTimings2::H1024V768F60, p(1024, 768, 60)),
    (EstablishedTimings2::H1024V768F70, p(1024, 768, 70)),
    (EstablishedTimings2::H1024V768F75, p(1024, 768, 75)),
    (EstablishedTimings2::H1280V1024F75, p(1280, 1024, 75)),
];

/// Bits 6 to 0 are manufacturer defined and never resolve to a mode.
pub static MANUFACTURER_TIMINGS: [(ManufacturerTimings, VideoTimingMode); 1] =
    [(ManufacturerTimings::H1152V870F75, p(1152, 870, 75))];

pub static ESTABLISHED_TIMINGS_3_BYTE_6: [(EstablishedTimings3Byte6, VideoTimingMode); 8] = [
    (EstablishedTimings3Byte6::H640V350F85, p(640, 350, 85)),
    (EstablishedTimings3Byte6::H640V400F85, p(640, 400, 85)),
    (EstablishedTimings3Byte6::H720V400F85, p(720, 400, 85)),
    (EstablishedTimings3Byte6::H640V480F85, p(640, 480, 85)),
    (EstablishedTimings3Byte6::H848V480F60, p(848, 480, 60)),
    (EstablishedTimings3Byte6::H800V600F85, p(800, 600, 85)),
    (EstablishedTimings3Byte6::H1024V768F85, p(1024, 768, 85)),
    (EstablishedTimings3Byte6::H1152V864F75, p(1152, 864, 75)),
];

pub static ESTABLISHED_TIMINGS_3_BYTE_7: [(EstablishedTimings3Byte7, VideoTimingMode); 8] = [
    (EstablishedTimings3Byte7::H1280V768F60RB, p(1280, 768, 60)),
    (EstablishedTimings3Byte7::H1280V768F60, p(1280, 768, 60)),
    (EstablishedTimings3Byte7::H1280V768F75, p(1280, 768, 75)),
    (EstablishedTimings3Byte7::H1280V768F85, p(1280, 768, 85)),
    (EstablishedTimings3Byte7::H1280V960F60, p(1280, 960, 60)),
    (EstablishedTimings3Byte7::H1280V960F85, p(1280, 960, 85)),
    (EstablishedTimings3Byte7::H1280V1024F60, p(1280, 1024, 60)),
    (EstablishedTimings3Byte7::H1280V1024F85, p(1280, 1024, 85)),
];

pub static ESTABLISHED_TIMINGS_3_BYTE_8: [(EstablishedTimings3Byte8, VideoTimingMode); 8] = [
    (EstablishedTimings3Byte8::H1360V768F60, p(1360, 768, 60)),
    (EstablishedTimings3Byte8::H1440V900F60RB, p(1440, 900, 60)),
    (EstablishedTimings3Byte8::H1440V900F60, p(1440, 900, 60)),
    (EstablishedTimings3Byte8::H1440V900F75, p(1440, 900, 75)),
    (EstablishedTimings3Byte8::H1440V900F85, p(1440, 900, 85)),
    (EstablishedTimings3Byte8::H1400V1050F60RB, p(1400, 1050, 60)),
    (EstablishedTimings3Byte8::H1400V1050F60, p(1400, 1050, 60)),
    (EstablishedTimings3Byte8::H1400V1050F75, p(1400, 1050, 75)),
];

pub static ESTABLISHED_TIMINGS_3_BYTE_9: [(EstablishedTimings3Byte9, VideoTimingMode); 8] = [
    (EstablishedTimings3Byte9::H1400V1050F85, p(1400, 1050, 85)),
    (EstablishedTimings3Byte9::H1680V1050F60RB, p(1680, 1050, 60)),
    (EstablishedTimings3Byte9::H1680V1050F60, p(1680, 1050, 60)),
    (EstablishedTimings3Byte9::H1680V1050F75, p(1680, 1050, 75)),
    (EstablishedTimings3Byte9::H1680V1050F85, p(1680, 1050, 85)),
    (EstablishedTimings3Byte9::H1600V1200F60, p(1600, 1200, 60)),
    (EstablishedTimings3Byte9::H1600V1200F65, p(1600, 1200, 65)),
    (EstablishedTimings3Byte9::H1600V1200F70, p(1600, 1200, 70)),
];

pub static ESTABLISHED_TIMINGS_3_BYTE_10: [(EstablishedTimings3Byte10, VideoTimingMode); 8] = [
    (EstablishedTimings3Byte10::H1600V1200F75, p(1600, 1200, 75)),
    (EstablishedTimings3Byte10::H1600V1200F85, p(1600, 1200, 85)),
    (EstablishedTimings3Byte10::H1792V1344F60, p(1792, 1344, 60)),
    (EstablishedTimings3Byte10::H1792V1344F75, p(1792, 1344, 75)),
    (EstablishedTimings3Byte10::H1856V1392F60, p(1856, 1392, 60)),
    (EstablishedTimings3Byte10::H1856V1392F75, p(1856, 1392, 75)),
    (EstablishedTimings3Byte10::H1920V1200F60RB, p(1920, 1200, 60)),
    (EstablishedTimings3Byte10::H1920V1200F60, p(1920, 1200, 60)),
];

/// Bits 3 to 0 are reserved.
pub static ESTABLISHED_TIMINGS_3_BYTE_11: [(EstablishedTimings3Byte11, VideoTimingMode); 4] = [
    (EstablishedTimings3Byte11::H1920V1200F75, p(1920, 1200, 75)),
    (EstablishedTimings3Byte11::H1920V1200F85, p(1920, 1200, 85)),
    (EstablishedTimings3Byte11::H1920V1440F60, p(1920, 1440, 60)),
    (EstablishedTimings3Byte11::H1920V1440F75, p(1920, 1440, 75)),
];

/// VESA DMT standard timing codes.
pub static STANDARD_TIMINGS: [([u8; 2], VideoTimingMode); 46] = [
    ([0x31, 0x40], p(640, 480, 60)),
    ([0x31, 0x4C], p(640, 480, 72)),
    ([0x31, 0x4F], p(640, 480, 75)),
    ([0x31, 0x59], p(640, 480, 85)),
    ([0x45, 0x40], p(800, 600, 60)),
    ([0x45, 0x4C], p(800, 600, 72)),
    ([0x45, 0x4F], p(800, 600, 75)),
    ([0x45, 0x59], p(800, 600, 85)),
    ([0x61, 0x40], p(1024, 768, 60)),
    ([0x61, 0x4A], p(1024, 768, 70)),
    ([0x61, 0x4F], p(1024, 768, 75)),
    ([0x61, 0x59], p(1024, 768, 85)),
    ([0x71, 0x4F], p(1152, 864, 75)),
    ([0x81, 0xC0], p(1280, 720, 60)),
    ([0x81, 0x00], p(1280, 800, 60)),
    ([0x81, 0x0F], p(1280, 800, 75)),
    ([0x81, 0x19], p(1280, 800, 85)),
    ([0x81, 0x40], p(1280, 960, 60)),
    ([0x81, 0x59], p(1280, 960, 85)),
    ([0x81, 0x80], p(1280, 1024, 60)),
    ([0x81, 0x8F], p(1280, 1024, 75)),
    ([0x81, 0x99], p(1280, 1024, 85)),
    ([0x90, 0x40], p(1400, 1050, 60)),
    ([0x90, 0x4F], p(1400, 1050, 75)),
    ([0x90, 0x59], p(1400, 1050, 85)),
    ([0x95, 0x00], p(1440, 900, 60)),
    ([0x95, 0x0F], p(1440, 900, 75)),
    ([0x95, 0x19], p(1440, 900, 85)),
    ([0xA9, 0xC0], p(1600, 900, 60)),
    ([0xA9, 0x40], p(1600, 1200, 60)),
    ([0xA9, 0x45], p(1600, 1200, 65)),
    ([0xA9, 0x4A], p(1600, 1200, 70)),
    ([0xA9, 0x4F], p(1600, 1200, 75)),
    ([0xA9, 0x59], p(1600, 1200, 85)),
    ([0xB3, 0x00], p(1680, 1050, 60)),
    ([0xB3, 0x0F], p(1680, 1050, 75)),
    ([0xB3, 0x19], p(1680, 1050, 85)),
    ([0xC1, 0x40], p(1792, 1344, 60)),
    ([0xC1, 0x4F], p(1792, 1344, 75)),
    ([0xC9, 0x40], p(1856, 1392, 60)),
    ([0xC9, 0x4F], p(1856, 1392, 75)),
    ([0xD1, 0xC0], p(1920, 1080, 60)),
    ([0xD1, 0x00], p(1920, 1200, 60)),
    ([0xD1, 0x0F], p(1920, 1200, 75)),
    ([0xD1, 0x40], p(1920, 1440, 60)),
    ([0xD1, 0x4F], p(1920, 1440, 75)),
];

/// Looks a standard timing up by its wire code. Codes outside the DMT list resolve to `None`.
pub fn standard_timing_mode(timing: &StandardTiming) -> Option<VideoTimingMode> {
    let code = StandardTiming::encode(Some(timing)).ok()?;
    STANDARD_TIMINGS
        .iter()
        .find(|(entry, _)| *entry == code)
        .map(|(_, mode)| *mode)
}
