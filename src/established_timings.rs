use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Established timings I, base block byte `0x23`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct EstablishedTimings1: u8 {
        const H720V400F70 = 1 << 7;
        const H720V400F88 = 1 << 6;
        const H640V480F60 = 1 << 5;
        const H640V480F67 = 1 << 4;
        const H640V480F72 = 1 << 3;
        const H640V480F75 = 1 << 2;
        const H800V600F56 = 1 << 1;
        const H800V600F60 = 1 << 0;
    }
}

bitflags! {
    /// Established timings II, base block byte `0x24`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct EstablishedTimings2: u8 {
        const H800V600F72 = 1 << 7;
        const H800V600F75 = 1 << 6;
        const H832V624F75 = 1 << 5;
        /// Interlaced.
        const H1024V768F87 = 1 << 4;
        const H1024V768F60 = 1 << 3;
        const H1024V768F70 = 1 << 2;
        const H1024V768F75 = 1 << 1;
        const H1280V1024F75 = 1 << 0;
    }
}

bitflags! {
    /// Manufacturer's timings, base block byte `0x25`.
    ///
    /// Only bit 7 has a standard meaning; bits 6 to 0 are reserved for the manufacturer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ManufacturerTimings: u8 {
        const H1152V870F75 = 1 << 7;
        const MANUFACTURER_6 = 1 << 6;
        const MANUFACTURER_5 = 1 << 5;
        const MANUFACTURER_4 = 1 << 4;
        const MANUFACTURER_3 = 1 << 3;
        const MANUFACTURER_2 = 1 << 2;
        const MANUFACTURER_1 = 1 << 1;
        const MANUFACTURER_0 = 1 << 0;
    }
}
