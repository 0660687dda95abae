//! HDMI vendor specific data block (IEEE OUI `00-0C-03`).
//!
//! Everything after the source physical address is optional. The capabilities byte, the
//! maximum TMDS clock and the flags byte are present when the declared length reaches them;
//! the flags byte then announces the latency pairs and the HDMI video sub-block. Decoding is
//! strict: the announced fields must account for every payload byte.

use bitflags::bitflags;
use log::trace;
use nom::{
    bytes::complete::take,
    multi::count,
    number::complete::{be_u16, le_u8},
};

use crate::{
    bits::{array, check_range, join_byte, nibbles, split_byte},
    error::{fail, EdidError, ParseResult, Result},
};

use super::data_block::{DataBlock, MAX_PAYLOAD_LEN, TAG_VENDOR_SPECIFIC};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The HDMI Licensing OUI as transmitted, least significant byte first.
pub const HDMI_OUI: [u8; 3] = [0x03, 0x0C, 0x00];

const MIN_PAYLOAD_LEN: usize = 5;
const MAX_HDMI_VICS: usize = 7;

/// Physical address `A.B.C.D` of the source, one nibble per component.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicalAddress(pub [u8; 4]);

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct HdmiCapabilities: u8 {
        const SUPPORTS_AI = 1 << 7;
        const DC_48BIT = 1 << 6;
        const DC_36BIT = 1 << 5;
        const DC_30BIT = 1 << 4;
        const DC_Y444 = 1 << 3;
        const DVI_DUAL = 1 << 0;
    }
}

bitflags! {
    /// Supported content types (CNC0 to CNC3).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ContentTypes: u8 {
        const GRAPHICS = 1 << 0;
        const PHOTO = 1 << 1;
        const CINEMA = 1 << 2;
        const GAME = 1 << 3;
    }
}

bitflags! {
    /// 3D structures a display supports for every (or every masked) SVD.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Stereo3dStructures: u16 {
        const FRAME_PACKING = 1 << 0;
        const FIELD_ALTERNATIVE = 1 << 1;
        const LINE_ALTERNATIVE = 1 << 2;
        const SIDE_BY_SIDE_FULL = 1 << 3;
        const L_DEPTH = 1 << 4;
        const L_DEPTH_GRAPHICS_DEPTH = 1 << 5;
        const TOP_AND_BOTTOM = 1 << 6;
        const SIDE_BY_SIDE_HALF = 1 << 8;
    }
}

/// Raw video and audio latency bytes; `1 + ms / 2`, 0 unknown, 255 unsupported.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Latency {
    pub video: u8,
    pub audio: u8,
}

/// How the screen size in the base block should be read.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ImageSize {
    NoInformation,
    AspectRatioOnly,
    RoundedCentimeters,
    DividedBy5,
}

impl ImageSize {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => ImageSize::NoInformation,
            0b01 => ImageSize::AspectRatioOnly,
            0b10 => ImageSize::RoundedCentimeters,
            _ => ImageSize::DividedBy5,
        }
    }

    fn bits(self) -> u8 {
        match self {
            ImageSize::NoInformation => 0b00,
            ImageSize::AspectRatioOnly => 0b01,
            ImageSize::RoundedCentimeters => 0b10,
            ImageSize::DividedBy5 => 0b11,
        }
    }
}

/// `3D_Structure_ALL` and, optionally, `3D_MASK`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ThreeDMulti {
    /// The structures apply to every SVD.
    AllFormats { structures: Stereo3dStructures },
    /// The structures apply to the SVDs whose 0-based index is set in `mask`.
    Masked {
        structures: Stereo3dStructures,
        mask: u16,
    },
}

impl ThreeDMulti {
    fn bits(&self) -> u8 {
        match self {
            ThreeDMulti::AllFormats { .. } => 0b01,
            ThreeDMulti::Masked { .. } => 0b10,
        }
    }

    fn size(&self) -> usize {
        match self {
            ThreeDMulti::AllFormats { .. } => 2,
            ThreeDMulti::Masked { .. } => 4,
        }
    }
}

/// 3D structure of a single SVD.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stereo3dFormat {
    FramePacking,
    FieldAlternative,
    LineAlternative,
    SideBySideFull,
    LDepth,
    LDepthGraphicsDepth,
    TopAndBottom,
    SideBySideHalf { subsampling: u8 },
    /// Structure codes 7 and 9 to 15. Codes from 8 upwards carry a detail nibble.
    Reserved { structure: u8, detail: Option<u8> },
}

impl Stereo3dFormat {
    fn from_nibbles(structure: u8, detail: Option<u8>) -> Self {
        match (structure, detail) {
            (0, _) => Stereo3dFormat::FramePacking,
            (1, _) => Stereo3dFormat::FieldAlternative,
            (2, _) => Stereo3dFormat::LineAlternative,
            (3, _) => Stereo3dFormat::SideBySideFull,
            (4, _) => Stereo3dFormat::LDepth,
            (5, _) => Stereo3dFormat::LDepthGraphicsDepth,
            (6, _) => Stereo3dFormat::TopAndBottom,
            (8, Some(subsampling)) => Stereo3dFormat::SideBySideHalf { subsampling },
            (structure, detail) => Stereo3dFormat::Reserved { structure, detail },
        }
    }

    fn to_nibbles(self) -> Result<(u8, Option<u8>)> {
        let (structure, detail) = match self {
            Stereo3dFormat::FramePacking => (0, None),
            Stereo3dFormat::FieldAlternative => (1, None),
            Stereo3dFormat::LineAlternative => (2, None),
            Stereo3dFormat::SideBySideFull => (3, None),
            Stereo3dFormat::LDepth => (4, None),
            Stereo3dFormat::LDepthGraphicsDepth => (5, None),
            Stereo3dFormat::TopAndBottom => (6, None),
            Stereo3dFormat::SideBySideHalf { subsampling } => (8, Some(subsampling)),
            Stereo3dFormat::Reserved { structure, detail } => {
                let valid = match structure {
                    7 => detail.is_none(),
                    9..=15 => detail.is_some(),
                    _ => false,
                };
                if !valid {
                    return Err(EdidError::out_of_range("3d_structure", structure));
                }
                (structure, detail)
            }
        };
        if let Some(detail) = detail {
            check_range("3d_detail", detail, 0..=15)?;
        }
        Ok((structure, detail))
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stereo3dEntry {
    /// 0-based index of the SVD in the video data block (`2D_VIC_order`).
    pub svd_index: u8,
    pub format: Stereo3dFormat,
}

impl Stereo3dEntry {
    fn size(&self) -> usize {
        match self.format {
            Stereo3dFormat::SideBySideHalf { .. } => 2,
            Stereo3dFormat::Reserved { detail, .. } => 1 + usize::from(detail.is_some()),
            _ => 1,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HdmiVideoSubblock {
    pub image_size: ImageSize,
    pub three_d_present: bool,
    pub three_d_multi: Option<ThreeDMulti>,
    /// At most 7 HDMI VICs.
    pub hdmi_vics: Vec<u8>,
    pub three_d_entries: Vec<Stereo3dEntry>,
}

impl HdmiVideoSubblock {
    fn three_d_len(&self) -> usize {
        self.three_d_multi.as_ref().map_or(0, ThreeDMulti::size)
            + self.three_d_entries.iter().map(Stereo3dEntry::size).sum::<usize>()
    }

    fn size(&self) -> usize {
        2 + self.hdmi_vics.len() + self.three_d_len()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HdmiVendorDataBlock {
    pub source_physical_address: PhysicalAddress,
    pub capabilities: Option<HdmiCapabilities>,
    /// Transmitted in units of 5 MHz.
    pub max_tmds_clock_mhz: Option<u16>,
    /// Present together with the flags byte that announces the fields below.
    pub content_types: Option<ContentTypes>,
    pub latency: Option<Latency>,
    pub interlaced_latency: Option<Latency>,
    pub video: Option<HdmiVideoSubblock>,
}

fn parse_latency(input: &[u8]) -> ParseResult<'_, Latency> {
    let (remaining, [video, audio]) = array(input)?;
    Ok((remaining, Latency { video, audio }))
}

fn parse_three_d_entry(input: &[u8]) -> ParseResult<'_, Stereo3dEntry> {
    let (mut remaining, (svd_index, structure)) = nibbles(input)?;
    let mut detail = None;
    if structure >= 8 {
        let (rest, (value, _reserved)) = nibbles(remaining)?;
        remaining = rest;
        detail = Some(value);
    }
    Ok((
        remaining,
        Stereo3dEntry {
            svd_index,
            format: Stereo3dFormat::from_nibbles(structure, detail),
        },
    ))
}

fn parse_video_subblock(input: &[u8]) -> ParseResult<'_, HdmiVideoSubblock> {
    let mut remaining = input;

    let video_flags;
    (remaining, video_flags) = le_u8(remaining)?;
    let three_d_present = video_flags & 0x80 != 0;
    let multi_bits = (video_flags >> 5) & 0b11;
    let image_size = ImageSize::from_bits(video_flags >> 3);

    let (hdmi_vic_len, three_d_len);
    (remaining, (hdmi_vic_len, three_d_len)) = split_byte(remaining, 3)?;

    let hdmi_vics;
    (remaining, hdmi_vics) = count(le_u8, usize::from(hdmi_vic_len))(remaining)?;

    let mut three_d;
    (remaining, three_d) = take(three_d_len)(remaining)?;

    let three_d_multi = match multi_bits {
        0b00 => None,
        0b01 => {
            let structures;
            (three_d, structures) = be_u16(three_d)?;
            Some(ThreeDMulti::AllFormats {
                structures: Stereo3dStructures::from_bits_retain(structures),
            })
        }
        0b10 => {
            let (structures, mask);
            (three_d, structures) = be_u16(three_d)?;
            (three_d, mask) = be_u16(three_d)?;
            Some(ThreeDMulti::Masked {
                structures: Stereo3dStructures::from_bits_retain(structures),
                mask,
            })
        }
        reserved => return fail(EdidError::out_of_range("3d_multi_present", reserved)),
    };

    let mut three_d_entries = Vec::new();
    while !three_d.is_empty() {
        let entry;
        (three_d, entry) = parse_three_d_entry(three_d)?;
        three_d_entries.push(entry);
    }

    Ok((
        remaining,
        HdmiVideoSubblock {
            image_size,
            three_d_present,
            three_d_multi,
            hdmi_vics,
            three_d_entries,
        },
    ))
}

fn parse_hdmi_payload(input: &[u8]) -> ParseResult<'_, HdmiVendorDataBlock> {
    let mut remaining = input;

    let oui: [u8; 3];
    (remaining, oui) = array(remaining)?;
    if oui != HDMI_OUI {
        return fail(EdidError::InvalidOui(oui));
    }

    let (a, b, c, d);
    (remaining, (a, b)) = nibbles(remaining)?;
    (remaining, (c, d)) = nibbles(remaining)?;

    let mut block = HdmiVendorDataBlock {
        source_physical_address: PhysicalAddress([a, b, c, d]),
        ..Default::default()
    };

    if remaining.is_empty() {
        return Ok((remaining, block));
    }
    let capabilities;
    (remaining, capabilities) = le_u8(remaining)?;
    block.capabilities = Some(HdmiCapabilities::from_bits_retain(capabilities));

    if remaining.is_empty() {
        return Ok((remaining, block));
    }
    let max_tmds_clock;
    (remaining, max_tmds_clock) = le_u8(remaining)?;
    block.max_tmds_clock_mhz = Some(u16::from(max_tmds_clock) * 5);

    if remaining.is_empty() {
        return Ok((remaining, block));
    }
    let flags;
    (remaining, flags) = le_u8(remaining)?;
    block.content_types = Some(ContentTypes::from_bits_retain(flags & 0x0F));
    // Interlaced latency is only defined next to progressive latency.
    if flags & 0xC0 == 0x40 {
        return fail(EdidError::out_of_range("latency_fields_present", flags));
    }

    if flags & 0x80 != 0 {
        let latency;
        (remaining, latency) = parse_latency(remaining)?;
        block.latency = Some(latency);
    }
    if flags & 0x40 != 0 {
        let latency;
        (remaining, latency) = parse_latency(remaining)?;
        block.interlaced_latency = Some(latency);
    }
    if flags & 0x20 != 0 {
        let video;
        (remaining, video) = parse_video_subblock(remaining)?;
        block.video = Some(video);
    }

    Ok((remaining, block))
}

impl HdmiVendorDataBlock {
    pub(crate) fn matches_oui(payload: &[u8]) -> bool {
        payload.starts_with(&HDMI_OUI)
    }

    /// Checks that every optional field is backed by the ones before it.
    fn validate_cascade(&self) -> Result<()> {
        let missing = |field: &'static str| Err(EdidError::out_of_range(field, -1));
        if self.max_tmds_clock_mhz.is_some() && self.capabilities.is_none() {
            return missing("capabilities");
        }
        if self.content_types.is_some() && self.max_tmds_clock_mhz.is_none() {
            return missing("max_tmds_clock_mhz");
        }
        let needs_flags =
            self.latency.is_some() || self.interlaced_latency.is_some() || self.video.is_some();
        if needs_flags && self.content_types.is_none() {
            return missing("content_types");
        }
        if self.interlaced_latency.is_some() && self.latency.is_none() {
            return missing("latency");
        }
        Ok(())
    }
}

impl DataBlock for HdmiVendorDataBlock {
    const NAME: &'static str = "HDMI vendor specific data block";
    const TAG: u8 = TAG_VENDOR_SPECIFIC;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        trace!("Decoding HDMI VSDB of {} bytes", payload.len());
        if payload.len() < MIN_PAYLOAD_LEN {
            return Err(EdidError::length(Self::NAME, payload.len()));
        }
        match parse_hdmi_payload(payload) {
            Ok(([], block)) => Ok(block),
            Ok(_) => Err(EdidError::length(Self::NAME, payload.len())),
            Err(err) => match EdidError::from(err) {
                EdidError::UnexpectedEnd => Err(EdidError::length(Self::NAME, payload.len())),
                err => Err(err),
            },
        }
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        self.validate_cascade()?;
        let size = self.payload_size();
        if size > MAX_PAYLOAD_LEN {
            return Err(EdidError::length(Self::NAME, size));
        }

        let mut out = Vec::with_capacity(size);
        out.extend_from_slice(&HDMI_OUI);
        let [a, b, c, d] = self.source_physical_address.0;
        for nibble in [a, b, c, d] {
            check_range("source_physical_address", nibble, 0..=15)?;
        }
        out.push(join_byte(a, b, 4));
        out.push(join_byte(c, d, 4));

        if let Some(capabilities) = self.capabilities {
            out.push(capabilities.bits());
        }
        if let Some(clock) = self.max_tmds_clock_mhz {
            check_range("max_tmds_clock_mhz", clock, 0..=255 * 5)?;
            if clock % 5 != 0 {
                return Err(EdidError::out_of_range("max_tmds_clock_mhz", clock));
            }
            out.push((clock / 5) as u8);
        }
        if let Some(content_types) = self.content_types {
            check_range("content_types", content_types.bits(), 0..=0x0F)?;
            let flag = |set: bool, bit: u8| if set { bit } else { 0 };
            out.push(
                flag(self.latency.is_some(), 0x80)
                    | flag(self.interlaced_latency.is_some(), 0x40)
                    | flag(self.video.is_some(), 0x20)
                    | content_types.bits(),
            );
        }
        for latency in [self.latency, self.interlaced_latency].into_iter().flatten() {
            out.extend_from_slice(&[latency.video, latency.audio]);
        }
        if let Some(video) = &self.video {
            encode_video_subblock(video, &mut out)?;
        }
        Ok(out)
    }

    fn payload_size(&self) -> usize {
        let latency_pairs = [self.latency, self.interlaced_latency]
            .iter()
            .flatten()
            .count();
        HDMI_OUI.len()
            + 2
            + usize::from(self.capabilities.is_some())
            + usize::from(self.max_tmds_clock_mhz.is_some())
            + usize::from(self.content_types.is_some())
            + latency_pairs * 2
            + self.video.as_ref().map_or(0, HdmiVideoSubblock::size)
    }
}

fn encode_video_subblock(video: &HdmiVideoSubblock, out: &mut Vec<u8>) -> Result<()> {
    if video.hdmi_vics.len() > MAX_HDMI_VICS {
        return Err(EdidError::out_of_range("hdmi_vics", video.hdmi_vics.len() as i64));
    }
    let three_d_len = video.three_d_len();
    check_range("hdmi_3d_len", three_d_len as u32, 0..=31)?;

    let multi_bits = video.three_d_multi.as_ref().map_or(0, ThreeDMulti::bits);
    out.push(
        if video.three_d_present { 0x80 } else { 0 }
            | (multi_bits << 5)
            | (video.image_size.bits() << 3),
    );
    out.push(join_byte(video.hdmi_vics.len() as u8, three_d_len as u8, 3));
    out.extend_from_slice(&video.hdmi_vics);

    match video.three_d_multi {
        Some(ThreeDMulti::AllFormats { structures }) => {
            out.extend_from_slice(&structures.bits().to_be_bytes());
        }
        Some(ThreeDMulti::Masked { structures, mask }) => {
            out.extend_from_slice(&structures.bits().to_be_bytes());
            out.extend_from_slice(&mask.to_be_bytes());
        }
        None => {}
    }

    for entry in &video.three_d_entries {
        check_range("2d_vic_order", entry.svd_index, 0..=15)?;
        let (structure, detail) = entry.format.to_nibbles()?;
        out.push(join_byte(entry.svd_index, structure, 4));
        if let Some(detail) = detail {
            out.push(detail << 4);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cta::data_block::{decode_collection, CtaDataBlock};

    const FULL: [u8; 22] = [
        0x75, 0x03, 0x0C, 0x00, 0x10, 0x00, 0xB8, 0x3C, 0xE8, 0x15, 0x15, 0x29, 0x29, 0xA0,
        0x45, 0x01, 0x03, 0x01, 0x41, 0x08, 0x10, 0x16,
    ];

    #[test]
    fn decodes_every_optional_field() {
        let block = HdmiVendorDataBlock::decode(&FULL).unwrap();
        assert_eq!(
            block,
            HdmiVendorDataBlock {
                source_physical_address: PhysicalAddress([1, 0, 0, 0]),
                capabilities: Some(
                    HdmiCapabilities::SUPPORTS_AI
                        | HdmiCapabilities::DC_36BIT
                        | HdmiCapabilities::DC_30BIT
                        | HdmiCapabilities::DC_Y444
                ),
                max_tmds_clock_mhz: Some(300),
                content_types: Some(ContentTypes::GAME),
                latency: Some(Latency {
                    video: 0x15,
                    audio: 0x15
                }),
                interlaced_latency: Some(Latency {
                    video: 0x29,
                    audio: 0x29
                }),
                video: Some(HdmiVideoSubblock {
                    image_size: ImageSize::NoInformation,
                    three_d_present: true,
                    three_d_multi: Some(ThreeDMulti::AllFormats {
                        structures: Stereo3dStructures::FRAME_PACKING
                            | Stereo3dStructures::TOP_AND_BOTTOM
                            | Stereo3dStructures::SIDE_BY_SIDE_HALF
                    }),
                    hdmi_vics: vec![1, 3],
                    three_d_entries: vec![
                        Stereo3dEntry {
                            svd_index: 0,
                            format: Stereo3dFormat::SideBySideHalf { subsampling: 1 },
                        },
                        Stereo3dEntry {
                            svd_index: 1,
                            format: Stereo3dFormat::TopAndBottom,
                        },
                    ],
                }),
            }
        );
        assert_eq!(block.payload_size(), 21);
        assert_eq!(block.encode().unwrap(), FULL);
    }

    #[test]
    fn minimal_block_has_only_an_address() {
        let bytes = [0x65, 0x03, 0x0C, 0x00, 0x21, 0x00];
        let block = HdmiVendorDataBlock::decode(&bytes).unwrap();
        assert_eq!(block.source_physical_address, PhysicalAddress([2, 1, 0, 0]));
        assert_eq!(block.capabilities, None);
        assert_eq!(block.encode().unwrap(), bytes);

        let bytes = [0x68, 0x03, 0x0C, 0x00, 0x10, 0x00, 0x00, 0x3C, 0x00];
        let block = HdmiVendorDataBlock::decode(&bytes).unwrap();
        assert_eq!(block.content_types, Some(ContentTypes::empty()));
        assert_eq!(block.encode().unwrap(), bytes);
    }

    #[test]
    fn length_nine_is_impossible() {
        let with_stray_byte = [0x69, 0x03, 0x0C, 0x00, 0x10, 0x00, 0x00, 0x3C, 0x00, 0x00];
        let with_half_latency = [0x69, 0x03, 0x0C, 0x00, 0x10, 0x00, 0x00, 0x3C, 0x80, 0x00];
        for bytes in [with_stray_byte, with_half_latency] {
            assert_eq!(
                HdmiVendorDataBlock::decode(&bytes),
                Err(EdidError::InvalidDataBlockLength {
                    block: HdmiVendorDataBlock::NAME,
                    length: 9
                })
            );
            assert!(decode_collection(&bytes).is_err());
        }
    }

    #[test]
    fn shorter_than_five_fails() {
        for bytes in [&[0x64, 0x03, 0x0C, 0x00, 0x10][..], &[0x63, 0x03, 0x0C, 0x00]] {
            assert!(matches!(
                decode_collection(bytes),
                Err(EdidError::InvalidDataBlockLength { .. })
            ));
        }
    }

    #[test]
    fn other_ouis_pass_through() {
        let bytes = [0x65, 0xD8, 0x5D, 0xC4, 0x01, 0x78];
        assert!(matches!(
            decode_collection(&bytes).unwrap()[0],
            CtaDataBlock::Unknown(_)
        ));
        assert_eq!(
            HdmiVendorDataBlock::decode(&bytes),
            Err(EdidError::InvalidOui([0xD8, 0x5D, 0xC4]))
        );
    }

    #[test]
    fn masked_3d_round_trips() {
        let block = HdmiVendorDataBlock {
            source_physical_address: PhysicalAddress([3, 0, 0, 0]),
            capabilities: Some(HdmiCapabilities::empty()),
            max_tmds_clock_mhz: Some(165),
            content_types: Some(ContentTypes::empty()),
            latency: None,
            interlaced_latency: None,
            video: Some(HdmiVideoSubblock {
                image_size: ImageSize::RoundedCentimeters,
                three_d_present: true,
                three_d_multi: Some(ThreeDMulti::Masked {
                    structures: Stereo3dStructures::FRAME_PACKING,
                    mask: 0b101,
                }),
                hdmi_vics: vec![],
                three_d_entries: vec![],
            }),
        };
        let bytes = block.encode().unwrap();
        assert_eq!(
            bytes,
            [0x6E, 0x03, 0x0C, 0x00, 0x30, 0x00, 0x00, 0x21, 0x20, 0xD0, 0x04, 0x00, 0x01, 0x00, 0x05]
        );
        assert_eq!(HdmiVendorDataBlock::decode(&bytes).unwrap(), block);
    }

    #[test]
    fn encode_validates_cascade() {
        let block = HdmiVendorDataBlock {
            capabilities: Some(HdmiCapabilities::empty()),
            max_tmds_clock_mhz: Some(300),
            latency: Some(Latency { video: 1, audio: 1 }),
            ..Default::default()
        };
        assert!(matches!(
            block.encode(),
            Err(EdidError::ValueOutOfRange {
                field: "content_types",
                ..
            })
        ));

        let block = HdmiVendorDataBlock {
            capabilities: Some(HdmiCapabilities::empty()),
            max_tmds_clock_mhz: Some(300),
            content_types: Some(ContentTypes::empty()),
            interlaced_latency: Some(Latency { video: 1, audio: 1 }),
            ..Default::default()
        };
        assert!(matches!(
            block.encode(),
            Err(EdidError::ValueOutOfRange {
                field: "latency",
                ..
            })
        ));
    }

    #[test]
    fn interlaced_latency_needs_latency() {
        assert_eq!(
            decode_collection(&[0x6A, 0x03, 0x0C, 0x00, 0x10, 0x00, 0x00, 0x3C, 0x40, 0x01, 0x01]),
            Err(EdidError::ValueOutOfRange {
                field: "latency_fields_present",
                value: 0x40
            })
        );

        let bytes = [
            0x6C, 0x03, 0x0C, 0x00, 0x10, 0x00, 0x00, 0x3C, 0xC0, 0x01, 0x01, 0x02, 0x02,
        ];
        let blocks = decode_collection(&bytes).unwrap();
        let CtaDataBlock::HdmiVendor(block) = &blocks[0] else {
            panic!("HDMI vendor block expected");
        };
        assert_eq!(block.latency, Some(Latency { video: 1, audio: 1 }));
        assert_eq!(block.interlaced_latency, Some(Latency { video: 2, audio: 2 }));
        assert_eq!(block.encode().unwrap(), bytes);
    }

    #[test]
    fn oversized_block_is_rejected() {
        let block = HdmiVendorDataBlock {
            capabilities: Some(HdmiCapabilities::empty()),
            max_tmds_clock_mhz: Some(300),
            content_types: Some(ContentTypes::empty()),
            video: Some(HdmiVideoSubblock {
                image_size: ImageSize::NoInformation,
                three_d_present: true,
                three_d_multi: None,
                hdmi_vics: vec![],
                three_d_entries: (0..11)
                    .map(|svd_index| Stereo3dEntry {
                        svd_index,
                        format: Stereo3dFormat::SideBySideHalf { subsampling: 0 },
                    })
                    .collect(),
            }),
            ..Default::default()
        };
        assert_eq!(block.payload_size(), 32);
        assert!(matches!(
            block.encode(),
            Err(EdidError::InvalidDataBlockLength { length: 32, .. })
        ));
    }
}
