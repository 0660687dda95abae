//! CTA-861 extension blocks and their data block collection.

use log::trace;
use nom::number::complete::le_u8;

use crate::{
    bits::{as_block, check_range, checksum, verify_checksum, BLOCK_SIZE},
    descriptor::{detailed_timing::parse_detailed_timing, DetailedTimingDescriptor, DESCRIPTOR_SIZE},
    error::{EdidError, ParseResult, Result},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod audio;
pub mod colorimetry;
pub mod data_block;
pub mod hdmi;
pub mod speaker;
pub mod video;
pub mod ycbcr420;

pub use audio::{
    AudioDataBlock, AudioFormat, FormatSpecific, LpcmBitDepths, SamplingFrequencies,
    ShortAudioDescriptor,
};
pub use colorimetry::{ColorimetryDataBlock, ColorimetryStandards, GamutMetadataProfiles};
pub use data_block::{decode_collection, encode_collection, CtaDataBlock, DataBlock, UnknownDataBlock};
pub use hdmi::{
    ContentTypes, HdmiCapabilities, HdmiVendorDataBlock, HdmiVideoSubblock, ImageSize, Latency,
    PhysicalAddress, Stereo3dEntry, Stereo3dFormat, Stereo3dStructures, ThreeDMulti,
};
pub use speaker::{SpeakerAllocation, SpeakerAllocationDataBlock};
pub use video::{svd_vic, VideoDataBlock};
pub use ycbcr420::YCbCr420CapabilityMapDataBlock;

pub const CTA_EXTENSION_TAG: u8 = 0x02;
pub const CTA_REVISION: u8 = 3;

/// First byte after the fixed header.
const COLLECTION_START: usize = 4;
/// Last byte available to content; byte 127 is the checksum.
const CONTENT_END: usize = BLOCK_SIZE - 1;

#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cta861Block {
    pub underscan: bool,
    pub basic_audio: bool,
    pub ycbcr_444: bool,
    pub ycbcr_422: bool,
    /// Number of native DTDs, low nibble of byte 3.
    pub native_dtd_count: u8,
    pub data_blocks: Vec<CtaDataBlock>,
    pub detailed_timings: Vec<DetailedTimingDescriptor>,
}

fn parse_header(input: &[u8]) -> ParseResult<'_, (u8, u8, u8, u8)> {
    let (remaining, tag) = le_u8(input)?;
    let (remaining, revision) = le_u8(remaining)?;
    let (remaining, offset) = le_u8(remaining)?;
    let (remaining, flags) = le_u8(remaining)?;
    Ok((remaining, (tag, revision, offset, flags)))
}

/// Reads DTDs from `input` until a window starting with `00 00`, or one that does not fit.
fn parse_trailing_timings(input: &[u8]) -> ParseResult<'_, Vec<DetailedTimingDescriptor>> {
    let mut remaining = input;
    let mut timings = Vec::new();
    while remaining.len() >= DESCRIPTOR_SIZE && remaining[..2] != [0, 0] {
        let dtd;
        (remaining, dtd) = parse_detailed_timing(remaining)?;
        timings.push(dtd);
    }
    Ok((remaining, timings))
}

impl Cta861Block {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let block = as_block(bytes)?;
        trace!("Decoding CTA-861 extension block");

        let (_, (tag, revision, offset, flags)) = parse_header(block)?;
        if tag != CTA_EXTENSION_TAG {
            return Err(EdidError::header(
                "CTA-861 block",
                format!("expected tag 0x{CTA_EXTENSION_TAG:02X}, found 0x{tag:02X}"),
            ));
        }
        if revision != CTA_REVISION {
            return Err(EdidError::header(
                "CTA-861 block",
                format!("expected revision {CTA_REVISION}, found {revision}"),
            ));
        }
        verify_checksum(block)?;

        let offset = usize::from(offset);
        let (data_blocks, detailed_timings) = match offset {
            0 => (Vec::new(), Vec::new()),
            COLLECTION_START..=CONTENT_END => {
                let data_blocks = decode_collection(&block[COLLECTION_START..offset])?;
                let (_, timings) = parse_trailing_timings(&block[offset..CONTENT_END])?;
                (data_blocks, timings)
            }
            _ => {
                return Err(EdidError::header(
                    "CTA-861 block",
                    format!("DTD offset {offset} outside the block"),
                ))
            }
        };

        let bit = |n: u8| flags & (1 << n) != 0;
        Ok(Cta861Block {
            underscan: bit(7),
            basic_audio: bit(6),
            ycbcr_444: bit(5),
            ycbcr_422: bit(4),
            native_dtd_count: flags & 0x0F,
            data_blocks,
            detailed_timings,
        })
    }

    pub fn encode(&self) -> Result<[u8; BLOCK_SIZE]> {
        check_range("native_dtd_count", self.native_dtd_count, 0..=15)?;
        let collection = encode_collection(&self.data_blocks)?;

        let mut content = collection.clone();
        for dtd in &self.detailed_timings {
            content.extend_from_slice(&dtd.encode()?);
        }
        let size = COLLECTION_START + content.len();
        if size > CONTENT_END {
            return Err(EdidError::SizeOverflow { size });
        }

        let offset = if content.is_empty() {
            0
        } else {
            COLLECTION_START + collection.len()
        };
        let flag = |set: bool, n: u8| if set { 1u8 << n } else { 0 };

        let mut block = [0u8; BLOCK_SIZE];
        block[..COLLECTION_START].copy_from_slice(&[
            CTA_EXTENSION_TAG,
            CTA_REVISION,
            offset as u8,
            flag(self.underscan, 7)
                | flag(self.basic_audio, 6)
                | flag(self.ycbcr_444, 5)
                | flag(self.ycbcr_422, 4)
                | self.native_dtd_count,
        ]);
        block[COLLECTION_START..size].copy_from_slice(&content);
        block[BLOCK_SIZE - 1] = checksum(&block);
        Ok(block)
    }
}
