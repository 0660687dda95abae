use log::{debug, trace};
use nom::bytes::complete::take;

use crate::{
    bits::{join_byte, split_byte},
    error::{fail, EdidError, ParseResult, Result},
};

use super::{
    audio::AudioDataBlock,
    colorimetry::{self, ColorimetryDataBlock},
    hdmi::HdmiVendorDataBlock,
    speaker::SpeakerAllocationDataBlock,
    video::VideoDataBlock,
    ycbcr420::YCbCr420CapabilityMapDataBlock,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const TAG_AUDIO: u8 = 1;
pub const TAG_VIDEO: u8 = 2;
pub const TAG_VENDOR_SPECIFIC: u8 = 3;
pub const TAG_SPEAKER_ALLOCATION: u8 = 4;
pub const TAG_EXTENDED: u8 = 7;

pub const EXTENDED_TAG_COLORIMETRY: u8 = 0x05;
pub const EXTENDED_TAG_YCBCR420_CAPABILITY_MAP: u8 = 0x0F;

/// Largest length the 5 bit field of a data block header can carry.
pub const MAX_PAYLOAD_LEN: usize = 31;

/// Codec shared by every typed data block.
///
/// The payload excludes the header byte and, for extended tag blocks, the extended tag byte.
pub trait DataBlock: Sized {
    const NAME: &'static str;
    const TAG: u8;
    const EXTENDED_TAG: Option<u8> = None;

    fn decode_payload(payload: &[u8]) -> Result<Self>;

    fn encode_payload(&self) -> Result<Vec<u8>>;

    fn payload_size(&self) -> usize;

    /// Encoded size, header included.
    fn size(&self) -> usize {
        1 + usize::from(Self::EXTENDED_TAG.is_some()) + self.payload_size()
    }

    /// Decodes one block from the start of `bytes`.
    fn decode(bytes: &[u8]) -> Result<Self> {
        let (_, (tag, payload)) = parse_header(bytes)?;
        if tag != Self::TAG {
            return Err(EdidError::header(
                Self::NAME,
                format!("expected tag {}, found {}", Self::TAG, tag),
            ));
        }
        let payload = match Self::EXTENDED_TAG {
            Some(expected) => match payload.split_first() {
                Some((&extended, rest)) if extended == expected => rest,
                found => {
                    return Err(EdidError::header(
                        Self::NAME,
                        format!(
                            "expected extended tag {expected}, found {:?}",
                            found.map(|(tag, _)| *tag)
                        ),
                    ))
                }
            },
            None => payload,
        };
        Self::decode_payload(payload)
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let payload = self.encode_payload()?;
        frame(Self::NAME, Self::TAG, Self::EXTENDED_TAG, &payload)
    }
}

/// Prepends the header byte (and extended tag) to a payload.
fn frame(name: &'static str, tag: u8, extended_tag: Option<u8>, payload: &[u8]) -> Result<Vec<u8>> {
    let length = payload.len() + usize::from(extended_tag.is_some());
    if length > MAX_PAYLOAD_LEN {
        return Err(EdidError::length(name, length));
    }
    let mut out = Vec::with_capacity(length + 1);
    out.push(join_byte(tag, length as u8, 3));
    out.extend(extended_tag);
    out.extend_from_slice(payload);
    Ok(out)
}

/// Reads a header byte and the payload it announces.
fn parse_header(input: &[u8]) -> ParseResult<'_, (u8, &[u8])> {
    let (remaining, (tag, length)) = split_byte(input, 3)?;
    match take::<_, _, EdidError>(length)(remaining) {
        Ok((remaining, payload)) => Ok((remaining, (tag, payload))),
        Err(_) => fail(EdidError::length("data block", usize::from(length))),
    }
}

/// A data block with a tag, extended tag or OUI this crate does not interpret.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnknownDataBlock {
    pub tag: u8,
    /// Present for tag 7 blocks with a non empty payload.
    pub extended_tag: Option<u8>,
    pub payload: Vec<u8>,
}

impl UnknownDataBlock {
    fn from_parts(tag: u8, payload: &[u8]) -> Self {
        let (extended_tag, payload) = match (tag, payload.split_first()) {
            (TAG_EXTENDED, Some((extended, rest))) => (Some(*extended), rest),
            _ => (None, payload),
        };
        UnknownDataBlock {
            tag,
            extended_tag,
            payload: payload.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        1 + usize::from(self.extended_tag.is_some()) + self.payload.len()
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.tag > TAG_EXTENDED {
            return Err(EdidError::out_of_range("data block tag", self.tag));
        }
        match (self.tag, self.extended_tag) {
            (TAG_EXTENDED, None) if !self.payload.is_empty() => {
                return Err(EdidError::out_of_range("extended_tag", -1))
            }
            (tag, Some(_)) if tag != TAG_EXTENDED => {
                return Err(EdidError::out_of_range("data block tag", tag))
            }
            _ => {}
        }
        frame("unknown data block", self.tag, self.extended_tag, &self.payload)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CtaDataBlock {
    Video(VideoDataBlock),
    Audio(AudioDataBlock),
    SpeakerAllocation(SpeakerAllocationDataBlock),
    YCbCr420CapabilityMap(YCbCr420CapabilityMapDataBlock),
    Colorimetry(ColorimetryDataBlock),
    HdmiVendor(HdmiVendorDataBlock),
    Unknown(UnknownDataBlock),
}

impl CtaDataBlock {
    fn from_parts(tag: u8, payload: &[u8]) -> Result<Self> {
        Ok(match (tag, payload.split_first()) {
            (TAG_AUDIO, _) => CtaDataBlock::Audio(AudioDataBlock::decode_payload(payload)?),
            (TAG_VIDEO, _) => CtaDataBlock::Video(VideoDataBlock::decode_payload(payload)?),
            (TAG_SPEAKER_ALLOCATION, _) => CtaDataBlock::SpeakerAllocation(
                SpeakerAllocationDataBlock::decode_payload(payload)?,
            ),
            (TAG_VENDOR_SPECIFIC, _) if HdmiVendorDataBlock::matches_oui(payload) => {
                CtaDataBlock::HdmiVendor(HdmiVendorDataBlock::decode_payload(payload)?)
            }
            (TAG_EXTENDED, Some((&EXTENDED_TAG_COLORIMETRY, rest)))
                if rest.len() == colorimetry::PAYLOAD_LEN =>
            {
                CtaDataBlock::Colorimetry(ColorimetryDataBlock::decode_payload(rest)?)
            }
            (TAG_EXTENDED, Some((&EXTENDED_TAG_YCBCR420_CAPABILITY_MAP, rest))) => {
                CtaDataBlock::YCbCr420CapabilityMap(YCbCr420CapabilityMapDataBlock::decode_payload(
                    rest,
                )?)
            }
            _ => {
                debug!(
                    "Keeping data block with tag {} ({} payload bytes) uninterpreted",
                    tag,
                    payload.len()
                );
                CtaDataBlock::Unknown(UnknownDataBlock::from_parts(tag, payload))
            }
        })
    }

    /// Decodes the block at the start of `bytes`; use [`size`](Self::size) to find the next one.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (_, block) = parse_data_block(bytes)?;
        Ok(block)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            CtaDataBlock::Video(block) => block.encode(),
            CtaDataBlock::Audio(block) => block.encode(),
            CtaDataBlock::SpeakerAllocation(block) => block.encode(),
            CtaDataBlock::YCbCr420CapabilityMap(block) => block.encode(),
            CtaDataBlock::Colorimetry(block) => block.encode(),
            CtaDataBlock::HdmiVendor(block) => block.encode(),
            CtaDataBlock::Unknown(block) => block.encode(),
        }
    }

    /// Encoded size, header included.
    pub fn size(&self) -> usize {
        match self {
            CtaDataBlock::Video(block) => block.size(),
            CtaDataBlock::Audio(block) => block.size(),
            CtaDataBlock::SpeakerAllocation(block) => block.size(),
            CtaDataBlock::YCbCr420CapabilityMap(block) => block.size(),
            CtaDataBlock::Colorimetry(block) => block.size(),
            CtaDataBlock::HdmiVendor(block) => block.size(),
            CtaDataBlock::Unknown(block) => block.size(),
        }
    }
}

pub(crate) fn parse_data_block(input: &[u8]) -> ParseResult<'_, CtaDataBlock> {
    let (remaining, (tag, payload)) = parse_header(input)?;
    trace!("Decoding data block with tag {} and length {}", tag, payload.len());
    match CtaDataBlock::from_parts(tag, payload) {
        Ok(block) => Ok((remaining, block)),
        Err(err) => fail(err),
    }
}

/// Decodes consecutive data blocks until `bytes` is exhausted.
pub fn decode_collection(bytes: &[u8]) -> Result<Vec<CtaDataBlock>> {
    let mut remaining = bytes;
    let mut blocks = Vec::new();
    while !remaining.is_empty() {
        let block;
        (remaining, block) = parse_data_block(remaining)?;
        blocks.push(block);
    }
    Ok(blocks)
}

pub fn encode_collection(blocks: &[CtaDataBlock]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for block in blocks {
        out.extend(block.encode()?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_round_trips_in_order() {
        let bytes = [
            0x43, 0x90, 0x04, 0x1F, // video
            0x23, 0x09, 0x07, 0x07, // audio
            0x83, 0x01, 0x00, 0x00, // speakers
            0xE2, 0x00, 0x0F, // extended tag 0 (video capability), unknown here
            0x65, 0x00, 0x12, 0x34, 0x56, 0x78, // unknown vendor
        ];
        let blocks = decode_collection(&bytes).unwrap();
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], CtaDataBlock::Video(_)));
        assert!(matches!(blocks[1], CtaDataBlock::Audio(_)));
        assert!(matches!(blocks[2], CtaDataBlock::SpeakerAllocation(_)));
        assert_eq!(
            blocks[3],
            CtaDataBlock::Unknown(UnknownDataBlock {
                tag: 7,
                extended_tag: Some(0),
                payload: vec![0x0F],
            })
        );
        assert_eq!(
            blocks[4],
            CtaDataBlock::Unknown(UnknownDataBlock {
                tag: 3,
                extended_tag: None,
                payload: vec![0x00, 0x12, 0x34, 0x56, 0x78],
            })
        );
        assert_eq!(
            blocks.iter().map(CtaDataBlock::size).sum::<usize>(),
            bytes.len()
        );
        assert_eq!(encode_collection(&blocks).unwrap(), bytes);
    }

    #[test]
    fn overrunning_block_is_rejected() {
        assert_eq!(
            decode_collection(&[0x43, 0x10, 0x04]),
            Err(EdidError::InvalidDataBlockLength {
                block: "data block",
                length: 3
            })
        );
    }

    #[test]
    fn odd_colorimetry_payload_passes_through() {
        let bytes = [0xE4, 0x05, 0x90, 0x51, 0x07];
        let blocks = decode_collection(&bytes).unwrap();
        assert_eq!(
            blocks,
            vec![CtaDataBlock::Unknown(UnknownDataBlock {
                tag: 7,
                extended_tag: Some(EXTENDED_TAG_COLORIMETRY),
                payload: vec![0x90, 0x51, 0x07],
            })]
        );
        assert_eq!(encode_collection(&blocks).unwrap(), bytes);

        let blocks = decode_collection(&[0xE3, 0x05, 0x90, 0x51]).unwrap();
        assert!(matches!(blocks[0], CtaDataBlock::Colorimetry(_)));
    }

    #[test]
    fn empty_extended_block_survives() {
        let blocks = decode_collection(&[0xE0]).unwrap();
        assert_eq!(
            blocks,
            vec![CtaDataBlock::Unknown(UnknownDataBlock {
                tag: 7,
                extended_tag: None,
                payload: vec![],
            })]
        );
        assert_eq!(encode_collection(&blocks).unwrap(), [0xE0]);
    }

    #[test]
    fn unknown_block_must_be_consistent() {
        let block = UnknownDataBlock {
            tag: 7,
            extended_tag: None,
            payload: vec![1],
        };
        assert!(block.encode().is_err());

        let block = UnknownDataBlock {
            tag: 0,
            extended_tag: None,
            payload: vec![0; 32],
        };
        assert!(matches!(
            block.encode(),
            Err(EdidError::InvalidDataBlockLength { length: 32, .. })
        ));
    }

    #[test]
    fn typed_decode_checks_tag() {
        assert!(matches!(
            VideoDataBlock::decode(&[0x23, 0x09, 0x07, 0x07]),
            Err(EdidError::MalformedHeader { .. })
        ));
        assert!(matches!(
            ColorimetryDataBlock::decode(&[0xE3, 0x0F, 0x83, 0x01]),
            Err(EdidError::MalformedHeader { .. })
        ));
    }
}
