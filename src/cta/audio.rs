use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::{
    bits::check_range,
    error::{EdidError, Result},
};

use super::data_block::{DataBlock, TAG_AUDIO};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Audio format code, bits 6 to 3 of the first SAD byte.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum AudioFormat {
    #[num_enum(default)]
    Reserved = 0,
    Lpcm = 1,
    Ac3 = 2,
    Mpeg1 = 3,
    Mp3 = 4,
    Mpeg2 = 5,
    AacLc = 6,
    Dts = 7,
    Atrac = 8,
    OneBitAudio = 9,
    EnhancedAc3 = 10,
    DtsHd = 11,
    Mat = 12,
    Dst = 13,
    WmaPro = 14,
    Extended = 15,
}

impl AudioFormat {
    /// Formats 2 to 8 carry a maximum bit rate in the third SAD byte.
    fn has_max_bitrate(self) -> bool {
        (2..=8).contains(&u8::from(self))
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct SamplingFrequencies: u8 {
        const KHZ_32 = 1 << 0;
        const KHZ_44_1 = 1 << 1;
        const KHZ_48 = 1 << 2;
        const KHZ_88_2 = 1 << 3;
        const KHZ_96 = 1 << 4;
        const KHZ_176_4 = 1 << 5;
        const KHZ_192 = 1 << 6;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct LpcmBitDepths: u8 {
        const BITS_16 = 1 << 0;
        const BITS_20 = 1 << 1;
        const BITS_24 = 1 << 2;
    }
}

/// Third SAD byte, interpreted according to the format.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FormatSpecific {
    LpcmBitDepths(LpcmBitDepths),
    /// Maximum bit rate in kHz, transmitted in units of 8 kHz.
    MaxBitrate(u16),
    Raw(u8),
}

/// A 3 byte short audio descriptor.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShortAudioDescriptor {
    pub format: AudioFormat,
    /// 1 to 8.
    pub channels: u8,
    pub sampling_frequencies: SamplingFrequencies,
    pub format_specific: FormatSpecific,
}

impl ShortAudioDescriptor {
    fn from_bytes(bytes: [u8; 3]) -> Self {
        let format = AudioFormat::from((bytes[0] >> 3) & 0xF);
        let format_specific = match format {
            AudioFormat::Lpcm => {
                FormatSpecific::LpcmBitDepths(LpcmBitDepths::from_bits_retain(bytes[2]))
            }
            format if format.has_max_bitrate() => {
                FormatSpecific::MaxBitrate(u16::from(bytes[2]) * 8)
            }
            _ => FormatSpecific::Raw(bytes[2]),
        };
        ShortAudioDescriptor {
            format,
            channels: (bytes[0] & 0b111) + 1,
            sampling_frequencies: SamplingFrequencies::from_bits_retain(bytes[1] & 0x7F),
            format_specific,
        }
    }

    fn to_bytes(self) -> Result<[u8; 3]> {
        check_range("channels", self.channels, 1..=8)?;
        let third = match (self.format, self.format_specific) {
            (AudioFormat::Lpcm, FormatSpecific::LpcmBitDepths(depths)) => depths.bits(),
            (format, FormatSpecific::MaxBitrate(khz)) if format.has_max_bitrate() => {
                check_range("max_bitrate_khz", khz, 0..=255 * 8)?;
                if khz % 8 != 0 {
                    return Err(EdidError::out_of_range("max_bitrate_khz", khz));
                }
                (khz / 8) as u8
            }
            (format, FormatSpecific::Raw(raw))
                if format != AudioFormat::Lpcm && !format.has_max_bitrate() =>
            {
                raw
            }
            (format, _) => {
                return Err(EdidError::out_of_range("audio format", u8::from(format)));
            }
        };
        let frequencies = self.sampling_frequencies.bits();
        check_range("sampling_frequencies", frequencies, 0..=0x7F)?;
        Ok([
            (u8::from(self.format) << 3) | (self.channels - 1),
            frequencies,
            third,
        ])
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AudioDataBlock {
    pub sads: Vec<ShortAudioDescriptor>,
}

impl DataBlock for AudioDataBlock {
    const NAME: &'static str = "audio data block";
    const TAG: u8 = TAG_AUDIO;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() % 3 != 0 {
            return Err(EdidError::length(Self::NAME, payload.len()));
        }
        let sads = payload
            .chunks_exact(3)
            .map(|sad| ShortAudioDescriptor::from_bytes([sad[0], sad[1], sad[2]]))
            .collect();
        Ok(AudioDataBlock { sads })
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        if self.sads.len() > 10 {
            return Err(EdidError::length(Self::NAME, self.payload_size()));
        }
        let mut out = Vec::with_capacity(self.payload_size());
        for sad in &self.sads {
            out.extend_from_slice(&sad.to_bytes()?);
        }
        Ok(out)
    }

    fn payload_size(&self) -> usize {
        self.sads.len() * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_lpcm_and_compressed_formats() {
        let bytes = [0x26, 0x09, 0x07, 0x07, 0x15, 0x07, 0x50];
        let block = AudioDataBlock::decode(&bytes).unwrap();
        assert_eq!(
            block.sads,
            vec![
                ShortAudioDescriptor {
                    format: AudioFormat::Lpcm,
                    channels: 2,
                    sampling_frequencies: SamplingFrequencies::KHZ_32
                        | SamplingFrequencies::KHZ_44_1
                        | SamplingFrequencies::KHZ_48,
                    format_specific: FormatSpecific::LpcmBitDepths(LpcmBitDepths::all()),
                },
                ShortAudioDescriptor {
                    format: AudioFormat::Ac3,
                    channels: 6,
                    sampling_frequencies: SamplingFrequencies::KHZ_32
                        | SamplingFrequencies::KHZ_44_1
                        | SamplingFrequencies::KHZ_48,
                    format_specific: FormatSpecific::MaxBitrate(640),
                },
            ]
        );
        assert_eq!(block.encode().unwrap(), bytes);
    }

    #[test]
    fn extended_formats_stay_raw() {
        let bytes = [0x23, 0x7F, 0x7F, 0x48];
        let block = AudioDataBlock::decode(&bytes).unwrap();
        assert_eq!(block.sads[0].format, AudioFormat::Extended);
        assert_eq!(block.sads[0].channels, 8);
        assert_eq!(block.sads[0].format_specific, FormatSpecific::Raw(0x48));
        assert_eq!(block.encode().unwrap(), bytes);
    }

    #[test]
    fn length_must_be_multiple_of_three() {
        assert_eq!(
            AudioDataBlock::decode(&[0x24, 0x09, 0x07, 0x07, 0x00]),
            Err(EdidError::InvalidDataBlockLength {
                block: "audio data block",
                length: 4
            })
        );
    }

    #[test]
    fn format_specific_must_match_format() {
        let sad = ShortAudioDescriptor {
            format: AudioFormat::Lpcm,
            channels: 2,
            sampling_frequencies: SamplingFrequencies::KHZ_48,
            format_specific: FormatSpecific::MaxBitrate(640),
        };
        assert!(sad.to_bytes().is_err());

        let sad = ShortAudioDescriptor {
            channels: 9,
            format_specific: FormatSpecific::LpcmBitDepths(LpcmBitDepths::BITS_16),
            ..sad
        };
        assert!(sad.to_bytes().is_err());
    }
}
