//! Sample encodings and their byte <-> normalized float converters
//!
//! Integer encodings map full scale to [-1.0, 1.0) and clamp silently on
//! encode. Float encodings are stored as-is and never clamp.

use byteorder::{ByteOrder, LittleEndian};

/// `fmt ` format tag for linear PCM
pub const PCM_FORMAT_TAG: u16 = 0x0001;

/// `fmt ` format tag for IEEE-754 float
pub const IEEE_FLOAT_FORMAT_TAG: u16 = 0x0003;

/// Reads one sample from a window of exactly `byte_depth` bytes
pub type SampleDecoder = fn(&[u8]) -> f64;

/// Writes one sample into a window of exactly `byte_depth` bytes
pub type SampleEncoder = fn(&mut [u8], f64);

/// Supported sample encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// Unsigned 8-bit PCM, zero point 128
    Pcm8,
    /// Signed 16-bit PCM
    Pcm16,
    /// Signed 24-bit packed PCM
    Pcm24,
    /// Signed 32-bit PCM
    Pcm32,
    /// 32-bit IEEE float
    Float32,
    /// 64-bit IEEE float
    Float64,
}

impl SampleFormat {
    /// Every supported format
    pub const ALL: [Self; 6] = [
        Self::Pcm8,
        Self::Pcm16,
        Self::Pcm24,
        Self::Pcm32,
        Self::Float32,
        Self::Float64,
    ];

    /// Look up the format for a `fmt ` (format tag, bits per sample) pair
    pub fn from_format_tag(format_tag: u16, bits_per_sample: u16) -> Option<Self> {
        match (format_tag, bits_per_sample) {
            (PCM_FORMAT_TAG, 8) => Some(Self::Pcm8),
            (PCM_FORMAT_TAG, 16) => Some(Self::Pcm16),
            (PCM_FORMAT_TAG, 24) => Some(Self::Pcm24),
            (PCM_FORMAT_TAG, 32) => Some(Self::Pcm32),
            (IEEE_FLOAT_FORMAT_TAG, 32) => Some(Self::Float32),
            (IEEE_FLOAT_FORMAT_TAG, 64) => Some(Self::Float64),
            _ => None,
        }
    }

    /// `fmt ` format tag
    pub fn format_tag(self) -> u16 {
        match self {
            Self::Pcm8 | Self::Pcm16 | Self::Pcm24 | Self::Pcm32 => PCM_FORMAT_TAG,
            Self::Float32 | Self::Float64 => IEEE_FLOAT_FORMAT_TAG,
        }
    }

    /// Bytes per sample
    pub fn byte_depth(self) -> u16 {
        match self {
            Self::Pcm8 => 1,
            Self::Pcm16 => 2,
            Self::Pcm24 => 3,
            Self::Pcm32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Bits per sample
    pub fn bits_per_sample(self) -> u16 {
        self.byte_depth() * 8
    }

    /// Check for an IEEE float encoding
    pub fn is_float(self) -> bool {
        self.format_tag() == IEEE_FLOAT_FORMAT_TAG
    }

    /// Byte value that encodes silence
    pub fn silence_byte(self) -> u8 {
        match self {
            Self::Pcm8 => 0x80,
            _ => 0x00,
        }
    }

    /// Decoder for this format
    pub fn decoder(self) -> SampleDecoder {
        match self {
            Self::Pcm8 => decode_pcm8,
            Self::Pcm16 => decode_pcm16,
            Self::Pcm24 => decode_pcm24,
            Self::Pcm32 => decode_pcm32,
            Self::Float32 => decode_float32,
            Self::Float64 => decode_float64,
        }
    }

    /// Encoder for this format
    pub fn encoder(self) -> SampleEncoder {
        match self {
            Self::Pcm8 => encode_pcm8,
            Self::Pcm16 => encode_pcm16,
            Self::Pcm24 => encode_pcm24,
            Self::Pcm32 => encode_pcm32,
            Self::Float32 => encode_float32,
            Self::Float64 => encode_float64,
        }
    }

    /// Decode one sample
    ///
    /// # Panics
    /// If `bytes` is shorter than [`byte_depth`](Self::byte_depth).
    pub fn decode(self, bytes: &[u8]) -> f64 {
        (self.decoder())(bytes)
    }

    /// Encode one sample
    ///
    /// # Panics
    /// If `bytes` is shorter than [`byte_depth`](Self::byte_depth).
    pub fn encode(self, bytes: &mut [u8], sample: f64) {
        (self.encoder())(bytes, sample);
    }
}

const SCALE_8: f64 = (1u32 << 7) as f64;
const SCALE_16: f64 = (1u32 << 15) as f64;
const SCALE_24: f64 = (1u32 << 23) as f64;
const SCALE_32: f64 = (1u64 << 31) as f64;

fn decode_pcm8(bytes: &[u8]) -> f64 {
    (f64::from(bytes[0]) - SCALE_8) / SCALE_8
}

fn encode_pcm8(bytes: &mut [u8], sample: f64) {
    bytes[0] = ((sample + 1.0) * SCALE_8).clamp(0.0, 255.0) as u8;
}

fn decode_pcm16(bytes: &[u8]) -> f64 {
    f64::from(LittleEndian::read_i16(bytes)) / SCALE_16
}

fn encode_pcm16(bytes: &mut [u8], sample: f64) {
    let value = (sample * SCALE_16).clamp(-SCALE_16, SCALE_16 - 1.0);
    LittleEndian::write_i16(bytes, value as i16);
}

fn decode_pcm24(bytes: &[u8]) -> f64 {
    // read_i24 sign-extends from bit 23
    f64::from(LittleEndian::read_i24(bytes)) / SCALE_24
}

fn encode_pcm24(bytes: &mut [u8], sample: f64) {
    let value = (sample * SCALE_24).clamp(-SCALE_24, SCALE_24 - 1.0);
    LittleEndian::write_i24(bytes, value as i32);
}

fn decode_pcm32(bytes: &[u8]) -> f64 {
    f64::from(LittleEndian::read_i32(bytes)) / SCALE_32
}

fn encode_pcm32(bytes: &mut [u8], sample: f64) {
    let value = (sample * SCALE_32).clamp(-SCALE_32, SCALE_32 - 1.0);
    LittleEndian::write_i32(bytes, value as i32);
}

fn decode_float32(bytes: &[u8]) -> f64 {
    f64::from(LittleEndian::read_f32(bytes))
}

fn encode_float32(bytes: &mut [u8], sample: f64) {
    LittleEndian::write_f32(bytes, sample as f32);
}

fn decode_float64(bytes: &[u8]) -> f64 {
    LittleEndian::read_f64(bytes)
}

fn encode_float64(bytes: &mut [u8], sample: f64) {
    LittleEndian::write_f64(bytes, sample);
}
