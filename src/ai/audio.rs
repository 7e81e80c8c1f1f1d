//! Decoded speech audio and WAV serialization

use crate::error::KitchenError;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;

/// Speech audio as signed 16-bit mono PCM samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    sample_rate: u32,
    samples: Vec<i16>,
}

impl SpeechAudio {
    /// Decode base64-encoded little-endian PCM16 data as returned by the
    /// speech service.
    pub fn from_base64(data: &str, sample_rate: u32) -> Result<Self> {
        let bytes = STANDARD.decode(data).map_err(|e| {
            KitchenError::UnparseableResponse {
                service: "speech".to_string(),
                detail: format!("invalid base64 audio payload: {}", e),
            }
        })?;
        if bytes.len() % 2 != 0 {
            return Err(KitchenError::UnparseableResponse {
                service: "speech".to_string(),
                detail: format!("PCM16 payload has odd byte length {}", bytes.len()),
            }
            .into());
        }
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Build directly from samples.
    pub fn from_samples(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Decoded samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Write the audio as a mono 16-bit WAV stream.
    pub fn write_wav<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        let data_len = (self.samples.len() * 2) as u32;
        let byte_rate = self.sample_rate * 2;

        out.write_all(b"RIFF")?;
        out.write_all(&(36 + data_len).to_le_bytes())?;
        out.write_all(b"WAVE")?;

        out.write_all(b"fmt ")?;
        out.write_all(&16u32.to_le_bytes())?;
        out.write_all(&1u16.to_le_bytes())?; // PCM
        out.write_all(&1u16.to_le_bytes())?; // mono
        out.write_all(&self.sample_rate.to_le_bytes())?;
        out.write_all(&byte_rate.to_le_bytes())?;
        out.write_all(&2u16.to_le_bytes())?; // block align
        out.write_all(&16u16.to_le_bytes())?; // bits per sample

        out.write_all(b"data")?;
        out.write_all(&data_len.to_le_bytes())?;
        for sample in &self.samples {
            out.write_all(&sample.to_le_bytes())?;
        }
        Ok(())
    }

    /// Serialize the audio to an in-memory WAV file.
    pub fn to_wav_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(44 + self.samples.len() * 2);
        // Writing to a Vec cannot fail.
        let _ = self.write_wav(&mut bytes);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base64_decodes_little_endian_samples() {
        // 0x0001 and 0xFFFF little-endian: [0x01, 0x00, 0xFF, 0xFF]
        let encoded = STANDARD.encode([0x01u8, 0x00, 0xFF, 0xFF]);
        let audio = SpeechAudio::from_base64(&encoded, 24_000).unwrap();
        assert_eq!(audio.samples(), &[1, -1]);
        assert_eq!(audio.sample_rate(), 24_000);
    }

    #[test]
    fn test_from_base64_rejects_invalid_base64() {
        let err = SpeechAudio::from_base64("not@@base64!!", 24_000).unwrap_err();
        let kitchen = err.downcast_ref::<KitchenError>().unwrap();
        assert!(matches!(kitchen, KitchenError::UnparseableResponse { .. }));
    }

    #[test]
    fn test_from_base64_rejects_odd_byte_count() {
        let encoded = STANDARD.encode([0x01u8, 0x00, 0xFF]);
        let err = SpeechAudio::from_base64(&encoded, 24_000).unwrap_err();
        let kitchen = err.downcast_ref::<KitchenError>().unwrap();
        match kitchen {
            KitchenError::UnparseableResponse { detail, .. } => {
                assert!(detail.contains("odd byte length"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duration_counts_samples_not_bytes() {
        let audio = SpeechAudio::from_samples(vec![0; 24_000], 24_000);
        assert!((audio.duration_secs() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wav_header_layout() {
        let audio = SpeechAudio::from_samples(vec![1, -1], 24_000);
        let wav = audio.to_wav_bytes();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(wav.len(), 48);

        // chunk size = 36 + data length
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 40);
        // channels
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        // sample rate
        assert_eq!(
            u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]),
            24_000
        );
        // byte rate = rate * block align
        assert_eq!(
            u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]),
            48_000
        );
        // bits per sample
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
        // payload
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 4);
        assert_eq!(&wav[44..48], &[0x01, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn test_empty_audio_serializes_to_header_only() {
        let audio = SpeechAudio::from_samples(Vec::new(), 24_000);
        assert_eq!(audio.to_wav_bytes().len(), 44);
        assert!(audio.duration_secs().abs() < f64::EPSILON);
    }
}
