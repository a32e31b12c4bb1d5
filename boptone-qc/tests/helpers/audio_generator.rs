//! In-memory WAV fixtures

use std::io::Cursor;

/// Shape of a generated WAV file
#[derive(Debug, Clone)]
pub struct WavConfig {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    /// 16 or 24
    pub bits_per_sample: u16,
}

impl Default for WavConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 35.0,
            sample_rate: 44_100,
            channels: 2,
            bits_per_sample: 16,
        }
    }
}

/// Generate a 440 Hz tone at 30% amplitude as WAV bytes
pub fn generate_wav_bytes(config: &WavConfig) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: config.bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };

    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        let total_frames = (config.duration_seconds * config.sample_rate as f64) as usize;
        let full_scale = ((1i64 << (config.bits_per_sample - 1)) - 1) as f32;

        for i in 0..total_frames {
            let t = i as f32 / config.sample_rate as f32;
            let sample = (0.3 * (2.0 * std::f32::consts::PI * 440.0 * t).sin() * full_scale) as i32;
            for _ in 0..config.channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_wav_bytes() {
        let config = WavConfig {
            duration_seconds: 1.0,
            ..WavConfig::default()
        };
        let bytes = generate_wav_bytes(&config);

        assert_eq!(&bytes[0..4], b"RIFF");
        // 44-byte header + 1 s of 16-bit stereo
        assert_eq!(bytes.len(), 44 + 44_100 * 2 * 2);
    }
}
