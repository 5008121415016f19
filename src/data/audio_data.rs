use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader};
use std::path::Path;

/// A decoded alert clip, mixed down to mono.
#[derive(Debug, Clone)]
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub duration_seconds: f64,
}

impl AudioData {
    pub fn from_wav_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = WavReader::open(&path)
            .with_context(|| format!("Failed to open WAV file: {:?}", path.as_ref()))?;

        let spec = reader.spec();
        let sample_rate = spec.sample_rate;
        let channels = spec.channels.max(1);

        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<Vec<f32>, _>>()
                .context("Failed to read float samples")?,
            SampleFormat::Int => {
                let scale = match spec.bits_per_sample {
                    8 => 128.0,
                    16 => i16::MAX as f32,
                    24 => 8388608.0, // 2^23
                    32 => i32::MAX as f32,
                    bits => anyhow::bail!("Unsupported bit depth: {}", bits),
                };
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<Vec<f32>, _>>()
                    .with_context(|| format!("Failed to read {}-bit samples", spec.bits_per_sample))?
            }
        };

        let mono_samples = if channels == 1 {
            samples
        } else {
            samples
                .chunks(channels as usize)
                .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
                .collect()
        };

        let duration_seconds = mono_samples.len() as f64 / sample_rate.max(1) as f64;

        Ok(AudioData {
            samples: mono_samples,
            sample_rate,
            duration_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_wav(path: &Path, channels: u16, frames: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in frames {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn loads_mono_pcm16() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beep.wav");
        write_wav(&path, 1, &[0, i16::MAX, 0, -i16::MAX]);

        let audio = AudioData::from_wav_file(&path).unwrap();
        assert_eq!(audio.sample_rate, 8000);
        assert_eq!(audio.samples.len(), 4);
        assert!((audio.samples[1] - 1.0).abs() < 1e-6);
        assert!((audio.samples[3] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn stereo_is_mixed_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 2, &[i16::MAX, 0, 0, 0]);

        let audio = AudioData::from_wav_file(&path).unwrap();
        assert_eq!(audio.samples.len(), 2);
        assert!((audio.samples[0] - 0.5).abs() < 1e-6);
        assert_eq!(audio.samples[1], 0.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AudioData::from_wav_file(dir.path().join("nope.wav")).is_err());
    }
}
