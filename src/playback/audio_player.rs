use miniaudio::{Device, DeviceConfig, DeviceType, Format};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::data::AudioData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Plays alert clips once through the default output device.
pub struct AudioPlayer {
    device: Option<Device>,
    device_rate: u32,
    playback_data: Arc<Mutex<PlaybackData>>,
}

struct PlaybackData {
    samples: Vec<f32>,
    position: usize,
    state: PlaybackState,
    gain: f32,
}

impl PlaybackData {
    /// Fill one device buffer. Runs on the audio thread.
    fn render(&mut self, frames: &mut [f32]) {
        for sample in frames {
            if self.state != PlaybackState::Playing {
                *sample = 0.0;
                continue;
            }
            match self.samples.get(self.position) {
                Some(&s) => {
                    *sample = s * self.gain;
                    self.position += 1;
                }
                None => {
                    *sample = 0.0;
                    self.position = 0;
                    self.state = PlaybackState::Stopped;
                }
            }
        }
    }
}

fn lock(data: &Mutex<PlaybackData>) -> MutexGuard<'_, PlaybackData> {
    data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self {
            device: None,
            device_rate: 0,
            playback_data: Arc::new(Mutex::new(PlaybackData {
                samples: Vec::new(),
                position: 0,
                state: PlaybackState::Stopped,
                gain: 0.5,
            })),
        }
    }

    /// Replace the current clip. Opens (or reopens) the device at the clip's rate.
    pub fn load_audio(&mut self, audio: &AudioData) -> anyhow::Result<()> {
        self.stop();

        {
            let mut data = lock(&self.playback_data);
            data.samples = audio.samples.clone();
            data.position = 0;
        }

        if self.device.is_none() || self.device_rate != audio.sample_rate {
            self.device = None;
            self.init_device(audio.sample_rate)?;
        }

        Ok(())
    }

    fn init_device(&mut self, sample_rate: u32) -> anyhow::Result<()> {
        let playback_data = Arc::clone(&self.playback_data);

        let mut config = DeviceConfig::new(DeviceType::Playback);
        config.playback_mut().set_format(Format::F32);
        config.playback_mut().set_channels(1);
        config.set_sample_rate(sample_rate);

        config.set_data_callback(move |_device, output, _input| {
            lock(&playback_data).render(output.as_samples_mut::<f32>());
        });

        let device = Device::new(None, &config)
            .map_err(|e| anyhow::anyhow!("Failed to create audio device: {:?}", e))?;

        device
            .start()
            .map_err(|e| anyhow::anyhow!("Failed to start audio device: {:?}", e))?;

        debug!(sample_rate, "audio device started");
        self.device = Some(device);
        self.device_rate = sample_rate;

        Ok(())
    }

    /// Volume as a percentage, 0..=100.
    pub fn set_volume(&mut self, percent: u8) {
        lock(&self.playback_data).gain = percent.min(100) as f32 / 100.0;
    }

    pub fn play(&mut self) {
        let mut data = lock(&self.playback_data);
        data.position = 0;
        data.state = PlaybackState::Playing;
    }

    pub fn stop(&mut self) {
        let mut data = lock(&self.playback_data);
        data.state = PlaybackState::Stopped;
        data.position = 0;
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(samples: Vec<f32>, gain: f32) -> PlaybackData {
        PlaybackData {
            samples,
            position: 0,
            state: PlaybackState::Playing,
            gain,
        }
    }

    #[test]
    fn render_applies_gain_and_stops_at_end() {
        let mut d = data(vec![1.0, -1.0, 0.5], 0.5);
        let mut out = [9.0f32; 5];
        d.render(&mut out);

        assert_eq!(out, [0.5, -0.5, 0.25, 0.0, 0.0]);
        assert_eq!(d.state, PlaybackState::Stopped);
        assert_eq!(d.position, 0);
    }

    #[test]
    fn render_outputs_silence_when_stopped() {
        let mut d = data(vec![1.0; 4], 1.0);
        d.state = PlaybackState::Stopped;
        let mut out = [9.0f32; 4];
        d.render(&mut out);
        assert_eq!(out, [0.0; 4]);
        assert_eq!(d.position, 0);
    }

    #[test]
    fn render_continues_across_buffers() {
        let mut d = data(vec![0.1, 0.2, 0.3, 0.4], 1.0);
        let mut first = [0.0f32; 2];
        let mut second = [0.0f32; 2];
        d.render(&mut first);
        d.render(&mut second);
        assert_eq!(first, [0.1, 0.2]);
        assert_eq!(second, [0.3, 0.4]);
        assert_eq!(d.state, PlaybackState::Playing);
    }

    #[test]
    fn volume_is_clamped() {
        let mut player = AudioPlayer::new();
        player.set_volume(250);
        assert_eq!(lock(&player.playback_data).gain, 1.0);
        player.set_volume(25);
        assert_eq!(lock(&player.playback_data).gain, 0.25);
    }
}
