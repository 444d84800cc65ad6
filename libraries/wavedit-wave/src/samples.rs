//! Channel/frame addressing over the raw sample payload
//!
//! Sample (channel `c`, frame `f`) lives at byte offset
//! `block_size * f + byte_depth * c`. Values cross this layer as normalized
//! `f64` through the file's [`SampleFormat`](crate::SampleFormat) codec.

use crate::error::{Result, WaveError};
use crate::file::WaveFile;

impl WaveFile {
    /// Check a frame range on one channel
    ///
    /// Fails with, in order of precedence, [`WaveError::SampleOutOfRange`]
    /// when `end` is past the last frame, [`WaveError::InvalidRange`] when
    /// `end < start` and [`WaveError::InvalidChannel`] for a missing channel.
    pub fn validate_range(&self, channel: u16, start: u32, end: u64) -> Result<()> {
        let frames = self.frame_count();
        if end > u64::from(frames) {
            return Err(WaveError::SampleOutOfRange { end, frames });
        }
        if end < u64::from(start) {
            return Err(WaveError::InvalidRange {
                start,
                end: end as u32,
            });
        }
        if channel >= self.channels() {
            return Err(WaveError::InvalidChannel {
                channel,
                channels: self.channels(),
            });
        }
        Ok(())
    }

    /// Byte offset of one sample
    pub fn sample_offset(&self, channel: u16, frame: u32) -> usize {
        self.block_size() as usize * frame as usize
            + usize::from(self.format().byte_depth()) * usize::from(channel)
    }

    /// Read frames `[start, end)` of one channel
    pub fn get_samples(&self, channel: u16, start: u32, end: u32) -> Result<Vec<f64>> {
        self.validate_range(channel, start, u64::from(end))?;

        let decode = self.format().decoder();
        let depth = usize::from(self.format().byte_depth());
        let block = self.block_size() as usize;
        let offset = self.sample_offset(channel, 0);
        let frames = &self.data.as_slice()[start as usize * block..end as usize * block];

        Ok(frames
            .chunks_exact(block)
            .map(|frame| decode(&frame[offset..offset + depth]))
            .collect())
    }

    /// Write `values` to one channel starting at frame `start`
    pub fn set_samples(&mut self, channel: u16, start: u32, values: &[f64]) -> Result<()> {
        let end = u64::from(start) + values.len() as u64;
        self.validate_range(channel, start, end)?;

        let encode = self.format().encoder();
        let depth = usize::from(self.format().byte_depth());
        let block = self.block_size() as usize;
        let offset = self.sample_offset(channel, 0);
        let frames =
            &mut self.data.as_mut_slice()[start as usize * block..end as usize * block];

        for (frame, &value) in frames.chunks_exact_mut(block).zip(values) {
            encode(&mut frame[offset..offset + depth], value);
        }
        Ok(())
    }

    /// Read one sample
    pub fn get_sample(&self, channel: u16, frame: u32) -> Result<f64> {
        let end = frame.checked_add(1).ok_or(WaveError::SampleOutOfRange {
            end: u64::from(frame) + 1,
            frames: self.frame_count(),
        })?;
        Ok(self.get_samples(channel, frame, end)?[0])
    }

    /// Write one sample
    pub fn set_sample(&mut self, channel: u16, frame: u32, value: f64) -> Result<()> {
        self.set_samples(channel, frame, &[value])
    }

    /// Rewrite frames `[start, end)` of one channel through `mapper`
    ///
    /// `mapper` receives the current value, its position within the region
    /// and the region width.
    pub fn map_samples<F>(
        &mut self,
        channel: u16,
        start: u32,
        end: u32,
        mut mapper: F,
    ) -> Result<()>
    where
        F: FnMut(f64, u32, u32) -> f64,
    {
        let mut samples = self.get_samples(channel, start, end)?;
        let width = end - start;
        for (location, sample) in (0u32..).zip(samples.iter_mut()) {
            *sample = mapper(*sample, location, width);
        }
        self.set_samples(channel, start, &samples)
    }

    /// Rewrite every sample of every channel through `mapper`
    ///
    /// Each channel is one region spanning the whole file.
    pub fn map_all_samples<F>(&mut self, mut mapper: F) -> Result<()>
    where
        F: FnMut(f64, u32, u32) -> f64,
    {
        let frames = self.frame_count();
        for channel in 0..self.channels() {
            self.map_samples(channel, 0, frames, &mut mapper)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{SampleFormat, WaveError, WaveFile};

    fn stereo_pcm16(frames: u32) -> WaveFile {
        let mut wave = WaveFile::new(SampleFormat::Pcm16, 2, 44_100).unwrap();
        wave.resize(frames).unwrap();
        wave
    }

    #[test]
    fn interleaved_layout() {
        let mut wave = stereo_pcm16(3);
        wave.set_samples(0, 0, &[0.5, -0.5, 0.25]).unwrap();
        wave.set_samples(1, 1, &[1.0]).unwrap();

        assert_eq!(
            wave.data(),
            &[
                0x00, 0x40, 0x00, 0x00, // frame 0: L=0.5, R=0
                0x00, 0xC0, 0xFF, 0x7F, // frame 1: L=-0.5, R=max
                0x00, 0x20, 0x00, 0x00, // frame 2: L=0.25, R=0
            ]
        );
        assert_eq!(wave.get_samples(0, 0, 3).unwrap(), vec![0.5, -0.5, 0.25]);
        assert_eq!(wave.get_sample(1, 1).unwrap(), 32767.0 / 32768.0);
    }

    #[test]
    fn offsets_follow_block_size() {
        let mut wave = WaveFile::new(SampleFormat::Pcm24, 3, 48_000).unwrap();
        wave.resize(4).unwrap();
        assert_eq!(wave.sample_offset(0, 0), 0);
        assert_eq!(wave.sample_offset(2, 0), 6);
        assert_eq!(wave.sample_offset(1, 3), 9 * 3 + 3);
    }

    #[test]
    fn out_of_range_end() {
        let wave = stereo_pcm16(10);
        assert!(matches!(
            wave.get_samples(0, 0, 11),
            Err(WaveError::SampleOutOfRange { end: 11, frames: 10 })
        ));
    }

    #[test]
    fn inverted_range() {
        let wave = stereo_pcm16(10);
        assert!(matches!(
            wave.get_samples(0, 5, 4),
            Err(WaveError::InvalidRange { start: 5, end: 4 })
        ));
    }

    #[test]
    fn invalid_channel() {
        let wave = stereo_pcm16(10);
        assert!(matches!(
            wave.get_samples(2, 0, 10),
            Err(WaveError::InvalidChannel { channel: 2, channels: 2 })
        ));
    }

    #[test]
    fn out_of_range_wins_over_other_failures() {
        let wave = stereo_pcm16(10);
        assert!(matches!(
            wave.get_samples(7, 12, 11),
            Err(WaveError::SampleOutOfRange { .. })
        ));
        assert!(matches!(
            wave.get_samples(7, 5, 4),
            Err(WaveError::InvalidRange { .. })
        ));
    }

    #[test]
    fn set_checks_preconditions() {
        let mut wave = stereo_pcm16(4);
        assert!(matches!(
            wave.set_samples(0, 3, &[0.0, 0.0]),
            Err(WaveError::SampleOutOfRange { end: 5, frames: 4 })
        ));
        assert!(matches!(
            wave.set_samples(5, 0, &[0.0]),
            Err(WaveError::InvalidChannel { .. })
        ));
        assert!(matches!(
            wave.set_sample(0, u32::MAX, 0.0),
            Err(WaveError::SampleOutOfRange { .. })
        ));
        assert!(matches!(
            wave.get_sample(0, u32::MAX),
            Err(WaveError::SampleOutOfRange { .. })
        ));
        assert!(wave.data().iter().all(|&b| b == 0), "failed writes must not touch data");
    }

    #[test]
    fn empty_range_is_allowed() {
        let mut wave = stereo_pcm16(4);
        assert!(wave.get_samples(1, 4, 4).unwrap().is_empty());
        wave.set_samples(1, 4, &[]).unwrap();
    }

    #[test]
    fn map_passes_location_and_width() {
        let mut wave = stereo_pcm16(8);
        let mut seen = Vec::new();
        wave.map_samples(1, 2, 6, |sample, location, width| {
            seen.push((location, width));
            sample + 0.125
        })
        .unwrap();

        assert_eq!(seen, vec![(0, 4), (1, 4), (2, 4), (3, 4)]);
        assert_eq!(wave.get_samples(1, 0, 8).unwrap(), vec![0.0, 0.0, 0.125, 0.125, 0.125, 0.125, 0.0, 0.0]);
        assert_eq!(wave.get_samples(0, 0, 8).unwrap(), vec![0.0; 8]);
    }

    #[test]
    fn map_all_visits_every_channel() {
        let mut wave = WaveFile::new(SampleFormat::Float32, 3, 8_000).unwrap();
        wave.resize(5).unwrap();
        let mut calls = 0;
        wave.map_all_samples(|_, location, width| {
            calls += 1;
            assert_eq!(width, 5);
            f64::from(location)
        })
        .unwrap();

        assert_eq!(calls, 15);
        for channel in 0..3 {
            assert_eq!(wave.get_samples(channel, 0, 5).unwrap(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        }
    }

    #[test]
    fn fact_limits_addressing() {
        let mut wave = stereo_pcm16(4);
        wave.fact.sample_count = 2;
        assert!(wave.get_samples(0, 0, 2).is_ok());
        assert!(matches!(
            wave.get_samples(0, 0, 3),
            Err(WaveError::SampleOutOfRange { .. })
        ));
    }
}
