//! Audio device integration using rodio
//!
//! Opens the system output device and registers the synthesis engine as
//! the sample source. rodio pulls samples on its playback thread; each
//! block refill takes the synth mutex once, renders, and releases it.

use super::StreamConfig;
use crate::beeper::BeeperEngine;
use crate::Result;
use rodio::{OutputStream, Sink, Source};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Audio source that renders the beeper engine block by block
struct EngineSource {
    engine: BeeperEngine,
    sample_rate: u32,
    channels: u16,
    finished: Arc<AtomicBool>,
    /// Internal block buffer (one synth lock per refill)
    buffer: Vec<f32>,
    /// Current position in the internal buffer
    buffer_pos: usize,
}

impl EngineSource {
    fn new(engine: BeeperEngine, config: &StreamConfig, finished: Arc<AtomicBool>) -> Self {
        let block = config.block_samples.max(1);
        EngineSource {
            engine,
            sample_rate: config.sample_rate,
            channels: config.channels,
            finished,
            buffer: vec![0.0f32; block],
            buffer_pos: block, // Start by rendering a fresh block
        }
    }
}

impl Source for EngineSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.buffer.len())
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        // Live stream, no known end
        None
    }
}

impl Iterator for EngineSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.finished.load(Ordering::Relaxed) {
            return None;
        }

        if self.buffer_pos >= self.buffer.len() {
            // One bounded critical section per block; an empty queue
            // renders dithered silence, so the stream never stalls
            self.engine.lock().render_into(&mut self.buffer);
            self.buffer_pos = 0;
        }

        let sample = self.buffer[self.buffer_pos];
        self.buffer_pos += 1;
        Some(sample)
    }
}

/// Audio playback device using rodio
pub struct AudioDevice {
    _stream: OutputStream,
    _sink: Sink,
    running: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl AudioDevice {
    /// Open the output device and start streaming the engine
    ///
    /// # Arguments
    /// * `engine` - Shared synthesis state to stream
    /// * `config` - Sample rate, channel count and render block size
    ///
    /// Fails if the system audio device cannot be acquired or the
    /// configuration does not describe a mono stream. Acquisition
    /// failure is permanent for the process lifetime; there is no retry
    /// logic here.
    pub fn new(engine: &BeeperEngine, config: &StreamConfig) -> Result<Self> {
        if config.channels != 1 {
            return Err(crate::BeeperError::ConfigError(format!(
                "beeper output is mono, got {} channels",
                config.channels
            )));
        }

        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| format!("Failed to create audio stream: {}", e))?;

        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| format!("Failed to create audio sink: {}", e))?;

        // Finished signal for shutdown coordination
        let finished = Arc::new(AtomicBool::new(false));

        let source = EngineSource::new(engine.clone(), config, Arc::clone(&finished));
        sink.append(source);

        let running = Arc::new(AtomicBool::new(true));

        Ok(AudioDevice {
            _stream: stream,
            _sink: sink,
            running,
            finished,
        })
    }

    /// Pause playback
    pub fn pause(&self) {
        self._sink.pause();
    }

    /// Resume playback
    pub fn play(&self) {
        self._sink.play();
    }

    /// Check if the device is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Signal that no more samples should be produced
    ///
    /// Ends the playback stream instead of rendering silence forever.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::Relaxed);
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        // Pause on drop
        self.pause();
        self.finished.store(true, Ordering::Relaxed);
        self.running.store(false, Ordering::Relaxed);
    }
}
