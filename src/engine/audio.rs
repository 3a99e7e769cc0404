//! Audio backend.
//!
//! Manages the cpal output stream. The audio callback runs on its own
//! thread and must be real-time safe: the moved-in [`SynthProcessor`]
//! does no allocation or blocking on the render path.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};
use thiserror::Error;
use tracing::{error, info};

use super::processor::SynthProcessor;

/// Errors from audio device acquisition and stream control. All of these
/// are fatal to engine startup; there is no degraded no-audio mode.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoOutputDevice,
    #[error("failed to get device configuration: {0}")]
    ConfigurationFailed(String),
    #[error("failed to create audio stream: {0}")]
    StreamCreationFailed(String),
    #[error("failed to control audio playback: {0}")]
    StreamPlaybackFailed(String),
}

/// Owns the output device and the running stream.
pub struct AudioBackend {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
}

impl AudioBackend {
    /// Acquires the default output device with its default configuration.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::ConfigurationFailed(e.to_string()))?;

        let config = StreamConfig {
            channels: supported.channels(),
            sample_rate: SampleRate(supported.sample_rate().0),
            buffer_size: cpal::BufferSize::Default,
        };

        info!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            "audio output acquired"
        );

        Ok(Self {
            device,
            config,
            stream: None,
        })
    }

    /// Sample rate of the output stream in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate.0 as f32
    }

    /// Number of output channels.
    pub fn channels(&self) -> usize {
        self.config.channels as usize
    }

    /// Starts the stream, moving the processor into the audio callback.
    /// No-op if already running.
    pub fn start(&mut self, mut processor: SynthProcessor) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    processor.render(data);
                },
                move |err| {
                    error!("audio stream error: {err}");
                },
                None,
            )
            .map_err(|e| AudioError::StreamCreationFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlaybackFailed(e.to_string()))?;

        self.stream = Some(stream);
        Ok(())
    }

    /// Stops and drops the stream (and with it the processor). Idempotent;
    /// pause failures during teardown are logged, not surfaced, since
    /// shutdown may race device removal.
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                error!("failed to pause audio stream during shutdown: {e}");
            }
        }
    }

    /// Whether the stream is currently running.
    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for AudioBackend {
    fn drop(&mut self) {
        self.stop();
    }
}
