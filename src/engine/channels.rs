//! Engine channels.
//!
//! Lock-free communication between the control thread and the audio
//! thread. Uses rtrb ring buffers for SPSC queues: one command queue
//! control -> audio, one event queue audio -> control. Every operation is
//! non-blocking; the audio side in particular never waits.

use rtrb::{Consumer, Producer, RingBuffer};

use super::commands::{EngineCommand, EngineEvent};

/// Default capacity of the command queue (control -> audio).
pub const DEFAULT_COMMAND_CAPACITY: usize = 256;

/// Default capacity of the event queue (audio -> control).
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Both directions of engine communication, before being split across
/// threads.
pub struct EngineChannels {
    command_tx: Producer<EngineCommand>,
    command_rx: Consumer<EngineCommand>,
    event_tx: Producer<EngineEvent>,
    event_rx: Consumer<EngineEvent>,
}

impl EngineChannels {
    pub fn new(command_capacity: usize, event_capacity: usize) -> Self {
        let (command_tx, command_rx) = RingBuffer::new(command_capacity);
        let (event_tx, event_rx) = RingBuffer::new(event_capacity);
        Self {
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_COMMAND_CAPACITY, DEFAULT_EVENT_CAPACITY)
    }

    /// Splits into the two thread-local handles.
    pub fn split(self) -> (ControlHandle, AudioHandle) {
        (
            ControlHandle {
                command_tx: self.command_tx,
                event_rx: self.event_rx,
            },
            AudioHandle {
                command_rx: self.command_rx,
                event_tx: self.event_tx,
            },
        )
    }
}

/// Control-side handle: sends commands, drains events.
pub struct ControlHandle {
    command_tx: Producer<EngineCommand>,
    event_rx: Consumer<EngineEvent>,
}

impl ControlHandle {
    /// Queues a command, returning it back if the buffer is full. Never
    /// blocks.
    pub fn send_command(&mut self, cmd: EngineCommand) -> Result<(), EngineCommand> {
        self.command_tx
            .push(cmd)
            .map_err(|rtrb::PushError::Full(cmd)| cmd)
    }

    /// Queues a command, dropping it silently when the buffer is full.
    /// For per-tick traffic that is re-derived on the next tick anyway.
    pub fn send_command_lossy(&mut self, cmd: EngineCommand) {
        let _ = self.command_tx.push(cmd);
    }

    /// Pops one pending event, if any.
    pub fn recv_event(&mut self) -> Option<EngineEvent> {
        self.event_rx.pop().ok()
    }

    /// Drains all pending events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = EngineEvent> + '_ {
        std::iter::from_fn(|| self.recv_event())
    }
}

/// Audio-side handle. All methods are real-time safe: non-blocking, no
/// allocation.
pub struct AudioHandle {
    command_rx: Consumer<EngineCommand>,
    event_tx: Producer<EngineEvent>,
}

impl AudioHandle {
    /// Pops one pending command, if any.
    pub fn try_recv_command(&mut self) -> Option<EngineCommand> {
        self.command_rx.pop().ok()
    }

    /// Sends an event, dropping it if the queue is full.
    pub fn send_event_lossy(&mut self, event: EngineEvent) {
        let _ = self.event_tx.push(event);
    }
}
