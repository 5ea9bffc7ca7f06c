//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests. Every mock records the calls it
//! receives so tests can assert on the exact bus and registry traffic.

#![cfg(any(test, feature = "std"))]

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::actor::{ActorId, ActorRegistry, ActorState, RegistryError};
use crate::dac::{DacDriver, Gain, VrefSource};
use crate::dac_types::{DacAddress, DacChannel, DacCode};
use crate::notify::{Notification, NotificationDuration, NotificationKind, Notifier};

/// Capacity of every mock call log; entries beyond it are dropped.
pub const LOG_CAPACITY: usize = 64;

/// Bus error injected into [`MockDac`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError(pub ErrorKind);

impl embedded_hal::i2c::Error for MockBusError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Mock DAC — four channels held in memory, every write recorded.
#[derive(Debug, Clone)]
pub struct MockDac {
    address: DacAddress,
    values: [DacCode; 4],
    vref: [VrefSource; 4],
    gain: [Gain; 4],
    writes: heapless::Vec<(DacChannel, DacCode), LOG_CAPACITY>,
    reads: usize,
    failure: Option<ErrorKind>,
}

impl MockDac {
    /// Create a new mock DAC with every channel at code 0, VDD reference, gain ×1.
    pub fn new() -> Self {
        Self {
            address: DacAddress::DEFAULT,
            values: [DacCode::ZERO; 4],
            vref: [VrefSource::Vdd; 4],
            gain: [Gain::X1; 4],
            writes: heapless::Vec::new(),
            reads: 0,
            failure: None,
        }
    }

    /// Same mock answering at another minor address.
    #[must_use]
    pub fn with_address(mut self, address: DacAddress) -> Self {
        self.address = address;
        self
    }

    /// Mock whose every operation fails as if no device acknowledged the address.
    pub fn unreachable() -> Self {
        let mut dac = Self::new();
        dac.fail_with(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        dac
    }

    /// Make every following operation fail with `kind`.
    pub fn fail_with(&mut self, kind: ErrorKind) {
        self.failure = Some(kind);
    }

    /// Stop injecting failures.
    pub fn recover(&mut self) {
        self.failure = None;
    }

    /// Code currently latched on `channel`.
    pub fn value(&self, channel: DacChannel) -> DacCode {
        self.values
            .get(usize::from(channel.index()))
            .copied()
            .unwrap_or_default()
    }

    /// Reference bit of `channel`.
    pub fn vref(&self, channel: DacChannel) -> VrefSource {
        self.vref
            .get(usize::from(channel.index()))
            .copied()
            .unwrap_or_default()
    }

    /// Gain bit of `channel`.
    pub fn gain(&self, channel: DacChannel) -> Gain {
        self.gain
            .get(usize::from(channel.index()))
            .copied()
            .unwrap_or_default()
    }

    /// Every successful `write_value` call, oldest first.
    pub fn writes(&self) -> &[(DacChannel, DacCode)] {
        &self.writes
    }

    /// Most recent successful write.
    pub fn last_write(&self) -> Option<(DacChannel, DacCode)> {
        self.writes.last().copied()
    }

    /// Number of successful `get_value` calls.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Forget recorded writes and reads (channel values are kept).
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.reads = 0;
    }

    fn check(&self) -> Result<(), MockBusError> {
        match self.failure {
            Some(kind) => Err(MockBusError(kind)),
            None => Ok(()),
        }
    }
}

impl Default for MockDac {
    fn default() -> Self {
        Self::new()
    }
}

impl DacDriver for MockDac {
    type Error = MockBusError;

    fn address(&self) -> DacAddress {
        self.address
    }

    fn set_vref(&mut self, channel: DacChannel, vref: VrefSource) -> Result<(), Self::Error> {
        self.check()?;
        if let Some(slot) = self.vref.get_mut(usize::from(channel.index())) {
            *slot = vref;
        }
        Ok(())
    }

    fn set_gain(&mut self, channel: DacChannel, gain: Gain) -> Result<(), Self::Error> {
        self.check()?;
        if let Some(slot) = self.gain.get_mut(usize::from(channel.index())) {
            *slot = gain;
        }
        Ok(())
    }

    fn write_value(&mut self, channel: DacChannel, code: DacCode) -> Result<(), Self::Error> {
        self.check()?;
        if let Some(slot) = self.values.get_mut(usize::from(channel.index())) {
            *slot = code;
        }
        let _ = self.writes.push((channel, code));
        Ok(())
    }

    fn get_value(&mut self, channel: DacChannel) -> Result<DacCode, Self::Error> {
        self.check()?;
        self.reads = self.reads.saturating_add(1);
        Ok(self.value(channel))
    }
}

/// A switch request received by [`MockRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryCall {
    /// `switch_actor_on(id)`
    On(ActorId),
    /// `switch_actor_off(id)`
    Off(ActorId),
}

/// Mock actor registry with a fixed set of actors.
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    actors: heapless::Vec<(ActorId, ActorState), 8>,
    calls: heapless::Vec<RegistryCall, LOG_CAPACITY>,
    rejecting: bool,
}

impl MockRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor (initially off).
    #[must_use]
    pub fn with_actor(mut self, id: ActorId) -> Self {
        let _ = self.actors.push((id, ActorState::Off));
        self
    }

    /// Make every switch request on a known actor fail with [`RegistryError::Rejected`].
    pub fn reject_switching(&mut self, rejecting: bool) {
        self.rejecting = rejecting;
    }

    /// Every switch request received, oldest first.
    pub fn calls(&self) -> &[RegistryCall] {
        &self.calls
    }

    fn switch(&mut self, id: ActorId, state: ActorState) -> Result<(), RegistryError> {
        let call = match state {
            ActorState::On => RegistryCall::On(id),
            ActorState::Off => RegistryCall::Off(id),
        };
        let _ = self.calls.push(call);
        let rejecting = self.rejecting;
        let entry = self
            .actors
            .iter_mut()
            .find(|(known, _)| *known == id)
            .ok_or(RegistryError::UnknownActor(id))?;
        if rejecting {
            return Err(RegistryError::Rejected(id));
        }
        entry.1 = state;
        Ok(())
    }
}

impl ActorRegistry for MockRegistry {
    fn switch_actor_on(&mut self, id: ActorId) -> Result<(), RegistryError> {
        self.switch(id, ActorState::On)
    }

    fn switch_actor_off(&mut self, id: ActorId) -> Result<(), RegistryError> {
        self.switch(id, ActorState::Off)
    }

    fn actor_state(&self, id: ActorId) -> Option<ActorState> {
        self.actors
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, state)| *state)
    }
}

/// Error returned by a [`RecordingNotifier`] set to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierUnavailable;

/// Notifier that remembers the last banner it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    count: usize,
    headline: heapless::String<64>,
    message: heapless::String<128>,
    kind: NotificationKind,
    duration: Option<NotificationDuration>,
    failing: bool,
}

impl RecordingNotifier {
    /// Notifier with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier that counts banners but reports every delivery as failed.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Banners received (including failed deliveries).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Headline of the last banner (truncated to 64 bytes).
    pub fn last_headline(&self) -> &str {
        &self.headline
    }

    /// Message of the last banner (truncated to 128 bytes).
    pub fn last_message(&self) -> &str {
        &self.message
    }

    /// Kind of the last banner.
    pub fn last_kind(&self) -> NotificationKind {
        self.kind
    }

    /// Duration of the last banner.
    pub fn last_duration(&self) -> Option<NotificationDuration> {
        self.duration
    }
}

fn copy_truncated<const N: usize>(dst: &mut heapless::String<N>, src: &str) {
    dst.clear();
    for ch in src.chars() {
        if dst.push(ch).is_err() {
            break;
        }
    }
}

impl Notifier for RecordingNotifier {
    type Error = NotifierUnavailable;

    fn notify(&mut self, notification: &Notification<'_>) -> Result<(), Self::Error> {
        self.count = self.count.saturating_add(1);
        copy_truncated(&mut self.headline, notification.headline);
        copy_truncated(&mut self.message, notification.message);
        self.kind = notification.kind;
        self.duration = Some(notification.duration);
        if self.failing {
            Err(NotifierUnavailable)
        } else {
            Ok(())
        }
    }
}
