//! Channel enable/disable state.
//!
//! # Responsibilities
//! - Hold the Channel → enabled mapping
//! - Answer `is_active` on every log call
//! - Apply edits (add/remove/toggle) and whole-table replacement
//!
//! # Design Decisions
//! - State lives in an `ArcSwap`; readers load one complete map, lock-free
//! - Writers are serialized by a mutex and publish a fresh map (copy-on-write)
//! - A channel missing from the map is inactive, never an error

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::channels::Channel;

/// Snapshot of channel state.
pub type ChannelStates = HashMap<Channel, bool>;

/// Errors from registry edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The channel has no entry to operate on.
    #[error("channel {0} is not registered")]
    NotFound(Channel),

    /// `add` was called for a channel that already has an entry.
    #[error("channel {0} is already registered")]
    AlreadyPresent(Channel),
}

/// Registry of which channels are currently emitted.
#[derive(Debug)]
pub struct ChannelRegistry {
    state: ArcSwap<ChannelStates>,
    write_lock: Mutex<()>,
}

impl ChannelRegistry {
    /// Create a registry with every channel enabled.
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(all_enabled()),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a registry holding exactly `states`.
    pub fn with_states(states: ChannelStates) -> Self {
        Self {
            state: ArcSwap::from_pointee(states),
            write_lock: Mutex::new(()),
        }
    }

    /// Reset to every channel enabled, discarding any edits.
    pub fn initialize(&self) {
        let _guard = self.lock_writes();
        self.state.store(Arc::new(all_enabled()));
    }

    /// Register `channel` as enabled.
    pub fn add(&self, channel: Channel) -> Result<(), RegistryError> {
        self.update(|states| {
            if states.contains_key(&channel) {
                return Err(RegistryError::AlreadyPresent(channel));
            }
            states.insert(channel, true);
            Ok(())
        })
    }

    /// Drop `channel` from the registry. Returns whether it was present.
    pub fn remove(&self, channel: Channel) -> bool {
        self.update(|states| Ok::<_, RegistryError>(states.remove(&channel).is_some()))
            .unwrap_or(false)
    }

    /// Flip the enabled flag of `channel` and return the new value.
    pub fn toggle(&self, channel: Channel) -> Result<bool, RegistryError> {
        self.update(|states| match states.get_mut(&channel) {
            Some(enabled) => {
                *enabled = !*enabled;
                Ok(*enabled)
            }
            None => Err(RegistryError::NotFound(channel)),
        })
    }

    /// Whether log calls on `channel` are emitted.
    pub fn is_active(&self, channel: Channel) -> bool {
        self.state.load().get(&channel).copied().unwrap_or(false)
    }

    /// Swap the whole state for `states` in one step.
    pub fn replace_all(&self, states: ChannelStates) {
        let _guard = self.lock_writes();
        self.state.store(Arc::new(states));
    }

    /// Set every registered channel to `enabled`.
    pub fn set_all(&self, enabled: bool) {
        let _ = self.update(|states| {
            states.values_mut().for_each(|v| *v = enabled);
            Ok::<_, RegistryError>(())
        });
    }

    /// The current state as one consistent map.
    pub fn snapshot(&self) -> Arc<ChannelStates> {
        self.state.load_full()
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.state.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.load().is_empty()
    }

    /// Copy, edit, publish. The edit is discarded if it fails.
    fn update<T, E>(&self, edit: impl FnOnce(&mut ChannelStates) -> Result<T, E>) -> Result<T, E> {
        let _guard = self.lock_writes();
        let mut next = ChannelStates::clone(&self.state.load());
        let result = edit(&mut next)?;
        self.state.store(Arc::new(next));
        Ok(result)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn all_enabled() -> ChannelStates {
    Channel::ALL.iter().map(|&c| (c, true)).collect()
}
