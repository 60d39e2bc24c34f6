//! In-memory TTL cache with a background sweeper.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use bytes::Bytes;
use parking_lot::{Condvar, Mutex, RwLock};
use tracing::{debug, trace, warn};

use pokedex_core::constants::DEFAULT_CACHE_TTL_SECONDS;

/// TTL used when a cache is constructed with a zero duration.
pub const DEFAULT_TTL: Duration = Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS);

/// Cached payload with its insertion time.
#[derive(Clone)]
struct CacheEntry {
    value: Bytes,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// State shared between cache handles and the sweeper thread.
struct Shared {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Shared {
    fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        before - entries.len()
    }

    /// Removes `key` only if it still holds the stale entry stamped
    /// `stale_since`. A newer entry under the same key is kept.
    fn remove_if_stale(&self, key: &str, stale_since: Instant) -> bool {
        let mut entries = self.entries.write();
        let still_stale = entries
            .get(key)
            .is_some_and(|current| current.created_at == stale_since && current.is_expired(self.ttl));
        if still_stale {
            entries.remove(key);
        }
        still_stale
    }
}

/// One-shot stop flag the sweeper can sleep on.
#[derive(Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    wakeup: Condvar,
}

impl StopSignal {
    /// Sleeps until `deadline` unless stopped first. Returns true once stopped.
    ///
    /// With no deadline (a TTL too long to represent as an `Instant`) it
    /// sleeps until stopped.
    fn wait_until(&self, deadline: Option<Instant>) -> bool {
        let mut stopped = self.stopped.lock();
        while !*stopped {
            match deadline {
                Some(deadline) => {
                    if self.wakeup.wait_until(&mut stopped, deadline).timed_out() {
                        break;
                    }
                }
                None => self.wakeup.wait(&mut stopped),
            }
        }
        *stopped
    }

    /// Raises the flag. Returns false if it was already raised.
    fn stop(&self) -> bool {
        let mut stopped = self.stopped.lock();
        if *stopped {
            return false;
        }
        *stopped = true;
        self.wakeup.notify_all();
        true
    }

    fn is_stopped(&self) -> bool {
        *self.stopped.lock()
    }
}

/// Time-expiring concurrent cache.
///
/// Reads share the lock; writes, lazy deletes and sweeps take it
/// exclusively. An entry older than [`ttl`](Self::ttl) is treated as
/// absent whether or not it has been physically removed yet.
///
/// The sweeper thread starts in [`new`](Self::new) and stops on
/// [`close`](Self::close) or drop. `get` and `put` keep working after close.
pub struct TtlCache {
    shared: Arc<Shared>,
    stop: Arc<StopSignal>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl TtlCache {
    /// Creates an empty cache and starts its sweeper.
    ///
    /// A zero `ttl` falls back to [`DEFAULT_TTL`].
    pub fn new(ttl: Duration) -> Self {
        let ttl = if ttl.is_zero() { DEFAULT_TTL } else { ttl };

        let shared = Arc::new(Shared {
            entries: RwLock::new(HashMap::new()),
            ttl,
        });
        let stop = Arc::new(StopSignal::default());
        let sweeper = spawn_sweeper(Arc::clone(&shared), Arc::clone(&stop));

        debug!(?ttl, "Cache started");

        Self {
            shared,
            stop,
            sweeper: Mutex::new(sweeper),
        }
    }

    /// Inserts or overwrites `key`, stamping it with the current time.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();

        let mut entries = self.shared.entries.write();
        entries.insert(key, CacheEntry {
            value,
            created_at: Instant::now(),
        });
    }

    /// Returns the value for `key` if present and not older than the TTL.
    ///
    /// A stale entry is removed on the way out, but only if it is still the
    /// same stale entry once the write lock is held. A `put` that lands
    /// between the two lock acquisitions is left alone.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let ttl = self.shared.ttl;

        let stale_since = {
            let entries = self.shared.entries.read();
            let entry = entries.get(key)?;
            if !entry.is_expired(ttl) {
                return Some(entry.value.clone());
            }
            entry.created_at
        };

        if self.shared.remove_if_stale(key, stale_since) {
            trace!(key, "Removed stale entry on read");
        }

        None
    }

    /// Stops the sweeper. Safe to call any number of times.
    pub fn close(&self) {
        if !self.stop.stop() {
            return;
        }

        if let Some(handle) = self.sweeper.lock().take() {
            if handle.join().is_err() {
                warn!("Cache sweeper panicked");
            }
        }

        debug!(ttl = ?self.shared.ttl, "Cache closed");
    }

    #[cfg(test)]
    fn sweeper_running(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.stop.is_stopped()
    }

    /// The effective TTL, which is also the sweep interval.
    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    /// Removes every expired entry now. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.shared.purge_expired()
    }

    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.shared.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.shared.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.shared.entries.read();
        let expired = entries
            .values()
            .filter(|e| e.is_expired(self.shared.ttl))
            .count();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len() - expired,
            ttl: self.shared.ttl,
        }
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Drop for TtlCache {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.shared.ttl)
            .field("entries", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries awaiting removal
    pub expired_entries: usize,
    /// Valid (non-expired) entries
    pub valid_entries: usize,
    /// Entry lifetime and sweep interval
    pub ttl: Duration,
}

/// Starts the sweeper thread.
///
/// Sweeps are spaced at least one TTL apart. If the thread cannot be
/// spawned the cache still works; stale entries are then only removed
/// when read.
fn spawn_sweeper(shared: Arc<Shared>, stop: Arc<StopSignal>) -> Option<JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name("ttl-cache-sweeper".into())
        .spawn(move || {
            while !stop.wait_until(Instant::now().checked_add(shared.ttl)) {
                let removed = shared.purge_expired();
                if removed > 0 {
                    debug!(removed, "Swept expired cache entries");
                }
            }
            trace!("Cache sweeper stopped");
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Failed to start cache sweeper");
            None
        }
    }
}
