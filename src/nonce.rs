//! Nonce generation, expiry checks, and replay tracking.
//!
//! A nonce is the base64 encoding of `"<timestamp>:<signature>"`, where the
//! timestamp uses the `"yyyy-MM-dd HH:mm:ssZ"` format and the signature is a
//! hash over `(timestamp, entity tag, base64(secret))`. A client cannot forge
//! a nonce without the server secret, and the embedded timestamp lets the
//! server detect staleness without any lookup.
//!
//! Each nonce seen during validation gets a [`NonceRecord`] in a concurrent
//! map; the record stores the highest nonce-count accepted so far. A
//! background sweeper drops records older than the stale window.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, NaiveDateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::enums::Algorithm;

/// The `"u"` universal sortable format.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Default window after which a tracked nonce is swept.
pub const DEFAULT_STALE_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Default interval between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// Default delay before the first sweep.
pub const DEFAULT_SWEEP_FIRST_RUN: Duration = Duration::from_secs(60);

/// Tracking state for one nonce value currently in use.
#[derive(Debug, Clone, Copy)]
struct NonceRecord {
    issued_at: SystemTime,
    last_nc: u32,
}

/// Result of a replay check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceOutcome {
    Fresh,
    Replayed,
}

/// Signed-nonce issuer and replay tracker.
///
/// One instance per authenticator configuration; shared via [`Arc`] between
/// the request path and the sweeper task. Independently configured trackers
/// can coexist in one process.
pub struct NonceTracker {
    secret: Vec<u8>,
    algorithm: Algorithm,
    records: DashMap<String, NonceRecord>,
}

impl NonceTracker {
    pub fn new(secret: impl Into<Vec<u8>>, algorithm: Algorithm) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
            records: DashMap::new(),
        }
    }

    /// Generate a nonce bound to the given entity tag.
    pub fn generate(&self, entity_tag: &str) -> String {
        self.generate_at(entity_tag, SystemTime::now())
    }

    pub fn generate_at(&self, entity_tag: &str, now: SystemTime) -> String {
        let ts = DateTime::<Utc>::from(now).format(TIMESTAMP_FORMAT).to_string();
        let sig = self.algorithm.hash_str(&format!(
            "{ts}:{entity_tag}:{secret}",
            secret = BASE64.encode(&self.secret)
        ));
        BASE64.encode(format!("{ts}:{sig}"))
    }

    /// Whether the timestamp embedded in the nonce is older than `ttl`.
    ///
    /// A nonce that cannot be decoded or whose timestamp cannot be parsed is
    /// treated as expired (fail closed).
    pub fn is_expired(&self, nonce: &str, ttl: Duration) -> bool {
        self.is_expired_at(nonce, ttl, SystemTime::now())
    }

    pub fn is_expired_at(&self, nonce: &str, ttl: Duration, now: SystemTime) -> bool {
        let Some(issued) = decode_timestamp(nonce) else {
            return true;
        };
        match now.duration_since(issued) {
            Ok(age) => age > ttl,
            // timestamp in the future: clock skew, not expiry
            Err(_) => false,
        }
    }

    /// Replay check for one (nonce, nc) pair.
    ///
    /// First sighting of a nonce records it and is `Fresh`. A later sighting
    /// is `Fresh` only when `nc` is strictly greater than the stored counter,
    /// which is then updated under the map shard lock. Anything else,
    /// including an unparseable `nc`, is `Replayed`.
    pub fn check_and_track(&self, nonce: &str, nc: &str) -> NonceOutcome {
        self.check_and_track_at(nonce, nc, SystemTime::now())
    }

    pub fn check_and_track_at(&self, nonce: &str, nc: &str, now: SystemTime) -> NonceOutcome {
        let Ok(nc) = u32::from_str_radix(nc.trim(), 16) else {
            return NonceOutcome::Replayed;
        };

        match self.records.entry(nonce.to_owned()) {
            Entry::Vacant(entry) => {
                entry.insert(NonceRecord {
                    issued_at: now,
                    last_nc: nc,
                });
                NonceOutcome::Fresh
            }
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                if nc > record.last_nc {
                    record.last_nc = nc;
                    NonceOutcome::Fresh
                } else {
                    NonceOutcome::Replayed
                }
            }
        }
    }

    /// Drop every record older than `window`, returning the removed count.
    pub fn sweep(&self, window: Duration) -> usize {
        self.sweep_at(window, SystemTime::now())
    }

    pub fn sweep_at(&self, window: Duration, now: SystemTime) -> usize {
        // Counted inside the closure: a length snapshot taken around the
        // retain would race with concurrent check_and_track inserts.
        let mut removed = 0;
        self.records.retain(|_, record| {
            let keep = now
                .duration_since(record.issued_at)
                .map_or(true, |age| age <= window);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of nonces currently tracked.
    pub fn tracked(&self) -> usize {
        self.records.len()
    }

    /// Spawn the recurring sweep task. Runs for the lifetime of the process
    /// unless the returned handle is aborted.
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        first_run: Duration,
        interval: Duration,
        window: Duration,
    ) -> JoinHandle<()> {
        let tracker = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(first_run).await;
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let removed = tracker.sweep(window);
                if removed > 0 {
                    debug!(removed, tracked = tracker.tracked(), "swept expired nonces");
                }
            }
        })
    }
}

/// Recover the issue time embedded in a nonce, if it decodes at all.
fn decode_timestamp(nonce: &str) -> Option<SystemTime> {
    let decoded = BASE64.decode(nonce).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (ts, _sig) = decoded.rsplit_once(':')?;
    let parsed = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;
    Some(SystemTime::from(parsed.and_utc()))
}
