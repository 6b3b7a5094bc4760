//! Scan statistics tracking.
//!
//! This module provides counters for the events of a scan, most of which are
//! failures the resolution engine absorbs instead of reporting.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ScanEvent;

/// Scan statistics tracker.
///
/// Tracks every [`ScanEvent`] with an atomic counter so the tracker can be
/// shared by reference while the scan borrows other state mutably. All events
/// are initialized to zero on creation.
#[derive(Debug)]
pub struct ScanStats {
    events: HashMap<ScanEvent, AtomicUsize>,
}

impl ScanStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut events = HashMap::new();
        for event in ScanEvent::iter() {
            events.insert(event, AtomicUsize::new(0));
        }
        ScanStats { events }
    }

    /// Increment an event counter by one.
    pub fn increment(&self, event: ScanEvent) {
        self.add(event, 1);
    }

    /// Increment an event counter by `count`.
    pub fn add(&self, event: ScanEvent, count: usize) {
        if let Some(counter) = self.events.get(&event) {
            counter.fetch_add(count, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in ScanStats initialization.",
                event
            );
        }
    }

    /// Get the count for an event.
    ///
    /// Returns 0 if the event is not in the map (should never happen if properly initialized).
    pub fn get(&self, event: ScanEvent) -> usize {
        self.events
            .get(&event)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Logs every non-zero counter at debug level.
    pub fn log_summary(&self) {
        for event in ScanEvent::iter() {
            let count = self.get(event);
            if count > 0 {
                log::debug!("{}: {}", event, count);
            }
        }
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}
