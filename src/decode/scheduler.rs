//! Per-slot cancellable decode tasks.
//!
//! Each layer slot has at most one live decode. Starting a new decode for
//! a slot cancels the previous one and bumps the slot's generation; only a
//! completion carrying the current generation is ever applied, so the most
//! recent *request* wins no matter which decode finishes first.
//!
//! Pixel work runs on tokio's blocking pool. Completions are delivered on
//! an in-process channel and drained by the owning editor.

use rustc_hash::FxHashMap;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::DecodeError;
use crate::layers::{ImageHandle, LayerKey};

use super::raster::ImageSource;

/// Result of one decode request.
#[derive(Debug)]
pub struct DecodeCompletion<K> {
    pub slot: K,
    pub generation: u64,
    pub result: Result<ImageHandle, DecodeError>,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    token: CancellationToken,
}

/// Schedules decodes for the slots of one editor.
#[derive(Debug)]
pub struct DecodeScheduler<K: LayerKey> {
    in_flight: FxHashMap<K, InFlight>,
    next_generation: u64,
    tx: mpsc::UnboundedSender<DecodeCompletion<K>>,
    rx: mpsc::UnboundedReceiver<DecodeCompletion<K>>,
}

impl<K: LayerKey> Default for DecodeScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LayerKey> DecodeScheduler<K> {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            in_flight: FxHashMap::default(),
            next_generation: 1,
            tx,
            rx,
        }
    }

    /// Start decoding `source` for `slot`, superseding any live decode.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, slot: K, source: impl Into<ImageSource>) -> Result<u64, DecodeError> {
        let handle = Handle::try_current().map_err(|_| DecodeError::NoRuntime)?;
        let source = source.into();

        let generation = self.next_generation;
        self.next_generation += 1;

        let token = CancellationToken::new();
        let previous = self.in_flight.insert(
            slot,
            InFlight {
                generation,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            log::debug!(
                "{}: decode #{} superseded by #{generation}",
                slot.name(),
                previous.generation
            );
            previous.token.cancel();
        }

        let tx = self.tx.clone();
        handle.spawn(async move {
            let work = tokio::task::spawn_blocking(move || source.decode());
            let result = tokio::select! {
                _ = token.cancelled() => Err(DecodeError::Cancelled),
                joined = work => joined.unwrap_or_else(|e| Err(DecodeError::Join(e.to_string()))),
            };
            // the receiver only goes away with the scheduler
            let _ = tx.send(DecodeCompletion {
                slot,
                generation,
                result,
            });
        });

        log::debug!("{}: decode #{generation} started", slot.name());
        Ok(generation)
    }

    /// Cancel the live decode for `slot`, if any.
    pub fn cancel(&mut self, slot: K) -> bool {
        match self.in_flight.remove(&slot) {
            Some(in_flight) => {
                in_flight.token.cancel();
                log::debug!("{}: decode #{} cancelled", slot.name(), in_flight.generation);
                true
            }
            None => false,
        }
    }

    /// Cancel every live decode.
    pub fn cancel_all(&mut self) {
        for (slot, in_flight) in self.in_flight.drain() {
            in_flight.token.cancel();
            log::debug!("{}: decode #{} cancelled", slot.name(), in_flight.generation);
        }
    }

    /// True if `completion` answers the latest request for its slot.
    #[must_use]
    pub fn is_current(&self, completion: &DecodeCompletion<K>) -> bool {
        self.in_flight
            .get(&completion.slot)
            .is_some_and(|f| f.generation == completion.generation)
    }

    /// Slots with a live decode.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    #[must_use]
    pub fn is_pending(&self, slot: K) -> bool {
        self.in_flight.contains_key(&slot)
    }

    /// Take the result of a current completion, retiring its slot.
    ///
    /// Stale completions yield `None`.
    pub fn accept(&mut self, completion: DecodeCompletion<K>) -> Option<Result<ImageHandle, DecodeError>> {
        if !self.is_current(&completion) {
            log::debug!(
                "{}: dropping stale decode #{}",
                completion.slot.name(),
                completion.generation
            );
            return None;
        }
        self.in_flight.remove(&completion.slot);
        Some(completion.result)
    }

    /// Wait for the next completion. Returns `None` once nothing is live
    /// and nothing is queued.
    pub async fn next_completion(&mut self) -> Option<DecodeCompletion<K>> {
        if self.in_flight.is_empty() {
            return self.rx.try_recv().ok();
        }
        self.rx.recv().await
    }

    /// Next queued completion, without waiting.
    pub fn try_next_completion(&mut self) -> Option<DecodeCompletion<K>> {
        self.rx.try_recv().ok()
    }
}

impl<K: LayerKey> Drop for DecodeScheduler<K> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
