//! Delete-mode click plumbing
//!
//! The presentation layer owns the pointer; the core only sees what comes out
//! of the channel here. While armed, a click on a drawn marker removes its
//! visual on the spot and queues a [`PendingClick`] for the core. Disarming
//! stops new clicks from doing either, but clicks already queued are still
//! delivered so the drawn and stored marker sets cannot drift apart.

use crate::{core::geo::LatLng, input::events::PendingClick, traits::RenderedMarkers};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub struct PointerEventBridge {
    click_tx: Sender<PendingClick>,
    click_rx: Receiver<PendingClick>,
    armed: Arc<AtomicBool>,
}

impl PointerEventBridge {
    pub fn new() -> Self {
        let (click_tx, click_rx) = unbounded();
        Self {
            click_tx,
            click_rx,
            armed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Arms the bridge and returns a listener to hand to the surface
    pub fn arm(&self) -> ClickListener {
        self.armed.store(true, Ordering::Release);
        log::debug!("pointer bridge armed");
        self.listener()
    }

    /// Disarms every listener handed out so far
    pub fn disarm(&self) {
        self.armed.store(false, Ordering::Release);
        log::debug!(
            "pointer bridge disarmed, {} click(s) still in flight",
            self.click_rx.len()
        );
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// A listener sharing this bridge's channel and arm state
    pub fn listener(&self) -> ClickListener {
        ClickListener {
            click_tx: self.click_tx.clone(),
            armed: Arc::clone(&self.armed),
        }
    }

    /// Next queued click, if any
    pub fn try_next(&self) -> Option<PendingClick> {
        self.click_rx.try_recv().ok()
    }

    /// All clicks queued right now, in click order
    pub fn drain(&self) -> Vec<PendingClick> {
        self.click_rx.try_iter().collect()
    }

    pub fn pending(&self) -> usize {
        self.click_rx.len()
    }
}

impl Default for PointerEventBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable click handler given to the map surface while delete mode is on
#[derive(Debug, Clone)]
pub struct ClickListener {
    click_tx: Sender<PendingClick>,
    armed: Arc<AtomicBool>,
}

impl ClickListener {
    /// Handles a click on the drawn marker at `lat_lng`.
    ///
    /// Returns `false` without touching anything when the bridge is disarmed.
    pub fn on_marker_clicked(&self, rendered: &mut dyn RenderedMarkers, lat_lng: LatLng) -> bool {
        if !self.is_armed() {
            log::debug!(
                "click at ({}, {}) ignored, delete mode is off",
                lat_lng.lat,
                lat_lng.lng
            );
            return false;
        }

        if !rendered.remove_rendered(&lat_lng) {
            log::debug!(
                "no drawn marker at ({}, {}) to remove",
                lat_lng.lat,
                lat_lng.lng
            );
        }

        if self.click_tx.send(PendingClick::new(lat_lng)).is_err() {
            log::warn!("click at ({}, {}) dropped, editor is gone", lat_lng.lat, lat_lng.lng);
        }
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Clicks sent but not yet taken by the editor
    pub fn pending(&self) -> usize {
        self.click_tx.len()
    }
}
