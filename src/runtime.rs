//! Async single-writer service around [`MarkerEditor`]
//!
//! Any number of [`EditorHandle`] clones may send commands from any task; a
//! single spawned task owns the editor and applies them one at a time, so
//! add/remove/clear stay linearizable. Clicks queued by the pointer bridge are
//! drained before every command and on a fixed tick.

use crate::{
    core::mode::Mode,
    data::geojson::FeatureCollection,
    editor::MarkerEditor,
    input::{
        bridge::ClickListener,
        events::{Invocation, SurfaceEvent},
    },
    traits::MapSurface,
    MarkerError, Result,
};
use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::MissedTickBehavior,
};

/// Bound on commands waiting for the editor task
const COMMAND_QUEUE_CAPACITY: usize = 64;

#[derive(Debug)]
pub enum EditorCommand {
    AddMarker(Invocation),
    ClearAll(Invocation),
    SetDeleteMode(bool),
    Surface(SurfaceEvent),
    Snapshot(oneshot::Sender<EditorSnapshot>),
    Shutdown,
}

/// Point-in-time copy of the editor state
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub mode: Mode,
    pub delete_armed: bool,
    pub markers: FeatureCollection,
    pub revision: u64,
}

impl<S: MapSurface> From<&MarkerEditor<S>> for EditorSnapshot {
    fn from(editor: &MarkerEditor<S>) -> Self {
        Self {
            mode: editor.mode(),
            delete_armed: editor.controller().bridge().is_armed(),
            markers: editor.store().collection().clone(),
            revision: editor.store().revision(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorHandle {
    command_tx: mpsc::Sender<EditorCommand>,
    click_listener: ClickListener,
}

impl EditorHandle {
    /// Listener for clicks on drawn markers, usable from any thread.
    ///
    /// It follows the editor's delete mode: clicks are ignored until
    /// [`EditorHandle::set_delete_mode`] turns it on. Accepted clicks are
    /// applied by the editor task before its next command or on its next tick.
    pub fn click_listener(&self) -> ClickListener {
        self.click_listener.clone()
    }

    pub async fn add_marker(&self, invocation: Invocation) -> Result<()> {
        self.send(EditorCommand::AddMarker(invocation)).await
    }

    pub async fn clear_all(&self, invocation: Invocation) -> Result<()> {
        self.send(EditorCommand::ClearAll(invocation)).await
    }

    pub async fn set_delete_mode(&self, enabled: bool) -> Result<()> {
        self.send(EditorCommand::SetDeleteMode(enabled)).await
    }

    pub async fn surface_event(&self, event: SurfaceEvent) -> Result<()> {
        self.send(EditorCommand::Surface(event)).await
    }

    pub async fn snapshot(&self) -> Result<EditorSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(EditorCommand::Snapshot(reply_tx)).await?;
        reply_rx.await.map_err(|_| MarkerError::ServiceClosed)
    }

    /// Asks the editor task to stop after the commands already queued
    pub async fn shutdown(&self) -> Result<()> {
        self.send(EditorCommand::Shutdown).await
    }

    async fn send(&self, command: EditorCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| MarkerError::ServiceClosed)
    }
}

/// Spawns the editor task on the current tokio runtime.
///
/// The join handle yields the editor back once the task stops, either on
/// [`EditorHandle::shutdown`] or when every handle has been dropped.
pub fn spawn_editor<S>(editor: MarkerEditor<S>) -> (EditorHandle, JoinHandle<MarkerEditor<S>>)
where
    S: MapSurface + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    let click_listener = editor.controller().bridge().listener();
    let task = tokio::spawn(run_editor(editor, command_rx));
    (
        EditorHandle {
            command_tx,
            click_listener,
        },
        task,
    )
}

async fn run_editor<S>(
    mut editor: MarkerEditor<S>,
    mut command_rx: mpsc::Receiver<EditorCommand>,
) -> MarkerEditor<S>
where
    S: MapSurface + Send + 'static,
{
    let poll = Duration::from_millis(editor.config().click_poll_interval_ms.max(1));
    let mut tick = tokio::time::interval(poll);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log::debug!("editor task started, polling clicks every {:?}", poll);

    loop {
        tokio::select! {
            command = command_rx.recv() => {
                let Some(command) = command else { break };
                editor.process_pending_clicks();
                if !apply(&mut editor, command) {
                    break;
                }
            }
            _ = tick.tick() => {
                editor.process_pending_clicks();
            }
        }
    }

    editor.process_pending_clicks();
    log::debug!("editor task stopped with {} marker(s)", editor.store().len());
    editor
}

/// Applies one command; `false` means stop
fn apply<S: MapSurface>(editor: &mut MarkerEditor<S>, command: EditorCommand) -> bool {
    match command {
        EditorCommand::AddMarker(invocation) => editor.request_add_marker(invocation),
        EditorCommand::ClearAll(invocation) => editor.request_clear_all(invocation),
        EditorCommand::SetDeleteMode(enabled) => editor.set_delete_mode(enabled),
        EditorCommand::Surface(event) => editor.handle_surface_event(event),
        EditorCommand::Snapshot(reply) => {
            if reply.send(EditorSnapshot::from(&*editor)).is_err() {
                log::debug!("snapshot dropped, requester is gone");
            }
        }
        EditorCommand::Shutdown => return false,
    }
    true
}
