//! Async glue between a [`ReviewSession`] and its [`ReviewBackend`].
//!
//! The driver spawns every collaborator call as a tokio task. Results come
//! back as [`Completion`] messages on a channel and are applied one at a
//! time by whoever owns the driver (normally the frontend's event loop), so
//! session mutations never interleave.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::CoreResult;
use crate::event::{Command, Event};
use crate::fs::entry::FileEntry;
use crate::fs::preview::EncodedImage;
use crate::review::backend::ReviewBackend;
use crate::review::session::{
    Decision, DeleteRequest, PreviewRequest, Rejection, RevealRequest, ReviewSession,
};

/// A finished collaborator call, waiting to be applied to the session.
#[derive(Debug)]
pub enum Completion {
    Listed(CoreResult<Vec<FileEntry>>),
    Preview(PreviewRequest, CoreResult<EncodedImage>),
    Deleted(DeleteRequest, CoreResult<()>),
    Revealed(RevealRequest, CoreResult<()>),
}

/// Owns the session and routes commands and completions through it.
pub struct ReviewDriver {
    session: ReviewSession,
    backend: Arc<dyn ReviewBackend>,
    previews_enabled: bool,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl ReviewDriver {
    pub fn new(backend: Arc<dyn ReviewBackend>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session: ReviewSession::new(),
            backend,
            previews_enabled: true,
            tx,
            rx,
        }
    }

    /// Returns a driver that never fetches previews when `enabled` is false.
    pub fn with_previews(self, enabled: bool) -> Self {
        Self {
            previews_enabled: enabled,
            ..self
        }
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    /// Registers an observer for session [`Event`]s.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Event> {
        self.session.subscribe()
    }

    /// Issues the listing call. Must be called from within a tokio runtime.
    pub fn start(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.list_files().await;
            let _ = tx.send(Completion::Listed(result));
        });
    }

    /// Applies a user command. Returns `false` if the session rejected it.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Keep | Command::Delete => {
                match self.session.decide(command == Command::Keep) {
                    Decision::Advanced { preview } => {
                        self.spawn_preview(preview);
                        true
                    }
                    Decision::DeleteRequested(request) => {
                        self.spawn_delete(request);
                        true
                    }
                    Decision::Rejected(reason) => {
                        match reason {
                            Rejection::DeletePending => {
                                tracing::debug!("Ignoring {command:?}: delete in flight")
                            }
                            Rejection::NotReviewing => {
                                tracing::debug!("Ignoring {command:?}: not reviewing")
                            }
                        }
                        false
                    }
                }
            }
            Command::Reveal => match self.session.reveal_current() {
                Some(request) => {
                    self.spawn_reveal(request);
                    true
                }
                None => false,
            },
        }
    }

    /// Applies one completion to the session, spawning any follow-up fetch.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Listed(Ok(entries)) => {
                let preview = self.session.load_entries(entries);
                self.spawn_preview(preview);
            }
            Completion::Listed(Err(e)) => self.session.listing_failed(e),
            Completion::Preview(request, result) => {
                self.session.complete_preview(&request, result);
            }
            Completion::Deleted(request, result) => {
                let preview = self.session.complete_delete(&request, result);
                self.spawn_preview(preview);
            }
            Completion::Revealed(request, result) => {
                self.session.complete_reveal(&request, result);
            }
        }
    }

    /// Applies every completion already waiting. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Waits for the next completion and applies it.
    pub async fn apply_next(&mut self) {
        if let Some(completion) = self.rx.recv().await {
            self.apply(completion);
        }
    }

    fn spawn_preview(&self, request: Option<PreviewRequest>) {
        let Some(request) = request else {
            return;
        };
        if !self.previews_enabled {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.read_preview(&request.path).await;
            let _ = tx.send(Completion::Preview(request, result));
        });
    }

    fn spawn_delete(&self, request: DeleteRequest) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.delete_file(&request.path).await;
            let _ = tx.send(Completion::Deleted(request, result));
        });
    }

    fn spawn_reveal(&self, request: RevealRequest) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.reveal_in_browser(&request.path).await;
            let _ = tx.send(Completion::Revealed(request, result));
        });
    }
}
