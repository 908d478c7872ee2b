//! The review session state machine.
//!
//! [`ReviewSession`] walks an immutable list of [`FileEntry`] values one at
//! a time. It performs no I/O itself: transitions return the collaborator
//! requests the caller must issue ([`PreviewRequest`], [`DeleteRequest`],
//! [`RevealRequest`]), and the caller feeds each outcome back through the
//! matching `complete_*` method. Collaborator failures are logged and
//! swallowed here; they never change the phase.

use std::path::PathBuf;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::{CoreError, CoreResult, ReviewError};
use crate::event::Event;
use crate::fs::entry::FileEntry;
use crate::fs::preview::EncodedImage;

/// Lifecycle phase of a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the listing. Stays here if the listing fails.
    Loading,
    /// `cursor < entries.len()`; decisions are accepted.
    Reviewing,
    /// Every entry has been decided. Terminal.
    Finished,
    /// The listing returned no files. Terminal, with no statistics.
    Empty,
}

/// Identifies the cursor position a preview fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    index: usize,
}

impl PreviewTicket {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A preview fetch the caller must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub ticket: PreviewTicket,
    pub path: PathBuf,
}

/// A delete the caller must issue before the cursor can advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub index: usize,
    pub path: PathBuf,
}

/// A reveal-in-browser call the caller must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealRequest {
    pub index: usize,
    pub path: PathBuf,
}

/// Why a decision was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The session is not in [`Phase::Reviewing`].
    NotReviewing,
    /// A delete for the current entry has not completed yet.
    DeletePending,
}

/// Result of [`ReviewSession::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The entry was kept and the cursor advanced; issue `preview` if present.
    Advanced { preview: Option<PreviewRequest> },
    /// The delete must run first; report it via [`ReviewSession::complete_delete`].
    DeleteRequested(DeleteRequest),
    /// Nothing changed.
    Rejected(Rejection),
}

/// The single owned state of one triage run.
#[derive(Debug)]
pub struct ReviewSession {
    phase: Phase,
    entries: Vec<FileEntry>,
    cursor: usize,
    preview: Option<EncodedImage>,
    bytes_deleted: u64,
    count_deleted: usize,
    pending_delete: Option<usize>,
    subscribers: Vec<UnboundedSender<Event>>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    /// Creates a session in [`Phase::Loading`] with no entries.
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            entries: Vec::new(),
            cursor: 0,
            preview: None,
            bytes_deleted: 0,
            count_deleted: 0,
            pending_delete: None,
            subscribers: Vec::new(),
        }
    }

    /// Registers a new observer. Every subsequent [`Event`] is sent to it.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Event> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the entry under review, or `None` outside [`Phase::Reviewing`].
    pub fn current_entry(&self) -> Option<&FileEntry> {
        match self.phase {
            Phase::Reviewing => self.entries.get(self.cursor),
            _ => None,
        }
    }

    /// Returns the cached preview for the current entry, if it has arrived.
    pub fn preview(&self) -> Option<&EncodedImage> {
        self.preview.as_ref()
    }

    pub fn bytes_deleted(&self) -> u64 {
        self.bytes_deleted
    }

    pub fn count_deleted(&self) -> usize {
        self.count_deleted
    }

    /// Returns `true` while a delete for the current entry is outstanding.
    pub fn is_delete_pending(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Number of entries not yet decided, including the current one.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Installs the listing result and leaves [`Phase::Loading`].
    ///
    /// Returns the preview fetch for the first entry, if it is an image.
    /// Ignored outside `Loading`: the list is never refreshed mid-session.
    pub fn load_entries(&mut self, entries: Vec<FileEntry>) -> Option<PreviewRequest> {
        if self.phase != Phase::Loading {
            tracing::warn!(
                "Ignoring listing of {} entries: session already loaded",
                entries.len()
            );
            return None;
        }

        let count = entries.len();
        self.entries = entries;
        self.cursor = 0;
        self.preview = None;
        self.emit(Event::ListingLoaded { count });

        if count == 0 {
            tracing::info!("No files to review");
            self.phase = Phase::Empty;
            return None;
        }

        tracing::info!("Loaded {count} files for review");
        self.phase = Phase::Reviewing;
        self.preview_request()
    }

    /// Records a listing failure. The session stays in `Loading`.
    pub fn listing_failed(&mut self, error: CoreError) {
        let error = ReviewError::Listing(error);
        tracing::error!("{error}");
        self.emit(Event::ListingFailed {
            error: error.to_string(),
        });
    }

    /// Applies the user's keep/delete choice for the current entry.
    ///
    /// Keeping advances immediately. Deleting returns a [`DeleteRequest`]
    /// and holds the cursor until [`complete_delete`](Self::complete_delete)
    /// reports success.
    pub fn decide(&mut self, keep: bool) -> Decision {
        if self.phase != Phase::Reviewing {
            return Decision::Rejected(Rejection::NotReviewing);
        }
        if self.pending_delete.is_some() {
            return Decision::Rejected(Rejection::DeletePending);
        }

        let index = self.cursor;
        if keep {
            tracing::debug!("Keeping {}", self.entries[index].path().display());
            self.emit(Event::Kept { index });
            return Decision::Advanced {
                preview: self.advance(),
            };
        }

        self.pending_delete = Some(index);
        Decision::DeleteRequested(DeleteRequest {
            index,
            path: self.entries[index].path().to_path_buf(),
        })
    }

    /// Reports the outcome of a delete issued by [`decide`](Self::decide).
    ///
    /// On success the statistics are updated and the cursor advances; the
    /// returned request is the next entry's preview fetch. On failure
    /// nothing but the pending flag changes. Outcomes for a request that is
    /// not outstanding are ignored.
    pub fn complete_delete(
        &mut self,
        request: &DeleteRequest,
        result: CoreResult<()>,
    ) -> Option<PreviewRequest> {
        if self.pending_delete != Some(request.index) {
            tracing::warn!(
                "Ignoring completion of delete #{} that is not outstanding",
                request.index
            );
            return None;
        }
        self.pending_delete = None;

        match result {
            Ok(()) => {
                let size = self.entries[request.index].size();
                self.count_deleted += 1;
                self.bytes_deleted += size;
                tracing::info!("Deleted {} ({size} bytes)", request.path.display());
                self.emit(Event::Deleted {
                    index: request.index,
                    size,
                });
                self.advance()
            }
            Err(source) => {
                let error = ReviewError::Delete {
                    path: request.path.clone(),
                    source,
                };
                tracing::error!("{error}");
                self.emit(Event::DeleteFailed {
                    index: request.index,
                    error: error.to_string(),
                });
                None
            }
        }
    }

    /// Stores a fetched preview if `ticket` still matches the cursor.
    ///
    /// Returns `true` when the preview was applied. A result for an entry
    /// the cursor has already left is dropped without touching state.
    pub fn complete_preview(
        &mut self,
        request: &PreviewRequest,
        result: CoreResult<EncodedImage>,
    ) -> bool {
        let index = request.ticket.index;
        if self.phase != Phase::Reviewing || index != self.cursor {
            tracing::debug!(
                "Discarding stale preview for #{index} (cursor at {})",
                self.cursor
            );
            self.emit(Event::PreviewDiscarded { index });
            return false;
        }

        match result {
            Ok(image) => {
                self.preview = Some(image);
                self.emit(Event::PreviewReady { index });
                true
            }
            Err(source) => {
                let error = ReviewError::Preview {
                    path: request.path.clone(),
                    source,
                };
                tracing::warn!("{error}");
                self.emit(Event::PreviewFailed {
                    index,
                    error: error.to_string(),
                });
                false
            }
        }
    }

    /// Returns the reveal call for the current entry. Never changes state.
    pub fn reveal_current(&self) -> Option<RevealRequest> {
        self.current_entry().map(|entry| RevealRequest {
            index: self.cursor,
            path: entry.path().to_path_buf(),
        })
    }

    /// Reports the outcome of a reveal call. Failures are logged only.
    pub fn complete_reveal(&mut self, request: &RevealRequest, result: CoreResult<()>) {
        if let Err(source) = result {
            let error = ReviewError::Reveal {
                path: request.path.clone(),
                source,
            };
            tracing::warn!("{error}");
            self.emit(Event::RevealFailed {
                index: request.index,
                error: error.to_string(),
            });
        }
    }

    /// Moves the cursor forward by one, clearing the preview first.
    fn advance(&mut self) -> Option<PreviewRequest> {
        self.preview = None;
        self.cursor += 1;

        if self.cursor >= self.entries.len() {
            self.phase = Phase::Finished;
            tracing::info!(
                "Review finished: {} files deleted, {} bytes reclaimed",
                self.count_deleted,
                self.bytes_deleted
            );
            self.emit(Event::Finished {
                count_deleted: self.count_deleted,
                bytes_deleted: self.bytes_deleted,
            });
            return None;
        }

        self.preview_request()
    }

    /// Builds the preview fetch for the current entry, if it is an image.
    fn preview_request(&self) -> Option<PreviewRequest> {
        let entry = self.entries.get(self.cursor)?;
        if !entry.is_image() {
            return None;
        }
        Some(PreviewRequest {
            ticket: PreviewTicket { index: self.cursor },
            path: entry.path().to_path_buf(),
        })
    }

    /// Sends `event` to every live subscriber, dropping closed ones.
    fn emit(&mut self, event: Event) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn entry(path: &str, size: u64, is_image: bool) -> FileEntry {
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        FileEntry::from_parts(PathBuf::from(path), name, size, None, None, is_image)
    }

    fn loaded(entries: Vec<FileEntry>) -> (ReviewSession, Option<PreviewRequest>) {
        let mut session = ReviewSession::new();
        let request = session.load_entries(entries);
        (session, request)
    }

    fn image(tag: &[u8]) -> EncodedImage {
        EncodedImage::new("image/png", tag.to_vec())
    }

    fn delete_ok(session: &mut ReviewSession) -> Option<PreviewRequest> {
        match session.decide(false) {
            Decision::DeleteRequested(req) => session.complete_delete(&req, Ok(())),
            other => panic!("expected delete request, got {other:?}"),
        }
    }

    fn delete_err(session: &mut ReviewSession) {
        match session.decide(false) {
            Decision::DeleteRequested(req) => {
                let err = CoreError::PermissionDenied(req.path.clone());
                assert!(session.complete_delete(&req, Err(err)).is_none());
            }
            other => panic!("expected delete request, got {other:?}"),
        }
    }

    // --- loading ---

    #[test]
    fn new_session_is_loading() {
        let session = ReviewSession::new();
        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.cursor(), 0);
        assert!(session.current_entry().is_none());
        assert!(session.preview().is_none());
    }

    #[test]
    fn empty_listing_enters_empty_phase() {
        let (session, request) = loaded(vec![]);
        assert_eq!(session.phase(), Phase::Empty);
        assert!(request.is_none());
        assert_eq!(session.count_deleted(), 0);
        assert_eq!(session.bytes_deleted(), 0);
    }

    #[test]
    fn listing_with_image_requests_first_preview() {
        let (session, request) = loaded(vec![entry("/a.png", 10, true)]);
        assert_eq!(session.phase(), Phase::Reviewing);
        let request = request.unwrap();
        assert_eq!(request.ticket.index(), 0);
        assert_eq!(request.path, PathBuf::from("/a.png"));
    }

    #[test]
    fn listing_with_non_image_requests_nothing() {
        let (session, request) = loaded(vec![entry("/b.txt", 10, false)]);
        assert_eq!(session.phase(), Phase::Reviewing);
        assert!(request.is_none());
    }

    #[test]
    fn listing_failure_stays_loading() {
        let mut session = ReviewSession::new();
        let mut rx = session.subscribe();
        session.listing_failed(CoreError::NotFound(PathBuf::from("/nowhere")));

        assert_eq!(session.phase(), Phase::Loading);
        assert!(matches!(rx.try_recv(), Ok(Event::ListingFailed { .. })));
    }

    #[test]
    fn second_listing_is_ignored() {
        let (mut session, _) = loaded(vec![entry("/a.txt", 1, false)]);
        let request = session.load_entries(vec![entry("/z.png", 1, true), entry("/y", 1, false)]);
        assert!(request.is_none());
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.entries()[0].path(), Path::new("/a.txt"));
    }

    #[test]
    fn decide_while_loading_is_rejected() {
        let mut session = ReviewSession::new();
        assert_eq!(
            session.decide(true),
            Decision::Rejected(Rejection::NotReviewing)
        );
        assert_eq!(session.cursor(), 0);
    }

    // --- keep ---

    #[test]
    fn keep_advances_without_touching_stats() {
        let (mut session, _) = loaded(vec![entry("/a.txt", 5, false), entry("/b.txt", 7, false)]);
        let decision = session.decide(true);
        assert_eq!(decision, Decision::Advanced { preview: None });
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.count_deleted(), 0);
        assert_eq!(session.bytes_deleted(), 0);
    }

    #[test]
    fn keep_returns_next_image_preview_request() {
        let (mut session, _) = loaded(vec![entry("/a.txt", 5, false), entry("/b.gif", 7, true)]);
        match session.decide(true) {
            Decision::Advanced { preview: Some(req) } => {
                assert_eq!(req.ticket.index(), 1);
                assert_eq!(req.path, PathBuf::from("/b.gif"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn keep_clears_preview() {
        let (mut session, request) =
            loaded(vec![entry("/a.png", 5, true), entry("/b.png", 7, true)]);
        assert!(session.complete_preview(&request.unwrap(), Ok(image(b"A"))));
        assert!(session.preview().is_some());

        session.decide(true);
        assert!(session.preview().is_none());
    }

    // --- delete ---

    #[test]
    fn delete_holds_cursor_until_completion() {
        let (mut session, _) = loaded(vec![entry("/a.txt", 5, false), entry("/b.txt", 7, false)]);
        let request = match session.decide(false) {
            Decision::DeleteRequested(req) => req,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(request.index, 0);
        assert_eq!(request.path, PathBuf::from("/a.txt"));
        assert_eq!(session.cursor(), 0);
        assert!(session.is_delete_pending());

        session.complete_delete(&request, Ok(()));
        assert_eq!(session.cursor(), 1);
        assert!(!session.is_delete_pending());
        assert_eq!(session.count_deleted(), 1);
        assert_eq!(session.bytes_deleted(), 5);
    }

    #[test]
    fn decisions_rejected_while_delete_pending() {
        let (mut session, _) = loaded(vec![entry("/a.txt", 5, false), entry("/b.txt", 7, false)]);
        let _pending = session.decide(false);

        assert_eq!(
            session.decide(true),
            Decision::Rejected(Rejection::DeletePending)
        );
        assert_eq!(
            session.decide(false),
            Decision::Rejected(Rejection::DeletePending)
        );
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn failed_delete_changes_nothing() {
        let (mut session, _) = loaded(vec![entry("/a.txt", 5, false), entry("/b.txt", 7, false)]);
        let mut rx = session.subscribe();
        delete_err(&mut session);

        assert_eq!(session.cursor(), 0);
        assert_eq!(session.count_deleted(), 0);
        assert_eq!(session.bytes_deleted(), 0);
        assert_eq!(session.phase(), Phase::Reviewing);
        assert_eq!(session.current_entry().unwrap().path(), Path::new("/a.txt"));
        assert!(matches!(
            rx.try_recv(),
            Ok(Event::DeleteFailed { index: 0, .. })
        ));
    }

    #[test]
    fn failed_delete_can_be_retried() {
        let (mut session, _) = loaded(vec![entry("/a.txt", 5, false)]);
        delete_err(&mut session);
        delete_ok(&mut session);

        assert_eq!(session.count_deleted(), 1);
        assert_eq!(session.bytes_deleted(), 5);
        assert_eq!(session.phase(), Phase::Finished);
    }

    #[test]
    fn failed_delete_keeps_preview() {
        let (mut session, request) = loaded(vec![entry("/a.png", 5, true)]);
        session.complete_preview(&request.unwrap(), Ok(image(b"A")));
        delete_err(&mut session);
        assert_eq!(session.preview(), Some(&image(b"A")));
    }

    #[test]
    fn completion_for_unknown_delete_is_ignored() {
        let (mut session, _) = loaded(vec![entry("/a.txt", 5, false)]);
        let bogus = DeleteRequest {
            index: 0,
            path: PathBuf::from("/a.txt"),
        };
        assert!(session.complete_delete(&bogus, Ok(())).is_none());
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.count_deleted(), 0);
    }

    #[test]
    fn stats_count_only_successful_deletes() {
        let (mut session, _) = loaded(vec![
            entry("/a.txt", 100, false),
            entry("/b.txt", 200, false),
            entry("/c.txt", 400, false),
            entry("/d.txt", 800, false),
        ]);
        delete_ok(&mut session); // a
        session.decide(true); // b kept
        delete_err(&mut session); // c fails
        delete_ok(&mut session); // c retried
        session.decide(true); // d kept

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.count_deleted(), 2);
        assert_eq!(session.bytes_deleted(), 500);
        assert!(session.count_deleted() <= session.cursor());
    }

    // --- preview gating ---

    #[test]
    fn preview_for_current_entry_is_applied() {
        let (mut session, request) = loaded(vec![entry("/a.png", 2_097_152, true)]);
        let mut rx = session.subscribe();
        assert!(session.complete_preview(&request.unwrap(), Ok(image(b"P"))));
        assert_eq!(session.preview(), Some(&image(b"P")));
        assert_eq!(rx.try_recv().unwrap(), Event::PreviewReady { index: 0 });
    }

    #[test]
    fn stale_preview_is_discarded() {
        let (mut session, first) =
            loaded(vec![entry("/a.png", 1, true), entry("/b.png", 1, true)]);
        let first = first.unwrap();
        let second = match session.decide(true) {
            Decision::Advanced { preview } => preview.unwrap(),
            other => panic!("unexpected {other:?}"),
        };

        // item 0's fetch resolves after the cursor moved to item 1
        assert!(!session.complete_preview(&first, Ok(image(b"stale"))));
        assert!(session.preview().is_none());

        assert!(session.complete_preview(&second, Ok(image(b"fresh"))));
        assert_eq!(session.preview(), Some(&image(b"fresh")));
    }

    #[test]
    fn stale_preview_does_not_overwrite_fresh_one() {
        let (mut session, first) =
            loaded(vec![entry("/a.png", 1, true), entry("/b.png", 1, true)]);
        let first = first.unwrap();
        let second = match session.decide(true) {
            Decision::Advanced { preview } => preview.unwrap(),
            other => panic!("unexpected {other:?}"),
        };
        session.complete_preview(&second, Ok(image(b"fresh")));
        session.complete_preview(&first, Ok(image(b"stale")));

        assert_eq!(session.preview(), Some(&image(b"fresh")));
    }

    #[test]
    fn stale_preview_after_finish_is_discarded() {
        let (mut session, first) = loaded(vec![entry("/a.png", 1, true)]);
        session.decide(true);
        assert!(!session.complete_preview(&first.unwrap(), Ok(image(b"late"))));
        assert!(session.preview().is_none());
    }

    #[test]
    fn preview_failure_leaves_preview_empty() {
        let (mut session, request) = loaded(vec![entry("/a.png", 1, true)]);
        let err = CoreError::NotFound(PathBuf::from("/a.png"));
        assert!(!session.complete_preview(&request.unwrap(), Err(err)));
        assert!(session.preview().is_none());
        assert_eq!(session.phase(), Phase::Reviewing);
    }

    // --- reveal ---

    #[test]
    fn reveal_is_idempotent() {
        let (mut session, request) =
            loaded(vec![entry("/a.png", 3, true), entry("/b.txt", 4, false)]);
        session.complete_preview(&request.unwrap(), Ok(image(b"A")));

        for _ in 0..3 {
            let reveal = session.reveal_current().unwrap();
            assert_eq!(reveal.path, PathBuf::from("/a.png"));
            session.complete_reveal(&reveal, Err(CoreError::Launch("no browser".into())));
        }

        assert_eq!(session.cursor(), 0);
        assert_eq!(session.preview(), Some(&image(b"A")));
        assert_eq!(session.count_deleted(), 0);
        assert_eq!(session.bytes_deleted(), 0);
    }

    #[test]
    fn reveal_outside_reviewing_is_none() {
        let (session, _) = loaded(vec![]);
        assert!(session.reveal_current().is_none());
    }

    // --- terminal state ---

    #[test]
    fn finished_session_is_frozen() {
        let (mut session, _) = loaded(vec![entry("/b.txt", 1_048_576, false)]);
        delete_ok(&mut session);
        assert_eq!(session.phase(), Phase::Finished);

        for keep in [true, false, true] {
            assert_eq!(
                session.decide(keep),
                Decision::Rejected(Rejection::NotReviewing)
            );
        }
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.count_deleted(), 1);
        assert_eq!(session.bytes_deleted(), 1_048_576);
        assert!(session.reveal_current().is_none());
    }

    #[test]
    fn cursor_never_exceeds_len() {
        let (mut session, _) = loaded(vec![entry("/a", 1, false), entry("/b", 1, false)]);
        for _ in 0..10 {
            session.decide(true);
            assert!(session.cursor() <= session.entries().len());
        }
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.remaining(), 0);
    }

    // --- events ---

    #[test]
    fn events_follow_decisions() {
        let mut session = ReviewSession::new();
        let mut rx = session.subscribe();
        session.load_entries(vec![entry("/a.txt", 3, false), entry("/b.txt", 4, false)]);
        session.decide(true);
        delete_ok(&mut session);

        let events: Vec<Event> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            events,
            vec![
                Event::ListingLoaded { count: 2 },
                Event::Kept { index: 0 },
                Event::Deleted { index: 1, size: 4 },
                Event::Finished {
                    count_deleted: 1,
                    bytes_deleted: 4
                },
            ]
        );
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut session = ReviewSession::new();
        let rx = session.subscribe();
        let mut live = session.subscribe();
        drop(rx);

        session.load_entries(vec![]);
        assert_eq!(session.subscribers.len(), 1);
        assert_eq!(live.try_recv().unwrap(), Event::ListingLoaded { count: 0 });
    }
}
