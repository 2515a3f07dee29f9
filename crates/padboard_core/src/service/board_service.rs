//! Board use-case service.
//!
//! # Responsibility
//! - Own all board state as one explicit context object: note store,
//!   repository, debounced save queue, interaction state.
//! - Translate host-level events (clicks, pointer frames, text edits) into
//!   store mutations and layout-engine operations.
//!
//! # Invariants
//! - At most one of drag-mode or resize-mode is active at a time.
//! - Stacking-order bumps happen before persistence is scheduled.
//! - Content saves are keyed per note; metadata saves coalesce into one key.
//! - Operations on stale note ids no-op instead of failing.
//! - Restore commits its geometry only via `commit_restore`, after the
//!   host's height transition has finished.
//!
//! # See also
//! - docs/architecture/layout-physics.md

use crate::geometry::{
    Rect, Viewport, DEBOUNCE_MS, DEFAULT_NOTE_H, DEFAULT_NOTE_W, DOUBLE_CLICK_MS,
    DUPLICATE_OFFSET_PERCENT, RARE_NOTE_H, RARE_NOTE_PROBABILITY,
};
use crate::layout::{
    find_spawn_rect, ClusterOffset, DragFrame, DragSession, ResizeDirection, ResizeSession,
};
use crate::model::note::{FontSize, Note, NoteId};
use crate::model::rare_note::parse_front_matter;
use crate::repo::board_repo::{BoardRepository, RepoError, RepoResult};
use crate::schedule::DebounceQueue;
use crate::store::NoteStore;
use log::{debug, info};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Debounced persistence actions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SaveKey {
    /// The whole metadata record.
    Metadata,
    /// One note's text body.
    Content(NoteId),
}

/// Service error for board use-cases.
#[derive(Debug)]
pub enum BoardError {
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// What a header click resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Second click within the double-click window; minimize toggled.
    MinimizeToggled,
    /// Selection updated and note brought to front; a drag may start.
    Selected,
    /// The note no longer exists.
    Ignored,
}

enum Interaction {
    Idle,
    Drag(DragSession),
    Resize(ResizeSession),
}

/// Explicit context object owning all board state.
///
/// Single-writer: every mutation flows through `&mut self`, so interaction
/// ordering matches a single UI thread without hidden globals.
pub struct BoardService<R: BoardRepository> {
    repo: R,
    store: NoteStore,
    saves: DebounceQueue<SaveKey>,
    pending_texts: BTreeMap<NoteId, String>,
    interaction: Interaction,
    last_click: Option<(NoteId, u64)>,
    pending_restore: BTreeSet<NoteId>,
    font_size: FontSize,
}

impl<R: BoardRepository> BoardService<R> {
    /// Loads persisted board state and constructs the service.
    ///
    /// Malformed metadata degrades to an empty board inside the repository;
    /// only storage transport failures surface here.
    pub fn open(repo: R) -> Result<Self, BoardError> {
        let notes = repo.load_notes()?;
        let font_size = repo.load_font_size()?;
        info!(
            "event=board_open module=service status=ok notes={} font_size={}",
            notes.len(),
            font_size.as_str()
        );
        Ok(Self {
            repo,
            store: NoteStore::from_notes(notes),
            saves: DebounceQueue::new(DEBOUNCE_MS),
            pending_texts: BTreeMap::new(),
            interaction: Interaction::Idle,
            last_click: None,
            pending_restore: BTreeSet::new(),
            font_size,
        })
    }

    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn is_interacting(&self) -> bool {
        !matches!(self.interaction, Interaction::Idle)
    }

    // --- Lifecycle ---

    /// Creates a note at a spiral-searched spawn position.
    ///
    /// Rolls the rare-note chance against `rare_pool`; a hit seeds the note
    /// with the parsed front-matter body and watermark symbol. The new note
    /// becomes the sole selection. Text is persisted before metadata is
    /// scheduled so a reload between the two never finds a body-less note.
    pub fn create_note(
        &mut self,
        viewport: Viewport,
        rare_pool: &[String],
        rng: &mut impl Rng,
        now_ms: u64,
    ) -> Result<NoteId, BoardError> {
        let mut content = String::new();
        let mut symbol = None;
        if !rare_pool.is_empty() && rng.random::<f64>() < RARE_NOTE_PROBABILITY {
            let raw = &rare_pool[rng.random_range(0..rare_pool.len())];
            let parsed = parse_front_matter(raw);
            symbol = parsed.symbol().map(str::to_string);
            content = parsed.content;
        }

        self.spawn(viewport, DEFAULT_NOTE_H, content, symbol, now_ms)
    }

    /// Spawns a rare note from an explicit front-matter block.
    pub fn spawn_rare_note(
        &mut self,
        raw: &str,
        viewport: Viewport,
        now_ms: u64,
    ) -> Result<NoteId, BoardError> {
        let parsed = parse_front_matter(raw);
        let symbol = parsed.symbol().map(str::to_string);
        self.spawn(viewport, RARE_NOTE_H, parsed.content, symbol, now_ms)
    }

    fn spawn(
        &mut self,
        viewport: Viewport,
        height: f64,
        content: String,
        symbol: Option<String>,
        now_ms: u64,
    ) -> Result<NoteId, BoardError> {
        let existing: Vec<Rect> = self
            .store
            .notes()
            .iter()
            .map(|note| note.resolve_rect(viewport))
            .collect();
        let rect = find_spawn_rect(DEFAULT_NOTE_W, height, &existing, viewport);

        let z = self.store.next_z();
        let note = Note::spawned(rect, viewport, z, symbol);
        let id = note.id;

        // Text lands first so any metadata reader finds it.
        self.repo.save_text(id, &content)?;
        self.store.insert(note);
        self.store.select_only(id);
        self.saves.schedule(SaveKey::Metadata, now_ms);

        info!("event=note_create module=service status=ok note={id}");
        Ok(id)
    }

    /// Duplicates a note: same geometry shifted by 2% on both axes, fresh
    /// id and z-index, copied text. Stale ids return `None`.
    pub fn duplicate_note(
        &mut self,
        id: NoteId,
        now_ms: u64,
    ) -> Result<Option<NoteId>, BoardError> {
        let Some(source) = self.store.get(id).cloned() else {
            return Ok(None);
        };
        let text = match self.pending_texts.get(&id) {
            Some(pending) => pending.clone(),
            None => self.repo.load_text(id)?,
        };

        let mut copy = source;
        copy.id = Uuid::new_v4();
        copy.pos_x += DUPLICATE_OFFSET_PERCENT;
        copy.pos_y += DUPLICATE_OFFSET_PERCENT;
        copy.z_index = self.store.next_z();
        let new_id = copy.id;

        self.repo.save_text(new_id, &text)?;
        self.store.insert(copy);
        self.saves.schedule(SaveKey::Metadata, now_ms);

        info!("event=note_duplicate module=service status=ok source={id} note={new_id}");
        Ok(Some(new_id))
    }

    /// Deletes a note with its stored text and any pending content save.
    pub fn delete_note(&mut self, id: NoteId, now_ms: u64) -> Result<(), BoardError> {
        if self.store.remove(id).is_none() {
            return Ok(());
        }
        self.pending_texts.remove(&id);
        self.saves.cancel(&SaveKey::Content(id));
        self.pending_restore.remove(&id);
        self.repo.delete_text(id)?;
        self.saves.schedule(SaveKey::Metadata, now_ms);

        info!("event=note_delete module=service status=ok note={id}");
        Ok(())
    }

    /// Wipes all notes and their texts. Preferences survive.
    pub fn clear_all(&mut self) -> Result<(), BoardError> {
        self.repo.clear_all()?;
        self.store.reset();
        self.pending_texts.clear();
        self.pending_restore.clear();
        self.saves.drain_all();
        Ok(())
    }

    // --- Selection / clicks ---

    /// Handles a pointer-down on a note header.
    ///
    /// A second click on the same note within the double-click window
    /// toggles minimize. Otherwise shift toggles membership, a plain click
    /// applies sole-selection semantics, and the note is brought to front.
    pub fn header_click(
        &mut self,
        id: NoteId,
        shift: bool,
        now_ms: u64,
    ) -> Result<ClickOutcome, BoardError> {
        if self.store.get(id).is_none() {
            return Ok(ClickOutcome::Ignored);
        }

        if let Some((last_id, last_ms)) = self.last_click {
            if last_id == id && now_ms.saturating_sub(last_ms) < DOUBLE_CLICK_MS {
                self.last_click = None;
                self.toggle_minimize(id, now_ms);
                return Ok(ClickOutcome::MinimizeToggled);
            }
        }
        self.last_click = Some((id, now_ms));

        if shift {
            self.store.shift_toggle(id);
        } else {
            self.store.click_select(id);
        }

        // Front bump happens before the save is scheduled.
        self.store.bring_to_front(id);
        self.saves.schedule(SaveKey::Metadata, now_ms);
        Ok(ClickOutcome::Selected)
    }

    /// Clears the group selection (background click).
    pub fn background_click(&mut self, shift: bool) {
        if self.is_interacting() || shift {
            return;
        }
        self.store.clear_selection();
    }

    // --- Minimize / restore ---

    /// Toggles a note's minimized state. Returns the new state, or `None`
    /// for stale ids.
    ///
    /// Minimizing keeps `h` at the full height for restoration. Restoring
    /// marks the note as awaiting `commit_restore`; the percent+anchor
    /// recompute is deferred until the host's transition has finished so a
    /// transient height is never persisted.
    pub fn toggle_minimize(&mut self, id: NoteId, now_ms: u64) -> Option<bool> {
        let note = self.store.get_mut(id)?;
        note.minimized = !note.minimized;
        let minimized = note.minimized;

        if minimized {
            self.pending_restore.remove(&id);
        } else {
            self.pending_restore.insert(id);
        }
        self.saves.schedule(SaveKey::Metadata, now_ms);
        debug!("event=minimize_toggle module=service status=ok note={id} minimized={minimized}");
        Some(minimized)
    }

    /// Commits the final on-screen rectangle of a restored note.
    ///
    /// No-ops unless the note is actually awaiting a restore commit.
    pub fn commit_restore(
        &mut self,
        id: NoteId,
        final_rect: Rect,
        viewport: Viewport,
        now_ms: u64,
    ) {
        if !self.pending_restore.remove(&id) {
            return;
        }
        if let Some(note) = self.store.get_mut(id) {
            note.commit_rect(final_rect, viewport);
            self.saves.schedule(SaveKey::Metadata, now_ms);
        }
    }

    // --- Drag ---

    /// Starts a drag on a note. Returns false while another interaction is
    /// active or the id is stale.
    pub fn begin_drag(&mut self, id: NoteId, pointer: (f64, f64), viewport: Viewport) -> bool {
        if !matches!(self.interaction, Interaction::Idle) {
            return false;
        }
        let Some(note) = self.store.get(id) else {
            return false;
        };
        let rect = note.resolve_rect(viewport);

        let grouped = self.store.is_group_selected() && self.store.is_selected(id);
        let mut cluster = Vec::new();
        if grouped {
            for other in self.store.notes() {
                if other.id == id || !self.store.is_selected(other.id) {
                    continue;
                }
                let other_rect = other.resolve_rect(viewport);
                cluster.push(ClusterOffset {
                    id: other.id,
                    dx: other_rect.left - rect.left,
                    dy: other_rect.top - rect.top,
                    width: other_rect.width(),
                    height: other_rect.height(),
                });
            }
        }

        // Selected notes move with the drag, so they never act as targets.
        let snap_targets: Vec<Rect> = self
            .store
            .notes()
            .iter()
            .filter(|other| other.id != id && !self.store.is_selected(other.id))
            .map(|other| other.resolve_rect(viewport))
            .collect();

        self.interaction = Interaction::Drag(DragSession::begin(
            id,
            rect,
            pointer,
            snap_targets,
            cluster,
            viewport,
        ));
        true
    }

    /// Resolves one drag frame from the latest pointer coordinates.
    ///
    /// Pure with respect to the store; the host paints the returned rects
    /// and the final geometry is committed on `end_drag`.
    pub fn drag_frame(&self, pointer: (f64, f64)) -> Option<DragFrame> {
        match &self.interaction {
            Interaction::Drag(session) => Some(session.frame(pointer)),
            _ => None,
        }
    }

    /// Ends the active drag, committing re-anchored positions for the
    /// dragged note and every cluster follower. Returns false when no drag
    /// was active.
    pub fn end_drag(&mut self, pointer: (f64, f64), now_ms: u64) -> bool {
        let Interaction::Drag(session) = std::mem::replace(&mut self.interaction, Interaction::Idle)
        else {
            return false;
        };
        let viewport = session.viewport();
        let frame = session.frame(pointer);

        if let Some(note) = self.store.get_mut(session.note_id()) {
            note.reanchor_to(frame.anchor, viewport);
        }
        for (follower_id, follower_rect) in &frame.followers {
            if let Some(note) = self.store.get_mut(*follower_id) {
                note.reanchor_to(*follower_rect, viewport);
            }
        }

        self.saves.schedule(SaveKey::Metadata, now_ms);
        debug!(
            "event=drag_end module=service status=ok note={} followers={}",
            session.note_id(),
            frame.followers.len()
        );
        true
    }

    // --- Resize ---

    /// Starts a resize on a note. One note at a time; returns false while
    /// any interaction is active or the id is stale.
    pub fn begin_resize(
        &mut self,
        id: NoteId,
        direction: ResizeDirection,
        pointer: (f64, f64),
        viewport: Viewport,
    ) -> bool {
        if !matches!(self.interaction, Interaction::Idle) {
            return false;
        }
        let Some(note) = self.store.get(id) else {
            return false;
        };
        let rect = note.resolve_rect(viewport);
        self.interaction =
            Interaction::Resize(ResizeSession::begin(id, rect, direction, pointer, viewport));
        true
    }

    /// Resolves one resize frame from the latest pointer coordinates.
    pub fn resize_frame(&self, pointer: (f64, f64)) -> Option<Rect> {
        match &self.interaction {
            Interaction::Resize(session) => Some(session.frame(pointer)),
            _ => None,
        }
    }

    /// Ends the active resize, committing the constrained size and the
    /// re-anchored position. Returns false when no resize was active.
    pub fn end_resize(&mut self, pointer: (f64, f64), now_ms: u64) -> bool {
        let Interaction::Resize(session) =
            std::mem::replace(&mut self.interaction, Interaction::Idle)
        else {
            return false;
        };
        let rect = session.frame(pointer);
        if let Some(note) = self.store.get_mut(session.note_id()) {
            note.commit_rect(rect, session.viewport());
        }
        self.saves.schedule(SaveKey::Metadata, now_ms);
        debug!(
            "event=resize_end module=service status=ok note={}",
            session.note_id()
        );
        true
    }

    // --- Text and preferences ---

    /// Latest text for a note: a pending debounced edit wins over storage.
    pub fn note_text(&self, id: NoteId) -> RepoResult<String> {
        if let Some(pending) = self.pending_texts.get(&id) {
            return Ok(pending.clone());
        }
        self.repo.load_text(id)
    }

    /// Records a text edit and schedules its per-note debounced save.
    pub fn set_note_text(&mut self, id: NoteId, text: impl Into<String>, now_ms: u64) {
        if self.store.get(id).is_none() {
            return;
        }
        self.pending_texts.insert(id, text.into());
        self.saves.schedule(SaveKey::Content(id), now_ms);
    }

    /// Persists the font-size preference immediately (not debounced).
    pub fn set_font_size(&mut self, size: FontSize) -> Result<(), BoardError> {
        self.font_size = size;
        self.repo.save_font_size(size)?;
        Ok(())
    }

    // --- Persistence pump ---

    /// Writes out every debounced save whose idle window has elapsed.
    /// Returns the number of writes performed.
    pub fn flush(&mut self, now_ms: u64) -> Result<usize, BoardError> {
        let due = self.saves.due(now_ms);
        let count = due.len();
        self.write_keys(due)?;
        Ok(count)
    }

    /// Writes out every pending save regardless of deadline; teardown path.
    pub fn flush_all(&mut self) -> Result<usize, BoardError> {
        let due = self.saves.drain_all();
        let count = due.len();
        self.write_keys(due)?;
        Ok(count)
    }

    fn write_keys(&mut self, keys: Vec<SaveKey>) -> Result<(), BoardError> {
        for key in keys {
            match key {
                SaveKey::Metadata => self.repo.save_notes(self.store.notes())?,
                SaveKey::Content(id) => {
                    if let Some(text) = self.pending_texts.remove(&id) {
                        self.repo.save_text(id, &text)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// True when a metadata or content save is still waiting on its window.
    pub fn has_pending_saves(&self) -> bool {
        !self.saves.is_empty()
    }
}
