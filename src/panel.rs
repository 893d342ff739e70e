use crate::{
    errors::ContextStoreResult,
    store::ContextStore,
    types::{AddContextRequest, Category, ContextEntry},
};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Message shown when the initial fetch fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load context. Please try again later.";

/// The load lifecycle of the panel. `Loading` only ever applies to the
/// initial fetch, never to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

/// What the render layer should show, one branch per phase so the branches
/// stay mutually exclusive: no list or form while loading or failed, and
/// the list plus entry form (even when the list is empty) once ready.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderView {
    Loading,
    Failed {
        message: String,
    },
    Ready {
        entries: Vec<ContextEntry>,
        draft_text: String,
        draft_category: Category,
    },
}

struct PanelState {
    entries: Vec<ContextEntry>,
    draft_text: String,
    draft_category: Category,
    phase: Phase,
    last_error: Option<String>,
}

impl PanelState {
    fn view(&self) -> RenderView {
        match self.phase {
            Phase::Loading => RenderView::Loading,
            Phase::Failed => RenderView::Failed {
                message: self.last_error.clone().unwrap_or_default(),
            },
            Phase::Ready => RenderView::Ready {
                entries: self.entries.clone(),
                draft_text: self.draft_text.clone(),
                draft_category: self.draft_category,
            },
        }
    }
}

/// The context synchronization component.
///
/// Holds the authoritative local view of the user's context entries, seeded
/// from the remote store and extended by acknowledged submissions, and
/// publishes a [`RenderView`] snapshot through a watch channel after every
/// mutation. State lives only as long as the panel; a remount starts over
/// from the store.
pub struct ContextPanel {
    store: Arc<dyn ContextStore>,
    state: Mutex<PanelState>,
    changes: watch::Sender<RenderView>,
}

impl ContextPanel {
    #[must_use]
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        let (changes, _) = watch::channel(RenderView::Loading);
        Self {
            store,
            state: Mutex::new(PanelState {
                entries: Vec::new(),
                draft_text: String::new(),
                draft_category: Category::default(),
                phase: Phase::Loading,
                last_error: None,
            }),
            changes,
        }
    }

    /// Load the existing collection from the store. Runs exactly once when
    /// the panel becomes active; a failure degrades to an empty list with a
    /// persistent message and is not retried.
    pub async fn initial_load(&self) {
        self.update(|state| {
            state.phase = Phase::Loading;
            state.last_error = None;
        });
        match self.store.fetch_all().await {
            Ok(entries) => {
                self.update(move |state| {
                    state.entries = entries;
                    state.phase = Phase::Ready;
                });
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load context");
                self.update(|state| {
                    state.entries = Vec::new();
                    state.phase = Phase::Failed;
                    state.last_error = Some(LOAD_FAILED_MESSAGE.to_string());
                });
            }
        }
    }

    /// Bind the entry form's text field.
    pub fn set_draft_text<S: Into<String>>(&self, text: S) {
        let text = text.into();
        self.update(move |state| state.draft_text = text);
    }

    /// Bind the entry form's category selector. The selection is sticky: a
    /// successful submission keeps it for the next entry.
    pub fn set_draft_category(&self, category: Category) {
        self.update(move |state| state.draft_category = category);
    }

    /// Submit the current draft to the store.
    ///
    /// A blank or whitespace-only draft is a no-op: no request is sent and
    /// no state changes. On failure the returned error carries the reason
    /// for the caller to present as a blocking alert, and the draft is left
    /// intact for retry; nothing is appended until the store has
    /// acknowledged the entry. Never changes the phase, so the list stays
    /// interactive while a submission is in flight.
    pub async fn submit(&self) -> ContextStoreResult<()> {
        let request = {
            let state = self.state.lock().expect("panel state poisoned");
            if state.draft_text.trim().is_empty() {
                return Ok(());
            }
            AddContextRequest {
                text: state.draft_text.clone(),
                category: state.draft_category,
            }
        };
        match self.store.add(&request).await {
            Ok(entry) => {
                self.update(move |state| {
                    state.entries.push(entry);
                    state.draft_text.clear();
                });
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to add context entry");
                Err(error)
            }
        }
    }

    /// Change notification for the render layer. The receiver always holds
    /// the latest snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RenderView> {
        self.changes.subscribe()
    }

    /// The current render snapshot.
    #[must_use]
    pub fn view(&self) -> RenderView {
        self.state.lock().expect("panel state poisoned").view()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.lock().expect("panel state poisoned").phase
    }

    /// Single update entry point. Every mutation funnels through here, so
    /// when submissions overlap, whichever response reaches the lock first
    /// is appended first (completion order, not invocation order).
    fn update<F: FnOnce(&mut PanelState)>(&self, mutate: F) {
        let mut state = self.state.lock().expect("panel state poisoned");
        mutate(&mut state);
        let view = state.view();
        drop(state);
        self.changes.send_replace(view);
    }
}
