//! Test doubles for the remote store boundary.

use std::{collections::VecDeque, sync::Mutex};

use crate::{
    errors::{ContextStoreError, ContextStoreResult},
    store::ContextStore,
    types::{AddContextRequest, ContextEntry},
};

/// Result for a mocked `fetch_all` call.
pub enum MockFetchResult {
    Entries(Vec<ContextEntry>),
    Error(ContextStoreError),
}

impl From<Vec<ContextEntry>> for MockFetchResult {
    fn from(entries: Vec<ContextEntry>) -> Self {
        Self::Entries(entries)
    }
}

impl From<ContextStoreError> for MockFetchResult {
    fn from(error: ContextStoreError) -> Self {
        Self::Error(error)
    }
}

/// Result for a mocked `add` call.
pub enum MockAddResult {
    Entry(ContextEntry),
    Error(ContextStoreError),
}

impl From<ContextEntry> for MockAddResult {
    fn from(entry: ContextEntry) -> Self {
        Self::Entry(entry)
    }
}

impl From<ContextStoreError> for MockAddResult {
    fn from(error: ContextStoreError) -> Self {
        Self::Error(error)
    }
}

#[derive(Default)]
struct MockContextStoreState {
    mocked_fetch_results: VecDeque<MockFetchResult>,
    mocked_add_results: VecDeque<MockAddResult>,
    tracked_fetch_calls: usize,
    tracked_add_requests: Vec<AddContextRequest>,
}

/// A mock context store for testing that tracks requests and yields
/// predefined outcomes.
#[derive(Default)]
pub struct MockContextStore {
    state: Mutex<MockContextStoreState>,
}

impl MockContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a mocked fetch result.
    pub fn enqueue_fetch<R: Into<MockFetchResult>>(&self, result: R) -> &Self {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_fetch_results.push_back(result.into());
        drop(state);
        self
    }

    /// Enqueue a mocked add result.
    pub fn enqueue_add<R: Into<MockAddResult>>(&self, result: R) -> &Self {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_add_results.push_back(result.into());
        drop(state);
        self
    }

    /// Number of `fetch_all` calls seen so far.
    pub fn fetch_calls(&self) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_fetch_calls
    }

    /// The add requests seen so far, in arrival order.
    pub fn tracked_add_requests(&self) -> Vec<AddContextRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_add_requests.clone()
    }
}

#[async_trait::async_trait]
impl ContextStore for MockContextStore {
    async fn fetch_all(&self) -> ContextStoreResult<Vec<ContextEntry>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_fetch_calls += 1;

        let result = state.mocked_fetch_results.pop_front().ok_or_else(|| {
            ContextStoreError::Rejected("no mocked fetch results available".into())
        })?;

        match result {
            MockFetchResult::Entries(entries) => Ok(entries),
            MockFetchResult::Error(error) => Err(error),
        }
    }

    async fn add(&self, request: &AddContextRequest) -> ContextStoreResult<ContextEntry> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_add_requests.push(request.clone());

        let result = state
            .mocked_add_results
            .pop_front()
            .ok_or_else(|| ContextStoreError::Rejected("no mocked add results available".into()))?;

        match result {
            MockAddResult::Entry(entry) => Ok(entry),
            MockAddResult::Error(error) => Err(error),
        }
    }
}
