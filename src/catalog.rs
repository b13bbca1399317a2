use crate::fetcher::RecipeFetcher;
use crate::model::RecipeCollection;
use crate::view::{self, ViewNode};
use log::{debug, error};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// What the catalog is currently showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Not mounted yet
    #[default]
    Idle,
    Loading,
    Loaded {
        recipes: RecipeCollection,
        /// Shown next to the recipes when the endpoint sent no usable data
        advisory: Option<String>,
    },
    Errored(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// The recipe catalog component.
///
/// The state is published through a watch channel. Only the load task
/// spawned by [`RecipeCatalog::refresh`] writes to it, and at most one such
/// task runs at a time.
pub struct RecipeCatalog {
    fetcher: Arc<RecipeFetcher>,
    state: Arc<watch::Sender<ViewState>>,
}

impl RecipeCatalog {
    pub fn new(fetcher: RecipeFetcher) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            fetcher: Arc::new(fetcher),
            state: Arc::new(state),
        }
    }

    /// Start the initial load. Does nothing once the catalog has been mounted.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        self.start_load(|state| matches!(state, ViewState::Idle))
    }

    /// Clear the current result and load again.
    ///
    /// Inert while a load is in flight: returns `None` and leaves the
    /// running load alone.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        self.start_load(|state| !state.is_loading())
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn endpoint(&self) -> &str {
        self.fetcher.endpoint()
    }

    /// Whether the refresh control accepts input
    pub fn can_refresh(&self) -> bool {
        !self.state.borrow().is_loading()
    }

    /// Wait until no load is in flight and return the state at that point
    pub async fn settled(&self) -> ViewState {
        let mut receiver = self.state.subscribe();
        let settled = match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close here
            Err(_) => self.state(),
        };
        settled
    }

    pub fn render(&self) -> ViewNode {
        view::render(&self.state.borrow(), self.endpoint())
    }

    fn start_load(&self, may_start: impl FnOnce(&ViewState) -> bool) -> Option<JoinHandle<()>> {
        let started = self.state.send_if_modified(|state| {
            if may_start(state) {
                *state = ViewState::Loading;
                true
            } else {
                false
            }
        });
        if !started {
            debug!("Load not started, catalog is {:?}", *self.state.borrow());
            return None;
        }

        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let next = match fetcher.fetch_recipes().await {
                Ok(outcome) => ViewState::Loaded {
                    recipes: outcome.recipes,
                    advisory: outcome.advisory,
                },
                Err(e) => {
                    error!("Error fetching recipes: {}", e);
                    ViewState::Errored(e.to_string())
                }
            };
            state.send_replace(next);
        }))
    }
}
