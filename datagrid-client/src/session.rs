//! Grid sessions: a grid bound to the page it came from

use std::sync::Arc;

use datagrid::{Grid, LayoutRequest};
use griddom::{Event, Rect};
use log::{debug, info, warn};
use url::Url;

use crate::error::Error;
use crate::fetch::Fetcher;

/// A grid together with the page location it is persisted through.
///
/// Requests take `&mut self`, so at most one request per grid is in flight
/// and responses are applied in the order they were requested.
///
/// # Example
///
/// ```ignore
/// let mut session = GridSession::builder()
///     .location(Url::parse("https://reviews.example.com/dashboard/")?)
///     .fetcher(HttpFetcher::new()?)
///     .open("dashboard")
///     .await?;
///
/// session.toggle_column("owner").await?;
/// ```
pub struct GridSession {
    grid: Grid,
    location: Url,
    fetcher: Arc<dyn Fetcher>,
}

impl GridSession {
    /// Creates a new builder for constructing a session.
    pub fn builder() -> GridSessionBuilder<Missing, Missing> {
        GridSessionBuilder::new()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The page location requests are built from.
    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn set_location(&mut self, location: Url) {
        self.location = location;
    }

    /// Reload the grid with its current columns.
    pub async fn reload(&mut self) -> Result<(), Error> {
        let request = self.grid.reload_request();
        self.execute(request).await
    }

    /// Ask the server to persist `columns` (comma-separated ids).
    ///
    /// With `full_reload` the grid is replaced by the response; otherwise the
    /// existing grid only re-runs its header split.
    pub async fn request_column_change(
        &mut self,
        columns: impl Into<String>,
        full_reload: bool,
    ) -> Result<(), Error> {
        let request = LayoutRequest::column_change(self.grid.id(), columns, full_reload);
        self.execute(request).await
    }

    /// Show `column` if hidden, hide it if shown.
    pub async fn toggle_column(&mut self, column: &str) -> Result<(), Error> {
        match self.grid.toggle_request(column) {
            Some(request) => self.execute(request).await,
            None => {
                debug!("grid {} is inert, ignoring toggle of {column}", self.grid.id());
                Ok(())
            }
        }
    }

    /// Feed an input event to the grid and send any request it produces.
    pub async fn dispatch(&mut self, event: &Event) -> Result<(), Error> {
        match self.grid.handle(event) {
            Some(request) => self.execute(request).await,
            None => Ok(()),
        }
    }

    /// Send a layout request and apply the response.
    ///
    /// On failure the grid is left as it was.
    pub async fn execute(&mut self, request: LayoutRequest) -> Result<(), Error> {
        let url = match request.columns {
            Some(_) => request.url(&self.location),
            None => {
                let token = chrono::Utc::now().timestamp_millis().to_string();
                request.url_with_cache_buster(&self.location, &token)
            }
        };

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("grid {}: layout request failed: {e}", request.grid_id);
                return Err(e.into());
            }
        };

        if request.full_reload {
            let fresh = match Grid::from_html(&body, &request.grid_id) {
                Ok(grid) => grid,
                Err(e) => {
                    warn!("grid {}: unusable response: {e}", request.grid_id);
                    return Err(e.into());
                }
            };
            let previous = std::mem::replace(&mut self.grid, fresh);
            self.grid.adopt(previous);
        } else {
            self.grid.resplit();
        }

        info!(
            "grid {} reloaded with columns {}",
            request.grid_id,
            self.grid.columns().join(",")
        );
        self.grid.emit_reloaded();
        Ok(())
    }
}

impl std::fmt::Debug for GridSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridSession")
            .field("grid", &self.grid)
            .field("location", &self.location.as_str())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`GridSession`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `location` - The page URL the grid lives on
/// - `fetcher` - A [`Fetcher`] implementation
pub struct GridSessionBuilder<Location, Fetch> {
    location: Location,
    fetcher: Fetch,
    viewport: Option<Rect>,
}

impl GridSessionBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            location: Missing,
            fetcher: Missing,
            viewport: None,
        }
    }
}

impl Default for GridSessionBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> GridSessionBuilder<Missing, F> {
    /// Sets the page location.
    pub fn location(self, location: Url) -> GridSessionBuilder<Set<Url>, F> {
        GridSessionBuilder {
            location: Set(location),
            fetcher: self.fetcher,
            viewport: self.viewport,
        }
    }
}

impl<L> GridSessionBuilder<L, Missing> {
    /// Sets the fetcher used for layout requests.
    pub fn fetcher<T: Fetcher + 'static>(
        self,
        fetcher: T,
    ) -> GridSessionBuilder<L, Set<Arc<dyn Fetcher>>> {
        GridSessionBuilder {
            location: self.location,
            fetcher: Set(Arc::new(fetcher) as Arc<dyn Fetcher>),
            viewport: self.viewport,
        }
    }
}

impl<L, F> GridSessionBuilder<L, F> {
    /// Sets the area the grid is laid out in.
    pub fn viewport(mut self, viewport: Rect) -> Self {
        self.viewport = Some(viewport);
        self
    }
}

impl GridSessionBuilder<Set<Url>, Set<Arc<dyn Fetcher>>> {
    /// Builds a session around a grid that is already loaded.
    pub fn attach(self, grid: Grid) -> GridSession {
        let grid = match self.viewport {
            Some(viewport) => grid.with_viewport(viewport),
            None => grid,
        };
        GridSession {
            grid,
            location: self.location.0,
            fetcher: self.fetcher.0,
        }
    }

    /// Fetches grid `grid_id` from the location and builds a session for it.
    pub async fn open(self, grid_id: &str) -> Result<GridSession, Error> {
        let url = LayoutRequest::reload(grid_id).url(&self.location.0);
        let body = self.fetcher.0.fetch(&url).await?;
        let grid = Grid::from_html(&body, grid_id)?;
        Ok(self.attach(grid))
    }
}
