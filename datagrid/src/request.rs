//! Layout requests: what to ask the server for after a layout change.

use url::Url;

/// Marker asking the server for the grid fragment instead of a full page.
pub const GRID_ONLY_PARAM: &str = "gridonly";
/// Identifies which grid on the page to render.
pub const GRID_ID_PARAM: &str = "datagrid-id";
/// Comma-separated visible column order.
pub const COLUMNS_PARAM: &str = "columns";
/// Cache-busting token.
pub const CACHE_BUSTER_PARAM: &str = "_";

/// A request to re-render a grid on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRequest {
    /// Grid element id.
    pub grid_id: String,
    /// New column order. `None` leaves the page's columns parameter as is.
    pub columns: Option<String>,
    /// Replace the whole grid with the response, rather than only
    /// refreshing the header split.
    pub full_reload: bool,
}

impl LayoutRequest {
    /// Request a new column layout.
    pub fn column_change(
        grid_id: impl Into<String>,
        columns: impl Into<String>,
        full_reload: bool,
    ) -> Self {
        Self {
            grid_id: grid_id.into(),
            columns: Some(columns.into()),
            full_reload,
        }
    }

    /// Request a full reload with the columns unchanged.
    pub fn reload(grid_id: impl Into<String>) -> Self {
        Self {
            grid_id: grid_id.into(),
            columns: None,
            full_reload: true,
        }
    }

    /// Build the request URL from the current page location.
    ///
    /// Existing query parameters (pagination, sorting, filters) are kept in
    /// order. Parameters this request sets are replaced rather than repeated.
    /// The fragment is dropped.
    pub fn url(&self, location: &Url) -> Url {
        self.build_url(location, None)
    }

    /// Like [`LayoutRequest::url`], with a cache-busting token.
    pub fn url_with_cache_buster(&self, location: &Url, token: &str) -> Url {
        self.build_url(location, Some(token))
    }

    fn build_url(&self, location: &Url, cache_buster: Option<&str>) -> Url {
        let replaced = |key: &str| {
            key == GRID_ONLY_PARAM
                || key == GRID_ID_PARAM
                || (key == COLUMNS_PARAM && self.columns.is_some())
                || (key == CACHE_BUSTER_PARAM && cache_buster.is_some())
        };
        let kept: Vec<(String, String)> = location
            .query_pairs()
            .filter(|(key, _)| !replaced(key))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut url = location.clone();
        url.set_fragment(None);
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.extend_pairs(kept);
            query.append_pair(GRID_ONLY_PARAM, "1");
            query.append_pair(GRID_ID_PARAM, &self.grid_id);
            if let Some(columns) = &self.columns {
                query.append_pair(COLUMNS_PARAM, columns);
            }
            if let Some(token) = cache_buster {
                query.append_pair(CACHE_BUSTER_PARAM, token);
            }
        }
        url
    }
}
