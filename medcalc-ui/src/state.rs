//! Application state for the calculator front end.
//!
//! Ties the parameter store to the fetcher: projection edits are forwarded
//! to the fetcher, display edits only change what the next render shows.
//! Nothing here performs I/O; the event loop in [`crate::app`] sends the
//! tickets returned by these methods.

use medcalc_core::{
    ChangeScope, FetchState, FetchTicket, ParamEdit, ParameterStore, ProjectionFetcher,
    RawYearRow, RequestToken, Resolution, ServiceError, View,
    calculations::DEFAULT_INDEX_COLUMNS,
};

/// How result rows are presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Columns shown as-is rather than adjusted.
    pub index_columns: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            index_columns: DEFAULT_INDEX_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    store: ParameterStore,
    fetcher: ProjectionFetcher,
    display: DisplayConfig,
}

impl AppState {
    pub fn new(
        store: ParameterStore,
        display: DisplayConfig,
    ) -> Self {
        Self {
            store,
            fetcher: ProjectionFetcher::new(),
            display,
        }
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn index_columns(&self) -> &[String] {
        &self.display.index_columns
    }

    pub fn fetch_state(&self) -> &FetchState {
        self.fetcher.state()
    }

    /// Initial fetch for the starting inputs.
    pub fn mount(&mut self) -> Option<FetchTicket> {
        self.fetcher.observe(self.store.inputs())
    }

    /// Apply one edit; returns a ticket when a new request must be sent.
    pub fn edit(
        &mut self,
        edit: ParamEdit,
    ) -> Option<FetchTicket> {
        match self.store.apply(edit) {
            ChangeScope::Projection => self.fetcher.observe(self.store.inputs()),
            ChangeScope::Display => None,
        }
    }

    pub fn retry(&mut self) -> FetchTicket {
        self.fetcher.retry(self.store.inputs())
    }

    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: Result<Vec<RawYearRow>, ServiceError>,
    ) -> Resolution {
        self.fetcher.resolve(token, result)
    }

    /// What the results area shows right now.
    pub fn view(&self) -> View {
        View::from_state(
            self.fetcher.state(),
            self.store.factors(),
            self.store.inputs().number_of_years,
            &self.display.index_columns,
        )
    }
}
