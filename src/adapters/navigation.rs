//! Navigator adapters.
//!
//! - `LoggingNavigator` - logs requests; the development shell uses it, since
//!   the browser-side router performs the actual route change
//! - `RecordingNavigator` - keeps every request so tests can assert on them

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::domain::access::Route;
use crate::ports::Navigator;

/// Stateless navigator that only logs the requested route.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, to: Route) {
        debug!(route = %to, "Navigation requested");
    }
}

/// Records every requested route. The history is unbounded.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: RwLock<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested route, oldest first.
    pub fn history(&self) -> Vec<Route> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, to: Route) {
        debug!(route = %to, "Navigation recorded");
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn records_in_order() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.last(), None);

        navigator.navigate(Route::Dashboard);
        navigator.navigate(Route::Home);

        assert_eq!(navigator.history(), vec![Route::Dashboard, Route::Home]);
        assert_eq!(navigator.last(), Some(Route::Home));
    }

    #[test]
    fn logging_navigator_keeps_no_history() {
        assert_eq!(std::mem::size_of::<LoggingNavigator>(), 0);

        let navigator: Arc<dyn Navigator> = Arc::new(LoggingNavigator);
        for _ in 0..1_000 {
            navigator.navigate(Route::Dashboard);
            navigator.navigate(Route::Home);
        }
    }
}
