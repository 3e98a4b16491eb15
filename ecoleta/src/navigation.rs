//! Pages of the application and the navigation history between them.

/// Page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page.
    Home,
    /// Registration of a new drop-off point.
    CreatePoint,
}

impl Route {
    /// Path of the page.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::CreatePoint => "/create-point",
        }
    }

    /// Finds the route by its path. Unknown paths lead to the home page.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/create-point" => Route::CreatePoint,
            _ => Route::Home,
        }
    }
}

/// Stack of visited routes. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<Route>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl History {
    /// Creates a history with a single entry.
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    /// Route currently shown.
    pub fn current(&self) -> Route {
        *self.entries.last().unwrap_or(&Route::Home)
    }

    /// Adds a new entry.
    pub fn push(&mut self, route: Route) {
        log::debug!("Navigating to {}", route.path());
        self.entries.push(route);
    }

    /// Replaces the current entry.
    pub fn replace(&mut self, route: Route) {
        log::debug!("Replacing current route with {}", route.path());
        self.entries.pop();
        self.entries.push(route);
    }

    /// Goes to the previous entry. Returns false if there is none.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, the history contains at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::CreatePoint.path(), "/create-point");
        assert_eq!(Route::from_path("/create-point/"), Route::CreatePoint);
        assert_eq!(Route::from_path("/unknown"), Route::Home);
    }

    #[test]
    fn push_and_back() {
        let mut history = History::default();
        history.push(Route::CreatePoint);
        assert_eq!(history.current(), Route::CreatePoint);

        assert!(history.back());
        assert_eq!(history.current(), Route::Home);
        assert!(!history.back());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn replace_does_not_grow() {
        let mut history = History::default();
        history.push(Route::CreatePoint);

        history.replace(Route::Home);

        assert_eq!(history.current(), Route::Home);
        assert_eq!(history.len(), 2);
    }
}
