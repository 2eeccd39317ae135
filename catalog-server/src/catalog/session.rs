//! Catalog Session State
//!
//! State container for a consumer showing one catalog at a time
//! (the client-rendered path): `Idle → Loading → {Loaded | Error}`.
//!
//! Each load issues a monotonically increasing generation token and a
//! completion only applies if its token is still the newest one, so a
//! slow response for a superseded slug can never overwrite the state of
//! a newer request. A failed load keeps no previous catalog around,
//! there is no last-good fallback.

use crate::catalog::resolver::{CatalogView, ResolveCatalog};

/// Token identifying one issued load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// Observable session phase
#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    Loading,
    Loaded(CatalogView),
    Error(String),
}

#[derive(Debug)]
pub struct CatalogSession {
    state: SessionState,
    generation: u64,
}

impl CatalogSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Currently loaded catalog, if any
    pub fn current(&self) -> Option<&CatalogView> {
        match &self.state {
            SessionState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Begin a load: transition to `Loading` and issue a fresh token
    ///
    /// Discards any previously loaded catalog immediately.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        self.state = SessionState::Loading;
        LoadToken(self.generation)
    }

    /// Apply a load completion
    ///
    /// Returns false (and leaves the state untouched) when the token is
    /// stale, i.e. a newer load has been issued since.
    pub fn complete(
        &mut self,
        token: LoadToken,
        result: Result<CatalogView, String>,
    ) -> bool {
        if token.0 != self.generation {
            tracing::debug!(
                stale = token.0,
                current = self.generation,
                "Discarding stale catalog load result"
            );
            return false;
        }
        self.state = match result {
            Ok(view) => SessionState::Loaded(view),
            Err(msg) => SessionState::Error(msg),
        };
        true
    }

    /// Convenience: resolve a slug and apply the result
    ///
    /// No automatic retry — on failure the caller re-issues the load.
    pub async fn load<R: ResolveCatalog>(&mut self, resolver: &R, slug: &str) {
        let token = self.begin_load();
        let result = resolver.resolve(slug).await.map_err(|e| e.to_string());
        self.complete(token, result);
    }
}

impl Default for CatalogSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Catalog;
    use crate::utils::{AppError, AppResult};
    use async_trait::async_trait;
    use chrono::Utc;

    fn view(slug: &str) -> CatalogView {
        let now = Utc::now();
        CatalogView {
            catalog: Catalog {
                id: None,
                name: slug.to_string(),
                slug: slug.to_string(),
                client_id: "client:test".into(),
                description: String::new(),
                logo: None,
                theme: None,
                created_at: now,
                updated_at: now,
            },
            products: Vec::new(),
        }
    }

    struct StubResolver;

    #[async_trait]
    impl ResolveCatalog for StubResolver {
        async fn resolve(&self, slug: &str) -> AppResult<CatalogView> {
            if slug == "missing" {
                Err(AppError::not_found("Catalog 'missing' not found"))
            } else {
                Ok(view(slug))
            }
        }
    }

    #[tokio::test]
    async fn load_success_reaches_loaded() {
        let mut session = CatalogSession::new();
        assert!(matches!(session.state(), SessionState::Idle));

        session.load(&StubResolver, "tienda-ejemplo").await;
        assert_eq!(session.current().unwrap().catalog.slug, "tienda-ejemplo");
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn load_failure_reaches_error_and_drops_previous() {
        let mut session = CatalogSession::new();
        session.load(&StubResolver, "tienda-ejemplo").await;
        assert!(session.current().is_some());

        session.load(&StubResolver, "missing").await;
        // Previous catalog is not retained as a fallback
        assert!(session.current().is_none());
        assert!(session.error().unwrap().contains("missing"));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut session = CatalogSession::new();

        let first = session.begin_load();
        let second = session.begin_load();

        // First (slow) response arrives after the second request was issued
        assert!(!session.complete(first, Ok(view("stale"))));
        assert!(session.is_loading());

        assert!(session.complete(second, Ok(view("fresh"))));
        assert_eq!(session.current().unwrap().catalog.slug, "fresh");
    }

    #[test]
    fn stale_error_cannot_clobber_newer_result() {
        let mut session = CatalogSession::new();

        let first = session.begin_load();
        let second = session.begin_load();
        assert!(session.complete(second, Ok(view("fresh"))));

        assert!(!session.complete(first, Err("timeout".into())));
        assert_eq!(session.current().unwrap().catalog.slug, "fresh");
    }

    #[test]
    fn begin_load_discards_loaded_state() {
        let mut session = CatalogSession::new();
        let token = session.begin_load();
        session.complete(token, Ok(view("a")));

        session.begin_load();
        assert!(session.is_loading());
        assert!(session.current().is_none());
    }
}
