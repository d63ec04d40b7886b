use crate::client::CatalogClient;
use crate::error::CatalogError;
use flicklog_models::{MovieDetail, MovieId};
use tracing::debug;

/// Request lifecycle for one detail fetch.
#[derive(Debug, Clone, PartialEq)]
enum FetchState {
    Idle,
    /// A request for this identifier is in flight.
    Pending(MovieId),
    /// The last request for this identifier completed.
    Settled(MovieId),
}

/// De-duplication and stale-response suppression around the detail fetch.
///
/// At most one request per distinct identifier is issued, even under rapid
/// re-invocation, and a response that arrives after the target has moved to
/// a different identifier never overwrites the newer target's data. The
/// state survives independent of any rendered view.
#[derive(Debug)]
pub struct DetailFetchGuard {
    target: Option<MovieId>,
    state: FetchState,
    detail: Option<MovieDetail>,
}

impl DetailFetchGuard {
    pub fn new() -> Self {
        Self {
            target: None,
            state: FetchState::Idle,
            detail: None,
        }
    }

    /// Point the guard at a new identifier: any displayed detail is cleared
    /// and the request trackers reset. A request already in flight for the
    /// previous target becomes an orphan whose completion is ignored.
    pub fn navigate(&mut self, id: MovieId) {
        debug!(%id, "detail target changed");
        self.target = Some(id);
        self.state = FetchState::Idle;
        self.detail = None;
    }

    /// Request entry point. Returns the identifier to fetch and marks it
    /// in flight, or None when a fetch is already pending, no target is
    /// set, or the last-requested identifier equals the current target.
    pub fn begin(&mut self) -> Option<MovieId> {
        let target = self.target.as_ref()?;
        match &self.state {
            FetchState::Pending(_) => None,
            FetchState::Settled(id) if id == target => None,
            _ => {
                let id = target.clone();
                self.state = FetchState::Pending(id.clone());
                Some(id)
            }
        }
    }

    /// Complete a request. The result is committed only when the settled
    /// identifier still equals the current target; the pending marker for
    /// this request is cleared either way so future requests are unblocked.
    /// Errors propagate to the caller with the guard back at Idle, so the
    /// next trigger can retry.
    pub fn settle(
        &mut self,
        id: MovieId,
        result: Result<MovieDetail, CatalogError>,
    ) -> Result<bool, CatalogError> {
        let owns_pending = matches!(&self.state, FetchState::Pending(p) if *p == id);

        match result {
            Ok(detail) => {
                if self.target.as_ref() == Some(&id) {
                    self.detail = Some(detail);
                    self.state = FetchState::Settled(id);
                    Ok(true)
                } else {
                    debug!(%id, "dropping stale detail response");
                    if owns_pending {
                        self.state = FetchState::Idle;
                    }
                    Ok(false)
                }
            }
            Err(e) => {
                if owns_pending {
                    self.state = FetchState::Idle;
                }
                Err(e)
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, FetchState::Pending(_))
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    /// Navigate to the identifier and run the guarded fetch to completion.
    pub async fn load(
        &mut self,
        client: &CatalogClient,
        id: MovieId,
    ) -> Result<Option<&MovieDetail>, CatalogError> {
        self.navigate(id);
        if let Some(in_flight) = self.begin() {
            let result = client.movie_detail(&in_flight).await;
            self.settle(in_flight, result)?;
        }
        Ok(self.detail())
    }
}

impl Default for DetailFetchGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: u64, title: &str) -> MovieDetail {
        MovieDetail {
            id: MovieId::from(id),
            title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            genres: Vec::new(),
        }
    }

    #[test]
    fn no_target_means_no_request() {
        let mut guard = DetailFetchGuard::new();
        assert!(guard.begin().is_none());
    }

    #[test]
    fn repeated_triggers_issue_exactly_one_request() {
        let mut guard = DetailFetchGuard::new();
        guard.navigate(MovieId::from(603u64));

        assert_eq!(guard.begin(), Some(MovieId::from(603u64)));
        // Effect re-firing while the fetch is pending.
        assert!(guard.begin().is_none());
        assert!(guard.is_pending());

        guard
            .settle(MovieId::from(603u64), Ok(detail(603, "The Matrix")))
            .unwrap();
        // Already settled for the same identifier: still no new request.
        assert!(guard.begin().is_none());
        assert_eq!(guard.detail().unwrap().title, "The Matrix");
    }

    #[test]
    fn stale_response_never_overwrites_the_newer_target() {
        let mut guard = DetailFetchGuard::new();
        guard.navigate(MovieId::from("A"));
        let a = guard.begin().unwrap();

        // User navigates to B before A's response arrives.
        guard.navigate(MovieId::from("B"));
        let b = guard.begin().unwrap();

        // A's late response: dropped, no commit.
        let committed = guard.settle(a, Ok(detail(1, "Movie A"))).unwrap();
        assert!(!committed);
        assert!(guard.detail().is_none());
        // B is still in flight and must not have been cancelled by A.
        assert!(guard.is_pending());

        let committed = guard.settle(b, Ok(detail(2, "Movie B"))).unwrap();
        assert!(committed);
        assert_eq!(guard.detail().unwrap().title, "Movie B");
    }

    #[test]
    fn stale_suppression_holds_regardless_of_response_order() {
        let mut guard = DetailFetchGuard::new();
        guard.navigate(MovieId::from("A"));
        let a = guard.begin().unwrap();
        guard.navigate(MovieId::from("B"));
        let b = guard.begin().unwrap();

        // B responds first, then A trickles in.
        guard.settle(b, Ok(detail(2, "Movie B"))).unwrap();
        guard.settle(a, Ok(detail(1, "Movie A"))).unwrap();

        assert_eq!(guard.detail().unwrap().title, "Movie B");
    }

    #[test]
    fn failure_clears_pending_so_retry_is_possible() {
        let mut guard = DetailFetchGuard::new();
        guard.navigate(MovieId::from(603u64));
        let id = guard.begin().unwrap();

        let err = guard
            .settle(id, Err(CatalogError::Malformed("bad payload".to_string())))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
        assert!(!guard.is_pending());
        assert!(guard.detail().is_none());

        // Next trigger can retry the same identifier.
        assert_eq!(guard.begin(), Some(MovieId::from(603u64)));
    }

    #[test]
    fn navigation_clears_previously_displayed_detail() {
        let mut guard = DetailFetchGuard::new();
        guard.navigate(MovieId::from("A"));
        let a = guard.begin().unwrap();
        guard.settle(a, Ok(detail(1, "Movie A"))).unwrap();
        assert!(guard.detail().is_some());

        guard.navigate(MovieId::from("B"));
        assert!(guard.detail().is_none());
    }

    #[test]
    fn renavigating_to_the_same_id_refetches() {
        // Navigation always resets the trackers, even for the same id; the
        // reset is what makes the pending flag safe to rely on.
        let mut guard = DetailFetchGuard::new();
        guard.navigate(MovieId::from("A"));
        let a = guard.begin().unwrap();
        guard.settle(a, Ok(detail(1, "Movie A"))).unwrap();

        guard.navigate(MovieId::from("A"));
        assert_eq!(guard.begin(), Some(MovieId::from("A")));
    }
}
