//! Refresh coordination.
//!
//! When a request comes back 401 the coordinator renews the credential pair
//! and replays the request. Concurrent 401s share one refresh exchange:
//! the first becomes the episode leader and later ones queue behind it.
//! When the exchange succeeds the new access token is handed to every
//! queued caller in the order it failed, and each caller replays its own
//! request. If the exchange fails, or the new pair cannot be saved, the
//! stored session is cleared, every queued caller is rejected with the same
//! error and the session notifier fires once.
//!
//! The episode state sits behind a synchronous mutex that is only held for
//! admission and settling, never across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::api::AuthApi;
use super::credentials::{CredentialPair, CredentialStore};
use super::decorator::authorize;
use crate::error::{AuthError, ClientError, ClientResult};
use crate::traits::{ApiRequest, HttpClient, Response, SessionNotifier, TeardownReason};

/// A caller suspended on the current episode, waiting for the new access
/// token or the episode's failure.
type Waiter = oneshot::Sender<Result<String, AuthError>>;

/// `None` while idle; the pending queue while an exchange is outstanding.
type EpisodeState = Option<Vec<Waiter>>;

enum Admission {
    /// The caller started the episode and must drive it.
    Lead,
    /// The caller joined a running episode.
    Queued(oneshot::Receiver<Result<String, AuthError>>),
}

/// Observable coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Refreshing { queued: usize },
}

/// Resets the coordinator if the leader's future is dropped before the
/// episode settles.
///
/// Dropping the queue drops every waiter's sender, so queued callers wake
/// with `RefreshAbandoned` instead of hanging.
struct EpisodeGuard<'a> {
    state: &'a Mutex<EpisodeState>,
    armed: bool,
}

impl<'a> EpisodeGuard<'a> {
    fn new(state: &'a Mutex<EpisodeState>) -> Self {
        Self { state, armed: true }
    }

    /// End the episode: return to idle and hand back the queue.
    fn settle(mut self) -> Vec<Waiter> {
        self.armed = false;
        lock(self.state).take().unwrap_or_default()
    }
}

impl Drop for EpisodeGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let abandoned = lock(self.state).take().unwrap_or_default();
            warn!(queued = abandoned.len(), "refresh episode abandoned");
        }
    }
}

fn lock(state: &Mutex<EpisodeState>) -> MutexGuard<'_, EpisodeState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Single-flight token refresh with request replay.
pub struct RefreshCoordinator {
    http: Arc<dyn HttpClient>,
    api: AuthApi,
    credentials: CredentialStore,
    notifier: Arc<dyn SessionNotifier>,
    state: Mutex<EpisodeState>,
}

impl RefreshCoordinator {
    pub fn new(
        http: Arc<dyn HttpClient>,
        api: AuthApi,
        credentials: CredentialStore,
        notifier: Arc<dyn SessionNotifier>,
    ) -> Self {
        Self {
            http,
            api,
            credentials,
            notifier,
            state: Mutex::new(None),
        }
    }

    /// Current state, for diagnostics and tests.
    pub fn state(&self) -> CoordinatorState {
        match lock(&self.state).as_ref() {
            None => CoordinatorState::Idle,
            Some(queue) => CoordinatorState::Refreshing {
                queued: queue.len(),
            },
        }
    }

    /// Recover from a 401 on `request`.
    ///
    /// Resolves to the replayed response (whatever its status) once the
    /// episode succeeds, or to the refresh failure if it does not.
    pub async fn recover(&self, request: ApiRequest) -> ClientResult<Response> {
        let token = self.renewed_token().await?;
        self.replay(request, &token).await
    }

    /// Refresh the credential pair outside a 401 episode.
    ///
    /// Joins the running episode if there is one.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        self.renewed_token().await.map(|_| ())
    }

    /// Lead a new episode or wait for the running one to settle.
    async fn renewed_token(&self) -> Result<String, AuthError> {
        match self.admit() {
            Admission::Lead => self.run_episode(EpisodeGuard::new(&self.state)).await,
            Admission::Queued(reply) => {
                debug!("queued behind in-flight token refresh");
                reply.await.unwrap_or(Err(AuthError::RefreshAbandoned))
            }
        }
    }

    /// Start an episode, or join the running one.
    fn admit(&self) -> Admission {
        let mut state = lock(&self.state);
        match state.as_mut() {
            Some(queue) => {
                let (tx, rx) = oneshot::channel();
                queue.push(tx);
                debug!(position = queue.len(), "joined refresh episode");
                Admission::Queued(rx)
            }
            None => {
                *state = Some(Vec::new());
                info!("access token rejected, refreshing session");
                Admission::Lead
            }
        }
    }

    /// Run the exchange, persist the new pair and settle the episode.
    ///
    /// Queued callers receive the new access token in queue order. On
    /// failure the session is torn down before anyone is released.
    async fn run_episode(&self, guard: EpisodeGuard<'_>) -> Result<String, AuthError> {
        let outcome = match self.exchange().await {
            Ok(pair) => self.persist(pair),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(token) => {
                let waiters = guard.settle();
                info!(queued = waiters.len(), "session refreshed");
                for waiter in waiters {
                    let _ = waiter.send(Ok(token.clone()));
                }
                Ok(token)
            }
            Err(err) => {
                if let Err(e) = self.credentials.clear() {
                    warn!(error = %e, "failed to clear stored credentials");
                }
                let waiters = guard.settle();
                warn!(error = %err, queued = waiters.len(), "session refresh failed");
                for waiter in waiters {
                    let _ = waiter.send(Err(err.clone()));
                }
                self.notifier
                    .session_terminated(&TeardownReason::RefreshFailed(err.clone()));
                Err(err)
            }
        }
    }

    async fn exchange(&self) -> Result<CredentialPair, AuthError> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .ok_or(AuthError::MissingRefreshToken)?;
        self.api.refresh_token(&refresh_token).await
    }

    /// Save the rotated pair. The old refresh token is spent at this point,
    /// so a pair that cannot be saved ends the session.
    fn persist(&self, pair: CredentialPair) -> Result<String, AuthError> {
        self.credentials
            .store_pair(&pair)
            .map_err(|e| AuthError::CredentialsSaveFailed {
                message: e.to_string(),
            })?;
        Ok(pair.access_token)
    }

    /// Re-issue `request` with `token`, marked so it is never recovered again.
    async fn replay(&self, request: ApiRequest, token: &str) -> ClientResult<Response> {
        let mut request = authorize(request, Some(token));
        request.mark_retried();
        debug!(method = %request.method, url = %request.url, "replaying request");
        self.http.execute(&request).await.map_err(ClientError::from)
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("state", &self.state())
            .finish()
    }
}
