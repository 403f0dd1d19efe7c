//! Identity session cache
//!
//! Maintains an always-current view of "who is logged in and what are
//! they allowed to do", surviving reloads without waiting on a network
//! round trip. The profile half is seeded synchronously from the local
//! cache at construction; afterwards the service reacts to the identity
//! provider's auth-state notifications, looking the profile up by
//! lower-cased email on every sign-in.
//!
//! Notifications can overlap: a new notification may arrive before a
//! previous one's backend lookup resolves. Each notification takes a
//! monotonically increasing epoch when it is received; a lookup result is
//! applied only if its epoch is still the newest, so stale resolutions
//! are discarded instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hubgate_domain::{Principal, Profile, Session};
use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::ports::{IdentityProvider, ProfileCache};
use crate::iam::ports::ProfileRepository;

/// Identity session cache service.
///
/// Single writer of session state; everything else reads snapshots.
/// Reads are synchronous — the only suspension point is the profile
/// lookup triggered by an auth notification.
pub struct SessionService {
    inner: Arc<SessionInner>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

struct SessionInner {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    cache: Arc<dyn ProfileCache>,
    state: RwLock<Session>,
    epoch: AtomicU64,
}

impl SessionService {
    /// Create the service, seeding the profile half from the local cache.
    ///
    /// Cache read failures are tolerated: the session simply starts
    /// without a profile.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        cache: Arc<dyn ProfileCache>,
    ) -> Self {
        let mut session = Session::unauthenticated();
        match cache.load() {
            Ok(Some(profile)) => session.profile = Some(profile),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to read cached profile; starting empty"),
        }

        Self {
            inner: Arc::new(SessionInner {
                identity,
                profiles,
                cache,
                state: RwLock::new(session),
                epoch: AtomicU64::new(0),
            }),
            listener: Mutex::new(None),
        }
    }

    /// Subscribe to the identity provider's notification stream and start
    /// the background listener.
    ///
    /// Each notification is resolved on its own task so a slow profile
    /// lookup never delays later notifications.
    pub fn attach(&self) {
        let mut rx = self.inner.identity.subscribe();
        let inner = Arc::clone(&self.inner);

        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        // Epoch assignment happens here, in arrival order.
                        let seq = inner.begin(event.as_ref());
                        let worker = Arc::clone(&inner);
                        tokio::spawn(async move {
                            worker.finish(seq, event).await;
                        });
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "auth notifications lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        *self.listener.lock() = Some(handle);
    }

    /// Stop the background listener.
    pub fn detach(&self) {
        if let Some(handle) = self.listener.lock().take() {
            handle.abort();
        }
    }

    /// Handle one auth notification end to end.
    ///
    /// `attach` drives this from the subscription; tests and the sign-in
    /// flow may call it directly.
    pub async fn notify(&self, principal: Option<Principal>) {
        let seq = self.inner.begin(principal.as_ref());
        self.inner.finish(seq, principal).await;
    }

    /// Push fresh values after a successful credential check, avoiding a
    /// redundant profile round trip. Supersedes any in-flight lookups.
    pub fn set_authenticated(&self, principal: Principal, profile: Profile) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);

        {
            let mut state = self.inner.state.write();
            state.principal = Some(principal);
            state.profile = Some(profile.clone());
            state.loading = false;
        }

        if let Err(err) = self.inner.cache.store(&profile) {
            warn!(error = %err, "failed to persist profile to local cache");
        }
    }

    /// Snapshot of the current session state
    #[must_use]
    pub fn session(&self) -> Session {
        self.inner.state.read().clone()
    }

    /// Current principal, if any
    #[must_use]
    pub fn principal(&self) -> Option<Principal> {
        self.inner.state.read().principal.clone()
    }

    /// Current profile, if any
    #[must_use]
    pub fn profile(&self) -> Option<Profile> {
        self.inner.state.read().profile.clone()
    }

    /// Whether a profile lookup is still in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.read().loading
    }
}

impl SessionInner {
    /// Synchronous prefix of notification handling: assign the epoch in
    /// arrival order and reflect the principal change immediately.
    fn begin(&self, principal: Option<&Principal>) -> u64 {
        let seq = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write();

        match principal {
            Some(principal) => {
                state.principal = Some(principal.clone());
                state.loading = true;
            }
            None => {
                // Signed out: nothing asynchronous left to resolve.
                state.principal = None;
                state.profile = None;
                state.loading = false;
                drop(state);
                if let Err(err) = self.cache.clear() {
                    warn!(error = %err, "failed to clear cached profile on sign-out");
                }
            }
        }

        seq
    }

    /// Asynchronous remainder: resolve the profile lookup and apply it if
    /// this notification is still the newest.
    async fn finish(&self, seq: u64, principal: Option<Principal>) {
        let Some(principal) = principal else {
            return; // sign-out already applied in `begin`
        };

        let lookup = self.profiles.find_by_email(&principal.email.to_lowercase()).await;

        if self.epoch.load(Ordering::SeqCst) != seq {
            debug!(email = %principal.email, "discarding stale profile lookup");
            return;
        }

        match lookup {
            Ok(Some(profile)) => {
                {
                    let mut state = self.state.write();
                    if self.epoch.load(Ordering::SeqCst) != seq {
                        return;
                    }
                    state.profile = Some(profile.clone());
                    state.loading = false;
                }
                if let Err(err) = self.cache.store(&profile) {
                    warn!(error = %err, "failed to persist profile to local cache");
                }
            }
            Ok(None) => {
                // Authenticated but not provisioned.
                {
                    let mut state = self.state.write();
                    if self.epoch.load(Ordering::SeqCst) != seq {
                        return;
                    }
                    state.profile = None;
                    state.loading = false;
                }
                if let Err(err) = self.cache.clear() {
                    warn!(error = %err, "failed to clear cached profile");
                }
            }
            Err(err) => {
                // Stale-but-available beats blocking: keep whatever profile
                // is already in memory and in the cache.
                warn!(error = %err, email = %principal.email, "profile sync failed; keeping cached profile");
                let mut state = self.state.write();
                if self.epoch.load(Ordering::SeqCst) != seq {
                    return;
                }
                state.loading = false;
            }
        }
    }
}

impl Drop for SessionService {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.lock().take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("session", &self.session())
            .field("epoch", &self.inner.epoch.load(Ordering::SeqCst))
            .finish()
    }
}
