//! In-memory mock for the `IdentityProvider` port.
//!
//! Keeps an email→(secret, uid) account table, tracks the active session,
//! and pushes auth notifications through a broadcast channel exactly like
//! the hosted provider: sign-in and account creation both switch the
//! active session.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use hubgate_domain::{HubgateError, Principal, Result};
use hubgate_core::IdentityProvider;
use tokio::sync::broadcast;

struct Account {
    secret: String,
    uid: String,
}

/// Deterministic in-memory identity provider.
pub struct MockIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<Principal>>,
    events: broadcast::Sender<Option<Principal>>,
    /// While positive, `authenticate` fails and decrements.
    authenticate_failures: Mutex<u32>,
    next_uid: Mutex<u32>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            events,
            authenticate_failures: Mutex::new(0),
            next_uid: Mutex::new(1),
        }
    }

    /// Register an account without signing anyone in.
    pub fn seed_account(&self, email: &str, secret: &str) -> Principal {
        let uid = self.allocate_uid();
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account { secret: secret.to_string(), uid: uid.clone() },
        );
        Principal { uid, email: email.to_string() }
    }

    /// Make the next `n` authenticate calls fail.
    pub fn fail_next_authenticate(&self, n: u32) {
        *self.authenticate_failures.lock().unwrap() = n;
    }

    /// Whether an account exists for the email.
    pub fn has_account(&self, email: &str) -> bool {
        self.accounts.lock().unwrap().contains_key(email)
    }

    fn allocate_uid(&self) -> String {
        let mut next = self.next_uid.lock().unwrap();
        let uid = format!("uid-{}", *next);
        *next += 1;
        uid
    }

    fn switch_session(&self, principal: Principal) {
        *self.current.lock().unwrap() = Some(principal.clone());
        let _ = self.events.send(Some(principal));
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Principal> {
        {
            let mut failures = self.authenticate_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(HubgateError::Network("identity provider unreachable".into()));
            }
        }

        let principal = {
            let accounts = self.accounts.lock().unwrap();
            let account = accounts
                .get(email)
                .filter(|account| account.secret == secret)
                .ok_or_else(|| HubgateError::Auth("invalid credentials".into()))?;
            Principal { uid: account.uid.clone(), email: email.to_string() }
        };

        self.switch_session(principal.clone());
        Ok(principal)
    }

    async fn create_principal(&self, email: &str, secret: &str) -> Result<Principal> {
        let principal = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(HubgateError::Auth("email already in use".into()));
            }
            let uid = self.allocate_uid();
            accounts
                .insert(email.to_string(), Account { secret: secret.to_string(), uid: uid.clone() });
            Principal { uid, email: email.to_string() }
        };

        // The documented side effect: the active session switches to the
        // freshly created principal.
        self.switch_session(principal.clone());
        Ok(principal)
    }

    async fn delete_principal(&self, principal: &Principal) -> Result<()> {
        let removed = self.accounts.lock().unwrap().remove(&principal.email);
        if removed.is_none() {
            return Err(HubgateError::NotFound(format!("no account for {}", principal.email)));
        }

        let mut current = self.current.lock().unwrap();
        if current.as_ref().is_some_and(|p| p.uid == principal.uid) {
            *current = None;
            let _ = self.events.send(None);
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        *self.current.lock().unwrap() = None;
        let _ = self.events.send(None);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<Option<Principal>> {
        self.events.subscribe()
    }

    fn current_principal(&self) -> Option<Principal> {
        self.current.lock().unwrap().clone()
    }
}
