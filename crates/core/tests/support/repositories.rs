//! In-memory mocks for the repository and cache ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hubgate_core::{ProfileCache, ProfileRepository, RegistrationRepository};
use hubgate_domain::{HubgateError, Profile, RegistrationRequest, Result};

/// In-memory mock for `ProfileRepository`.
///
/// Keyed by principal uid, with failure injection for create/lookup and a
/// configurable per-email lookup delay for overlap tests.
#[derive(Default)]
pub struct MockProfileRepository {
    profiles: Mutex<HashMap<String, Profile>>,
    fail_create: AtomicBool,
    fail_lookup: AtomicBool,
    lookup_delays: Mutex<HashMap<String, Duration>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with a profile.
    pub fn with_profile(self, profile: Profile) -> Self {
        self.profiles.lock().unwrap().insert(profile.uid.clone(), profile);
        self
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_lookup(&self, fail: bool) {
        self.fail_lookup.store(fail, Ordering::SeqCst);
    }

    /// Delay `find_by_email` for one email; lets tests overlap lookups.
    pub fn delay_lookup(&self, email: &str, delay: Duration) {
        self.lookup_delays.lock().unwrap().insert(email.to_string(), delay);
    }

    pub fn count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.profiles.lock().unwrap().values().any(|p| p.email == email)
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let delay = self.lookup_delays.lock().unwrap().get(email).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(HubgateError::Network("document store unreachable".into()));
        }

        Ok(self.profiles.lock().unwrap().values().find(|p| p.email == email).cloned())
    }

    async fn get(&self, uid: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.lock().unwrap().get(uid).cloned())
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        Ok(self.profiles.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, profile: Profile) -> Result<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(HubgateError::Backend("write rejected".into()));
        }

        let mut profiles = self.profiles.lock().unwrap();
        if profiles.contains_key(&profile.uid) {
            return Err(HubgateError::Backend(format!("profile exists: {}", profile.uid)));
        }
        profiles.insert(profile.uid.clone(), profile);
        Ok(())
    }

    async fn update(&self, profile: Profile) -> Result<()> {
        let mut profiles = self.profiles.lock().unwrap();
        if !profiles.contains_key(&profile.uid) {
            return Err(HubgateError::NotFound(format!("profile: {}", profile.uid)));
        }
        profiles.insert(profile.uid.clone(), profile);
        Ok(())
    }

    async fn set_active(&self, uid: &str, active: bool) -> Result<()> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(uid)
            .ok_or_else(|| HubgateError::NotFound(format!("profile: {uid}")))?;
        profile.active = active;
        profile.metadata.last_status_change = Some(Utc::now());
        Ok(())
    }

    async fn delete(&self, uid: &str) -> Result<()> {
        self.profiles
            .lock()
            .unwrap()
            .remove(uid)
            .map(|_| ())
            .ok_or_else(|| HubgateError::NotFound(format!("profile: {uid}")))
    }
}

/// In-memory mock for `RegistrationRepository`.
///
/// Deleting a missing request fails, matching the port contract: the
/// delete is the approval workflow's mutual exclusion.
#[derive(Default)]
pub struct MockRegistrationRepository {
    requests: Mutex<HashMap<String, RegistrationRequest>>,
    fail_delete: AtomicBool,
    next_id: Mutex<u32>,
}

impl MockRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RegistrationRepository for MockRegistrationRepository {
    async fn list_pending(&self) -> Result<Vec<RegistrationRequest>> {
        Ok(self.requests.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<RegistrationRequest>> {
        Ok(self.requests.lock().unwrap().get(id).cloned())
    }

    async fn create(&self, mut request: RegistrationRequest) -> Result<RegistrationRequest> {
        let mut next = self.next_id.lock().unwrap();
        request.id = format!("req-{}", *next);
        *next += 1;
        request.requested_at = Some(Utc::now());
        self.requests.lock().unwrap().insert(request.id.clone(), request.clone());
        Ok(request)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(HubgateError::Network("document store unreachable".into()));
        }
        self.requests
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| HubgateError::NotFound(format!("registration request: {id}")))
    }
}

/// In-memory mock for the local profile cache.
#[derive(Default)]
pub struct MockProfileCache {
    slot: Mutex<Option<Profile>>,
}

impl MockProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        *self.slot.lock().unwrap() = Some(profile);
        self
    }

    pub fn stored(&self) -> Option<Profile> {
        self.slot.lock().unwrap().clone()
    }
}

impl ProfileCache for MockProfileCache {
    fn load(&self) -> Result<Option<Profile>> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn store(&self, profile: &Profile) -> Result<()> {
        *self.slot.lock().unwrap() = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
