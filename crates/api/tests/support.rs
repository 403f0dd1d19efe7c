//! Shared test support for router tests
//!
//! In-memory implementations of every port, plus a helper that wires them
//! into a full `AppContext` so tests drive the real router with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use hubgate_app::context::AppContext;
use hubgate_core::{
    BlogRepository, IdentityProvider, ListingRepository, MessageRepository, ObjectStorage,
    PartnerRepository, ProfileCache, ProfileRepository, RegistrationRepository,
};
use hubgate_domain::{
    ApprovalMetadata, BackendConfig, BlogPost, BlogStatus, CacheConfig, Config, ContactMessage,
    HubgateError, Partner, Principal, Profile, RegistrationRequest, ReplyTemplate, Result, Role,
    ServerConfig, ServiceListing, SortOrder,
};
use tokio::sync::broadcast;

// ============================================================================
// Identity provider
// ============================================================================

struct Account {
    secret: String,
    uid: String,
}

pub struct MockIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<Principal>>,
    events: broadcast::Sender<Option<Principal>>,
    next_uid: Mutex<u32>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            events,
            next_uid: Mutex::new(1),
        }
    }

    pub fn seed_account(&self, email: &str, secret: &str) -> Principal {
        let uid = self.allocate_uid();
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), Account { secret: secret.to_string(), uid: uid.clone() });
        Principal { uid, email: email.to_string() }
    }

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

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Principal> {
        let principal = {
            let accounts = self.accounts.lock().unwrap();
            let account = accounts
                .get(email)
                .filter(|a| a.secret == secret)
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
        self.switch_session(principal.clone());
        Ok(principal)
    }

    async fn delete_principal(&self, principal: &Principal) -> Result<()> {
        self.accounts
            .lock()
            .unwrap()
            .remove(&principal.email)
            .ok_or_else(|| HubgateError::NotFound(format!("no account for {}", principal.email)))?;
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

// ============================================================================
// IAM repositories & cache
// ============================================================================

#[derive(Default)]
pub struct MockProfileRepository {
    profiles: Mutex<HashMap<String, Profile>>,
}

impl MockProfileRepository {
    pub fn insert(&self, profile: Profile) {
        self.profiles.lock().unwrap().insert(profile.uid.clone(), profile);
    }

    pub fn count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    pub fn get_sync(&self, uid: &str) -> Option<Profile> {
        self.profiles.lock().unwrap().get(uid).cloned()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.lock().unwrap().values().find(|p| p.email == email).cloned())
    }

    async fn get(&self, uid: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.lock().unwrap().get(uid).cloned())
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        Ok(self.profiles.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, profile: Profile) -> Result<()> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.contains_key(&profile.uid) {
            return Err(HubgateError::Backend(format!("profile exists: {}", profile.uid)));
        }
        profiles.insert(profile.uid.clone(), profile);
        Ok(())
    }

    async fn update(&self, profile: Profile) -> Result<()> {
        self.profiles.lock().unwrap().insert(profile.uid.clone(), profile);
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

#[derive(Default)]
pub struct MockRegistrationRepository {
    requests: Mutex<HashMap<String, RegistrationRequest>>,
    next_id: Mutex<u32>,
}

impl MockRegistrationRepository {
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn insert_pending(&self, request: RegistrationRequest) -> RegistrationRequest {
        let mut next = self.next_id.lock().unwrap();
        let mut request = request;
        request.id = format!("req-{}", *next);
        *next += 1;
        request.requested_at = Some(Utc::now());
        self.requests.lock().unwrap().insert(request.id.clone(), request.clone());
        request
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

    async fn create(&self, request: RegistrationRequest) -> Result<RegistrationRequest> {
        Ok(self.insert_pending(request))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.requests
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| HubgateError::NotFound(format!("registration request: {id}")))
    }
}

#[derive(Default)]
pub struct MockProfileCache {
    slot: Mutex<Option<Profile>>,
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

// ============================================================================
// Content repositories & storage
// ============================================================================

#[derive(Default)]
pub struct MockMessageRepository {
    messages: Mutex<Vec<ContactMessage>>,
}

impl MockMessageRepository {
    pub fn insert(&self, message: ContactMessage) {
        self.messages.lock().unwrap().push(message);
    }

    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn list(&self, order: SortOrder) -> Result<Vec<ContactMessage>> {
        let mut messages = self.messages.lock().unwrap().clone();
        match order {
            SortOrder::Asc => messages.sort_by_key(|m| m.timestamp),
            SortOrder::Desc => messages.sort_by_key(|m| std::cmp::Reverse(m.timestamp)),
        }
        Ok(messages)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        if messages.len() == before {
            return Err(HubgateError::NotFound(format!("message: {id}")));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockPartnerRepository {
    partners: Mutex<HashMap<String, Partner>>,
    next_id: Mutex<u32>,
}

#[async_trait]
impl PartnerRepository for MockPartnerRepository {
    async fn list(&self) -> Result<Vec<Partner>> {
        Ok(self.partners.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Partner>> {
        Ok(self.partners.lock().unwrap().get(id).cloned())
    }

    async fn create(&self, mut partner: Partner) -> Result<Partner> {
        let mut next = self.next_id.lock().unwrap();
        partner.id = format!("partner-{}", *next);
        *next += 1;
        partner.created_at = Some(Utc::now());
        self.partners.lock().unwrap().insert(partner.id.clone(), partner.clone());
        Ok(partner)
    }

    async fn update(&self, partner: Partner) -> Result<()> {
        self.partners.lock().unwrap().insert(partner.id.clone(), partner);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.partners
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| HubgateError::NotFound(format!("partner: {id}")))
    }
}

#[derive(Default)]
pub struct MockListingRepository {
    listings: Mutex<HashMap<String, ServiceListing>>,
    next_id: Mutex<u32>,
}

#[async_trait]
impl ListingRepository for MockListingRepository {
    async fn list_by_submitter(&self, email: &str) -> Result<Vec<ServiceListing>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.submitted_by == email)
            .cloned()
            .collect())
    }

    async fn create(&self, mut listing: ServiceListing) -> Result<ServiceListing> {
        let mut next = self.next_id.lock().unwrap();
        listing.id = format!("listing-{}", *next);
        *next += 1;
        listing.created_at = Some(Utc::now());
        self.listings.lock().unwrap().insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    async fn update(&self, listing: ServiceListing) -> Result<()> {
        self.listings.lock().unwrap().insert(listing.id.clone(), listing);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockBlogRepository {
    posts: Mutex<HashMap<String, BlogPost>>,
    next_id: Mutex<u32>,
}

impl MockBlogRepository {
    pub fn get_sync(&self, id: &str) -> Option<BlogPost> {
        self.posts.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl BlogRepository for MockBlogRepository {
    async fn list(&self) -> Result<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self.posts.lock().unwrap().values().cloned().collect();
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at));
        Ok(posts)
    }

    async fn get(&self, id: &str) -> Result<Option<BlogPost>> {
        Ok(self.posts.lock().unwrap().get(id).cloned())
    }

    async fn create(&self, mut post: BlogPost) -> Result<BlogPost> {
        let mut next = self.next_id.lock().unwrap();
        post.id = format!("post-{}", *next);
        *next += 1;
        post.created_at = Some(Utc::now());
        self.posts.lock().unwrap().insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn update(&self, post: BlogPost) -> Result<()> {
        self.posts.lock().unwrap().insert(post.id.clone(), post);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.posts
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| HubgateError::NotFound(format!("blog post: {id}")))
    }

    async fn set_status(&self, id: &str, status: BlogStatus) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        let post =
            posts.get_mut(id).ok_or_else(|| HubgateError::NotFound(format!("blog post: {id}")))?;
        post.status = status;
        Ok(())
    }
}

pub struct MockStorage;

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn upload(&self, path: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<String> {
        Ok(format!("https://assets.test/{path}"))
    }
}

// ============================================================================
// Wired context
// ============================================================================

/// Handles onto the mock backend, for seeding and asserting.
pub struct TestBackend {
    pub identity: Arc<MockIdentityProvider>,
    pub profiles: Arc<MockProfileRepository>,
    pub requests: Arc<MockRegistrationRepository>,
    pub messages: Arc<MockMessageRepository>,
    pub partners: Arc<MockPartnerRepository>,
    pub listings: Arc<MockListingRepository>,
    pub blogs: Arc<MockBlogRepository>,
}

pub fn test_config() -> Config {
    Config {
        backend: BackendConfig {
            identity_url: "https://identity.test".to_string(),
            docstore_url: "https://docs.test".to_string(),
            storage_url: "https://assets.test".to_string(),
            api_key: "test-key".to_string(),
            timeout_seconds: 5,
        },
        server: ServerConfig::default(),
        cache: CacheConfig::default(),
        reply: ReplyTemplate::default(),
    }
}

/// Build a full `AppContext` over in-memory ports.
pub fn test_context() -> (Arc<AppContext>, TestBackend) {
    let identity = Arc::new(MockIdentityProvider::new());
    let profiles = Arc::new(MockProfileRepository::default());
    let requests = Arc::new(MockRegistrationRepository::default());
    let messages = Arc::new(MockMessageRepository::default());
    let partners = Arc::new(MockPartnerRepository::default());
    let listings = Arc::new(MockListingRepository::default());
    let blogs = Arc::new(MockBlogRepository::default());

    let ctx = AppContext::from_parts(
        test_config(),
        Arc::clone(&identity) as _,
        Arc::clone(&profiles) as _,
        Arc::clone(&requests) as _,
        Arc::clone(&messages) as _,
        Arc::clone(&partners) as _,
        Arc::clone(&listings) as _,
        Arc::clone(&blogs) as _,
        Arc::new(MockStorage) as _,
        Arc::new(MockProfileCache::default()) as _,
    );

    (ctx, TestBackend { identity, profiles, requests, messages, partners, listings, blogs })
}

/// Build a profile and register it with the backend.
pub fn provision_profile(
    backend: &TestBackend,
    uid: &str,
    email: &str,
    role: Role,
    active: bool,
) -> Profile {
    let profile = Profile {
        uid: uid.to_string(),
        full_name: "Test User".to_string(),
        email: email.to_string(),
        organization: "Acme".to_string(),
        role,
        active,
        metadata: ApprovalMetadata {
            approved_by: "root@acme.io".to_string(),
            approved_at: Utc::now(),
            requested_at: None,
            last_status_change: None,
        },
    };
    backend.profiles.insert(profile.clone());
    profile
}

/// Put a signed-in operator directly into the session.
pub fn sign_in_as(ctx: &AppContext, profile: &Profile) {
    ctx.session.set_authenticated(
        Principal { uid: profile.uid.clone(), email: profile.email.clone() },
        profile.clone(),
    );
}
