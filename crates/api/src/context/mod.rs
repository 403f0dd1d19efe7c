//! Application context - dependency injection container

use std::sync::Arc;

use hubgate_core::{
    ApprovalService, BlogRepository, IdentityProvider, ListingRepository, MessageRepository,
    ObjectStorage, PartnerRepository, ProfileCache, ProfileRepository, RegistrationRepository,
    SessionService,
};
use hubgate_domain::{Config, Result};
use hubgate_infra::{
    DocBlogRepository, DocListingRepository, DocMessageRepository, DocPartnerRepository,
    DocProfileRepository, DocRegistrationRepository, DocStoreClient, HttpObjectStorage,
    KeyringProfileCache, RestIdentityProvider,
};

/// Type alias for identity provider trait object
type DynIdentityProvider = dyn IdentityProvider + 'static;

/// Type alias for profile repository trait object
type DynProfileRepository = dyn ProfileRepository + 'static;

/// Type alias for registration repository trait object
type DynRegistrationRepository = dyn RegistrationRepository + 'static;

/// Type alias for message repository trait object
type DynMessageRepository = dyn MessageRepository + 'static;

/// Type alias for partner repository trait object
type DynPartnerRepository = dyn PartnerRepository + 'static;

/// Type alias for listing repository trait object
type DynListingRepository = dyn ListingRepository + 'static;

/// Type alias for blog repository trait object
type DynBlogRepository = dyn BlogRepository + 'static;

/// Type alias for object storage trait object
type DynObjectStorage = dyn ObjectStorage + 'static;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub identity: Arc<DynIdentityProvider>,
    pub session: Arc<SessionService>,
    pub approval: ApprovalService,
    pub profiles: Arc<DynProfileRepository>,
    pub requests: Arc<DynRegistrationRepository>,
    pub messages: Arc<DynMessageRepository>,
    pub partners: Arc<DynPartnerRepository>,
    pub listings: Arc<DynListingRepository>,
    pub blogs: Arc<DynBlogRepository>,
    pub storage: Arc<DynObjectStorage>,
}

impl AppContext {
    /// Wire the production adapters from configuration and start the
    /// session listener.
    ///
    /// # Errors
    /// Returns an error if any backend client cannot be constructed.
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let docstore = Arc::new(DocStoreClient::from_backend_config(&config.backend)?);

        let identity: Arc<DynIdentityProvider> =
            Arc::new(RestIdentityProvider::from_backend_config(&config.backend)?);
        let profiles: Arc<DynProfileRepository> =
            Arc::new(DocProfileRepository::new(Arc::clone(&docstore)));
        let requests: Arc<DynRegistrationRepository> =
            Arc::new(DocRegistrationRepository::new(Arc::clone(&docstore)));
        let messages: Arc<DynMessageRepository> =
            Arc::new(DocMessageRepository::new(Arc::clone(&docstore)));
        let partners: Arc<DynPartnerRepository> =
            Arc::new(DocPartnerRepository::new(Arc::clone(&docstore)));
        let listings: Arc<DynListingRepository> =
            Arc::new(DocListingRepository::new(Arc::clone(&docstore)));
        let blogs: Arc<DynBlogRepository> = Arc::new(DocBlogRepository::new(docstore));
        let storage: Arc<DynObjectStorage> =
            Arc::new(HttpObjectStorage::from_backend_config(&config.backend)?);
        let cache: Arc<dyn ProfileCache> =
            Arc::new(KeyringProfileCache::from_config(&config.cache)?);

        Ok(Self::from_parts(
            config, identity, profiles, requests, messages, partners, listings, blogs, storage,
            cache,
        ))
    }

    /// Assemble a context from explicit ports.
    ///
    /// Used by `new` and by tests injecting in-memory ports. Starts the
    /// session listener on the identity provider's notification stream.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        config: Config,
        identity: Arc<DynIdentityProvider>,
        profiles: Arc<DynProfileRepository>,
        requests: Arc<DynRegistrationRepository>,
        messages: Arc<DynMessageRepository>,
        partners: Arc<DynPartnerRepository>,
        listings: Arc<DynListingRepository>,
        blogs: Arc<DynBlogRepository>,
        storage: Arc<DynObjectStorage>,
        cache: Arc<dyn ProfileCache>,
    ) -> Arc<Self> {
        let session = Arc::new(SessionService::new(
            Arc::clone(&identity),
            Arc::clone(&profiles),
            cache,
        ));
        session.attach();

        let approval = ApprovalService::new(
            Arc::clone(&identity),
            Arc::clone(&profiles),
            Arc::clone(&requests),
        );

        Arc::new(Self {
            config,
            identity,
            session,
            approval,
            profiles,
            requests,
            messages,
            partners,
            listings,
            blogs,
            storage,
        })
    }
}
