//! Shared application state.

use std::sync::Arc;

use termhub_cache::{CacheStore, CachedUserDirectory};
use termhub_gateway::{
    FileStore, MessageCatalog, OrganizationDirectory, RemoteFileStore, RemoteMessageCatalog,
    RemoteOrganizationDirectory, RemoteUserDirectory, UserDirectory,
};
use termhub_registry::ServiceLocator;
use termhub_storage::{HolidayStore, MemoryStore, TermStore};

use crate::config::AppConfig;

/// Everything the handlers need, cheaply cloneable per request.
///
/// The user directory may or may not be the cache-aside decorator; call
/// sites cannot tell, which is the point.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub terms: Arc<dyn TermStore>,
    pub holidays: Arc<dyn HolidayStore>,
    pub users: Arc<dyn UserDirectory>,
    pub organizations: Arc<dyn OrganizationDirectory>,
    pub messages: Arc<dyn MessageCatalog>,
    pub files: Arc<dyn FileStore>,
}

impl AppState {
    /// Wires the remote accessors against the given locator and wraps the
    /// user directory in the cache-aside decorator.
    pub fn build(
        config: AppConfig,
        locator: Arc<dyn ServiceLocator>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        let http = reqwest::Client::new();

        let remote_users: Arc<dyn UserDirectory> = Arc::new(RemoteUserDirectory::new(
            &config.upstreams.user_service,
            Arc::clone(&locator),
            http.clone(),
        ));
        let users: Arc<dyn UserDirectory> = Arc::new(CachedUserDirectory::new(
            remote_users,
            cache,
            config.user_cache_ttl(),
        ));

        let organizations: Arc<dyn OrganizationDirectory> =
            Arc::new(RemoteOrganizationDirectory::new(
                &config.upstreams.organization_service,
                Arc::clone(&locator),
                http.clone(),
            ));
        let messages: Arc<dyn MessageCatalog> = Arc::new(RemoteMessageCatalog::new(
            &config.upstreams.message_service,
            Arc::clone(&locator),
            http.clone(),
        ));
        let files: Arc<dyn FileStore> = Arc::new(RemoteFileStore::new(
            &config.upstreams.file_service,
            locator,
            http,
        ));

        let store = Arc::new(MemoryStore::new());

        Self {
            config: Arc::new(config),
            terms: Arc::clone(&store) as Arc<dyn TermStore>,
            holidays: store as Arc<dyn HolidayStore>,
            users,
            organizations,
            messages,
            files,
        }
    }
}
