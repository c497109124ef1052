//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Link service over whichever repository backend was configured.
pub type DynLinkService = LinkService<dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Configured public base URL; `None` derives it from the request.
    pub base_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(repository: Arc<dyn LinkRepository>, base_url: Option<String>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
            base_url: base_url.map(Arc::from),
        }
    }
}
