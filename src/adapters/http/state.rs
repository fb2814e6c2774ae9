//! Shared application state for the HTTP adapter.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::auth::{
    AuthResolver, LoginHandler, LogoutHandler, RegisterHandler, ResolverSettings,
};
use crate::application::handlers::catalog::{
    AddItemHandler, AttachmentsHandler, GetItemHandler, ListItemsHandler, SetItemImageHandler,
};
use crate::application::handlers::lending::{
    BorrowItemHandler, ListOpenBorrowsHandler, ReturnItemHandler,
};
use crate::ports::{
    AttachmentRepository, CatalogRepository, CredentialStore, LendingStore, PasswordHasher,
    SessionStore,
};

/// Session and cookie behaviour.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ttl: Duration,
    pub cookie_name: String,
    pub secure_cookie: bool,
    /// Accept `X-Auth-Token` and `?token=` as credential channels.
    pub allow_fallback_token: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(168 * 3600),
            cookie_name: "imx_token".to_string(),
            secure_cookie: true,
            allow_fallback_token: false,
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned per request; every field is an `Arc` or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub lending: Arc<dyn LendingStore>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
    pub credentials: Arc<dyn CredentialStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub session: SessionSettings,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn resolver(&self) -> AuthResolver {
        AuthResolver::new(
            self.sessions.clone(),
            self.credentials.clone(),
            ResolverSettings {
                session_ttl: self.session.ttl,
                allow_fallback_token: self.session.allow_fallback_token,
            },
        )
    }

    pub fn borrow_handler(&self) -> BorrowItemHandler {
        BorrowItemHandler::new(self.lending.clone())
    }

    pub fn return_handler(&self) -> ReturnItemHandler {
        ReturnItemHandler::new(self.lending.clone())
    }

    pub fn open_borrows_handler(&self) -> ListOpenBorrowsHandler {
        ListOpenBorrowsHandler::new(self.lending.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.credentials.clone(),
            self.sessions.clone(),
            self.hasher.clone(),
            self.session.ttl,
        )
    }

    pub fn logout_handler(&self) -> LogoutHandler {
        LogoutHandler::new(self.sessions.clone())
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(
            self.credentials.clone(),
            self.sessions.clone(),
            self.hasher.clone(),
            self.session.ttl,
        )
    }

    pub fn list_items_handler(&self) -> ListItemsHandler {
        ListItemsHandler::new(self.catalog.clone())
    }

    pub fn get_item_handler(&self) -> GetItemHandler {
        GetItemHandler::new(self.catalog.clone())
    }

    pub fn add_item_handler(&self) -> AddItemHandler {
        AddItemHandler::new(self.catalog.clone())
    }

    pub fn set_item_image_handler(&self) -> SetItemImageHandler {
        SetItemImageHandler::new(self.catalog.clone())
    }

    pub fn attachments_handler(&self) -> AttachmentsHandler {
        AttachmentsHandler::new(self.catalog.clone(), self.attachments.clone())
    }
}
