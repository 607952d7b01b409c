//! Application state and router composition

use std::sync::Arc;

use axum::{Router, extract::FromRef};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::auth::{
    AuthGate, AuthService, CredentialError, CredentialStore, JwtConfig, JwtService,
    PasswordHasher, auth_api_router,
};
use crate::core::catalog::{CatalogService, catalog_api_router};
use crate::core::chat::{ChatService, KeywordResponder, chat_api_router};
use crate::core::clock::Clock;
use crate::core::db::{
    ChatRepository, ChatStore, MemoryChatStore, MemoryProductStore, MemoryUserStore,
    ProductRepository, ProductStore, UserRepository, UserStore,
};

/// Storage backends behind the services
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub chats: Arc<dyn ChatStore>,
    pub products: Arc<dyn ProductStore>,
}

impl Stores {
    /// Process-local storage; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            chats: Arc::new(MemoryChatStore::new()),
            products: Arc::new(MemoryProductStore::new()),
        }
    }

    /// PostgreSQL storage sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            chats: Arc::new(ChatRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool)),
        }
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub auth_gate: AuthGate,
    pub chat_service: ChatService,
    pub catalog_service: CatalogService,
}

impl AppState {
    pub fn new(
        stores: Stores,
        jwt_config: JwtConfig,
        hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CredentialError> {
        let credentials = CredentialStore::new(stores.users, hasher)?;
        let jwt_service = JwtService::new(jwt_config, clock.clone());

        Ok(Self {
            auth_service: AuthService::new(credentials.clone(), jwt_service.clone()),
            auth_gate: AuthGate::new(jwt_service, credentials),
            chat_service: ChatService::new(stores.chats, Arc::new(KeywordResponder), clock),
            catalog_service: CatalogService::new(stores.products),
        })
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth_service.clone()
    }
}

impl FromRef<AppState> for AuthGate {
    fn from_ref(state: &AppState) -> Self {
        state.auth_gate.clone()
    }
}

impl FromRef<AppState> for ChatService {
    fn from_ref(state: &AppState) -> Self {
        state.chat_service.clone()
    }
}

impl FromRef<AppState> for CatalogService {
    fn from_ref(state: &AppState) -> Self {
        state.catalog_service.clone()
    }
}

/// Build the full HTTP router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_api_router::<AppState>())
        .merge(chat_api_router::<AppState>())
        .merge(catalog_api_router::<AppState>())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
