use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Create the cookie session layer
///
/// Sessions live in process memory and expire after 24 hours of inactivity.
/// A restart logs everyone out.
///
/// # Arguments
/// * `secure` - Mark the cookie Secure; pass true behind HTTPS
///
/// # Example
/// ```ignore
/// use axum_helpers::session::create_session_layer;
///
/// let env = core_config::Environment::from_env();
/// let router = router.layer(create_session_layer(env.is_production()));
/// ```
pub fn create_session_layer(secure: bool) -> SessionManagerLayer<MemoryStore> {
    let session_store = MemoryStore::default();

    SessionManagerLayer::new(session_store)
        .with_secure(secure)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
}
