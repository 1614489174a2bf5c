use std::sync::Arc;

use leadform_core::nonce::NonceIssuer;
use leadform_core::store::RecordStore;
use leadform_core::submission::SubmissionPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Lead persistence.
    pub store: Arc<dyn RecordStore>,
    /// Issues and verifies form tokens.
    pub nonces: Arc<NonceIssuer>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Arc<dyn RecordStore>) -> Self {
        let nonces = NonceIssuer::new(&config.nonce.secret, config.nonce.lifetime_secs);
        Self {
            config: Arc::new(config),
            store,
            nonces: Arc::new(nonces),
        }
    }

    /// Submission pipeline over this state's store and token issuer.
    pub fn pipeline(&self) -> SubmissionPipeline {
        SubmissionPipeline::new(Arc::clone(&self.store), Arc::clone(&self.nonces))
    }
}
