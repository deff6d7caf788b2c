//! Host geolocation sources.

use std::future::Future;

use aba_core::error::AbaError;
use aba_core::types::Coordinates;

/// A single current-position reading supplied by the host.
///
/// Implementations answer once with either a position or a denial; the
/// coordinator never polls.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, AbaError>> + Send;
}

/// Reports a fixed position, e.g. one taken from the config file.
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionProvider {
    position: Coordinates,
}

impl FixedPositionProvider {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

impl GeolocationProvider for FixedPositionProvider {
    async fn current_position(&self) -> Result<Coordinates, AbaError> {
        Ok(self.position)
    }
}

/// Always denies access, like a traveller refusing the permission prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedProvider;

impl GeolocationProvider for DeniedProvider {
    async fn current_position(&self) -> Result<Coordinates, AbaError> {
        Err(AbaError::LocationUnavailable)
    }
}

/// Never answers, like a permission prompt that is left open.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingProvider;

impl GeolocationProvider for PendingProvider {
    async fn current_position(&self) -> Result<Coordinates, AbaError> {
        std::future::pending().await
    }
}
