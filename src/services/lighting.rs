//! Lighting device interface and the shared session that guards teardown.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use color_grid::{Bgr, ColorGrid};

use super::Lighting;
use crate::error::DeviceError;

/// Handle returned by a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: i64,
    /// Base URI for all further requests in this session
    pub uri: String,
}

/// An RGB lighting device that can mirror a color grid
#[async_trait]
pub trait LightingDevice: Send + Sync {
    /// Open a session. Must succeed before any other call.
    async fn register(&self) -> Result<Session, DeviceError>;

    /// Set every key from a grid of colors
    async fn apply_grid(&self, session: &Session, grid: &ColorGrid) -> Result<(), DeviceError>;

    /// Set the whole device to one color
    async fn apply_static(&self, session: &Session, color: Bgr) -> Result<(), DeviceError>;

    /// Close the session and release its resources on the device side
    async fn unregister(&self, session: Session) -> Result<(), DeviceError>;
}

/// A registered session shared between the reconciler and the shutdown
/// path.
///
/// `teardown` takes the session out of the slot and unregisters while still
/// holding the lock. `unregister` therefore runs at most once, and a racing
/// caller only returns after that single unregister has finished. Anything
/// published after teardown fails with [`DeviceError::NotRegistered`].
pub struct LightingSession {
    device: Arc<dyn LightingDevice>,
    session: Mutex<Option<Session>>,
}

impl LightingSession {
    /// Register with the device and wrap the resulting session.
    pub async fn open(device: Arc<dyn LightingDevice>) -> Result<Self, DeviceError> {
        let session = device.register().await?;
        tracing::info!(session = session.id, uri = %session.uri, "Lighting session registered");
        Ok(Self {
            device,
            session: Mutex::new(Some(session)),
        })
    }

    /// Push lighting to the device.
    ///
    /// The lock is released before the request goes out, so a slow device
    /// never delays teardown.
    pub async fn publish(&self, lighting: &Lighting) -> Result<(), DeviceError> {
        let session = self
            .session
            .lock()
            .await
            .clone()
            .ok_or(DeviceError::NotRegistered)?;
        match lighting {
            Lighting::Grid(grid) => self.device.apply_grid(&session, grid).await,
            Lighting::Static(color) => self.device.apply_static(&session, *color).await,
        }
    }

    pub async fn is_active(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Unregister the session if it is still open.
    ///
    /// Returns `Ok(false)` if another caller already tore it down. In that
    /// case the other caller's unregister has completed (or failed) by the
    /// time this returns.
    pub async fn teardown(&self) -> Result<bool, DeviceError> {
        let mut slot = self.session.lock().await;
        let Some(session) = slot.take() else {
            tracing::debug!("Lighting session already torn down");
            return Ok(false);
        };
        let id = session.id;
        self.device.unregister(session).await?;
        tracing::info!(session = id, "Lighting session unregistered");
        Ok(true)
    }
}
