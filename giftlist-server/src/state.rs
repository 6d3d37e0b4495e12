//! Shared application state.

use std::sync::Arc;

use giftlist::{AdminSecret, GiftStore, ImageStore};

use crate::error::ApiError;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn GiftStore>,
    secret: AdminSecret,
    images: Arc<ImageStore>,
}

impl AppState {
    /// Bundles the store, the admin secret and the image directory.
    #[must_use]
    pub fn new(store: Arc<dyn GiftStore>, secret: AdminSecret, images: ImageStore) -> Self {
        Self {
            store,
            secret,
            images: Arc::new(images),
        }
    }

    /// The admin secret.
    #[must_use]
    pub fn secret(&self) -> &AdminSecret {
        &self.secret
    }

    /// The image directory.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Runs a synchronous store call on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns the store's error, or an internal error if the task panicked.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn GiftStore) -> giftlist::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        Ok(tokio::task::spawn_blocking(move || f(store.as_ref())).await??)
    }

    /// Runs a synchronous image call on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns the image store's error, or an internal error if the task panicked.
    pub async fn with_images<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ImageStore) -> giftlist::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let images = Arc::clone(&self.images);
        Ok(tokio::task::spawn_blocking(move || f(&images)).await??)
    }
}
