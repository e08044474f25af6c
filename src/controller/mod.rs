//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and keeps the model in sync with the catalog backend.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `loader`: Initial (and manual) load of catalog, favorites and playlist
//! - `mutations`: Favorite / playlist add and remove handlers

mod input;
mod loader;
mod mutations;

#[cfg(test)]
mod fake_api;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: AppModel,
}

impl AppController {
    pub fn new(model: AppModel) -> Self {
        Self { model }
    }

    /// Run a controller action on the runtime without blocking the UI loop
    pub(crate) fn spawn_action<F, Fut>(&self, action: F)
    where
        F: FnOnce(AppController) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let controller = self.clone();
        tokio::spawn(async move {
            action(controller).await;
        });
    }
}
