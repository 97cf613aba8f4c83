#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use shortlink_api::prelude::*;
use axum::ServiceExt;
use axum::extract::Request;
use shortlink_api::routes::{app_router, router};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

pub const API_TOKEN: &str = "secret";
pub const HOST: &str = "localhost:3000";

/// Repository backed by a map, enforcing the same uniqueness rule as the
/// database constraint.
#[derive(Default)]
pub struct InMemoryShortLinkRepository {
    links: Mutex<HashMap<String, ShortLink>>,
    next_id: AtomicI64,
}

impl InMemoryShortLinkRepository {
    pub fn with_links(links: &[(&str, &str)]) -> Self {
        let repo = Self::default();
        for (short_url, original_url) in links {
            repo.insert(short_url, original_url);
        }
        repo
    }

    pub fn insert(&self, short_url: &str, original_url: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.links.lock().unwrap().insert(
            short_url.to_string(),
            ShortLink::new(
                id,
                original_url.to_string(),
                short_url.to_string(),
                None,
                Utc::now(),
            ),
        );
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn get(&self, short_url: &str) -> Option<ShortLink> {
        self.links.lock().unwrap().get(short_url).cloned()
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.contains_key(&new_link.short_url) {
            return Err(AppError::Conflict(
                "duplicate key value violates unique constraint \"short_links_short_url_key\""
                    .to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let link = ShortLink::new(
            id,
            new_link.original_url,
            new_link.short_url,
            new_link.complete_url,
            Utc::now(),
        );
        links.insert(link.short_url.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.get(short_url))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Repository whose store is unreachable.
pub struct UnreachableRepository {
    pub message: String,
}

impl UnreachableRepository {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl ShortLinkRepository for UnreachableRepository {
    async fn create(&self, _new_link: NewShortLink) -> Result<ShortLink, AppError> {
        Err(AppError::Connection(self.message.clone()))
    }

    async fn find_by_short_url(&self, _short_url: &str) -> Result<Option<ShortLink>, AppError> {
        Err(AppError::Connection(self.message.clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Connection(self.message.clone()))
    }
}

pub fn create_test_state(repository: Arc<dyn ShortLinkRepository>) -> AppState {
    AppState::new(repository, API_TOKEN.to_string(), false)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Serves the full application service, path normalization included.
pub fn create_app_test_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}
