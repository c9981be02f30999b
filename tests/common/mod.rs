#![allow(dead_code)]

use std::sync::Arc;

use shorturl::domain::entities::NewShortUrl;
use shorturl::domain::repositories::ShortUrlRepository;
use shorturl::infrastructure::persistence::InMemoryShortUrlRepository;
use shorturl::state::AppState;
use shorturl::utils::slug_generator::SlugGenerator;

pub fn create_test_state() -> (AppState, Arc<InMemoryShortUrlRepository>) {
    let repository = Arc::new(InMemoryShortUrlRepository::new());
    let state = AppState::from_parts(repository.clone(), Arc::new(SlugGenerator::from_seed(42)));

    (state, repository)
}

pub async fn create_test_short_url(repository: &InMemoryShortUrlRepository, slug: &str, url: &str) {
    repository
        .create(NewShortUrl::new(slug, url))
        .await
        .unwrap();
}
