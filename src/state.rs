use std::sync::Arc;

use crate::repository::MenuRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn MenuRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn MenuRepository>) -> Self {
        Self { repo }
    }
}
