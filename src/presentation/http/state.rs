// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use crate::presentation::http::middleware::{auth::AccessPolicy, cache::ResponseCache};
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub access: Arc<AccessPolicy>,
    pub cache: Arc<ResponseCache>,
}
