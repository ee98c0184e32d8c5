use crate::catalog::Catalog;
use crate::resolver::ResolutionEngine;
use std::sync::Arc;

pub struct AppState {
    pub engine: Arc<ResolutionEngine>,
    pub catalog: Arc<Catalog>,
}
