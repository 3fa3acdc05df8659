use std::sync::Arc;

use qrshare_core::Publisher;

#[derive(Clone)]
pub struct AppState {
    publisher: Arc<dyn Publisher>,
}

impl AppState {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self { publisher }
    }

    pub fn publisher(&self) -> &dyn Publisher {
        self.publisher.as_ref()
    }
}
