use std::sync::Arc;

use menu_core::repositories::MenuRepository;
use menu_core::services::MenuService;
use menu_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub menu_service: MenuService<dyn MenuRepository>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(menu_repo: Arc<dyn MenuRepository>, config: AppConfig) -> Self {
        Self {
            menu_service: MenuService::new(menu_repo),
            config,
        }
    }
}
