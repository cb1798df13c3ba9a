use std::sync::Arc;
use boxoffice_core::BoxOffice;
use boxoffice_store::app_config::InventoryRules;

#[derive(Clone)]
pub struct AppState {
    pub box_office: Arc<BoxOffice>,
    pub rules: InventoryRules,
}

impl AppState {
    pub fn new(box_office: BoxOffice, rules: InventoryRules) -> Self {
        Self {
            box_office: Arc::new(box_office),
            rules,
        }
    }
}
