use std::sync::Arc;

use salvo::async_trait;
pub use sgca_core::config::*;

use crate::error::{AppError, AppResult};

/// Hoop that seeds the depot with the settings loaded at startup, so
/// handlers that need the service descriptor or limits read the same
/// snapshot the binary booted with.
pub struct ConfigHandler {
    pub settings: Settings,
}

#[async_trait]
impl salvo::Handler for ConfigHandler {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let settings: Arc<Settings> = Arc::new(self.settings.clone());
        depot.inject(settings);
    }
}

/// ## Summary
/// Fetches the settings previously injected by [`ConfigHandler`].
///
/// ## Errors
/// `CoreError::InvariantViolation` when the route tree was assembled without
/// the config hoop.
pub fn get_config_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    depot.obtain::<Arc<Settings>>().cloned().map_err(|_err| {
        AppError::CoreError(sgca_core::error::CoreError::InvariantViolation(
            "configuración ausente en el depot",
        ))
    })
}
