use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use sgca_core::error::CoreError;
use sgca_db::db::DbProvider;

/// Hoop that seeds the depot with the connection pool so every catalog
/// handler can check out a pooled connection without holding a reference to
/// the pool itself. Injected once per request, behind `Arc`.
pub struct DbProviderHandler<T: DbProvider + Send + Sync + Clone> {
    pub provider: T,
}

#[async_trait]
impl<T: DbProvider + Send + Sync + Clone + 'static> salvo::Handler for DbProviderHandler<T> {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let provider: Arc<dyn DbProvider + Send + Sync> = Arc::new(self.provider.clone());
        depot.inject(provider);
    }
}

/// ## Summary
/// Fetches the pool previously injected by [`DbProviderHandler`].
///
/// ## Errors
/// `CoreError::InvariantViolation` when the route tree was assembled without
/// the pool hoop; the façade answers 500 in that case.
pub fn get_db_from_depot(
    depot: &salvo::Depot,
) -> AppResult<Arc<dyn DbProvider + Send + Sync + 'static>> {
    depot
        .obtain::<Arc<dyn DbProvider + Send + Sync>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("pool ausente en el depot").into())
}
