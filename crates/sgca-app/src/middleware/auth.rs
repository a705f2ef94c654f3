/// Authentication seam for the API router.
///
/// The catalog API runs behind the institutional gateway and carries no
/// credential handling of its own yet, so this hoop only traces the request
/// and lets it through. Session validation will plug in here once the
/// `sesiones` table becomes active.
pub struct AuthMiddleware;

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, _depot, _res, _ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        _depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("petición admitida");
    }
}
