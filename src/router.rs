//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. You register a path,
//! you get a handler. An optional fallback handler catches every request no
//! route matched; the service uses it to keep the catch-all behavior for
//! `/register` hit with the wrong method.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), fallback: None }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves
    /// them:
    ///
    /// ```rust,no_run
    /// # use http::Method;
    /// # use std::sync::Arc;
    /// # use stockroom::{App, Request, Response, Result, Router};
    /// # async fn get_item(_: Arc<App>, _: Request) -> Result<Response> { Ok(Response::text("")) }
    /// # async fn list_items(_: Arc<App>, _: Request) -> Result<Response> { Ok(Response::text("")) }
    /// Router::new()
    ///     .on(Method::GET, "/inventory",      list_items)
    ///     .on(Method::GET, "/inventory/{id}", get_item);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting path pattern. Routes are
    /// registered once at startup, so this fails the process before it ever
    /// accepts a connection.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Register the handler called when no route matches the request.
    ///
    /// Without one, unmatched requests get a bare `404`.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    pub(crate) fn fallback_handler(&self) -> Option<BoxedHandler> {
        self.fallback.as_ref().map(Arc::clone)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::error::Result;
    use crate::request::Request;
    use crate::response::Response;

    async fn ok(_app: Arc<App>, _req: Request) -> Result<Response> {
        Ok(Response::text("ok"))
    }

    #[test]
    fn lookup_extracts_path_params() {
        let router = Router::new().on(Method::GET, "/inventory/{id}", ok);

        let (_, params) = router.lookup(&Method::GET, "/inventory/42").unwrap();
        assert_eq!(params["id"], "42");

        assert!(router.lookup(&Method::POST, "/inventory/42").is_none());
        assert!(router.lookup(&Method::GET, "/nothing").is_none());
    }

    #[test]
    fn fallback_is_stored_separately_from_routes() {
        let router = Router::new().fallback(ok);
        assert!(router.lookup(&Method::GET, "/anything").is_none());
        assert!(router.fallback_handler().is_some());
    }
}
