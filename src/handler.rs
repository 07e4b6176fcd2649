//! Handler trait and type erasure.
//!
//! The router stores handlers of *different* concrete types in one
//! `HashMap<Method, Tree>`, so each handler is hidden behind a trait object.
//! The chain from route function to vtable call:
//!
//! ```text
//! async fn list(app: Arc<App>, req: Request) -> Result<Response>  ← you write this
//!        ↓ router.on(Method::GET, "/inventory", list)
//! list.into_boxed_handler()            ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(list))            ← stored as Arc<dyn ErasedHandler>
//!        ↓ request time
//! handler.call(app, req)               ← one Arc clone + one virtual call
//! ```
//!
//! Handlers receive the shared [`App`] explicitly (state is injected, never
//! reached through a global) and return `Result<Response>`, so `?` works on
//! every fallible step and the dispatch layer owns the error-to-status
//! mapping.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::app::App;
use crate::error::Result;
use crate::request::Request;
use crate::response::Response;

/// A heap-allocated, type-erased future resolving to a handler outcome.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, app: Arc<App>, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(app: Arc<App>, req: Request) -> Result<Response>
/// ```
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut> private::Sealed for F
where
    F: Fn(Arc<App>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
}

impl<F, Fut> Handler for F
where
    F: Fn(Arc<App>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler function into the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut> ErasedHandler for FnHandler<F>
where
    F: Fn(Arc<App>, Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    fn call(&self, app: Arc<App>, req: Request) -> BoxFuture {
        Box::pin((self.0)(app, req))
    }
}
