//! # stockroom
//!
//! A minimal inventory-tracking HTTP service. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Clients register items (name, description, optional photo), list them,
//! fetch and update individual items, replace photos, delete items, and run
//! a trivial search by id. Items live in a process-local in-memory registry;
//! photos are written to a cache directory on disk. Nothing survives a
//! restart — the registry is the only index of which file belongs to which
//! item, and it dies with the process.
//!
//! What stockroom intentionally does not do:
//!
//! - **Persistence** — the registry is in-memory, by contract
//! - **Authentication / authorization** — put it behind your proxy
//! - **Photo validation** — any bytes are accepted, and whatever was stored
//!   is served back as `image/jpeg`
//! - **Pagination** — listings return everything
//!
//! What's left:
//!
//! - Radix-tree routing — O(path-length) lookup via [`matchit`]
//! - Async I/O — tokio + hyper, HTTP/1.1 and HTTP/2
//! - Graceful shutdown — SIGTERM / Ctrl-C, drains in-flight requests
//! - An ordered registry with strictly increasing, never-reused ids
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stockroom::{App, PhotoStore, Server, routes};
//!
//! #[tokio::main]
//! async fn main() -> stockroom::Result<()> {
//!     let app = Arc::new(App::new(PhotoStore::new("/var/cache/stockroom".into())));
//!     Server::bind("127.0.0.1:3000".parse().unwrap())
//!         .serve(routes::router(), app)
//!         .await
//! }
//! ```
//!
//! Then:
//!
//! ```text
//! curl -F inventory_name=Hammer -F photo=@hammer.jpg http://localhost:3000/register
//! curl http://localhost:3000/inventory
//! ```

mod app;
mod config;
mod error;
mod handler;
mod photos;
mod registry;
mod request;
mod response;
mod router;
mod server;

pub mod routes;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use handler::Handler;
pub use photos::PhotoStore;
pub use registry::{Item, Registry, UpdateFields};
pub use request::Request;
pub use response::{ContentType, Response};
pub use router::Router;
pub use server::Server;
