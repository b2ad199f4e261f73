//! Discovery graph entity model and client boundary.
//!
//! The graph exposes exactly two operations to config ingestion: inserting
//! endpoint entities (which assigns their identities) and attaching one
//! interface to an existing endpoint. [`GraphClient`] is the seam the
//! daemons program against; [`HttpGraphClient`] implements it over the
//! graph server's HTTP/JSON API.

pub mod client;
pub mod entity;
pub mod error;

pub use client::{GraphClient, HttpGraphClient, InterfaceInsert};
pub use entity::{Endpoint, EntityId};
pub use error::{GraphError, GraphResult};
