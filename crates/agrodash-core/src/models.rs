//! Domain models mirrored from the farm-management backend.
//!
//! All entities are owned by the server; the client holds copies fetched
//! per request. Wire format is camelCase JSON with backend-assigned `i64`
//! ids and zone-less timestamps.

pub mod crop;
pub mod farm;
pub mod fertilization;
pub mod irrigation;
pub mod parcel;
pub mod session;
pub mod user;
