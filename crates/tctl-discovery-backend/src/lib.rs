//! External collaborator boundary for the discovery troubleshooting CLI.
//!
//! This crate defines only interfaces (§1 "Out of scope: the control
//! plane backend ... consumed through three narrow client interfaces").
//! No implementation of `UserTasksClient`, `DiscoveryConfigsClient`, or
//! `EventsClient` ships here; the surrounding `tctl` binary supplies one
//! backed by its gRPC connection, and tests supply an in-memory fake
//! (see `tctl-discovery-cli`'s test support module).

pub mod client;
pub mod model;
pub mod paging;
pub mod scope;

pub use client::{
    DiscoveryConfigsClient, DiscoveryConfigsPage, EventsClient, SearchEventsPage,
    SearchEventsQuery, UserTasksClient, UserTasksPage,
};
pub use model::{Event, SsmRunEvent};
pub use paging::PagedResourceIterator;
pub use scope::CancelScope;
