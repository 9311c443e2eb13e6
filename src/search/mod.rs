//! Search aggregation engine.
//!
//! Everything here is synchronous and clock-driven: callers pass `Instant`s
//! in and feed completions back, which keeps the engine independent of the
//! terminal and of the async transport.

mod cache;
mod controller;
mod facet;
mod limits;
mod location;
mod model;
mod pagination;
mod query;
mod request;
mod session;
mod status;
mod store;
mod viewport;

pub use cache::FreshnessCache;
pub use controller::{FacetController, FacetItem, FacetState, SegmentsController};
pub use facet::{EnabledFacets, Facet};
pub use limits::*;
pub use location::{DEFAULT_LINK_BASE, LinkSync, Location, MemoryLocation, SearchState};
pub use model::{
    DescriptionResult, ErrorBody, FacetResponse, Pagination, ResultId, ResultPage, Segment,
    SegmentsResponse, TitleResult,
};
pub use pagination::{Exhaustion, PageState, Paginator};
pub use query::{QueryDebouncer, QueryError, ValidQuery, validate};
pub use request::{FetchEnvelope, FetchError, FetchExecutor, FetchKey, FetchPayload, FetchRequest};
pub use session::SearchSession;
pub use status::{Announcer, FacetSummary, SEARCH_FAILED, SEARCHING, synthesize};
pub use store::{Store, SubscriptionId};
pub use viewport::{ViewportGeometry, ViewportTrigger};
