//! Per-facet fetch lifecycle: keying, caching, cancellation and stale-result
//! rejection.

mod segments;
mod single;

pub use segments::SegmentsController;
pub use single::{FacetController, FacetItem, FacetState};

use tokio_util::sync::CancellationToken;
use tracing::debug;
use vidscout_stream::{Generation, GenerationTracker};

use super::facet::Facet;
use super::request::{FetchExecutor, FetchRequest};

struct InFlight {
    id: Generation,
    token: CancellationToken,
    offset: u64,
}

/// Holds the one request a controller may have outstanding.
///
/// Issuing a request cancels the previous one and advances the generation, so
/// only the newest completion is ever accepted.
#[derive(Default)]
struct RequestSlot {
    generations: GenerationTracker,
    in_flight: Option<InFlight>,
}

impl RequestSlot {
    fn issue(&mut self, executor: &mut dyn FetchExecutor, request: FetchRequest) -> Generation {
        self.cancel();
        let id = self.generations.advance();
        let offset = request.offset;
        debug!(
            facet = %request.key.facet,
            query = %request.key.query,
            offset,
            generation = %id,
            "issuing search request"
        );
        let token = executor.execute(id, request);
        self.in_flight = Some(InFlight { id, token, offset });
        id
    }

    /// Cancel the outstanding request, if any, and make its completion stale.
    fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(generation = %in_flight.id, "cancelling superseded request");
            in_flight.token.cancel();
        }
        self.generations.retire();
    }

    /// Claim the completion for `id`. Returns the request offset when `id` is
    /// the outstanding request and `None` when the completion is stale.
    fn complete(&mut self, facet: Facet, id: Generation) -> Option<u64> {
        let matches = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.id == id && self.generations.is_current(id));
        if !matches {
            debug!(%facet, generation = %id, "discarding stale completion");
            return None;
        }
        self.in_flight.take().map(|in_flight| in_flight.offset)
    }

    fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}
