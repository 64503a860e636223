use crate::core::store::DataStore;
use crate::domain::geo::Location;
use crate::domain::model::{
    AssistanceRequest, Capability, Helper, HelperId, RequestId, RequestStatus, RequestType,
    Vehicle,
};
use crate::domain::ports::Notifier;

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Dispatched { helper: HelperId, distance: f64 },
    NoHelperAvailable,
    AlreadyResolved,
    RequestNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved,
    NotFound,
}

/// Nearest helper with the given capability, scanning in roster order.
///
/// Uses a strict `<` against a running best that starts at `f64::MAX`, so among helpers at
/// the same minimal distance the earliest one wins and non-finite distances never match.
pub fn find_nearest_helper<'a>(
    helpers: &'a [Helper],
    required: Capability,
    location: &Location,
) -> Option<(&'a Helper, f64)> {
    let mut best: Option<&Helper> = None;
    let mut best_distance = f64::MAX;
    for helper in helpers.iter().filter(|h| h.capability == required) {
        let distance = helper.location.distance_to(location);
        tracing::debug!(helper_id = %helper.id, distance, "Candidate helper");
        // NaN 與無限距離永遠不會小於 f64::MAX
        if distance < best_distance {
            best_distance = distance;
            best = Some(helper);
        }
    }
    best.map(|helper| (helper, best_distance))
}

/// Creates, dispatches and resolves assistance requests against an in-memory store.
///
/// Every operation completes immediately. Failures (no capable helper, unknown id) are
/// reported through the notifier and leave the state untouched; nothing here returns an error.
pub struct AssistanceService<N: Notifier> {
    store: DataStore,
    notifier: N,
}

impl<N: Notifier> AssistanceService<N> {
    pub fn new(store: DataStore, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Records a new request and dispatches it right away.
    ///
    /// `liters_needed` is stored as given; it only means something for fuel requests.
    pub fn create_request(
        &mut self,
        request_type: RequestType,
        vehicle: Vehicle,
        location: Location,
        liters_needed: f64,
    ) -> &AssistanceRequest {
        let id = self.store.next_request_id();
        let mut request =
            AssistanceRequest::new(id, request_type, vehicle, location, liters_needed);

        tracing::info!(request_id = id, %request_type, %location, "Request created");
        self.notifier
            .notify(&format!("Request created: {}", request.summary(None)));

        Self::dispatch_request(self.store.helpers(), &self.notifier, &mut request);
        self.store.add_request(request)
    }

    /// Matches a request to the nearest capable helper.
    ///
    /// Can be called again for a request left pending; a dispatched request is matched
    /// afresh. Resolved requests are left alone.
    pub fn dispatch(&mut self, request_id: RequestId) -> DispatchOutcome {
        let (helpers, request) = self.store.helpers_and_request_mut(request_id);
        match request {
            Some(request) => Self::dispatch_request(helpers, &self.notifier, request),
            None => {
                tracing::warn!(request_id, "Dispatch requested for unknown request");
                self.notifier
                    .notify(&format!("Request not found: {}", request_id));
                DispatchOutcome::RequestNotFound
            }
        }
    }

    fn dispatch_request(
        helpers: &[Helper],
        notifier: &N,
        request: &mut AssistanceRequest,
    ) -> DispatchOutcome {
        if request.status() == RequestStatus::Resolved {
            notifier.notify(&format!("Request #{} is already resolved", request.id()));
            return DispatchOutcome::AlreadyResolved;
        }

        let required = request.request_type().required_capability();

        match find_nearest_helper(helpers, required, request.location()) {
            Some((helper, distance)) => {
                request.mark_dispatched(helper.id.clone());
                tracing::info!(
                    request_id = request.id(),
                    helper_id = %helper.id,
                    distance,
                    "Helper dispatched"
                );
                notifier.notify(&format!(
                    "Dispatched {} to request #{} (dist={:.4})",
                    helper.name,
                    request.id(),
                    distance
                ));
                DispatchOutcome::Dispatched {
                    helper: helper.id.clone(),
                    distance,
                }
            }
            None => {
                tracing::warn!(
                    request_id = request.id(),
                    %required,
                    "No helper with required capability"
                );
                notifier.notify(&format!("No helper available for request #{}", request.id()));
                DispatchOutcome::NoHelperAvailable
            }
        }
    }

    /// Marks a request resolved from any status. Resolving twice is harmless.
    pub fn resolve_request(&mut self, request_id: RequestId) -> ResolveOutcome {
        match self.store.request_mut(request_id) {
            Some(request) => request.mark_resolved(),
            None => {
                tracing::warn!(request_id, "Resolve requested for unknown request");
                self.notifier
                    .notify(&format!("Request not found: {}", request_id));
                return ResolveOutcome::NotFound;
            }
        }

        tracing::info!(request_id, "Request resolved");
        if let Some(request) = self.store.request(request_id) {
            let message = format!("Request resolved: {}", self.describe(request));
            self.notifier.notify(&message);
        }
        ResolveOutcome::Resolved
    }

    pub fn list_helpers(&self) -> &[Helper] {
        self.store.helpers()
    }

    pub fn request(&self, request_id: RequestId) -> Option<&AssistanceRequest> {
        self.store.request(request_id)
    }

    pub fn history(&self) -> &[AssistanceRequest] {
        self.store.history()
    }

    /// One summary line per request, in creation order.
    pub fn history_lines(&self) -> Vec<String> {
        self.store
            .history()
            .iter()
            .map(|request| self.describe(request))
            .collect()
    }

    pub fn print_history(&self) {
        self.notifier.notify("=== Request History ===");
        for line in self.history_lines() {
            self.notifier.notify(&line);
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn describe(&self, request: &AssistanceRequest) -> String {
        let helper_name = request
            .assigned_helper()
            .and_then(|id| self.store.helper(id.as_str()))
            .map(|helper| helper.name.as_str());
        request.summary(helper_name)
    }
}
