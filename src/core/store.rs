use crate::domain::geo::Location;
use crate::domain::model::{AssistanceRequest, Capability, Helper, RequestId};

/// In-memory helpers and request history.
///
/// Helpers are fixed once the store is built. History is append-only; requests are
/// mutated in place but never removed.
#[derive(Debug, Clone)]
pub struct DataStore {
    helpers: Vec<Helper>,
    history: Vec<AssistanceRequest>,
    next_id: RequestId,
}

impl DataStore {
    /// Store seeded with the default helper roster.
    pub fn new() -> Self {
        Self::with_helpers(default_helpers())
    }

    pub fn with_helpers(helpers: Vec<Helper>) -> Self {
        Self {
            helpers,
            history: Vec::new(),
            next_id: 1,
        }
    }

    /// Hands out the next request id. Ids start at 1 and are never reused.
    pub fn next_request_id(&mut self) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends without validation; the caller guarantees a unique id.
    pub fn add_request(&mut self, request: AssistanceRequest) -> &AssistanceRequest {
        self.history.push(request);
        &self.history[self.history.len() - 1]
    }

    pub fn helpers(&self) -> &[Helper] {
        &self.helpers
    }

    pub fn history(&self) -> &[AssistanceRequest] {
        &self.history
    }

    pub fn helper(&self, id: &str) -> Option<&Helper> {
        self.helpers.iter().find(|h| h.id.as_str() == id)
    }

    pub fn request(&self, id: RequestId) -> Option<&AssistanceRequest> {
        self.history.iter().find(|r| r.id() == id)
    }

    pub fn request_mut(&mut self, id: RequestId) -> Option<&mut AssistanceRequest> {
        self.history.iter_mut().find(|r| r.id() == id)
    }

    /// Read access to helpers alongside write access to one request.
    pub fn helpers_and_request_mut(
        &mut self,
        id: RequestId,
    ) -> (&[Helper], Option<&mut AssistanceRequest>) {
        let request = self.history.iter_mut().find(|r| r.id() == id);
        (&self.helpers, request)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_helpers() -> Vec<Helper> {
    vec![
        Helper::new(
            "H1",
            "Speedy Tow",
            Capability::Tow,
            Location::new(12.9712, 77.5936),
            4.5,
        ),
        Helper::new(
            "H2",
            "FuelBuddy",
            Capability::Fuel,
            Location::new(12.9720, 77.5900),
            4.2,
        ),
        Helper::new(
            "H3",
            "Ramesh Mechanic",
            Capability::Mechanic,
            Location::new(12.9700, 77.5950),
            4.7,
        ),
        Helper::new(
            "H4",
            "Express Fuel",
            Capability::Fuel,
            Location::new(12.9750, 77.5920),
            4.0,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RequestType, Vehicle};

    #[test]
    fn test_default_seed_order() {
        let store = DataStore::new();
        let ids: Vec<&str> = store.helpers().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["H1", "H2", "H3", "H4"]);
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_request_ids_increase_from_one() {
        let mut store = DataStore::with_helpers(Vec::new());
        assert_eq!(store.next_request_id(), 1);
        assert_eq!(store.next_request_id(), 2);
        assert_eq!(store.next_request_id(), 3);
    }

    #[test]
    fn test_add_and_lookup_request() {
        let mut store = DataStore::new();
        let id = store.next_request_id();
        store.add_request(AssistanceRequest::new(
            id,
            RequestType::Breakdown,
            Vehicle::new("MH12", "Nexon", "Diesel"),
            Location::new(0.0, 0.0),
            0.0,
        ));

        assert_eq!(store.history().len(), 1);
        assert!(store.request(id).is_some());
        assert!(store.request(id + 1).is_none());
        assert_eq!(store.helper("H3").map(|h| h.name.as_str()), Some("Ramesh Mechanic"));
        assert!(store.helper("H9").is_none());
    }
}
