pub mod dispatch;
pub mod store;

pub use crate::domain::geo::Location;
pub use crate::domain::model::{
    AssistanceRequest, Capability, Helper, HelperId, RequestId, RequestStatus, RequestType,
    Vehicle,
};
pub use crate::domain::ports::Notifier;
pub use crate::utils::error::Result;
