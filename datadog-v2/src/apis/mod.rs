//! Operation wrappers, one client per API resource.

mod events;
mod incidents;
mod logs_archives;

pub use events::{EventsApi, ListEventsOptionalParameters, SearchEventsOptionalParameters};
pub use incidents::{
    GetIncidentOptionalParameters, IncidentsApi, ListIncidentsOptionalParameters,
    UpdateIncidentOptionalParameters,
};
pub use logs_archives::LogsArchivesApi;
