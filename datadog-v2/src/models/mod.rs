//! Request and response records for the v2 API.
//!
//! Every record keeps unrecognized keys in `additional_properties` and is
//! wrapped in [`Decoded`](api::Decoded) wherever it nests inside another
//! record, so a shape change on the server degrades to raw JSON instead of a
//! failed call.

mod events;
mod incidents;
mod logs_archives;

pub use events::*;
pub use incidents::*;
pub use logs_archives::*;
