pub mod config;
pub mod error;
pub mod event;
pub mod view;

pub use config::DashboardConfig;
pub use error::WatchError;
pub use event::{Event, EventId, RawEvent};
pub use view::ViewSpec;
