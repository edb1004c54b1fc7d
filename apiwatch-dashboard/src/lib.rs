pub mod render;
pub mod run;
pub mod session;

pub use render::{LinePrinter, RenderGateway, ViewFrame};
pub use run::run;
pub use session::{DashboardSession, ViewUpdate};
