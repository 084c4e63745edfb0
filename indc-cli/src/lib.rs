pub mod app;
pub mod data;
pub mod telemetry;

pub use app::run as run_app;
