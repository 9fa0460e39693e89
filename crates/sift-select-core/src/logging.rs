//! Logging facilities for sift-select.
//!
//! sift-select uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Use the constants in [`targets`] with `tracing` directives (e.g. the
//! `RUST_LOG` environment filter) to enable logs for a single subsystem:
//!
//! ```text
//! RUST_LOG=sift_select::widget=debug,sift_select_core::signal=trace
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "sift_select_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "sift_select_core::signal";
    /// Widget target.
    pub const WIDGET: &str = "sift_select::widget";
    /// Model target.
    pub const MODEL: &str = "sift_select::model";
    /// Document click dispatch target.
    pub const DOCUMENT: &str = "sift_select::document";
}
