/// Target used for events that mark a completed step.
pub const SUCCESS_TARGET: &str = "topomap::success";

/// Target used for raw terminal output routed through the subscriber.
pub const PRINT_TARGET: &str = "topomap::print";

/// Logs a completed step. Rendered with the success symbol by the CLI formatter.
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        ::tracing::info!(target: "topomap::success", $($arg)+)
    };
}

/// Logs a notice about data that is valid but produced nothing.
#[macro_export]
macro_rules! notice {
    ($($arg:tt)+) => {
        ::tracing::warn!(target: "topomap::notice", $($arg)+)
    };
}
