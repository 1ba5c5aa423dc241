/// Log a handler entry point
#[macro_export]
macro_rules! log_handler_entry {
    ($ctx:expr, $handler:expr) => {
        log::debug!("{} -> {} handler", $ctx.log_prefix(), $handler);
    };
}
