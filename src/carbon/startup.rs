use crate::carbon::client::{CarbonClient, CarbonClientOptions};
use tracing::error;

/// Process exit status used when the carbon connection cannot be established.
pub const FATAL_EXIT_STATUS: i32 = 1;

/// Decides what "terminate the process" means.
pub trait ExitHook {
    /// Called once with the exit status. May return, e.g. in tests.
    fn exit(&self, status: i32);
}

impl<F> ExitHook for F
where
    F: Fn(i32),
{
    fn exit(&self, status: i32) {
        self(status);
    }
}

/// Terminates the process with [`std::process::exit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl ExitHook for ProcessExit {
    fn exit(&self, status: i32) {
        std::process::exit(status);
    }
}

/// Connects to the carbon daemon or fails fast.
///
/// On failure the error is logged and `hook` is called with
/// [`FATAL_EXIT_STATUS`]. `None` is only ever returned if the hook returns.
pub fn connect_or_exit<H: ExitHook>(
    host: &str,
    port: u16,
    options: CarbonClientOptions,
    hook: &H,
) -> Option<CarbonClient> {
    match CarbonClient::connect(host, port, options) {
        Ok(client) => Some(client),
        Err(err) => {
            error!("Carbon connection failed, exiting: {err}");
            hook.exit(FATAL_EXIT_STATUS);
            None
        }
    }
}
