use boxoffice_core::ExpiryHandle;
use tracing::info;
use crate::state::AppState;

/// Starts the background hold-expiry sweep on the configured cadence.
pub fn start_expiry_worker(state: &AppState) -> ExpiryHandle {
    let interval = state.rules.sweep_interval();
    info!("Starting expiry worker, sweeping every {:?}", interval);
    state.box_office.expiry_worker(interval).spawn()
}
