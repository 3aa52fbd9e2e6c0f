use crate::core::config::MonitorConfig;
use crate::core::wifi_monitor::{ProbeKind, ProbeRunner};
use crate::error::{Result, WifimonError};

#[cfg(windows)]
pub fn is_elevated() -> bool {
    use std::mem;
    use std::ptr;
    use winapi::ctypes::c_void;

    unsafe {
        let mut handle: *mut c_void = ptr::null_mut();

        if winapi::um::processthreadsapi::OpenProcessToken(
            winapi::um::processthreadsapi::GetCurrentProcess(),
            winapi::um::winnt::TOKEN_QUERY,
            &mut handle,
        ) == 0
        {
            return false;
        }

        let mut elevation: winapi::um::winnt::TOKEN_ELEVATION = mem::zeroed();
        let mut size: u32 = 0;

        let result = winapi::um::securitybaseapi::GetTokenInformation(
            handle,
            winapi::um::winnt::TokenElevation,
            &mut elevation as *mut _ as *mut c_void,
            mem::size_of::<winapi::um::winnt::TOKEN_ELEVATION>() as u32,
            &mut size,
        );

        winapi::um::handleapi::CloseHandle(handle);

        result != 0 && elevation.TokenIsElevated != 0
    }
}

#[cfg(not(windows))]
pub fn is_elevated() -> bool {
    // On Unix, check if running as root
    unsafe { libc::geteuid() == 0 }
}

/// Verify the privileged radio probe can run before entering the loop.
///
/// Only applies when the radio source is marked privileged. The probe is run
/// once; a missing binary or a refused `sudo -n` is fatal.
pub fn ensure_probe_authorized<P: ProbeRunner>(config: &MonitorConfig, probes: &mut P) -> Result<()> {
    if !config.radio.privileged {
        return Ok(());
    }

    let program = config
        .radio
        .info_command
        .first()
        .ok_or_else(|| WifimonError::config("radio info command is empty"))?;

    if which::which(program).is_err() {
        return Err(WifimonError::probe_unavailable(format!(
            "'{}' not found in PATH",
            program
        )));
    }

    match probes.run(ProbeKind::RadioInfo) {
        Ok(_) => Ok(()),
        Err(WifimonError::ProbeUnavailable(msg)) => Err(WifimonError::ProbeUnavailable(msg)),
        Err(e) => Err(WifimonError::elevation_required(format!(
            "'{}' could not be run with the required privileges ({}). Run as root or allow it via passwordless sudo.",
            program, e
        ))),
    }
}
