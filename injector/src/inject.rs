use anyhow::{Context, Result, anyhow};
use dll_syringe::{
    Syringe,
    process::OwnedProcess,
    rpc::{RawRpcFunctionPtr, RemoteRawProcedure},
};
use std::{env, path::PathBuf};
use windows::Win32::Foundation::HWND;

const PAYLOAD_DLL: &str = "payload.dll";

// the payload is expected to sit next to the injector executable
fn payload_path() -> Result<PathBuf> {
    let mut path = env::current_exe().context("could not locate the injector executable")?;
    path.pop();
    path.push(PAYLOAD_DLL);
    Ok(path)
}

fn remote_proc<F>(syringe: &Syringe, name: &str) -> Result<RemoteRawProcedure<F>>
where
    F: RawRpcFunctionPtr,
{
    let payload = syringe
        .find_or_inject(payload_path()?)
        .with_context(|| format!("failed to inject {}", PAYLOAD_DLL))?;

    unsafe { syringe.get_raw_procedure::<F>(payload, name) }
        .with_context(|| format!("failed to look up {} in the payload", name))?
        .ok_or_else(|| anyhow!("payload does not export {}", name))
}

/// Hides (or unhides) the given windows of `process` from screen capture,
/// optionally toggling their taskbar presence as well.
pub fn set_window_visibility(
    process: OwnedProcess,
    hwnds: &[u32],
    hide: bool,
    taskbar: bool,
) -> Result<()> {
    let syringe = Syringe::for_process(process);

    let set_visibility =
        remote_proc::<extern "system" fn(HWND, bool) -> bool>(&syringe, "SetWindowVisibility")?;
    let set_taskbar = if taskbar {
        Some(remote_proc::<extern "system" fn(HWND, bool) -> bool>(
            &syringe,
            "HideFromTaskbar",
        )?)
    } else {
        None
    };

    for &hwnd in hwnds {
        set_visibility
            .call(HWND(hwnd as *mut _), hide)
            .context("remote SetWindowVisibility call failed")?;

        if let Some(set_taskbar) = &set_taskbar {
            set_taskbar
                .call(HWND(hwnd as *mut _), hide)
                .context("remote HideFromTaskbar call failed")?;
        }
    }
    Ok(())
}

/// Invokes the payload's bulk operation inside `process`: its classifier
/// decides which windows qualify, this side only picks hide or show.
pub fn apply_to_all(process: OwnedProcess, hide: bool) -> Result<()> {
    let syringe = Syringe::for_process(process);

    let name = if hide { "HideAllWindows" } else { "ShowAllWindows" };
    remote_proc::<extern "system" fn()>(&syringe, name)?
        .call()
        .with_context(|| format!("remote {} call failed", name))
}
