//! In-process payload implementing the WindowHider exports. Loaded into a
//! target process by the injector (or any host) and driven through the four
//! `extern "system"` entry points below.
#![cfg(windows)]

pub mod window;

use core::ffi::c_void;
use windows::Win32::{
    Foundation::{HMODULE, HWND, TRUE},
    System::{LibraryLoader::DisableThreadLibraryCalls, SystemServices::DLL_PROCESS_ATTACH},
    UI::WindowsAndMessaging::{WDA_EXCLUDEFROMCAPTURE, WDA_NONE},
};
use windows::core::BOOL;

/// Hides `hwnd` from screen capture (or restores it) without touching its
/// on-screen presence. The handle is trusted, not classified; callers can
/// target helper windows the bulk operations would skip.
#[unsafe(no_mangle)]
pub extern "system" fn SetWindowVisibility(hwnd: HWND, hide: bool) -> bool {
    window::set_capture_visibility(hwnd, hide)
}

/// Excludes every valid application window of this process from capture.
#[unsafe(no_mangle)]
pub extern "system" fn HideAllWindows() {
    window::apply_to_owned_windows(WDA_EXCLUDEFROMCAPTURE);
}

/// Restores normal capture visibility for every valid application window of
/// this process.
#[unsafe(no_mangle)]
pub extern "system" fn ShowAllWindows() {
    window::apply_to_owned_windows(WDA_NONE);
}

/// Removes (or restores) the taskbar entry of `hwnd`.
#[unsafe(no_mangle)]
pub extern "system" fn HideFromTaskbar(hwnd: HWND, hide: bool) -> bool {
    window::set_taskbar_presence(hwnd, hide)
}

// No state to set up or tear down; thread notifications are just noise for
// this DLL.
#[unsafe(no_mangle)]
extern "system" fn DllMain(module: HMODULE, reason: u32, _reserved: *mut c_void) -> BOOL {
    if reason == DLL_PROCESS_ATTACH {
        let _ = unsafe { DisableThreadLibraryCalls(module) };
    }
    TRUE
}
