use std::collections::HashMap;
use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, TRUE},
        Graphics::Dwm::{DWMWA_CLOAKED, DwmGetWindowAttribute},
        UI::WindowsAndMessaging::{
            EnumWindows, GetWindowDisplayAffinity, GetWindowTextW, GetWindowThreadProcessId,
            IsWindowVisible,
        },
    },
    core::BOOL,
};

/// A visible top-level window observed from outside its owning process.
#[derive(Debug)]
pub struct WindowInfo {
    pub hwnd: u32,
    pub title: String,
    pub pid: u32,
    pub hidden: bool,
}

fn window_title(hwnd: HWND) -> Option<String> {
    let mut buf = [0u16; 256];
    match unsafe { GetWindowTextW(hwnd, &mut buf) } {
        0 => None,
        len => Some(String::from_utf16_lossy(&buf[..len as usize])),
    }
}

// DWM keeps suspended UWP windows (Calculator, Settings) enumerable but
// cloaked; they are not actionable targets
fn is_cloaked(hwnd: HWND) -> bool {
    let mut cloaked: u32 = 0;
    let queried = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut _ as _,
            std::mem::size_of::<u32>() as u32,
        )
    };
    queried.is_err() || cloaked != 0
}

fn capture_hidden(hwnd: HWND) -> Option<bool> {
    let mut affinity: u32 = 0;
    unsafe { GetWindowDisplayAffinity(hwnd, &mut affinity as *mut _) }.ok()?;
    Some(affinity != 0)
}

fn owner_pid(hwnd: HWND) -> Option<u32> {
    let mut pid = 0u32;
    match unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) } {
        0 => None,
        _ => Some(pid),
    }
}

unsafe extern "system" fn enum_windows_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    if !unsafe { IsWindowVisible(hwnd) }.as_bool() || is_cloaked(hwnd) {
        return TRUE;
    }

    // titleless windows are not worth listing; the payload skips them too
    let (Some(title), Some(hidden), Some(pid)) =
        (window_title(hwnd), capture_hidden(hwnd), owner_pid(hwnd))
    else {
        return TRUE;
    };

    let out: &mut Vec<WindowInfo> = unsafe { &mut *(lparam.0 as *mut _) };
    out.push(WindowInfo {
        hwnd: hwnd.0 as u32,
        title,
        pid,
        hidden,
    });

    TRUE // keep enumerating
}

/// Every visible, titled, uncloaked top-level window in the system.
pub fn list_windows() -> Vec<WindowInfo> {
    let mut windows = Vec::new();

    // the callback recovers the Vec from the LPARAM
    let param = LPARAM(&mut windows as *mut _ as isize);
    let _ = unsafe { EnumWindows(Some(enum_windows_proc), param) };
    windows
}

/// Window handles grouped by owning process ID.
pub fn windows_by_process() -> HashMap<u32, Vec<u32>> {
    let mut by_pid: HashMap<u32, Vec<u32>> = HashMap::new();
    for info in list_windows() {
        by_pid.entry(info.pid).or_default().push(info.hwnd);
    }
    by_pid
}
