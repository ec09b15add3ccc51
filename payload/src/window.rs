use windows::Win32::{
    Foundation::{HWND, LPARAM, TRUE},
    System::Threading::GetCurrentProcessId,
    UI::WindowsAndMessaging::{
        EnumWindows, GWL_EXSTYLE, GWL_STYLE, GetDesktopWindow, GetParent, GetWindowLongPtrW,
        GetWindowTextW, GetWindowThreadProcessId, IsWindow, IsWindowVisible,
        SetWindowDisplayAffinity, SetWindowLongPtrW, WDA_EXCLUDEFROMCAPTURE, WDA_NONE, WINDOW_DISPLAY_AFFINITY,
        WS_CHILD, WS_EX_APPWINDOW, WS_EX_TOOLWINDOW,
    },
};
use windows::core::BOOL;

fn is_live(hwnd: HWND) -> bool {
    !hwnd.is_invalid() && unsafe { IsWindow(Some(hwnd)) }.as_bool()
}

/// Decides whether `hwnd` is a real user-facing application window, i.e. a
/// candidate for the bulk hide/show operations. A null or stale handle is
/// simply not a valid application window; this never fails.
///
/// Titleless top-level windows are rejected on purpose: an empty title is the
/// heuristic for internal helper windows, at the cost of false negatives for
/// legitimately untitled applications.
pub fn is_valid_app_window(hwnd: HWND) -> bool {
    if !is_live(hwnd) {
        return false;
    }

    if !unsafe { IsWindowVisible(hwnd) }.as_bool() {
        return false;
    }

    // top-level only: no parent, or the desktop itself
    let parent = unsafe { GetParent(hwnd) }.unwrap_or_default();
    if !parent.is_invalid() && parent != unsafe { GetDesktopWindow() } {
        return false;
    }

    // some window configurations set the child style without a parent
    // relationship (and vice versa), so check the style bit as well
    let style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) };
    if style & WS_CHILD.0 as isize != 0 {
        return false;
    }

    let ex_style = unsafe { GetWindowLongPtrW(hwnd, GWL_EXSTYLE) };
    if ex_style & WS_EX_TOOLWINDOW.0 as isize != 0 {
        return false;
    }

    let mut title = [0u16; 256];
    unsafe { GetWindowTextW(hwnd, &mut title) > 0 }
}

fn owner_pid(hwnd: HWND) -> u32 {
    let mut pid = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    pid
}

unsafe extern "system" fn collect_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let out: &mut Vec<HWND> = unsafe { &mut *(lparam.0 as *mut _) };
    out.push(hwnd);
    TRUE // continue enumeration
}

/// Every top-level window in the system, in OS enumeration order. Ownership
/// filtering is deliberately left to the caller.
pub fn top_level_windows() -> Vec<HWND> {
    let mut windows = Vec::new();
    let param = LPARAM(&mut windows as *mut _ as isize);
    let _ = unsafe { EnumWindows(Some(collect_proc), param) };
    windows
}

/// Applies `affinity` to every valid application window owned by the current
/// process. Best-effort: a window that disappears between enumeration and the
/// attribute write is skipped, as is any window the OS refuses to update.
pub fn apply_to_owned_windows(affinity: WINDOW_DISPLAY_AFFINITY) {
    let current_pid = unsafe { GetCurrentProcessId() };

    for hwnd in top_level_windows() {
        if owner_pid(hwnd) != current_pid {
            continue;
        }
        if !is_valid_app_window(hwnd) {
            continue;
        }
        let _ = unsafe { SetWindowDisplayAffinity(hwnd, affinity) };
    }
}

/// Excludes a single window from screen capture (or restores it). The window
/// stays visible to the interactive user either way. Returns `false` for a
/// null or stale handle, or when the OS rejects the change.
pub fn set_capture_visibility(hwnd: HWND, hide: bool) -> bool {
    if !is_live(hwnd) {
        return false;
    }

    let affinity = if hide { WDA_EXCLUDEFROMCAPTURE } else { WDA_NONE };
    unsafe { SetWindowDisplayAffinity(hwnd, affinity) }.is_ok()
}

/// Removes a window's taskbar entry (or restores it) by flipping the two
/// mutually exclusive extended-style bits. All other extended-style bits are
/// preserved.
pub fn set_taskbar_presence(hwnd: HWND, hide: bool) -> bool {
    if !is_live(hwnd) {
        return false;
    }

    let ex_style = unsafe { GetWindowLongPtrW(hwnd, GWL_EXSTYLE) };
    if ex_style == 0 {
        return false;
    }

    let ex_style = if hide {
        (ex_style | WS_EX_TOOLWINDOW.0 as isize) & !(WS_EX_APPWINDOW.0 as isize)
    } else {
        (ex_style | WS_EX_APPWINDOW.0 as isize) & !(WS_EX_TOOLWINDOW.0 as isize)
    };

    unsafe { SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style) };
    true
}
