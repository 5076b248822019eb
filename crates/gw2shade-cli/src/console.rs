//! Console window visibility control.

/// Hide the console window attached to this process.
#[cfg(target_os = "windows")]
pub fn hide() -> anyhow::Result<()> {
    use windows::Win32::System::Console::GetConsoleWindow;
    use windows::Win32::UI::WindowsAndMessaging::{SW_HIDE, ShowWindow};

    // SAFETY: GetConsoleWindow returns the attached console's HWND or
    // null; ShowWindow on a valid HWND has no failure mode we act on.
    unsafe {
        let hwnd = GetConsoleWindow();
        if hwnd.0.is_null() {
            anyhow::bail!("No console window attached to this process");
        }
        let _ = ShowWindow(hwnd, SW_HIDE);
    }
    Ok(())
}

#[cfg(not(target_os = "windows"))]
pub fn hide() -> anyhow::Result<()> {
    anyhow::bail!("Console hiding is only supported on Windows")
}
