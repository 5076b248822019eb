//! Privilege-elevation policy for the shared-region open.
//!
//! Opening a mapping created by an elevated game process needs admin
//! rights. When the open fails with access denied and we are not yet
//! elevated, the process relaunches itself once with the "runas" verb;
//! an elevated process that still gets denied reports and halts.

/// Whether the current process token is elevated.
#[cfg(target_os = "windows")]
pub fn is_elevated() -> bool {
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::Security::{
        GetTokenInformation, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation,
    };
    use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    let mut token = HANDLE::default();
    // SAFETY: query-only access to our own process token.
    unsafe {
        if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token).is_err() {
            return false;
        }
        let mut elevation = TOKEN_ELEVATION::default();
        let mut returned = 0u32;
        let queried = GetTokenInformation(
            token,
            TokenElevation,
            Some(&mut elevation as *mut TOKEN_ELEVATION as *mut _),
            std::mem::size_of::<TOKEN_ELEVATION>() as u32,
            &mut returned,
        );
        let _ = CloseHandle(token);
        queried.is_ok() && elevation.TokenIsElevated != 0
    }
}

/// Relaunch this executable elevated, with the same arguments.
#[cfg(target_os = "windows")]
pub fn relaunch_elevated() -> anyhow::Result<()> {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::Shell::ShellExecuteW;
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
    use windows::core::HSTRING;

    let exe = std::env::current_exe()?;
    let params = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    // SAFETY: shell launch of our own executable; the returned
    // pseudo-HINSTANCE is only compared against the documented
    // success threshold.
    let result = unsafe {
        ShellExecuteW(
            HWND::default(),
            &HSTRING::from("runas"),
            &HSTRING::from(exe.as_os_str()),
            &HSTRING::from(params.as_str()),
            &HSTRING::new(),
            SW_SHOWNORMAL,
        )
    };

    // ShellExecuteW reports success with a value greater than 32.
    if result.0 as usize <= 32 {
        anyhow::bail!("Elevation request was refused");
    }
    Ok(())
}

#[cfg(not(target_os = "windows"))]
pub fn is_elevated() -> bool {
    true
}

#[cfg(not(target_os = "windows"))]
pub fn relaunch_elevated() -> anyhow::Result<()> {
    anyhow::bail!("Privilege elevation is only supported on Windows")
}
