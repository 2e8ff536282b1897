//! Raw host identification strings, before packing into [`SysInfo`](super::sys_info::SysInfo).

/// Identification strings as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostIdent {
    pub machine: String,
    pub os_name: String,
    pub os_release: String,
    pub sdk_name: String,
    pub sdk_release: String,
}

/// Queries the running host. Fields the platform cannot report fall back to
/// the compile-time target description.
#[must_use]
pub fn query_host() -> HostIdent {
    let (os_name, os_release, machine) = uname().unwrap_or_else(|| {
        (
            std::env::consts::OS.to_owned(),
            String::new(),
            std::env::consts::ARCH.to_owned(),
        )
    });
    HostIdent {
        machine,
        os_name,
        os_release,
        sdk_name: sdk_name().to_owned(),
        sdk_release: sdk_release().unwrap_or_default(),
    }
}

/// `(sysname, release, machine)`.
#[cfg(unix)]
fn uname() -> Option<(String, String, String)> {
    // SAFETY: `utsname` is plain old data; all-zero is a valid value.
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: `uts` is a valid, writable `utsname`.
    if unsafe { libc::uname(&mut uts) } != 0 {
        return None;
    }
    Some((
        c_field(&uts.sysname),
        c_field(&uts.release),
        c_field(&uts.machine),
    ))
}

#[cfg(not(unix))]
fn uname() -> Option<(String, String, String)> {
    None
}

/// NUL-terminated `c_char` array to an owned string; the array end terminates too.
#[cfg(unix)]
fn c_field(raw: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn sdk_name() -> &'static str {
    if cfg!(target_env = "gnu") {
        "glibc"
    } else if cfg!(target_env = "musl") {
        "musl"
    } else if cfg!(target_env = "msvc") {
        "msvc"
    } else {
        "libc"
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn sdk_release() -> Option<String> {
    // SAFETY: returns a pointer to a static NUL-terminated string owned by glibc.
    let ptr = unsafe { libc::gnu_get_libc_version() };
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated, see above.
    let version = unsafe { std::ffi::CStr::from_ptr(ptr) };
    Some(version.to_string_lossy().into_owned())
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn sdk_release() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_reports_machine_and_os() {
        let host = query_host();
        assert!(!host.machine.is_empty());
        assert!(!host.os_name.is_empty());
        assert!(!host.sdk_name.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn c_field_stops_at_nul_or_end() {
        let raw: Vec<libc::c_char> = b"Linux\0junk".iter().map(|&b| b as libc::c_char).collect();
        assert_eq!(c_field(&raw), "Linux");
        let unterminated: Vec<libc::c_char> = b"x86".iter().map(|&b| b as libc::c_char).collect();
        assert_eq!(c_field(&unterminated), "x86");
    }
}
