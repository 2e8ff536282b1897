use std::sync::OnceLock;

use crate::sys_info::{
    endianness::{ByteOrder, read_probe},
    host::{HostIdent, query_host},
};

static SYS_INFO: OnceLock<SysInfo> = OnceLock::new();

/// Immutable host identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysInfo {
    /// CPU architecture, e.g. `x86_64`.
    pub machine: String,
    /// Kernel or OS name, e.g. `Linux`.
    pub os_name: String,
    /// OS release packed by [`pack_version`].
    pub os_ver: u32,
    /// C library or platform SDK the crate was built against.
    pub sdk_name: String,
    /// SDK release packed by [`pack_version`]; 0 when unknown.
    pub sdk_ver: u32,
    /// Free-form one-line summary, `machine-os-release/sdk-release`.
    pub info: String,
    /// Runtime byte order, from the probe rather than the build target.
    pub is_little_endian: bool,
}

/// Returns the process-wide snapshot, querying the host on first use.
pub fn get_sys_info() -> &'static SysInfo {
    SYS_INFO.get_or_init(SysInfo::query)
}

impl SysInfo {
    /// Queries the host now, bypassing the cache.
    #[must_use]
    pub fn query() -> Self {
        let is_little_endian = read_probe().observed_order() == Some(ByteOrder::Little);
        Self::from_host(query_host(), is_little_endian)
    }

    #[must_use]
    pub fn from_host(host: HostIdent, is_little_endian: bool) -> Self {
        let info = format!(
            "{}-{}{}/{}{}",
            host.machine,
            host.os_name,
            dash_prefixed(&host.os_release),
            host.sdk_name,
            dash_prefixed(&host.sdk_release),
        );
        Self {
            os_ver: pack_version(&host.os_release),
            sdk_ver: pack_version(&host.sdk_release),
            machine: host.machine,
            os_name: host.os_name,
            sdk_name: host.sdk_name,
            info,
            is_little_endian,
        }
    }
}

fn dash_prefixed(s: &str) -> String {
    if s.is_empty() {
        String::new()
    } else {
        format!("-{s}")
    }
}

/// Packs a dotted release string as `major << 24 | minor << 16 | patch << 8 | build`.
///
/// Each component is the leading digits of its dot-separated part, clamped
/// to 255. Parsing stops at the first part that does not start with a digit
/// or that carries trailing non-digits. Missing components are 0.
#[must_use]
pub fn pack_version(release: &str) -> u32 {
    let mut packed = 0u32;
    for (i, part) in release.split('.').take(4).enumerate() {
        let digits = part.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            break;
        }
        let value = part[..digits].parse::<u32>().unwrap_or(u32::MAX).min(255);
        packed |= value << (24 - 8 * i);
        if digits < part.len() {
            break;
        }
    }
    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cached_snapshot_is_stable() {
        let a = get_sys_info();
        let b = get_sys_info();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a, &SysInfo::query());
        assert_eq!(a.is_little_endian, cfg!(target_endian = "little"));
    }

    #[test]
    fn packs_versions() {
        assert_eq!(pack_version("6.18.44-fc-v139"), 0x0612_2C00);
        assert_eq!(pack_version("2.31"), 0x021F_0000);
        assert_eq!(pack_version("1.2.3.4.5"), 0x0102_0304);
        assert_eq!(pack_version("10.300"), 0x0AFF_0000);
        assert_eq!(pack_version(""), 0);
        assert_eq!(pack_version("v2"), 0);
    }

    #[test]
    fn info_line_skips_missing_releases() {
        let host = HostIdent {
            machine: "aarch64".into(),
            os_name: "Linux".into(),
            os_release: "6.1.0".into(),
            sdk_name: "musl".into(),
            sdk_release: String::new(),
        };
        let info = SysInfo::from_host(host, true);
        assert_eq!(info.info, "aarch64-Linux-6.1.0/musl");
        assert_eq!(info.os_ver, 0x0601_0000);
        assert_eq!(info.sdk_ver, 0);
    }
}
