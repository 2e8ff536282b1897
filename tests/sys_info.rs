use rtclog::sys_info::{
    ByteOrder, get_sys_info,
    endianness::{PROBE_PATTERN, probe, read_probe},
};

#[test]
fn sys_info_is_cached_and_populated() {
    let first = get_sys_info().clone();
    let second = get_sys_info();
    assert_eq!(&first, second);
    assert!(!first.machine.is_empty());
    assert!(!first.os_name.is_empty());
    assert!(first.info.starts_with(&format!("{}-{}", first.machine, first.os_name)));
}

#[test]
fn byte_order_probe_matches_build() {
    let readout = read_probe();
    #[cfg(target_endian = "little")]
    {
        assert_eq!(readout.halves, [0x3344, 0x1122]);
        assert_eq!(readout.bytes, [0x44, 0x33, 0x22, 0x11]);
    }
    #[cfg(target_endian = "big")]
    {
        assert_eq!(readout.halves, [0x1122, 0x3344]);
        assert_eq!(readout.bytes, [0x11, 0x22, 0x33, 0x44]);
    }
    assert_eq!(u32::from_ne_bytes(readout.bytes), PROBE_PATTERN);
    assert_eq!(probe(), Ok(ByteOrder::configured()));
    assert_eq!(get_sys_info().is_little_endian, ByteOrder::configured() == ByteOrder::Little);
}
