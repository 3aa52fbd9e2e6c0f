use sysinfo::Networks;

/// Interface name used when nothing else is known
#[cfg(target_os = "macos")]
pub const FALLBACK_INTERFACE: &str = "en0";

#[cfg(not(target_os = "macos"))]
pub const FALLBACK_INTERFACE: &str = "wlan0";

/// Find the host's wireless interface from the kernel's interface list.
pub fn default_wireless_interface() -> Option<String> {
    let networks = Networks::new_with_refreshed_list();
    let names: Vec<&str> = networks.iter().map(|(name, _)| name.as_str()).collect();
    pick_wireless(&names)
}

/// Pick the most likely Wi-Fi interface among `names`.
///
/// Linux names wireless devices `wl*`; on macOS the built-in Wi-Fi is
/// conventionally `en0`.
pub fn pick_wireless(names: &[&str]) -> Option<String> {
    let mut wireless: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| name.starts_with("wl"))
        .collect();
    wireless.sort_unstable();

    if let Some(name) = wireless.first() {
        return Some(name.to_string());
    }

    if cfg!(target_os = "macos") && names.contains(&"en0") {
        return Some("en0".to_string());
    }

    None
}
