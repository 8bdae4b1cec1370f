//! Wired carrier and Wi-Fi link quality.

use nerdbar_core::{NetworkReading, Result, Sensor};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sum of `carrier` values over every `<net_dir>/<prefix>*` interface.
///
/// `0` means no wired link is up.  Interfaces that are administratively down
/// refuse to report carrier; they count as zero.
pub fn wired_carriers(net_dir: &Path, prefix: &str) -> u32 {
    let Ok(entries) = std::fs::read_dir(net_dir) else {
        return 0;
    };

    entries
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().starts_with(prefix))
        .filter_map(|e| {
            let path = e.path().join("carrier");
            match std::fs::read_to_string(&path) {
                Ok(raw) => raw.trim().parse::<u32>().ok(),
                Err(err) => {
                    debug!("No carrier from '{}': {err}", path.display());
                    None
                }
            }
        })
        .sum()
}

/// Link quality of `interface` from a `/proc/net/wireless` style table.
///
/// Returns `None` when the interface is not listed, i.e. not associated.
pub fn parse_wireless(table: &str, interface: &str) -> Option<f32> {
    table
        .lines()
        .skip(2)
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim() == interface)
        .and_then(|(_, stats)| stats.split_whitespace().nth(1))
        .and_then(|link| link.trim_end_matches('.').parse::<f32>().ok())
}

/// Wired-first connectivity sensor.
#[derive(Debug, Clone)]
pub struct NetworkSensor {
    pub interface: String,
    pub wired_prefix: String,
    pub net_dir: PathBuf,
    pub wireless_file: PathBuf,
}

impl Sensor for NetworkSensor {
    type Reading = NetworkReading;

    fn sense(&mut self) -> Result<NetworkReading> {
        let carriers = wired_carriers(&self.net_dir, &self.wired_prefix);
        if carriers > 0 {
            return Ok(NetworkReading::Wired { carriers });
        }

        let table = match std::fs::read_to_string(&self.wireless_file) {
            Ok(table) => table,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(match parse_wireless(&table, &self.interface) {
            Some(quality) => NetworkReading::Wireless { quality },
            None => NetworkReading::Disconnected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const WIRELESS: &str = "\
Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
 face | tus | link level noise |  nwid  crypt   frag  retry   misc | beacon | 22
wlp3s0: 0000   56.  -54.  -256        0      0      0      0    116        0
";

    fn sensor(td: &TempDir, interface: &str) -> NetworkSensor {
        NetworkSensor {
            interface:     interface.into(),
            wired_prefix:  "enp".into(),
            net_dir:       td.path().join("net"),
            wireless_file: td.path().join("wireless"),
        }
    }

    fn iface(td: &TempDir, name: &str, carrier: Option<&str>) {
        let dir = td.path().join("net").join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(c) = carrier {
            fs::write(dir.join("carrier"), c).unwrap();
        }
    }

    #[test]
    fn parses_link_quality() {
        assert_eq!(parse_wireless(WIRELESS, "wlp3s0"), Some(56.0));
        assert_eq!(parse_wireless(WIRELESS, "wlan0"), None);
        assert_eq!(parse_wireless("", "wlan0"), None);
    }

    #[test]
    fn interface_names_match_exactly() {
        assert_eq!(parse_wireless(WIRELESS, "wlp3"), None);
        assert_eq!(parse_wireless(WIRELESS, " wlp3s0 "), None);
    }

    #[test]
    fn sums_carriers_of_matching_interfaces() {
        let td = TempDir::new().unwrap();
        iface(&td, "enp0s31f6", Some("1\n"));
        iface(&td, "enp4s0", Some("1\n"));
        iface(&td, "enp5s0", None);
        iface(&td, "wlp3s0", Some("1\n"));
        assert_eq!(wired_carriers(&td.path().join("net"), "enp"), 2);
    }

    #[test]
    fn wired_wins_over_wireless() {
        let td = TempDir::new().unwrap();
        iface(&td, "enp4s0", Some("1"));
        fs::write(td.path().join("wireless"), WIRELESS).unwrap();
        assert_eq!(sensor(&td, "wlp3s0").sense().unwrap(), NetworkReading::Wired { carriers: 1 });
    }

    #[test]
    fn wireless_when_cable_unplugged() {
        let td = TempDir::new().unwrap();
        iface(&td, "enp4s0", Some("0"));
        fs::write(td.path().join("wireless"), WIRELESS).unwrap();
        assert_eq!(
            sensor(&td, "wlp3s0").sense().unwrap(),
            NetworkReading::Wireless { quality: 56.0 }
        );
    }

    #[test]
    fn disconnected_without_any_link() {
        let td = TempDir::new().unwrap();
        assert_eq!(sensor(&td, "wlan0").sense().unwrap(), NetworkReading::Disconnected);
    }
}
