//! RON platform table files
//!
//! Lets users describe additional boards without rebuilding:
//!
//! ```ron
//! (
//!     platform: "jetson-orin-devkit-rev2",
//!     description: "Custom carrier board",
//!     pins: [
//!         (
//!             board_pin: 29,
//!             soc_name: "soc_gpio32_pq5",
//!             functions: ["extperiph3"],
//!             pinmux_register: Some(0x02430090),
//!         ),
//!     ],
//! )
//! ```

use std::path::Path;

use super::{PinDescriptor, PlatformTable, PlatformTableBuilder};
use crate::error::{Error, Result};

/// Platform table file structure
#[derive(Debug, serde::Deserialize)]
struct PlatformDef {
    platform: String,
    #[serde(default)]
    description: String,
    pins: Vec<PinDef>,
}

/// Single pin definition in RON format
#[derive(Debug, serde::Deserialize)]
struct PinDef {
    board_pin: u8,
    soc_name: String,
    #[serde(default)]
    functions: Vec<String>,
    #[serde(default)]
    pinmux_register: Option<u32>,
}

pub(super) fn from_file(path: &Path) -> Result<PlatformTable> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    from_str(&content, &path.display().to_string())
}

pub(super) fn from_str(content: &str, origin: &str) -> Result<PlatformTable> {
    let def: PlatformDef = ron::from_str(content).map_err(|e| Error::Parse {
        path: origin.to_string(),
        source: e,
    })?;

    let mut builder = PlatformTableBuilder::new(def.platform, def.description);
    for pin in def.pins {
        builder = builder.push(PinDescriptor {
            board_pin: pin.board_pin,
            soc_name: pin.soc_name.to_lowercase(),
            candidate_functions: pin.functions.iter().map(|f| f.to_lowercase()).collect(),
            pinmux_register: pin.pinmux_register,
        });
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform_ron() {
        let ron = r#"
        (
            platform: "test-board",
            description: "Test carrier",
            pins: [
                (
                    board_pin: 29,
                    soc_name: "SOC_GPIO32_PQ5",
                    functions: ["ExtPeriph3"],
                    pinmux_register: Some(0x02430090),
                ),
                (
                    board_pin: 31,
                    soc_name: "soc_gpio33_pq6",
                ),
            ],
        )
        "#;
        let table = from_str(ron, "<test>").unwrap();
        assert_eq!(table.platform(), "test-board");
        assert_eq!(table.len(), 2);

        let pin = table.resolve(29).unwrap();
        assert_eq!(pin.soc_name(), "soc_gpio32_pq5");
        assert_eq!(pin.candidate_functions(), ["extperiph3"]);
        assert_eq!(pin.pinmux_register(), Some(0x0243_0090));

        let bare = table.resolve(31).unwrap();
        assert!(bare.candidate_functions().is_empty());
        assert_eq!(bare.pinmux_register(), None);
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let ron = r#"
        (
            platform: "test-board",
            pins: [
                ( board_pin: 29, soc_name: "soc_gpio32_pq5" ),
                ( board_pin: 29, soc_name: "soc_gpio33_pq6" ),
            ],
        )
        "#;
        assert!(matches!(
            from_str(ron, "<test>"),
            Err(Error::TableInvalid { .. })
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            from_str("not ron at all", "<test>"),
            Err(Error::Parse { .. })
        ));
    }
}
