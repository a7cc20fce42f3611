//! Device-tree overlay fragment generation
//!
//! Emits the pinmux node body needed to route a pad to GPIO, as valid
//! device-tree source syntax. What comes out is a *reference excerpt*: it
//! must be wrapped in a full overlay by the user and is never compilable
//! on its own. The [`OverlayFragment`] type enforces that invariant
//! structurally; there is no way to construct one that claims to be a
//! complete overlay.

use crate::classify;
use crate::error::{Error, Result};
use crate::pinmap::PinDescriptor;

/// Banner carried at the top of every generated fragment
pub const FRAGMENT_BANNER: &str =
    "/* Reference excerpt only. Wrap in a full overlay before compiling; not loadable as-is. */";

/// A non-compilable pinmux overlay excerpt for one pad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayFragment {
    target_soc_name: String,
    dts_text: String,
}

impl OverlayFragment {
    /// Pad the fragment reconfigures
    pub fn target_soc_name(&self) -> &str {
        &self.target_soc_name
    }

    /// The fragment text, in device-tree source syntax
    pub fn dts_text(&self) -> &str {
        &self.dts_text
    }

    /// Always `false`: this tool never emits an installable overlay.
    pub fn is_complete_overlay(&self) -> bool {
        false
    }
}

/// Generate the GPIO-routing fragment for one pin.
///
/// `available_functions` is what the pin controller exports for the pad
/// (from the debug interface); when it is empty the Tegra234 default GPIO
/// selector `rsvd0` is assumed, since the running kernel could not be
/// asked. A pad whose exported functions include no GPIO selector fails
/// with [`Error::NoGpioFunction`].
///
/// Deterministic: identical inputs yield byte-identical output.
pub fn generate(pin: &PinDescriptor, available_functions: &[String]) -> Result<OverlayFragment> {
    let function = pick_gpio_function(available_functions)?;

    let dts_text = format!(
        "{banner}\n\
         /* Board pin {board} ({pad}) */\n\
         hdr40-pin{board} {{\n\
         \tnvidia,pins = \"{pad}\";\n\
         \tnvidia,function = \"{function}\";\n\
         \tnvidia,pull = <0x0>;           /* 0 = none, 1 = down, 2 = up */\n\
         \tnvidia,tristate = <0x0>;       /* 0 = drive, 1 = tristate */\n\
         \tnvidia,enable-input = <0x1>;   /* 0 = output only, 1 = input enabled */\n\
         }};\n",
        banner = FRAGMENT_BANNER,
        board = pin.board_pin(),
        pad = pin.soc_name(),
        function = function,
    );

    Ok(OverlayFragment {
        target_soc_name: pin.soc_name().to_string(),
        dts_text,
    })
}

/// Pick the GPIO selector: `rsvd0` preferred, then `gp`, then whichever
/// GPIO marker the controller lists first.
fn pick_gpio_function(available: &[String]) -> Result<&str> {
    if available.is_empty() {
        return Ok("rsvd0");
    }

    let gpio: Vec<&str> = available
        .iter()
        .map(String::as_str)
        .filter(|f| {
            classify::GPIO_FUNCTION_MARKERS
                .iter()
                .any(|m| m.eq_ignore_ascii_case(f))
        })
        .collect();

    if gpio.is_empty() {
        return Err(Error::NoGpioFunction {
            available: available.to_vec(),
        });
    }

    for preferred in ["rsvd0", "gp"] {
        if let Some(f) = gpio.iter().find(|f| f.eq_ignore_ascii_case(preferred)) {
            return Ok(f);
        }
    }
    Ok(gpio[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pinmap::{PlatformRegistry, PlatformTable};

    fn table() -> PlatformTable {
        let registry = PlatformRegistry::with_builtin();
        registry
            .get(PlatformRegistry::default_platform())
            .unwrap()
            .clone()
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_generate_references_pad_name() {
        let table = table();
        let pin = table.resolve(29).unwrap();
        let fragment = generate(pin, &strings(&["rsvd0", "extperiph3"])).unwrap();
        assert_eq!(fragment.target_soc_name(), "soc_gpio32_pq5");
        assert!(fragment.dts_text().contains("soc_gpio32_pq5"));
        assert!(fragment.dts_text().contains("hdr40-pin29"));
    }

    #[test]
    fn test_generate_never_complete_overlay() {
        let table = table();
        let pin = table.resolve(29).unwrap();
        let fragment = generate(pin, &[]).unwrap();
        assert!(!fragment.is_complete_overlay());
        assert!(fragment.dts_text().starts_with(FRAGMENT_BANNER));
    }

    #[test]
    fn test_generate_deterministic() {
        let table = table();
        let pin = table.resolve(31).unwrap();
        let available = strings(&["rsvd0", "extperiph4"]);
        let first = generate(pin, &available).unwrap();
        let second = generate(pin, &available).unwrap();
        assert_eq!(first.dts_text(), second.dts_text());
    }

    #[test]
    fn test_function_preference_order() {
        assert_eq!(
            pick_gpio_function(&strings(&["gp", "rsvd0", "spi1"])).unwrap(),
            "rsvd0"
        );
        assert_eq!(
            pick_gpio_function(&strings(&["spi1", "gp"])).unwrap(),
            "gp"
        );
        assert_eq!(
            pick_gpio_function(&strings(&["rsvd2", "spi1"])).unwrap(),
            "rsvd2"
        );
        // No exported functions at all: assume the default selector.
        assert_eq!(pick_gpio_function(&[]).unwrap(), "rsvd0");
    }

    #[test]
    fn test_no_gpio_function_is_an_error() {
        let err = pick_gpio_function(&strings(&["spi1", "uarta"])).unwrap_err();
        assert!(matches!(err, Error::NoGpioFunction { .. }));
    }
}
