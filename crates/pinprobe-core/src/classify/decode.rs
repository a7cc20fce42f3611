//! Decoders for vendor `pinmux-pins` record encodings
//!
//! The textual layout of the kernel's `pinmux-pins` file is not a stable
//! contract and differs between pin controller drivers and kernel
//! versions. Each supported encoding gets its own [`RecordDecoder`];
//! anything a decoder does not positively recognize fails closed, so the
//! classifier reports `Unreadable` instead of guessing.

use thiserror::Error;

/// Decode failure; carries the raw text so the user (or a maintainer
/// extending the decoder) can see exactly what the kernel printed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason} in record '{raw}'")]
pub struct DecodeError {
    /// What the decoder could not make sense of
    pub reason: String,
    /// The unparsed record text
    pub raw: String,
}

impl DecodeError {
    fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.trim().to_string(),
        }
    }
}

/// Normalized fields of one pin record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    /// Pad name as printed by the kernel
    pub pad_name: String,
    /// Currently selected function, if the pad has a device-tree mux entry
    pub function: Option<String>,
    /// Pin group the function is applied through
    pub group: Option<String>,
    /// Device that owns the mux setting, if claimed
    pub mux_owner: Option<String>,
    /// GPIO consumer holding the line, if claimed (e.g. `tegra234-gpio:453`)
    pub gpio_owner: Option<String>,
    /// Whether the pad was hogged (pre-claimed by the pin controller at boot)
    pub hogged: bool,
}

impl DecodedRecord {
    /// Global GPIO line number extracted from the GPIO owner string, if any
    pub fn gpio_line(&self) -> Option<u32> {
        let owner = self.gpio_owner.as_deref()?;
        owner.rsplit_once(':')?.1.parse().ok()
    }
}

/// One versioned record encoding
pub trait RecordDecoder {
    /// Short identifier for logs and reports
    fn name(&self) -> &'static str;

    /// Decode one raw record line; fail closed on anything unrecognized
    fn decode(&self, raw_text: &str) -> Result<DecodedRecord, DecodeError>;
}

/// Decoder for the Tegra234 pin controller's `pinmux-pins` lines.
///
/// Known shapes:
///
/// ```text
/// pin 144 (SOC_GPIO59_PAC6): (MUX UNCLAIMED) (GPIO UNCLAIMED)
/// pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux (GPIO UNCLAIMED) (HOG) function rsvd0 group soc_gpio32_pq5
/// pin 128 (SPI1_MOSI_PZ5): 3210000.spi (GPIO UNCLAIMED) function spi1 group spi1_mosi_pz5
/// pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux tegra234-gpio:453 function rsvd0 group soc_gpio32_pq5
/// ```
#[derive(Debug, Default)]
pub struct Tegra234Decoder;

const MUX_UNCLAIMED: &str = "(MUX UNCLAIMED)";
const GPIO_UNCLAIMED: &str = "(GPIO UNCLAIMED)";
const HOG_MARKER: &str = "(HOG)";

impl RecordDecoder for Tegra234Decoder {
    fn name(&self) -> &'static str {
        "tegra234"
    }

    fn decode(&self, raw_text: &str) -> Result<DecodedRecord, DecodeError> {
        let line = raw_text.trim();

        let rest = line
            .strip_prefix("pin ")
            .ok_or_else(|| DecodeError::new("missing 'pin' prefix", raw_text))?;

        let (number, rest) = rest
            .split_once(' ')
            .ok_or_else(|| DecodeError::new("truncated record", raw_text))?;
        if number.parse::<u32>().is_err() {
            return Err(DecodeError::new("pin number is not numeric", raw_text));
        }

        let rest = rest
            .trim_start()
            .strip_prefix('(')
            .ok_or_else(|| DecodeError::new("missing pad name", raw_text))?;
        let (pad_name, rest) = rest
            .split_once("):")
            .ok_or_else(|| DecodeError::new("unterminated pad name", raw_text))?;
        if pad_name.is_empty() {
            return Err(DecodeError::new("empty pad name", raw_text));
        }
        let mut rest = rest.trim_start();

        let mux_owner = if let Some(r) = rest.strip_prefix(MUX_UNCLAIMED) {
            rest = r.trim_start();
            None
        } else {
            let (owner, r) = take_token(rest)
                .ok_or_else(|| DecodeError::new("missing mux ownership field", raw_text))?;
            rest = r;
            Some(owner.to_string())
        };

        let gpio_owner = if let Some(r) = rest.strip_prefix(GPIO_UNCLAIMED) {
            rest = r.trim_start();
            None
        } else {
            let (owner, r) = take_token(rest)
                .ok_or_else(|| DecodeError::new("missing GPIO ownership field", raw_text))?;
            rest = r;
            Some(owner.to_string())
        };

        let hogged = if let Some(r) = rest.strip_prefix(HOG_MARKER) {
            rest = r.trim_start();
            true
        } else {
            false
        };

        let mut function = None;
        let mut group = None;
        if !rest.is_empty() {
            let r = rest
                .strip_prefix("function ")
                .ok_or_else(|| DecodeError::new("unexpected trailing fields", raw_text))?;
            let (name, r) = take_token(r)
                .ok_or_else(|| DecodeError::new("missing function name", raw_text))?;
            function = Some(name.to_string());

            let mut r = r;
            if !r.is_empty() {
                let inner = r
                    .strip_prefix("group ")
                    .ok_or_else(|| DecodeError::new("unexpected trailing fields", raw_text))?;
                let (name, inner) = take_token(inner)
                    .ok_or_else(|| DecodeError::new("missing group name", raw_text))?;
                group = Some(name.to_string());
                r = inner;
            }
            if !r.is_empty() {
                return Err(DecodeError::new("unexpected trailing fields", raw_text));
            }
        }

        Ok(DecodedRecord {
            pad_name: pad_name.to_string(),
            function,
            group,
            mux_owner,
            gpio_owner,
            hogged,
        })
    }
}

/// Split the next whitespace-delimited token off the front; `None` on an
/// empty string. The remainder comes back with leading whitespace trimmed.
fn take_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((token, rest)) => Some((token, rest.trim_start())),
        None => Some((s, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(line: &str) -> Result<DecodedRecord, DecodeError> {
        Tegra234Decoder.decode(line)
    }

    #[test]
    fn test_decode_unconfigured() {
        let rec = decode("pin 144 (SOC_GPIO59_PAC6): (MUX UNCLAIMED) (GPIO UNCLAIMED)").unwrap();
        assert_eq!(rec.pad_name, "SOC_GPIO59_PAC6");
        assert_eq!(rec.function, None);
        assert_eq!(rec.mux_owner, None);
        assert_eq!(rec.gpio_owner, None);
        assert!(!rec.hogged);
    }

    #[test]
    fn test_decode_hogged_gpio() {
        let rec = decode(
            "pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux (GPIO UNCLAIMED) (HOG) function rsvd0 group soc_gpio32_pq5",
        )
        .unwrap();
        assert_eq!(rec.mux_owner.as_deref(), Some("2430000.pinmux"));
        assert_eq!(rec.gpio_owner, None);
        assert!(rec.hogged);
        assert_eq!(rec.function.as_deref(), Some("rsvd0"));
        assert_eq!(rec.group.as_deref(), Some("soc_gpio32_pq5"));
    }

    #[test]
    fn test_decode_driver_claimed() {
        let rec = decode(
            "pin 128 (SPI1_MOSI_PZ5): 3210000.spi (GPIO UNCLAIMED) function spi1 group spi1_mosi_pz5",
        )
        .unwrap();
        assert_eq!(rec.mux_owner.as_deref(), Some("3210000.spi"));
        assert!(!rec.hogged);
        assert_eq!(rec.function.as_deref(), Some("spi1"));
    }

    #[test]
    fn test_decode_gpio_line_owner() {
        let rec = decode(
            "pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux tegra234-gpio:453 function rsvd0 group soc_gpio32_pq5",
        )
        .unwrap();
        assert_eq!(rec.gpio_owner.as_deref(), Some("tegra234-gpio:453"));
        assert_eq!(rec.gpio_line(), Some(453));
    }

    #[test]
    fn test_decode_fails_closed() {
        for garbage in [
            "",
            "not a pin line",
            "pin x (SOC_GPIO32_PQ5): (MUX UNCLAIMED) (GPIO UNCLAIMED)",
            "pin 105 SOC_GPIO32_PQ5: (MUX UNCLAIMED) (GPIO UNCLAIMED)",
            "pin 105 (SOC_GPIO32_PQ5): (MUX UNCLAIMED) (GPIO UNCLAIMED) banana",
            "pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux (GPIO UNCLAIMED) function",
        ] {
            assert!(decode(garbage).is_err(), "expected failure for {:?}", garbage);
        }
    }

    #[test]
    fn test_decode_error_carries_raw_text() {
        let err = decode("pin x (SOC): (MUX UNCLAIMED) (GPIO UNCLAIMED)").unwrap_err();
        assert!(err.to_string().contains("pin x (SOC)"));
    }
}
