//! Single-pin diagnosis orchestration
//!
//! Ties the pieces together in the one order that matters: resolve the
//! board pin against the platform table first (a pin outside the table is
//! a user input error and must not trigger any kernel read), then fetch
//! the raw record, then classify. A pad the controller does not export is
//! a *result* (`NotFound`), not an error; an unreachable or unreadable
//! debug hierarchy aborts with an environment error.

use thiserror::Error;

use crate::classify::{Classifier, PinState};
use crate::pinmap::{PinDescriptor, PlatformTable};
use crate::record::{RawPinRecord, RecordSource, SourceError};

/// Outcome of diagnosing one pin
#[derive(Debug, Clone)]
pub struct Diagnosis {
    /// The resolved pin descriptor
    pub descriptor: PinDescriptor,
    /// Normalized pin state
    pub state: PinState,
    /// The raw record the state was derived from; `None` when the pin
    /// controller exports nothing for the pad
    pub record: Option<RawPinRecord>,
}

/// Errors that abort a diagnosis
#[derive(Debug, Error)]
pub enum DiagnoseError {
    /// User input error: the pin is outside the table domain
    #[error(transparent)]
    Config(crate::Error),

    /// Environment error: debug interface missing or unreadable
    #[error(transparent)]
    Environment(SourceError),
}

/// Diagnose one board pin.
///
/// Reads live state through `source` on every call; nothing is cached
/// between invocations.
pub fn diagnose<S: RecordSource + ?Sized>(
    table: &PlatformTable,
    board_pin: u8,
    source: &mut S,
    classifier: &Classifier,
) -> Result<Diagnosis, DiagnoseError> {
    let descriptor = table
        .resolve(board_pin)
        .map_err(DiagnoseError::Config)?
        .clone();

    let record = match source.record(descriptor.soc_name()) {
        Ok(record) => record,
        Err(SourceError::PinNotExported { .. }) => {
            return Ok(Diagnosis {
                descriptor,
                state: PinState::NotFound,
                record: None,
            });
        }
        Err(e) => return Err(DiagnoseError::Environment(e)),
    };

    let state = classifier.classify(&record, descriptor.candidate_functions());
    Ok(Diagnosis {
        descriptor,
        state,
        record: Some(record),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pinmap::PlatformRegistry;
    use std::path::PathBuf;

    /// Record source that replays fixed lines and counts reads
    struct FixtureSource {
        response: Result<String, fn(String) -> SourceError>,
        reads: usize,
    }

    impl FixtureSource {
        fn with_line(line: &str) -> Self {
            Self {
                response: Ok(line.to_string()),
                reads: 0,
            }
        }

        fn failing(make: fn(String) -> SourceError) -> Self {
            Self {
                response: Err(make),
                reads: 0,
            }
        }
    }

    impl RecordSource for FixtureSource {
        fn record(&mut self, soc_name: &str) -> Result<RawPinRecord, SourceError> {
            self.reads += 1;
            match &self.response {
                Ok(line) => Ok(RawPinRecord {
                    soc_name: soc_name.to_string(),
                    raw_text: line.clone(),
                    source_path: PathBuf::from("<fixture>"),
                }),
                Err(make) => Err(make(soc_name.to_string())),
            }
        }
    }

    fn orin() -> crate::pinmap::PlatformTable {
        PlatformRegistry::with_builtin()
            .get(PlatformRegistry::default_platform())
            .unwrap()
            .clone()
    }

    #[test]
    fn test_pin_29_ready() {
        let table = orin();
        let mut source = FixtureSource::with_line(
            "pin 105 (SOC_GPIO32_PQ5): 2430000.pinmux (GPIO UNCLAIMED) (HOG) function rsvd0 group soc_gpio32_pq5",
        );
        let diagnosis =
            diagnose(&table, 29, &mut source, &Classifier::tegra234()).unwrap();
        assert_eq!(diagnosis.descriptor.soc_name(), "soc_gpio32_pq5");
        assert_eq!(diagnosis.state, PinState::GpioReady);
        assert_eq!(source.reads, 1);
    }

    #[test]
    fn test_pin_29_routed_to_spi() {
        let table = orin();
        let mut source = FixtureSource::with_line(
            "pin 105 (SOC_GPIO32_PQ5): 3210000.spi (GPIO UNCLAIMED) function spi1_mosi group soc_gpio32_pq5",
        );
        let diagnosis =
            diagnose(&table, 29, &mut source, &Classifier::tegra234()).unwrap();
        assert_eq!(
            diagnosis.state,
            PinState::AltFunction("spi1_mosi".to_string())
        );
    }

    #[test]
    fn test_unknown_pin_reads_nothing() {
        let table = orin();
        let mut source = FixtureSource::with_line("unused");
        let result = diagnose(&table, 2, &mut source, &Classifier::tegra234());
        assert!(matches!(
            result,
            Err(DiagnoseError::Config(crate::Error::PinNotFound { .. }))
        ));
        assert_eq!(source.reads, 0);
    }

    #[test]
    fn test_unexported_pin_is_not_found() {
        let table = orin();
        let mut source =
            FixtureSource::failing(|soc_name| SourceError::PinNotExported { soc_name });
        let diagnosis =
            diagnose(&table, 29, &mut source, &Classifier::tegra234()).unwrap();
        assert_eq!(diagnosis.state, PinState::NotFound);
        assert!(diagnosis.record.is_none());
    }

    #[test]
    fn test_unavailable_debugfs_aborts() {
        let table = orin();
        let mut source = FixtureSource::failing(|_| SourceError::Unavailable {
            path: "/sys/kernel/debug/pinctrl".to_string(),
        });
        let result = diagnose(&table, 29, &mut source, &Classifier::tegra234());
        assert!(matches!(
            result,
            Err(DiagnoseError::Environment(SourceError::Unavailable { .. }))
        ));
    }
}
