//! Parameter store shared by every instrument

use log::debug;
use std::fmt;

use g5_panel_types::{ParamValue, ParameterName, TelemetryUpdateEntry};

use crate::{FaultSink, InstrumentFault, LogFaultSink, NoRedraw, RedrawScheduler, UpdateError};

/// Live values of every instrument parameter.
///
/// Every [`ParameterName`] always has a value: construction fills the store
/// with the declared defaults. Each accepted write asks the redraw scheduler
/// for a repaint.
pub struct InstrumentState {
    owner: String,
    values: [ParamValue; ParameterName::COUNT],
    redraw: Box<dyn RedrawScheduler>,
    faults: Box<dyn FaultSink>,
}

/// Outcome of one [`InstrumentState::apply_updates`] call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    /// Parameters written, in the order they were applied
    pub applied: Vec<ParameterName>,
    /// Entries that were skipped
    pub failures: Vec<InstrumentFault>,
}

impl UpdateReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.applied.len() + self.failures.len()
    }
}

impl InstrumentState {
    pub fn new(
        owner: impl Into<String>,
        redraw: Box<dyn RedrawScheduler>,
        faults: Box<dyn FaultSink>,
    ) -> Self {
        let mut values = [ParamValue::default(); ParameterName::COUNT];
        for name in ParameterName::ALL {
            values[name.index()] = name.default_value();
        }
        Self {
            owner: owner.into(),
            values,
            redraw,
            faults,
        }
    }

    /// State that logs faults and is not attached to any widget yet
    pub fn detached(owner: impl Into<String>) -> Self {
        let owner = owner.into();
        let faults = Box::new(LogFaultSink::new(owner.clone()));
        Self::new(owner, Box::new(NoRedraw), faults)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Replace the redraw scheduler, e.g. once the owning widget exists
    pub fn set_redraw_scheduler(&mut self, redraw: Box<dyn RedrawScheduler>) {
        self.redraw = redraw;
    }

    pub fn get(&self, name: ParameterName) -> ParamValue {
        self.values[name.index()]
    }

    /// All parameters with their current values, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ParameterName, ParamValue)> + '_ {
        ParameterName::ALL.iter().map(|name| (*name, self.get(*name)))
    }

    /// Store `value` as-is and request a redraw.
    pub fn set_parameter(&mut self, name: ParameterName, value: impl Into<ParamValue>) {
        self.values[name.index()] = value.into();
        self.redraw.request_redraw();
    }

    /// Write a raw telemetry value to the parameter with external key `key`.
    pub fn set_parameter_by_key(
        &mut self,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<ParameterName, UpdateError> {
        let name: ParameterName = key.parse()?;
        let value = ParamValue::from_json(value).ok_or_else(|| UpdateError::TypeMismatch {
            target: key.to_string(),
            found: value.to_string(),
        })?;
        self.set_parameter(name, value);
        Ok(name)
    }

    /// Apply a batch of telemetry entries.
    ///
    /// Entries are applied in iteration order. An entry that cannot be applied
    /// is reported to the fault sink and skipped; the rest of the batch is
    /// still applied.
    pub fn apply_updates<'a, K, I>(&mut self, batch: I) -> UpdateReport
    where
        K: fmt::Display,
        I: IntoIterator<Item = (K, &'a TelemetryUpdateEntry)>,
    {
        let mut report = UpdateReport::default();

        for (key, entry) in batch {
            match self.set_parameter_by_key(&entry.target, &entry.value) {
                Ok(name) => report.applied.push(name),
                Err(source) => {
                    let fault = InstrumentFault::Update {
                        key: key.to_string(),
                        label: entry.display_label().to_string(),
                        source,
                    };
                    self.faults.report(&fault);
                    report.failures.push(fault);
                }
            }
        }

        debug!(
            "{}: applied {} of {} telemetry entries",
            self.owner,
            report.applied.len(),
            report.total()
        );
        report
    }

    /// Short label for a NAV receiver type code.
    ///
    /// `0` is no receiver, `3` a VOR and `4` or above a localizer. Codes in
    /// between, NaN and infinities are not decodable: the fault is reported
    /// and `None` returned.
    pub fn nav_type_string(&self, nav_type: impl Into<ParamValue>, nav_index: &str) -> Option<String> {
        let nav_type = nav_type.into();

        match nav_type.as_i64() {
            _ if !nav_type.as_f64().is_finite() => {}
            0 => return Some(String::new()),
            3 => return Some(format!("VOR{}", nav_index)),
            c if c >= 4 => return Some(format!("LOC{}", nav_index)),
            _ => {}
        }

        self.faults.report(&InstrumentFault::NavTypeDecode { code: nav_type });
        None
    }
}

macro_rules! define_accessors {
    ($($variant:ident => $key:literal, $getter:ident, $setter:ident, $default:literal;)*) => {
        impl InstrumentState {
            $(
                #[doc = concat!("Current `", $key, "` value")]
                pub fn $getter(&self) -> ParamValue {
                    self.get(ParameterName::$variant)
                }

                #[doc = concat!("Write `", $key, "` and request a redraw")]
                pub fn $setter(&mut self, value: impl Into<ParamValue>) {
                    self.set_parameter(ParameterName::$variant, value);
                }
            )*
        }
    };
}

g5_panel_types::parameter_table!(define_accessors);

impl fmt::Debug for InstrumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstrumentState")
            .field("owner", &self.owner)
            .field("engine_rpm", &self.engine_rpm())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordingFaultSink, RedrawCounter};
    use g5_panel_types::{ParseParameterError, TelemetryBatch};
    use serde_json::json;

    fn state_with_doubles() -> (InstrumentState, RedrawCounter, RecordingFaultSink) {
        let redraw = RedrawCounter::new();
        let faults = RecordingFaultSink::new();
        let state = InstrumentState::new("test", Box::new(redraw.clone()), Box::new(faults.clone()));
        (state, redraw, faults)
    }

    #[test]
    fn test_fresh_state_holds_defaults() {
        let expected: [(&str, i64); 72] = [
            ("altitudeHold", 0), ("altitudeVNAV", 0), ("navSrc", 0),
            ("apAltitude", 0), ("apVS", 0), ("apAirSpeed", 0), ("apState", 0),
            ("apMode", 0), ("fuelPress", 0), ("lowVolts", 0), ("oilPres", 0),
            ("parkBrake", 0), ("lowVacuum", 0), ("lowFuel", 0), ("fuelSel", 4),
            ("xpdrMode", 0), ("xpdrCode", 5470), ("trims", 0), ("flaps", 0),
            ("fuelpump", 0), ("carbheat", 0), ("gpsdmedist", 0), ("gpshsisens", 0),
            ("nav1type", 0), ("nav2type", 0), ("gpstype", 0), ("avionicson", 1),
            ("hsiSource", 0), ("nav1fromto", 0), ("nav2fromto", 0),
            ("gpsfromto", 0), ("nav1crs", 0), ("nav1gsavailable", 0),
            ("nav1gs", 0), ("nav2crs", 0), ("gpscrs", 0), ("nav2gsavailable", 0),
            ("nav2gs", 0), ("nav1dft", 0), ("nav2dft", 0), ("nav1bearing", 0),
            ("nav2bearing", 0), ("nav1dme", 0), ("nav2dme", 0), ("gpsdft", 0),
            ("gpsgsavailable", 0), ("gpsvnavavailable", 0), ("gpsgs", 0),
            ("groundTrack", 0), ("magHeading", 0), ("windDirection", 0),
            ("windSpeed", 0), ("rollAngle", 0), ("pitchAngle", 0), ("gs", 0),
            ("kias", 0), ("kiasDelta", 0), ("ktas", 0), ("altitude", 0),
            ("altitudeSel", 0), ("alt_setting", 1013), ("alt_setting_metric", 1),
            ("vh_ind_fpm", 0), ("turnRate", 0), ("slip", 0), ("headingBug", 0),
            ("vs", 30), ("vs0", 23), ("vfe", 88), ("vno", 118), ("vne", 127),
            ("engineRpm", 0),
        ];

        let state = InstrumentState::detached("test");
        assert_eq!(state.iter().count(), expected.len());
        for (key, default) in expected {
            let name: ParameterName = key.parse().unwrap();
            assert_eq!(state.get(name), ParamValue::Int(default), "{}", key);
        }
        assert_eq!(state.xpdr_code(), ParamValue::Int(5470));
        assert_eq!(state.fuel_sel(), ParamValue::Int(4));
    }

    #[test]
    fn test_write_then_read_is_exact() {
        let (mut state, _, _) = state_with_doubles();
        let samples = [
            ParamValue::Int(-12),
            ParamValue::Int(i64::MAX),
            ParamValue::Float(2437.25),
            ParamValue::Float(-0.5),
            ParamValue::Bool(true),
        ];
        for name in ParameterName::ALL {
            for value in samples {
                state.set_parameter(*name, value);
                assert_eq!(state.get(*name), value);
            }
        }
    }

    #[test]
    fn test_typed_setters_keep_natural_type() {
        let (mut state, _, _) = state_with_doubles();
        state.set_engine_rpm(2400);
        assert_eq!(state.engine_rpm(), ParamValue::Int(2400));
        state.set_engine_rpm(2400.5);
        assert_eq!(state.engine_rpm(), ParamValue::Float(2400.5));
        state.set_low_fuel(true);
        assert_eq!(state.low_fuel(), ParamValue::Bool(true));
        // Out-of-range values are stored as given
        state.set_engine_rpm(-9000);
        assert_eq!(state.engine_rpm(), ParamValue::Int(-9000));
    }

    #[test]
    fn test_every_write_requests_one_redraw() {
        let (mut state, redraw, _) = state_with_doubles();
        assert_eq!(redraw.count(), 0);

        state.set_altitude(4500);
        assert_eq!(redraw.count(), 1);
        state.set_altitude(4500);
        assert_eq!(redraw.count(), 2);
        state.set_parameter(ParameterName::Kias, 95.0);
        assert_eq!(redraw.count(), 3);
    }

    #[test]
    fn test_batch_skips_bad_entries() {
        let (mut state, redraw, faults) = state_with_doubles();
        let mut batch = TelemetryBatch::new();
        batch.insert("0".into(), TelemetryUpdateEntry::new(2300, "engineRpm", "Engine RPM"));
        batch.insert("1".into(), TelemetryUpdateEntry::new(1, "noSuchThing", "Bogus dataref"));
        batch.insert("2".into(), TelemetryUpdateEntry::new(5500.0, "altitude", "Altitude"));
        batch.insert("3".into(), TelemetryUpdateEntry::new("fast", "kias", "Airspeed"));
        batch.insert("4".into(), TelemetryUpdateEntry::new(true, "lowVolts", "Low volts"));

        let report = state.apply_updates(&batch);

        assert_eq!(
            report.applied,
            vec![ParameterName::EngineRpm, ParameterName::Altitude, ParameterName::LowVolts]
        );
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.total(), 5);
        assert!(!report.is_clean());

        assert_eq!(state.engine_rpm(), ParamValue::Int(2300));
        assert_eq!(state.altitude(), ParamValue::Float(5500.0));
        assert_eq!(state.low_volts(), ParamValue::Bool(true));
        assert_eq!(state.kias(), ParamValue::Int(0));

        // Only accepted writes ask for a repaint
        assert_eq!(redraw.count(), 3);

        assert_eq!(faults.faults(), report.failures);
        assert_eq!(
            report.failures[0],
            InstrumentFault::Update {
                key: "1".into(),
                label: "Bogus dataref".into(),
                source: UpdateError::UnknownParameter(ParseParameterError("noSuchThing".into())),
            }
        );
        assert!(matches!(
            &report.failures[1],
            InstrumentFault::Update { key, source: UpdateError::TypeMismatch { .. }, .. } if key == "3"
        ));
        assert_eq!(
            report.failures[0].to_string(),
            "failed to set value Bogus dataref: unknown instrument parameter `noSuchThing`"
        );
    }

    #[test]
    fn test_batch_accepts_any_keyed_map() {
        let (mut state, _, faults) = state_with_doubles();
        let mut batch = std::collections::HashMap::new();
        batch.insert(17u32, TelemetryUpdateEntry::new(json!(180), "magHeading", "Heading"));

        let report = state.apply_updates(&batch);
        assert!(report.is_clean());
        assert!(faults.is_empty());
        assert_eq!(state.mag_heading(), ParamValue::Int(180));
    }

    #[test]
    fn test_empty_batch() {
        let (mut state, redraw, _) = state_with_doubles();
        let report = state.apply_updates(&TelemetryBatch::new());
        assert_eq!(report, UpdateReport::default());
        assert_eq!(redraw.count(), 0);
    }

    #[test]
    fn test_instances_do_not_share_values() {
        let mut first = InstrumentState::detached("first");
        let second = InstrumentState::detached("second");
        first.set_engine_rpm(2500);
        assert_eq!(first.engine_rpm(), ParamValue::Int(2500));
        assert_eq!(second.engine_rpm(), ParamValue::Int(0));
    }

    #[test]
    fn test_nav_type_string() {
        let (state, _, faults) = state_with_doubles();
        assert_eq!(state.nav_type_string(0, "1").as_deref(), Some(""));
        assert_eq!(state.nav_type_string(3, "1").as_deref(), Some("VOR1"));
        assert_eq!(state.nav_type_string(4, "2").as_deref(), Some("LOC2"));
        assert_eq!(state.nav_type_string(7, "2").as_deref(), Some("LOC2"));
        assert_eq!(state.nav_type_string(3.7, "1").as_deref(), Some("VOR1"));
        assert!(faults.is_empty());
    }

    #[test]
    fn test_nav_type_string_undecodable() {
        let (state, _, faults) = state_with_doubles();
        assert_eq!(state.nav_type_string(1, "1"), None);
        assert_eq!(state.nav_type_string(2, "1"), None);
        assert_eq!(state.nav_type_string(-1, "1"), None);
        assert_eq!(
            faults.faults(),
            vec![
                InstrumentFault::NavTypeDecode { code: ParamValue::Int(1) },
                InstrumentFault::NavTypeDecode { code: ParamValue::Int(2) },
                InstrumentFault::NavTypeDecode { code: ParamValue::Int(-1) },
            ]
        );
    }

    #[test]
    fn test_nav_type_string_rejects_non_finite_codes() {
        let (state, _, faults) = state_with_doubles();
        assert_eq!(state.nav_type_string(f64::NAN, "1"), None);
        assert_eq!(state.nav_type_string(f64::INFINITY, "1"), None);
        assert_eq!(state.nav_type_string(f64::NEG_INFINITY, "2"), None);

        let reported = faults.faults();
        assert_eq!(reported.len(), 3);
        assert!(matches!(
            reported[0],
            InstrumentFault::NavTypeDecode { code: ParamValue::Float(c) } if c.is_nan()
        ));
        assert_eq!(
            reported[1],
            InstrumentFault::NavTypeDecode { code: ParamValue::Float(f64::INFINITY) }
        );
        assert_eq!(reported[1].to_string(), "failed to decode nav type inf");
    }
}
