//! The closed set of instrument parameters.
//!
//! Every parameter is declared exactly once in [`parameter_table!`]. The table
//! is expanded here into [`ParameterName`] and, in `g5-panel-core`, into one
//! typed getter and setter per parameter on the instrument state.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::ParamValue;

/// Invoke `$callback!` with the full parameter table.
///
/// Each row reads `Variant => "externalKey", getter, setter, default;`.
/// The external key is the identifier telemetry entries use to target a
/// parameter.
#[macro_export]
macro_rules! parameter_table {
    ($callback:ident) => {
        $callback! {
            AltitudeHold => "altitudeHold", altitude_hold, set_altitude_hold, 0;
            AltitudeVnav => "altitudeVNAV", altitude_vnav, set_altitude_vnav, 0;
            NavSrc => "navSrc", nav_src, set_nav_src, 0;
            ApAltitude => "apAltitude", ap_altitude, set_ap_altitude, 0;
            ApVs => "apVS", ap_vs, set_ap_vs, 0;
            ApAirSpeed => "apAirSpeed", ap_air_speed, set_ap_air_speed, 0;
            ApState => "apState", ap_state, set_ap_state, 0;
            ApMode => "apMode", ap_mode, set_ap_mode, 0;
            FuelPress => "fuelPress", fuel_press, set_fuel_press, 0;
            LowVolts => "lowVolts", low_volts, set_low_volts, 0;
            OilPres => "oilPres", oil_pres, set_oil_pres, 0;
            ParkBrake => "parkBrake", park_brake, set_park_brake, 0;
            LowVacuum => "lowVacuum", low_vacuum, set_low_vacuum, 0;
            LowFuel => "lowFuel", low_fuel, set_low_fuel, 0;
            FuelSel => "fuelSel", fuel_sel, set_fuel_sel, 4;
            XpdrMode => "xpdrMode", xpdr_mode, set_xpdr_mode, 0;
            XpdrCode => "xpdrCode", xpdr_code, set_xpdr_code, 5470;
            Trims => "trims", trims, set_trims, 0;
            Flaps => "flaps", flaps, set_flaps, 0;
            FuelPump => "fuelpump", fuel_pump, set_fuel_pump, 0;
            CarbHeat => "carbheat", carb_heat, set_carb_heat, 0;
            GpsDmeDist => "gpsdmedist", gps_dme_dist, set_gps_dme_dist, 0;
            GpsHsiSens => "gpshsisens", gps_hsi_sens, set_gps_hsi_sens, 0;
            Nav1Type => "nav1type", nav1_type, set_nav1_type, 0;
            Nav2Type => "nav2type", nav2_type, set_nav2_type, 0;
            GpsType => "gpstype", gps_type, set_gps_type, 0;
            AvionicsOn => "avionicson", avionics_on, set_avionics_on, 1;
            HsiSource => "hsiSource", hsi_source, set_hsi_source, 0;
            Nav1FromTo => "nav1fromto", nav1_from_to, set_nav1_from_to, 0;
            Nav2FromTo => "nav2fromto", nav2_from_to, set_nav2_from_to, 0;
            GpsFromTo => "gpsfromto", gps_from_to, set_gps_from_to, 0;
            Nav1Crs => "nav1crs", nav1_crs, set_nav1_crs, 0;
            Nav1GsAvailable => "nav1gsavailable", nav1_gs_available, set_nav1_gs_available, 0;
            Nav1Gs => "nav1gs", nav1_gs, set_nav1_gs, 0;
            Nav2Crs => "nav2crs", nav2_crs, set_nav2_crs, 0;
            GpsCrs => "gpscrs", gps_crs, set_gps_crs, 0;
            Nav2GsAvailable => "nav2gsavailable", nav2_gs_available, set_nav2_gs_available, 0;
            Nav2Gs => "nav2gs", nav2_gs, set_nav2_gs, 0;
            Nav1Dft => "nav1dft", nav1_dft, set_nav1_dft, 0;
            Nav2Dft => "nav2dft", nav2_dft, set_nav2_dft, 0;
            Nav1Bearing => "nav1bearing", nav1_bearing, set_nav1_bearing, 0;
            Nav2Bearing => "nav2bearing", nav2_bearing, set_nav2_bearing, 0;
            Nav1Dme => "nav1dme", nav1_dme, set_nav1_dme, 0;
            Nav2Dme => "nav2dme", nav2_dme, set_nav2_dme, 0;
            GpsDft => "gpsdft", gps_dft, set_gps_dft, 0;
            GpsGsAvailable => "gpsgsavailable", gps_gs_available, set_gps_gs_available, 0;
            GpsVnavAvailable => "gpsvnavavailable", gps_vnav_available, set_gps_vnav_available, 0;
            GpsGs => "gpsgs", gps_gs, set_gps_gs, 0;
            GroundTrack => "groundTrack", ground_track, set_ground_track, 0;
            MagHeading => "magHeading", mag_heading, set_mag_heading, 0;
            WindDirection => "windDirection", wind_direction, set_wind_direction, 0;
            WindSpeed => "windSpeed", wind_speed, set_wind_speed, 0;
            RollAngle => "rollAngle", roll_angle, set_roll_angle, 0;
            PitchAngle => "pitchAngle", pitch_angle, set_pitch_angle, 0;
            Gs => "gs", gs, set_gs, 0;
            Kias => "kias", kias, set_kias, 0;
            KiasDelta => "kiasDelta", kias_delta, set_kias_delta, 0;
            Ktas => "ktas", ktas, set_ktas, 0;
            Altitude => "altitude", altitude, set_altitude, 0;
            AltitudeSel => "altitudeSel", altitude_sel, set_altitude_sel, 0;
            AltSetting => "alt_setting", alt_setting, set_alt_setting, 1013;
            AltSettingMetric => "alt_setting_metric", alt_setting_metric, set_alt_setting_metric, 1;
            VhIndFpm => "vh_ind_fpm", vh_ind_fpm, set_vh_ind_fpm, 0;
            TurnRate => "turnRate", turn_rate, set_turn_rate, 0;
            Slip => "slip", slip, set_slip, 0;
            HeadingBug => "headingBug", heading_bug, set_heading_bug, 0;
            Vs => "vs", vs, set_vs, 30;
            Vs0 => "vs0", vs0, set_vs0, 23;
            Vfe => "vfe", vfe, set_vfe, 88;
            Vno => "vno", vno, set_vno, 118;
            Vne => "vne", vne, set_vne, 127;
            EngineRpm => "engineRpm", engine_rpm, set_engine_rpm, 0;
        }
    };
}

macro_rules! define_parameter_name {
    ($($variant:ident => $key:literal, $getter:ident, $setter:ident, $default:literal;)*) => {
        /// Identifier of one instrument parameter
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ParameterName {
            $($variant,)*
        }

        impl ParameterName {
            /// Every parameter, in declaration order
            pub const ALL: &'static [ParameterName] = &[$(ParameterName::$variant,)*];

            /// Number of parameters in the closed set
            pub const COUNT: usize = Self::ALL.len();

            /// External identifier used by telemetry entries
            pub fn key(self) -> &'static str {
                match self {
                    $(ParameterName::$variant => $key,)*
                }
            }

            /// Value a freshly constructed instrument holds
            pub fn default_value(self) -> ParamValue {
                match self {
                    $(ParameterName::$variant => ParamValue::Int($default),)*
                }
            }
        }
    };
}

parameter_table!(define_parameter_name);

static BY_KEY: Lazy<HashMap<&'static str, ParameterName>> = Lazy::new(|| {
    ParameterName::ALL
        .iter()
        .map(|name| (name.key(), *name))
        .collect()
});

impl ParameterName {
    /// Position of this parameter in [`ParameterName::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a parameter by its external key
    pub fn from_key(key: &str) -> Option<Self> {
        BY_KEY.get(key).copied()
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A key that does not name any instrument parameter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instrument parameter `{0}`")]
pub struct ParseParameterError(pub String);

impl FromStr for ParameterName {
    type Err = ParseParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ParseParameterError(s.to_string()))
    }
}
