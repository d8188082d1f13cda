use serde::{Deserialize, Serialize};
use std::fmt;
use urban_types::LatLon;

pub const AIR_QUALITY_PATH: &str = "/seattle_pscaa_air_quality_data.json";

/// Heat intensity divisor for the air-quality overlay (highest observed AQI is 59).
pub const AIR_QUALITY_HEAT_SCALE: f64 = 60.0;

/// Heat intensity divisor for the aerosol optical depth view of the same readings.
pub const AEROSOL_HEAT_SCALE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityData {
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub station_name: String,
    pub air_quality: AirQuality,
    #[serde(default)]
    pub traffic_impact: String,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    #[serde(default)]
    pub overall_aqi: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pollutants: Option<Pollutants>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm25: Option<Reading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ozone: Option<Reading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<Reading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub concentration: f64,
}

/// EPA AQI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AqiBand {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiBand {
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 150.0 {
            Self::UnhealthyForSensitiveGroups
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else if aqi <= 300.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficLevel {
    Low,
    Moderate,
    High,
}

impl TrafficLevel {
    pub fn from_impact(impact: &str) -> Self {
        if impact.contains("High") {
            Self::High
        } else if impact.contains("Moderate") {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        })
    }
}

/// Weighted point of a heat layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPoint {
    pub center: LatLon,
    pub intensity: f64,
}

impl Sensor {
    pub fn center(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }

    pub fn band(&self) -> AqiBand {
        AqiBand::from_aqi(self.air_quality.overall_aqi)
    }

    pub fn traffic_level(&self) -> TrafficLevel {
        TrafficLevel::from_impact(&self.traffic_impact)
    }

    fn has_reading(&self) -> bool {
        self.lat != 0.0 && self.lon != 0.0 && self.air_quality.overall_aqi != 0.0
    }
}

impl AirQualityData {
    /// Heat layer points, skipping sensors without a position or reading.
    pub fn heat_points(&self, scale: f64) -> Vec<HeatPoint> {
        self.sensors
            .iter()
            .filter(|s| s.has_reading())
            .map(|s| HeatPoint {
                center: s.center(),
                intensity: s.air_quality.overall_aqi / scale,
            })
            .collect()
    }
}
