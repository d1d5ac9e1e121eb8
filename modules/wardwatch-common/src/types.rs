use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Haversine great-circle distance between two lat/lng points in kilometers.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1_r.cos() * lat2_r.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Citizens may only act on issues within this radius of their own position.
/// The display filter radius is configurable; this gate is not.
pub const NEIGHBORHOOD_RADIUS_KM: f64 = 5.0;

/// Community flags at or above this count hide an issue pending review.
pub const FLAG_HIDE_THRESHOLD: u32 = 3;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueStatus::Open => write!(f, "Open"),
            IssueStatus::InProgress => write!(f, "In Progress"),
            IssueStatus::Resolved => write!(f, "Resolved"),
        }
    }
}

impl IssueStatus {
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "open" => Some(IssueStatus::Open),
            "in_progress" => Some(IssueStatus::InProgress),
            "resolved" => Some(IssueStatus::Resolved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Pothole,
    Garbage,
    Streetlight,
    WaterLeakage,
    Encroachment,
    Other,
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueCategory::Pothole => write!(f, "Pothole"),
            IssueCategory::Garbage => write!(f, "Garbage"),
            IssueCategory::Streetlight => write!(f, "Streetlight"),
            IssueCategory::WaterLeakage => write!(f, "Water Leakage"),
            IssueCategory::Encroachment => write!(f, "Encroachment"),
            IssueCategory::Other => write!(f, "Other"),
        }
    }
}

impl IssueCategory {
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "pothole" => Self::Pothole,
            "garbage" | "trash" | "waste" => Self::Garbage,
            "streetlight" | "street_light" => Self::Streetlight,
            "water_leakage" | "water_leak" | "water" => Self::WaterLeakage,
            "encroachment" => Self::Encroachment,
            _ => Self::Other,
        }
    }
}

/// Self-declared reporter identity. There is no authentication behind
/// "Verified" — an Anonymous report cannot be attributed to a bannable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReporterKind {
    Verified,
    Anonymous,
}

impl std::fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReporterKind::Verified => write!(f, "Verified"),
            ReporterKind::Anonymous => write!(f, "Anonymous"),
        }
    }
}

// --- Issue ---

/// One entry in an issue's append-only status history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: IssueStatus,
    pub at: DateTime<Utc>,
}

/// A citizen-submitted report of a civic problem. Issues are never physically
/// deleted — moderation hides them and they stay in the ledger for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub category: IssueCategory,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub position: Option<GeoPoint>,
    pub description: String,
    pub status: IssueStatus,
    pub reported_at: DateTime<Utc>,
    pub reporter: ReporterKind,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub status_log: Vec<StatusEntry>,
}

impl Issue {
    /// Apply a status change. The log is append-only and its last entry
    /// always matches the current status.
    pub fn set_status(&mut self, status: IssueStatus, at: DateTime<Utc>) {
        self.status = status;
        self.status_log.push(StatusEntry { status, at });
    }

    /// Distance from a viewer position, if this issue carries coordinates.
    pub fn distance_km_from(&self, viewer: GeoPoint) -> Option<f64> {
        self.position
            .map(|p| haversine_km(viewer.lat, viewer.lng, p.lat, p.lng))
    }

    /// True when the issue is outside the viewer's fixed neighborhood zone.
    /// Unknown viewer position or a coordinate-free issue never gates.
    pub fn outside_neighborhood(&self, viewer: Option<GeoPoint>) -> Option<f64> {
        let viewer = viewer?;
        match self.distance_km_from(viewer) {
            Some(d) if d > NEIGHBORHOOD_RADIUS_KM => Some(d),
            _ => None,
        }
    }
}
