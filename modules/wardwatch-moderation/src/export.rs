use serde::Serialize;

use wardwatch_common::Issue;

/// One spreadsheet row. Field names carry the exported column headers.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Type")]
    pub category: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Reporter")]
    pub reporter: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Flags")]
    pub flags: u32,
}

/// Pure projection of the full ledger (hidden rows included) for
/// spreadsheet export. The writer that turns rows into a workbook is the
/// presentation layer's concern.
pub fn report_rows(issues: &[Issue]) -> Vec<ReportRow> {
    issues
        .iter()
        .map(|issue| ReportRow {
            category: issue.category.to_string(),
            location: issue.location.clone().unwrap_or_default(),
            description: issue.description.clone(),
            status: issue.status.to_string(),
            date: issue.reported_at.to_rfc3339(),
            reporter: issue.reporter.to_string(),
            latitude: issue.position.map(|p| p.lat),
            longitude: issue.position.map(|p| p.lng),
            flags: issue.flags,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use wardwatch_common::{
        GeoPoint, IssueCategory, IssueStatus, ReporterKind, StatusEntry,
    };

    #[test]
    fn rows_project_all_columns_and_include_hidden() {
        let now = Utc::now();
        let mut issue = Issue {
            id: Uuid::new_v4(),
            category: IssueCategory::WaterLeakage,
            location: Some("Ward 12, near the market".to_string()),
            position: Some(GeoPoint {
                lat: 28.6139,
                lng: 77.2090,
            }),
            description: "Burst pipe flooding the lane".to_string(),
            status: IssueStatus::InProgress,
            reported_at: now,
            reporter: ReporterKind::Verified,
            username: Some("ravi92".to_string()),
            image_url: None,
            video_url: None,
            flags: 4,
            hidden: true,
            status_log: vec![StatusEntry {
                status: IssueStatus::Open,
                at: now,
            }],
        };
        issue.set_status(IssueStatus::InProgress, now);

        let rows = report_rows(&[issue]);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.category, "Water Leakage");
        assert_eq!(row.status, "In Progress");
        assert_eq!(row.reporter, "Verified");
        assert_eq!(row.latitude, Some(28.6139));
        assert_eq!(row.longitude, Some(77.2090));
        assert_eq!(row.flags, 4);
    }

    #[test]
    fn missing_optionals_become_blank_or_none() {
        let now = Utc::now();
        let issue = Issue {
            id: Uuid::new_v4(),
            category: IssueCategory::Other,
            location: None,
            position: None,
            description: "Stray cattle on road".to_string(),
            status: IssueStatus::Open,
            reported_at: now,
            reporter: ReporterKind::Anonymous,
            username: None,
            image_url: None,
            video_url: None,
            flags: 0,
            hidden: false,
            status_log: vec![StatusEntry {
                status: IssueStatus::Open,
                at: now,
            }],
        };

        let rows = report_rows(&[issue]);
        assert_eq!(rows[0].location, "");
        assert_eq!(rows[0].latitude, None);
        assert_eq!(rows[0].longitude, None);
    }
}
