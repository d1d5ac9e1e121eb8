use typed_builder::TypedBuilder;

use wardwatch_common::{GeoPoint, IssueCategory, ReporterKind};

/// A report as submitted from the form, before the desk stamps identity,
/// timestamps, and lifecycle state. The position comes from the most recent
/// map interaction, if any; media references are passed through opaque.
#[derive(Debug, Clone, TypedBuilder)]
pub struct NewIssue {
    pub category: IssueCategory,
    pub description: String,
    #[builder(default)]
    pub location: Option<String>,
    #[builder(default)]
    pub position: Option<GeoPoint>,
    #[builder(default = ReporterKind::Anonymous)]
    pub reporter: ReporterKind,
    #[builder(default)]
    pub username: Option<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default)]
    pub video_url: Option<String>,
}
