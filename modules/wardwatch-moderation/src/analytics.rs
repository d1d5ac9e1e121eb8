use wardwatch_common::{Issue, IssueCategory, ReporterKind};

/// Derived, read-only rollup for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total: usize,
    pub top_category: Option<IssueCategory>,
    pub verified: usize,
    pub anonymous: usize,
}

impl AnalyticsSummary {
    /// Dashboard label for the most reported category; "-" when the ledger
    /// is empty.
    pub fn top_category_label(&self) -> String {
        self.top_category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Summarize a collection in a single left-to-right scan. Ties on the top
/// category keep the first-encountered one.
pub fn summarize(issues: &[Issue]) -> AnalyticsSummary {
    let mut counts: Vec<(IssueCategory, usize)> = Vec::new();
    let mut verified = 0;
    let mut anonymous = 0;

    for issue in issues {
        match counts.iter_mut().find(|(c, _)| *c == issue.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((issue.category, 1)),
        }
        match issue.reporter {
            ReporterKind::Verified => verified += 1,
            ReporterKind::Anonymous => anonymous += 1,
        }
    }

    let mut top_category = None;
    let mut max = 0;
    for (category, n) in counts {
        if n > max {
            max = n;
            top_category = Some(category);
        }
    }

    AnalyticsSummary {
        total: issues.len(),
        top_category,
        verified,
        anonymous,
    }
}
