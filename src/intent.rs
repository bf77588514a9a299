//! Keyword routing from a free-text question to a dashboard view.
//!
//! Groups are checked in a fixed order and the first group with any keyword
//! contained in the lower-cased query wins. There is no scoring.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Attendance,
    Marks,
    Weak,
    Study,
    Timetable,
    Summary,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::Attendance,
        ViewId::Marks,
        ViewId::Weak,
        ViewId::Study,
        ViewId::Timetable,
        ViewId::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Attendance => "attendance",
            ViewId::Marks => "marks",
            ViewId::Weak => "weak",
            ViewId::Study => "study",
            ViewId::Timetable => "timetable",
            ViewId::Summary => "summary",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ViewId::ALL
            .into_iter()
            .find(|view| view.as_str() == wanted)
            .ok_or_else(|| DashboardError::invalid(format!("unknown view {s:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentDecision {
    pub component: ViewId,
    pub reasoning: String,
}

struct KeywordGroup {
    view: ViewId,
    keywords: &'static [&'static str],
    reasoning: &'static str,
}

const KEYWORD_GROUPS: [KeywordGroup; 6] = [
    KeywordGroup {
        view: ViewId::Attendance,
        keywords: &["attendance", "present", "absent"],
        reasoning: "Showing your attendance records based on your query about attendance.",
    },
    KeywordGroup {
        view: ViewId::Marks,
        keywords: &["marks", "grades", "score"],
        reasoning: "Displaying your marks and grades as you requested.",
    },
    KeywordGroup {
        view: ViewId::Weak,
        keywords: &["weak", "struggling", "difficult"],
        reasoning: "Analyzing subjects where you need improvement based on your performance.",
    },
    KeywordGroup {
        view: ViewId::Study,
        keywords: &["study plan", "study", "plan"],
        reasoning: "Creating a personalized study plan to help you improve.",
    },
    KeywordGroup {
        view: ViewId::Timetable,
        keywords: &["timetable", "schedule", "classes"],
        reasoning: "Showing your class timetable and schedule.",
    },
    KeywordGroup {
        view: ViewId::Summary,
        keywords: &["performance", "summary", "overview"],
        reasoning: "Displaying your overall academic performance summary.",
    },
];

const FALLBACK_REASONING: &str = "Showing your overall performance summary. You can ask about specific topics like attendance, marks, or study plans.";

pub fn classify(query: &str) -> IntentDecision {
    let message = query.to_lowercase();

    let decision = KEYWORD_GROUPS
        .iter()
        .find(|group| group.keywords.iter().any(|keyword| message.contains(keyword)))
        .map(|group| IntentDecision {
            component: group.view,
            reasoning: group.reasoning.to_string(),
        })
        .unwrap_or_else(|| IntentDecision {
            component: ViewId::Summary,
            reasoning: FALLBACK_REASONING.to_string(),
        });

    tracing::debug!(query, view = %decision.component, "routed query");
    decision
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_attendance_questions() {
        assert_eq!(classify("Show my attendance").component, ViewId::Attendance);
        assert_eq!(classify("How many days was I ABSENT?").component, ViewId::Attendance);
    }

    #[test]
    fn performance_goes_to_summary() {
        let decision = classify("What's my overall performance?");
        assert_eq!(decision.component, ViewId::Summary);
        assert_eq!(decision.reasoning, "Displaying your overall academic performance summary.");
    }

    #[test]
    fn each_group_is_reachable() {
        assert_eq!(classify("what are my grades").component, ViewId::Marks);
        assert_eq!(classify("which subjects am I struggling with").component, ViewId::Weak);
        assert_eq!(classify("make me a study plan").component, ViewId::Study);
        assert_eq!(classify("when are my classes tomorrow").component, ViewId::Timetable);
        assert_eq!(classify("give me an overview").component, ViewId::Summary);
    }

    #[test]
    fn earlier_groups_win_on_overlap() {
        // attendance beats timetable
        assert_eq!(classify("attendance for my classes").component, ViewId::Attendance);
        // marks beats weak
        assert_eq!(classify("my weak marks").component, ViewId::Marks);
        // weak beats study
        assert_eq!(classify("plan for weak subjects").component, ViewId::Weak);
    }

    #[test]
    fn substring_containment_counts() {
        // "explanation" contains "plan"
        assert_eq!(classify("explanation please").component, ViewId::Study);
    }

    #[test]
    fn unmatched_query_falls_back_to_summary() {
        let decision = classify("hello there");
        assert_eq!(decision.component, ViewId::Summary);
        assert_eq!(decision.reasoning, FALLBACK_REASONING);
        assert_eq!(classify("").component, ViewId::Summary);
    }

    #[test]
    fn view_ids_parse_case_insensitively() {
        assert_eq!("Timetable".parse::<ViewId>().unwrap(), ViewId::Timetable);
        assert!("grades".parse::<ViewId>().is_err());
    }
}
