use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DashboardError;
use crate::metrics;

/// Opaque profile identifier handed over by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        StudentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub name: String,
    pub code: String,
    pub faculty: Option<String>,
    /// Credit weight for the weighted GPA; unset counts as the default.
    #[serde(default)]
    pub credits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub subject: String,
    pub code: String,
    pub present: u32,
    pub total: u32,
    pub percentage: u32,
    pub last_class: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn new(subject: impl Into<String>, code: impl Into<String>) -> Self {
        AttendanceRecord {
            subject: subject.into(),
            code: code.into(),
            present: 0,
            total: 0,
            percentage: 0,
            last_class: None,
        }
    }

    pub fn refresh_percentage(&mut self) {
        self.percentage = metrics::attendance_percentage(self.present, self.total);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksRecord {
    pub code: String,
    pub mid1: f64,
    pub mid2: f64,
    pub assignment: f64,
    pub total: f64,
    pub max_marks: f64,
}

impl MarksRecord {
    pub fn new(code: impl Into<String>, max_marks: f64) -> Self {
        MarksRecord {
            code: code.into(),
            mid1: 0.0,
            mid2: 0.0,
            assignment: 0.0,
            total: 0.0,
            max_marks,
        }
    }

    pub fn refresh_total(&mut self) {
        self.total = metrics::marks_total(Some(self.mid1), Some(self.mid2), Some(self.assignment));
    }

    pub fn percentage(&self) -> f64 {
        metrics::marks_percentage(self.total, self.max_marks)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            other => Err(DashboardError::invalid(format!("unknown skill level {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub category: Option<String>,
    pub level: SkillLevel,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub resources: Vec<String>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub id: Uuid,
    pub goal: String,
    pub skills: Vec<String>,
    pub level: SkillLevel,
    pub steps: Vec<RoadmapStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Roadmap {
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|step| step.completed).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub day: String,
    pub time: String,
    pub subject: String,
    pub room: Option<String>,
    pub faculty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_id: StudentId,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub marks: Vec<MarksRecord>,
    #[serde(default)]
    pub timetable: Vec<TimetableEntry>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub roadmaps: Vec<Roadmap>,
    #[serde(default)]
    pub cgpa_override: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRisk {
    pub subject: String,
    pub code: String,
    pub percentage: u32,
    pub classes_needed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRisk {
    pub subject: String,
    pub total: f64,
    pub max_marks: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub attendance: Vec<AttendanceRisk>,
    pub performance: Vec<PerformanceRisk>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanEntry {
    pub week: String,
    pub subject: String,
    pub hours: u32,
    pub topics: Vec<String>,
    pub priority: Priority,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksBreakdown {
    pub subject: String,
    pub mid1: f64,
    pub mid2: f64,
    pub assignment: f64,
    pub total: f64,
    pub max_marks: f64,
    pub percentage: f64,
    pub grade_point: u8,
    pub letter_grade: &'static str,
}

/// Input row for credit-weighted GPA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectCredits {
    pub percentage: f64,
    pub credits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSubject {
    pub subject: String,
    pub total: f64,
    pub max_marks: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub average_attendance: f64,
    pub average_marks: f64,
    pub subjects_at_risk: usize,
    pub top_subject: Option<TopSubject>,
    pub cgpa: f64,
    pub cgpa_description: &'static str,
    pub weighted_gpa: f64,
    pub insights: Vec<String>,
}
