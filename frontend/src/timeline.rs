use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Completed,
    InProgress,
    Pending,
}

impl Status {
    pub fn badge_label(&self) -> &'static str {
        match self {
            Status::Completed => "COMPLETE",
            Status::InProgress => "IN PROGRESS",
            Status::Pending => "PENDING",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Status::Completed => "status-badge status-completed",
            Status::InProgress => "status-badge status-in-progress",
            Status::Pending => "status-badge status-pending",
        }
    }
}

/// Symbol drawn inside a node. The orbit engine never looks at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Calendar,
    FileText,
    Code,
    User,
    Clock,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Calendar => "\u{1F4C5}",
            Icon::FileText => "\u{1F4C4}",
            Icon::Code => "</>",
            Icon::User => "\u{1F464}",
            Icon::Clock => "\u{23F0}",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: u32,
    pub title: String,
    pub date: String,
    pub content: String,
    pub category: String,
    pub icon: Icon,
    #[serde(default)]
    pub related_ids: Vec<u32>,
    pub status: Status,
    pub energy: u32,
}

/// Parses and validates a JSON array of timeline items.
pub fn load_timeline(json: &str) -> Result<Vec<TimelineItem>, TimelineError> {
    let items: Vec<TimelineItem> = serde_json::from_str(json)?;
    validate(&items)?;
    Ok(items)
}

pub fn validate(items: &[TimelineItem]) -> Result<(), TimelineError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(TimelineError::DuplicateId(item.id));
        }
        if item.energy > 100 {
            return Err(TimelineError::EnergyOutOfRange {
                id: item.id,
                energy: item.energy,
            });
        }
    }

    // Dangling relations are allowed, they just render as "Unknown".
    for item in items {
        for related in item.related_ids.iter().filter(|id| !seen.contains(*id)) {
            debug!("timeline item {} relates to missing item {}", item.id, related);
        }
    }
    Ok(())
}

const SAMPLE_TIMELINE: &str = r#"[
    {
        "id": 1,
        "title": "Planning",
        "date": "Jan 2024",
        "content": "Project planning and requirements gathering phase.",
        "category": "Planning",
        "icon": "calendar",
        "relatedIds": [2],
        "status": "completed",
        "energy": 100
    },
    {
        "id": 2,
        "title": "Design",
        "date": "Feb 2024",
        "content": "UI/UX design and system architecture.",
        "category": "Design",
        "icon": "file-text",
        "relatedIds": [1, 3],
        "status": "completed",
        "energy": 90
    },
    {
        "id": 3,
        "title": "Development",
        "date": "Mar 2024",
        "content": "Core features implementation and testing.",
        "category": "Development",
        "icon": "code",
        "relatedIds": [2, 4],
        "status": "in-progress",
        "energy": 60
    },
    {
        "id": 4,
        "title": "Testing",
        "date": "Apr 2024",
        "content": "User testing and bug fixes.",
        "category": "Testing",
        "icon": "user",
        "relatedIds": [3, 5],
        "status": "pending",
        "energy": 30
    },
    {
        "id": 5,
        "title": "Release",
        "date": "May 2024",
        "content": "Final deployment and release.",
        "category": "Release",
        "icon": "clock",
        "relatedIds": [4],
        "status": "pending",
        "energy": 10
    }
]"#;

/// The project timeline shown on the landing page.
pub fn sample_timeline() -> Result<Vec<TimelineItem>, TimelineError> {
    load_timeline(SAMPLE_TIMELINE)
}
