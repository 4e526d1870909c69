//! Pillar configuration and per-pillar task lists.
//!
//! # Invariants
//! - The pillar set is created once at first run and never grows or shrinks.
//! - Pillar order is fixed: college, job, upskilling, workout.

use crate::model::task::{Task, TaskValidationError};
use serde::{Deserialize, Serialize};

/// Display label used for tasks owned by the general list.
pub const GENERAL_LIST_TITLE: &str = "General";

/// Fixed set of life domains tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarId {
    College,
    Job,
    Upskilling,
    Workout,
}

impl PillarId {
    /// All pillars in their fixed display/harvest order.
    pub const ALL: [PillarId; 4] = [
        PillarId::College,
        PillarId::Job,
        PillarId::Upskilling,
        PillarId::Workout,
    ];

    /// Stable string id used on the wire and by presentation callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::College => "college",
            Self::Job => "job",
            Self::Upskilling => "upskilling",
            Self::Workout => "workout",
        }
    }

    /// Parses a pillar selector coming from outside the core.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "college" => Ok(Self::College),
            "job" => Ok(Self::Job),
            "upskilling" => Ok(Self::Upskilling),
            "workout" => Ok(Self::Workout),
            _ => Err(TaskValidationError::UnknownPillar(value.to_string())),
        }
    }
}

/// One life domain with its own ordered checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: PillarId,
    pub title: String,
    pub description: String,
    /// Icon tag for presentation; shares the pillar id vocabulary.
    pub icon: PillarId,
    /// Color tag for presentation.
    pub color: String,
    /// Most recently added first.
    pub tasks: Vec<Task>,
}

impl Pillar {
    fn configured(id: PillarId, title: &str, description: &str, color: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            icon: id,
            color: color.to_string(),
            tasks: Vec::new(),
        }
    }
}

/// Returns the first-run pillar configuration with empty task lists.
pub fn default_pillars() -> Vec<Pillar> {
    vec![
        Pillar::configured(PillarId::College, "College", "Academic excellence", "blue"),
        Pillar::configured(PillarId::Job, "Part-Time Job", "Professional duty", "amber"),
        Pillar::configured(
            PillarId::Upskilling,
            "Upskilling",
            "Continuous improvement",
            "violet",
        ),
        Pillar::configured(PillarId::Workout, "Workout", "Physical dominance", "rose"),
    ]
}

#[cfg(test)]
mod tests {
    use super::{default_pillars, PillarId};

    #[test]
    fn default_pillars_follow_fixed_order() {
        let ids: Vec<PillarId> = default_pillars().iter().map(|pillar| pillar.id).collect();
        assert_eq!(ids, PillarId::ALL.to_vec());
        assert!(default_pillars().iter().all(|pillar| pillar.tasks.is_empty()));
    }

    #[test]
    fn parse_accepts_wire_ids_and_rejects_unknown() {
        assert_eq!(PillarId::parse(" Workout ").unwrap(), PillarId::Workout);
        for id in PillarId::ALL {
            assert_eq!(PillarId::parse(id.as_str()).unwrap(), id);
        }
        assert!(PillarId::parse("hobbies").is_err());
    }

    #[test]
    fn pillar_ids_serialize_lowercase() {
        let json = serde_json::to_value(PillarId::Upskilling).unwrap();
        assert_eq!(json, "upskilling");
    }
}
