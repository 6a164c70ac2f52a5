//! Job classification value objects.

use super::text_enum;
use serde::{Deserialize, Serialize};

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

text_enum!(JobType, "jobType", {
    FullTime => "FULL_TIME",
    PartTime => "PART_TIME",
    Contract => "CONTRACT",
    Internship => "INTERNSHIP",
});

/// Seniority a posting targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    EntryLevel,
    MidLevel,
    Senior,
    Manager,
}

text_enum!(ExperienceLevel, "experienceLevel", {
    EntryLevel => "ENTRY_LEVEL",
    MidLevel => "MID_LEVEL",
    Senior => "SENIOR",
    Manager => "MANAGER",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_text_form() {
        for job_type in JobType::all() {
            let json = serde_json::to_string(job_type).unwrap();
            assert_eq!(json, format!("\"{}\"", job_type.as_str()));
        }
        for level in ExperienceLevel::all() {
            let json = serde_json::to_string(level).unwrap();
            assert_eq!(json, format!("\"{level}\""));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("FULL_TIME".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("MID_LEVEL".parse::<ExperienceLevel>().unwrap(), ExperienceLevel::MidLevel);
        assert!("FREELANCE".parse::<JobType>().is_err());
    }
}
