use serde::Deserialize;

use crate::errors::AppError;
use crate::models::pack::PackInputs;

pub const MIN_ACHIEVEMENTS: usize = 3;
pub const MAX_ACHIEVEMENTS: usize = 5;

/// Raw pack-creation body. Every field defaults so that a missing field gets
/// a field-specific message from `validate_pack_request`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePackRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub city_or_remote: String,
    #[serde(default)]
    pub current_salary: Option<i64>,
    #[serde(default)]
    pub target_salary: Option<i64>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Checks a creation request and returns trimmed, validated inputs.
pub fn validate_pack_request(request: CreatePackRequest) -> Result<PackInputs, AppError> {
    let job_title = request.job_title.trim().to_string();
    if job_title.is_empty() {
        return Err(AppError::Validation("job_title is required".to_string()));
    }

    let city_or_remote = request.city_or_remote.trim().to_string();
    if city_or_remote.is_empty() {
        return Err(AppError::Validation("city_or_remote is required".to_string()));
    }

    let current_salary = match request.current_salary {
        None => return Err(AppError::Validation("current_salary is required".to_string())),
        Some(s) if s <= 0 => {
            return Err(AppError::Validation(
                "current_salary must be greater than zero".to_string(),
            ))
        }
        Some(s) => s,
    };

    if matches!(request.target_salary, Some(t) if t <= 0) {
        return Err(AppError::Validation(
            "target_salary must be greater than zero".to_string(),
        ));
    }

    let achievements: Vec<String> = request
        .achievements
        .iter()
        .map(|a| a.trim().to_string())
        .collect();

    if achievements.iter().any(String::is_empty) {
        return Err(AppError::Validation(
            "achievements cannot contain blank entries".to_string(),
        ));
    }
    if !(MIN_ACHIEVEMENTS..=MAX_ACHIEVEMENTS).contains(&achievements.len()) {
        return Err(AppError::Validation(format!(
            "between {MIN_ACHIEVEMENTS} and {MAX_ACHIEVEMENTS} achievements are required, got {}",
            achievements.len()
        )));
    }

    Ok(PackInputs {
        job_title,
        city_or_remote,
        current_salary,
        target_salary: request.target_salary,
        achievements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(achievement_count: usize) -> CreatePackRequest {
        CreatePackRequest {
            job_title: " Staff Engineer ".to_string(),
            city_or_remote: "Seattle".to_string(),
            current_salary: Some(180_000),
            target_salary: None,
            achievements: (1..=achievement_count)
                .map(|i| format!("Achievement {i}"))
                .collect(),
        }
    }

    #[test]
    fn test_two_achievements_rejected() {
        assert!(matches!(
            validate_pack_request(request(2)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_three_to_five_achievements_accepted() {
        for count in 3..=5 {
            let inputs = validate_pack_request(request(count)).unwrap();
            assert_eq!(inputs.achievements.len(), count);
        }
    }

    #[test]
    fn test_six_achievements_rejected() {
        assert!(validate_pack_request(request(6)).is_err());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let inputs = validate_pack_request(request(3)).unwrap();
        assert_eq!(inputs.job_title, "Staff Engineer");
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let mut no_title = request(3);
        no_title.job_title = "  ".to_string();
        assert!(validate_pack_request(no_title).is_err());

        let mut no_location = request(3);
        no_location.city_or_remote.clear();
        assert!(validate_pack_request(no_location).is_err());

        let mut no_salary = request(3);
        no_salary.current_salary = None;
        assert!(validate_pack_request(no_salary).is_err());
    }

    #[test]
    fn test_non_positive_salaries_rejected() {
        let mut zero = request(3);
        zero.current_salary = Some(0);
        assert!(validate_pack_request(zero).is_err());

        let mut negative_target = request(3);
        negative_target.target_salary = Some(-1);
        assert!(validate_pack_request(negative_target).is_err());
    }

    #[test]
    fn test_blank_achievement_rejected() {
        let mut blank = request(3);
        blank.achievements[1] = "   ".to_string();
        assert!(validate_pack_request(blank).is_err());
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let request: CreatePackRequest = serde_json::from_str(r#"{"job_title": "Designer"}"#).unwrap();
        assert!(request.achievements.is_empty());
        assert!(request.current_salary.is_none());
    }
}
