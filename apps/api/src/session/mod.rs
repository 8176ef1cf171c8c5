//! Role gate. Picking a role opens its dashboard; only HR has features today.

pub mod handlers;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Hr,
    Finance,
    Marketing,
    Accounting,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Hr, Role::Finance, Role::Marketing, Role::Accounting];

    pub fn label(self) -> &'static str {
        match self {
            Role::Hr => "HR",
            Role::Finance => "Фінансист",
            Role::Marketing => "Маркетолог",
            Role::Accounting => "Бухгалтер",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    JobDescriptions,
    CandidateAnalysis,
    AiSettings,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub role: Role,
    pub title: &'static str,
    pub features: Vec<Feature>,
    /// Shown instead of features for roles without a module yet.
    pub message: Option<&'static str>,
}

pub fn dashboard_for(role: Role) -> Dashboard {
    let (features, message) = match role {
        Role::Hr => (
            vec![
                Feature::JobDescriptions,
                Feature::CandidateAnalysis,
                Feature::AiSettings,
            ],
            None,
        ),
        Role::Finance => (
            vec![],
            Some("Фінансовий модуль буде додано в наступних версіях"),
        ),
        Role::Marketing => (
            vec![],
            Some("Маркетинговий модуль буде додано в наступних версіях"),
        ),
        Role::Accounting => (
            vec![],
            Some("Бухгалтерський модуль буде додано в наступних версіях"),
        ),
    };

    Dashboard {
        role,
        title: role.label(),
        features,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_hr_has_features() {
        for role in Role::ALL {
            let dashboard = dashboard_for(role);
            if role == Role::Hr {
                assert_eq!(dashboard.features.len(), 3);
                assert!(dashboard.message.is_none());
            } else {
                assert!(dashboard.features.is_empty());
                assert!(dashboard.message.unwrap().contains("наступних версіях"));
            }
        }
    }

    #[test]
    fn test_feature_ids_are_kebab_case() {
        let json = serde_json::to_value(Feature::CandidateAnalysis).unwrap();
        assert_eq!(json, "candidate-analysis");
    }
}
