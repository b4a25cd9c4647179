//! Ladder Definition
//!
//! Serde model of the rank ladder file and its conversion into
//! [`RankChange`] values.
//!
//! ```json
//! {
//!   "ranks": [
//!     {
//!       "rank": "Member",
//!       "rank_to": "Trusted",
//!       "requirements": [
//!         { "id": 1, "type": "time", "minutes": 60,
//!           "results": [{ "type": "message", "message": "One hour played, &p!" }] }
//!       ],
//!       "results": [{ "type": "change_group" }]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::condition::{Condition, GlobalTimeCondition, LocalTimeCondition};
use crate::domain::effect::{ChangeGroupEffect, Effect, MessageEffect, Notifier, RankBackend};
use crate::domain::entity::{rank_change::RankChange, requirement::Requirement};
use crate::domain::value_object::{Minutes, RequirementId};
use crate::error::{RankupError, RankupResult};

#[derive(Debug, Clone, Deserialize)]
pub struct LadderDefinition {
    pub ranks: Vec<RankDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankDefinition {
    pub rank: String,
    #[serde(default)]
    pub rank_to: Option<String>,
    pub requirements: Vec<RequirementDefinition>,
    #[serde(default)]
    pub results: Vec<ResultDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequirementDefinition {
    pub id: RequirementId,
    #[serde(flatten)]
    pub condition: ConditionDefinition,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub auto_complete: bool,
    #[serde(default)]
    pub results: Vec<ResultDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionDefinition {
    Time { minutes: Minutes },
    GlobalTime { minutes: Minutes },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultDefinition {
    ChangeGroup {
        #[serde(default)]
        group: Option<String>,
    },
    Message {
        message: String,
    },
}

impl LadderDefinition {
    pub fn from_json(json: &str) -> RankupResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> RankupResult<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// Build the rank changes, wiring effects to the host capabilities
    pub fn build(
        &self,
        backend: Arc<dyn RankBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> RankupResult<Vec<RankChange>> {
        let build_result = |definition: &ResultDefinition| -> Arc<dyn Effect> {
            match definition {
                ResultDefinition::ChangeGroup { group: Some(group) } => {
                    Arc::new(ChangeGroupEffect::to_group(backend.clone(), group.clone()))
                }
                ResultDefinition::ChangeGroup { group: None } => {
                    Arc::new(ChangeGroupEffect::new(backend.clone()))
                }
                ResultDefinition::Message { message } => {
                    Arc::new(MessageEffect::new(notifier.clone(), message.clone()))
                }
            }
        };

        self.ranks
            .iter()
            .map(|rank| {
                let mut seen = HashSet::new();
                let requirements = rank
                    .requirements
                    .iter()
                    .map(|definition| {
                        if !seen.insert(definition.id) {
                            return Err(RankupError::InvalidLadder(format!(
                                "rank '{}' uses requirement id {} twice",
                                rank.rank, definition.id
                            )));
                        }

                        let requirement = definition
                            .results
                            .iter()
                            .fold(
                                Requirement::new(definition.id, definition.condition.build()),
                                |requirement, result| requirement.with_result(build_result(result)),
                            )
                            .optional(definition.optional)
                            .auto_complete(definition.auto_complete);
                        Ok(Some(requirement))
                    })
                    .collect::<RankupResult<Vec<_>>>()?;

                let results = rank
                    .results
                    .iter()
                    .map(|definition| Some(build_result(definition)))
                    .collect();

                Ok(RankChange::new(
                    rank.rank.clone(),
                    rank.rank_to.clone(),
                    requirements,
                    results,
                ))
            })
            .collect()
    }
}

impl ConditionDefinition {
    fn build(&self) -> Arc<dyn Condition> {
        match *self {
            ConditionDefinition::Time { minutes } => Arc::new(LocalTimeCondition::new(minutes)),
            ConditionDefinition::GlobalTime { minutes } => {
                Arc::new(GlobalTimeCondition::new(minutes))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::player::Player;
    use crate::domain::value_object::PlayerId;

    struct NoBackend;

    impl RankBackend for NoBackend {
        fn primary_group(&self, _player: &PlayerId) -> Option<String> {
            None
        }

        fn change_group(&self, _player: &PlayerId, _from: &str, _to: &str) -> bool {
            false
        }
    }

    impl Notifier for NoBackend {
        fn notify(&self, _player: &Player, _message: &str) -> bool {
            true
        }
    }

    const LADDER: &str = r#"{
        "ranks": [
            {
                "rank": "Member",
                "rank_to": "Trusted",
                "requirements": [
                    { "id": 1, "type": "time", "minutes": 60,
                      "results": [{ "type": "message", "message": "One hour, &p!" }] },
                    { "id": 2, "type": "global_time", "minutes": 600, "optional": true }
                ],
                "results": [{ "type": "change_group" }, { "type": "message", "message": "Welcome" }]
            },
            {
                "rank": "Trusted",
                "requirements": [{ "id": 1, "type": "time", "minutes": 1440, "auto_complete": true }]
            }
        ]
    }"#;

    fn build(json: &str) -> RankupResult<Vec<RankChange>> {
        let backend = Arc::new(NoBackend);
        LadderDefinition::from_json(json)?.build(backend.clone(), backend)
    }

    #[test]
    fn test_build_ladder() {
        let ladder = build(LADDER).unwrap();

        assert_eq!(ladder.len(), 2);
        assert_eq!(ladder[0].rank(), "Member");
        assert_eq!(ladder[0].rank_to(), Some("Trusted"));
        assert!(!ladder[1].has_rank_up());

        let first = ladder[0].requirements()[0].as_ref().unwrap();
        assert_eq!(first.id, RequirementId::new(1));
        assert_eq!(first.results().len(), 1);
        assert!(ladder[0].requirements()[1].as_ref().unwrap().optional);
        assert!(ladder[1].requirements()[0].as_ref().unwrap().auto_complete);
    }

    #[test]
    fn test_rendered_ladder() {
        let ladder = build(LADDER).unwrap();
        assert_eq!(
            ladder[0].to_string(),
            "Member: Play for 60 minutes, Play for 600 minutes across all servers -> Change group, Message: Welcome"
        );
        assert_eq!(ladder[1].to_string(), "Trusted: Play for 1440 minutes -> ");
    }

    #[test]
    fn test_duplicate_requirement_ids_are_rejected() {
        let json = r#"{ "ranks": [{ "rank": "Member", "requirements": [
            { "id": 1, "type": "time", "minutes": 1 },
            { "id": 1, "type": "time", "minutes": 2 }
        ] }] }"#;

        assert!(matches!(build(json), Err(RankupError::InvalidLadder(_))));
    }

    #[test]
    fn test_unknown_condition_type_is_rejected() {
        let json = r#"{ "ranks": [{ "rank": "Member", "requirements": [
            { "id": 1, "type": "votes", "minutes": 1 }
        ] }] }"#;

        assert!(matches!(build(json), Err(RankupError::Serialization(_))));
    }
}
