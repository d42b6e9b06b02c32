// ============================================
// Engagement Aggregator
// ============================================
//
// Folds a user's engagement events into one integer weight per activity:
// score = views * 1 + likes * 2 + comments * 3
//
// Only events whose owner_id matches the requested user count. Activity ids
// are not checked against the catalogue here; dangling ids are dropped at the
// profile join.

use crate::models::{EngagementEvent, EngagementKind};
use std::collections::HashMap;
use tracing::debug;

/// activity_id -> engagement weight (always >= 1 for present keys)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngagementScores {
    scores: HashMap<String, u32>,
}

impl EngagementScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, activity_id: &str, kind: EngagementKind) {
        *self.scores.entry(activity_id.to_string()).or_insert(0) += kind.weight();
    }

    pub fn get(&self, activity_id: &str) -> Option<u32> {
        self.scores.get(activity_id).copied()
    }

    pub fn contains(&self, activity_id: &str) -> bool {
        self.scores.contains_key(activity_id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(id, score)| (id.as_str(), *score))
    }
}

impl FromIterator<(String, u32)> for EngagementScores {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut scores = EngagementScores::new();
        for (activity_id, weight) in iter {
            *scores.scores.entry(activity_id).or_insert(0) += weight;
        }
        scores
    }
}

/// Aggregates engagement events into [`EngagementScores`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementAggregator;

impl EngagementAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Scores for one user. Events from other users are skipped.
    pub fn aggregate_for_user(
        &self,
        user_id: &str,
        views: &[EngagementEvent],
        likes: &[EngagementEvent],
        comments: &[EngagementEvent],
    ) -> EngagementScores {
        let scores = self.fold(Some(user_id), views, likes, comments);

        debug!(
            user_id = %user_id,
            engaged_activities = scores.len(),
            "Aggregated user engagement"
        );

        scores
    }

    /// Scores across every user in the request, used for popularity ordering.
    pub fn aggregate_all(
        &self,
        views: &[EngagementEvent],
        likes: &[EngagementEvent],
        comments: &[EngagementEvent],
    ) -> EngagementScores {
        self.fold(None, views, likes, comments)
    }

    fn fold(
        &self,
        user_id: Option<&str>,
        views: &[EngagementEvent],
        likes: &[EngagementEvent],
        comments: &[EngagementEvent],
    ) -> EngagementScores {
        let mut scores = EngagementScores::new();

        let batches = [
            (views, EngagementKind::View),
            (likes, EngagementKind::Like),
            (comments, EngagementKind::Comment),
        ];

        for (events, kind) in batches {
            for event in events {
                if user_id.map_or(true, |uid| event.owner_id == uid) {
                    scores.record(&event.activity_id, kind);
                }
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(owner: &str, activity: &str) -> EngagementEvent {
        EngagementEvent {
            id: None,
            owner_id: owner.to_string(),
            activity_id: activity.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_weights_accumulate_across_kinds() {
        let aggregator = EngagementAggregator::new();
        let views = vec![event("u1", "a1"), event("u1", "a1"), event("u1", "a2")];
        let likes = vec![event("u1", "a1")];
        let comments = vec![event("u1", "a1"), event("u1", "a3")];

        let scores = aggregator.aggregate_for_user("u1", &views, &likes, &comments);

        // a1: 2 views + 1 like + 1 comment = 2 + 2 + 3
        assert_eq!(scores.get("a1"), Some(7));
        assert_eq!(scores.get("a2"), Some(1));
        assert_eq!(scores.get("a3"), Some(3));
        assert_eq!(scores.len(), 3);
    }

    #[test]
    fn test_other_users_are_ignored() {
        let aggregator = EngagementAggregator::new();
        let views = vec![event("u2", "a1")];
        let likes = vec![event("u1", "a2"), event("u3", "a2")];

        let scores = aggregator.aggregate_for_user("u1", &views, &likes, &[]);

        assert!(!scores.contains("a1"));
        assert_eq!(scores.get("a2"), Some(2));
    }

    #[test]
    fn test_empty_events_give_empty_scores() {
        let scores = EngagementAggregator::new().aggregate_for_user("u1", &[], &[], &[]);
        assert!(scores.is_empty());
        assert_eq!(scores.get("a1"), None);
    }

    #[test]
    fn test_aggregate_all_counts_every_user() {
        let aggregator = EngagementAggregator::new();
        let views = vec![event("u1", "a1"), event("u2", "a1")];
        let comments = vec![event("u3", "a2")];

        let scores = aggregator.aggregate_all(&views, &[], &comments);

        assert_eq!(scores.get("a1"), Some(2));
        assert_eq!(scores.get("a2"), Some(3));
    }

    #[test]
    fn test_from_iterator_sums_duplicates() {
        let scores: EngagementScores = vec![("a1".to_string(), 1), ("a1".to_string(), 3)]
            .into_iter()
            .collect();
        assert_eq!(scores.get("a1"), Some(4));
    }
}
