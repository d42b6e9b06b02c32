use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalogue item as sent by the backend (Prisma rows use camelCase keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(alias = "ownerId")]
    pub owner_id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(alias = "isPublic")]
    pub is_public: bool,
    #[serde(alias = "createdAt")]
    pub created_at: String,
}

/// A view, like or comment. The kind is implied by the list it arrives in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "ownerId")]
    pub owner_id: String,
    #[serde(alias = "activityId")]
    pub activity_id: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementKind {
    View,
    Like,
    Comment,
}

impl EngagementKind {
    pub fn weight(&self) -> u32 {
        match self {
            EngagementKind::View => 1,
            EngagementKind::Like => 2,
            EngagementKind::Comment => 3,
        }
    }
}

/// One ranked row of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub owner_id: String,
    pub age_days: i64,
    pub similarity_score: f64,
    pub is_public: bool,
}

/// POST /recommendations body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[serde(alias = "userId")]
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub likes: Vec<EngagementEvent>,
    #[serde(default)]
    pub views: Vec<EngagementEvent>,
    #[serde(default)]
    pub comments: Vec<EngagementEvent>,
    /// Falls back to the configured default when absent
    #[serde(default, alias = "topN")]
    pub top_n: Option<usize>,
    #[serde(default, alias = "coldStartStrategy")]
    pub cold_start_strategy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub user_id: String,
    pub recommendations: Vec<Recommendation>,
    pub reused_content: bool,
    pub count: usize,
}

impl RecommendationResponse {
    pub fn new(user_id: String, recommendations: Vec<Recommendation>, reused_content: bool) -> Self {
        Self {
            user_id,
            count: recommendations.len(),
            recommendations,
            reused_content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_weights() {
        assert_eq!(EngagementKind::View.weight(), 1);
        assert_eq!(EngagementKind::Like.weight(), 2);
        assert_eq!(EngagementKind::Comment.weight(), 3);
    }

    #[test]
    fn test_request_accepts_camel_case_rows() {
        let body = serde_json::json!({
            "user_id": "u1",
            "activities": [{
                "id": "a1",
                "ownerId": "o1",
                "habitId": "h1",
                "caption": null,
                "mediaUrls": [],
                "isPublic": true,
                "createdAt": "2024-05-01T10:00:00.000Z",
                "updatedAt": "2024-05-01T10:00:00.000Z"
            }],
            "likes": [],
            "views": [{
                "id": "v1",
                "ownerId": "u1",
                "activityId": "a1",
                "createdAt": "2024-05-02T10:00:00.000Z"
            }],
            "comments": [{
                "id": "c1",
                "ownerId": "u1",
                "commentText": "nice",
                "activityId": "a1",
                "createdAt": "2024-05-02T10:00:00.000Z"
            }],
            "top_n": 5,
            "cold_start_strategy": "newest"
        });

        let request: RecommendationRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.activities[0].owner_id, "o1");
        assert!(request.activities[0].is_public);
        assert_eq!(request.views[0].activity_id, "a1");
        assert_eq!(request.comments.len(), 1);
        assert_eq!(request.top_n, Some(5));
        assert_eq!(request.cold_start_strategy.as_deref(), Some("newest"));
    }

    #[test]
    fn test_request_optional_fields_default() {
        let body = serde_json::json!({
            "userId": "u1",
            "activities": []
        });

        let request: RecommendationRequest = serde_json::from_value(body).unwrap();
        assert!(request.likes.is_empty());
        assert!(request.top_n.is_none());
        assert!(request.cold_start_strategy.is_none());
    }

    #[test]
    fn test_response_count_matches_len() {
        let rec = Recommendation {
            id: "a1".to_string(),
            owner_id: "o1".to_string(),
            age_days: 0,
            similarity_score: 0.0,
            is_public: true,
        };
        let response = RecommendationResponse::new("u1".to_string(), vec![rec], true);
        assert_eq!(response.count, 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["reusedContent"], true);
        assert_eq!(json["recommendations"][0]["similarity_score"], 0.0);
        assert_eq!(json["recommendations"][0]["owner_id"], "o1");
    }
}
