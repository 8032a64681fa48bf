use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
}

impl ApprovalStatus {
    pub fn approved(self) -> bool {
        self == ApprovalStatus::Approved
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub status: Option<ApprovalStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize)]
pub struct ReviewUserRequest {
    pub action: ReviewAction,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ReviewOutcome {
    Approved { user: crate::auth::dtos::UserProfile },
    Rejected { removed_empresas: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_action_parsing() {
        let req: ReviewUserRequest = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
        assert_eq!(req.action, ReviewAction::Approve);

        let req: ReviewUserRequest = serde_json::from_str(r#"{"action":"reject"}"#).unwrap();
        assert_eq!(req.action, ReviewAction::Reject);

        assert!(serde_json::from_str::<ReviewUserRequest>(r#"{"action":"ban"}"#).is_err());
    }

    #[test]
    fn test_status_filter_parsing() {
        let q: ListUsersQuery = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert_eq!(q.status, Some(ApprovalStatus::Pending));
        assert!(!ApprovalStatus::Pending.approved());
        assert!(ApprovalStatus::Approved.approved());
    }
}
