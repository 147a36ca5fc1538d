//! Client-side ownership checks.
//!
//! These gates exist for UX: they refuse an action with an explanation
//! before any network traffic happens. The backend independently enforces
//! the same rules and may still refuse after the client gate passed (stale
//! local ownership data), so callers must handle [`crate::ApiError::Forbidden`]
//! from remote calls as well.

use crate::error::ApiError;
use crate::models::{Identity, Project};

pub fn is_owner(identity: &Identity, project: &Project) -> bool {
    identity.id == project.owner_id
}

/// Owner or listed member.
pub fn can_access(identity: &Identity, project: &Project) -> bool {
    is_owner(identity, project) || project.member_ids.iter().any(|m| *m == identity.id)
}

/// Refuse `action` unless the identity owns the project.
pub fn require_owner(identity: &Identity, project: &Project, action: &str) -> Result<(), ApiError> {
    if is_owner(identity, project) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Only the project owner can {action}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn identity(id: &str) -> Identity {
        Identity {
            id: id.into(),
            name: format!("user {id}"),
            email: format!("{id}@example.com"),
            role: "Team Member".into(),
        }
    }

    fn project(owner: &str, members: &[&str]) -> Project {
        Project {
            id: "p1".into(),
            title: "Launch".into(),
            description: String::new(),
            owner_id: owner.into(),
            member_ids: members.iter().map(|m| m.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn members_can_access_but_not_administer() {
        let owner = identity("u1");
        let member = identity("u2");
        let stranger = identity("u3");
        let p = project("u1", &["u2"]);

        assert!(can_access(&owner, &p));
        assert!(can_access(&member, &p));
        assert!(!can_access(&stranger, &p));

        assert!(require_owner(&owner, &p, "create tasks").is_ok());
        let refusal = require_owner(&member, &p, "create tasks").unwrap_err();
        assert_eq!(
            refusal,
            ApiError::Forbidden("Only the project owner can create tasks".into())
        );
    }
}
