//! User domain entity and role capabilities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed set of account roles.
///
/// A role is fixed at registration. Every access-control decision goes
/// through the capability methods below, resolved once per request, instead
/// of ad hoc string comparison at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Parent,
    Tutor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Parent => "parent",
            Role::Tutor => "tutor",
        }
    }

    /// Roles selectable on the public registration form (admin accounts are
    /// only created from the back-office).
    pub fn is_public(&self) -> bool {
        matches!(self, Role::Parent | Role::Tutor)
    }

    /// May post and edit course requests.
    pub fn can_post_request(&self) -> bool {
        matches!(self, Role::Parent | Role::Admin)
    }

    /// May browse the course-request marketplace feed.
    pub fn can_browse_requests(&self) -> bool {
        matches!(self, Role::Tutor | Role::Admin)
    }

    /// May author reviews (unlock ownership is checked separately).
    pub fn can_review(&self) -> bool {
        matches!(self, Role::Parent)
    }

    /// Back-office access.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "tutor" => Role::Tutor,
            _ => Role::Parent,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
    pub country_id: Option<Uuid>,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Back-office access: admins and superusers.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff() || self.is_superuser
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        if full.trim().is_empty() {
            self.username.clone()
        } else {
            full.trim().to_string()
        }
    }
}

/// The authenticated identity threaded through services, resolved once
/// from the request's credentials.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub is_superuser: bool,
}

impl Actor {
    pub fn is_staff(&self) -> bool {
        self.role.is_staff() || self.is_superuser
    }

    pub fn can_post_request(&self) -> bool {
        self.role.can_post_request() || self.is_superuser
    }

    pub fn can_browse_requests(&self) -> bool {
        self.role.can_browse_requests() || self.is_superuser
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            is_superuser: user.is_superuser,
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    /// Login identifier
    #[schema(example = "awa.kone")]
    pub username: String,
    #[schema(example = "awa@example.com")]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Account role
    #[schema(example = "parent")]
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Profile fields a user may edit from their dashboard
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateAccount {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_registration_excludes_admin() {
        assert!(Role::Parent.is_public());
        assert!(Role::Tutor.is_public());
        assert!(!Role::Admin.is_public());
    }

    #[test]
    fn capabilities_follow_roles() {
        assert!(Role::Parent.can_post_request());
        assert!(!Role::Tutor.can_post_request());
        assert!(Role::Tutor.can_browse_requests());
        assert!(!Role::Parent.can_browse_requests());
        assert!(Role::Parent.can_review());
        assert!(!Role::Tutor.can_review());
        assert!(Role::Admin.is_staff());
    }

    #[test]
    fn unknown_role_string_defaults_to_parent() {
        assert_eq!(Role::from("parent"), Role::Parent);
        assert_eq!(Role::from("tutor"), Role::Tutor);
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("garbage"), Role::Parent);
    }

    #[test]
    fn staff_includes_superuser_regardless_of_role() {
        let mut user = User {
            id: Uuid::new_v4(),
            username: "root".into(),
            email: "root@example.com".into(),
            password_hash: "hash".into(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            role: Role::Parent,
            country_id: None,
            is_superuser: true,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(user.is_staff());
        user.is_superuser = false;
        assert!(!user.is_staff());
    }
}
