//! User profiles, one-to-one with users.

use super::user::User;

/// Optional public details for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub website: Option<String>,
    /// Reference to an avatar image (path or URL); uploads are not handled here.
    pub picture: Option<String>,
}

/// Profile joined with its owner, as shown on the profile list.
#[derive(Debug, Clone)]
pub struct ProfileDetails {
    pub user: User,
    pub profile: UserProfile,
}

/// Editable profile fields. `None` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub website: Option<String>,
    pub picture: Option<String>,
}
