/// Role granted to a bot user (keyed by their messenger user id).
#[derive(Debug, Clone, PartialEq)]
pub struct UserRole {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}
