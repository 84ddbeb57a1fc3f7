//! Entity fixtures.

use identity_domain::{Role, User, normalize};

/// A user named `alice` with normalized name and email already set.
pub fn test_user() -> User {
    named_user("alice")
}

/// A user with `user_name`, an `@example.com` address and normalized fields.
pub fn named_user(user_name: &str) -> User {
    let email = format!("{user_name}@example.com");
    let mut user = User::with_user_name(user_name, email.clone());
    user.normalized_name = Some(normalize(user_name));
    user.normalized_email = Some(normalize(&email));
    user
}

/// A role with its normalized name set.
pub fn test_role(name: &str) -> Role {
    let mut role = Role::new(name);
    role.normalized_name = Some(normalize(name));
    role
}
