/// Canonical form of a user name, email or role name used for
/// case-insensitive lookups (the `Normalized*` fields).
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}
