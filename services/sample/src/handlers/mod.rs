pub mod external;
pub mod health;
pub mod roles;
pub mod users;
