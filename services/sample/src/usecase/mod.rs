pub mod external_login;
pub mod role;
pub mod user;
