mod home;
pub use home::Home;

mod admin;
pub use admin::Admin;
