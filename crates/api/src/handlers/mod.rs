pub mod auth;
pub mod generate;
pub mod projects;
pub mod waiting_list;
