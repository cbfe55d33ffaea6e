pub mod api;
pub mod clock;
pub mod config;
pub mod db_error;
pub mod pagination;
