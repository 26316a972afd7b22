pub mod activity;
pub mod admin_actions;
pub mod dispatch;
pub mod logs;
pub mod review;
pub mod schema;
pub mod shared;
pub mod stats;
pub mod trail;
pub mod verify;
