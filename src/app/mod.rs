pub mod demo;
pub mod dispatch;
