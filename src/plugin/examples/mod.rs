//! 示例插件

pub mod status_card;

pub use status_card::{status_card_plugin, ServiceStatus};
