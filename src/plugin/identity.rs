//! 插件标识解析
//!
//! 标识同时用作派生数据的查找键和渲染片段的 key，写入和读取必须走同一个函数

use super::types::UiPlugin;

/// 合成标识前缀
pub const PLUGIN_PREFIX: &str = "ui-plugin-";

/// 根据位置生成合成标识，如 `ui-plugin-3`
pub fn get_plugin_prefix(index: usize) -> String {
    format!("{PLUGIN_PREFIX}{index}")
}

/// 解析插件标识：非空名称原样返回，否则使用位置合成标识
pub fn get_plugin_name<F>(plugin: &UiPlugin<F>, index: usize) -> String {
    match plugin.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => get_plugin_prefix(index),
    }
}
