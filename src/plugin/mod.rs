//! 插件渲染模块
//!
//! 提供插件视图组合功能，支持：
//! - 插件标识解析（名称或位置合成标识）
//! - 按依赖刷新插件派生数据
//! - 合并覆盖属性后渲染带 key 的片段
//! - 声明式插件 UI 片段

pub mod examples;
mod hook;
mod identity;
mod registry;
mod renderer;
mod types;
pub mod ui_builder;
pub mod ui_types;

pub use hook::{use_plugin_renderer, DependencyTracker, RenderSession, SessionState};
pub use identity::{get_plugin_name, get_plugin_prefix, PLUGIN_PREFIX};
pub use registry::{DerivedData, DerivedEntry};
pub use renderer::{merge_props, render_all, PluginRenderer, RenderedFragment};
pub use types::{
    create_plugin, BoxError, PluginData, PluginError, RenderFn, TransformFn, UiPlugin,
};
pub use ui_builder::SurfaceBuilder;
pub use ui_types::{BoundValue, ComponentDef, ComponentType, Surface};
