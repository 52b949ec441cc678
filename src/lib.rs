//! 插件视图组合
//!
//! 给定一组插件描述符，按依赖刷新每个插件的派生数据，
//! 并提供把每个插件渲染为带 key 片段的函数。

pub mod config;
pub mod logger;
pub mod plugin;

pub use config::{CacheStrategy, FragmentKey, MissingRenderPolicy, RendererOptions};
pub use plugin::{
    create_plugin, get_plugin_name, get_plugin_prefix, use_plugin_renderer, PluginData,
    PluginError, PluginRenderer, RenderSession, RenderedFragment, UiPlugin,
};
