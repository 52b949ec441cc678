//! 插件渲染类型定义
//!
//! 定义 UiPlugin 描述符、PluginData、PluginError 等核心类型

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::ui_types::Surface;

/// 插件数据 - 传给 render 的 JSON 对象
///
/// 空记录即空 Map，render 永远不会收到缺失值
pub type PluginData = serde_json::Map<String, serde_json::Value>;

/// 回调错误的装箱形式
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 数据派生函数（transformData）
pub type TransformFn = Arc<dyn Fn() -> anyhow::Result<PluginData> + Send + Sync>;

/// 渲染函数
pub type RenderFn<F> = Arc<dyn Fn(&PluginData) -> anyhow::Result<F> + Send + Sync>;

/// 插件渲染错误类型
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("插件数据派生失败: {plugin_name} - {source}")]
    TransformFailed {
        plugin_name: String,
        #[source]
        source: BoxError,
    },

    #[error("插件渲染失败: {plugin_name} - {source}")]
    RenderFailed {
        plugin_name: String,
        #[source]
        source: BoxError,
    },

    #[error("插件缺少 render 函数: {0}")]
    MissingRender(String),

    #[error("渲染器配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML 解析错误: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl PluginError {
    /// 出错插件的标识（如果错误与某个插件相关）
    pub fn plugin_name(&self) -> Option<&str> {
        match self {
            PluginError::TransformFailed { plugin_name, .. }
            | PluginError::RenderFailed { plugin_name, .. } => Some(plugin_name),
            PluginError::MissingRender(name) => Some(name),
            _ => None,
        }
    }

    /// 获取错误类型字符串
    pub fn error_type(&self) -> &'static str {
        match self {
            PluginError::TransformFailed { .. } => "transform_failed",
            PluginError::RenderFailed { .. } => "render_failed",
            PluginError::MissingRender(_) => "missing_render",
            PluginError::ConfigError(_) => "config_error",
            PluginError::IoError(_) => "io_error",
            PluginError::JsonError(_) => "json_error",
            PluginError::YamlError(_) => "yaml_error",
        }
    }
}

/// 插件描述符
///
/// `name` 可选，`transform_data` 可选；通过 [`UiPlugin::new`] 构建的描述符一定带有 render。
/// 回调都放在 `Arc` 中，克隆描述符不会复制闭包。
pub struct UiPlugin<F = Surface> {
    /// 插件名称
    pub name: Option<String>,
    /// 数据派生函数
    pub transform_data: Option<TransformFn>,
    /// 渲染函数
    pub render: Option<RenderFn<F>>,
}

impl<F> UiPlugin<F> {
    /// 创建带渲染函数的插件
    pub fn new<R>(render: R) -> Self
    where
        R: Fn(&PluginData) -> anyhow::Result<F> + Send + Sync + 'static,
    {
        Self {
            name: None,
            transform_data: None,
            render: Some(Arc::new(render)),
        }
    }

    /// 创建没有 render 的描述符
    ///
    /// 只用于表示调用方违反约定的情况，渲染时的处理取决于 `MissingRenderPolicy`
    pub fn headless() -> Self {
        Self {
            name: None,
            transform_data: None,
            render: None,
        }
    }

    /// 设置名称
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 设置数据派生函数
    pub fn with_transform_data<T>(mut self, transform: T) -> Self
    where
        T: Fn() -> anyhow::Result<PluginData> + Send + Sync + 'static,
    {
        self.transform_data = Some(Arc::new(transform));
        self
    }

    /// 是否提供了数据派生函数
    pub fn has_transform_data(&self) -> bool {
        self.transform_data.is_some()
    }

    /// 是否提供了渲染函数
    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }
}

impl<F> Clone for UiPlugin<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transform_data: self.transform_data.clone(),
            render: self.render.clone(),
        }
    }
}

impl<F> fmt::Debug for UiPlugin<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiPlugin")
            .field("name", &self.name)
            .field("transform_data", &self.has_transform_data())
            .field("render", &self.has_render())
            .finish()
    }
}

/// 插件工厂
///
/// 原样返回描述符，作为对外稳定的构造入口
pub fn create_plugin<F>(descriptor: UiPlugin<F>) -> UiPlugin<F> {
    descriptor
}
