//! 插件渲染编排
//!
//! 对每个插件：解析标识 -> 读取派生数据 -> 合并覆盖属性 -> 调用 render -> 附加 key。
//! 一次渲染只读取同一个派生数据快照。

use std::fmt;
use std::sync::Arc;

use super::identity::{get_plugin_name, get_plugin_prefix};
use super::registry::DerivedData;
use super::types::{PluginData, PluginError, UiPlugin};
use crate::config::{FragmentKey, MissingRenderPolicy, RendererOptions};

/// 带协调 key 的渲染片段
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFragment<F> {
    /// 协调 key，跨渲染保持稳定
    pub key: String,
    /// 片段内容
    pub fragment: F,
}

/// 浅合并：覆盖属性的同名键优先
pub fn merge_props(mut base: PluginData, overrides: Option<&PluginData>) -> PluginData {
    if let Some(overrides) = overrides {
        base.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    base
}

/// 按插件顺序渲染全部片段
///
/// 任何一个插件渲染失败都会中止整轮渲染
pub fn render_all<F>(
    plugins: &[UiPlugin<F>],
    data: &DerivedData,
    overrides: Option<&PluginData>,
    options: &RendererOptions,
) -> Result<Vec<RenderedFragment<F>>, PluginError> {
    let mut fragments = Vec::with_capacity(plugins.len());

    for (index, plugin) in plugins.iter().enumerate() {
        let identity = get_plugin_name(plugin, index);

        let Some(render) = plugin.render.as_ref() else {
            match options.missing_render {
                MissingRenderPolicy::Skip => {
                    tracing::debug!(plugin = %identity, "插件没有 render，跳过");
                    continue;
                }
                MissingRenderPolicy::Fail => return Err(PluginError::MissingRender(identity)),
            }
        };

        let props = merge_props(data.resolve(&identity)?, overrides);
        let fragment = render(&props).map_err(|e| PluginError::RenderFailed {
            plugin_name: identity.clone(),
            source: e.into(),
        })?;

        let key = match options.fragment_key {
            FragmentKey::Identity => identity,
            FragmentKey::Positional => get_plugin_prefix(index),
        };
        fragments.push(RenderedFragment { key, fragment });
    }

    tracing::trace!(fragments = fragments.len(), "插件片段渲染完成");
    Ok(fragments)
}

/// 可复用的渲染函数
///
/// 绑定一份插件列表和一份派生数据快照，多次调用结果与一次性 [`render_all`] 相同
pub struct PluginRenderer<F> {
    plugins: Arc<[UiPlugin<F>]>,
    data: Arc<DerivedData>,
    options: RendererOptions,
}

impl<F> Clone for PluginRenderer<F> {
    fn clone(&self) -> Self {
        Self {
            plugins: self.plugins.clone(),
            data: self.data.clone(),
            options: self.options,
        }
    }
}

impl<F> fmt::Debug for PluginRenderer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRenderer")
            .field("plugins", &self.plugins.len())
            .field("data", &self.data)
            .field("options", &self.options)
            .finish()
    }
}

impl<F> PluginRenderer<F> {
    pub fn new(
        plugins: Arc<[UiPlugin<F>]>,
        data: Arc<DerivedData>,
        options: RendererOptions,
    ) -> Self {
        Self {
            plugins,
            data,
            options,
        }
    }

    /// 渲染全部插件，`overrides` 浅合并在派生数据之上
    pub fn render_plugins(
        &self,
        overrides: Option<&PluginData>,
    ) -> Result<Vec<RenderedFragment<F>>, PluginError> {
        render_all(&self.plugins, &self.data, overrides, &self.options)
    }

    /// 组件形式的入口：props 即覆盖属性
    pub fn render_plugins_as_component(
        &self,
        props: &PluginData,
    ) -> Result<Vec<RenderedFragment<F>>, PluginError> {
        self.render_plugins(Some(props))
    }

    /// 转换为闭包
    pub fn into_render_fn(
        self,
    ) -> impl Fn(Option<&PluginData>) -> Result<Vec<RenderedFragment<F>>, PluginError> {
        move |overrides| self.render_plugins(overrides)
    }

    pub fn plugins(&self) -> &[UiPlugin<F>] {
        &self.plugins
    }

    pub fn derived_data(&self) -> &DerivedData {
        &self.data
    }
}
