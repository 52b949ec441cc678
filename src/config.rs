//! 渲染器配置
//!
//! 把历史上几种行为差异收敛为可配置的开关，支持从 YAML / JSON 加载

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::plugin::PluginError;

/// 派生数据缓存策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CacheStrategy {
    /// 刷新时立即调用 transform_data 并缓存结果
    #[default]
    EagerData,
    /// 刷新时只记录数据来源，渲染时再调用
    LazyDescriptor,
}

/// 缺少 render 的描述符的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissingRenderPolicy {
    /// 返回 MissingRender 错误
    #[default]
    Fail,
    /// 静默跳过，不产生片段
    Skip,
}

/// 渲染片段 key 的生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentKey {
    /// 使用解析后的插件标识
    #[default]
    Identity,
    /// 始终使用位置合成标识
    Positional,
}

/// 渲染器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererOptions {
    pub cache_strategy: CacheStrategy,
    pub missing_render: MissingRenderPolicy,
    pub fragment_key: FragmentKey,
}

impl RendererOptions {
    pub fn with_cache_strategy(mut self, strategy: CacheStrategy) -> Self {
        self.cache_strategy = strategy;
        self
    }

    pub fn with_missing_render(mut self, policy: MissingRenderPolicy) -> Self {
        self.missing_render = policy;
        self
    }

    pub fn with_fragment_key(mut self, key: FragmentKey) -> Self {
        self.fragment_key = key;
        self
    }

    /// 从 YAML 字符串解析
    pub fn from_yaml_str(content: &str) -> Result<Self, PluginError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(content: &str) -> Result<Self, PluginError> {
        Ok(serde_json::from_str(content)?)
    }

    /// 从文件加载，按扩展名选择格式
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let options = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(PluginError::ConfigError(format!(
                    "不支持的配置文件格式: {}",
                    path.display()
                )))
            }
        };

        tracing::debug!(path = %path.display(), ?options, "已加载渲染器配置");
        Ok(options)
    }
}
