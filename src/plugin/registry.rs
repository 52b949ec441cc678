//! 插件派生数据注册表
//!
//! 将插件列表规范化为 标识 -> 数据 的映射。映射在局部构建，整轮成功后才返回，
//! 任何一个插件派生失败都不会产生部分结果。

use indexmap::IndexMap;
use std::fmt;

use super::identity::get_plugin_name;
use super::types::{PluginData, PluginError, TransformFn, UiPlugin};
use crate::config::CacheStrategy;

/// 派生数据条目
#[derive(Clone)]
pub enum DerivedEntry {
    /// 已计算的数据
    Data(PluginData),
    /// 数据来源，渲染时调用
    Descriptor(TransformFn),
}

impl fmt::Debug for DerivedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivedEntry::Data(data) => f.debug_tuple("Data").field(data).finish(),
            DerivedEntry::Descriptor(_) => f.write_str("Descriptor(..)"),
        }
    }
}

/// 派生数据映射
#[derive(Debug, Clone, Default)]
pub struct DerivedData {
    entries: IndexMap<String, DerivedEntry>,
    strategy: CacheStrategy,
}

impl DerivedData {
    /// 创建空映射
    pub fn empty(strategy: CacheStrategy) -> Self {
        Self {
            entries: IndexMap::new(),
            strategy,
        }
    }

    /// 按插件顺序重新派生全部数据
    pub fn refresh<F>(
        plugins: &[UiPlugin<F>],
        strategy: CacheStrategy,
    ) -> Result<Self, PluginError> {
        let mut entries = IndexMap::new();

        for (index, plugin) in plugins.iter().enumerate() {
            let Some(transform) = plugin.transform_data.as_ref() else {
                continue;
            };
            let identity = get_plugin_name(plugin, index);

            let entry = match strategy {
                CacheStrategy::EagerData => {
                    let data = transform().map_err(|e| {
                        tracing::warn!(plugin = %identity, error = %e, "插件数据派生失败");
                        PluginError::TransformFailed {
                            plugin_name: identity.clone(),
                            source: e.into(),
                        }
                    })?;
                    DerivedEntry::Data(data)
                }
                CacheStrategy::LazyDescriptor => DerivedEntry::Descriptor(transform.clone()),
            };

            if entries.insert(identity.clone(), entry).is_some() {
                tracing::warn!(plugin = %identity, index, "插件标识重复，后者覆盖前者");
            }
        }

        tracing::debug!(
            plugins = plugins.len(),
            entries = entries.len(),
            ?strategy,
            "插件派生数据已刷新"
        );

        Ok(Self { entries, strategy })
    }

    /// 读取某个标识的数据，没有条目时返回空记录
    pub fn resolve(&self, identity: &str) -> Result<PluginData, PluginError> {
        match self.entries.get(identity) {
            Some(DerivedEntry::Data(data)) => Ok(data.clone()),
            Some(DerivedEntry::Descriptor(transform)) => {
                transform().map_err(|e| PluginError::TransformFailed {
                    plugin_name: identity.to_string(),
                    source: e.into(),
                })
            }
            None => Ok(PluginData::new()),
        }
    }

    pub fn get(&self, identity: &str) -> Option<&DerivedEntry> {
        self.entries.get(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains_key(identity)
    }

    /// 按插件顺序列出已有条目的标识
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn strategy(&self) -> CacheStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
