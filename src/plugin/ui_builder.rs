//! 插件 UI 构建器
//!
//! 提供便捷的 API 来构建 Surface 片段

use super::types::PluginData;
use super::ui_types::*;

/// Surface 构建器
pub struct SurfaceBuilder {
    root_id: ComponentId,
    components: Vec<ComponentDef>,
}

impl SurfaceBuilder {
    /// 创建新的 Surface 构建器
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
            components: Vec::new(),
        }
    }

    /// 添加组件
    pub fn component(mut self, def: ComponentDef) -> Self {
        self.components.push(def);
        self
    }

    /// 添加多个组件
    pub fn components(mut self, defs: impl IntoIterator<Item = ComponentDef>) -> Self {
        self.components.extend(defs);
        self
    }

    /// 绑定数据并构建 Surface
    pub fn build(self, data: &PluginData) -> Surface {
        Surface {
            root_id: self.root_id,
            components: self.components,
            data: data.clone(),
        }
    }
}

fn ids(children: Vec<impl Into<String>>) -> Vec<ComponentId> {
    children.into_iter().map(Into::into).collect()
}

/// 组件构建辅助
impl ComponentDef {
    pub fn column(id: impl Into<String>, children: Vec<impl Into<String>>) -> Self {
        Self::new(
            id,
            ComponentType::Column {
                children: ids(children),
                gap: None,
            },
        )
    }

    pub fn row(id: impl Into<String>, children: Vec<impl Into<String>>) -> Self {
        Self::new(
            id,
            ComponentType::Row {
                children: ids(children),
                gap: None,
            },
        )
    }

    pub fn card(
        id: impl Into<String>,
        child: impl Into<String>,
        title: Option<BoundValue>,
    ) -> Self {
        Self::new(
            id,
            ComponentType::Card {
                child: child.into(),
                title,
            },
        )
    }

    /// 创建 Text 组件（字面值）
    pub fn text_literal(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            id,
            ComponentType::Text {
                text: BoundValue::string(text),
                variant: None,
            },
        )
    }

    /// 创建 Text 组件（路径绑定）
    pub fn text_bound(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(
            id,
            ComponentType::Text {
                text: BoundValue::path(path),
                variant: None,
            },
        )
    }

    pub fn badge(id: impl Into<String>, text: BoundValue, variant: BadgeVariant) -> Self {
        Self::new(
            id,
            ComponentType::Badge {
                text,
                variant: Some(variant),
            },
        )
    }

    /// 创建 KeyValue 组件，键为字面值，值为路径绑定
    pub fn key_values(id: impl Into<String>, pairs: &[(&str, &str)]) -> Self {
        Self::new(
            id,
            ComponentType::KeyValue {
                items: pairs
                    .iter()
                    .map(|(key, path)| KeyValueItem {
                        key: BoundValue::string(*key),
                        value: BoundValue::path_or(*path, "-"),
                    })
                    .collect(),
            },
        )
    }

    pub fn divider(id: impl Into<String>) -> Self {
        Self::new(id, ComponentType::Divider)
    }

    pub fn empty(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(
            id,
            ComponentType::Empty {
                title: Some(BoundValue::string(title)),
            },
        )
    }

    /// 设置 Text 组件的变体，其他组件原样返回
    pub fn with_variant(mut self, variant: TextVariant) -> Self {
        if let ComponentType::Text { variant: v, .. } = &mut self.component {
            *v = Some(variant);
        }
        self
    }

    /// 设置 Row / Column 的间距，其他组件原样返回
    pub fn with_gap(mut self, gap: u32) -> Self {
        match &mut self.component {
            ComponentType::Column { gap: g, .. } | ComponentType::Row { gap: g, .. } => {
                *g = Some(gap)
            }
            _ => {}
        }
        self
    }
}
