//! 插件 UI 片段类型定义
//!
//! 默认的声明式片段类型。插件的 render 返回 Surface，宿主负责把它画出来；
//! 绑定值在渲染时针对合并后的插件数据求值。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::PluginData;

/// 组件 ID
pub type ComponentId = String;

/// 数据路径：以 `/` 开头按 JSON Pointer 解析，否则视为顶层键
pub type DataPath = String;

// ============================================================================
// 数据绑定
// ============================================================================

/// 绑定值 - 字面值或数据路径
///
/// untagged 反序列化按声明顺序尝试，字段最多的变体放在最前
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundValue {
    /// 路径绑定，取不到时使用字面值
    PathWithDefault { path: DataPath, literal: Value },
    /// 路径绑定
    Path { path: DataPath },
    /// 字面值
    Literal { literal: Value },
}

impl BoundValue {
    pub fn string(s: impl Into<String>) -> Self {
        BoundValue::Literal {
            literal: Value::String(s.into()),
        }
    }

    pub fn number(n: f64) -> Self {
        BoundValue::Literal {
            literal: serde_json::json!(n),
        }
    }

    pub fn path(p: impl Into<String>) -> Self {
        BoundValue::Path { path: p.into() }
    }

    pub fn path_or(p: impl Into<String>, fallback: impl Into<Value>) -> Self {
        BoundValue::PathWithDefault {
            path: p.into(),
            literal: fallback.into(),
        }
    }

    /// 针对插件数据求值
    pub fn resolve(&self, data: &PluginData) -> Option<Value> {
        match self {
            BoundValue::Literal { literal } => Some(literal.clone()),
            BoundValue::Path { path } => lookup(data, path).cloned(),
            BoundValue::PathWithDefault { path, literal } => {
                Some(lookup(data, path).cloned().unwrap_or_else(|| literal.clone()))
            }
        }
    }

    /// 求值并转换为显示文本，字符串不带引号
    pub fn resolve_text(&self, data: &PluginData) -> Option<String> {
        self.resolve(data).map(|value| match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

fn lookup<'a>(data: &'a PluginData, path: &str) -> Option<&'a Value> {
    if let Some(pointer) = path.strip_prefix('/') {
        let (head, rest) = match pointer.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (pointer, None),
        };
        let head = head.replace("~1", "/").replace("~0", "~");
        let root = data.get(head.as_str())?;
        match rest {
            Some(rest) => root.pointer(&format!("/{rest}")),
            None => Some(root),
        }
    } else {
        data.get(path)
    }
}

// ============================================================================
// 组件
// ============================================================================

/// 文本变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextVariant {
    H3,
    #[default]
    Body,
    Caption,
}

/// Badge 变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Success,
    Warning,
    Error,
}

/// KeyValue 项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueItem {
    pub key: BoundValue,
    pub value: BoundValue,
}

/// 组件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ComponentType {
    Column {
        children: Vec<ComponentId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gap: Option<u32>,
    },
    Row {
        children: Vec<ComponentId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gap: Option<u32>,
    },
    Card {
        child: ComponentId,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<BoundValue>,
    },
    Text {
        text: BoundValue,
        #[serde(skip_serializing_if = "Option::is_none")]
        variant: Option<TextVariant>,
    },
    Badge {
        text: BoundValue,
        #[serde(skip_serializing_if = "Option::is_none")]
        variant: Option<BadgeVariant>,
    },
    KeyValue {
        items: Vec<KeyValueItem>,
    },
    Divider,
    Empty {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<BoundValue>,
    },
}

/// 组件定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub id: ComponentId,
    pub component: ComponentType,
}

impl ComponentDef {
    pub fn new(id: impl Into<String>, component: ComponentType) -> Self {
        Self {
            id: id.into(),
            component,
        }
    }

    /// 组件上直接显示的绑定值
    pub fn bound_values(&self) -> Vec<&BoundValue> {
        match &self.component {
            ComponentType::Card { title, .. } | ComponentType::Empty { title } => {
                title.iter().collect()
            }
            ComponentType::Text { text, .. } | ComponentType::Badge { text, .. } => vec![text],
            ComponentType::KeyValue { items } => items
                .iter()
                .flat_map(|item| [&item.key, &item.value])
                .collect(),
            ComponentType::Column { .. } | ComponentType::Row { .. } | ComponentType::Divider => {
                Vec::new()
            }
        }
    }
}

// ============================================================================
// Surface
// ============================================================================

/// Surface - 一个插件一次渲染得到的片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    /// 根组件 ID
    pub root_id: ComponentId,
    /// 组件列表
    pub components: Vec<ComponentDef>,
    /// 渲染时使用的数据（派生数据与覆盖属性合并后的结果）
    pub data: PluginData,
}

impl Surface {
    pub fn component(&self, id: &str) -> Option<&ComponentDef> {
        self.components.iter().find(|c| c.id == id)
    }

    /// 对某个组件的所有绑定值求值
    pub fn resolve_component(&self, id: &str) -> Option<Vec<Option<String>>> {
        self.component(id).map(|c| {
            c.bound_values()
                .into_iter()
                .map(|v| v.resolve_text(&self.data))
                .collect()
        })
    }

    /// 组件 ID 是否都能在 Surface 内找到
    pub fn is_consistent(&self) -> bool {
        let known = |id: &ComponentId| self.components.iter().any(|c| &c.id == id);
        known(&self.root_id)
            && self.components.iter().all(|c| match &c.component {
                ComponentType::Column { children, .. } | ComponentType::Row { children, .. } => {
                    children.iter().all(known)
                }
                ComponentType::Card { child, .. } => known(child),
                _ => true,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> PluginData {
        json!({"title": "Y", "stats": {"healthy": 3}})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_bound_value_resolution() {
        let data = data();
        assert_eq!(BoundValue::path("title").resolve_text(&data).as_deref(), Some("Y"));
        assert_eq!(
            BoundValue::path("/stats/healthy").resolve(&data),
            Some(json!(3))
        );
        assert_eq!(BoundValue::path("missing").resolve(&data), None);
        assert_eq!(
            BoundValue::path_or("missing", "-").resolve_text(&data).as_deref(),
            Some("-")
        );
        assert_eq!(BoundValue::string("x").resolve_text(&data).as_deref(), Some("x"));
    }

    #[test]
    fn test_pointer_unescapes_first_segment() {
        let data = json!({"a/b": 1, "t~x": {"c/d": 2}})
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(BoundValue::path("/a~1b").resolve(&data), Some(json!(1)));
        assert_eq!(BoundValue::path("/t~0x/c~1d").resolve(&data), Some(json!(2)));
        assert_eq!(BoundValue::path("/a~0b").resolve(&data), None);
        assert_eq!(BoundValue::number(2.5).resolve(&data), Some(json!(2.5)));
    }

    #[test]
    fn test_bound_value_serialization_shape() {
        assert_eq!(
            serde_json::to_value(BoundValue::path("title")).unwrap(),
            json!({"path": "title"})
        );
        let parsed: BoundValue = serde_json::from_value(json!({"literal": 1})).unwrap();
        assert_eq!(parsed, BoundValue::Literal { literal: json!(1) });
    }

    #[test]
    fn test_component_type_tagging() {
        let def = ComponentDef::new(
            "t",
            ComponentType::Text {
                text: BoundValue::string("hi"),
                variant: None,
            },
        );
        assert_eq!(
            serde_json::to_value(&def).unwrap(),
            json!({"id": "t", "component": {"Text": {"text": {"literal": "hi"}}}})
        );
    }

    #[test]
    fn test_surface_consistency() {
        let surface = Surface {
            root_id: "root".into(),
            components: vec![
                ComponentDef::new(
                    "root",
                    ComponentType::Column {
                        children: vec!["title".into()],
                        gap: None,
                    },
                ),
                ComponentDef::new(
                    "title",
                    ComponentType::Text {
                        text: BoundValue::path("title"),
                        variant: None,
                    },
                ),
            ],
            data: data(),
        };

        assert!(surface.is_consistent());
        assert_eq!(
            surface.resolve_component("title"),
            Some(vec![Some("Y".to_string())])
        );

        let mut broken = surface.clone();
        broken.root_id = "nope".into();
        assert!(!broken.is_consistent());
    }
}
