//! 状态卡片示例插件
//!
//! 演示如何用 UiPlugin + SurfaceBuilder 声明一个带数据绑定的片段

use serde_json::json;

use crate::plugin::ui_builder::SurfaceBuilder;
use crate::plugin::ui_types::*;
use crate::plugin::{PluginData, UiPlugin};

/// 服务状态
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub name: String,
    pub healthy: usize,
    pub total: usize,
}

impl ServiceStatus {
    fn to_data(&self) -> PluginData {
        let level = if self.healthy == self.total { "ok" } else { "degraded" };

        let mut data = PluginData::new();
        data.insert("title".into(), json!(self.name));
        data.insert(
            "stats".into(),
            json!({ "healthy": self.healthy, "total": self.total }),
        );
        data.insert("level".into(), json!(level));
        data
    }
}

/// 构建状态卡片插件
///
/// `status` 在刷新时由 transform_data 读取；渲染时 `title` 等字段可被覆盖属性替换
pub fn status_card_plugin(name: impl Into<String>, status: ServiceStatus) -> UiPlugin<Surface> {
    UiPlugin::new(render_status_card)
        .named(name)
        .with_transform_data(move || Ok(status.to_data()))
}

fn render_status_card(data: &PluginData) -> anyhow::Result<Surface> {
    let level = match data.get("level").and_then(|v| v.as_str()) {
        Some("ok") => BadgeVariant::Success,
        Some(_) => BadgeVariant::Warning,
        None => BadgeVariant::Default,
    };

    // 没有统计数据时显示占位
    let stats = if data.contains_key("stats") {
        ComponentDef::key_values("stats", &[("健康", "/stats/healthy"), ("总数", "/stats/total")])
    } else {
        ComponentDef::empty("stats", "暂无数据")
    };

    let title = BoundValue::path_or("title", "未命名");
    Ok(SurfaceBuilder::new("card")
        .component(ComponentDef::card("card", "body", Some(title)))
        .component(ComponentDef::column("body", vec!["header", "divider", "stats"]).with_gap(8))
        .component(ComponentDef::row("header", vec!["caption", "level"]).with_gap(4))
        .component(
            ComponentDef::text_literal("caption", "服务状态").with_variant(TextVariant::Caption),
        )
        .component(ComponentDef::badge(
            "level",
            BoundValue::path_or("level", "unknown"),
            level,
        ))
        .component(ComponentDef::divider("divider"))
        .component(stats)
        .build(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RendererOptions;
    use crate::plugin::{use_plugin_renderer, RenderSession};

    fn status(healthy: usize) -> ServiceStatus {
        ServiceStatus {
            name: "Kiro".into(),
            healthy,
            total: 3,
        }
    }

    #[test]
    fn test_status_card_renders_bound_surface() {
        let plugins = vec![status_card_plugin("kiro", status(2))];
        let mut session: RenderSession<u32> = RenderSession::new(RendererOptions::default());

        let fragments = use_plugin_renderer(&mut session, &plugins, &[])
            .unwrap()
            .render_plugins(None)
            .unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].key, "kiro");
        let surface = &fragments[0].fragment;
        assert!(surface.is_consistent());
        assert_eq!(
            surface.resolve_component("card"),
            Some(vec![Some("Kiro".to_string())])
        );
        assert_eq!(
            surface.resolve_component("stats"),
            Some(vec![
                Some("健康".to_string()),
                Some("2".to_string()),
                Some("总数".to_string()),
                Some("3".to_string()),
            ])
        );
        assert_eq!(
            surface.component("level").unwrap().component,
            ComponentType::Badge {
                text: BoundValue::path_or("level", "unknown"),
                variant: Some(BadgeVariant::Warning),
            }
        );
    }

    #[test]
    fn test_status_card_without_data_shows_placeholder() {
        let surface = render_status_card(&PluginData::new()).unwrap();

        assert!(surface.is_consistent());
        assert_eq!(
            surface.resolve_component("card"),
            Some(vec![Some("未命名".to_string())])
        );
        assert_eq!(
            surface.resolve_component("stats"),
            Some(vec![Some("暂无数据".to_string())])
        );
        assert_eq!(
            surface.resolve_component("caption"),
            Some(vec![Some("服务状态".to_string())])
        );
        assert_eq!(
            surface.component("header").unwrap().component,
            ComponentType::Row {
                children: vec!["caption".into(), "level".into()],
                gap: Some(4),
            }
        );
    }

    #[test]
    fn test_status_card_title_override() {
        let plugins = vec![status_card_plugin("kiro", status(3))];
        let mut session: RenderSession<u32> = RenderSession::default();
        let renderer = use_plugin_renderer(&mut session, &plugins, &[]).unwrap();

        let mut props = PluginData::new();
        props.insert("title".into(), json!("主账号"));
        let fragments = renderer.render_plugins_as_component(&props).unwrap();

        assert_eq!(
            fragments[0].fragment.resolve_component("card"),
            Some(vec![Some("主账号".to_string())])
        );
    }
}
