//! 渲染会话
//!
//! 宿主每次渲染调用 [`use_plugin_renderer`]。依赖序列与上次提交的序列逐项比较，
//! 有变化（或首次求值）才刷新派生数据，刷新成功后整体替换旧映射。

use std::sync::Arc;

use super::registry::DerivedData;
use super::renderer::PluginRenderer;
use super::types::{PluginError, UiPlugin};
use crate::config::RendererOptions;

/// 依赖变化检测
#[derive(Debug, Clone)]
pub struct DependencyTracker<D> {
    previous: Option<Vec<D>>,
}

impl<D> Default for DependencyTracker<D> {
    fn default() -> Self {
        Self { previous: None }
    }
}

impl<D: PartialEq + Clone> DependencyTracker<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 首次求值或任一依赖变化时返回 true
    pub fn should_refresh(&self, deps: &[D]) -> bool {
        match &self.previous {
            None => true,
            Some(previous) => previous.as_slice() != deps,
        }
    }

    /// 记录本次依赖
    pub fn commit(&mut self, deps: &[D]) {
        self.previous = Some(deps.to_vec());
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub fn previous(&self) -> Option<&[D]> {
        self.previous.as_deref()
    }
}

/// 会话状态
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// 尚未求值或已销毁
    #[default]
    Uninitialized,
    /// 持有当前派生数据快照
    Populated(Arc<DerivedData>),
}

/// 渲染会话
///
/// 对应宿主中一个存活的消费者，独占派生数据映射
#[derive(Debug)]
pub struct RenderSession<D = serde_json::Value> {
    options: RendererOptions,
    tracker: DependencyTracker<D>,
    state: SessionState,
    generation: u64,
}

impl<D: PartialEq + Clone> Default for RenderSession<D> {
    fn default() -> Self {
        Self::new(RendererOptions::default())
    }
}

impl<D: PartialEq + Clone> RenderSession<D> {
    pub fn new(options: RendererOptions) -> Self {
        Self {
            options,
            tracker: DependencyTracker::new(),
            state: SessionState::Uninitialized,
            generation: 0,
        }
    }

    /// 按依赖决定是否刷新，返回本次是否刷新
    ///
    /// 刷新失败时错误直接返回，旧映射和旧依赖保持不变
    pub fn evaluate<F>(
        &mut self,
        plugins: &[UiPlugin<F>],
        deps: &[D],
    ) -> Result<bool, PluginError> {
        if !self.tracker.should_refresh(deps) {
            return Ok(false);
        }

        let data = DerivedData::refresh(plugins, self.options.cache_strategy)?;
        self.state = SessionState::Populated(Arc::new(data));
        self.tracker.commit(deps);
        self.generation += 1;

        tracing::debug!(generation = self.generation, "渲染会话已刷新派生数据");
        Ok(true)
    }

    /// 当前派生数据快照，未初始化时为空映射
    pub fn snapshot(&self) -> Arc<DerivedData> {
        match &self.state {
            SessionState::Populated(data) => data.clone(),
            SessionState::Uninitialized => {
                Arc::new(DerivedData::empty(self.options.cache_strategy))
            }
        }
    }

    /// 销毁会话，丢弃派生数据
    pub fn teardown(&mut self) {
        if matches!(self.state, SessionState::Populated(_)) {
            tracing::debug!(generation = self.generation, "渲染会话已销毁");
        }
        self.state = SessionState::Uninitialized;
        self.tracker.reset();
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.state, SessionState::Populated(_))
    }

    pub fn derived_data(&self) -> Option<&DerivedData> {
        match &self.state {
            SessionState::Populated(data) => Some(data),
            SessionState::Uninitialized => None,
        }
    }

    /// 成功刷新的次数
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }
}

/// 宿主渲染入口
///
/// 先按依赖刷新派生数据，再返回绑定当前快照的渲染函数
pub fn use_plugin_renderer<F, D>(
    session: &mut RenderSession<D>,
    plugins: &[UiPlugin<F>],
    deps: &[D],
) -> Result<PluginRenderer<F>, PluginError>
where
    D: PartialEq + Clone,
{
    session.evaluate(plugins, deps)?;
    Ok(PluginRenderer::new(
        plugins.to_vec().into(),
        session.snapshot(),
        session.options,
    ))
}
