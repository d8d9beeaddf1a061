use std::sync::Arc;

/// UI 中的一个分区（Me、Groups 等），分区内所有 snippet 共享同一个服务句柄。
#[derive(Debug)]
pub struct SnippetCategory<S> {
    pub service: Arc<S>,
    pub section: String,
}

impl<S> SnippetCategory<S> {
    pub fn new(section: impl Into<String>, service: Arc<S>) -> Self {
        SnippetCategory {
            service,
            section: section.into(),
        }
    }
}
