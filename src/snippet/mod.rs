mod category;
mod descriptor;
mod metadata;

pub use category::SnippetCategory;
pub use descriptor::{SnippetDescriptor, DEFAULT_API_VERSION};
pub use metadata::{SnippetMetadata, METADATA_FIELD_COUNT};

use crate::error::GraphError;

/// 结果回调：成功值或失败只会被投递一次，线程由具体服务决定。
pub type SnippetCallback<R> = Box<dyn FnOnce(Result<R, GraphError>) + Send + 'static>;

/// 每个演示 snippet 的统一约定：携带元数据，并对服务发起一次调用。
pub trait Snippet<S, R>: Send + Sync {
    fn descriptor(&self) -> &SnippetDescriptor<S>;

    /// 使用 `service` 发起调用，结果通过 `callback` 返回；不做重试与超时控制。
    fn execute(&self, service: &S, callback: SnippetCallback<R>);
}
