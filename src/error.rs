/// snippet 目录构建期错误：资源配置问题属于构建期缺陷，必须直接上抛。
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    #[error("invalid metadata array in {section} snippet resources (expected {expected} entries, found {found})")]
    Configuration {
        section: String,
        expected: usize,
        found: usize,
    },

    #[error("no metadata array for snippet `{key}` in {section} snippet resources")]
    MissingMetadata { section: String, key: String },

    #[error("unknown snippet `{0}`")]
    UnknownSnippet(String),

    #[error("failed to load snippet resources: {0}")]
    Resource(String),
}

/// Graph 调用失败的分类，直接通过 snippet 回调的失败通道交给调用方。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("no access token available; please sign in")]
    NotSignedIn,

    #[error("access token rejected by Graph API; please sign in again")]
    Unauthorized,

    #[error("request forbidden by Graph API (admin consent may be required): {0}")]
    Forbidden(String),

    #[error("graph resource not found: {0}")]
    NotFound(String),

    #[error("graph api returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("graph request failed: {0}")]
    Transport(String),

    #[error("failed to parse graph response: {0}")]
    Decode(String),

    #[error("graph response is missing {0}")]
    MissingData(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Snippet(#[from] SnippetErrorMessage),
}

/// `SnippetError` 不满足 `Clone`，回调中只保留其文本。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SnippetErrorMessage(pub String);

impl From<SnippetError> for GraphError {
    fn from(value: SnippetError) -> Self {
        GraphError::Snippet(SnippetErrorMessage(value.to_string()))
    }
}
