use super::models::{GraphErrorEnvelope, GraphResponse};
use crate::{db, error::GraphError};
use reqwest::{
    blocking::{Client, RequestBuilder},
    redirect::Policy,
    Method,
};
use serde_json::Value;
use std::{fmt, time::Duration};

/// 全球版 Graph 主机；国家云或测试环境通过 `with_base_url` 替换。
pub const GRAPH_HOST: &str = "https://graph.microsoft.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 从本地存储读取外部登录流程写入的 access token。
pub(crate) fn current_access_token() -> Result<String, GraphError> {
    let record = db::load_auth_record()
        .map_err(GraphError::Storage)?
        .ok_or(GraphError::NotSignedIn)?;
    Ok(record.access_token)
}

/// 统一超时与重定向策略的阻塞式 HTTP 客户端。
pub(crate) fn build_blocking_client(timeout: Duration) -> Result<Client, GraphError> {
    Client::builder()
        .timeout(timeout)
        .redirect(Policy::limited(10))
        .build()
        .map_err(|e| GraphError::Transport(format!("failed to build HTTP client: {e}")))
}

/// 各分区共享的 Graph 服务句柄。克隆成本很低，可以移动到工作线程中使用。
#[derive(Clone)]
pub struct GraphService {
    client: Client,
    access_token: String,
    base_url: String,
}

impl GraphService {
    pub fn new(access_token: impl Into<String>) -> Result<Self, GraphError> {
        Self::with_base_url(access_token, GRAPH_HOST)
    }

    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GraphError> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(GraphError::NotSignedIn);
        }
        Ok(GraphService {
            client: build_blocking_client(REQUEST_TIMEOUT)?,
            access_token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 使用已持久化的 token 与配置的主机地址构建服务。
    pub fn from_stored_token() -> Result<Self, GraphError> {
        let access_token = current_access_token()?;
        let base_url =
            crate::settings::get_graph_base_url().map_err(GraphError::Storage)?;
        Self::with_base_url(access_token, base_url)
    }

    /// `{base}/{version}/{path}`，自动去掉多余的 `/`。
    pub fn endpoint(&self, version: &str, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            version.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn get(&self, version: &str, path: &str) -> Result<GraphResponse, GraphError> {
        self.send(Method::GET, version, path, |request| request)
    }

    pub fn get_with_query(
        &self,
        version: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<GraphResponse, GraphError> {
        self.send(Method::GET, version, path, |request| request.query(query))
    }

    pub fn post(&self, version: &str, path: &str, body: &Value) -> Result<GraphResponse, GraphError> {
        self.send(Method::POST, version, path, |request| request.json(body))
    }

    pub fn patch(&self, version: &str, path: &str, body: &Value) -> Result<GraphResponse, GraphError> {
        self.send(Method::PATCH, version, path, |request| request.json(body))
    }

    pub fn put_bytes(
        &self,
        version: &str,
        path: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<GraphResponse, GraphError> {
        self.send(Method::PUT, version, path, |request| {
            request.header("Content-Type", content_type).body(content)
        })
    }

    pub fn delete(&self, version: &str, path: &str) -> Result<GraphResponse, GraphError> {
        self.send(Method::DELETE, version, path, |request| request)
    }

    fn send<F>(
        &self,
        method: Method,
        version: &str,
        path: &str,
        configure: F,
    ) -> Result<GraphResponse, GraphError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint(version, path);
        tracing::debug!(%method, %url, "sending graph request");

        let request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json");
        let response = configure(request)
            .send()
            .map_err(|e| GraphError::Transport(format!("{method} {url}: {e}")))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| GraphError::Transport(format!("failed to read response body: {e}")))?;
        tracing::debug!(%method, %url, status, "graph request finished");

        map_response(status, &text, path)
    }
}

impl fmt::Debug for GraphService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphService")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// 将状态码与正文映射为结果；错误时优先使用 Graph 返回的 `error.message`。
pub(crate) fn map_response(status: u16, text: &str, context: &str) -> Result<GraphResponse, GraphError> {
    if (200..300).contains(&status) {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).map_err(|e| GraphError::Decode(e.to_string()))?
        };
        return Ok(GraphResponse { status, body });
    }

    let message = graph_error_message(text).unwrap_or_else(|| context.to_string());
    match status {
        401 => Err(GraphError::Unauthorized),
        403 => Err(GraphError::Forbidden(message)),
        404 => Err(GraphError::NotFound(message)),
        _ => Err(GraphError::Http { status, message }),
    }
}

fn graph_error_message(text: &str) -> Option<String> {
    let envelope: GraphErrorEnvelope = serde_json::from_str(text).ok()?;
    match (envelope.error.code, envelope.error.message) {
        (Some(code), Some(message)) => Some(format!("{code}: {message}")),
        (None, Some(message)) => Some(message),
        (Some(code), None) => Some(code),
        (None, None) => None,
    }
}
