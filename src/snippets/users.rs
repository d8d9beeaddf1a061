use crate::error::GraphError;
use crate::graph::{GraphResponse, GraphService};
use rand::{distributions::Alphanumeric, Rng};
use serde_json::{json, Value};

const COUNTRY_FILTER: &str = "country eq 'United States'";

/// Users 分区：需要管理员同意的目录操作。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsersSnippet {
    GetUsers,
    GetFilteredUsers,
    InsertUser,
}

impl UsersSnippet {
    pub const ALL: [UsersSnippet; 3] = [
        UsersSnippet::GetUsers,
        UsersSnippet::GetFilteredUsers,
        UsersSnippet::InsertUser,
    ];

    pub fn key(self) -> &'static str {
        match self {
            UsersSnippet::GetUsers => "get_users",
            UsersSnippet::GetFilteredUsers => "get_filtered_users",
            UsersSnippet::InsertUser => "insert_user",
        }
    }

    pub fn run(self, service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
        match self {
            UsersSnippet::GetUsers => service.get(version, "users"),
            UsersSnippet::GetFilteredUsers => {
                service.get_with_query(version, "users", &[("$filter", COUNTRY_FILTER)])
            }
            UsersSnippet::InsertUser => insert_user(service, version),
        }
    }
}

/// 用户主体名需要租户域名，这里从当前用户的 UPN 中截取。
fn insert_user(service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
    let me = service.get(version, "me")?;
    let upn = me
        .string_field("userPrincipalName")
        .ok_or_else(|| GraphError::MissingData("userPrincipalName of the signed-in user".to_string()))?;
    let domain = tenant_domain(&upn)
        .ok_or_else(|| GraphError::MissingData(format!("tenant domain in {upn}")))?;

    let nickname = format!("snippet{}", uuid::Uuid::new_v4().simple());
    service.post(version, "users", &new_user_body(&nickname, domain, &random_password()))
}

pub(super) fn tenant_domain(upn: &str) -> Option<&str> {
    upn.split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}

pub(super) fn new_user_body(nickname: &str, domain: &str, password: &str) -> Value {
    json!({
        "accountEnabled": true,
        "displayName": format!("Snippet user {nickname}"),
        "mailNickname": nickname,
        "userPrincipalName": format!("{nickname}@{domain}"),
        "passwordProfile": {
            "forceChangePasswordNextSignIn": true,
            "password": password,
        },
    })
}

/// 满足 Azure AD 复杂度要求：大小写字母、数字与符号。
fn random_password() -> String {
    let body: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("{body}aA1!")
}
