use crate::error::GraphError;
use crate::graph::{GraphResponse, GraphService};
use serde_json::{json, Value};

/// Groups 分区：按租户中第一个组演示读取，另有创建与删除。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupsSnippet {
    GetGroups,
    GetGroup,
    GetMembers,
    GetOwners,
    CreateGroup,
    DeleteGroup,
}

impl GroupsSnippet {
    pub const ALL: [GroupsSnippet; 6] = [
        GroupsSnippet::GetGroups,
        GroupsSnippet::GetGroup,
        GroupsSnippet::GetMembers,
        GroupsSnippet::GetOwners,
        GroupsSnippet::CreateGroup,
        GroupsSnippet::DeleteGroup,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GroupsSnippet::GetGroups => "get_groups",
            GroupsSnippet::GetGroup => "get_group",
            GroupsSnippet::GetMembers => "get_group_members",
            GroupsSnippet::GetOwners => "get_group_owners",
            GroupsSnippet::CreateGroup => "create_group",
            GroupsSnippet::DeleteGroup => "delete_group",
        }
    }

    pub fn run(self, service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
        match self {
            GroupsSnippet::GetGroups => service.get(version, "groups"),
            GroupsSnippet::GetGroup => {
                let id = first_group_id(service, version)?;
                service.get(version, &format!("groups/{id}"))
            }
            GroupsSnippet::GetMembers => {
                let id = first_group_id(service, version)?;
                service.get(version, &format!("groups/{id}/members"))
            }
            GroupsSnippet::GetOwners => {
                let id = first_group_id(service, version)?;
                service.get(version, &format!("groups/{id}/owners"))
            }
            GroupsSnippet::CreateGroup => service.post(version, "groups", &new_group_body(&nickname())),
            GroupsSnippet::DeleteGroup => {
                let created = service.post(version, "groups", &new_group_body(&nickname()))?;
                let id = created.id()?;
                tracing::debug!(group_id = %id, "deleting freshly created group");
                service.delete(version, &format!("groups/{id}"))
            }
        }
    }
}

fn first_group_id(service: &GraphService, version: &str) -> Result<String, GraphError> {
    service
        .get_with_query(version, "groups", &[("$top", "1"), ("$select", "id")])?
        .first_id()
}

fn nickname() -> String {
    format!("snippetgroup{}", uuid::Uuid::new_v4().simple())
}

pub(super) fn new_group_body(nickname: &str) -> Value {
    json!({
        "description": "Group created by the Graph snippets app",
        "displayName": format!("Snippet group {nickname}"),
        "groupTypes": [],
        "mailEnabled": false,
        "mailNickname": nickname,
        "securityEnabled": true,
    })
}
