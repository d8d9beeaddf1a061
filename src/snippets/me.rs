use crate::error::GraphError;
use crate::graph::{GraphResponse, GraphService};

/// Me 分区：读取当前登录用户的资料与关系。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeSnippet {
    GetMe,
    GetManager,
    GetDirectReports,
    GetMemberOf,
    GetPhoto,
}

impl MeSnippet {
    pub const ALL: [MeSnippet; 5] = [
        MeSnippet::GetMe,
        MeSnippet::GetManager,
        MeSnippet::GetDirectReports,
        MeSnippet::GetMemberOf,
        MeSnippet::GetPhoto,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MeSnippet::GetMe => "get_me",
            MeSnippet::GetManager => "get_me_manager",
            MeSnippet::GetDirectReports => "get_me_direct_reports",
            MeSnippet::GetMemberOf => "get_me_member_of",
            MeSnippet::GetPhoto => "get_me_photo",
        }
    }

    fn path(self) -> &'static str {
        match self {
            MeSnippet::GetMe => "me",
            MeSnippet::GetManager => "me/manager",
            MeSnippet::GetDirectReports => "me/directReports",
            MeSnippet::GetMemberOf => "me/memberOf",
            MeSnippet::GetPhoto => "me/photo",
        }
    }

    pub fn run(self, service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
        service.get(version, self.path())
    }
}
