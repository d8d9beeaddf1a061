mod calendar;
mod drive;
mod groups;
mod mail;
mod me;
mod users;

pub use calendar::CalendarSnippet;
pub use drive::DriveSnippet;
pub use groups::GroupsSnippet;
pub use mail::MailSnippet;
pub use me::MeSnippet;
pub use users::UsersSnippet;

use crate::error::GraphError;
use crate::graph::{GraphResponse, GraphService};
use crate::snippet::{Snippet, SnippetCallback, SnippetDescriptor};
use std::thread;

/// UI 中的分区，顺序即展示顺序。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Me,
    Users,
    Groups,
    Mail,
    Calendar,
    Drive,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Me,
        Section::Users,
        Section::Groups,
        Section::Mail,
        Section::Calendar,
        Section::Drive,
    ];

    /// 资源包中分区标题的字符串 id。
    pub fn label_id(self) -> &'static str {
        match self {
            Section::Me => "section_me",
            Section::Users => "section_users",
            Section::Groups => "section_groups",
            Section::Mail => "section_mail",
            Section::Calendar => "section_calendar",
            Section::Drive => "section_drive",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            Section::Me => "Me",
            Section::Users => "Users",
            Section::Groups => "Groups",
            Section::Mail => "Mail",
            Section::Calendar => "Calendar",
            Section::Drive => "Drive",
        }
    }

    pub fn snippets(self) -> Vec<SnippetKind> {
        match self {
            Section::Me => MeSnippet::ALL.into_iter().map(SnippetKind::Me).collect(),
            Section::Users => UsersSnippet::ALL.into_iter().map(SnippetKind::Users).collect(),
            Section::Groups => GroupsSnippet::ALL.into_iter().map(SnippetKind::Groups).collect(),
            Section::Mail => MailSnippet::ALL.into_iter().map(SnippetKind::Mail).collect(),
            Section::Calendar => CalendarSnippet::ALL
                .into_iter()
                .map(SnippetKind::Calendar)
                .collect(),
            Section::Drive => DriveSnippet::ALL.into_iter().map(SnippetKind::Drive).collect(),
        }
    }
}

/// 所有具体 snippet 的封闭集合，按 key 与资源包中的元数据对应。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnippetKind {
    Me(MeSnippet),
    Users(UsersSnippet),
    Groups(GroupsSnippet),
    Mail(MailSnippet),
    Calendar(CalendarSnippet),
    Drive(DriveSnippet),
}

impl SnippetKind {
    pub fn key(self) -> &'static str {
        match self {
            SnippetKind::Me(snippet) => snippet.key(),
            SnippetKind::Users(snippet) => snippet.key(),
            SnippetKind::Groups(snippet) => snippet.key(),
            SnippetKind::Mail(snippet) => snippet.key(),
            SnippetKind::Calendar(snippet) => snippet.key(),
            SnippetKind::Drive(snippet) => snippet.key(),
        }
    }

    /// 同步执行一次 Graph 调用（或一组组成同一演示的调用）。
    pub fn run(self, service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
        match self {
            SnippetKind::Me(snippet) => snippet.run(service, version),
            SnippetKind::Users(snippet) => snippet.run(service, version),
            SnippetKind::Groups(snippet) => snippet.run(service, version),
            SnippetKind::Mail(snippet) => snippet.run(service, version),
            SnippetKind::Calendar(snippet) => snippet.run(service, version),
            SnippetKind::Drive(snippet) => snippet.run(service, version),
        }
    }
}

/// 目录中的一个可执行 snippet：元数据 + 具体调用。
#[derive(Debug)]
pub struct GraphSnippet {
    kind: SnippetKind,
    descriptor: SnippetDescriptor<GraphService>,
}

impl GraphSnippet {
    pub fn new(kind: SnippetKind, descriptor: SnippetDescriptor<GraphService>) -> Self {
        GraphSnippet { kind, descriptor }
    }

    pub fn key(&self) -> &'static str {
        self.kind.key()
    }
}

impl Snippet<GraphService, GraphResponse> for GraphSnippet {
    fn descriptor(&self) -> &SnippetDescriptor<GraphService> {
        &self.descriptor
    }

    /// 在独立线程中发起阻塞请求，回调在该线程上执行。
    fn execute(&self, service: &GraphService, callback: SnippetCallback<GraphResponse>) {
        let service = service.clone();
        let kind = self.kind;
        let key = kind.key();
        let version = self.descriptor.version_segment().to_string();
        thread::spawn(move || {
            tracing::info!(snippet = key, %version, "executing snippet");
            let result = kind.run(&service, &version);
            if let Err(err) = &result {
                tracing::warn!(snippet = key, error = %err, "snippet failed");
            }
            callback(result);
        });
    }
}
