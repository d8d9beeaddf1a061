use crate::error::GraphError;
use crate::graph::{GraphResponse, GraphService};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::{json, Value};

const TEXT_FILE_CONTENT: &str = "Created by the Graph snippets app.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveSnippet {
    GetDrive,
    GetRootChildren,
    CreateTextFile,
    CreateFolder,
}

impl DriveSnippet {
    pub const ALL: [DriveSnippet; 4] = [
        DriveSnippet::GetDrive,
        DriveSnippet::GetRootChildren,
        DriveSnippet::CreateTextFile,
        DriveSnippet::CreateFolder,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DriveSnippet::GetDrive => "get_drive",
            DriveSnippet::GetRootChildren => "get_drive_root_children",
            DriveSnippet::CreateTextFile => "create_text_file",
            DriveSnippet::CreateFolder => "create_folder",
        }
    }

    pub fn run(self, service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
        match self {
            DriveSnippet::GetDrive => service.get(version, "me/drive"),
            DriveSnippet::GetRootChildren => service.get(version, "me/drive/root/children"),
            DriveSnippet::CreateTextFile => {
                let name = format!("snippet-{}.txt", uuid::Uuid::new_v4().simple());
                service.put_bytes(
                    version,
                    &root_content_path(&name),
                    "text/plain",
                    TEXT_FILE_CONTENT.as_bytes().to_vec(),
                )
            }
            DriveSnippet::CreateFolder => {
                let name = format!("snippet-folder-{}", uuid::Uuid::new_v4().simple());
                service.post(version, "me/drive/root/children", &new_folder_body(&name))
            }
        }
    }
}

/// `me/drive/root:/{name}:/content`，文件名整体编码。
pub(super) fn root_content_path(name: &str) -> String {
    let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC).to_string();
    format!("me/drive/root:/{encoded}:/content")
}

/// 同名冲突时由服务端自动重命名。
pub(super) fn new_folder_body(name: &str) -> Value {
    json!({
        "name": name,
        "folder": {},
        "@microsoft.graph.conflictBehavior": "rename",
    })
}
