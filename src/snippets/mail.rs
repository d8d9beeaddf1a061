use crate::error::GraphError;
use crate::graph::{GraphResponse, GraphService};
use serde_json::{json, Value};

const MESSAGE_SUBJECT: &str = "Hello from the Graph snippets app";
const MESSAGE_BODY: &str = "This message was sent by the Send message snippet.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MailSnippet {
    GetMessages,
    SendMessage,
}

impl MailSnippet {
    pub const ALL: [MailSnippet; 2] = [MailSnippet::GetMessages, MailSnippet::SendMessage];

    pub fn key(self) -> &'static str {
        match self {
            MailSnippet::GetMessages => "get_messages",
            MailSnippet::SendMessage => "send_message",
        }
    }

    pub fn run(self, service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
        match self {
            MailSnippet::GetMessages => service.get(version, "me/messages"),
            MailSnippet::SendMessage => {
                let me = service.get(version, "me")?;
                let address = me
                    .string_field("mail")
                    .or_else(|| me.string_field("userPrincipalName"))
                    .ok_or_else(|| GraphError::MissingData("mail address of the signed-in user".to_string()))?;
                service.post(version, "me/sendMail", &send_mail_body(&address))
            }
        }
    }
}

/// 发给自己的纯文本邮件，同时保存到已发送邮件。
pub(super) fn send_mail_body(recipient: &str) -> Value {
    json!({
        "message": {
            "subject": MESSAGE_SUBJECT,
            "body": {
                "contentType": "Text",
                "content": MESSAGE_BODY,
            },
            "toRecipients": [
                { "emailAddress": { "address": recipient } }
            ],
        },
        "saveToSentItems": true,
    })
}
