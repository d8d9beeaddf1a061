use crate::error::SnippetError;

const NAME_INDEX: usize = 0;
const DESCRIPTION_INDEX: usize = 1;
const DOCUMENTATION_URL_INDEX: usize = 2;
const API_VERSION_INDEX: usize = 3;
const ADMIN_REQUIRED_INDEX: usize = 4;
const CODE_SNIPPET_INDEX: usize = 5;

/// 一条 snippet 资源数组需要的最少条目数。
pub const METADATA_FIELD_COUNT: usize = 6;

/// 资源数组解析后的强类型记录，字段顺序固定：
/// 名称、描述、文档地址、API 版本、是否需要管理员、示例代码。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetMetadata {
    pub name: String,
    pub description: String,
    pub documentation_url: String,
    pub api_version: String,
    pub is_admin_required: bool,
    pub code_snippet: String,
}

impl SnippetMetadata {
    /// 先校验长度再按位置取值；条目不足时返回带 section 名称的配置错误。
    /// 多余的尾部条目会被忽略。
    pub fn parse<S: AsRef<str>>(fields: &[S], section: &str) -> Result<Self, SnippetError> {
        if fields.len() < METADATA_FIELD_COUNT {
            return Err(SnippetError::Configuration {
                section: section.to_string(),
                expected: METADATA_FIELD_COUNT,
                found: fields.len(),
            });
        }
        let field = |index: usize| fields[index].as_ref().to_string();

        Ok(SnippetMetadata {
            name: field(NAME_INDEX),
            description: field(DESCRIPTION_INDEX),
            documentation_url: field(DOCUMENTATION_URL_INDEX),
            api_version: field(API_VERSION_INDEX),
            is_admin_required: parse_admin_flag(fields[ADMIN_REQUIRED_INDEX].as_ref()),
            code_snippet: field(CODE_SNIPPET_INDEX),
        })
    }
}

/// 仅当取值忽略大小写等于 "true" 时为真，其他一律视为 false。
fn parse_admin_flag(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fields(flag: &str) -> Vec<String> {
        vec![
            "Get me".to_string(),
            "Gets the signed in user".to_string(),
            "https://learn.microsoft.com/graph/api/user-get".to_string(),
            "v1.0".to_string(),
            flag.to_string(),
            "GET https://graph.microsoft.com/v1.0/me".to_string(),
        ]
    }

    #[test]
    fn parses_fields_in_fixed_order() {
        let metadata = SnippetMetadata::parse(&fields("false"), "Me").unwrap();
        assert_eq!(metadata.name, "Get me");
        assert_eq!(metadata.description, "Gets the signed in user");
        assert_eq!(
            metadata.documentation_url,
            "https://learn.microsoft.com/graph/api/user-get"
        );
        assert_eq!(metadata.api_version, "v1.0");
        assert!(!metadata.is_admin_required);
        assert_eq!(metadata.code_snippet, "GET https://graph.microsoft.com/v1.0/me");
    }

    #[test]
    fn admin_flag_is_case_insensitive_true_only() {
        for flag in ["true", "TRUE", "True", "tRuE"] {
            assert!(SnippetMetadata::parse(&fields(flag), "Me").unwrap().is_admin_required);
        }
        for flag in ["", "false", "1", "yes", " true"] {
            assert!(!SnippetMetadata::parse(&fields(flag), "Me").unwrap().is_admin_required);
        }
    }

    #[test]
    fn short_array_is_a_configuration_error() {
        let short = ["Get me", "desc", "http://x"];
        let err = SnippetMetadata::parse(&short, "Users").unwrap_err();
        assert_matches!(
            &err,
            SnippetError::Configuration { section, found: 3, .. } if section == "Users"
        );
        assert!(err.to_string().contains("Users"));
    }

    #[test]
    fn trailing_entries_are_ignored() {
        let mut long = fields("true");
        long.push("extra".to_string());
        let metadata = SnippetMetadata::parse(&long, "Me").unwrap();
        assert_eq!(metadata.code_snippet, "GET https://graph.microsoft.com/v1.0/me");
    }
}
