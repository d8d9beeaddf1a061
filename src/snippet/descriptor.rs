use super::{category::SnippetCategory, metadata::SnippetMetadata};
use crate::error::SnippetError;
use std::{fmt, sync::Arc};

/// 未声明版本时使用的 Graph 路径段。
pub const DEFAULT_API_VERSION: &str = "v1.0";

/// 单个 snippet 的展示元数据 + 所属分区的服务句柄。
/// 构造后只读；所有字符串在构造时复制，与输入数组不再有关联。
pub struct SnippetDescriptor<S> {
    name: String,
    description: Option<String>,
    documentation_url: Option<String>,
    api_version: Option<String>,
    is_admin_required: bool,
    code_snippet: Option<String>,
    service: Arc<S>,
}

impl<S> SnippetDescriptor<S> {
    /// 有资源数组时按固定位置赋值；没有时名称回退为分区名，其余字段为空。
    pub fn new<T: AsRef<str>>(
        category: &SnippetCategory<S>,
        metadata: Option<&[T]>,
    ) -> Result<Self, SnippetError> {
        let service = Arc::clone(&category.service);
        match metadata {
            Some(fields) => {
                let parsed = SnippetMetadata::parse(fields, &category.section)?;
                Ok(Self::from_metadata(parsed, service))
            }
            None => Ok(Self::section_header(&category.section, service)),
        }
    }

    pub fn from_metadata(metadata: SnippetMetadata, service: Arc<S>) -> Self {
        SnippetDescriptor {
            name: metadata.name,
            description: Some(metadata.description),
            documentation_url: Some(metadata.documentation_url),
            api_version: Some(metadata.api_version),
            is_admin_required: metadata.is_admin_required,
            code_snippet: Some(metadata.code_snippet),
            service,
        }
    }

    fn section_header(section: &str, service: Arc<S>) -> Self {
        SnippetDescriptor {
            name: section.to_string(),
            description: None,
            documentation_url: None,
            api_version: None,
            is_admin_required: false,
            code_snippet: None,
            service,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn code_snippet(&self) -> Option<&str> {
        self.code_snippet.as_deref()
    }

    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn is_admin_required(&self) -> bool {
        self.is_admin_required
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// 版本号与配置的 beta 标签忽略大小写比较（按 Unicode 字符）。
    /// 分区标题没有版本信息，此时返回 false。
    pub fn is_beta(&self, beta_label: &str) -> bool {
        self.api_version
            .as_deref()
            .is_some_and(|version| eq_ignore_case(version, beta_label))
    }

    /// 拼接 Graph URL 使用的版本路径段（beta、v1.0 等）。
    pub fn version_segment(&self) -> &str {
        self.api_version
            .as_deref()
            .map(str::trim)
            .filter(|version| !version.is_empty())
            .unwrap_or(DEFAULT_API_VERSION)
    }
}

/// 逐字符比较：字符相同，或大写形式相同，或小写形式相同即视为相等。
fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars().count() == right.chars().count()
        && left.chars().zip(right.chars()).all(|(a, b)| {
            a == b
                || a.to_uppercase().eq(b.to_uppercase())
                || a.to_lowercase().eq(b.to_lowercase())
        })
}

impl<S> fmt::Debug for SnippetDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnippetDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("documentation_url", &self.documentation_url)
            .field("api_version", &self.api_version)
            .field("is_admin_required", &self.is_admin_required)
            .field("code_snippet", &self.code_snippet)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    struct StubService;

    fn category(section: &str) -> SnippetCategory<StubService> {
        SnippetCategory::new(section, Arc::new(StubService))
    }

    fn metadata(version: &str) -> Vec<String> {
        [
            "Get groups",
            "Lists the groups in the tenant",
            "https://learn.microsoft.com/graph/api/group-list",
            version,
            "True",
            "GET /groups",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn reads_back_every_metadata_field() {
        let fields = metadata("v1.0");
        let descriptor = SnippetDescriptor::new(&category("Groups"), Some(&fields[..])).unwrap();
        assert_eq!(descriptor.name(), "Get groups");
        assert_eq!(descriptor.description(), Some("Lists the groups in the tenant"));
        assert_eq!(
            descriptor.documentation_url(),
            Some("https://learn.microsoft.com/graph/api/group-list")
        );
        assert_eq!(descriptor.api_version(), Some("v1.0"));
        assert!(descriptor.is_admin_required());
        assert_eq!(descriptor.code_snippet(), Some("GET /groups"));
    }

    #[test]
    fn header_without_metadata_falls_back_to_section_label() {
        let descriptor = SnippetDescriptor::new::<String>(&category("Me"), None).unwrap();
        assert_eq!(descriptor.name(), "Me");
        assert_eq!(descriptor.description(), None);
        assert_eq!(descriptor.documentation_url(), None);
        assert_eq!(descriptor.api_version(), None);
        assert_eq!(descriptor.code_snippet(), None);
        assert!(!descriptor.is_admin_required());
    }

    #[test]
    fn short_metadata_fails_with_section_label() {
        let short = ["Get me", "desc", "http://x"];
        let err = SnippetDescriptor::new(&category("Users"), Some(&short[..])).unwrap_err();
        assert_matches!(&err, SnippetError::Configuration { section, .. } if section == "Users");
    }

    #[test]
    fn service_handle_is_shared_with_category() {
        let category = category("Me");
        let fields = metadata("v1.0");
        let descriptor = SnippetDescriptor::new(&category, Some(&fields[..])).unwrap();
        assert!(Arc::ptr_eq(descriptor.service(), &category.service));
        let header = SnippetDescriptor::new::<String>(&category, None).unwrap();
        assert!(Arc::ptr_eq(header.service(), &category.service));
    }

    #[test]
    fn beta_comparison_ignores_case() {
        let upper = metadata("BETA");
        let descriptor = SnippetDescriptor::new(&category("Me"), Some(&upper[..])).unwrap();
        assert!(descriptor.is_beta("beta"));

        let stable = metadata("v1.0");
        let descriptor = SnippetDescriptor::new(&category("Me"), Some(&stable[..])).unwrap();
        assert!(!descriptor.is_beta("beta"));
    }

    #[test]
    fn beta_comparison_handles_non_ascii_labels() {
        let accented = metadata("BÊTA");
        let descriptor = SnippetDescriptor::new(&category("Me"), Some(&accented[..])).unwrap();
        assert!(descriptor.is_beta("bêta"));
        assert!(!descriptor.is_beta("beta"));
        assert!(!descriptor.is_beta("bêtas"));
    }

    #[test]
    fn header_is_never_beta() {
        let header = SnippetDescriptor::new::<String>(&category("Me"), None).unwrap();
        assert!(!header.is_beta("beta"));
        assert_eq!(header.version_segment(), DEFAULT_API_VERSION);
    }

    #[test]
    fn descriptors_snapshot_their_input() {
        let mut first_fields = metadata("v1.0");
        let second_fields = metadata("beta");
        let first = SnippetDescriptor::new(&category("Me"), Some(&first_fields[..])).unwrap();
        let second = SnippetDescriptor::new(&category("Me"), Some(&second_fields[..])).unwrap();

        first_fields[0] = "changed".to_string();
        first_fields[3] = "beta".to_string();
        drop(second_fields);

        assert_eq!(first.name(), "Get groups");
        assert_eq!(first.api_version(), Some("v1.0"));
        assert_eq!(second.api_version(), Some("beta"));
    }

    #[test]
    fn blank_version_uses_default_segment() {
        let fields = metadata("  ");
        let descriptor = SnippetDescriptor::new(&category("Me"), Some(&fields[..])).unwrap();
        assert_eq!(descriptor.version_segment(), DEFAULT_API_VERSION);
    }
}
