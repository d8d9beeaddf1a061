use crate::error::{GraphError, SnippetError};
use crate::graph::{GraphResponse, GraphService};
use crate::resources::MetadataSource;
use crate::snippet::{Snippet, SnippetCallback, SnippetCategory, SnippetDescriptor};
use crate::snippets::{GraphSnippet, Section};
use std::sync::{mpsc, Arc};

/// 一个分区：标题描述符（无元数据，名称即分区名）+ 分区内的 snippet。
#[derive(Debug)]
pub struct SnippetSection {
    pub section: Section,
    pub header: SnippetDescriptor<GraphService>,
    pub snippets: Vec<GraphSnippet>,
}

/// 整个演示目录。构建时任何元数据缺失或格式错误都会让构建整体失败。
#[derive(Debug)]
pub struct SnippetCatalog {
    service: Arc<GraphService>,
    sections: Vec<SnippetSection>,
}

impl SnippetCatalog {
    pub fn build(
        service: Arc<GraphService>,
        source: &dyn MetadataSource,
    ) -> Result<SnippetCatalog, SnippetError> {
        let mut sections = Vec::with_capacity(Section::ALL.len());
        for section in Section::ALL {
            let label = source
                .configured_string(section.label_id())
                .unwrap_or_else(|| section.default_label().to_string());
            let category = SnippetCategory::new(label, Arc::clone(&service));
            sections.push(build_section(section, &category, source)?);
        }

        let total: usize = sections.iter().map(|s| s.snippets.len()).sum();
        tracing::info!(sections = sections.len(), snippets = total, "snippet catalog built");
        Ok(SnippetCatalog { service, sections })
    }

    pub fn sections(&self) -> &[SnippetSection] {
        &self.sections
    }

    pub fn service(&self) -> &Arc<GraphService> {
        &self.service
    }

    pub fn find(&self, key: &str) -> Option<&GraphSnippet> {
        self.sections
            .iter()
            .flat_map(|section| section.snippets.iter())
            .find(|snippet| snippet.key() == key)
    }

    /// 按 key 执行；未知 key 也通过回调的失败通道返回。
    pub fn run(&self, key: &str, callback: SnippetCallback<GraphResponse>) {
        match self.find(key) {
            Some(snippet) => {
                tracing::info!(snippet = key, name = snippet.descriptor().name(), "running snippet");
                snippet.execute(&self.service, callback);
            }
            None => {
                tracing::warn!(snippet = key, "unknown snippet requested");
                callback(Err(SnippetError::UnknownSnippet(key.to_string()).into()));
            }
        }
    }

    /// 阻塞等待回调结果，供桥接层同步调用。
    pub fn run_blocking(&self, key: &str) -> Result<GraphResponse, GraphError> {
        let (tx, rx) = mpsc::channel();
        self.run(
            key,
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
        );
        rx.recv()
            .map_err(|_| GraphError::Transport("snippet worker exited without a result".to_string()))?
    }
}

fn build_section(
    section: Section,
    category: &SnippetCategory<GraphService>,
    source: &dyn MetadataSource,
) -> Result<SnippetSection, SnippetError> {
    let header = SnippetDescriptor::new::<String>(category, None)?;
    let snippets = section
        .snippets()
        .into_iter()
        .map(|kind| {
            let fields = source.ordered_metadata(kind.key()).ok_or_else(|| {
                SnippetError::MissingMetadata {
                    section: category.section.clone(),
                    key: kind.key().to_string(),
                }
            })?;
            let descriptor = SnippetDescriptor::new(category, Some(&fields[..]))?;
            Ok(GraphSnippet::new(kind, descriptor))
        })
        .collect::<Result<Vec<_>, SnippetError>>()?;

    Ok(SnippetSection {
        section,
        header,
        snippets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceBundle;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn service() -> Arc<GraphService> {
        Arc::new(GraphService::with_base_url("token", "http://127.0.0.1:9").unwrap())
    }

    /// 在内嵌资源包基础上替换或删除个别条目。
    struct PatchedSource {
        overrides: HashMap<&'static str, Option<Vec<String>>>,
    }

    impl MetadataSource for PatchedSource {
        fn ordered_metadata(&self, key: &str) -> Option<Vec<String>> {
            match self.overrides.get(key) {
                Some(patched) => patched.clone(),
                None => ResourceBundle::embedded().unwrap().ordered_metadata(key),
            }
        }

        fn configured_string(&self, id: &str) -> Option<String> {
            ResourceBundle::embedded().unwrap().configured_string(id)
        }
    }

    #[test]
    fn builds_every_section_from_embedded_resources() {
        let catalog = SnippetCatalog::build(service(), ResourceBundle::embedded().unwrap()).unwrap();
        let labels: Vec<_> = catalog.sections().iter().map(|s| s.header.name()).collect();
        assert_eq!(labels, ["Me", "Users", "Groups", "Mail", "Calendar", "Drive"]);

        let header = &catalog.sections()[0].header;
        assert_eq!(header.description(), None);
        assert!(!header.is_beta("beta"));

        let users = catalog.find("get_users").unwrap();
        assert_eq!(users.descriptor().name(), "Get users");
        assert!(users.descriptor().is_admin_required());
        assert!(Arc::ptr_eq(users.descriptor().service(), catalog.service()));
    }

    #[test]
    fn beta_snippets_are_flagged() {
        let catalog = SnippetCatalog::build(service(), ResourceBundle::embedded().unwrap()).unwrap();
        assert!(catalog.find("get_filtered_users").unwrap().descriptor().is_beta("beta"));
        assert!(!catalog.find("get_me").unwrap().descriptor().is_beta("beta"));
    }

    #[test]
    fn short_metadata_refuses_to_build() {
        let source = PatchedSource {
            overrides: HashMap::from([(
                "get_users",
                Some(vec!["Get me".to_string(), "desc".to_string(), "http://x".to_string()]),
            )]),
        };
        let err = SnippetCatalog::build(service(), &source).unwrap_err();
        assert_matches!(&err, SnippetError::Configuration { section, found: 3, .. } if section == "Users");
    }

    #[test]
    fn missing_metadata_refuses_to_build() {
        let source = PatchedSource {
            overrides: HashMap::from([("create_folder", None)]),
        };
        let err = SnippetCatalog::build(service(), &source).unwrap_err();
        assert_matches!(
            &err,
            SnippetError::MissingMetadata { section, key } if section == "Drive" && key == "create_folder"
        );
    }

    #[test]
    fn known_key_reports_transport_failure_from_worker_thread() {
        let catalog = SnippetCatalog::build(service(), ResourceBundle::embedded().unwrap()).unwrap();
        let caller = std::thread::current().id();
        let (tx, rx) = mpsc::channel();
        catalog.run(
            "get_me",
            Box::new(move |result| {
                let _ = tx.send((std::thread::current().id(), result));
            }),
        );

        let (worker, result) = rx.recv().unwrap();
        assert_ne!(worker, caller);
        assert_matches!(result, Err(GraphError::Transport(message)) if message.contains("/v1.0/me"));
    }

    #[test]
    fn run_blocking_waits_for_worker_result() {
        let catalog = SnippetCatalog::build(service(), ResourceBundle::embedded().unwrap()).unwrap();
        assert_matches!(catalog.run_blocking("get_filtered_users"), Err(GraphError::Transport(_)));
    }

    #[test]
    fn unknown_key_fails_through_callback() {
        let catalog = SnippetCatalog::build(service(), ResourceBundle::embedded().unwrap()).unwrap();
        let err = catalog.run_blocking("does_not_exist").unwrap_err();
        assert_eq!(err.to_string(), "unknown snippet `does_not_exist`");
    }
}
