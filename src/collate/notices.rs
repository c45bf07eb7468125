//! Notice grouping

use crate::model::{Resource, WithLicense};
use crate::traversal::Visitor;
use crate::{DiscloseError, DiscloseResult};
use std::collections::{BTreeMap, BTreeSet};

/// Groups resources by the notice they refer to and gathers the copyright
/// notices of license groups.
#[derive(Debug, Default)]
pub struct NoticeCollator {
    by_notice_id: BTreeMap<String, BTreeSet<Resource>>,
    copyright_notices: BTreeSet<String>,
}

impl NoticeCollator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve notice ids against `notices` (id → text).
    ///
    /// Resources whose ids resolve to the same text are merged under it.
    pub fn resource_notices(
        &self,
        notices: &BTreeMap<String, String>,
    ) -> DiscloseResult<BTreeMap<String, BTreeSet<Resource>>> {
        let mut results: BTreeMap<String, BTreeSet<Resource>> = BTreeMap::new();
        for (id, resources) in &self.by_notice_id {
            let text = notices
                .get(id)
                .ok_or_else(|| DiscloseError::UnknownNotice(id.clone()))?;
            results
                .entry(text.clone())
                .or_default()
                .extend(resources.iter().cloned());
        }
        Ok(results)
    }

    /// Distinct copyright notices, without the primary one
    pub fn other_notices(&self, primary_notice: Option<&str>) -> BTreeSet<String> {
        self.copyright_notices
            .iter()
            .filter(|notice| Some(notice.as_str()) != primary_notice)
            .cloned()
            .collect()
    }

    pub fn notice_ids(&self) -> impl Iterator<Item = &str> {
        self.by_notice_id.keys().map(String::as_str)
    }
}

impl Visitor for NoticeCollator {
    fn visit_with_license(&mut self, license: &WithLicense) {
        if let Some(notice) = license.copyright_notice() {
            self.copyright_notices.insert(notice.to_string());
        }
    }

    fn visit_resource(&mut self, resource: &Resource) {
        if let Some(id) = resource.notice_id() {
            self.by_notice_id
                .entry(id.to_string())
                .or_default()
                .insert(resource.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ByOrganisation, Organisation};
    use std::sync::Arc;

    fn collate(resources: Vec<Resource>) -> NoticeCollator {
        let org = Arc::new(Organisation::new("acme", "Acme", ""));
        let group = ByOrganisation::new(org, resources);
        let mut collator = NoticeCollator::new();
        group.accept(&mut collator);
        collator
    }

    #[test]
    fn test_groups_by_notice_text() {
        let collator = collate(vec![
            Resource::new("a").with_notice("n1"),
            Resource::new("b").with_notice("n2"),
            Resource::new("c").with_notice("n1"),
            Resource::new("d"),
        ]);
        let mut notices = BTreeMap::new();
        notices.insert("n1".to_string(), "First".to_string());
        notices.insert("n2".to_string(), "First".to_string());

        let grouped = collator.resource_notices(&notices).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["First"].len(), 3);
        assert_eq!(collator.notice_ids().count(), 2);
    }

    #[test]
    fn test_unresolved_notice_fails() {
        let collator = collate(vec![Resource::new("a").with_notice("ghost")]);
        let err = collator.resource_notices(&BTreeMap::new()).unwrap_err();
        assert!(matches!(err, DiscloseError::UnknownNotice(id) if id == "ghost"));
    }

    #[test]
    fn test_other_notices_exclude_primary() {
        let mut collator = NoticeCollator::new();
        collator.copyright_notices.insert("Primary".into());
        collator.copyright_notices.insert("Third party".into());
        let others = collator.other_notices(Some("Primary"));
        assert_eq!(others.into_iter().collect::<Vec<_>>(), vec!["Third party".to_string()]);
    }
}
