//! License definitions and parameterised license text

use crate::{DiscloseError, DiscloseResult};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// A license that content in the distribution may be released under.
///
/// The license text is a template: every `${name}` placeholder is filled from
/// the parameters supplied by the group that applies the license. Identity is
/// the `id` alone.
#[derive(Debug, Clone)]
pub struct License {
    id: String,
    name: String,
    url: String,
    source_required: bool,
    template: String,
    expected_parameters: BTreeSet<String>,
}

impl License {
    /// Fails with [`DiscloseError::DuplicateParameter`] when a parameter name
    /// is declared twice.
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        source_required: bool,
        template: impl Into<String>,
        expected_parameters: I,
    ) -> DiscloseResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let mut expected = BTreeSet::new();
        for parameter in expected_parameters {
            let parameter = parameter.into();
            if expected.contains(&parameter) {
                return Err(DiscloseError::DuplicateParameter {
                    license: id,
                    parameter,
                });
            }
            expected.insert(parameter);
        }

        Ok(Self {
            id,
            name: name.into(),
            url: url.into(),
            source_required,
            template: template.into(),
            expected_parameters: expected,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether content under this license must link to its source
    pub fn is_source_required(&self) -> bool {
        self.source_required
    }

    /// The unrendered license text
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn expected_parameters(&self) -> &BTreeSet<String> {
        &self.expected_parameters
    }

    /// Check that `parameters` supplies exactly the expected parameter names.
    ///
    /// A license expecting no parameters rejects any supplied parameter.
    pub fn validate_parameters(&self, parameters: &BTreeMap<String, String>) -> DiscloseResult<()> {
        let missing: Vec<String> = self
            .expected_parameters
            .iter()
            .filter(|name| !parameters.contains_key(*name))
            .cloned()
            .collect();
        let unexpected: Vec<String> = parameters
            .keys()
            .filter(|name| !self.expected_parameters.contains(*name))
            .cloned()
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(DiscloseError::ParameterMismatch {
                license: self.id.clone(),
                missing,
                unexpected,
            })
        }
    }

    /// Render the license text with `parameters` substituted for `${name}`.
    pub fn text(&self, parameters: &BTreeMap<String, String>) -> DiscloseResult<String> {
        self.validate_parameters(parameters)?;

        // One left-to-right pass: substituted values are never rescanned
        let mut rendered = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find("${") {
            rendered.push_str(&rest[..start]);
            let token = &rest[start..];
            match token.find('}') {
                Some(end) => {
                    match parameters.get(&token[2..end]) {
                        Some(value) => rendered.push_str(value),
                        None => rendered.push_str(&token[..=end]),
                    }
                    rest = &token[end + 1..];
                }
                None => {
                    rendered.push_str(token);
                    rest = "";
                }
            }
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

impl PartialEq for License {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for License {}

impl Hash for License {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for License {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for License {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
