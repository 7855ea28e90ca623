use crate::error::Result;
use crate::git::TagSource;

/// Tag source backed by an explicit list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryTags {
    tags: Vec<String>,
}

impl InMemoryTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InMemoryTags {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl TagSource for InMemoryTags {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_tags() {
        let mut source = InMemoryTags::new(["v1.0.0"]);
        source.add_tag("v2.0.0");

        let tags = source.list_tags().unwrap();
        assert_eq!(tags, vec!["v1.0.0".to_string(), "v2.0.0".to_string()]);
    }

    #[test]
    fn test_in_memory_default() {
        let source = InMemoryTags::default();
        assert!(source.is_empty());
        assert!(source.list_tags().unwrap().is_empty());
    }
}
