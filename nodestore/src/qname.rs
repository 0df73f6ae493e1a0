use std::fmt;

/// A qualified name: namespace URI, prefix and local name.
///
/// Empty components are treated as absent; they are never interned.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct QName {
    namespace_uri: String,
    prefix: String,
    local_name: String,
}

impl QName {
    pub fn new(
        namespace_uri: impl Into<String>,
        prefix: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            prefix: prefix.into(),
            local_name: local_name.into(),
        }
    }

    /// A name without namespace and prefix.
    pub fn local(local_name: impl Into<String>) -> Self {
        Self::new("", "", local_name)
    }

    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace_uri.is_empty() {
            write!(f, "{{{}}}", self.namespace_uri)?;
        }
        if !self.prefix.is_empty() {
            write!(f, "{}:", self.prefix)?;
        }
        f.write_str(&self.local_name)
    }
}

impl fmt::Debug for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QName({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::QName;

    #[test]
    fn display() {
        assert_eq!("a", QName::local("a").to_string());
        assert_eq!(
            "{http://example.com}ex:a",
            QName::new("http://example.com", "ex", "a").to_string()
        );
    }
}
