/// Static allow-list of request paths that do not require an identity.
///
/// Prefix entries are segment-aware: `/login` covers `/login` and
/// `/login/...` but not `/loginx`. A prefix ending in `/` covers everything
/// beneath it. Exact entries match only themselves. Paths containing `.` or
/// `..` segments are never exempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExemptionPolicy {
    prefixes: Vec<String>,
    exact: Vec<String>,
}

impl PathExemptionPolicy {
    pub const DEFAULT_PREFIXES: [&'static str; 5] =
        ["/login", "/register", "/css/", "/js/", "/auth/"];
    pub const DEFAULT_EXACT: [&'static str; 1] = ["/"];

    /// Build a policy from prefix and exact-path entries. Empty entries are ignored.
    pub fn new<P, E>(prefixes: P, exact: E) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
            exact: exact
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        if path.split('/').any(|segment| segment == "." || segment == "..") {
            return false;
        }

        self.exact.iter().any(|exact| exact == path)
            || self
                .prefixes
                .iter()
                .any(|prefix| matches_prefix(prefix, path))
    }
}

impl Default for PathExemptionPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIXES, Self::DEFAULT_EXACT)
    }
}

fn matches_prefix(prefix: &str, path: &str) -> bool {
    if prefix.ends_with('/') {
        return path.starts_with(prefix);
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
