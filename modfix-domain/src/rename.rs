use std::collections::BTreeMap;

/// Suffix appended to reserved names.
pub const DEFAULT_RENAME_SUFFIX: &str = "_module";

/// Maps source names that would collide with something in the host environment to safe
/// destination names. Every other name passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePolicy {
    reserved: BTreeMap<String, String>,
}

impl Default for RenamePolicy {
    /// `selinux` would shadow the host's selinux bindings.
    fn default() -> Self {
        let mut reserved = BTreeMap::new();
        reserved.insert(
            "selinux".to_string(),
            format!("selinux{DEFAULT_RENAME_SUFFIX}"),
        );
        Self { reserved }
    }
}

impl RenamePolicy {
    /// A policy that renames nothing.
    pub fn empty() -> Self {
        Self {
            reserved: BTreeMap::new(),
        }
    }

    /// Add or override one reserved name.
    pub fn with_rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.reserved.insert(from.into(), to.into());
        self
    }

    pub fn extend<I>(&mut self, renames: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.reserved.extend(renames);
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains_key(name)
    }

    pub fn destination_name(&self, name: &str) -> String {
        self.reserved
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selinux_gets_suffix() {
        let policy = RenamePolicy::default();
        assert_eq!(policy.destination_name("selinux"), "selinux_module");
    }

    #[test]
    fn other_names_pass_through() {
        let policy = RenamePolicy::default();
        for name in ["apt", "selinux_module", "Selinux", "selinux.py", ""] {
            assert_eq!(policy.destination_name(name), name);
        }
    }

    #[test]
    fn configured_renames_extend_default() {
        let mut policy = RenamePolicy::default();
        policy.extend([("os".to_string(), "os_module".to_string())]);
        assert!(policy.is_reserved("selinux"));
        assert_eq!(policy.destination_name("os"), "os_module");
    }

    #[test]
    fn empty_policy_renames_nothing() {
        assert_eq!(RenamePolicy::empty().destination_name("selinux"), "selinux");
    }
}
