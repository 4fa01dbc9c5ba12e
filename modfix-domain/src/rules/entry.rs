use super::Rule;
use modfix_types::marker::INCLUDE_COMMON;

/// Rewrites that turn the self-executing script into a passive, importable entry function.
pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "include-common",
        find: INCLUDE_COMMON,
        replace: "\nfrom newcommon import *\n",
        purpose: "Replace the common-code placeholder with an import of the shared support module.",
    },
    // Anchored on the newline, so the `def main():` line is never touched.
    Rule {
        id: "drop-invocation",
        find: "\nmain()",
        replace: "",
        purpose: "Remove the top-level call so importing the module no longer runs it.",
    },
    Rule {
        id: "accept-params",
        find: "def main():",
        replace: "def main(**params):",
        purpose: "Let the entry function accept an arbitrary named-parameter bundle.",
    },
    Rule {
        id: "thread-params",
        find: "AnsibleModule(",
        replace: "AnsibleModule(params=params,",
        purpose: "Pass the named-parameter bundle into the parameter-parsing object.",
    },
];
