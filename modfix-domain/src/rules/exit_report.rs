use super::Rule;

/// Turn every `exit_json` report into a `return` of the same call.
///
/// `module.exit_json` is a substring of both `self.module.exit_json` and
/// `return module.exit_json`. Those two spellings are swapped for placeholders first, the general
/// rules run, and the placeholders are restored with a `return` in front.
pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "protect-self-exit",
        find: "self.module.exit_json",
        replace: "__rsmej__",
        purpose: "Hide method-receiver calls from return-module-exit.",
    },
    Rule {
        id: "protect-returned-exit",
        find: "return module.exit_json",
        replace: "__rmej__",
        purpose: "Hide calls that already return so they are not returned twice.",
    },
    Rule {
        id: "return-module-exit",
        find: "module.exit_json",
        replace: "return module.exit_json",
        purpose: "Return the report instead of exiting, for the `module` receiver.",
    },
    Rule {
        id: "return-m-exit",
        find: "m.exit_json",
        replace: "return m.exit_json",
        purpose: "Return the report instead of exiting, for the short `m` receiver.",
    },
    Rule {
        id: "restore-self-exit",
        find: "__rsmej__",
        replace: "return self.module.exit_json",
        purpose: "Restore method-receiver calls as returns.",
    },
    Rule {
        id: "restore-returned-exit",
        find: "__rmej__",
        replace: "return module.exit_json",
        purpose: "Restore calls that already returned, unchanged.",
    },
];
