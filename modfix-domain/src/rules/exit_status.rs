use super::Rule;

// Both run after the exit-report rules; neither replacement contains `exit_json`.
pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "raise-on-exit-1",
        find: "sys.exit(1)",
        replace: "raise Exception('was going to call sys.exit(1)') #XXX",
        purpose: "A failing exit raises an error the caller can catch.",
    },
    Rule {
        id: "print-on-exit-0",
        find: "sys.exit(0)",
        replace: "print 'OK, was going to call sys.exit(0)' #XXX",
        purpose: "A successful exit becomes a harmless print.",
    },
];
