use memchr::memmem;
use serde::{Deserialize, Serialize};

/// The boilerplate placeholder a module carries where the common code used to be spliced in.
pub const INCLUDE_COMMON: &str = "#<<INCLUDE_ANSIBLE_MODULE_COMMON>>";

/// A structural anchor that every convertible module must contain.
///
/// Only presence is significant; order and count are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// The common-code include placeholder.
    Boilerplate,
    /// A bare call of the entry function at the start of a line.
    Invocation,
    /// The zero-argument entry function definition.
    Signature,
    /// Construction of the parameter-parsing object.
    Constructor,
}

impl Marker {
    pub const ALL: [Marker; 4] = [
        Marker::Boilerplate,
        Marker::Invocation,
        Marker::Signature,
        Marker::Constructor,
    ];

    /// The literal substring searched for.
    pub fn literal(self) -> &'static str {
        match self {
            Marker::Boilerplate => INCLUDE_COMMON,
            Marker::Invocation => "\nmain()",
            Marker::Signature => "def main():",
            Marker::Constructor => "AnsibleModule(",
        }
    }

    /// Stable short label used in logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            Marker::Boilerplate => "boilerplate",
            Marker::Invocation => "invocation",
            Marker::Signature => "signature",
            Marker::Constructor => "constructor",
        }
    }

    /// Byte-level search; the text does not have to be UTF-8.
    pub fn is_present_in(self, text: impl AsRef<[u8]>) -> bool {
        memmem::find(text.as_ref(), self.literal().as_bytes()).is_some()
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
