//! Conversion engine tests against in-memory and on-disk sources.

use camino::{Utf8Path, Utf8PathBuf};
use modfix_domain::{FsSourceView, RenamePolicy, Rewriter, RuleSet, SourceView};
use modfix_edit::{prepare_conversion, sha256_hex, ConvertError, ConvertOptions};
use modfix_types::marker::Marker;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

const CONFORMING: &str = concat!(
    "#<<INCLUDE_ANSIBLE_MODULE_COMMON>>\n",
    "def main():\n",
    "    module = AnsibleModule(argument_spec=dict())\n",
    "    module.exit_json(changed=False)\n",
    "\n",
    "main()\n",
);

struct MemSource {
    root: Utf8PathBuf,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemSource {
    fn new(files: &[(&str, &[u8])]) -> Self {
        Self {
            root: Utf8PathBuf::from("library"),
            files: files
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_vec()))
                .collect(),
        }
    }
}

impl SourceView for MemSource {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn list(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such module: {name}"))
    }
}

#[test]
fn conforming_module_is_prepared() {
    let source = MemSource::new(&[("ping", CONFORMING.as_bytes())]);
    let conv = prepare_conversion(
        &Rewriter::new(),
        &source,
        "ping",
        &ConvertOptions::default(),
    )
    .expect("conversion");

    assert_eq!(conv.destination_path, Utf8PathBuf::from("newlibrary/ping.py"));
    assert_eq!(conv.source_sha256, sha256_hex(CONFORMING.as_bytes()));
    assert_eq!(
        conv.destination_sha256,
        sha256_hex(&conv.result.text)
    );
    assert_eq!(
        String::from_utf8(conv.result.text).unwrap(),
        concat!(
            "\nfrom newcommon import *\n",
            "\n",
            "def main(**params):\n",
            "    module = AnsibleModule(params=params,argument_spec=dict())\n",
            "    return module.exit_json(changed=False)\n",
            "\n",
        )
    );
}

#[test]
fn reserved_name_lands_under_suffixed_path() {
    let source = MemSource::new(&[("selinux", CONFORMING.as_bytes())]);
    let opts = ConvertOptions {
        out_dir: "out".into(),
        extension: "py".to_string(),
    };
    let conv = prepare_conversion(&Rewriter::new(), &source, "selinux", &opts).unwrap();
    assert_eq!(conv.destination_path, Utf8PathBuf::from("out/selinux_module.py"));
    let patch = conv.patch().unwrap();
    assert!(patch.starts_with("diff --git a/selinux b/out/selinux_module.py"));
}

#[test]
fn missing_marker_is_shape_rejection() {
    let text = CONFORMING.replace("#<<INCLUDE_ANSIBLE_MODULE_COMMON>>\n", "");
    let source = MemSource::new(&[("odd", text.as_bytes())]);
    let err = prepare_conversion(&Rewriter::new(), &source, "odd", &ConvertOptions::default())
        .unwrap_err();

    match err {
        ConvertError::Shape(rej) => {
            assert_eq!(rej.name, "odd");
            assert_eq!(rej.missing, vec![Marker::Boilerplate]);
        }
        other => panic!("expected shape rejection, got {other:?}"),
    }
}

#[test]
fn unreadable_module_is_runtime_error() {
    let source = MemSource::new(&[]);
    let err = prepare_conversion(&Rewriter::new(), &source, "ghost", &ConvertOptions::default())
        .unwrap_err();
    assert!(!err.is_shape_rejection());
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn reads_from_disk() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8");
    std::fs::write(root.join("ping"), CONFORMING).unwrap();

    let source = FsSourceView::new(root);
    let conv =
        prepare_conversion(&Rewriter::new(), &source, "ping", &ConvertOptions::default()).unwrap();
    assert_eq!(conv.name, "ping");
    assert!(String::from_utf8_lossy(&conv.result.text).contains("def main(**params):"));
}

#[test]
fn custom_rules_and_renames_are_honoured() {
    let rewriter = Rewriter::with_rules(
        RuleSet::builtin(),
        RenamePolicy::empty().with_rename("ping", "ping_task"),
    );
    let source = MemSource::new(&[("ping", CONFORMING.as_bytes())]);
    let conv =
        prepare_conversion(&rewriter, &source, "ping", &ConvertOptions::default()).unwrap();
    assert_eq!(conv.result.destination, "ping_task");
}

#[test]
fn latin1_module_keeps_its_bytes_and_hashes() {
    let mut source_bytes = b"# Maintainer: Ren\xe9\n".to_vec();
    source_bytes.extend_from_slice(CONFORMING.as_bytes());
    let source = MemSource::new(&[("apt", source_bytes.as_slice())]);

    let conv = prepare_conversion(&Rewriter::new(), &source, "apt", &ConvertOptions::default())
        .expect("non-UTF-8 module converts");

    assert!(conv.result.text.starts_with(b"# Maintainer: Ren\xe9\n"));
    assert_eq!(conv.original, source_bytes);
    assert_eq!(conv.source_sha256, sha256_hex(&source_bytes));
    assert_eq!(conv.destination_sha256, sha256_hex(&conv.result.text));
}
