use modfix_types::marker::Marker;
use thiserror::Error;

/// The module is missing one or more required markers ("a strange file").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} does not match expected shape (missing: {})", join_labels(.missing))]
pub struct ShapeRejection {
    pub name: String,
    pub missing: Vec<Marker>,
}

fn join_labels(missing: &[Marker]) -> String {
    missing
        .iter()
        .map(|m| m.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Markers absent from `text`, in [`Marker::ALL`] order.
pub fn missing_markers(text: impl AsRef<[u8]>) -> Vec<Marker> {
    let text = text.as_ref();
    Marker::ALL
        .iter()
        .copied()
        .filter(|m| !m.is_present_in(text))
        .collect()
}

/// True iff every required marker occurs at least once. Order is not checked.
pub fn classify(text: impl AsRef<[u8]>) -> bool {
    let text = text.as_ref();
    Marker::ALL.iter().all(|m| m.is_present_in(text))
}
