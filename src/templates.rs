use crate::guest::GuestKind;
use serde::Serialize;

const ARCHIVE_SUFFIX: &str = ".tar.zst";

/// An archive stored in the repository, as reported by `restic snapshots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    pub file: String,
    pub template: String,
    pub kind: Option<GuestKind>,
}

impl TemplateEntry {
    /// Parse one snapshot row; the path column is the last one.
    pub fn from_snapshot_line(line: &str) -> Option<Self> {
        let path = line.split_whitespace().last()?;
        let file = path.trim_start_matches('/');
        let stem = file.strip_suffix(ARCHIVE_SUFFIX)?;
        if stem.is_empty() {
            return None;
        }

        let (template, kind) = match stem.rsplit_once('_') {
            Some((template, tag)) if !template.is_empty() => match GuestKind::from_tag(tag) {
                Some(kind) => (template, Some(kind)),
                None => (stem, None),
            },
            _ => (stem, None),
        };

        Some(Self {
            file: file.to_string(),
            template: template.to_string(),
            kind,
        })
    }
}

/// Archives in `output`, restricted to `kind` when given.
pub fn parse_snapshot_listing(output: &str, kind: Option<GuestKind>) -> Vec<TemplateEntry> {
    output
        .lines()
        .filter_map(TemplateEntry::from_snapshot_line)
        .filter(|entry| kind.map_or(true, |kind| entry.kind == Some(kind)))
        .collect()
}
