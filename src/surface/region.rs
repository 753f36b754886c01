use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Stable id of the editable region, shared by the bootstrap document and
/// every file the editor writes.
pub const EDITABLE_REGION_ID: &str = "editor";

/// Elements whose content is raw text, so tags inside them are not markup.
const RAW_TEXT_TAGS: [&str; 4] = ["script", "style", "textarea", "title"];

/// A comment (possibly unterminated) or a start/end tag.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?(?:-->|\z)|<(/?)([a-z][a-z0-9-]*)\b[^>]*>")
        .expect("tag pattern is valid")
});

static REGION_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sid\s*=\s*(?:"editor"|'editor'|editor)[\s/>]"#)
        .expect("editable region id pattern is valid")
});

/// Byte ranges of the editable region inside a markup string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpan {
    /// Tag name of the region element, lowercased.
    pub tag: String,
    /// Content between the opening and the matching closing tag.
    pub inner: Range<usize>,
}

/// Find the element carrying `id="editor"` and the extent of its content.
///
/// Nested elements with the same tag name are balanced so the matching
/// closing tag is found. Comments and the bodies of raw-text elements such
/// as `<script>` are skipped. Returns `None` if there is no such element or
/// it is never closed.
pub fn locate_editable_region(markup: &str) -> Option<RegionSpan> {
    let mut open: Option<(String, usize)> = None;
    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(caps) = TAG.captures_at(markup, pos) {
        let whole = caps.get(0)?;
        pos = whole.end();
        let Some(name) = caps.get(2) else {
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();
        let closing = caps.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        let self_closing = whole.as_str().ends_with("/>");

        match &open {
            None if !closing && REGION_ID.is_match(whole.as_str()) => {
                if self_closing {
                    return None;
                }
                open = Some((name.clone(), pos));
                depth = 1;
            }
            Some((tag, start)) if *tag == name => {
                if closing {
                    depth -= 1;
                    if depth == 0 {
                        return Some(RegionSpan {
                            tag: name,
                            inner: *start..whole.start(),
                        });
                    }
                } else if !self_closing {
                    depth += 1;
                }
            }
            _ => {}
        }

        if !closing && !self_closing && RAW_TEXT_TAGS.contains(&name.as_str()) {
            pos = raw_text_end(markup, pos, &name)?;
        }
    }
    None
}

/// Offset of the end tag closing a raw-text element whose content starts
/// at `from`.
fn raw_text_end(markup: &str, from: usize, name: &str) -> Option<usize> {
    let rest = markup[from..].to_ascii_lowercase();
    rest.find(&format!("</{name}")).map(|offset| from + offset)
}
