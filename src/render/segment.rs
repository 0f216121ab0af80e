//! Code fence segmentation.
//!
//! Splits a message into alternating fenced-code and text spans. The spans
//! tile the input exactly: concatenating `&input[seg.range]` over all
//! segments gives back the original string.

use std::ops::Range;

use super::regexes::re_fence_line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Code {
        /// The tag after the opening backticks, `None` when absent.
        language: Option<String>,
        /// Interior lines joined with `\n`, fences excluded.
        code: String,
        /// `false` when the fence ran to the end of input.
        terminated: bool,
    },
}

/// One span of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Byte range in the input, fence lines included for code.
    pub range: Range<usize>,
}

impl Segment {
    pub fn is_code(&self) -> bool {
        matches!(self.kind, SegmentKind::Code { .. })
    }

    pub fn source<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range.clone()]
    }
}

/// Returns the language tag when `line` is a fence delimiter line.
pub(crate) fn fence_tag(line: &str) -> Option<&str> {
    re_fence_line()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn strip_eol(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

struct OpenFence {
    start: usize,
    language: Option<String>,
    lines: Vec<String>,
}

/// Split `input` into text and fenced-code segments.
///
/// The first delimiter line after an opener closes the fence; fences do not
/// nest. An unterminated fence extends to the end of input.
pub fn segment(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut fence: Option<OpenFence> = None;
    let mut offset = 0;

    for raw_line in input.split_inclusive('\n') {
        let line = strip_eol(raw_line);
        let line_end = offset + raw_line.len();

        match fence.take() {
            None => {
                if let Some(tag) = fence_tag(line) {
                    if offset > text_start {
                        segments.push(Segment {
                            kind: SegmentKind::Text,
                            range: text_start..offset,
                        });
                    }
                    crate::debug_trace!("SEGMENT", "fence opened at byte {} tag={:?}", offset, tag);
                    fence = Some(OpenFence {
                        start: offset,
                        language: (!tag.is_empty()).then(|| tag.to_string()),
                        lines: Vec::new(),
                    });
                }
            }
            Some(mut open) => {
                if fence_tag(line).is_some() {
                    segments.push(Segment {
                        kind: SegmentKind::Code {
                            language: open.language,
                            code: open.lines.join("\n"),
                            terminated: true,
                        },
                        range: open.start..line_end,
                    });
                    text_start = line_end;
                } else {
                    open.lines.push(line.to_string());
                    fence = Some(open);
                }
            }
        }

        offset = line_end;
    }

    match fence {
        Some(open) => {
            crate::debug_log!("SEGMENT", "unterminated fence at byte {}", open.start);
            segments.push(Segment {
                kind: SegmentKind::Code {
                    language: open.language,
                    code: open.lines.join("\n"),
                    terminated: false,
                },
                range: open.start..input.len(),
            });
        }
        None if text_start < input.len() => segments.push(Segment {
            kind: SegmentKind::Text,
            range: text_start..input.len(),
        }),
        None => {}
    }

    segments
}

/// `true` when any line of `text` is a fence delimiter.
pub fn has_fence(text: &str) -> bool {
    text.lines().any(|line| fence_tag(line).is_some())
}
