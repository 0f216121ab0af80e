//! Tests for segmentation, inline formatting, prose handling and the
//! top-level render pipeline.

use tutor_render_config::{IdentifierHeuristic, RendererConfig, RuleOverride};

use super::html::{blocks_to_html, table_to_html};
use super::inline::{SpanKind, extract_inline_spans, format_inline, wrap_identifiers};
use super::prose::{
    ProsePiece, clean, fence_indented_code, format_prose, shifted_heading_level,
    split_language_indicator,
};
use super::segment::{SegmentKind, fence_tag, segment};
use super::testing::{formatted_html, renderer, renderer_with, single_table, strings};
use super::{ContentBlock, MarkdownRenderer};
use crate::conversation::Message;

fn plain_renderer() -> MarkdownRenderer {
    renderer_with(|c| c.identifier_heuristic = IdentifierHeuristic::Off)
}

fn code(language: &str, code: &str) -> ContentBlock {
    ContentBlock::CodeBlock {
        language: language.to_string(),
        code: code.to_string(),
    }
}

fn formatted(html: &str) -> ContentBlock {
    ContentBlock::FormattedText {
        html: html.to_string(),
    }
}

// -- Segmenter --

#[test]
fn test_segment_splits_text_and_code() {
    let input = "intro\n```rust\nfn main() {}\n```\noutro";
    let segs = segment(input);
    assert_eq!(segs.len(), 3);
    assert_eq!(segs[0].kind, SegmentKind::Text);
    assert_eq!(segs[0].source(input), "intro\n");
    assert_eq!(
        segs[1].kind,
        SegmentKind::Code {
            language: Some("rust".to_string()),
            code: "fn main() {}".to_string(),
            terminated: true,
        }
    );
    assert_eq!(segs[2].source(input), "outro");
}

#[test]
fn test_segment_ranges_tile_input() {
    let input = "a\n\n```\nb\n```\nc\n```py\nd";
    let segs = segment(input);
    let rebuilt: String = segs.iter().map(|s| s.source(input)).collect();
    assert_eq!(rebuilt, input);
    for pair in segs.windows(2) {
        assert_eq!(pair[0].range.end, pair[1].range.start);
    }
}

#[test]
fn test_segment_unterminated_fence_runs_to_end() {
    let input = "```python\nx = 1\ny = 2";
    let segs = segment(input);
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].range, 0..input.len());
    assert_eq!(
        segs[0].kind,
        SegmentKind::Code {
            language: Some("python".to_string()),
            code: "x = 1\ny = 2".to_string(),
            terminated: false,
        }
    );
}

#[test]
fn test_segment_first_closing_fence_wins() {
    let input = "```\na\n```python\nb\n```";
    let segs = segment(input);
    assert_eq!(segs.len(), 3);
    assert_eq!(
        segs[0].kind,
        SegmentKind::Code {
            language: None,
            code: "a".to_string(),
            terminated: true,
        }
    );
    assert_eq!(segs[1].source(input), "b\n");
    assert!(matches!(
        segs[2].kind,
        SegmentKind::Code {
            terminated: false,
            ..
        }
    ));
}

#[test]
fn test_fence_tag() {
    assert_eq!(fence_tag("```"), Some(""));
    assert_eq!(fence_tag("  ```c++"), Some("c++"));
    assert_eq!(fence_tag("```python  "), Some("python"));
    assert_eq!(fence_tag("```python print(1)"), None);
    assert_eq!(fence_tag("text ```"), None);
}

#[test]
fn test_segment_empty_input() {
    assert!(segment("").is_empty());
}

// -- Inline spans --

#[test]
fn test_inline_spans_bold_italic_code() {
    let spans = extract_inline_spans("**bold** and *italic* and `code`");
    let kinds: Vec<_> = spans.iter().map(|s| s.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            SpanKind::Bold("bold".to_string()),
            SpanKind::Italic("italic".to_string()),
            SpanKind::Code("code".to_string()),
        ]
    );
}

#[test]
fn test_inline_bold_is_non_greedy() {
    let spans = extract_inline_spans("**a** **b**");
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].kind, SpanKind::Bold("a".to_string()));
    assert_eq!(spans[1].kind, SpanKind::Bold("b".to_string()));
}

#[test]
fn test_inline_code_is_opaque() {
    let spans = extract_inline_spans("`**not bold**`");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, SpanKind::Code("**not bold**".to_string()));
}

#[test]
fn test_bold_encloses_inline_code() {
    let spans = extract_inline_spans("**`x`** and `y`");
    let kinds: Vec<_> = spans.iter().map(|s| s.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            SpanKind::Bold("`x`".to_string()),
            SpanKind::Code("y".to_string()),
        ]
    );
    assert_eq!(
        format_inline("**`x`**", None),
        "<strong><code>x</code></strong>"
    );
}

#[test]
fn test_italic_encloses_inline_code() {
    assert_eq!(
        format_inline("*call `f()`*", None),
        "<em>call <code>f()</code></em>"
    );
}

#[test]
fn test_emphasis_cannot_cut_through_code() {
    assert_eq!(
        format_inline("`a*b` and c*", None),
        "<code>a*b</code> and c*"
    );
}

#[test]
fn test_format_inline_escapes_html() {
    assert_eq!(
        format_inline("a < b & `x<y`", None),
        "a &lt; b &amp; <code>x&lt;y</code>"
    );
    assert_eq!(format_inline("2 * 3 = 6", None), "2 * 3 = 6");
}

#[test]
fn test_format_inline_handles_multibyte_text() {
    assert_eq!(
        format_inline("→ **größer** ←", None),
        "→ <strong>größer</strong> ←"
    );
}

#[test]
fn test_wrap_identifiers_mode() {
    let config = RendererConfig {
        identifier_heuristic: IdentifierHeuristic::Identifiers,
        ..Default::default()
    };
    assert_eq!(
        wrap_identifiers("Call len() on the math.pi value and items[i]", &config),
        "Call <code>len()</code> on the <code>math.pi</code> value and <code>items[i]</code>"
    );
}

#[test]
fn test_wrap_all_tokens_skips_stopwords() {
    let config = RendererConfig::default();
    assert_eq!(
        wrap_identifiers("The cat and THE dog", &config),
        "The <code>cat</code> and THE <code>dog</code>"
    );
}

// -- Prose --

#[test]
fn test_clean_removes_rules_and_bare_markers() {
    assert_eq!(
        clean("---\n#Intro\n\n\n\nText\n### Keep"),
        "Intro\n\nText\n### Keep"
    );
}

#[test]
fn test_clean_keeps_deep_headings_intact() {
    assert_eq!(clean("### Title"), "### Title");
    assert_eq!(clean("######Six"), "Six");
}

#[test]
fn test_fence_indented_code() {
    let out = fence_indented_code("Example:\n    x = 1\n    y = 2\n\nDone", 4, "python");
    assert_eq!(out, "Example:\n```python\nx = 1\ny = 2\n```\n\nDone");
}

#[test]
fn test_fence_indented_code_keeps_relative_indent() {
    let out = fence_indented_code("    def f():\n        return 1", 4, "python");
    assert_eq!(out, "```python\ndef f():\n    return 1\n```");
}

#[test]
fn test_fence_indented_code_disabled_at_zero() {
    let text = "    x = 1";
    assert_eq!(fence_indented_code(text, 0, "python"), text);
}

#[test]
fn test_split_language_indicator() {
    let pieces = split_language_indicator(
        "Try this:\npython\nprint('hi')\nx = 2\n\nThen run it.",
        "python",
    );
    assert_eq!(pieces.len(), 3);
    assert_eq!(pieces[0], ProsePiece::Text("Try this:".to_string()));
    assert_eq!(pieces[1], ProsePiece::Code("print('hi')\nx = 2".to_string()));
    assert!(matches!(&pieces[2], ProsePiece::Text(t) if t.trim() == "Then run it."));
}

#[test]
fn test_language_indicator_needs_a_body() {
    let pieces = split_language_indicator("I like\npython", "python");
    assert_eq!(pieces, vec![ProsePiece::Text("I like\npython".to_string())]);
}

#[test]
fn test_shifted_heading_level() {
    assert_eq!(shifted_heading_level(1), 1);
    assert_eq!(shifted_heading_level(2), 2);
    assert_eq!(shifted_heading_level(3), 4);
    assert_eq!(shifted_heading_level(5), 6);
    assert_eq!(shifted_heading_level(6), 6);
}

#[test]
fn test_format_prose_headings() {
    let config = RendererConfig::default();
    assert_eq!(
        format_prose("## Setup\n### Details\nPlain", &config, false),
        "<h2>Setup</h2>\n<h4>Details</h4>\nPlain"
    );
}

// -- Render pipeline --

#[test]
fn test_render_empty_input() {
    assert!(renderer().render("").is_empty());
    assert!(renderer().render("  \n ").is_empty());
}

#[test]
fn test_render_text_and_code() {
    let blocks = renderer().render("Intro text\n\n```js\nconsole.log(1)\n```\n\nAfter");
    assert_eq!(
        blocks,
        vec![
            formatted("Intro text"),
            code("js", "console.log(1)"),
            formatted("After"),
        ]
    );
}

#[test]
fn test_render_identifier_modes() {
    let ids = renderer_with(|c| c.identifier_heuristic = IdentifierHeuristic::Identifiers);
    assert_eq!(
        ids.render("Use len() here"),
        vec![formatted("Use <code>len()</code> here")]
    );
    // Any backtick in the message turns the heuristic off.
    assert_eq!(
        ids.render("Use len() or `x`"),
        vec![formatted("Use len() or <code>x</code>")]
    );
    assert_eq!(
        plain_renderer().render("Use len() here"),
        vec![formatted("Use len() here")]
    );
}

#[test]
fn test_render_indented_code() {
    let blocks = plain_renderer().render("Example:\n    x = 1\n    print(x)\n\nDone");
    assert_eq!(
        blocks,
        vec![
            formatted("Example:"),
            code("python", "x = 1\nprint(x)"),
            formatted("Done"),
        ]
    );
}

#[test]
fn test_render_language_indicator() {
    let blocks = plain_renderer().render("Here is code:\npython\nprint('hi')\n\nThat prints hi.");
    assert_eq!(
        blocks,
        vec![
            formatted("Here is code:"),
            code("python", "print('hi')"),
            formatted("That prints hi."),
        ]
    );
}

#[test]
fn test_render_headings() {
    let blocks = plain_renderer().render("# Title\n### Sub\n#Note this");
    assert_eq!(
        blocks,
        vec![formatted("<h1>Title</h1>\n<h4>Sub</h4>\nNote this")]
    );
}

#[test]
fn test_render_keeps_prose_around_table() {
    let blocks =
        plain_renderer().render("Compare:\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nDone.");
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0], formatted("Compare:"));
    assert!(blocks[1].is_table());
    assert_eq!(blocks[2], formatted("Done."));
}

#[test]
fn test_render_two_tables_in_one_span() {
    let input = "| A | B |\n|---|---|\n| 1 | 2 |\n\nand\n\n| C | D |\n|---|---|\n| 3 | 4 |";
    let blocks = plain_renderer().render(input);
    let tables: Vec<_> = blocks.iter().filter(|b| b.is_table()).collect();
    assert_eq!(tables.len(), 2);
    assert_eq!(formatted_html(&blocks), "and");
}

#[test]
fn test_rule_override_disables_pipe_tables() {
    let r = renderer_with(|c| {
        c.rule_overrides = vec![RuleOverride {
            id: "pipe_table".to_string(),
            enabled: Some(false),
        }]
    });
    let blocks = r.render("| A | B |\n|---|---|\n| 1 | 2 |");
    assert!(!blocks.iter().any(ContentBlock::is_table));
    assert!(!blocks.is_empty());
}

#[test]
fn test_render_is_idempotent() {
    let r = renderer();
    let input = "## Types\n\n| A | B |\n|---|---|\n| `x` | **y** |\n\n```\nprint(1)\n```";
    assert_eq!(r.render(input), r.render(input));
}

#[test]
fn test_render_table_cells_stay_raw() {
    let (header, body) = single_table(&renderer().render("| A | B |\n|---|---|\n| `x` | **y** |"));
    assert_eq!(header, strings(&["A", "B"]));
    assert_eq!(body, vec![strings(&["`x`", "**y**"])]);
}

// -- User messages --

#[test]
fn test_render_user_keeps_text_plain() {
    let blocks = renderer().render_user("look at this:\n```\nx=1\n```\n**not bold**");
    assert_eq!(
        blocks,
        vec![
            ContentBlock::PlainText {
                text: "look at this:".to_string()
            },
            code("python", "x=1"),
            ContentBlock::PlainText {
                text: "**not bold**".to_string()
            },
        ]
    );
}

#[test]
fn test_render_message_dispatches_on_role() {
    let r = plain_renderer();
    assert_eq!(
        r.render_message(&Message::user("**hi**")),
        vec![ContentBlock::PlainText {
            text: "**hi**".to_string()
        }]
    );
    assert_eq!(
        r.render_message(&Message::assistant("**hi**", Some(1.5))),
        vec![formatted("<strong>hi</strong>")]
    );
}

// -- HTML --

#[test]
fn test_blocks_to_html() {
    let blocks = vec![
        ContentBlock::PlainText {
            text: "a<b".to_string(),
        },
        code("python", "x < 1"),
    ];
    assert_eq!(
        blocks_to_html(&blocks, &RendererConfig::default()),
        "<p class=\"plain-text\">a&lt;b</p>\n\
         <pre class=\"code-block\" data-code-block-id=\"code-block-1\"><code class=\"language-python\">x &lt; 1</code></pre>"
    );
}

#[test]
fn test_table_to_html_pads_short_rows() {
    let html = table_to_html(
        &strings(&["A", "B"]),
        &[strings(&["**x**", "1\n2"]), strings(&["y"])],
        &RendererConfig::default(),
    );
    assert_eq!(
        html,
        "<table class=\"markdown-table\">\n<thead>\n<tr><th>A</th><th>B</th></tr>\n</thead>\n<tbody>\n\
         <tr><td><strong>x</strong></td><td>1<br>2</td></tr>\n\
         <tr><td>y</td><td>&nbsp;</td></tr>\n</tbody>\n</table>"
    );
}
