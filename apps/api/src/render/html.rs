//! Self-contained HTML report: inline CSS only, no scripts or external resources.

use html_escape::encode_text;

use crate::render::outline::{Block, ReportOutline};

const STYLE: &str = r#"
body { font-family: 'Malgun Gothic', 'Apple SD Gothic Neo', sans-serif; margin: 40px; line-height: 1.6; color: #1f2937; }
.header { border-bottom: 2px solid #3b82f6; padding-bottom: 20px; margin-bottom: 30px; }
.title { font-size: 28px; margin: 0 0 10px; }
.date { color: #6b7280; font-size: 14px; margin: 0; }
.section { margin-bottom: 30px; }
.section-title { font-size: 20px; border-left: 4px solid #3b82f6; padding-left: 10px; }
.stat { background: #f3f4f6; padding: 12px 15px; border-radius: 8px; font-weight: bold; }
.keyword-item { margin-bottom: 15px; padding: 10px; background: #f9fafb; border-radius: 6px; }
.keyword-name { font-weight: bold; margin: 0; }
.sample-reviews { list-style: none; padding-left: 0; margin: 8px 0 0; }
.sample-review { background: #f3f4f6; padding: 8px; margin: 4px 0; border-radius: 4px; font-size: 14px; font-style: italic; }
.insights .insight-title { font-size: 16px; margin: 16px 0 8px; }
.note { color: #6b7280; font-style: italic; }
.positive .section-title { color: #059669; }
.negative .section-title { color: #dc2626; }
"#;

/// Renders the outline as a single HTML5 document.
pub fn render_html(outline: &ReportOutline) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("<title>{}</title>\n", encode_text(&outline.title)));
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<header class=\"header\">\n");
    html.push_str(&format!(
        "<h1 class=\"title\">{}</h1>\n",
        encode_text(&outline.title)
    ));
    for line in &outline.meta {
        html.push_str(&format!("<p class=\"date\">{}</p>\n", encode_text(line)));
    }
    html.push_str("</header>\n");

    for section in &outline.sections {
        html.push_str(&format!("<section class=\"section {}\">\n", section.class));
        html.push_str(&format!(
            "<h2 class=\"section-title\">{}</h2>\n",
            encode_text(&section.heading)
        ));
        for block in &section.blocks {
            push_block(&mut html, block);
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_block(html: &mut String, block: &Block) {
    match block {
        Block::Stat(text) => {
            html.push_str(&format!("<p class=\"stat\">{}</p>\n", encode_text(text)));
        }
        Block::Keyword { label, samples } => {
            html.push_str("<div class=\"keyword-item\">\n");
            html.push_str(&format!(
                "<p class=\"keyword-name\">{}</p>\n",
                encode_text(label)
            ));
            html.push_str("<ul class=\"sample-reviews\">\n");
            for sample in samples {
                html.push_str(&format!(
                    "<li class=\"sample-review\">{}</li>\n",
                    encode_text(sample)
                ));
            }
            html.push_str("</ul>\n</div>\n");
        }
        Block::SubHeading(text) => {
            html.push_str(&format!(
                "<h3 class=\"insight-title\">{}</h3>\n",
                encode_text(text)
            ));
        }
        Block::Paragraph(text) => {
            html.push_str(&format!("<p>{}</p>\n", encode_text(text)));
        }
        Block::Note(text) => {
            html.push_str(&format!("<p class=\"note\">{}</p>\n", encode_text(text)));
        }
        Block::List(items) => {
            html.push_str("<ul>\n");
            for item in items {
                html.push_str(&format!("<li>{}</li>\n", encode_text(item)));
            }
            html.push_str("</ul>\n");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::render::outline::tests::{
        empty_content_result, generated_on, sample_result, zero_count_result,
    };
    use crate::render::outline::NO_KEYWORDS;

    /// Text nodes of `<body>` in document order, entity-decoded and trimmed.
    pub(crate) fn body_text(html: &str) -> Vec<String> {
        let start = html.find("<body>").expect("body open") + "<body>".len();
        let end = html.rfind("</body>").expect("body close");
        let body = &html[start..end];

        let mut lines = Vec::new();
        let mut rest = body;
        while !rest.is_empty() {
            let next_tag = rest.find('<').unwrap_or(rest.len());
            let text = rest[..next_tag].trim();
            if !text.is_empty() {
                lines.push(html_escape::decode_html_entities(text).into_owned());
            }
            rest = &rest[next_tag..];
            match rest.find('>') {
                Some(close) => rest = &rest[close + 1..],
                None => break,
            }
        }
        lines
    }

    fn rendered() -> String {
        render_html(&ReportOutline::from_result(&sample_result(), generated_on()))
    }

    #[test]
    fn test_body_text_matches_outline() {
        let outline = ReportOutline::from_result(&sample_result(), generated_on());
        let expected: Vec<String> = outline
            .text_lines()
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(body_text(&render_html(&outline)), expected);
    }

    #[test]
    fn test_document_is_self_contained() {
        let html = rendered();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("src="));
        assert!(!html.contains("href="));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = rendered();
        assert!(html.contains("화면이 &lt;선명&gt;해요 &amp; 밝아요"));
        assert!(!html.contains("<선명>"));
    }

    #[test]
    fn test_summary_shows_percentages() {
        let html = rendered();
        assert!(html.contains("긍정 리뷰: 7개 (70.0%)"));
        assert!(html.contains("부정 리뷰: 3개 (30.0%)"));
    }

    #[test]
    fn test_zero_total_shows_zero_percent() {
        let html = render_html(&ReportOutline::from_result(&zero_count_result(), generated_on()));
        assert!(html.contains("긍정 리뷰: 0개 (0.0%)"));
        assert!(html.contains("부정 리뷰: 0개 (0.0%)"));
        assert!(!html.contains("NaN"));
    }

    #[test]
    fn test_empty_keywords_and_insights_render_placeholders() {
        let html = render_html(&ReportOutline::from_result(
            &empty_content_result(),
            generated_on(),
        ));
        let note = format!("<p class=\"note\">{NO_KEYWORDS}</p>");
        assert_eq!(html.matches(&note).count(), 2);
        assert!(!html.contains("keyword-item"));
        assert!(html.contains("<h3 class=\"insight-title\">개선 아이디어</h3>"));
        assert!(html.contains("<ul>\n</ul>"));

        let lines = body_text(&html);
        let ideas = lines.iter().position(|l| l == "개선 아이디어").unwrap();
        assert_eq!(lines[ideas + 1], "마케팅 전략");
        assert_eq!(lines[ideas + 2], "홍보 카피");
        assert_eq!(lines.last().map(String::as_str), Some("홍보 카피"));
    }

    #[test]
    fn test_ideas_and_copies_keep_list_semantics() {
        let html = rendered();
        assert!(html.contains("<li>배터리 최적화</li>"));
        assert!(html.contains("<li>\"하루 만에 도착\"</li>"));
    }
}
