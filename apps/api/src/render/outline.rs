//! Report outline: the ordered, format-neutral content of a report.
//!
//! Both the HTML and the DOCX writers walk the same outline, so their text content
//! matches line for line. All derived values (percentages, quoted samples, split
//! marketing paragraphs) are computed here and nowhere else.

use chrono::NaiveDate;

use crate::analysis::models::{format_percentage, AnalysisResult, Keyword};

pub const SUMMARY_HEADING: &str = "분석 개요";
pub const POSITIVE_HEADING: &str = "긍정 키워드";
pub const NEGATIVE_HEADING: &str = "부정 키워드";
pub const INSIGHTS_HEADING: &str = "인사이트 및 제안";
pub const IDEAS_HEADING: &str = "개선 아이디어";
pub const STRATEGY_HEADING: &str = "마케팅 전략";
pub const PROMO_HEADING: &str = "홍보 카피";
pub const NO_KEYWORDS: &str = "키워드 없음";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutline {
    pub title: String,
    pub generated_on: NaiveDate,
    /// Lines under the title: generation date, then analysis date when present.
    pub meta: Vec<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    /// Styling hook for the HTML writer ("summary", "positive", "negative", "insights").
    pub class: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Stat(String),
    Keyword { label: String, samples: Vec<String> },
    SubHeading(String),
    Paragraph(String),
    Note(String),
    List(Vec<String>),
}

impl ReportOutline {
    pub fn from_result(result: &AnalysisResult, generated_on: NaiveDate) -> Self {
        let mut meta = vec![format!("생성일: {}", display_date(generated_on))];
        let analysis_date = clean(result.analysis_date.trim());
        if !analysis_date.is_empty() {
            meta.push(format!("분석일: {analysis_date}"));
        }

        let summary = Section {
            heading: SUMMARY_HEADING.to_string(),
            class: "summary",
            blocks: vec![
                Block::Stat(format!("전체 리뷰: {}개", result.total_review_count)),
                Block::Stat(format!(
                    "긍정 리뷰: {}개 ({})",
                    result.positive_review_count,
                    format_percentage(result.positive_percentage())
                )),
                Block::Stat(format!(
                    "부정 리뷰: {}개 ({})",
                    result.negative_review_count,
                    format_percentage(result.negative_percentage())
                )),
            ],
        };

        let insights = &result.insights;
        let mut insight_blocks = vec![
            Block::SubHeading(IDEAS_HEADING.to_string()),
            Block::List(insights.improvement_ideas.iter().map(|i| clean(i)).collect()),
            Block::SubHeading(STRATEGY_HEADING.to_string()),
        ];
        insight_blocks.extend(
            insights
                .marketing_paragraphs()
                .into_iter()
                .map(|p| Block::Paragraph(clean(p))),
        );
        insight_blocks.push(Block::SubHeading(PROMO_HEADING.to_string()));
        insight_blocks.push(Block::List(
            insights.promo_copies.iter().map(|c| quote(c)).collect(),
        ));

        ReportOutline {
            title: format!("{} 리뷰 분석 결과", clean(&result.product)),
            generated_on,
            meta,
            sections: vec![
                summary,
                keyword_section(POSITIVE_HEADING, "positive", &result.positive_keywords),
                keyword_section(NEGATIVE_HEADING, "negative", &result.negative_keywords),
                Section {
                    heading: INSIGHTS_HEADING.to_string(),
                    class: "insights",
                    blocks: insight_blocks,
                },
            ],
        }
    }

    /// Every text line in display order. The reference for cross-format comparisons.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        lines.extend(self.meta.iter().cloned());
        for section in &self.sections {
            lines.push(section.heading.clone());
            for block in &section.blocks {
                match block {
                    Block::Stat(text)
                    | Block::SubHeading(text)
                    | Block::Paragraph(text)
                    | Block::Note(text) => lines.push(text.clone()),
                    Block::Keyword { label, samples } => {
                        lines.push(label.clone());
                        lines.extend(samples.iter().cloned());
                    }
                    Block::List(items) => lines.extend(items.iter().cloned()),
                }
            }
        }
        lines
    }
}

fn keyword_section(heading: &str, class: &'static str, keywords: &[Keyword]) -> Section {
    let blocks = if keywords.is_empty() {
        vec![Block::Note(NO_KEYWORDS.to_string())]
    } else {
        keywords
            .iter()
            .map(|k| Block::Keyword {
                label: format!("{} ({}회 언급)", clean(&k.keyword), k.frequency),
                samples: k.sample_reviews.iter().map(|s| quote(s)).collect(),
            })
            .collect()
    };
    Section {
        heading: heading.to_string(),
        class,
        blocks,
    }
}

/// Korean locale short date, e.g. `2026. 10. 19.`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%Y. %-m. %-d.").to_string()
}

fn quote(text: &str) -> String {
    format!("\"{}\"", clean(text))
}

/// Drops control characters other than tab and newline; XML 1.0 cannot carry them.
fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analysis::models::Insights;

    pub(crate) fn sample_result() -> AnalysisResult {
        AnalysisResult {
            product: "갤럭시 S24".to_string(),
            analysis_date: "2026-10-18".to_string(),
            total_review_count: 10,
            positive_review_count: 7,
            negative_review_count: 3,
            positive_keywords: vec![
                Keyword {
                    keyword: "배송".to_string(),
                    frequency: 5,
                    sample_reviews: vec!["배송이 빨라요".to_string(), "하루만에 왔어요".to_string()],
                },
                Keyword {
                    keyword: "화면".to_string(),
                    frequency: 3,
                    sample_reviews: vec!["화면이 <선명>해요 & 밝아요".to_string()],
                },
            ],
            negative_keywords: vec![Keyword {
                keyword: "배터리".to_string(),
                frequency: 4,
                sample_reviews: vec!["배터리가 빨리 닳아요".to_string()],
            }],
            insights: Insights {
                improvement_ideas: vec!["배터리 최적화".to_string(), "케이스 동봉".to_string()],
                marketing_strategy: "빠른 배송을 강조한다.\n\n  선명한 화면을 내세운다.  \n\n\n"
                    .to_string(),
                promo_copies: vec!["하루 만에 도착".to_string(), "선명함의 끝".to_string()],
            },
        }
    }

    /// Counts all zero; content otherwise unchanged.
    pub(crate) fn zero_count_result() -> AnalysisResult {
        AnalysisResult {
            total_review_count: 0,
            positive_review_count: 0,
            negative_review_count: 0,
            ..sample_result()
        }
    }

    /// No keywords, no ideas, blank strategy, no copies.
    pub(crate) fn empty_content_result() -> AnalysisResult {
        AnalysisResult {
            positive_keywords: vec![],
            negative_keywords: vec![],
            insights: Insights {
                improvement_ideas: vec![],
                marketing_strategy: "  \n\n ".to_string(),
                promo_copies: vec![],
            },
            ..sample_result()
        }
    }

    pub(crate) fn all_results() -> Vec<AnalysisResult> {
        vec![sample_result(), zero_count_result(), empty_content_result()]
    }

    pub(crate) fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_outline_follows_fixed_order() {
        let lines = ReportOutline::from_result(&sample_result(), generated_on()).text_lines();
        let expected = vec![
            "갤럭시 S24 리뷰 분석 결과",
            "생성일: 2026. 10. 19.",
            "분석일: 2026-10-18",
            "분석 개요",
            "전체 리뷰: 10개",
            "긍정 리뷰: 7개 (70.0%)",
            "부정 리뷰: 3개 (30.0%)",
            "긍정 키워드",
            "배송 (5회 언급)",
            "\"배송이 빨라요\"",
            "\"하루만에 왔어요\"",
            "화면 (3회 언급)",
            "\"화면이 <선명>해요 & 밝아요\"",
            "부정 키워드",
            "배터리 (4회 언급)",
            "\"배터리가 빨리 닳아요\"",
            "인사이트 및 제안",
            "개선 아이디어",
            "배터리 최적화",
            "케이스 동봉",
            "마케팅 전략",
            "빠른 배송을 강조한다.",
            "선명한 화면을 내세운다.",
            "홍보 카피",
            "\"하루 만에 도착\"",
            "\"선명함의 끝\"",
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_zero_total_renders_zero_percent() {
        let lines = ReportOutline::from_result(&zero_count_result(), generated_on()).text_lines();
        assert!(lines.contains(&"긍정 리뷰: 0개 (0.0%)".to_string()));
        assert!(lines.contains(&"부정 리뷰: 0개 (0.0%)".to_string()));
        assert!(!lines.iter().any(|l| l.contains("NaN") || l.contains("inf")));
    }

    #[test]
    fn test_empty_keyword_sets_render_a_note() {
        let mut result = sample_result();
        result.positive_keywords.clear();
        result.negative_keywords.clear();

        let outline = ReportOutline::from_result(&result, generated_on());
        assert_eq!(
            outline.sections[1].blocks,
            vec![Block::Note(NO_KEYWORDS.to_string())]
        );
        assert_eq!(
            outline.sections[2].blocks,
            vec![Block::Note(NO_KEYWORDS.to_string())]
        );
    }

    #[test]
    fn test_blank_analysis_date_is_omitted() {
        let mut result = sample_result();
        result.analysis_date = "  ".to_string();
        let outline = ReportOutline::from_result(&result, generated_on());
        assert_eq!(outline.meta, vec!["생성일: 2026. 10. 19."]);
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let mut result = sample_result();
        result.product = "X\u{0007}1".to_string();
        let outline = ReportOutline::from_result(&result, generated_on());
        assert_eq!(outline.title, "X1 리뷰 분석 결과");
    }

    #[test]
    fn test_display_date_uses_unpadded_korean_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(display_date(date), "2026. 3. 5.");
    }
}
