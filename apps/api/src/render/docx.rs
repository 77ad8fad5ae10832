//! Minimal WordprocessingML package writer for reports.
//!
//! Emits a fixed set of parts into a zip container. Entry timestamps are pinned so the
//! same outline always produces the same bytes.

use std::io::{Cursor, Write};

use html_escape::encode_text;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::outline::{Block, ReportOutline};
use crate::render::RenderError;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Numbering instance bound to the bullet definition in numbering.xml.
const BULLET_NUM_ID: u32 = 1;

const CONTENT_TYPES: &str = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Malgun Gothic" w:hAnsi="Malgun Gothic" w:eastAsia="Malgun Gothic" w:cs="Malgun Gothic"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="ko-KR" w:eastAsia="ko-KR"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="200"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Subtitle"><w:name w:val="Subtitle"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:rPr><w:color w:val="666666"/><w:sz w:val="20"/><w:szCs w:val="20"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="400" w:after="200"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="100"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:ind w:left="720"/></w:pPr></w:style></w:styles>"#;

const NUMBERING: &str = r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#;

#[derive(Default, Clone, Copy)]
struct ParagraphStyle {
    style: Option<&'static str>,
    bullet: bool,
    bold: bool,
    italic: bool,
}

impl ParagraphStyle {
    fn styled(style: &'static str) -> Self {
        Self {
            style: Some(style),
            ..Default::default()
        }
    }
}

/// Packages the outline as a .docx byte stream.
pub fn render_docx(outline: &ReportOutline) -> Result<Vec<u8>, RenderError> {
    let parts: [(&str, String); 7] = [
        ("[Content_Types].xml", with_decl(CONTENT_TYPES)),
        ("_rels/.rels", with_decl(PACKAGE_RELS)),
        ("docProps/core.xml", core_properties(outline)),
        ("word/document.xml", document_xml(outline)),
        ("word/_rels/document.xml.rels", with_decl(DOCUMENT_RELS)),
        ("word/styles.xml", with_decl(STYLES)),
        ("word/numbering.xml", with_decl(NUMBERING)),
    ];

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }
    Ok(zip.finish()?.into_inner())
}

fn with_decl(body: &str) -> String {
    format!("{XML_DECL}\n{body}")
}

fn core_properties(outline: &ReportOutline) -> String {
    format!(
        "{XML_DECL}\n<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"><dc:title>{}</dc:title><dc:language>ko-KR</dc:language><dcterms:created xsi:type=\"dcterms:W3CDTF\">{}T00:00:00Z</dcterms:created></cp:coreProperties>",
        encode_text(&outline.title),
        outline.generated_on.format("%Y-%m-%d"),
    )
}

fn document_xml(outline: &ReportOutline) -> String {
    let mut body = String::with_capacity(16 * 1024);

    push_paragraph(&mut body, &outline.title, ParagraphStyle::styled("Title"));
    for line in &outline.meta {
        push_paragraph(&mut body, line, ParagraphStyle::styled("Subtitle"));
    }

    for section in &outline.sections {
        push_paragraph(&mut body, &section.heading, ParagraphStyle::styled("Heading1"));
        for block in &section.blocks {
            match block {
                Block::Stat(text) | Block::Paragraph(text) => {
                    push_paragraph(&mut body, text, ParagraphStyle::default());
                }
                Block::Note(text) => push_paragraph(
                    &mut body,
                    text,
                    ParagraphStyle {
                        italic: true,
                        ..Default::default()
                    },
                ),
                Block::SubHeading(text) => {
                    push_paragraph(&mut body, text, ParagraphStyle::styled("Heading2"));
                }
                Block::Keyword { label, samples } => {
                    push_paragraph(
                        &mut body,
                        label,
                        ParagraphStyle {
                            bold: true,
                            ..Default::default()
                        },
                    );
                    for sample in samples {
                        push_paragraph(
                            &mut body,
                            sample,
                            ParagraphStyle {
                                style: Some("ListParagraph"),
                                italic: true,
                                ..Default::default()
                            },
                        );
                    }
                }
                Block::List(items) => {
                    for item in items {
                        push_paragraph(
                            &mut body,
                            item,
                            ParagraphStyle {
                                style: Some("ListParagraph"),
                                bullet: true,
                                ..Default::default()
                            },
                        );
                    }
                }
            }
        }
    }

    format!(
        "{XML_DECL}\n<w:document xmlns:w=\"{W_NS}\"><w:body>{body}{SECTION_PROPERTIES}</w:body></w:document>"
    )
}

fn push_paragraph(xml: &mut String, text: &str, style: ParagraphStyle) {
    xml.push_str("<w:p>");
    if style.style.is_some() || style.bullet {
        xml.push_str("<w:pPr>");
        if let Some(id) = style.style {
            xml.push_str(&format!("<w:pStyle w:val=\"{id}\"/>"));
        }
        if style.bullet {
            xml.push_str(&format!(
                "<w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{BULLET_NUM_ID}\"/></w:numPr>"
            ));
        }
        xml.push_str("</w:pPr>");
    }
    xml.push_str("<w:r>");
    if style.bold || style.italic {
        xml.push_str("<w:rPr>");
        if style.bold {
            xml.push_str("<w:b/>");
        }
        if style.italic {
            xml.push_str("<w:i/>");
        }
        xml.push_str("</w:rPr>");
    }
    xml.push_str(&format!(
        "<w:t xml:space=\"preserve\">{}</w:t>",
        encode_text(text)
    ));
    xml.push_str("</w:r></w:p>");
}
