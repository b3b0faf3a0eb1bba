//! PPTX rendering: a `ValidatedDeck` in, an OOXML package out.
//!
//! The package is assembled by hand with `zip` and XML templates, escaping
//! text with quick-xml. Slide 1 gets the title treatment (dark background,
//! large centered heading, subtitle, accent bar); slides 2..=7 get a header
//! plus bullet list, a per-slide emoji marker, and a background color drawn
//! from a fixed palette with a topic-seeded RNG, so styling is randomized
//! but stable for a given run.
//!
//! Rendering never fails on a validated deck; only the final file write can
//! error, surfaced as [`DeckError::FileWrite`].

use crate::error::DeckError;
use crate::log_debug;
use crate::schema::{Slide, ValidatedDeck};
use quick_xml::escape::escape;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::fmt::Write as _;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::LazyLock;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Decorative bullet markers, cycled per slide index.
const EMOJIS: [&str; 5] = ["\u{2705}", "\u{1F4C8}", "\u{1F511}", "\u{1F4CA}", "\u{1F4A1}"];

/// Content slide background palette: light blue, light gray, soft peach,
/// light green, ivory.
const COLOR_PALETTE: [&str; 5] = ["E6F0FA", "F5F5F5", "FAF0E6", "F0FAF0", "FFFFF0"];

/// Title slide background (dark navy) and heading/body colors.
const TITLE_BG: &str = "193264";
const HEADING_COLOR: &str = "003366";
const BODY_COLOR: &str = "323232";
const ACCENT_COLOR: &str = "8A2BE2";

const MAX_FILENAME_LEN: usize = 120;

static ILLEGAL_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("filename regex is valid"));

/// Strips characters illegal on common filesystems, collapses whitespace to
/// underscores, and bounds the length.
pub fn sanitize_filename(name: &str) -> String {
    let collapsed = name.trim().split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = ILLEGAL_FILENAME_CHARS.replace_all(&collapsed, "");
    let bounded: String = cleaned.chars().take(MAX_FILENAME_LEN).collect();
    if bounded.is_empty() {
        "deck".to_string()
    } else {
        bounded
    }
}

/// Default output filename for a topic, with the `.pptx` suffix enforced.
pub fn default_outfile(topic: &str) -> String {
    with_pptx_suffix(&sanitize_filename(topic))
}

/// Appends `.pptx` unless the name already carries it.
pub fn with_pptx_suffix(name: &str) -> String {
    if name.to_lowercase().ends_with(".pptx") {
        name.to_string()
    } else {
        format!("{name}.pptx")
    }
}

/// Renders the deck and writes it to `path`.
pub fn write_pptx(deck: &ValidatedDeck, topic: &str, path: &Path) -> Result<(), DeckError> {
    let bytes = render_pptx(deck, topic);
    log_debug!("Writing {} bytes to {}", bytes.len(), path.display());
    std::fs::write(path, bytes).map_err(|source| DeckError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders the deck to PPTX bytes in memory.
pub fn render_pptx(deck: &ValidatedDeck, topic: &str) -> Vec<u8> {
    let slides = deck.slides();
    let mut rng = StdRng::seed_from_u64(topic_seed(topic));

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let put = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, content: &str| {
        zip.start_file(name, options)
            .expect("in-memory zip entry should start");
        zip.write_all(content.as_bytes())
            .expect("in-memory zip entry should write");
    };

    put(&mut zip, "[Content_Types].xml", &content_types_xml(slides));
    put(&mut zip, "_rels/.rels", PACKAGE_RELS);
    put(&mut zip, "docProps/core.xml", &core_props_xml(topic));
    put(&mut zip, "docProps/app.xml", APP_PROPS);
    put(&mut zip, "ppt/presentation.xml", &presentation_xml(slides));
    put(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &presentation_rels(slides),
    );
    put(&mut zip, "ppt/theme/theme1.xml", THEME_XML);
    put(&mut zip, "ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER);
    put(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        SLIDE_MASTER_RELS,
    );
    put(
        &mut zip,
        "ppt/slideLayouts/slideLayout1.xml",
        &layout_xml("title"),
    );
    put(
        &mut zip,
        "ppt/slideLayouts/slideLayout2.xml",
        &layout_xml("obj"),
    );
    put(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        LAYOUT_RELS,
    );
    put(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout2.xml.rels",
        LAYOUT_RELS,
    );
    put(&mut zip, "ppt/notesMasters/notesMaster1.xml", NOTES_MASTER);
    put(
        &mut zip,
        "ppt/notesMasters/_rels/notesMaster1.xml.rels",
        NOTES_MASTER_RELS,
    );

    for (index, slide) in slides.iter().enumerate() {
        let number = index + 1;
        let xml = if index == 0 {
            title_slide_xml(slide)
        } else {
            let background = COLOR_PALETTE[rng.random_range(0..COLOR_PALETTE.len())];
            content_slide_xml(slide, index, background)
        };
        put(&mut zip, &format!("ppt/slides/slide{number}.xml"), &xml);
        put(
            &mut zip,
            &format!("ppt/slides/_rels/slide{number}.xml.rels"),
            &slide_rels(index, slide),
        );

        if !slide.notes.is_empty() {
            put(
                &mut zip,
                &format!("ppt/notesSlides/notesSlide{number}.xml"),
                &notes_slide_xml(slide),
            );
            put(
                &mut zip,
                &format!("ppt/notesSlides/_rels/notesSlide{number}.xml.rels"),
                &notes_slide_rels(number),
            );
        }
    }

    zip.finish()
        .expect("in-memory zip should finalize")
        .into_inner()
}

/// Stable per-topic seed for background styling.
fn topic_seed(topic: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    topic.hash(&mut hasher);
    hasher.finish()
}

fn xml_text(text: &str) -> String {
    escape(text).into_owned()
}

// ---------------------------------------------------------------------------
// Package-level parts
// ---------------------------------------------------------------------------

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

fn content_types_xml(slides: &[Slide]) -> String {
    let mut overrides = String::new();
    for (index, slide) in slides.iter().enumerate() {
        let number = index + 1;
        let _ = write!(
            &mut overrides,
            "<Override PartName=\"/ppt/slides/slide{number}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>"
        );
        if !slide.notes.is_empty() {
            let _ = write!(
                &mut overrides,
                "<Override PartName=\"/ppt/notesSlides/notesSlide{number}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml\"/>"
            );
        }
    }

    format!(
        "{XML_DECL}\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
<Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
<Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
<Override PartName=\"/ppt/slideLayouts/slideLayout2.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
<Override PartName=\"/ppt/notesMasters/notesMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml\"/>\
<Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>\
{overrides}\
</Types>"
    )
}

const PACKAGE_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"ppt/presentation.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
<Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties\" Target=\"docProps/app.xml\"/>\
</Relationships>";

fn core_props_xml(topic: &str) -> String {
    format!(
        "{XML_DECL}\
<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\
<dc:title>{}</dc:title>\
<dc:creator>autodeck</dc:creator>\
</cp:coreProperties>",
        xml_text(topic)
    )
}

const APP_PROPS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\
<Application>autodeck</Application>\
</Properties>";

fn presentation_xml(slides: &[Slide]) -> String {
    let mut slide_ids = String::new();
    for index in 0..slides.len() {
        let _ = write!(
            &mut slide_ids,
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            256 + index,
            2 + index
        );
    }
    let notes_master_rid = 2 + slides.len();

    format!(
        "{XML_DECL}\
<p:presentation xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
<p:notesMasterIdLst><p:notesMasterId r:id=\"rId{notes_master_rid}\"/></p:notesMasterIdLst>\
<p:sldIdLst>{slide_ids}</p:sldIdLst>\
<p:sldSz cx=\"9144000\" cy=\"6858000\"/>\
<p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
</p:presentation>"
    )
}

fn presentation_rels(slides: &[Slide]) -> String {
    let mut rels = String::from(
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>",
    );
    for index in 0..slides.len() {
        let _ = write!(
            &mut rels,
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"slides/slide{}.xml\"/>",
            2 + index,
            index + 1
        );
    }
    let _ = write!(
        &mut rels,
        "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster\" Target=\"notesMasters/notesMaster1.xml\"/>",
        2 + slides.len()
    );
    let _ = write!(
        &mut rels,
        "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"theme/theme1.xml\"/>",
        3 + slides.len()
    );

    format!(
        "{XML_DECL}\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{rels}</Relationships>"
    )
}

// ---------------------------------------------------------------------------
// Master, layouts, theme
// ---------------------------------------------------------------------------

const EMPTY_SP_TREE: &str = "<p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
</p:spTree>";

const SLIDE_MASTER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<p:sldMaster xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
</p:spTree></p:cSld>\
<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" \
accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
<p:sldLayoutIdLst>\
<p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/>\
<p:sldLayoutId id=\"2147483650\" r:id=\"rId2\"/>\
</p:sldLayoutIdLst>\
</p:sldMaster>";

const SLIDE_MASTER_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout2.xml\"/>\
<Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\
</Relationships>";

fn layout_xml(layout_type: &str) -> String {
    format!(
        "{XML_DECL}\
<p:sldLayout xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\" type=\"{layout_type}\">\
<p:cSld>{EMPTY_SP_TREE}</p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sldLayout>"
    )
}

const LAYOUT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
</Relationships>";

const NOTES_MASTER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<p:notesMaster xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
</p:spTree></p:cSld>\
<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" \
accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
</p:notesMaster>";

const NOTES_MASTER_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\
</Relationships>";

const THEME_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<a:theme xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" name=\"Office Theme\">\
<a:themeElements>\
<a:clrScheme name=\"Office\">\
<a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
<a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
<a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
<a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
<a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
<a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
<a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
<a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
<a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
<a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
<a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
<a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
</a:clrScheme>\
<a:fontScheme name=\"Office\">\
<a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
<a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
</a:fontScheme>\
<a:fmtScheme name=\"Office\">\
<a:fillStyleLst>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
</a:fillStyleLst>\
<a:lnStyleLst>\
<a:ln w=\"6350\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
<a:ln w=\"12700\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
<a:ln w=\"19050\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
</a:lnStyleLst>\
<a:effectStyleLst>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
</a:effectStyleLst>\
<a:bgFillStyleLst>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
</a:bgFillStyleLst>\
</a:fmtScheme>\
</a:themeElements>\
</a:theme>";

// ---------------------------------------------------------------------------
// Slides
// ---------------------------------------------------------------------------

const SLIDE_NS: &str = "xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\"";

fn background_xml(color: &str) -> String {
    format!(
        "<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"
    )
}

/// Slide 1: dark background, large centered white heading, gray italic
/// tagline, and a purple accent bar under the heading.
fn title_slide_xml(slide: &Slide) -> String {
    let title = xml_text(&slide.title);
    let background = background_xml(TITLE_BG);

    format!(
        "{XML_DECL}\
<p:sld {SLIDE_NS}>\
<p:cSld>{background}<p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
<p:sp>\
<p:nvSpPr><p:cNvPr id=\"2\" name=\"Title 1\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
<p:nvPr><p:ph type=\"ctrTitle\"/></p:nvPr></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"685800\" y=\"2130425\"/><a:ext cx=\"7772400\" cy=\"1470025\"/></a:xfrm></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/>\
<a:p><a:pPr algn=\"ctr\"/>\
<a:r><a:rPr lang=\"en-US\" sz=\"4400\" b=\"1\"><a:solidFill><a:srgbClr val=\"FFFFFF\"/></a:solidFill></a:rPr>\
<a:t>{title}</a:t></a:r></a:p>\
</p:txBody>\
</p:sp>\
<p:sp>\
<p:nvSpPr><p:cNvPr id=\"3\" name=\"Accent Bar\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"685800\" y=\"3692525\"/><a:ext cx=\"7772400\" cy=\"137160\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\
<a:solidFill><a:srgbClr val=\"{ACCENT_COLOR}\"/></a:solidFill><a:ln><a:noFill/></a:ln></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody>\
</p:sp>\
<p:sp>\
<p:nvSpPr><p:cNvPr id=\"4\" name=\"Subtitle\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"4572000\" y=\"5943600\"/><a:ext cx=\"2743200\" cy=\"457200\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/>\
<a:p><a:r><a:rPr lang=\"en-US\" sz=\"2000\" i=\"1\"><a:solidFill><a:srgbClr val=\"C8C8C8\"/></a:solidFill></a:rPr>\
<a:t>Auto-Generated Deck \u{2022} Powered by AI</a:t></a:r></a:p>\
</p:txBody>\
</p:sp>\
</p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sld>"
    )
}

/// Slides 2..=7: underlined navy header plus an emoji-marked bullet list.
fn content_slide_xml(slide: &Slide, slide_index: usize, background_color: &str) -> String {
    let title = xml_text(&slide.title);
    let background = background_xml(background_color);
    let emoji = EMOJIS[slide_index % EMOJIS.len()];

    let mut paragraphs = String::new();
    for bullet in &slide.bullets {
        let text = xml_text(&format!("{emoji} {bullet}"));
        let _ = write!(
            &mut paragraphs,
            "<a:p><a:pPr><a:buNone/></a:pPr>\
<a:r><a:rPr lang=\"en-US\" sz=\"2000\"><a:solidFill><a:srgbClr val=\"{BODY_COLOR}\"/></a:solidFill></a:rPr>\
<a:t>{text}</a:t></a:r></a:p>"
        );
    }
    if paragraphs.is_empty() {
        paragraphs.push_str("<a:p/>");
    }

    format!(
        "{XML_DECL}\
<p:sld {SLIDE_NS}>\
<p:cSld>{background}<p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
<p:sp>\
<p:nvSpPr><p:cNvPr id=\"2\" name=\"Title 1\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
<p:nvPr><p:ph type=\"title\"/></p:nvPr></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"457200\" y=\"274638\"/><a:ext cx=\"8229600\" cy=\"1143000\"/></a:xfrm></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/>\
<a:p><a:r><a:rPr lang=\"en-US\" sz=\"3000\" b=\"1\" u=\"sng\"><a:solidFill><a:srgbClr val=\"{HEADING_COLOR}\"/></a:solidFill></a:rPr>\
<a:t>{title}</a:t></a:r></a:p>\
</p:txBody>\
</p:sp>\
<p:sp>\
<p:nvSpPr><p:cNvPr id=\"3\" name=\"Content 2\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
<p:nvPr><p:ph type=\"body\" idx=\"1\"/></p:nvPr></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"457200\" y=\"1600200\"/><a:ext cx=\"8229600\" cy=\"4525963\"/></a:xfrm></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody>\
</p:sp>\
</p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sld>"
    )
}

fn slide_rels(index: usize, slide: &Slide) -> String {
    let layout = if index == 0 {
        "slideLayout1"
    } else {
        "slideLayout2"
    };
    let mut rels = format!(
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/{layout}.xml\"/>"
    );
    if !slide.notes.is_empty() {
        let _ = write!(
            &mut rels,
            "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide\" Target=\"../notesSlides/notesSlide{}.xml\"/>",
            index + 1
        );
    }
    format!(
        "{XML_DECL}\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{rels}</Relationships>"
    )
}

fn notes_slide_xml(slide: &Slide) -> String {
    let notes = xml_text(&slide.notes);
    format!(
        "{XML_DECL}\
<p:notes {SLIDE_NS}>\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
<p:sp>\
<p:nvSpPr><p:cNvPr id=\"2\" name=\"Notes Placeholder\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
<p:nvPr><p:ph type=\"body\" idx=\"1\"/></p:nvPr></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"685800\" y=\"4572000\"/><a:ext cx=\"5486400\" cy=\"3600000\"/></a:xfrm></p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/>\
<a:p><a:r><a:rPr lang=\"en-US\" sz=\"1200\"/><a:t>{notes}</a:t></a:r></a:p>\
</p:txBody>\
</p:sp>\
</p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:notes>"
    )
}

fn notes_slide_rels(slide_number: usize) -> String {
    format!(
        "{XML_DECL}\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster\" Target=\"../notesMasters/notesMaster1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"../slides/slide{slide_number}.xml\"/>\
</Relationships>"
    )
}
