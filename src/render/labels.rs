//! Text labels, rasterised once through `usvg`/`resvg` and reused as image sprites.
//!
//! The CPU backend has no text shaping of its own, so each distinct label is drawn into a small
//! premultiplied RGBA8 buffer from an SVG `<text>` node and blitted next to its marker per frame.
//! Fonts come from the system font database; when no face is available the sprite is simply
//! transparent.

use std::sync::{Arc, OnceLock};

use anyhow::Context as _;

use crate::foundation::{
    core::Rgba8,
    error::{OrreryError, OrreryResult},
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabelKey {
    pub text: String,
    /// Font size in 1/64 px so the key stays hashable.
    pub size_q6: u32,
    pub color: Rgba8,
}

impl LabelKey {
    pub fn new(text: &str, size_px: f64, color: Rgba8) -> Self {
        Self {
            text: text.to_string(),
            size_q6: (size_px.max(0.0) * 64.0).round() as u32,
            color,
        }
    }

    pub fn size_px(&self) -> f64 {
        f64::from(self.size_q6) / 64.0
    }
}

pub struct LabelSprite {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

pub fn label_svg(key: &LabelKey) -> (String, u32, u32) {
    let size = key.size_px().max(1.0);
    let chars = key.text.chars().count().max(1) as f64;
    let width = (chars * size * 0.62).ceil() as u32 + 4;
    let height = (size * 1.4).ceil() as u32;
    let baseline = size * 1.05;

    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<text x="1" y="{baseline:.2}" font-family="DejaVu Sans, Liberation Sans, Arial, sans-serif" "#,
            r#"font-size="{size:.2}" fill="{fill}" fill-opacity="{opacity:.3}">{text}</text></svg>"#
        ),
        w = width,
        h = height,
        baseline = baseline,
        size = size,
        fill = key.color.to_hex(),
        opacity = f64::from(key.color.a) / 255.0,
        text = escape_xml(&key.text),
    );
    (svg, width, height)
}

pub fn rasterize_label(key: &LabelKey) -> OrreryResult<LabelSprite> {
    let (svg, width, height) = label_svg(key);

    let opts = usvg::Options {
        fontdb: shared_fontdb(),
        font_resolver: make_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts)
        .with_context(|| format!("parse label svg for '{}'", key.text))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| OrreryError::render("failed to allocate label pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    Ok(LabelSprite {
        width,
        height,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

/// System fonts are loaded once per process; every backend shares the database.
fn shared_fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTDB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTDB
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts for labels");
            Arc::new(db)
        })
        .clone()
}

fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            // Any face beats a missing label.
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/labels.rs"]
mod tests;
