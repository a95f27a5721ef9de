//! Typeface fonts and outline text geometry.
//!
//! The font resource is a typeface JSON document: a `glyphs` map from a single
//! character to its horizontal advance (`ha`) and an outline command string
//! (`o`) in font units. Outlines are flattened into polylines once at load
//! time; labels are then drawn as line lists.

use fnv::FnvHashMap;
use glam::{Vec2, Vec3};
use serde::Deserialize;
use std::collections::HashMap;

/// Straight segments used to approximate each quadratic or cubic curve.
const CURVE_SEGMENTS: usize = 6;
/// Advance, as a fraction of the font resolution, for characters with no glyph.
const MISSING_ADVANCE_EM: f32 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum TypefaceError {
    #[error("typeface JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("typeface has no glyphs")]
    NoGlyphs,
    #[error("glyph {glyph:?}: bad outline command {command:?}")]
    Outline { glyph: char, command: String },
    #[error("typeface resolution must be positive, got {0}")]
    Resolution(f32),
}

#[derive(Deserialize)]
struct RawTypeface {
    glyphs: HashMap<String, RawGlyph>,
    #[serde(default = "default_resolution")]
    resolution: f32,
    #[serde(default, rename = "boundingBox")]
    bounding_box: Option<RawBoundingBox>,
    #[serde(default, rename = "underlineThickness")]
    underline_thickness: f32,
}

#[derive(Deserialize)]
struct RawGlyph {
    #[serde(default)]
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

#[derive(Deserialize)]
struct RawBoundingBox {
    #[serde(rename = "yMin")]
    y_min: f32,
    #[serde(rename = "yMax")]
    y_max: f32,
}

fn default_resolution() -> f32 {
    1000.0
}

/// One glyph: advance width and closed contours, in font units.
#[derive(Clone, Debug, Default)]
pub struct Glyph {
    pub advance: f32,
    pub contours: Vec<Vec<Vec2>>,
}

/// Parsed typeface, the opaque font handle consumed by [`TextGeometry::build`].
#[derive(Clone, Debug)]
pub struct Typeface {
    glyphs: FnvHashMap<char, Glyph>,
    resolution: f32,
    line_height: f32,
}

impl Typeface {
    pub fn from_json(json: &str) -> Result<Self, TypefaceError> {
        let raw: RawTypeface = serde_json::from_str(json)?;
        if !raw.resolution.is_finite() || raw.resolution <= 0.0 {
            return Err(TypefaceError::Resolution(raw.resolution));
        }
        let mut glyphs = FnvHashMap::default();
        for (key, g) in raw.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                continue;
            };
            let contours = match g.o.as_deref() {
                Some(o) => parse_outline(ch, o)?,
                None => Vec::new(),
            };
            glyphs.insert(
                ch,
                Glyph {
                    advance: g.ha,
                    contours,
                },
            );
        }
        if glyphs.is_empty() {
            return Err(TypefaceError::NoGlyphs);
        }
        let line_height = match raw.bounding_box {
            Some(b) => b.y_max - b.y_min + raw.underline_thickness,
            None => raw.resolution * 1.2,
        };
        Ok(Self {
            glyphs,
            resolution: raw.resolution,
            line_height,
        })
    }

    #[inline]
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch).or_else(|| self.glyphs.get(&'?'))
    }

    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

fn parse_outline(glyph: char, outline: &str) -> Result<Vec<Vec<Vec2>>, TypefaceError> {
    let bad = |command: &str| TypefaceError::Outline {
        glyph,
        command: command.to_string(),
    };
    let tokens: Vec<&str> = outline.split_whitespace().collect();
    let mut i = 0usize;
    let num = |i: &mut usize, cmd: &str| -> Result<f32, TypefaceError> {
        let v = tokens
            .get(*i)
            .and_then(|t| t.parse::<f32>().ok())
            .ok_or_else(|| bad(cmd))?;
        *i += 1;
        Ok(v)
    };
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    while i < tokens.len() {
        let cmd = tokens[i];
        i += 1;
        match cmd {
            "m" => {
                if current.len() > 1 {
                    contours.push(std::mem::take(&mut current));
                }
                current.clear();
                let x = num(&mut i, cmd)?;
                let y = num(&mut i, cmd)?;
                current.push(Vec2::new(x, y));
            }
            "l" => {
                let x = num(&mut i, cmd)?;
                let y = num(&mut i, cmd)?;
                current.push(Vec2::new(x, y));
            }
            "q" => {
                let end = Vec2::new(num(&mut i, cmd)?, num(&mut i, cmd)?);
                let ctrl = Vec2::new(num(&mut i, cmd)?, num(&mut i, cmd)?);
                let start = *current.last().ok_or_else(|| bad(cmd))?;
                for s in 1..=CURVE_SEGMENTS {
                    let t = s as f32 / CURVE_SEGMENTS as f32;
                    let u = 1.0 - t;
                    current.push(start * (u * u) + ctrl * (2.0 * u * t) + end * (t * t));
                }
            }
            "b" => {
                let end = Vec2::new(num(&mut i, cmd)?, num(&mut i, cmd)?);
                let c1 = Vec2::new(num(&mut i, cmd)?, num(&mut i, cmd)?);
                let c2 = Vec2::new(num(&mut i, cmd)?, num(&mut i, cmd)?);
                let start = *current.last().ok_or_else(|| bad(cmd))?;
                for s in 1..=CURVE_SEGMENTS {
                    let t = s as f32 / CURVE_SEGMENTS as f32;
                    let u = 1.0 - t;
                    current.push(
                        start * (u * u * u)
                            + c1 * (3.0 * u * u * t)
                            + c2 * (3.0 * u * t * t)
                            + end * (t * t * t),
                    );
                }
            }
            "z" => {}
            other => return Err(bad(other)),
        }
    }
    if current.len() > 1 {
        contours.push(current);
    }
    Ok(contours)
}

/// Outline text as a line list (vertex pairs) in the label's local space.
#[derive(Clone, Debug, Default)]
pub struct TextGeometry {
    pub vertices: Vec<Vec3>,
    pub min: Vec3,
    pub max: Vec3,
}

impl TextGeometry {
    /// Lay out `text` at `size` world units per font resolution, starting at
    /// the origin and advancing along +X. Newlines move down one line.
    pub fn build(font: &Typeface, text: &str, size: f32) -> Self {
        let scale = size / font.resolution;
        let mut vertices = Vec::new();
        let mut pen = Vec2::ZERO;
        for ch in text.chars() {
            if ch == '\n' {
                pen.x = 0.0;
                pen.y -= font.line_height * scale;
                continue;
            }
            let Some(glyph) = font.glyph(ch) else {
                pen.x += MISSING_ADVANCE_EM * font.resolution * scale;
                continue;
            };
            for contour in &glyph.contours {
                let Some(first) = contour.first() else {
                    continue;
                };
                let mut prev = *first * scale + pen;
                for p in contour.iter().skip(1).chain(std::iter::once(first)) {
                    let next = *p * scale + pen;
                    vertices.push(prev.extend(0.0));
                    vertices.push(next.extend(0.0));
                    prev = next;
                }
            }
            pen.x += glyph.advance * scale;
        }
        let mut geom = Self {
            vertices,
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        };
        geom.compute_bounding_box();
        geom
    }

    pub fn compute_bounding_box(&mut self) {
        let mut it = self.vertices.iter();
        let Some(first) = it.next() else {
            self.min = Vec3::ZERO;
            self.max = Vec3::ZERO;
            return;
        };
        let (mut min, mut max) = (*first, *first);
        for v in it {
            min = min.min(*v);
            max = max.max(*v);
        }
        self.min = min;
        self.max = max;
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
        self.min += offset;
        self.max += offset;
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_FONT: &str = r#"{
        "glyphs": {
            "A": { "ha": 1000, "o": "m 0 0 l 1000 0 l 1000 1000 l 0 1000" },
            "?": { "ha": 500, "o": "m 0 0 q 500 0 250 250" },
            " ": { "ha": 300 }
        },
        "resolution": 1000
    }"#;

    #[test]
    fn parses_glyphs_and_contours() {
        let font = Typeface::from_json(SQUARE_FONT).expect("font");
        assert_eq!(font.glyph_count(), 3);
        let a = font.glyph('A').expect("A");
        assert_eq!(a.contours.len(), 1);
        assert_eq!(a.contours[0].len(), 4);
        assert_eq!(font.glyph(' ').map(|g| g.contours.len()), Some(0));
    }

    #[test]
    fn quadratic_curves_are_flattened() {
        let font = Typeface::from_json(SQUARE_FONT).expect("font");
        let q = font.glyph('?').expect("?");
        assert_eq!(q.contours[0].len(), 1 + CURVE_SEGMENTS);
        let last = *q.contours[0].last().expect("end point");
        assert!((last - Vec2::new(500.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn missing_glyph_falls_back_to_question_mark() {
        let font = Typeface::from_json(SQUARE_FONT).expect("font");
        assert!(font.glyph('Z').is_some());
    }

    #[test]
    fn text_geometry_advances_and_bounds() {
        let font = Typeface::from_json(SQUARE_FONT).expect("font");
        let geom = TextGeometry::build(&font, "A A", 1.0);
        // two closed squares, four segments each
        assert_eq!(geom.segment_count(), 8);
        assert!((geom.min.x - 0.0).abs() < 1e-6);
        assert!((geom.max.x - 2.3).abs() < 1e-5);
        assert!((geom.width() - 2.3).abs() < 1e-5);
    }

    #[test]
    fn rejects_unknown_outline_command() {
        let json = r#"{ "glyphs": { "x": { "ha": 1, "o": "m 0 0 k 1 1" } } }"#;
        assert!(matches!(
            Typeface::from_json(json),
            Err(TypefaceError::Outline { glyph: 'x', .. })
        ));
    }

    #[test]
    fn rejects_empty_font() {
        let json = r#"{ "glyphs": {} }"#;
        assert!(matches!(Typeface::from_json(json), Err(TypefaceError::NoGlyphs)));
    }
}
