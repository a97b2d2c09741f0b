use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;
use ttf_parser::Face;

static MEASURER: Lazy<Mutex<FontMeasurer>> = Lazy::new(|| Mutex::new(FontMeasurer::new()));

/// Advance width of `text` in pixels using the first installed face of the
/// CSS family list. `None` when no face could be resolved.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

enum FamilySpec {
    Generic(Family<'static>),
    Named(String),
}

fn parse_family_list(font_family: &str) -> Vec<FamilySpec> {
    let mut specs: Vec<FamilySpec> = font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\''))
        .filter(|raw| !raw.is_empty())
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "serif" => FamilySpec::Generic(Family::Serif),
            "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                FamilySpec::Generic(Family::SansSerif)
            }
            "monospace" | "ui-monospace" => FamilySpec::Generic(Family::Monospace),
            "cursive" => FamilySpec::Generic(Family::Cursive),
            "fantasy" => FamilySpec::Generic(Family::Fantasy),
            _ => FamilySpec::Named(raw.to_string()),
        })
        .collect();
    if specs.is_empty() {
        specs.push(FamilySpec::Generic(Family::SansSerif));
    }
    specs
}

struct FontMeasurer {
    db: Database,
    system_fonts_loaded: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl FontMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            system_fonts_loaded: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = font_family.trim().to_string();
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            if face.is_none() {
                debug!(family = font_family, "no installed face, falling back to estimates");
            }
            self.faces.insert(key.clone(), face);
        }
        self.faces
            .get_mut(&key)
            .and_then(|face| face.as_mut())?
            .measure(text, font_size)
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        if !self.system_fonts_loaded {
            self.db.load_system_fonts();
            self.system_fonts_loaded = true;
        }
        let specs = parse_family_list(font_family);
        let families: Vec<Family<'_>> = specs
            .iter()
            .map(|spec| match spec {
                FamilySpec::Generic(family) => *family,
                FamilySpec::Named(name) => Family::Name(name.as_str()),
            })
            .collect();
        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| LoadedFace::new(data.to_vec(), index))
            .flatten()
    }
}

/// Font bytes plus a per-character advance cache. The face is re-parsed per
/// measurement, which is cheap next to the glyph lookups it saves.
struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    advances: HashMap<char, Option<u16>>,
}

impl LoadedFace {
    fn new(data: Vec<u8>, index: u32) -> Option<Self> {
        let units_per_em = Face::parse(&data, index).ok()?.units_per_em().max(1);
        Some(Self {
            data,
            index,
            units_per_em,
            advances: HashMap::new(),
        })
    }

    fn measure(&mut self, text: &str, font_size: f32) -> Option<f32> {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;
        let mut face: Option<Face<'_>> = None;
        let mut width = 0.0f32;
        for ch in text.chars().filter(|ch| *ch != '\n') {
            let advance = match self.advances.get(&ch) {
                Some(cached) => *cached,
                None => {
                    if face.is_none() {
                        face = Some(Face::parse(&self.data, self.index).ok()?);
                    }
                    let parsed = face.as_ref()?;
                    let advance = parsed
                        .glyph_index(ch)
                        .and_then(|glyph| parsed.glyph_hor_advance(glyph));
                    self.advances.insert(ch, advance);
                    advance
                }
            };
            width += match advance {
                Some(units) if units > 0 => units as f32 * scale,
                _ => fallback,
            };
        }
        Some(width.max(0.0))
    }
}
