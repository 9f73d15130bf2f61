use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

/// Generic family used when the named family is not installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenericFamily {
    SansSerif,
    Serif,
    Monospace,
}

impl GenericFamily {
    pub(crate) const ALL: [Self; 3] = [Self::SansSerif, Self::Serif, Self::Monospace];

    fn to_fontdb(self) -> fontdb::Family<'static> {
        match self {
            Self::SansSerif => fontdb::Family::SansSerif,
            Self::Serif => fontdb::Family::Serif,
            Self::Monospace => fontdb::Family::Monospace,
        }
    }

    /// Commonly installed families, in preference order, that the generic is bound to.
    pub(crate) fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::SansSerif => &[
                "DejaVu Sans",
                "Liberation Sans",
                "Noto Sans",
                "Arial",
                "Helvetica",
                "FreeSans",
                "Cantarell",
                "Ubuntu",
            ],
            Self::Serif => &[
                "DejaVu Serif",
                "Liberation Serif",
                "Noto Serif",
                "Times New Roman",
                "Times",
                "FreeSerif",
                "Georgia",
            ],
            Self::Monospace => &[
                "DejaVu Sans Mono",
                "Liberation Mono",
                "Noto Sans Mono",
                "Courier New",
                "Menlo",
                "FreeMono",
                "Ubuntu Mono",
            ],
        }
    }
}

/// One entry of the fixed font set a render draws from.
#[derive(Debug, PartialEq, Eq)]
pub struct FontChoice {
    /// Stable identifier, reported in render state and manifests.
    pub id: &'static str,
    pub family: &'static str,
    pub fallback: GenericFamily,
    pub weight: u16,
}

pub static FONT_CHOICES: &[FontChoice] = &[
    FontChoice {
        id: "bebas-neue",
        family: "Bebas Neue",
        fallback: GenericFamily::SansSerif,
        weight: 400,
    },
    FontChoice {
        id: "anton",
        family: "Anton",
        fallback: GenericFamily::SansSerif,
        weight: 400,
    },
    FontChoice {
        id: "playfair-display",
        family: "Playfair Display",
        fallback: GenericFamily::Serif,
        weight: 800,
    },
    FontChoice {
        id: "montserrat",
        family: "Montserrat",
        fallback: GenericFamily::SansSerif,
        weight: 800,
    },
    FontChoice {
        id: "orbitron",
        family: "Orbitron",
        fallback: GenericFamily::SansSerif,
        weight: 700,
    },
    FontChoice {
        id: "space-mono",
        family: "Space Mono",
        fallback: GenericFamily::Monospace,
        weight: 700,
    },
];

/// Font bytes resolved for a [`FontChoice`].
#[derive(Debug)]
pub(crate) struct ResolvedFace {
    /// Identity of the face within its book.
    pub(crate) id: fontdb::ID,
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
    /// Family name of the face that was actually found.
    pub(crate) family: String,
}

/// Font discovery over a `fontdb` database, memoized per font id.
pub struct FontBook {
    db: fontdb::Database,
    generics: Vec<(GenericFamily, String)>,
    resolved: HashMap<&'static str, Option<Arc<ResolvedFace>>>,
}

/// How a query found its face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FaceMatch {
    Named,
    Generic,
    AnyFace,
}

impl FontBook {
    /// Build a book from system fonts (optional) plus every font file in `fonts_dir`.
    pub fn load(load_system_fonts: bool, fonts_dir: Option<&Path>) -> Self {
        let mut db = fontdb::Database::new();
        if load_system_fonts {
            db.load_system_fonts();
        }
        if let Some(dir) = fonts_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        let generics = bind_generic_families(&mut db);
        tracing::debug!(faces = db.len(), generics = ?generics, "font book loaded");
        Self {
            db,
            generics,
            resolved: HashMap::new(),
        }
    }

    /// A book with no faces; typography renders without glyphs.
    pub fn empty() -> Self {
        Self::load(false, None)
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Installed family the generic was bound to, if any candidate is present.
    pub(crate) fn generic_family(&self, generic: GenericFamily) -> Option<&str> {
        self.generics
            .iter()
            .find(|(g, _)| *g == generic)
            .map(|(_, name)| name.as_str())
    }

    pub(crate) fn resolve(&mut self, choice: &'static FontChoice) -> Option<Arc<ResolvedFace>> {
        if let Some(hit) = self.resolved.get(choice.id) {
            return hit.clone();
        }
        let found = self.query(choice);
        match &found {
            Some((_, FaceMatch::Named)) => {}
            Some((f, FaceMatch::Generic)) => tracing::warn!(
                font = choice.id,
                substitute = %f.family,
                "font family not installed; using generic fallback"
            ),
            Some((f, FaceMatch::AnyFace)) => tracing::warn!(
                font = choice.id,
                substitute = %f.family,
                "no named or generic family installed; using first available face"
            ),
            None => tracing::warn!(font = choice.id, "no font face available"),
        }
        let face = found.map(|(f, _)| Arc::new(f));
        self.resolved.insert(choice.id, face.clone());
        face
    }

    fn query(&self, choice: &FontChoice) -> Option<(ResolvedFace, FaceMatch)> {
        let weight = fontdb::Weight(choice.weight);
        let (id, how) = self
            .query_family(fontdb::Family::Name(choice.family), weight)
            .map(|id| (id, FaceMatch::Named))
            .or_else(|| {
                [choice.fallback, GenericFamily::SansSerif]
                    .into_iter()
                    .filter(|g| self.generic_family(*g).is_some())
                    .find_map(|g| self.query_family(g.to_fontdb(), weight))
                    .map(|id| (id, FaceMatch::Generic))
            })
            .or_else(|| self.db.faces().next().map(|f| (f.id, FaceMatch::AnyFace)))?;
        let family = self
            .db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_default();
        let (bytes, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))?;
        Some((
            ResolvedFace {
                id,
                bytes: Arc::new(bytes),
                index,
                family,
            },
            how,
        ))
    }

    fn query_family(&self, family: fontdb::Family<'_>, weight: fontdb::Weight) -> Option<fontdb::ID> {
        let families = [family];
        self.db.query(&fontdb::Query {
            families: &families,
            weight,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })
    }
}

/// Point each generic family at the first installed candidate; fontdb's built-in names are
/// often not installed.
fn bind_generic_families(db: &mut fontdb::Database) -> Vec<(GenericFamily, String)> {
    let installed: HashSet<String> = db
        .faces()
        .flat_map(|f| f.families.iter().map(|(name, _)| name.to_lowercase()))
        .collect();
    let mut bound = Vec::new();
    for generic in GenericFamily::ALL {
        let Some(name) = generic
            .candidates()
            .iter()
            .find(|c| installed.contains(&c.to_lowercase()))
        else {
            continue;
        };
        match generic {
            GenericFamily::SansSerif => db.set_sans_serif_family(*name),
            GenericFamily::Serif => db.set_serif_family(*name),
            GenericFamily::Monospace => db.set_monospace_family(*name),
        }
        bound.push((generic, (*name).to_owned()));
    }
    bound
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "fonts directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
