//! Localized report messages
//!
//! A closed catalog indexed by [`Language`] and [`MessageKey`]. Templates
//! carry `{name}` placeholders that [`render`] fills by plain substitution.

use crate::error::ConfigError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Report language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    /// Display name, also accepted by [`FromStr`]
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "spanish" | "es" | "español" | "espanol" => Ok(Self::Spanish),
            _ => Err(ConfigError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Identifies one message template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Path outside the allow-list. `{path}`
    ErrSecurity,
    /// Workflow folder missing. `{path}`
    ErrPath,
    /// No documents found. `{path}`
    ErrNoJson,
    /// Analysis start. `{count}`, `{path}`
    Analyzing,
    /// One document unreadable. `{file}`, `{error}`
    ErrRead,
    /// Unique model count. `{count}`
    Found,
    /// Total size. `{size}` (preformatted GiB)
    Size,
    /// Destination not creatable. `{path}`
    ErrDest,
    /// Console line per copied model. `{name}`
    Copying,
    /// Console line per failed copy. `{src}`, `{error}`
    ErrCopy,
    /// Backup finished. `{count}`
    Done,
    /// Backup location. `{path}`
    Location,
    /// Analysis-only notice
    AnalysisMode,
}

/// Raw template for a message
#[must_use]
pub fn catalog(language: Language, key: MessageKey) -> &'static str {
    use MessageKey as K;
    match language {
        Language::English => match key {
            K::ErrSecurity => "⛔ SECURITY ERROR: Path not allowed. To use external drives, create 'extra_paths.json' in the base folder. Rejected: {path}",
            K::ErrPath => "❌ ERROR: The workflows folder does not exist: {path}",
            K::ErrNoJson => "⚠️ No .json files found in {path}",
            K::Analyzing => "🔍 Analyzing {count} workflows in: {path}",
            K::ErrRead => "⚠️ Error reading {file}: {error}",
            K::Found => "✅ Found {count} unique models required.",
            K::Size => "📦 Estimated Total Size: {size} GB",
            K::ErrDest => "❌ Error creating destination folder: {path}",
            K::Copying => "Copying: {name}...",
            K::ErrCopy => "Error copying {src}: {error}",
            K::Done => "🎉 BACKUP COMPLETED: {count} new models copied.",
            K::Location => "📁 Location: {path}",
            K::AnalysisMode => "ℹ️ ANALYSIS MODE: No files were copied. Switch mode to EXECUTE_BACKUP to perform the copy.",
        },
        Language::Spanish => match key {
            K::ErrSecurity => "⛔ ERROR DE SEGURIDAD: Ruta no permitida. Para usar discos externos, crea 'extra_paths.json' en la carpeta base. Rechazada: {path}",
            K::ErrPath => "❌ ERROR: La carpeta de workflows no existe: {path}",
            K::ErrNoJson => "⚠️ No se encontraron archivos .json en {path}",
            K::Analyzing => "🔍 Analizando {count} workflows en: {path}",
            K::ErrRead => "⚠️ Error leyendo {file}: {error}",
            K::Found => "✅ Se encontraron {count} modelos únicos necesarios.",
            K::Size => "📦 Tamaño total estimado: {size} GB",
            K::ErrDest => "❌ Error creando carpeta destino: {path}",
            K::Copying => "Copiando: {name}...",
            K::ErrCopy => "Error copiando {src}: {error}",
            K::Done => "🎉 RESPALDO COMPLETADO: {count} modelos nuevos copiados.",
            K::Location => "📁 Ubicación: {path}",
            K::AnalysisMode => "ℹ️ MODO ANÁLISIS: No se copiaron archivos. Cambia el modo a EXECUTE_BACKUP para copiar.",
        },
    }
}

/// Render a message, replacing each `{name}` with its argument
///
/// Unknown placeholders are left as-is; values are inserted verbatim and
/// never re-scanned.
#[must_use]
pub fn render(language: Language, key: MessageKey, args: &[(&str, &str)]) -> String {
    let template = catalog(language, key);
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match args.iter().find(|(k, _)| *k == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..=open + close + 1]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
