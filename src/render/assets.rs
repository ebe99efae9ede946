use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};

/// Team name -> logo file inside the logo directory.
const TEAM_LOGOS: &[(&str, &str)] = &[
    ("FURIA", "furia.png"),
    ("Vitality", "vitality.png"),
    ("The MongolZ", "mongolz.png"),
    ("MOUZ", "mouz.png"),
    ("Natus Vincere", "navi.png"),
    ("NAVI", "navi.png"),
    ("Team Spirit", "spirit.png"),
    ("Spirit", "spirit.png"),
    ("FaZe", "faze.png"),
    ("G2", "g2.png"),
    ("Falcons", "falcons.png"),
    ("Aurora", "aurora.png"),
    ("Astralis", "astralis.png"),
    ("Liquid", "liquid.png"),
    ("Team Liquid", "liquid.png"),
    ("paiN", "pain.png"),
    ("3DMAX", "3dmax.png"),
    ("Virtus.pro", "virtuspro.png"),
    ("HEROIC", "heroic.png"),
];

pub fn team_logo_file(team: &str) -> Result<&'static str, AppError> {
    let team = team.trim();
    TEAM_LOGOS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(team))
        .map(|(_, file)| *file)
        .ok_or_else(|| AppError::UnknownTeam(team.to_string()))
}

pub fn team_logo_path(logo_dir: &Path, team: &str) -> Result<PathBuf, AppError> {
    Ok(logo_dir.join(team_logo_file(team)?))
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

/// Reads an image and inlines it as a `data:` URI so the page has no
/// further asset requests.
pub fn image_data_uri(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(format!("data:{};base64,{}", mime_for(path), STANDARD.encode(bytes)))
}
