use super::models::{MatchRow, SeriesResult};
use crate::error::AppError;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::path::Path;

const MATCH_DELIMITER: u8 = b';';
const SERIES_DELIMITER: u8 = b',';

// `%Y` also accepts two digits, so the short-year form has to be tried first.
const DAY_FIRST_FORMATS: [&str; 4] = ["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// A required header, matched case-insensitively against its name and aliases.
struct Column {
    name: &'static str,
    aliases: &'static [&'static str],
}

const MAP: Column = Column { name: "mapa", aliases: &["map"] };
const DATE: Column = Column { name: "data", aliases: &["date"] };
const WIN: Column = Column { name: "vitoria", aliases: &["vitória", "win", "won"] };
const RATING: Column = Column { name: "rating", aliases: &[] };
const ADR: Column = Column { name: "adr", aliases: &[] };
const KILLS: Column = Column { name: "kills", aliases: &[] };
const DEATHS: Column = Column { name: "deaths", aliases: &[] };
const KAST: Column = Column { name: "kast", aliases: &[] };

const TEAM: Column = Column { name: "time", aliases: &["team"] };
const OPPONENT: Column = Column { name: "adversario", aliases: &["adversário", "opponent"] };
const RESULT: Column = Column { name: "resultado", aliases: &["result", "score"] };

impl Column {
    fn matches(&self, header: &str) -> bool {
        let header = header.trim_start_matches('\u{feff}').trim();
        header.eq_ignore_ascii_case(self.name)
            || self.aliases.iter().any(|a| header.to_lowercase() == a.to_lowercase())
    }

    fn locate(&self, headers: &StringRecord, path: &Path) -> Result<usize, AppError> {
        headers
            .iter()
            .position(|h| self.matches(h))
            .ok_or_else(|| AppError::MissingColumn {
                path: path.to_path_buf(),
                column: self.name.to_string(),
            })
    }
}

/// Reads the per-map match file (semicolon separated, latin-1 encoded).
pub fn load_matches(path: &Path) -> Result<Vec<MatchRow>, AppError> {
    let bytes = read_file(path)?;
    parse_matches(&decode_latin1(&bytes), path)
}

/// Reads the series results file (comma separated, UTF-8).
pub fn load_series(path: &Path) -> Result<Vec<SeriesResult>, AppError> {
    let bytes = read_file(path)?;
    let text = String::from_utf8(bytes).map_err(|e| AppError::Csv {
        path: path.to_path_buf(),
        message: format!("not valid UTF-8: {}", e),
    })?;
    parse_series(&text, path)
}

fn read_file(path: &Path) -> Result<Vec<u8>, AppError> {
    fs::read(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Latin-1 maps each byte onto the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

pub fn parse_matches(text: &str, path: &Path) -> Result<Vec<MatchRow>, AppError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(MATCH_DELIMITER)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let map_idx = MAP.locate(&headers, path)?;
    let date_idx = DATE.locate(&headers, path)?;
    let win_idx = WIN.locate(&headers, path)?;
    let rating_idx = RATING.locate(&headers, path)?;
    let adr_idx = ADR.locate(&headers, path)?;
    let kills_idx = KILLS.locate(&headers, path)?;
    let deaths_idx = DEATHS.locate(&headers, path)?;
    let kast_idx = KAST.locate(&headers, path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let cells = Cells::new(&record, path);

        rows.push(MatchRow {
            map: cells.text(map_idx).to_string(),
            date: cells.parse(date_idx, &DATE, parse_day_first_date)?,
            won: is_win_flag(cells.text(win_idx)),
            rating: cells.parse(rating_idx, &RATING, parse_decimal)?,
            adr: cells.parse(adr_idx, &ADR, parse_decimal)?,
            kills: cells.parse(kills_idx, &KILLS, |s| s.parse::<u32>().ok())?,
            deaths: cells.parse(deaths_idx, &DEATHS, |s| s.parse::<u32>().ok())?,
            kast: cells.parse(kast_idx, &KAST, parse_percent)?,
        });
    }

    Ok(rows)
}

pub fn parse_series(text: &str, path: &Path) -> Result<Vec<SeriesResult>, AppError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(SERIES_DELIMITER)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let team_idx = TEAM.locate(&headers, path)?;
    let opponent_idx = OPPONENT.locate(&headers, path)?;
    let result_idx = RESULT.locate(&headers, path)?;

    let mut series = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let cells = Cells::new(&record, path);
        series.push(SeriesResult {
            team: cells.text(team_idx).to_string(),
            opponent: cells.text(opponent_idx).to_string(),
            result: cells.text(result_idx).to_string(),
        });
    }

    Ok(series)
}

fn csv_error(path: &Path, err: csv::Error) -> AppError {
    AppError::Csv {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

struct Cells<'a> {
    record: &'a StringRecord,
    path: &'a Path,
}

impl<'a> Cells<'a> {
    fn new(record: &'a StringRecord, path: &'a Path) -> Self {
        Cells { record, path }
    }

    fn text(&self, idx: usize) -> &'a str {
        self.record.get(idx).unwrap_or("")
    }

    fn line(&self) -> usize {
        self.record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(0)
    }

    fn parse<T>(
        &self,
        idx: usize,
        column: &Column,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, AppError> {
        let raw = self.text(idx);
        parse(raw).ok_or_else(|| AppError::InvalidValue {
            path: self.path.to_path_buf(),
            line: self.line(),
            column: column.name.to_string(),
            value: raw.to_string(),
        })
    }
}

pub fn parse_day_first_date(raw: &str) -> Option<NaiveDate> {
    DAY_FIRST_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
}

/// "72.5%" -> 72.5. The suffix is optional.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    parse_decimal(trimmed.strip_suffix('%').unwrap_or(trimmed))
}

/// Accepts both "1.05" and the decimal-comma form "1,05".
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let value = raw.trim().replace(',', ".").parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// "S" (sim) marks a win. Surrounding blanks and lowercase "s" are accepted too.
fn is_win_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("S")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCHES: &str = "mapa;data;vitoria;rating;adr;kills;deaths;kast
Mirage;20/07/2025;S;1.30;85.2;20;15;72.5%
Mirage;21/07/2025;N;0.95;70.1;18;20;65%
Nuke;22/07/2025;s;1,12;90.0;22;0;80.0%
";

    fn path() -> &'static Path {
        Path::new("partidas.csv")
    }

    #[test]
    fn parses_match_rows() {
        let rows = parse_matches(MATCHES, path()).unwrap();
        assert_eq!(rows.len(), 3);

        let first = &rows[0];
        assert_eq!(first.map, "Mirage");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 7, 20).unwrap());
        assert!(first.won);
        assert_eq!(first.kills, 20);
        assert_eq!(first.kast, 72.5);

        assert!(!rows[1].won);
        assert_eq!(rows[1].kast, 65.0);

        assert!(rows[2].won);
        assert!((rows[2].rating - 1.12).abs() < 1e-9);
        assert_eq!(rows[2].deaths, 0);
    }

    #[test]
    fn header_matching_ignores_case_and_accepts_aliases() {
        let text = "Map;Date;Win;Rating;ADR;Kills;Deaths;KAST;Notes
Ancient;01/08/2025;S;1.01;75;15;14;70%;ok
";
        let rows = parse_matches(text, path()).unwrap();
        assert_eq!(rows[0].map, "Ancient");
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    }

    #[test]
    fn missing_column_is_reported() {
        let text = "mapa;data;vitoria;rating;adr;kills;deaths
Mirage;20/07/2025;S;1.30;85.2;20;15
";
        match parse_matches(text, path()) {
            Err(AppError::MissingColumn { column, .. }) => assert_eq!(column, "kast"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn unparseable_date_is_reported_with_line() {
        let text = "mapa;data;vitoria;rating;adr;kills;deaths;kast
Mirage;20/07/2025;S;1.30;85.2;20;15;72.5%
Mirage;2025-07-21;N;0.95;70.1;18;20;65%
";
        match parse_matches(text, path()) {
            Err(AppError::InvalidValue { column, line, value, .. }) => {
                assert_eq!(column, "data");
                assert_eq!(line, 3);
                assert_eq!(value, "2025-07-21");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn unparseable_percentage_is_reported() {
        let text = "mapa;data;vitoria;rating;adr;kills;deaths;kast
Mirage;20/07/2025;S;1.30;85.2;20;15;high
";
        assert!(matches!(
            parse_matches(text, path()),
            Err(AppError::InvalidValue { ref column, .. }) if column == "kast"
        ));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let text = "mapa;data;vitoria;rating;adr;kills;deaths;kast
Mirage;20/07/2025;S;1.30
";
        assert!(matches!(parse_matches(text, path()), Err(AppError::Csv { .. })));
    }

    #[test]
    fn day_first_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 2, 3);
        assert_eq!(parse_day_first_date("03/02/2025"), expected);
        assert_eq!(parse_day_first_date("03/02/25"), expected);
        assert_eq!(
            parse_day_first_date("20/07/25"),
            NaiveDate::from_ymd_opt(2025, 7, 20)
        );
        assert_eq!(parse_day_first_date("03-02-2025"), expected);
        assert_eq!(parse_day_first_date("03.02.2025"), expected);
        assert_eq!(parse_day_first_date("31/13/2025"), None);
    }

    #[test]
    fn percent_suffix_is_optional() {
        assert_eq!(parse_percent("72.5%"), Some(72.5));
        assert_eq!(parse_percent(" 80 "), Some(80.0));
        assert_eq!(parse_percent("%"), None);
    }

    #[test]
    fn latin1_bytes_decode_to_code_points() {
        assert_eq!(decode_latin1(b"Vit\xf3ria caf\xe9"), "Vitória café");
    }

    #[test]
    fn two_digit_years_land_in_this_century() {
        let text = "mapa;data;vitoria;rating;adr;kills;deaths;kast
Mirage;20/07/25;S;1.30;85.2;20;15;72.5%
";
        let rows = parse_matches(text, path()).unwrap();
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 7, 20).unwrap());
    }

    #[test]
    fn win_flag_accepts_s_only() {
        assert!(is_win_flag("S"));
        assert!(is_win_flag(" s "));
        assert!(!is_win_flag("N"));
        assert!(!is_win_flag("Sim"));
        assert!(!is_win_flag(""));
    }

    #[test]
    fn byte_order_mark_does_not_hide_first_header() {
        let text = "\u{feff}time,adversario,resultado\nFURIA,MOUZ,2-0\n";
        let series = parse_series(text, Path::new("series.csv")).unwrap();
        assert_eq!(series[0].team, "FURIA");
    }

    #[test]
    fn parses_series_results() {
        let text = "time,adversario,resultado
FURIA,Vitality,0-2
FURIA,The MongolZ,2-1
";
        let series = parse_series(text, Path::new("series.csv")).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].opponent, "The MongolZ");
        assert_eq!(series[1].result, "2-1");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_matches(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, AppError::FileRead { .. }));
    }
}
