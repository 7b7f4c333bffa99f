//! Catalog building: join, filter, clean and deduplicate.
//!
//! Steps, in order:
//! 1. Parse the three source files in parallel
//! 2. Drop metadata rows below the vote threshold or with a bad id
//! 3. Inner-join credits and keywords by id (first row per id wins)
//! 4. Parse nested fields and extract director, cast, keywords, genres
//! 5. Build each feature soup
//! 6. Deduplicate by title, first occurrence kept

use crate::error::Result;
use crate::literal;
use crate::parser::{self, CreditsRow, KeywordsRow, MetadataRow};
use crate::soup::build_soup;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Cast names kept per movie
pub const CAST_LIMIT: usize = 3;
/// Keyword names kept per movie
pub const KEYWORD_LIMIT: usize = 3;

impl Catalog {
    /// Load the catalog from the standard file names inside `data_dir`
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        Self::load(&CatalogPaths::in_dir(data_dir))
    }

    /// Load the catalog from explicit source paths
    pub fn load(paths: &CatalogPaths) -> Result<Self> {
        Self::load_with_report(paths, DEFAULT_MIN_VOTE_COUNT).map(|(catalog, _)| catalog)
    }

    /// Load the catalog and return the per-row diagnostics alongside it.
    ///
    /// Unreadable files and missing required columns are fatal; every other
    /// problem only drops the affected row.
    pub fn load_with_report(paths: &CatalogPaths, min_vote_count: u32) -> Result<(Self, LoadReport)> {
        let start = Instant::now();
        info!("Loading catalog from {:?}", paths.metadata.parent().unwrap_or(Path::new(".")));

        let ((metadata, credits), keywords) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_metadata(&paths.metadata),
                    || parser::parse_credits(&paths.credits),
                )
            },
            || parser::parse_keywords(&paths.keywords),
        );
        let metadata = metadata?;
        let credits = credits?;
        let keywords = keywords?;

        info!(
            "Read {} metadata rows, {} credits rows, {} keywords rows",
            metadata.len(),
            credits.len(),
            keywords.len()
        );

        let mut report = LoadReport {
            metadata_rows: metadata.len(),
            ..Default::default()
        };
        let records = join_rows(metadata, credits, keywords, min_vote_count, &mut report);
        let catalog = Self::assemble(records, min_vote_count, &mut report);

        info!(
            "Catalog ready: {} movies kept, {} rows dropped in {:?}",
            report.kept,
            report.dropped(),
            start.elapsed()
        );
        debug!("Load report: {:?}", report);
        Ok((catalog, report))
    }

    /// Build a catalog from already-typed records.
    ///
    /// Applies the same vote filter, soup construction and title dedupe as
    /// the file loader.
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut report = LoadReport::default();
        Self::assemble(records, DEFAULT_MIN_VOTE_COUNT, &mut report)
    }

    fn assemble(records: Vec<MovieRecord>, min_vote_count: u32, report: &mut LoadReport) -> Self {
        let mut catalog = Catalog::new();
        for mut record in records {
            if record.vote_count < min_vote_count {
                report.below_vote_threshold += 1;
                continue;
            }
            if catalog.title_index.contains_key(&record.title) {
                report.duplicate_titles += 1;
                continue;
            }
            record.soup = build_soup(&record);
            catalog
                .title_index
                .insert(record.title.clone(), catalog.movies.len());
            catalog.movies.push(record);
        }
        report.kept = catalog.movies.len();
        catalog
    }
}

/// Join the three tables in metadata order, producing typed records.
fn join_rows(
    metadata: Vec<MetadataRow>,
    credits: Vec<CreditsRow>,
    keywords: Vec<KeywordsRow>,
    min_vote_count: u32,
    report: &mut LoadReport,
) -> Vec<MovieRecord> {
    let credits_by_id = first_by_id(credits, |row| &row.id);
    let keywords_by_id = first_by_id(keywords, |row| &row.id);

    let mut records = Vec::with_capacity(metadata.len());
    for row in metadata {
        // The vote filter runs before anything else looks at the row
        let Some(vote_count) = row.vote_count.as_deref().and_then(parser::parse_unsigned) else {
            report.invalid_field += 1;
            continue;
        };
        if vote_count < min_vote_count {
            report.below_vote_threshold += 1;
            continue;
        }
        let Some(id) = parser::parse_unsigned(&row.id) else {
            report.invalid_id += 1;
            continue;
        };
        let Some(title) = row.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            report.missing_title += 1;
            continue;
        };
        let Some(credits) = credits_by_id.get(&id) else {
            report.missing_credits += 1;
            continue;
        };
        let Some(keywords) = keywords_by_id.get(&id) else {
            report.missing_keywords += 1;
            continue;
        };

        match build_record(id, title, vote_count, &row, credits, keywords) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => report.invalid_field += 1,
            Err(err) => {
                debug!("Dropping movie {}: {}", id, err);
                report.malformed_nested += 1;
            }
        }
    }
    records
}

fn first_by_id<T>(rows: Vec<T>, id: impl Fn(&T) -> &String) -> HashMap<MovieId, T> {
    let mut by_id = HashMap::with_capacity(rows.len());
    for row in rows {
        if let Some(key) = parser::parse_unsigned(id(&row)) {
            by_id.entry(key).or_insert(row);
        }
    }
    by_id
}

/// Returns `Ok(None)` when a scalar field is unusable, `Err` when a nested
/// field fails to parse.
fn build_record(
    id: MovieId,
    title: &str,
    vote_count: u32,
    row: &MetadataRow,
    credits: &CreditsRow,
    keywords: &KeywordsRow,
) -> Result<Option<MovieRecord>> {
    let cast = literal::parse_cast(credits.cast.as_deref().unwrap_or_default())?;
    let crew = literal::parse_crew(credits.crew.as_deref().unwrap_or_default())?;
    let keyword_entries = literal::parse_keywords(keywords.keywords.as_deref().unwrap_or_default())?;
    let genres = literal::parse_genres(row.genres.as_deref().unwrap_or_default())?;

    let Some(vote_average) = row.vote_average.as_deref().and_then(parser::parse_float) else {
        return Ok(None);
    };

    Ok(Some(MovieRecord {
        id,
        title: title.to_string(),
        director: get_director(&crew),
        cast: cast.into_iter().take(CAST_LIMIT).map(|c| c.name).collect(),
        keywords: keyword_entries
            .into_iter()
            .take(KEYWORD_LIMIT)
            .map(|k| k.name)
            .collect(),
        genres: genres.into_iter().map(|g| g.name).collect(),
        overview: row.overview.clone().unwrap_or_default(),
        vote_count,
        vote_average,
        soup: String::new(),
    }))
}

/// Name of the first crew member whose job is "Director"
pub fn get_director(crew: &[CrewEntry]) -> String {
    crew.iter()
        .find(|member| member.job == "Director")
        .map(|member| member.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const METADATA: &str = "\
adult,genres,id,overview,title,vote_average,vote_count
False,\"[{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': 'Comedy'}]\",862,\"Led by Woody, Andy's toys live happily.\",Toy Story,7.7,5415.0
False,\"[{'id': 12, 'name': 'Adventure'}]\",8844,,Jumanji,6.9,2413.0
False,[],1000,Too few votes,Obscure Film,9.0,3.0
False,[],1997-08-20,Bad id,Broken Id,5.0,100.0
False,\"[{'id': 18, 'name': 'Drama'\",2000,Broken genres,Broken Genres,5.0,100.0
False,[],3000,No credits row,Uncredited,5.0,100.0
False,[],5000,No title,,5.0,100.0
False,[],6000,Unreadable rating,Unrated,n/a,100.0
False,\"[{'id': 18, 'name': 'Drama'}]\",4000,A second film with the same title,Toy Story,6.0,50.0
";

    const CREDITS: &str = "\
cast,crew,id
\"[{'name': 'Tom Hanks', 'order': 0}, {'name': 'Tim Allen', 'order': 1}, {'name': 'Don Rickles', 'order': 2}, {'name': 'Jim Varney', 'order': 3}]\",\"[{'job': 'Producer', 'name': 'Bonnie Arnold'}, {'job': 'Director', 'name': 'John Lasseter'}]\",862
\"[{'name': 'Robin Williams'}]\",[],8844
[],[],1000
[],[],2000
[],[],4000
[],[],5000
[],[],6000
";

    const KEYWORDS: &str = "\
id,keywords
862,\"[{'id': 931, 'name': 'jealousy'}, {'id': 4290, 'name': 'toy'}, {'id': 5202, 'name': 'boy'}, {'id': 6054, 'name': 'friendship'}]\"
8844,\"[{'id': 10090, 'name': 'board game'}]\"
1000,[]
2000,[]
3000,[]
4000,[]
5000,[]
6000,[]
";

    fn write_dataset() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CatalogPaths::METADATA_FILE), METADATA).unwrap();
        fs::write(dir.path().join(CatalogPaths::CREDITS_FILE), CREDITS).unwrap();
        fs::write(dir.path().join(CatalogPaths::KEYWORDS_FILE), KEYWORDS).unwrap();
        dir
    }

    #[test]
    fn test_load_dataset() {
        let dir = write_dataset();
        let (catalog, report) =
            Catalog::load_with_report(&CatalogPaths::in_dir(dir.path()), DEFAULT_MIN_VOTE_COUNT).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(report.metadata_rows, 9);
        assert_eq!(report.below_vote_threshold, 1);
        assert_eq!(report.invalid_id, 1);
        assert_eq!(report.missing_title, 1);
        assert_eq!(report.invalid_field, 1);
        assert_eq!(report.malformed_nested, 1);
        assert_eq!(report.missing_credits, 1);
        assert_eq!(report.duplicate_titles, 1);
        assert_eq!(report.kept, 2);
        assert_eq!(report.dropped() + report.kept, report.metadata_rows);

        let toy_story = catalog.get(0).unwrap();
        assert_eq!(toy_story.id, 862);
        assert_eq!(toy_story.director, "John Lasseter");
        assert_eq!(toy_story.cast, vec!["Tom Hanks", "Tim Allen", "Don Rickles"]);
        assert_eq!(toy_story.keywords, vec!["jealousy", "toy", "boy"]);
        assert_eq!(toy_story.genres, vec!["Animation", "Comedy"]);
        assert_eq!(toy_story.vote_count, 5415);
        assert!(toy_story.soup.starts_with("toystory toystory toystory toystory johnlasseter"));

        let jumanji = catalog.get_by_title("Jumanji").unwrap();
        assert_eq!(jumanji.director, "");
        assert_eq!(jumanji.overview, "");
        assert_eq!(catalog.index_of("Jumanji"), Some(1));
    }

    #[test]
    fn test_no_movie_below_vote_threshold() {
        let dir = write_dataset();
        let catalog = Catalog::load_from_dir(dir.path()).unwrap();
        assert!(catalog.movies().iter().all(|m| m.vote_count >= DEFAULT_MIN_VOTE_COUNT));
    }

    #[test]
    fn test_missing_source_file_is_fatal() {
        let dir = write_dataset();
        fs::remove_file(dir.path().join(CatalogPaths::KEYWORDS_FILE)).unwrap();
        assert!(Catalog::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_from_records_dedupes_and_filters() {
        let records = vec![
            MovieRecord { id: 1, title: "Alien".into(), vote_count: 100, ..Default::default() },
            MovieRecord { id: 2, title: "Alien".into(), vote_count: 200, ..Default::default() },
            MovieRecord { id: 3, title: "Aliens".into(), vote_count: 9, ..Default::default() },
            MovieRecord { id: 4, title: "Alien 3".into(), vote_count: 10, ..Default::default() },
        ];
        let catalog = Catalog::from_records(records);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_by_title("Alien").unwrap().id, 1);
        assert_eq!(catalog.index_of("Alien 3"), Some(1));
        assert!(catalog.get_by_title("Aliens").is_none());
        assert_eq!(catalog.get(0).unwrap().soup, "alien alien alien alien");
    }

    #[test]
    fn test_get_director_first_match() {
        let crew = vec![
            CrewEntry { name: "A".into(), job: "Writer".into(), ..Default::default() },
            CrewEntry { name: "B".into(), job: "Director".into(), ..Default::default() },
            CrewEntry { name: "C".into(), job: "Director".into(), ..Default::default() },
        ];
        assert_eq!(get_director(&crew), "B");
        assert_eq!(get_director(&[]), "");
    }
}
