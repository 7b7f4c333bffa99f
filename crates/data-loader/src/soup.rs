//! Feature soup construction.
//!
//! Every movie is reduced to one text blob for the vectorizer. Repetition is
//! the weighting mechanism: term frequency feeds straight into TF-IDF, so a
//! name written four times pulls four times as hard as one written once.
//!
//! | field    | form                 | repeats |
//! |----------|----------------------|---------|
//! | title    | one cleaned token    | 4       |
//! | director | one cleaned token    | 3       |
//! | cast     | one token per name   | 2       |
//! | keywords | one token per name   | 1       |
//! | genres   | one token per name   | 1       |
//! | overview | raw text             | 1       |

use crate::types::MovieRecord;

pub const TITLE_WEIGHT: usize = 4;
pub const DIRECTOR_WEIGHT: usize = 3;
pub const CAST_WEIGHT: usize = 2;

/// Lowercase a name and strip its spaces so it becomes a single token.
///
/// "Tom Hanks" and "Tom Cruise" must not share a "tom" term.
pub fn clean_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// Build the weighted soup for one movie
pub fn build_soup(movie: &MovieRecord) -> String {
    let mut tokens: Vec<String> = Vec::new();

    push_repeated(&mut tokens, &movie.title, TITLE_WEIGHT);
    push_repeated(&mut tokens, &movie.director, DIRECTOR_WEIGHT);

    let cast: Vec<String> = cleaned(&movie.cast);
    for _ in 0..CAST_WEIGHT {
        tokens.extend(cast.iter().cloned());
    }

    tokens.extend(cleaned(&movie.keywords));
    tokens.extend(cleaned(&movie.genres));

    let overview = movie.overview.trim();
    if !overview.is_empty() {
        tokens.push(overview.to_string());
    }

    tokens.join(" ")
}

fn push_repeated(tokens: &mut Vec<String>, name: &str, times: usize) {
    let token = clean_name(name);
    if token.is_empty() {
        return;
    }
    tokens.extend(std::iter::repeat_n(token, times));
}

fn cleaned(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| clean_name(n))
        .filter(|n| !n.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("Tom Hanks"), "tomhanks");
        assert_eq!(clean_name("Science Fiction"), "sciencefiction");
        assert_eq!(clean_name(""), "");
    }

    #[test]
    fn test_soup_weights() {
        let movie = MovieRecord {
            title: "Toy Story".to_string(),
            director: "John Lasseter".to_string(),
            cast: vec!["Tom Hanks".to_string(), "Tim Allen".to_string()],
            keywords: vec!["jealousy".to_string(), "toy".to_string()],
            genres: vec!["Animation".to_string(), "Comedy".to_string()],
            overview: "Led by Woody, Andy's toys live happily.".to_string(),
            ..Default::default()
        };

        assert_eq!(
            build_soup(&movie),
            "toystory toystory toystory toystory \
             johnlasseter johnlasseter johnlasseter \
             tomhanks timallen tomhanks timallen \
             jealousy toy animation comedy \
             Led by Woody, Andy's toys live happily."
        );
    }

    #[test]
    fn test_soup_skips_empty_fields() {
        let movie = MovieRecord {
            title: "Solo".to_string(),
            ..Default::default()
        };
        assert_eq!(build_soup(&movie), "solo solo solo solo");
    }
}
