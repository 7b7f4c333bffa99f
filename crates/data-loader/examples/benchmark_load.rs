use data_loader::{Catalog, CatalogPaths, DEFAULT_MIN_VOTE_COUNT};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data/tmdb".to_string());
    let paths = CatalogPaths::in_dir(Path::new(&data_dir));

    let start = Instant::now();
    let (catalog, report) = Catalog::load_with_report(&paths, DEFAULT_MIN_VOTE_COUNT)?;
    let duration = start.elapsed();

    println!("Loaded {} movies in {:?}", catalog.len(), duration);
    println!("{:#?}", report);

    let avg_soup_len = catalog.movies().iter().map(|m| m.soup.len()).sum::<usize>() as f64
        / catalog.len().max(1) as f64;
    println!("Average soup length: {:.1} bytes", avg_soup_len);

    Ok(())
}
