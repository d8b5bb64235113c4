//! Print the `india.csv` preview and census figures to stdout.

use anyhow::{Context, Result};

use census_preview::config::PreviewConfig;
use census_preview::data::load_csv;
use census_preview::preview::Preview;
use census_preview::summary::{format_thousands, CensusMetrics};

fn main() -> Result<()> {
    env_logger::init();

    let config = PreviewConfig::default();
    let dataset = load_csv(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let preview = Preview::head(&dataset, config.preview_rows);
    let text = preview.render_text().context("rendering preview table")?;

    println!("{}", config.page_title);
    println!("{text}");

    let metrics = CensusMetrics::compute(&dataset);
    if let Some(total) = metrics.total_population {
        println!("Total Population: {}", format_thousands(total));
    }
    if let Some(rate) = metrics.mean_literacy_rate {
        println!("Average Literacy Rate: {rate:.2}%");
    }
    println!("Total Districts: {}", metrics.districts);
    Ok(())
}
