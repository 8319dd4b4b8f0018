use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bookme_engine::{
    rating_to_stars, AppConfig, BookView, Catalog, RecommendQuery, RecommendationEngine,
};

#[derive(Parser)]
#[command(name = "bookme-cli")]
#[command(about = "BookMe recommendation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Book snapshot path (defaults to BOOKS_PATH or data/books.json)
    #[arg(short, long)]
    books: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend books similar to a title
    Recommend {
        /// Book title (fuzzy matched)
        title: String,

        /// Number of recommendations
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },

    /// List the books featured on the home page
    Top,

    /// Render a rating as stars
    Stars {
        #[arg(allow_negative_numbers = true)]
        rating: f64,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(books) = cli.books {
        config.books_path = books;
    }

    match cli.command {
        Commands::Recommend { title, top_n } => {
            if title.trim().is_empty() {
                println!("Please enter a book title.");
                return Ok(());
            }

            let engine = RecommendationEngine::new(Catalog::load(&config.books_path)?);
            let query = RecommendQuery::new(title.as_str()).with_top_n(top_n.unwrap_or(config.top_n));

            println!("🔍 Recommending for: {}", title);
            let response = engine.recommend(&query);

            if let Some(notice) = &response.notice {
                println!("⚠️  {}", notice);
            }
            match &response.matched_title {
                Some(matched) => println!("   Matched: {} ({:.0}%)", matched, response.match_score),
                None => println!("   No match, showing random picks"),
            }
            println!("   Latency: {:.2}ms", response.latency_ms);

            if response.is_empty() {
                println!("\nNo recommendations found.");
            } else {
                println!("\n📋 Top Recommended Books:");
                print_books(&response.books);
            }
        }

        Commands::Top => {
            let catalog = Catalog::load(&config.books_path)?;
            let featured = catalog.featured(config.home_min_reviews, config.home_min_rating);

            println!(
                "⭐ {} books with more than {} reviews rated above {:.1}:",
                featured.len(),
                config.home_min_reviews,
                config.home_min_rating
            );
            let views: Vec<BookView> = featured.into_iter().map(|b| b.view()).collect();
            print_books(&views);
        }

        Commands::Stars { rating } => {
            println!("{:.1} {}", rating, rating_to_stars(rating));
        }
    }

    Ok(())
}

fn print_books(books: &[BookView]) {
    for (i, book) in books.iter().enumerate() {
        println!("   {}. {}", i + 1, book.title);
        println!("      Author: {}", book.author);
        println!("      Ratings: {:.1} {}", book.rating, rating_to_stars(book.rating));
        println!("      Reviews: {}", book.reviews);
    }
}
