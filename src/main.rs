use clap::{Parser, Subcommand};
use court_analytics::{
    analytics::peak_hours,
    config::Config,
    db,
    models::{facility, FacilityId},
    seed::{self, SeedOptions},
    server,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "court-analytics")]
#[command(about = "Booking analytics for court facilities", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the analytics server
    Server {
        #[arg(short, long, default_value = "5001")]
        port: u16,
    },
    /// Apply the database schema
    Migrate,
    /// Insert demo facilities, courts and bookings
    Seed {
        #[arg(long, default_value = "3")]
        facilities: u32,
        #[arg(long, default_value = "4")]
        courts: u32,
        /// Bookings per facility
        #[arg(long, default_value = "500")]
        bookings: u32,
        #[arg(long, default_value = "30")]
        days: u32,
    },
    /// List known facilities
    Facilities,
    /// Print the peak booking hours of a facility
    PeakHours {
        facility_id: FacilityId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "court_analytics=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Some(Commands::Server { port }) => {
            let pool = db::init(&config)?;
            server::run(pool, config, port).await?;
        }
        Some(Commands::Migrate) => {
            let _pool = db::init(&config)?;
            tracing::info!("Database migrated successfully");
        }
        Some(Commands::Seed {
            facilities,
            courts,
            bookings,
            days,
        }) => {
            let pool = db::init(&config)?;
            let options = SeedOptions {
                facilities,
                courts_per_facility: courts,
                bookings_per_facility: bookings,
                days,
            };
            let summary = seed::run(&pool, &options, &mut rand::thread_rng())?;

            println!(
                "Seeded {} facilities, {} courts, {} bookings.",
                summary.facilities.len(),
                summary.courts,
                summary.bookings
            );
            for id in summary.facilities {
                println!("  - facility {}", id);
            }
        }
        Some(Commands::Facilities) => {
            let pool = db::init(&config)?;
            let facilities = facility::list(&pool)?;
            if facilities.is_empty() {
                println!("No facilities found.");
            } else {
                println!("Facilities:");
                for f in facilities {
                    println!("  - {} {} ({}, {})", f.id, f.name, f.venue_type, f.status);
                }
            }
        }
        Some(Commands::PeakHours { facility_id }) => {
            let pool = db::init(&config)?;
            let analysis = peak_hours::analyze(&pool, facility_id)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        None => {
            // Default to server
            let pool = db::init(&config)?;
            server::run(pool, config, 5001).await?;
        }
    }

    Ok(())
}
