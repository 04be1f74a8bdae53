use clap::{Parser, Subcommand};
use loto_engine::core::join_values;
use loto_engine::{Draw, LotoEngine, Ticket};

#[derive(Parser)]
#[command(name = "loto-cli")]
#[command(about = "Loto Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path
    #[arg(short, long, default_value = "loto.db")]
    db: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a ticket
    Add {
        /// Player name (letters and spaces)
        name: String,

        /// 5 numbers between 1 and 49, comma separated
        numbers: String,

        /// 2 stars between 1 and 9, comma separated
        stars: String,
    },

    /// Add random players to the pool
    Generate {
        /// How many players to add
        count: usize,
    },

    /// Run a draw and distribute the prize
    Draw {
        /// Winning numbers instead of a random draw
        #[arg(long, requires = "stars")]
        numbers: Option<String>,

        /// Winning stars instead of a random draw
        #[arg(long, requires = "numbers")]
        stars: Option<String>,
    },

    /// Show the top 10 of the last draw
    Ranking,

    /// List every player
    Players,

    /// Show the prize pool, or set it
    Prize {
        /// New amount (digits only)
        amount: Option<String>,
    },

    /// Remaining places in the pool
    Slots,

    /// Delete every player
    Clear,
}

fn print_ticket(rank: usize, ticket: &Ticket) {
    println!(
        "   {:>3}. {:<20} {:>14} | {} | stars {} | matches {}+{} | proximity {}/{}",
        rank,
        ticket.name,
        format!("{:.2}", ticket.gains),
        join_values(&ticket.chosen_numbers),
        join_values(&ticket.chosen_stars),
        ticket.matching_numbers.len(),
        ticket.matching_stars.len(),
        ticket.proximity_numbers,
        ticket.proximity_stars
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let engine = LotoEngine::new(&cli.db).await?;

    match cli.command {
        Commands::Add { name, numbers, stars } => {
            let ticket = engine.register_ticket(&name, &numbers, &stars).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                println!("✅ Player '{}' added", ticket.name);
                println!("   Remaining slots: {}", engine.remaining_slots().await?);
            }
        }

        Commands::Generate { count } => {
            let tickets = engine.generate_players(count).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tickets)?);
            } else {
                println!("🎲 {} players generated", tickets.len());
                println!("   Remaining slots: {}", engine.remaining_slots().await?);
            }
        }

        Commands::Draw { numbers, stars } => {
            let resolution = match (numbers, stars) {
                (Some(numbers), Some(stars)) => {
                    engine.run_draw_with(Draw::parse(&numbers, &stars)?).await?
                }
                _ => engine.run_draw().await?,
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                println!("🎰 Winning numbers: {}", join_values(&resolution.draw.winning_numbers));
                println!("   Winning stars: {}", join_values(&resolution.draw.winning_stars));
                println!("   Prize pool: {:.2}", resolution.total_prize);
                println!("   Ranking mode: {:?}", resolution.mode);

                if resolution.tickets.is_empty() {
                    println!("\n   No players in the pool");
                } else {
                    println!("\n🏆 Results:");
                    for (i, ticket) in resolution.winners().enumerate() {
                        print_ticket(i + 1, ticket);
                    }
                }
            }
        }

        Commands::Ranking => {
            let board = engine.leaderboard().await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                println!("🏆 Ranking:");
                for (i, ticket) in board.iter().enumerate() {
                    print_ticket(i + 1, ticket);
                }
            }
        }

        Commands::Players => {
            let players = engine.players().await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&players)?);
            } else {
                println!("📋 {} players:", players.len());
                for (i, ticket) in players.iter().enumerate() {
                    print_ticket(i + 1, ticket);
                }
            }
        }

        Commands::Prize { amount } => {
            let prize = match amount {
                Some(raw) => engine.update_prize(&raw).await?,
                None => engine.prize().await?,
            };
            println!("💰 Prize pool: {:.2}", prize);
        }

        Commands::Slots => {
            println!("Remaining slots: {}", engine.remaining_slots().await?);
        }

        Commands::Clear => {
            let deleted = engine.delete_players().await?;
            println!("🧹 Deleted {} players", deleted);
        }
    }

    Ok(())
}
