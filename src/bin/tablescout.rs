use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use ts_ratings::cards::{gallery_columns, CardState};
use ts_ratings::client::{Client, EndpointConfig};
use ts_ratings::{Restaurant, SearchController, SearchState};

#[derive(Parser, Debug)]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(short = 't', long, global = true, help = "Endpoint for the town listing")]
    pub towns_endpoint: Option<String>,

    #[arg(short = 'r', long, global = true, help = "Endpoint for restaurant data")]
    pub restaurants_endpoint: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[clap(name = "towns", about = "List all searchable towns")]
    Towns,

    #[clap(name = "search", about = "Search towns for rated restaurants")]
    Search {
        #[arg(required = true)]
        towns: Vec<String>,

        #[arg(short = 'e', long, help = "Show the expanded detail view for every card")]
        expand: bool,

        #[arg(
            short = 'w',
            long,
            default_value_t = 1280,
            help = "Display width in pixels, used for gallery sizing"
        )]
        width: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = CliArgs::parse();
    let http = reqwest::Client::builder().gzip(true).brotli(true).build()?;
    let endpoints = EndpointConfig {
        towns: args.global_opts.towns_endpoint,
        restaurants: args.global_opts.restaurants_endpoint,
    };
    let client = Client::new(http, endpoints)?;

    match args.subcommand {
        Command::Towns => {
            let towns = client.get_towns().await?;
            println!("{}", serde_json::to_string_pretty(towns)?);
        }
        Command::Search {
            towns,
            expand,
            width,
        } => {
            search_towns(&client, &towns, expand, width).await?;
        }
    }
    Ok(())
}

async fn search_towns(client: &Client, towns: &[String], expand: bool, width: u32) -> Result<()> {
    let progress = ProgressBar::new(towns.len() as u64);
    progress.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} {msg}")?);

    // One controller for the whole session; each submit supersedes the
    // previous search.
    let mut controller = SearchController::new();
    for town in towns {
        progress.set_message(town.clone());
        controller
            .run(client.http_client(), client.restaurants_endpoint(), town)
            .await;
        match controller.state() {
            SearchState::Loaded(restaurants) if restaurants.is_empty() => {
                progress.println(format!("{town}: no restaurants found"));
            }
            SearchState::Loaded(restaurants) => {
                for restaurant in restaurants {
                    progress.println(render_card(restaurant, expand, width));
                }
            }
            SearchState::Failed(error) => {
                progress.println(format!("{town}: search failed: {error}"));
            }
            _ => {}
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(())
}

fn render_card(restaurant: &Restaurant, expand: bool, width: u32) -> String {
    let mut card = format!("{}  {:.1}/10\n", restaurant.name, restaurant.score);
    if !restaurant.review.is_empty() {
        card.push_str(&format!("  \"{}\"\n", restaurant.review));
    }
    if !expand {
        return card;
    }
    for site in &restaurant.sites {
        card.push_str(&format!(
            "  {}: {} reviews, {:.1}/10 ({})\n",
            site.site, site.number_of_reviews, site.rating, site.link
        ));
    }
    if !restaurant.formatted_address.is_empty() {
        card.push_str(&format!("  {}\n", restaurant.formatted_address));
    }
    let mut state = CardState::new();
    state.expand(&restaurant.photos);
    if !state.gallery().is_empty() {
        card.push_str(&format!(
            "  {} photos across {} columns\n",
            state.gallery().len(),
            gallery_columns(width)
        ));
    }
    card
}
