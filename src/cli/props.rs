//! Handler for the `props` command.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{output, FeedKind, PropsArgs};
use crate::config::Config;
use crate::domain::{best_quote, format_american, Outcome, PlayerProp, PropQuote};
use crate::error::Result;
use crate::feed::{filter_books, parse_prop_rows, props_from_rows};

#[derive(Tabled)]
struct PropTableRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop")]
    prop: String,
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Best Over")]
    over: String,
    #[tabled(rename = "Best Under")]
    under: String,
}

pub async fn execute(args: &PropsArgs, config: &Config) -> Result<()> {
    let body = args.source.load_body(config, FeedKind::Props).await?;
    let rows = parse_prop_rows(&body);
    let rows = filter_books(rows, &args.source.allowed_books(config), |r| &r.book);
    let props = props_from_rows(&rows);

    if args.source.json {
        println!("{}", serde_json::to_string_pretty(&props)?);
        return Ok(());
    }

    output::section("Player Props");

    if props.is_empty() {
        output::note("No props in the snapshot.");
        return Ok(());
    }

    let table_rows: Vec<PropTableRow> = props
        .iter()
        .map(|prop| PropTableRow {
            player: prop.player_name.clone(),
            prop: prop.prop_type.clone(),
            game: format!("{} @ {}", prop.away_team, prop.home_team),
            over: best_side(prop, Outcome::Over),
            under: best_side(prop, Outcome::Under),
        })
        .collect();

    println!("{}", Table::new(table_rows).with(Style::sharp()));
    Ok(())
}

/// Best quote for one side of the prop, or a placeholder when no book
/// has a real offer on that side.
fn best_side(prop: &PlayerProp, outcome: Outcome) -> String {
    let side = prop.outcome_quotes(outcome);
    match best_quote(&side) {
        Some(quote) => describe(quote),
        None => "—".to_string(),
    }
}

fn describe(quote: &PropQuote) -> String {
    format!(
        "{} {} @ {}",
        quote.line,
        format_american(quote.price),
        quote.book
    )
}
