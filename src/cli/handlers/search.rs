//! Search command handler.

use anyhow::Result;

use super::parse_tags;
use crate::cli::SearchArgs;
use crate::cli::output::{OutputFormat, search_table, to_json};
use crate::store::{SearchQuery, Store};

pub fn handle_search(args: &SearchArgs, store: &Store) -> Result<()> {
    let mut query = SearchQuery::new(&args.query)
        .scope(args.scope)
        .tags(parse_tags(&args.tags))
        .offset(args.offset);
    query.limit = args.limit;

    let hits = store.search(&query)?;
    match args.format {
        OutputFormat::Human => println!("{}", search_table(&hits)),
        OutputFormat::Json => println!("{}", to_json(&hits)?),
    }
    Ok(())
}
