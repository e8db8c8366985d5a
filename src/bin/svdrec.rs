/**
 * SvdRec
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

#[macro_use]
extern crate log;

use std::env;
use std::error::Error;
use std::num::ParseIntError;

use getopts::Options;

use svdrec::SvdRec;
use svdrec::io;
use svdrec::io::{Recommendations, RecommendedItem};
use svdrec::ranking::ScoredItem;
use svdrec::utils;

/// What to compute for every user or item of the input.
enum Mode {
    SimilarItems,
    ForUsers,
    FromNeighbors,
}

struct Config {
    interactions_path: String,
    output_path: Option<String>,
    delimiter: u8,
    skip_rows: usize,
    rank: Option<usize>,
    count: usize,
    neighbors: usize,
    mode: Mode,
    item_names_path: Option<String>,
    user_names_path: Option<String>,
}

fn main() {

    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("i", "inputfile", "Input file name (required). The input consists of ratings \
        that users gave to items, one 'userID,itemID,rating' triplet per line. Ids start at 1, \
        further columns are ignored.", "PATH");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optopt("d", "delimiter", "Column delimiter of the input file (optional, defaults to ',', \
        use 'tab' for tab separated files).", "CHAR");
    opts.optopt("s", "skip-rows", "Number of header lines to skip (optional, defaults to 0).",
        "NUMBER");
    opts.optopt("k", "rank", "Number of latent dimensions (optional, defaults to the smaller \
        dimension of the input minus one).", "NUMBER");
    opts.optopt("n", "num-recommendations", "Number of items to recommend per user or item \
        (optional, defaults to 10).", "NUMBER");
    opts.optopt("m", "mode", "What to compute: 'items' for similar items per item, 'users' for \
        recommendations per user, 'neighbors' for items rated by the closest users (optional, \
        defaults to 'users').", "MODE");
    opts.optopt("", "neighbors", "Number of closest users to consider in 'neighbors' mode \
        (optional, defaults to 1).", "NUMBER");
    opts.optopt("", "item-names", "JSON file mapping item ids to names (optional).", "PATH");
    opts.optopt("", "user-names", "JSON file mapping user ids to names (optional).", "PATH");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    let interactions_path = match matches.opt_str("i") {
        Some(path) => path,
        None => return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify an inputfile via --inputfile."),
        ),
    };

    let delimiter_option = matches.opt_str("d").unwrap_or_else(|| String::from(","));
    let delimiter = match utils::parse_delimiter(&delimiter_option) {
        Some(delimiter) => delimiter,
        None => {
            let hint = format!("Problem with option 'd': '{}' is not a single character",
                delimiter_option);
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let mode = match matches.opt_str("m").as_ref().map(String::as_str) {
        None | Some("users") => Mode::ForUsers,
        Some("items") => Mode::SimilarItems,
        Some("neighbors") => Mode::FromNeighbors,
        Some(other) => {
            let hint = format!("Problem with option 'm': unknown mode '{}'", other);
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let numbers = (|| -> Result<_, ParseIntError> {
        Ok((
            matches.opt_get_default::<usize>("s", 0)?,
            matches.opt_get::<usize>("k")?,
            matches.opt_get_default::<usize>("n", 10)?,
            matches.opt_get_default::<usize>("neighbors", 1)?,
        ))
    })();

    let (skip_rows, rank, count, neighbors) = match numbers {
        Ok(numbers) => numbers,
        Err(failure) => {
            let hint = format!("Problem with a numeric option: {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let config = Config {
        interactions_path,
        output_path: matches.opt_str("o"),
        delimiter,
        skip_rows,
        rank,
        count,
        neighbors,
        mode,
        item_names_path: matches.opt_str("item-names"),
        user_names_path: matches.opt_str("user-names"),
    };

    if let Err(failure) = compute_recommendations(config) {
        eprintln!("{}", failure);
        std::process::exit(1);
    }
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));

    let status = exit_status(hint);
    if status != 0 {
        std::process::exit(status);
    }
}

/// Asking for help is not an error, every other reason to print the usage is.
fn exit_status(hint: Option<&str>) -> i32 {
    match hint {
        Some(_) => 1,
        None => 0,
    }
}

fn named(svdrec: &SvdRec, scored_items: Vec<ScoredItem>) -> Vec<RecommendedItem> {
    scored_items.into_iter()
        .map(|scored_item| RecommendedItem {
            item: scored_item.item,
            name: svdrec.item_name(scored_item.item),
            score: Some(scored_item.score),
        })
        .collect()
}

fn compute_recommendations(config: Config) -> Result<(), Box<dyn Error>> {

    info!("Reading {} to build the interaction matrix", config.interactions_path);

    let mut svdrec = SvdRec::new();
    svdrec.load_csv(&config.interactions_path, config.delimiter, config.skip_rows)?;

    if let Some(path) = &config.item_names_path {
        svdrec.set_item_encoder(io::read_encoder(path)?);
    }

    if let Some(path) = &config.user_names_path {
        svdrec.set_user_encoder(io::read_encoder(path)?);
    }

    let (num_users, num_items) = svdrec.shape()?;

    let rank = svdrec.decompose(config.rank)?.rank();
    info!("Decomposed {} users and {} items into {} latent dimensions", num_users, num_items, rank);

    let mut recommendations = Vec::new();

    match config.mode {
        Mode::SimilarItems => {
            for item_id in 1..=num_items {
                let similar = svdrec.similar_items_scored(item_id, config.count)?;
                recommendations.push(Recommendations {
                    id: item_id,
                    name: svdrec.item_name(item_id),
                    recommended: named(&svdrec, similar),
                });
            }
        },
        Mode::ForUsers => {
            for user_id in 1..=num_users {
                let recommended = svdrec.recommend_for_user_scored(user_id, config.count)?;
                recommendations.push(Recommendations {
                    id: user_id,
                    name: svdrec.user_name(user_id),
                    recommended: named(&svdrec, recommended),
                });
            }
        },
        Mode::FromNeighbors => {
            for user_id in 1..=num_users {
                let mut items: Vec<usize> = svdrec
                    .recommend_from_nearest_neighbors(user_id, config.neighbors)?
                    .into_iter()
                    .collect();
                items.sort();

                let recommended = items.into_iter()
                    .map(|item| RecommendedItem { item, name: svdrec.item_name(item), score: None })
                    .collect();

                recommendations.push(Recommendations {
                    id: user_id,
                    name: svdrec.user_name(user_id),
                    recommended,
                });
            }
        },
    }

    info!("Writing recommendations...");
    io::write_recommendations(recommendations, config.output_path)?;

    Ok(())
}
