//! Reaction aggregates: whose content gets the most reactions.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;
use tracing::warn;

use crate::config::InsightsConfig;
use crate::core::output::TableRow;
use crate::error::{InsightsError, Result};
use crate::record::ReactionRecord;

/// Reactions given to one poster, overall (`year` empty) or in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosterCount {
    pub year: Option<i32>,
    pub poster: String,
    pub reactions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub reaction: String,
    pub count: usize,
}

impl TableRow for PosterCount {
    const COLUMNS: &'static [&'static str] = &["year", "poster", "reactions"];
}

impl TableRow for KindCount {
    const COLUMNS: &'static [&'static str] = &["reaction", "count"];
}

/// Counts by key, highest first, ties by key.
fn ranked<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn truncated<T>(mut rows: Vec<T>, top: Option<usize>) -> Vec<T> {
    if let Some(top) = top {
        rows.truncate(top);
    }
    rows
}

/// Most reacted-to posters.
///
/// Without `yearly`, one ranking over every reaction, limited to `top`.
/// With `yearly`, one ranking per calendar year, from the first to the last
/// year of the data or over `years` when set. With `fixed_top`, every year
/// lists the overall top posters in overall order, zero when a poster got
/// nothing that year.
///
/// Reactions whose timestamp does not parse are left out.
///
/// # Errors
///
/// [`InsightsError::InvalidConfig`] when `yearly` is set without `top`, or
/// when [`InsightsConfig::validate`] rejects the year range.
pub fn like_statistics(records: &[ReactionRecord], config: &InsightsConfig) -> Result<Vec<PosterCount>> {
    config.validate()?;
    if config.yearly && config.top.is_none() {
        return Err(InsightsError::invalid_config(
            "yearly like statistics require a top count",
        ));
    }

    let dated: Vec<(i32, &str)> = records
        .iter()
        .filter_map(|record| match record.datetime() {
            Ok(at) => Some((at.year(), record.target.as_str())),
            Err(e) => {
                warn!(error = %e, "ignoring reaction");
                None
            }
        })
        .collect();

    let data_years = dated
        .iter()
        .map(|(year, _)| *year)
        .min()
        .zip(dated.iter().map(|(year, _)| *year).max());
    let Some((first_year, last_year)) = config.years.or(data_years) else {
        return Ok(Vec::new());
    };
    let in_range: Vec<(i32, &str)> = dated
        .into_iter()
        .filter(|(year, _)| (first_year..=last_year).contains(year))
        .collect();

    let overall = truncated(ranked(in_range.iter().map(|(_, poster)| *poster)), config.top);

    if !config.yearly {
        return Ok(overall
            .into_iter()
            .map(|(poster, reactions)| PosterCount {
                year: None,
                poster: poster.to_string(),
                reactions,
            })
            .collect());
    }

    let mut rows = Vec::new();
    for year in first_year..=last_year {
        let posters = in_range
            .iter()
            .filter(|(y, _)| *y == year)
            .map(|(_, poster)| *poster);
        let yearly = ranked(posters);

        let counts: Vec<(&str, usize)> = if config.fixed_top {
            overall
                .iter()
                .map(|(poster, _)| {
                    let n = yearly
                        .iter()
                        .find(|(p, _)| p == poster)
                        .map_or(0, |(_, n)| *n);
                    (*poster, n)
                })
                .collect()
        } else {
            truncated(yearly, config.top)
        };

        rows.extend(counts.into_iter().map(|(poster, reactions)| PosterCount {
            year: Some(year),
            poster: poster.to_string(),
            reactions,
        }));
    }
    Ok(rows)
}

/// Number of reactions of each kind, most used first.
pub fn reaction_kind_counts(records: &[ReactionRecord]) -> Vec<KindCount> {
    ranked(records.iter().map(|r| r.reaction_kind.as_str()))
        .into_iter()
        .map(|(reaction, count)| KindCount {
            reaction: reaction.to_string(),
            count,
        })
        .collect()
}
