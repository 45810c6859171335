// src/curation.rs
//! Editor curation: ranked selection → per-story lookups → newsletter records.

use chrono::{Local, NaiveDate};
use futures::future::try_join_all;
use metrics::counter;
use std::sync::Arc;

use crate::client::{ensure_metrics_described, StoryApi};
use crate::config::RankOrder;
use crate::error::NewsError;
use crate::story::nprml::parse_document;
use crate::story::{extract_curated, CuratedRecord, StoryMap};

/// `(rank, id)` pairs in fetch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationSelection {
    entries: Vec<(String, String)>,
}

impl CurationSelection {
    /// Pair `ids[i]` with `ranks[i]`, drop blank ranks, sort ascending (stable).
    pub fn from_parallel(
        ids: &[String],
        ranks: &[String],
        order: RankOrder,
    ) -> Result<Self, NewsError> {
        if ids.len() != ranks.len() {
            return Err(NewsError::InvalidSelection(format!(
                "{} ids but {} ranks",
                ids.len(),
                ranks.len()
            )));
        }

        let mut entries: Vec<(String, String)> = ranks
            .iter()
            .zip(ids)
            .filter(|(rank, _)| !rank.trim().is_empty())
            .map(|(rank, id)| (rank.trim().to_string(), id.trim().to_string()))
            .collect();

        match order {
            RankOrder::Lexicographic => entries.sort_by(|a, b| a.0.cmp(&b.0)),
            RankOrder::Numeric => {
                let mut keyed = Vec::with_capacity(entries.len());
                for (rank, id) in entries {
                    let n: u32 = rank.parse().map_err(|_| {
                        NewsError::InvalidSelection(format!("rank {rank:?} for story {id} is not a number"))
                    })?;
                    keyed.push((n, (rank, id)));
                }
                keyed.sort_by_key(|(n, _)| *n);
                entries = keyed.into_iter().map(|(_, e)| e).collect();
            }
        }

        if let Some((rank, _)) = entries.iter().find(|(_, id)| id.is_empty()) {
            return Err(NewsError::InvalidSelection(format!(
                "rank {rank:?} has no story id"
            )));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, id)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// "Wednesday - April 3, 2024"
pub fn format_post_date(date: NaiveDate) -> String {
    date.format("%A - %B %-d, %Y").to_string()
}

#[derive(Debug, Clone)]
pub struct CuratedDigest {
    pub stories: StoryMap<CuratedRecord>,
    pub post_date: String,
}

pub struct CurationRenderer {
    api: Arc<dyn StoryApi>,
    rank_order: RankOrder,
}

impl CurationRenderer {
    pub fn new(api: Arc<dyn StoryApi>, rank_order: RankOrder) -> Self {
        Self { api, rank_order }
    }

    /// Curate using today's local date.
    pub async fn render(&self, ids: &[String], ranks: &[String]) -> Result<CuratedDigest, NewsError> {
        self.render_on(ids, ranks, Local::now().date_naive()).await
    }

    pub async fn render_on(
        &self,
        ids: &[String],
        ranks: &[String],
        today: NaiveDate,
    ) -> Result<CuratedDigest, NewsError> {
        ensure_metrics_described();
        let selection = CurationSelection::from_parallel(ids, ranks, self.rank_order)?;
        counter!("curation_requests_total").increment(1);

        // try_join_all keeps input order, so the map comes out in rank order
        let records = try_join_all(selection.ids().map(|id| self.lookup(id))).await?;

        let mut stories = StoryMap::with_capacity(records.len());
        for (id, record) in selection.ids().zip(records) {
            stories.insert(id, record);
        }

        tracing::info!(
            selected = stories.len(),
            submitted = ids.len(),
            "curated snippet built"
        );
        Ok(CuratedDigest {
            stories,
            post_date: format_post_date(today),
        })
    }

    async fn lookup(&self, story_id: &str) -> Result<CuratedRecord, NewsError> {
        let body = self.api.fetch_story(story_id).await?;
        let story = parse_document(&body)?.into_single_story()?;
        let record = extract_curated(&story)?;
        tracing::debug!(id = story_id, title = %record.title, "curated story fetched");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn drops_blank_ranks_and_sorts() {
        let sel = CurationSelection::from_parallel(
            &s(&["x", "y", "z"]),
            &s(&["2", "", "1"]),
            RankOrder::Numeric,
        )
        .unwrap();
        assert_eq!(
            sel.entries(),
            &[("1".to_string(), "z".to_string()), ("2".to_string(), "x".to_string())]
        );
    }

    #[test]
    fn numeric_vs_lexicographic() {
        let ids = s(&["a", "b", "c"]);
        let ranks = s(&["10", "2", "1"]);
        let num = CurationSelection::from_parallel(&ids, &ranks, RankOrder::Numeric).unwrap();
        assert_eq!(num.ids().collect::<Vec<_>>(), vec!["c", "b", "a"]);
        let lex = CurationSelection::from_parallel(&ids, &ranks, RankOrder::Lexicographic).unwrap();
        assert_eq!(lex.ids().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let sel = CurationSelection::from_parallel(
            &s(&["q", "p", "r"]),
            &s(&["1", "1", "0"]),
            RankOrder::Numeric,
        )
        .unwrap();
        assert_eq!(sel.ids().collect::<Vec<_>>(), vec!["r", "q", "p"]);
    }

    #[test]
    fn length_mismatch_and_bad_rank_are_rejected() {
        assert!(matches!(
            CurationSelection::from_parallel(&s(&["a"]), &s(&["1", "2"]), RankOrder::Numeric),
            Err(NewsError::InvalidSelection(_))
        ));
        assert!(matches!(
            CurationSelection::from_parallel(&s(&["a"]), &s(&["first"]), RankOrder::Numeric),
            Err(NewsError::InvalidSelection(_))
        ));
        // legacy ordering accepts any text
        assert!(
            CurationSelection::from_parallel(&s(&["a"]), &s(&["first"]), RankOrder::Lexicographic)
                .is_ok()
        );
    }

    #[test]
    fn post_date_strips_leading_zero() {
        let d = NaiveDate::from_ymd_opt(2024, 4, 3).unwrap();
        assert_eq!(format_post_date(d), "Wednesday - April 3, 2024");
        let d = NaiveDate::from_ymd_opt(2023, 11, 21).unwrap();
        assert_eq!(format_post_date(d), "Tuesday - November 21, 2023");
    }
}
