//! Due-set derivation and review forecasts.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::Card;

/// Number of new cards introduced per learning session.
pub const DEFAULT_LEARN_BATCH: usize = 10;

/// Default day-forecast horizon.
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Learned cards whose review time has passed.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>) -> Vec<&Card> {
    cards.iter().filter(|c| c.is_due(now)).collect()
}

/// The next `limit` cards that have not been learned yet, in collection order.
pub fn cards_to_learn(cards: &[Card], limit: usize) -> Vec<&Card> {
    cards.iter().filter(|c| !c.learned).take(limit).collect()
}

/// Mark a card learned, making it due immediately.
///
/// Marking an already learned card leaves it unchanged.
pub fn mark_learned(cards: &mut [Card], id: i64, now: DateTime<Utc>) -> Result<&Card> {
    let card = cards
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(CoreError::CardNotFound(id))?;

    if !card.learned {
        card.learned = true;
        card.next_review = Some(now);
    }

    Ok(&*card)
}

/// Earliest scheduled review among learned cards.
pub fn next_due(cards: &[Card]) -> Option<DateTime<Utc>> {
    cards
        .iter()
        .filter(|c| c.learned)
        .filter_map(|c| c.next_review)
        .min()
}

/// Review count for one day of the forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForecast {
    /// Days from now; 0 includes overdue cards.
    pub day_offset: u32,
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub weekday: String,
    pub reviews: usize,
}

/// Review count for one hour of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourForecast {
    pub hour: u32,
    pub reviews: usize,
}

/// Count upcoming reviews per day over `days` days starting at `now`.
///
/// A card due in `[now + i days, now + (i + 1) days)` lands in bucket `i`.
/// Overdue cards land in bucket 0; cards past the horizon are dropped.
pub fn forecast_by_day(cards: &[Card], now: DateTime<Utc>, days: u32) -> Vec<DayForecast> {
    let mut buckets: Vec<DayForecast> = (0..days)
        .map(|i| {
            let date = now + Duration::days(i64::from(i));
            DayForecast {
                day_offset: i,
                date: date.date_naive(),
                weekday: date.format("%a").to_string(),
                reviews: 0,
            }
        })
        .collect();

    for due in scheduled(cards) {
        let offset = (due - now).num_milliseconds().div_euclid(MS_PER_DAY).max(0);
        if let Some(bucket) = usize::try_from(offset).ok().and_then(|i| buckets.get_mut(i)) {
            bucket.reviews += 1;
        }
    }

    buckets
}

/// Count reviews falling on `day` (as seen in `tz`) per hour of day.
pub fn forecast_by_hour<Tz: TimeZone>(cards: &[Card], day: NaiveDate, tz: &Tz) -> Vec<HourForecast> {
    let mut buckets: Vec<HourForecast> = (0..24)
        .map(|hour| HourForecast { hour, reviews: 0 })
        .collect();

    for due in scheduled(cards) {
        let local = due.with_timezone(tz);
        if local.date_naive() == day {
            buckets[local.hour() as usize].reviews += 1;
        }
    }

    buckets
}

fn scheduled(cards: &[Card]) -> impl Iterator<Item = DateTime<Utc>> + '_ {
    cards
        .iter()
        .filter(|c| c.learned)
        .filter_map(|c| c.next_review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap()
    }

    fn learned(id: i64, due: DateTime<Utc>) -> Card {
        let mut card = Card::new(id, format!("front {}", id), format!("back {}", id));
        card.learned = true;
        card.next_review = Some(due);
        card
    }

    #[test]
    fn due_set_contains_only_past_cards() {
        let cards = vec![
            learned(1, now() - Duration::milliseconds(1000)),
            learned(2, now() + Duration::milliseconds(1000)),
            learned(3, now() + Duration::milliseconds(5000)),
        ];
        let due: Vec<i64> = due_cards(&cards, now()).iter().map(|c| c.id).collect();
        assert_eq!(due, vec![1]);
    }

    #[test]
    fn due_set_includes_exact_now_and_skips_unlearned() {
        let mut unlearned = Card::new(4, "개", "dog");
        unlearned.next_review = Some(now() - Duration::days(1));
        let cards = vec![learned(1, now()), unlearned];
        let due: Vec<i64> = due_cards(&cards, now()).iter().map(|c| c.id).collect();
        assert_eq!(due, vec![1]);
    }

    #[test]
    fn empty_collection_has_nothing_due() {
        assert!(due_cards(&[], now()).is_empty());
        assert!(cards_to_learn(&[], DEFAULT_LEARN_BATCH).is_empty());
        assert_eq!(next_due(&[]), None);
    }

    #[test]
    fn learn_batch_is_bounded() {
        let mut cards: Vec<Card> = (1..=15).map(|i| Card::new(i, "f", "b")).collect();
        cards[0].learned = true;
        let batch: Vec<i64> = cards_to_learn(&cards, DEFAULT_LEARN_BATCH)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(batch, (2..=11).collect::<Vec<_>>());
    }

    #[test]
    fn mark_learned_makes_card_due_now() {
        let mut cards = vec![Card::new(1, "집", "house")];
        let card = mark_learned(&mut cards, 1, now()).unwrap();
        assert!(card.learned);
        assert_eq!(card.next_review, Some(now()));
        assert_eq!(due_cards(&cards, now()).len(), 1);
    }

    #[test]
    fn mark_learned_twice_keeps_schedule() {
        let mut cards = vec![Card::new(1, "집", "house")];
        mark_learned(&mut cards, 1, now()).unwrap();
        let later = now() + Duration::hours(5);
        let card = mark_learned(&mut cards, 1, later).unwrap();
        assert_eq!(card.next_review, Some(now()));
    }

    #[test]
    fn mark_learned_unknown_card() {
        let mut cards = vec![Card::new(1, "집", "house")];
        assert_eq!(
            mark_learned(&mut cards, 99, now()).unwrap_err(),
            CoreError::CardNotFound(99)
        );
    }

    #[test]
    fn next_due_ignores_unlearned() {
        let mut early = Card::new(9, "f", "b");
        early.next_review = Some(now() - Duration::days(30));
        let cards = vec![early, learned(1, now() + Duration::days(2)), learned(2, now() + Duration::days(1))];
        assert_eq!(next_due(&cards), Some(now() + Duration::days(1)));
    }

    #[test]
    fn day_forecast_buckets() {
        let cards = vec![
            learned(1, now() - Duration::days(3)),
            learned(2, now() + Duration::hours(2)),
            learned(3, now() + Duration::hours(30)),
            learned(4, now() + Duration::days(6) + Duration::hours(1)),
            learned(5, now() + Duration::days(7)),
        ];
        let forecast = forecast_by_day(&cards, now(), DEFAULT_FORECAST_DAYS);
        let counts: Vec<usize> = forecast.iter().map(|d| d.reviews).collect();
        assert_eq!(counts, vec![2, 1, 0, 0, 0, 0, 1]);
        assert_eq!(forecast[0].weekday, "Mon");
        assert_eq!(forecast[1].date, NaiveDate::from_ymd_opt(2024, 5, 7).unwrap());
    }

    #[test]
    fn day_forecast_empty_collection() {
        let forecast = forecast_by_day(&[], now(), 3);
        assert_eq!(forecast.len(), 3);
        assert!(forecast.iter().all(|d| d.reviews == 0));
    }

    #[test]
    fn hour_forecast_uses_timezone() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let cards = vec![
            learned(1, Utc.with_ymd_and_hms(2024, 5, 6, 8, 15, 0).unwrap()),
            learned(2, Utc.with_ymd_and_hms(2024, 5, 6, 8, 45, 0).unwrap()),
            learned(3, Utc.with_ymd_and_hms(2024, 5, 6, 23, 30, 0).unwrap()),
            learned(4, Utc.with_ymd_and_hms(2024, 5, 7, 1, 0, 0).unwrap()),
        ];

        let utc = forecast_by_hour(&cards, day, &Utc);
        assert_eq!(utc.len(), 24);
        assert_eq!(utc[8].reviews, 2);
        assert_eq!(utc[23].reviews, 1);
        assert_eq!(utc.iter().map(|h| h.reviews).sum::<usize>(), 3);

        // Seoul is UTC+9: 23:30 UTC on the 6th is the 7th locally.
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let local = forecast_by_hour(&cards, day, &seoul);
        assert_eq!(local[17].reviews, 2);
        assert_eq!(local.iter().map(|h| h.reviews).sum::<usize>(), 2);
    }
}
