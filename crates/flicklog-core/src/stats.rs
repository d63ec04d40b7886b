use chrono::{DateTime, Duration, Utc};
use flicklog_models::{genre_name, WatchedEntry};
use serde::Serialize;

/// Sentinel reported when there is nothing to tally.
pub const NO_DATA: &str = "No data";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: u32,
}

/// Summary metrics derived from the watched collection. Pure projection,
/// recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total_watched: usize,
    pub watched_this_week: usize,
    pub watched_this_month: usize,
    pub average_rating: f64,
    pub rated_movies: usize,
    pub favorite_genres: Vec<GenreCount>,
    pub total_watchlist: usize,
    pub most_productive_day: String,
}

pub fn compute(
    watched: &[WatchedEntry],
    watchlist_len: usize,
    now: DateTime<Utc>,
) -> LibraryStats {
    let week_ago = now - Duration::days(7);
    let month_ago = now - Duration::days(30);

    let watched_this_week = watched
        .iter()
        .filter(|e| e.date_watched >= week_ago)
        .count();
    let watched_this_month = watched
        .iter()
        .filter(|e| e.date_watched >= month_ago)
        .count();

    let rated: Vec<u8> = watched
        .iter()
        .filter(|e| e.user_rating > 0)
        .map(|e| e.user_rating)
        .collect();
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        let sum: u32 = rated.iter().map(|&r| u32::from(r)).sum();
        round_one_decimal(f64::from(sum) / rated.len() as f64)
    };

    LibraryStats {
        total_watched: watched.len(),
        watched_this_week,
        watched_this_month,
        average_rating,
        rated_movies: rated.len(),
        favorite_genres: favorite_genres(watched),
        total_watchlist: watchlist_len,
        most_productive_day: most_productive_day(watched),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Top 3 genres by count. Resolved genre objects take precedence over the
/// numeric code list; unknown codes are dropped. The tally preserves
/// first-seen order and the sort is stable, so ties break deterministically
/// by encounter order.
fn favorite_genres(watched: &[WatchedEntry]) -> Vec<GenreCount> {
    let mut tally: Vec<GenreCount> = Vec::new();
    let mut bump = |tally: &mut Vec<GenreCount>, name: &str| {
        match tally.iter_mut().find(|g| g.genre == name) {
            Some(existing) => existing.count += 1,
            None => tally.push(GenreCount {
                genre: name.to_string(),
                count: 1,
            }),
        }
    };

    for entry in watched {
        if let Some(genres) = &entry.movie.genres {
            for genre in genres {
                bump(&mut tally, &genre.name);
            }
        } else if let Some(codes) = &entry.movie.genre_ids {
            for code in codes {
                if let Some(name) = genre_name(*code) {
                    bump(&mut tally, name);
                }
            }
        }
    }

    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally.truncate(3);
    tally
}

/// Weekday with the most watches; ties break by first appearance in the
/// collection order. "No data" when nothing has been watched.
fn most_productive_day(watched: &[WatchedEntry]) -> String {
    let mut tally: Vec<(String, u32)> = Vec::new();
    for entry in watched {
        let day = entry.date_watched.format("%A").to_string();
        match tally.iter_mut().find(|(name, _)| *name == day) {
            Some((_, count)) => *count += 1,
            None => tally.push((day, 1)),
        }
    }

    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
        .into_iter()
        .next()
        .map(|(day, _)| day)
        .unwrap_or_else(|| NO_DATA.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use flicklog_models::{Genre, MovieId, MovieSummary};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn entry(id: u64, watched_at: DateTime<Utc>, rating: u8) -> WatchedEntry {
        WatchedEntry {
            movie: MovieSummary {
                id: MovieId::from(id),
                title: format!("Movie {}", id),
                poster_path: None,
                release_date: None,
                genre_ids: None,
                genres: None,
            },
            date_watched: watched_at,
            user_rating: rating,
            user_comment: String::new(),
            review_date: None,
        }
    }

    fn with_genre_ids(mut e: WatchedEntry, codes: &[u32]) -> WatchedEntry {
        e.movie.genre_ids = Some(codes.to_vec());
        e
    }

    fn with_genres(mut e: WatchedEntry, names: &[&str]) -> WatchedEntry {
        e.movie.genres = Some(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| Genre {
                    id: i as u32,
                    name: n.to_string(),
                })
                .collect(),
        );
        e
    }

    #[test]
    fn empty_collection_yields_the_defined_empty_state() {
        let stats = compute(&[], 0, now());
        assert_eq!(stats.total_watched, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert!(stats.favorite_genres.is_empty());
        assert_eq!(stats.most_productive_day, NO_DATA);
    }

    #[test]
    fn unrated_entries_are_excluded_from_the_average_entirely() {
        let entries = vec![
            entry(1, now(), 0),
            entry(2, now(), 4),
            entry(3, now(), 2),
        ];
        let stats = compute(&entries, 0, now());
        assert_eq!(stats.average_rating, 3.0);
        assert_eq!(stats.rated_movies, 2);
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let entries = vec![
            entry(1, now(), 5),
            entry(2, now(), 4),
            entry(3, now(), 4),
        ];
        // 13 / 3 = 4.333...
        let stats = compute(&entries, 0, now());
        assert_eq!(stats.average_rating, 4.3);
    }

    #[test]
    fn trailing_windows_count_inclusively() {
        let entries = vec![
            entry(1, now() - Duration::days(2), 0),
            entry(2, now() - Duration::days(7), 0),
            entry(3, now() - Duration::days(20), 0),
            entry(4, now() - Duration::days(31), 0),
        ];
        let stats = compute(&entries, 0, now());
        assert_eq!(stats.total_watched, 4);
        assert_eq!(stats.watched_this_week, 2);
        assert_eq!(stats.watched_this_month, 3);
    }

    #[test]
    fn genre_tally_resolves_codes_and_drops_unknown_ones() {
        let entries = vec![
            with_genre_ids(entry(1, now(), 0), &[28, 878, 4242]),
            with_genre_ids(entry(2, now(), 0), &[28]),
        ];
        let stats = compute(&entries, 0, now());
        assert_eq!(stats.favorite_genres.len(), 2);
        assert_eq!(stats.favorite_genres[0].genre, "Action");
        assert_eq!(stats.favorite_genres[0].count, 2);
        assert_eq!(stats.favorite_genres[1].genre, "Science Fiction");
    }

    #[test]
    fn named_genres_take_precedence_over_code_lists() {
        let both = with_genre_ids(
            with_genres(entry(1, now(), 0), &["Drama"]),
            &[28],
        );
        let stats = compute(&[both], 0, now());
        assert_eq!(stats.favorite_genres.len(), 1);
        assert_eq!(stats.favorite_genres[0].genre, "Drama");
    }

    #[test]
    fn tied_genres_keep_encounter_order() {
        let entries = vec![
            with_genres(entry(1, now(), 0), &["Horror", "Comedy"]),
            with_genres(entry(2, now(), 0), &["Comedy", "Horror"]),
            with_genres(entry(3, now(), 0), &["Drama"]),
        ];
        for _ in 0..10 {
            let stats = compute(&entries, 0, now());
            let names: Vec<_> = stats.favorite_genres.iter().map(|g| g.genre.as_str()).collect();
            // Horror was seen first; Drama trails with a single count.
            assert_eq!(names, vec!["Horror", "Comedy", "Drama"]);
        }
    }

    #[test]
    fn top_three_cap_applies() {
        let entries = vec![with_genres(
            entry(1, now(), 0),
            &["Action", "Drama", "Comedy", "Horror"],
        )];
        let stats = compute(&entries, 0, now());
        assert_eq!(stats.favorite_genres.len(), 3);
    }

    #[test]
    fn most_productive_day_is_the_modal_weekday() {
        // 2025-06-09 is a Monday.
        let monday = Utc.with_ymd_and_hms(2025, 6, 9, 20, 0, 0).unwrap();
        let tuesday = Utc.with_ymd_and_hms(2025, 6, 10, 20, 0, 0).unwrap();
        let entries = vec![
            entry(1, monday, 0),
            entry(2, tuesday, 0),
            entry(3, monday - Duration::weeks(1), 0),
        ];
        let stats = compute(&entries, 0, now());
        assert_eq!(stats.most_productive_day, "Monday");
    }

    #[test]
    fn tied_weekdays_break_by_first_appearance() {
        let monday = Utc.with_ymd_and_hms(2025, 6, 9, 20, 0, 0).unwrap();
        let tuesday = Utc.with_ymd_and_hms(2025, 6, 10, 20, 0, 0).unwrap();
        let stats = compute(&[entry(1, tuesday, 0), entry(2, monday, 0)], 0, now());
        assert_eq!(stats.most_productive_day, "Tuesday");
    }

    #[test]
    fn watchlist_length_passes_through() {
        let stats = compute(&[], 7, now());
        assert_eq!(stats.total_watchlist, 7);
    }
}
