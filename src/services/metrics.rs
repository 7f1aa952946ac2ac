use chrono::Utc;
use rand::Rng;

use crate::database::models::{ContentCounts, DashboardMetrics};

/// Combines real counts with illustrative trend numbers.
///
/// Only the counts are meaningful; the change figures and visitor numbers are
/// placeholders until real analytics exist.
pub fn dashboard_metrics<R: Rng + ?Sized>(
    counts: ContentCounts,
    refresh_interval_seconds: u64,
    rng: &mut R,
) -> DashboardMetrics {
    DashboardMetrics {
        total_articles: counts.articles,
        media_files: counts.media_files,
        video_links: counts.video_links,
        visitors: rng.random_range(2000..7000),
        articles_change: rng.random_range(1..=10),
        media_change: rng.random_range(5..25),
        video_change: rng.random_range(1..=8),
        visitors_change: rng.random_range(10..35),
        refresh_interval_seconds,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn counts_pass_through_and_trends_stay_in_range() {
        let counts = ContentCounts {
            articles: 12,
            media_files: 40,
            video_links: 7,
        };
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let metrics = dashboard_metrics(counts, 30, &mut rng);
            assert_eq!(metrics.total_articles, 12);
            assert_eq!(metrics.media_files, 40);
            assert_eq!(metrics.video_links, 7);
            assert_eq!(metrics.refresh_interval_seconds, 30);
            assert!((2000..7000).contains(&metrics.visitors));
            assert!((1..=10).contains(&metrics.articles_change));
            assert!((5..25).contains(&metrics.media_change));
            assert!((1..=8).contains(&metrics.video_change));
            assert!((10..35).contains(&metrics.visitors_change));
        }
    }
}
