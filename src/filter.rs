use crate::flights::FlightRecord;
use crate::rank::parse_score;

/// One table line, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based position in the full ranking, not in the filtered output.
    pub rank: usize,
    pub pilot: String,
    pub points: f64,
    pub takeoff: String,
    pub landing: String,
    pub flight_id: String,
}

impl Row {
    fn from_record(rank: usize, points: f64, record: &FlightRecord) -> Self {
        Self {
            rank,
            pilot: record.pilot(),
            points,
            takeoff: record.takeoff().to_string(),
            landing: record.landing_location.clone(),
            flight_id: record.flight_id.clone(),
        }
    }
}

/// Row selection applied to an already ranked list.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Only rows scoring strictly above this. 0 disables.
    pub min_points: f64,
    /// Literal, case-sensitive substring of the takeoff waypoint. Empty disables.
    pub takeoff: String,
    /// Stop once a row at or past this rank has been emitted. 0 disables.
    pub limit: usize,
}

impl Filter {
    fn accepts(&self, points: f64, record: &FlightRecord) -> bool {
        if self.min_points > 0.0 && points <= self.min_points {
            return false;
        }
        self.takeoff.is_empty() || record.takeoff_waypoint.contains(&self.takeoff)
    }

    /// Build display rows from `ranked`, which must already be in rank order.
    ///
    /// The limit is checked against the rank of each emitted row, so skipped
    /// records still use up positions: with `limit = 3` and ranks 1-2 filtered
    /// out, only rank 3 is shown.
    pub fn select(&self, ranked: &[FlightRecord]) -> Vec<Row> {
        let mut rows = Vec::new();
        for (i, record) in ranked.iter().enumerate() {
            let points = parse_score(&record.points);
            if !self.accepts(points, record) {
                continue;
            }
            let rank = i + 1;
            rows.push(Row::from_record(rank, points, record));
            if self.limit > 0 && rank >= self.limit {
                break;
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(first: &str, points: &str, waypoint: &str) -> FlightRecord {
        FlightRecord {
            first_name: first.into(),
            last_name: "Test".into(),
            points: points.into(),
            takeoff_waypoint: waypoint.into(),
            landing_location: "Field".into(),
            ..Default::default()
        }
    }

    fn ranked() -> Vec<FlightRecord> {
        vec![
            flight("A", "210.4", "Brauneck"),
            flight("B", "180", "Tegelberg"),
            flight("C", "150.5", "Brauneck Nord"),
            flight("D", "90", "Hochries"),
            flight("E", "40", "brauneck"),
        ]
    }

    fn ranks(rows: &[Row]) -> Vec<usize> {
        rows.iter().map(|r| r.rank).collect()
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let rows = Filter::default().select(&ranked());
        assert_eq!(ranks(&rows), [1, 2, 3, 4, 5]);
        assert_eq!(rows[0].pilot, "A Test");
        assert_eq!(rows[0].points, f64::from(210.4f32));
        assert_eq!(rows[0].landing, "Field");
    }

    #[test]
    fn test_threshold_is_strict() {
        let filter = Filter { min_points: 150.5, ..Default::default() };
        let rows = filter.select(&ranked());
        assert_eq!(ranks(&rows), [1, 2]);
        assert!(rows.iter().all(|r| r.points > 150.5));
    }

    #[test]
    fn test_takeoff_substring_is_case_sensitive() {
        let filter = Filter { takeoff: "Brauneck".into(), ..Default::default() };
        let rows = filter.select(&ranked());
        assert_eq!(ranks(&rows), [1, 3]);
        assert!(rows.iter().all(|r| r.takeoff.contains("Brauneck")));
    }

    #[test]
    fn test_takeoff_filter_ignores_location_fallback() {
        let records = vec![FlightRecord {
            takeoff_location: "Brauneck".into(),
            ..Default::default()
        }];
        let filter = Filter { takeoff: "Brauneck".into(), ..Default::default() };
        assert!(filter.select(&records).is_empty());
    }

    #[test]
    fn test_filters_combine() {
        let filter = Filter {
            min_points: 100.0,
            takeoff: "Brauneck".into(),
            ..Default::default()
        };
        assert_eq!(ranks(&filter.select(&ranked())), [1, 3]);
    }

    #[test]
    fn test_limit_caps_rows() {
        let filter = Filter { limit: 2, ..Default::default() };
        assert_eq!(ranks(&filter.select(&ranked())), [1, 2]);

        let filter = Filter { limit: 50, ..Default::default() };
        assert_eq!(filter.select(&ranked()).len(), 5);
    }

    #[test]
    fn test_limit_counts_ranked_positions() {
        let filter = Filter {
            takeoff: "Brauneck".into(),
            limit: 2,
            ..Default::default()
        };
        // Rank 1 is emitted; rank 2 is skipped; rank 3 is emitted and, being
        // past the limit, ends the selection.
        assert_eq!(ranks(&filter.select(&ranked())), [1, 3]);

        let filter = Filter {
            takeoff: "Hochries".into(),
            limit: 1,
            ..Default::default()
        };
        assert_eq!(ranks(&filter.select(&ranked())), [4]);
    }

    #[test]
    fn test_limit_never_exceeded() {
        for limit in 1..=6 {
            for takeoff in ["", "Brauneck", "e"] {
                let filter = Filter { takeoff: takeoff.into(), limit, ..Default::default() };
                assert!(filter.select(&ranked()).len() <= limit);
            }
        }
    }

    #[test]
    fn test_unparseable_score_fails_threshold() {
        let records = vec![flight("X", "oops", "Brauneck")];
        let filter = Filter { min_points: 0.5, ..Default::default() };
        assert!(filter.select(&records).is_empty());
        assert_eq!(Filter::default().select(&records)[0].points, 0.0);
    }
}
