// Head-to-head projections from adjusted team profiles

#[cfg(test)]
mod tests {
    use cbb_stats::engine::{compare, Location, TeamProfile};

    const PROFILES: &str = r#"[
        {"team":"Auburn","adj_o":128.2,"adj_d":94.9,"adj_tempo":68.9,
         "efg_pct":56.5,"tov_pct":13.8,"orb_pct":33.6,"ftr":36.9,
         "efg_pct_d":45.5,"tov_pct_d":17.5,"drb_pct":71.6,"ftr_d":29.8},
        {"team":"Florida","adj_o":127.0,"adj_d":95.6,"adj_tempo":70.0,
         "efg_pct":54.1,"tov_pct":15.4,"orb_pct":38.8,"ftr":37.6,
         "efg_pct_d":45.5,"tov_pct_d":17.6,"drb_pct":72.8,"ftr_d":33.0}
    ]"#;

    fn profiles() -> Vec<TeamProfile> {
        serde_json::from_str(PROFILES).unwrap()
    }

    #[test]
    fn test_home_court_flips_close_game() {
        let teams = profiles();
        let neutral = compare(&teams[0], &teams[1], Location::Neutral);
        // 33.3 vs 31.4
        assert!((neutral.adj_em_diff - 1.9).abs() < 1e-9);
        assert_eq!(neutral.favored(), Some("Auburn"));
        assert!(neutral.similar_pace());

        let at_florida = compare(&teams[0], &teams[1], Location::TeamB);
        assert!((at_florida.adj_em_diff + 1.1).abs() < 1e-9);
        assert_eq!(at_florida.favored(), Some("Florida"));
    }

    #[test]
    fn test_projected_scores() {
        let teams = profiles();
        let m = compare(&teams[0], &teams[1], Location::Neutral);
        // 128.2 + 95.6 - 100 and 127.0 + 94.9 - 100
        assert!((m.projected_a - 123.8).abs() < 1e-9);
        assert!((m.projected_b - 121.9).abs() < 1e-9);
        assert!((m.projected_margin - 1.9).abs() < 1e-9);
        assert!(m.edges.reb_edge < 0.0, "Florida rebounds better");
    }

    #[test]
    fn test_matchup_serializes() {
        let teams = profiles();
        let m = compare(&teams[0], &teams[1], Location::TeamA);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["location"], "team-a");
        assert_eq!(json["team_b"], "Florida");
        assert!(json["edges"]["efg_margin"].is_number());
    }
}
