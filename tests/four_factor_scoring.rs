// Four Factor scoring against a champion baseline

#[cfg(test)]
mod tests {
    use cbb_stats::config::Config;
    use cbb_stats::engine::four_factors::{
        four_factor_score, rank, score_population, summarize, Baseline, ScoreScale,
    };
    use cbb_stats::engine::TeamFactors;

    const CHAMPIONS: &str = r#"[
        {"team":"Connecticut","efg_pct":56.2,"tov_pct":15.8,"orb_pct":34.9,"ftr":33.1,
         "efg_pct_d":45.1,"tov_pct_d":16.5,"drb_pct":73.0,"ftr_d":27.4},
        {"team":"Kansas","efg_pct":54.0,"tov_pct":16.9,"orb_pct":31.2,"ftr":31.0,
         "efg_pct_d":46.8,"tov_pct_d":19.6,"drb_pct":71.8,"ftr_d":29.9},
        {"team":"Baylor","efg_pct":55.4,"tov_pct":17.4,"orb_pct":36.6,"ftr":29.2,
         "efg_pct_d":47.5,"tov_pct_d":23.5,"drb_pct":70.1,"ftr_d":33.0},
        {"team":"Virginia","efg_pct":54.9,"tov_pct":14.0,"orb_pct":28.5,"ftr":28.4,
         "efg_pct_d":44.2,"tov_pct_d":19.7,"drb_pct":75.4,"ftr_d":25.8}
    ]"#;

    fn champions() -> Vec<TeamFactors> {
        serde_json::from_str(CHAMPIONS).unwrap()
    }

    #[test]
    fn test_score_against_champion_baseline() {
        let champs = champions();
        let margins: Vec<_> = champs.iter().map(|t| t.factors.margins()).collect();
        let baseline = Baseline::from_population(&margins).unwrap();

        let contenders = vec![champs[0].clone(), champs[3].clone()];
        let scores = score_population(&contenders, Some(&baseline), &Config::default().four_factor);
        assert_eq!(scores.len(), 2);
        for s in &scores {
            assert!((0.0..=100.0).contains(&s.score), "{} scored {}", s.team, s.score);
            let expected = four_factor_score(s.index, &ScoreScale::default());
            assert!((s.score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_average_champion_scores_fifty() {
        let champs = champions();
        let scores = score_population(&champs, None, &Config::default().four_factor);
        let mean_index: f64 = scores.iter().map(|s| s.index).sum::<f64>() / scores.len() as f64;
        assert!(mean_index.abs() < 1e-9, "z-scores against own population average to 0");
        let summary = summarize(&scores).unwrap();
        assert!((summary.mean_score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_scale_from_config() {
        let config = Config::parse("[four_factor]\ncenter = 60.0\nscale = 10.0").unwrap();
        let mut scores = score_population(&champions(), None, &config.four_factor);
        rank(&mut scores);
        assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
        for s in &scores {
            let expected = (60.0 + 10.0 * s.index).clamp(0.0, 100.0);
            assert!((s.score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_scores_serialize_with_margins() {
        let scores = score_population(&champions(), None, &Config::default().four_factor);
        let json = serde_json::to_value(&scores).unwrap();
        let first = &json[0];
        assert_eq!(first["team"], "Connecticut");
        assert!(first["margins"]["efg_margin"].is_number());
        assert!(first["index"].is_number());
        assert!(first["score"].is_number());
    }
}
