// Team-name reconciliation across sources

#[cfg(test)]
mod tests {
    use cbb_stats::config::Config;
    use cbb_stats::engine::{name_key, slugify, TeamDirectory};

    const TEAMS: &str = r#"
        [[teams]]
        canonical = "Michigan St."
        aliases = ["Michigan State"]

        [[teams]]
        canonical = "Connecticut"
        aliases = ["UConn"]

        [[teams]]
        canonical = "Miami FL"
        aliases = ["Miami (Fla.)", "Miami Hurricanes"]
    "#;

    #[test]
    fn test_directory_from_config() {
        let config = Config::parse(TEAMS).unwrap();
        let dir = TeamDirectory::from_entries(&config.teams);
        assert_eq!(dir.resolve("Michigan State Spartans"), "Michigan St.");
        assert_eq!(dir.resolve("UConn Huskies"), "Connecticut");
        assert_eq!(dir.resolve("Miami (Fla.) 🔥🤕"), "Miami FL");
        assert_eq!(dir.resolve("Duke 🔥"), "Duke");
        assert_eq!(dir.canonical("Gonzaga"), None);
    }

    #[test]
    fn test_keys_join_sources() {
        // KenPom, Torvik and ESPN spellings of the same schools.
        assert_eq!(name_key("Michigan St."), name_key("Michigan State"));
        assert_eq!(name_key("St. John's"), name_key("Saint John's"));
        assert_eq!(name_key("St. John's Red Storm"), name_key("St. John's"));
        assert_eq!(name_key("Texas A&M Aggies"), name_key("Texas A&M"));
        assert_ne!(name_key("Miami FL"), name_key("Miami OH"));
    }

    #[test]
    fn test_ranked_poll_names_resolve() {
        // Ranked tables prefix the school with "N. ".
        let config = Config::parse(TEAMS).unwrap();
        let dir = TeamDirectory::from_entries(&config.teams);
        assert_eq!(dir.resolve("12. Michigan St."), "Michigan St.");
        assert_eq!(dir.resolve("3. UConn 🔥"), "Connecticut");
        assert_eq!(name_key("1. Duke"), name_key("Duke Blue Devils"));
        assert_eq!(slugify("25. Gonzaga"), "gonzaga");
    }

    #[test]
    fn test_slug_is_stable_across_decorations() {
        assert_eq!(slugify("Duke 🔥"), slugify("Duke"));
        assert_eq!(slugify("Michigan St."), "michigan-st");
    }
}
