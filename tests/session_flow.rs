use twentyfour::app::App;
use twentyfour::config::Config;
use twentyfour::engine::Difficulty;
use twentyfour::engine::filter::SELECTED_DIFFICULTIES_KEY;
use twentyfour::preferences::{ColorScheme, Language};
use twentyfour::store::Store;
use twentyfour::store::json_store::JsonStore;

fn open_app(dir: &std::path::Path, seed: u64) -> App {
    let config = Config {
        seed: Some(seed),
        data_dir: dir.to_string_lossy().to_string(),
        ..Config::default()
    };
    let store = JsonStore::with_base_dir(config.data_dir()).unwrap();
    App::new(config, Box::new(store)).unwrap()
}

#[test]
fn filter_and_preferences_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut app = open_app(dir.path(), 1);
        assert!(app.toggle_difficulty(Difficulty::Easy));
        assert!(app.toggle_difficulty(Difficulty::Hardest));
        app.set_color_scheme(ColorScheme::Dark);
        app.set_language(Language::English);
    }

    let mut app = open_app(dir.path(), 2);
    assert!(!app.filter().is_selected(Difficulty::Easy));
    assert!(!app.filter().is_selected(Difficulty::Hardest));
    assert_eq!(app.preferences().color_scheme, ColorScheme::Dark);
    assert_eq!(app.preferences().language, Language::English);

    for _ in 0..40 {
        let entry = app.deal_hand().unwrap();
        assert!(matches!(
            entry.difficulty,
            Difficulty::Medium | Difficulty::Hard
        ));
    }
}

#[test]
fn history_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut app = open_app(dir.path(), 3);
        app.deal_hand();
        app.deal_hand();
        assert_eq!(app.total_hands_count(), 2);
    }
    let app = open_app(dir.path(), 3);
    assert_eq!(app.total_hands_count(), 0);
    assert!(app.history().is_empty());
}

#[test]
fn corrupt_saved_filter_selects_everything() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        store
            .set(SELECTED_DIFFICULTIES_KEY, r#"["impossible", 3]"#)
            .unwrap();
    }
    let app = open_app(dir.path(), 4);
    for &d in Difficulty::all() {
        assert!(app.filter().is_selected(d));
    }
}

#[test]
fn hand_numbers_point_into_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open_app(dir.path(), 5);
    for _ in 0..100 {
        let entry = app.deal_hand().cloned().unwrap();
        let puzzle = app.dataset().get(entry.hand_number - 1).unwrap();
        assert_eq!(Some(puzzle), app.current_puzzle());
        assert_eq!(puzzle.solution(), entry.solution);
    }
}
