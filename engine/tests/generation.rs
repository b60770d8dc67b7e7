use maze_crawl_core::{CellKind, Dice, GameState};
use maze_crawl_engine::{ConfigError, Game, GameConfig, GameError, Step};
use maze_crawl_rendering::HeadlessFrontend;
use maze_crawl_system_maze_generation::GenerationError;
use maze_crawl_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug)]
struct NeverDice;

impl Dice for NeverDice {
    fn chance(&mut self, _probability: f64) -> bool {
        false
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

fn generate(config: GameConfig, seed: u64) -> Result<Game<NeverDice, HeadlessFrontend>, GameError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Game::generate(config, &mut rng, NeverDice, HeadlessFrontend::new())
}

#[test]
fn goal_is_one_of_ten_boxes_and_apart_from_actors() {
    for seed in 0..32 {
        let game = generate(GameConfig::default(), seed).expect("default map is playable");
        let world = game.world();
        let boxes = query::grid(world).box_cells();
        let goal = query::goal_cell(world);
        let player = query::player_cell(world);
        let pursuer = query::pursuer_cell(world);

        assert_eq!(boxes.len(), 10, "seed {seed}");
        assert!(boxes.contains(&goal), "seed {seed}");
        assert_eq!(query::cell_kind(world, goal), Some(CellKind::Box));
        assert_ne!(goal, player, "seed {seed}");
        assert_ne!(goal, pursuer, "seed {seed}");
        assert_ne!(player, pursuer, "seed {seed}");
        assert!(!boxes.contains(&player), "seed {seed}");
        assert!(!boxes.contains(&pursuer), "seed {seed}");
        assert!(query::is_passable(world, player));
        assert!(query::is_passable(world, pursuer));
    }
}

#[test]
fn generated_game_waits_for_start() {
    let game = generate(GameConfig::default(), 3).expect("default map is playable");
    assert_eq!(game.state(), GameState::Generating);
    assert!(game.frontend().calls().is_empty());
}

#[test]
fn same_seed_places_everything_identically() {
    let first = generate(GameConfig::default(), 21).expect("default map is playable");
    let second = generate(GameConfig::default(), 21).expect("default map is playable");

    let (first, second) = (first.world(), second.world());

    assert_eq!(query::player_cell(first), query::player_cell(second));
    assert_eq!(query::pursuer_cell(first), query::pursuer_cell(second));
    assert_eq!(query::goal_cell(first), query::goal_cell(second));
    assert_eq!(
        query::grid(first).passable_cells(),
        query::grid(second).passable_cells()
    );
}

#[test]
fn narrow_map_is_a_construction_error() {
    let config = GameConfig {
        map_width: 4,
        ..GameConfig::default()
    };

    let error = generate(config, 0).expect_err("map is too narrow");

    assert!(matches!(
        error,
        GameError::Generation(GenerationError::DimensionsTooSmall {
            width: 4,
            height: 25,
            ..
        })
    ));
}

#[test]
fn crowded_map_is_a_construction_error() {
    let config = GameConfig {
        map_width: 5,
        map_height: 5,
        ..GameConfig::default()
    };

    let error = generate(config, 0).expect_err("five by five cannot host twelve placements");

    assert!(matches!(
        error,
        GameError::Generation(GenerationError::InsufficientFreeCells { required: 12, .. })
    ));
}

#[test]
fn invalid_config_is_rejected_before_generation() {
    let config = GameConfig {
        box_count: 0,
        ..GameConfig::default()
    };

    let error = generate(config, 0).expect_err("a goal needs a box");

    assert!(matches!(error, GameError::Config(_)));
}

#[test]
fn start_enters_play_and_awaits_input() {
    let mut game = generate(GameConfig::default(), 5).expect("default map is playable");

    assert_eq!(game.start().expect("headless frontend never fails"), Step::AwaitingInput);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.frontend().frame_count(), 1);
}

#[test]
fn oversized_map_is_a_construction_error() {
    let config = GameConfig {
        map_width: u32::MAX,
        map_height: u32::MAX,
        ..GameConfig::default()
    };

    let error = generate(config, 0).expect_err("map exceeds the generator's bounds");

    assert!(matches!(
        error,
        GameError::Generation(GenerationError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
            ..
        })
    ));
}

#[test]
fn oversized_viewport_is_rejected_before_generation() {
    let config = GameConfig {
        viewport_height: u32::MAX,
        ..GameConfig::default()
    };

    let error = generate(config, 0).expect_err("viewport exceeds the drawable window");

    assert!(matches!(
        error,
        GameError::Config(ConfigError::ViewportTooLarge {
            height: u32::MAX,
            ..
        })
    ));
}

#[test]
fn game_keeps_its_config_and_hands_back_the_frontend() {
    let config = GameConfig {
        box_count: 4,
        room_attempts: 2,
        ..GameConfig::default()
    };
    let mut game = generate(config.clone(), 8).expect("map is playable");
    assert_eq!(game.config(), &config);
    assert_eq!(query::grid(game.world()).box_cells().len(), 4);

    let _ = game.start().expect("headless frontend never fails");
    let frontend = game.into_frontend();
    assert_eq!(frontend.frame_count(), 1);
    assert_eq!(frontend.messages().len(), 4);
}
