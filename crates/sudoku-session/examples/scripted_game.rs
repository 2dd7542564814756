//! Plays a scripted 4x4 game from start to finish against in-memory
//! storage and prints the view after each phase.
//!
//! Run with `RUST_LOG=debug cargo run --example scripted_game` to see
//! the controller's logging.

use sudoku_core::{Difficulty, Generator, Puzzle, Solver};
use sudoku_session::{GameEvent, SessionController, SessionView};
use sudoku_store::{
    GameRepository, GameStorage, MemoryGameStorage, MemorySettingsStorage, MemoryStatisticsStore,
    Settings,
};

fn print_board(view: &SessionView) {
    println!("  [{} | {}]", view.timer_text(), view.difficulty);
    for y in 1..=view.boundary {
        print!("  ");
        for x in 1..=view.boundary {
            let tile = view.board[&sudoku_core::node_key(x, y)];
            if tile.value == 0 {
                print!(". ");
            } else if tile.is_fixed {
                print!("{} ", tile.value);
            } else {
                print!("{}*", tile.value);
            }
        }
        println!();
    }
}

fn main() {
    env_logger::init();

    let games = MemoryGameStorage::new();
    let repo = GameRepository::with_generator(
        games.clone(),
        MemorySettingsStorage::with_settings(Settings {
            boundary: 4,
            difficulty: Difficulty::Easy,
        }),
        Generator::with_seed(7),
    );
    let mut controller = SessionController::new(repo, MemoryStatisticsStore::new());

    controller.handle_event(GameEvent::Start);
    println!("game started:");
    print_board(controller.view());

    // Let some time pass, as a host loop would
    for _ in 0..3 {
        controller.tick();
    }

    // Fill every open cell with the puzzle's unique solution
    let puzzle = games.get_current_game().expect("game was just created");
    let solution = Solver::new()
        .solve(&puzzle)
        .expect("generated board is well-formed")
        .expect("generated puzzle is solvable");
    for (x, y) in Puzzle::coords(4) {
        if puzzle.node(x, y).map(|n| n.is_fixed).unwrap_or(false) {
            continue;
        }
        controller.handle_event(GameEvent::TileFocused { x, y });
        controller.handle_event(GameEvent::InputDigit(
            solution.value(x, y).expect("solution covers the board"),
        ));
    }

    println!("\ngame finished:");
    print_board(controller.view());
    println!(
        "  completed in {}{}",
        controller.view().timer_text(),
        if controller.view().is_new_record {
            " (new record!)"
        } else {
            ""
        }
    );
}
