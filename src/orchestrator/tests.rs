// src/orchestrator/tests.rs

use super::*;
use crate::backends::mock::MockDriver;
use crate::color::{Color, NamedColor};

// Surface sized so default-config cells are exactly 10x10 px.
const SURFACE_WIDTH: f64 = 106.0 * 12.0;
const SURFACE_HEIGHT: f64 = 17.0 * 12.0;

const ACTIVE: Color = Color::Named(NamedColor::White);
const INACTIVE: Color = Color::Named(NamedColor::Black);

fn mock_driver() -> MockDriver {
    MockDriver::new(SURFACE_WIDTH, SURFACE_HEIGHT)
}

fn test_mapper() -> CoordinateMapper {
    CoordinateMapper::new(106, 17, 2.0, SURFACE_WIDTH, SURFACE_HEIGHT)
}

/// Pixel origin of a cell, used as a pointer position targeting it.
fn point_on(cell: CellIndex) -> (f64, f64) {
    let origin = test_mapper().cell_to_origin(cell);
    (origin.x, origin.y)
}

fn click(button: MouseButton, cell: CellIndex) -> [BackendEvent; 2] {
    let (x, y) = point_on(cell);
    [
        BackendEvent::MouseButtonPress { button, x, y },
        BackendEvent::MouseButtonRelease { button, x, y },
    ]
}

/// Queues the events, runs one event cycle, and returns the status.
fn run_events(
    grid: &mut GridState,
    driver: &mut MockDriver,
    events: impl IntoIterator<Item = BackendEvent>,
) -> OrchestratorStatus {
    for event in events {
        driver.push_event(event);
    }
    let config = Config::default();
    let mut orchestrator = AppOrchestrator::new(grid, driver, &config);
    orchestrator
        .process_event_cycle()
        .expect("event cycle failed")
}

fn fill_rects(driver: &MockDriver) -> Vec<RenderCommand> {
    driver
        .commands()
        .iter()
        .filter(|c| matches!(c, RenderCommand::FillRect { .. }))
        .cloned()
        .collect()
}

#[test_log::test]
fn plain_click_toggles_and_redraws_one_cell() {
    let mut grid = GridState::new(106, 17);
    let mut driver = mock_driver();
    let cell = CellIndex { column: 3, row: 5 };

    run_events(&mut grid, &mut driver, click(MouseButton::Middle, cell));

    assert!(grid.is_active(3, 5));
    let expected = RenderCommand::FillRect {
        origin: test_mapper().cell_to_origin(cell),
        width: test_mapper().cell_width(),
        height: test_mapper().cell_height(),
        color: ACTIVE,
    };
    assert_eq!(driver.commands(), &[expected], "exactly one cell redraw");
    assert_eq!(driver.presents(), 1);
}

#[test_log::test]
fn second_click_toggles_back_off() {
    let mut grid = GridState::new(106, 17);
    let mut driver = mock_driver();
    let cell = CellIndex { column: 0, row: 16 };

    let events = click(MouseButton::Middle, cell)
        .into_iter()
        .chain(click(MouseButton::Middle, cell));
    run_events(&mut grid, &mut driver, events);

    assert!(!grid.is_active(0, 16));
    let rects = fill_rects(&driver);
    assert_eq!(rects.len(), 2);
    assert!(
        matches!(rects[1], RenderCommand::FillRect { color, .. } if color == INACTIVE),
        "second redraw paints the inactive color"
    );
}

#[test_log::test]
fn held_primary_button_paints_across_moved_cells() {
    let mut grid = GridState::new(106, 17);
    let mut driver = mock_driver();
    let start = CellIndex { column: 10, row: 4 };
    let dragged = CellIndex { column: 11, row: 4 };
    let after = CellIndex { column: 12, row: 4 };

    let (sx, sy) = point_on(start);
    let (dx, dy) = point_on(dragged);
    let (ax, ay) = point_on(after);
    run_events(
        &mut grid,
        &mut driver,
        [
            BackendEvent::MouseButtonPress {
                button: MouseButton::Left,
                x: sx,
                y: sy,
            },
            BackendEvent::MouseMove { x: dx, y: dy },
            BackendEvent::MouseButtonRelease {
                button: MouseButton::Left,
                x: dx,
                y: dy,
            },
            // No button held any more: movement must not paint.
            BackendEvent::MouseMove { x: ax, y: ay },
        ],
    );

    assert!(grid.is_active(10, 4));
    assert!(grid.is_active(11, 4));
    assert!(!grid.is_active(12, 4));
    assert_eq!(fill_rects(&driver).len(), 2);
}

#[test_log::test]
fn held_secondary_button_erases() {
    let mut grid = GridState::new(106, 17);
    grid.activate(8, 2);
    let mut driver = mock_driver();

    run_events(
        &mut grid,
        &mut driver,
        click(MouseButton::Right, CellIndex { column: 8, row: 2 }),
    );

    assert!(!grid.is_active(8, 2));
    let rects = fill_rects(&driver);
    assert_eq!(rects.len(), 1);
    assert!(matches!(rects[0], RenderCommand::FillRect { color, .. } if color == INACTIVE));
}

#[test_log::test]
fn pointer_positions_outside_the_surface_clamp_to_edge_cells() {
    let mut grid = GridState::new(106, 17);
    let mut driver = mock_driver();

    run_events(
        &mut grid,
        &mut driver,
        [
            BackendEvent::MouseButtonPress {
                button: MouseButton::Middle,
                x: -400.0,
                y: 1.0e5,
            },
            BackendEvent::MouseButtonRelease {
                button: MouseButton::Middle,
                x: -400.0,
                y: 1.0e5,
            },
        ],
    );

    // Left of the surface and below it: bottom-left cell.
    assert!(grid.is_active(0, 0));
}

#[test_log::test]
fn import_replots_the_grid_and_repaints_everything() {
    let mut grid = GridState::new(106, 17);
    grid.activate(50, 9); // stale state that the import must wipe
    let mut driver = mock_driver();

    run_events(
        &mut grid,
        &mut driver,
        [BackendEvent::ImportText {
            text: "34".to_string(),
        }],
    );

    for column in 0..106 {
        for row in 0..17 {
            assert_eq!(grid.is_active(column, row), column == 0 && row == 1);
        }
    }
    // Full repaint: one clear, a line per slot boundary, a rect per cell.
    assert_eq!(driver.commands().first(), Some(&RenderCommand::ClearSurface { color: INACTIVE }));
    let lines = driver
        .commands()
        .iter()
        .filter(|c| matches!(c, RenderCommand::DrawLine { .. }))
        .count();
    assert_eq!(lines, 107 + 18);
    let rects = fill_rects(&driver);
    assert_eq!(rects.len(), 106 * 17);
    let active_rects: Vec<_> = rects
        .iter()
        .filter(|c| matches!(c, RenderCommand::FillRect { color, .. } if *color == ACTIVE))
        .collect();
    assert_eq!(active_rects.len(), 1);
    assert_eq!(
        active_rects[0],
        &RenderCommand::FillRect {
            origin: test_mapper().cell_to_origin(CellIndex { column: 0, row: 1 }),
            width: test_mapper().cell_width(),
            height: test_mapper().cell_height(),
            color: ACTIVE,
        }
    );
    assert_eq!(driver.presents(), 1);
}

#[test_log::test]
fn import_of_non_multiple_reports_error_and_keeps_state() {
    let mut grid = GridState::new(106, 17);
    grid.activate(5, 5);
    let before = grid.clone();
    let mut driver = mock_driver();

    run_events(
        &mut grid,
        &mut driver,
        [BackendEvent::ImportText {
            text: "35".to_string(),
        }],
    );

    assert_eq!(grid, before, "grid must be unchanged on rejected import");
    assert_eq!(
        driver.commands(),
        &[RenderCommand::ShowErrorMessage {
            text: "35 is not divisible by 17".to_string(),
        }]
    );
    assert_eq!(driver.presents(), 0, "no redraw on rejected import");
}

#[test_log::test]
fn import_of_malformed_text_reports_format_error() {
    let mut grid = GridState::new(106, 17);
    let before = grid.clone();
    let mut driver = mock_driver();

    run_events(
        &mut grid,
        &mut driver,
        [BackendEvent::ImportText {
            text: "12a4".to_string(),
        }],
    );

    assert_eq!(grid, before);
    assert_eq!(
        driver.commands(),
        &[RenderCommand::ShowErrorMessage {
            text: "not a valid non-negative decimal number".to_string(),
        }]
    );
}

#[test_log::test]
fn export_sets_output_text_and_copies_it() {
    let mut grid = GridState::new(106, 17);
    grid.activate(0, 0);
    let mut driver = mock_driver();

    run_events(&mut grid, &mut driver, [BackendEvent::ExportRequested]);

    assert_eq!(
        driver.commands(),
        &[
            RenderCommand::SetOutputText {
                text: "17".to_string(),
            },
            RenderCommand::CopyToClipboard {
                text: "17".to_string(),
            },
        ]
    );
}

#[test_log::test]
fn clear_request_blanks_grid_and_repaints() {
    let mut grid = GridState::new(106, 17);
    grid.activate(1, 1);
    grid.activate(100, 13);
    let mut driver = mock_driver();

    run_events(&mut grid, &mut driver, [BackendEvent::ClearRequested]);

    assert_eq!(grid, GridState::new(106, 17));
    assert!(fill_rects(&driver)
        .iter()
        .all(|c| matches!(c, RenderCommand::FillRect { color, .. } if *color == INACTIVE)));
    assert_eq!(driver.presents(), 1);
}

#[test_log::test]
fn close_request_shuts_down_without_processing_later_events() {
    let mut grid = GridState::new(106, 17);
    let mut driver = mock_driver();

    let status = run_events(
        &mut grid,
        &mut driver,
        [BackendEvent::CloseRequested, BackendEvent::ExportRequested],
    );

    assert_eq!(status, OrchestratorStatus::Shutdown);
    assert!(
        driver.commands().is_empty(),
        "events queued after the close request must not run"
    );
}
