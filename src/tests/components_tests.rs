#[cfg(test)]
mod shape_tests {
    use crate::components::{Shape, ShapeKind};

    #[test]
    fn test_shape_dimensions() {
        let i_shape = Shape::new(ShapeKind::I);
        assert_eq!((i_shape.width(), i_shape.height()), (4, 1));

        let o_shape = Shape::new(ShapeKind::O);
        assert_eq!((o_shape.width(), o_shape.height()), (2, 2));

        let t_shape = Shape::new(ShapeKind::T);
        assert_eq!((t_shape.width(), t_shape.height()), (3, 2));
    }

    #[test]
    fn test_shape_copies_catalog_pattern() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            let pattern: Vec<Vec<u8>> = kind.pattern().iter().map(|row| row.to_vec()).collect();
            assert_eq!(shape.cells(), pattern.as_slice());
            assert_eq!(shape.kind(), kind);
        }
    }

    #[test]
    fn test_occupied_cells() {
        let t_shape = Shape::new(ShapeKind::T);
        let cells: Vec<_> = t_shape.occupied().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);

        for kind in ShapeKind::ALL {
            assert_eq!(Shape::new(kind).occupied().count(), 4);
        }
    }

    #[test]
    fn test_random_only_returns_catalog_shapes() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let kind = ShapeKind::random();
            assert!(ShapeKind::ALL.contains(&kind));
            seen.insert(kind);

            let shape = Shape::random();
            assert!(ShapeKind::ALL.contains(&shape.kind()));
        }
        // 1000 draws over three kinds should hit each of them
        assert_eq!(seen.len(), ShapeKind::ALL.len());
    }

    #[test]
    fn test_markers_are_distinct_and_nonzero() {
        for kind in ShapeKind::ALL {
            assert_ne!(kind.marker(), 0);
            assert_eq!(ShapeKind::from_marker(kind.marker()), Some(kind));
        }
        assert_eq!(ShapeKind::from_marker(0), None);
        assert_eq!(ShapeKind::from_marker(42), None);
    }
}

#[cfg(test)]
mod grid_tests {
    use crate::components::{Grid, Position, Shape, ShapeKind, collides, fits};
    use crate::game::{COLS, ROWS};

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.rows().len(), ROWS);
        assert!(grid.rows().iter().all(|row| row.len() == COLS));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_render_o_piece_at_spawn() {
        let shape = Shape::new(ShapeKind::O);
        let grid = Grid::render(&shape, Position { x: 4, y: 0 });

        for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
            assert_ne!(grid.cell(x, y), 0, "cell ({x}, {y}) should be occupied");
        }
        assert_eq!(grid.occupied_count(), 4);
        assert_eq!(ROWS * COLS - grid.occupied_count(), 196);
    }

    #[test]
    fn test_render_marks_exactly_shape_cells() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            let corners = [
                Position { x: 0, y: 0 },
                Position {
                    x: COLS as i32 - shape.width(),
                    y: ROWS as i32 - shape.height(),
                },
                Position { x: 3, y: 7 },
            ];

            for position in corners {
                let grid = Grid::render(&shape, position);
                let expected: Vec<(i32, i32)> = shape
                    .occupied()
                    .map(|(dx, dy)| (position.x + dx, position.y + dy))
                    .collect();

                for y in 0..ROWS as i32 {
                    for x in 0..COLS as i32 {
                        let cell = grid.get(x, y).unwrap();
                        if expected.contains(&(x, y)) {
                            assert_eq!(cell, kind.marker());
                        } else {
                            assert_eq!(cell, 0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_render_t_piece_leaves_gaps() {
        let shape = Shape::new(ShapeKind::T);
        let grid = Grid::render(&shape, Position { x: 0, y: 0 });

        assert_eq!(grid.cell(0, 0), 0);
        assert_eq!(grid.cell(1, 0), ShapeKind::T.marker());
        assert_eq!(grid.cell(2, 0), 0);
        assert_eq!(grid.rows()[1][..3], [3, 3, 3]);
    }

    #[test]
    fn test_render_skips_cells_outside_the_grid() {
        let shape = Shape::new(ShapeKind::I);
        let grid = Grid::render(&shape, Position { x: 8, y: 0 });

        assert_eq!(grid.occupied_count(), 2);
        assert_ne!(grid.cell(8, 0), 0);
        assert_ne!(grid.cell(9, 0), 0);
    }

    #[test]
    fn test_get_and_set_bounds() {
        let mut grid = Grid::new();
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, ROWS as i32), None);
        assert!(!grid.set(COLS as i32, 0, 1));

        assert!(grid.set(3, 4, 7));
        assert_eq!(grid.get(3, 4), Some(7));
        assert!(grid.is_occupied(3, 4));

        grid.clear();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_collides_with_occupied_cell() {
        let shape = Shape::new(ShapeKind::O);
        let mut grid = Grid::new();
        grid.set(5, 1, 9);

        assert!(collides(Position { x: 4, y: 0 }, &shape, &grid));
        assert!(collides(Position { x: 5, y: 1 }, &shape, &grid));
        assert!(!collides(Position { x: 6, y: 0 }, &shape, &grid));
        assert!(!collides(Position { x: 0, y: 10 }, &shape, &grid));
    }

    #[test]
    fn test_collides_ignores_empty_shape_cells() {
        // The T's top corners are empty, so a block there is no overlap
        let shape = Shape::new(ShapeKind::T);
        let mut grid = Grid::new();
        grid.set(0, 0, 1);
        grid.set(2, 0, 1);

        assert!(!collides(Position { x: 0, y: 0 }, &shape, &grid));
        assert!(fits(Position { x: 0, y: 0 }, &shape, &grid));
    }

    #[test]
    fn test_fits_rejects_out_of_bounds() {
        let shape = Shape::new(ShapeKind::I);
        let grid = Grid::new();

        assert!(!collides(Position { x: 8, y: 0 }, &shape, &grid));
        assert!(!fits(Position { x: 8, y: 0 }, &shape, &grid));
        assert!(!fits(Position { x: -1, y: 0 }, &shape, &grid));
        assert!(!fits(Position { x: 0, y: ROWS as i32 }, &shape, &grid));
        assert!(fits(Position { x: 6, y: 19 }, &shape, &grid));
    }
}

#[cfg(test)]
mod game_state_tests {
    use crate::commands::Command;
    use crate::components::{Direction, GameState, Grid, Position, Shape, ShapeKind};
    use crate::game::{COLS, ROWS, SPAWN_X, SPAWN_Y};
    use crate::tests::test_utils::state_at;

    #[test]
    fn test_new_state_starts_at_spawn() {
        let state = GameState::new(Shape::new(ShapeKind::I));
        assert_eq!(state.position, Position { x: SPAWN_X, y: SPAWN_Y });
        assert_eq!(state.position, Position { x: 4, y: 0 });
    }

    #[test]
    fn test_left_at_left_edge_never_moves() {
        let grid = Grid::new();
        for kind in ShapeKind::ALL {
            let mut state = state_at(kind, 0, 5);
            assert!(!state.attempt_move(Direction::Left, &grid));
            assert_eq!(state.position, Position { x: 0, y: 5 });
        }
    }

    #[test]
    fn test_right_at_right_edge_never_moves() {
        let grid = Grid::new();
        for kind in ShapeKind::ALL {
            let width = Shape::new(kind).width();
            let mut state = state_at(kind, COLS as i32 - width, 5);
            assert!(!state.attempt_move(Direction::Right, &grid));
            assert_eq!(state.position.x + width, COLS as i32);
        }
    }

    #[test]
    fn test_right_stops_at_edge_for_o_piece() {
        let grid = Grid::new();
        let mut state = state_at(ShapeKind::O, 4, 0);

        let moved: Vec<bool> = (0..5)
            .map(|_| state.attempt_move(Direction::Right, &grid))
            .collect();

        assert_eq!(moved, vec![true, true, true, true, false]);
        assert_eq!(state.position, Position { x: 8, y: 0 });
    }

    #[test]
    fn test_down_stops_at_floor() {
        let grid = Grid::new();
        let mut state = state_at(ShapeKind::O, 4, ROWS as i32 - 3);

        assert!(state.attempt_move(Direction::Down, &grid));
        assert_eq!(state.position.y, ROWS as i32 - 2);
        assert!(!state.attempt_move(Direction::Down, &grid));
        assert_eq!(state.position.y, ROWS as i32 - 2);
    }

    #[test]
    fn test_move_blocked_by_settled_cells() {
        let mut grid = Grid::new();
        grid.set(4, 2, 1);
        let mut state = state_at(ShapeKind::O, 4, 0);

        assert!(!state.attempt_move(Direction::Down, &grid));
        assert_eq!(state.position, Position { x: 4, y: 0 });

        // Sideways is still free
        assert!(state.attempt_move(Direction::Left, &grid));
        assert_eq!(state.position, Position { x: 3, y: 0 });
    }

    #[test]
    fn test_tick_follows_move_down_rules() {
        let mut grid = Grid::new();
        let mut state = state_at(ShapeKind::I, 0, 0);

        assert!(state.tick(&grid));
        assert_eq!(state.position.y, 1);

        grid.set(2, 2, 1);
        assert!(!state.tick(&grid));
        assert_eq!(state.position.y, 1);
    }

    #[test]
    fn test_rotate_is_a_no_op() {
        let grid = Grid::new();
        let state = state_at(ShapeKind::T, 3, 3);

        assert_eq!(state.transition(Command::Rotate, &grid), None);

        let mut applied = state.clone();
        assert!(!applied.apply(Command::Rotate, &grid));
        assert_eq!(applied, state);
    }

    #[test]
    fn test_transition_does_not_mutate_input() {
        let grid = Grid::new();
        let state = state_at(ShapeKind::O, 4, 0);

        let next = state.transition(Command::MoveLeft, &grid).unwrap();
        assert_eq!(next.position, Position { x: 3, y: 0 });
        assert_eq!(state.position, Position { x: 4, y: 0 });
        assert_eq!(next.shape, state.shape);
    }

    #[test]
    fn test_candidate_clamps_to_grid() {
        let state = state_at(ShapeKind::I, 6, ROWS as i32 - 1);
        assert_eq!(state.candidate(Direction::Right), Position { x: 6, y: 19 });
        assert_eq!(state.candidate(Direction::Down), Position { x: 6, y: 19 });
        assert_eq!(state.candidate(Direction::Left), Position { x: 5, y: 19 });
    }

    #[test]
    fn test_render_follows_state() {
        let state = state_at(ShapeKind::O, 4, 0);
        assert_eq!(
            state.render(),
            Grid::render(&state.shape, Position { x: 4, y: 0 })
        );
    }
}

#[cfg(test)]
mod gravity_tests {
    use crate::components::Gravity;
    use std::time::Duration;

    #[test]
    fn test_default_interval_is_one_second() {
        assert_eq!(Gravity::default().interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_advance_counts_due_ticks() {
        let mut gravity = Gravity::new(Duration::from_secs(1));

        assert_eq!(gravity.advance(Duration::from_millis(400)), 0);
        assert_eq!(gravity.advance(Duration::from_millis(600)), 1);
        assert_eq!(gravity.advance(Duration::from_millis(2500)), 2);
        assert_eq!(gravity.advance(Duration::from_millis(500)), 1);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut gravity = Gravity::new(Duration::ZERO);
        assert_eq!(gravity.interval(), Duration::from_millis(1));
        assert_eq!(gravity.advance(Duration::from_millis(3)), 3);

        gravity.set_interval(Duration::from_millis(250));
        assert_eq!(gravity.interval(), Duration::from_millis(250));
    }
}
