//! Structural tests for the maze generator.

#[cfg(test)]
mod tests {
    use super::super::generator::{Direction, MazeGraph};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SIZES: [(usize, usize); 5] = [(2, 2), (3, 7), (10, 10), (25, 25), (17, 4)];

    #[test]
    fn test_spanning_tree_without_loops() {
        for seed in 0..20u64 {
            for (w, h) in SIZES {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let maze = MazeGraph::generate(w, h, 0.0, &mut rng);

                assert!(maze.is_fully_connected(), "seed {} {}x{} не связный", seed, w, h);
                // Дерево: ровно W×H−1 рёбер
                assert_eq!(maze.open_edge_count(), w * h - 1, "seed {} {}x{}", seed, w, h);
            }
        }
    }

    #[test]
    fn test_loops_stay_connected_and_add_edges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let maze = MazeGraph::generate(25, 25, 0.15, &mut rng);

        assert!(maze.is_fully_connected());
        assert!(maze.open_edge_count() > 25 * 25 - 1, "loop pass не добавил ни одного цикла");
    }

    #[test]
    fn test_walls_symmetric() {
        for seed in 0..10u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let maze = MazeGraph::generate(12, 9, 0.3, &mut rng);
            assert!(maze.walls_are_symmetric(), "seed {}", seed);
        }
    }

    #[test]
    fn test_border_walls_never_removed() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let maze = MazeGraph::generate(8, 6, 1.0, &mut rng);

        for x in 0..8 {
            assert!(maze.has_wall(x, 0, Direction::North));
            assert!(maze.has_wall(x, 5, Direction::South));
        }
        for z in 0..6 {
            assert!(maze.has_wall(0, z, Direction::West));
            assert!(maze.has_wall(7, z, Direction::East));
        }
    }

    #[test]
    fn test_loop_chance_one_opens_every_inner_wall() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let maze = MazeGraph::generate(5, 5, 1.0, &mut rng);

        // Все внутренние рёбра: (W−1)·H + W·(H−1)
        assert_eq!(maze.open_edge_count(), 4 * 5 + 5 * 4);
    }

    #[test]
    fn test_all_cells_visited_after_generation() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let maze = MazeGraph::generate(6, 6, 0.0, &mut rng);
        assert!(maze.cells().iter().all(|c| c.visited));
    }

    #[test]
    fn test_degenerate_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let empty = MazeGraph::generate(0, 5, 0.5, &mut rng);
        assert!(empty.cells().is_empty());
        assert!(empty.is_fully_connected());

        let single = MazeGraph::generate(1, 1, 0.5, &mut rng);
        assert_eq!(single.open_edge_count(), 0);
        assert!(single.is_fully_connected());
    }

    #[test]
    fn test_cell_world_position_centered() {
        let maze = MazeGraph::closed(25, 25);
        let pos = maze.cell_world_position(1, 1, 5.0).expect("cell exists");
        assert_eq!((pos.x, pos.z), (-57.5, -57.5));
        assert!(maze.cell_world_position(25, 0, 5.0).is_none());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = MazeGraph::generate(15, 15, 0.15, &mut ChaCha8Rng::seed_from_u64(99));
        let b = MazeGraph::generate(15, 15, 0.15, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
