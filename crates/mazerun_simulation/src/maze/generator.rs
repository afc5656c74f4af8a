//! Randomized DFS backtracker + loop carving.
//!
//! 1. Spanning tree: стек DFS от случайной клетки, снос стены к случайному
//!    непосещённому соседу (4-connectivity). Результат - дерево.
//! 2. Loop pass: для каждой клетки только north/east стены, с вероятностью
//!    `loop_chance` стена сносится вместе с зеркальной у соседа.
//!
//! Источник случайности инжектится (`&mut impl Rng`): в игре это
//! `DeterministicRng`, в тестах - любой seeded RNG.

use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

/// Сторона клетки. North = -z, South = +z, East = +x, West = -x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Смещение по (x, z)
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            north: true,
            east: true,
            south: true,
            west: true,
        }
    }
}

impl Walls {
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    fn set(&mut self, direction: Direction, closed: bool) {
        match direction {
            Direction::North => self.north = closed,
            Direction::East => self.east = closed,
            Direction::South => self.south = closed,
            Direction::West => self.west = closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeCell {
    pub x: usize,
    pub z: usize,
    pub walls: Walls,
    /// Нужен только во время генерации
    pub visited: bool,
}

impl MazeCell {
    fn new(x: usize, z: usize) -> Self {
        Self {
            x,
            z,
            walls: Walls::default(),
            visited: false,
        }
    }

    /// Центр клетки в world space (лабиринт центрирован в origin)
    pub fn world_position(&self, cell_size: f32, width: usize, height: usize) -> Vec3 {
        Vec3::new(
            (self.x as f32 - width as f32 / 2.0) * cell_size,
            0.0,
            (self.z as f32 - height as f32 / 2.0) * cell_size,
        )
    }
}

/// Лабиринт W×H. После `generate` только читается.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MazeGraph {
    width: usize,
    height: usize,
    /// x-major: index = x * height + z
    cells: Vec<MazeCell>,
}

impl MazeGraph {
    /// Полностью закрытая сетка (все стены на месте)
    pub fn closed(width: usize, height: usize) -> Self {
        let cells = (0..width)
            .flat_map(|x| (0..height).map(move |z| MazeCell::new(x, z)))
            .collect();

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, loop_chance: f32, rng: &mut R) -> Self {
        let mut maze = Self::closed(width, height);
        if maze.cells.is_empty() {
            return maze;
        }

        maze.carve_spanning_tree(rng);
        maze.carve_loops(loop_chance, rng);
        maze
    }

    fn carve_spanning_tree<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let start = (rng.gen_range(0..self.width), rng.gen_range(0..self.height));
        self.mark_visited(start);

        let mut stack = vec![start];
        let mut candidates = Vec::with_capacity(4);

        while let Some(current) = stack.pop() {
            candidates.clear();
            for direction in Direction::ALL {
                if let Some(next) = self.neighbor(current.0, current.1, direction) {
                    if !self.is_visited(next) {
                        candidates.push((direction, next));
                    }
                }
            }

            if candidates.is_empty() {
                continue;
            }

            stack.push(current);
            let (direction, next) = candidates[rng.gen_range(0..candidates.len())];
            self.open_wall(current.0, current.1, direction);
            self.mark_visited(next);
            stack.push(next);
        }
    }

    fn carve_loops<R: Rng + ?Sized>(&mut self, loop_chance: f32, rng: &mut R) {
        for x in 0..self.width {
            for z in 0..self.height {
                for direction in [Direction::North, Direction::East] {
                    if self.has_wall(x, z, direction)
                        && self.neighbor(x, z, direction).is_some()
                        && rng.gen::<f32>() < loop_chance
                    {
                        self.open_wall(x, z, direction);
                    }
                }
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    fn index(&self, x: usize, z: usize) -> Option<usize> {
        (x < self.width && z < self.height).then(|| x * self.height + z)
    }

    pub fn cell(&self, x: usize, z: usize) -> Option<&MazeCell> {
        self.index(x, z).map(|i| &self.cells[i])
    }

    fn is_visited(&self, (x, z): (usize, usize)) -> bool {
        self.cell(x, z).is_some_and(|c| c.visited)
    }

    fn mark_visited(&mut self, (x, z): (usize, usize)) {
        if let Some(i) = self.index(x, z) {
            self.cells[i].visited = true;
        }
    }

    /// Соседняя клетка в направлении (None за границей)
    pub fn neighbor(&self, x: usize, z: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dz) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let nz = z.checked_add_signed(dz)?;
        self.index(nx, nz).map(|_| (nx, nz))
    }

    /// Стена закрыта? Вне сетки - true.
    pub fn has_wall(&self, x: usize, z: usize, direction: Direction) -> bool {
        self.cell(x, z).map_or(true, |c| c.walls.get(direction))
    }

    /// Сносит стену и её зеркальную копию у соседа. Граничные стены не трогает.
    pub fn open_wall(&mut self, x: usize, z: usize, direction: Direction) -> bool {
        let Some((nx, nz)) = self.neighbor(x, z, direction) else {
            return false;
        };
        let (Some(a), Some(b)) = (self.index(x, z), self.index(nx, nz)) else {
            return false;
        };

        self.cells[a].walls.set(direction, false);
        self.cells[b].walls.set(direction.opposite(), false);
        true
    }

    /// Соседи, в которые есть проход
    pub fn open_neighbors(&self, x: usize, z: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| !self.has_wall(x, z, d))
            .filter_map(move |d| self.neighbor(x, z, d))
    }

    /// Количество открытых рёбер между клетками (каждое ребро считается один раз)
    pub fn open_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&d| !c.walls.get(d) && self.neighbor(c.x, c.z, d).is_some())
                    .count()
            })
            .sum()
    }

    /// BFS из (0,0): все клетки достижимы?
    pub fn is_fully_connected(&self) -> bool {
        if self.cells.is_empty() {
            return true;
        }

        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([(0usize, 0usize)]);
        seen[0] = true;
        let mut reached = 1;

        while let Some((x, z)) = queue.pop_front() {
            for (nx, nz) in self.open_neighbors(x, z) {
                if let Some(i) = self.index(nx, nz) {
                    if !seen[i] {
                        seen[i] = true;
                        reached += 1;
                        queue.push_back((nx, nz));
                    }
                }
            }
        }

        reached == self.cells.len()
    }

    /// Стены согласованы между соседями (A.east == B.west и т.д.)
    pub fn walls_are_symmetric(&self) -> bool {
        self.cells.iter().all(|c| {
            Direction::ALL.into_iter().all(|d| match self.neighbor(c.x, c.z, d) {
                Some((nx, nz)) => self.has_wall(c.x, c.z, d) == self.has_wall(nx, nz, d.opposite()),
                None => true,
            })
        })
    }

    pub fn cell_world_position(&self, x: usize, z: usize, cell_size: f32) -> Option<Vec3> {
        self.cell(x, z)
            .map(|c| c.world_position(cell_size, self.width, self.height))
    }
}
