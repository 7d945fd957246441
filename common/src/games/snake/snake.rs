use std::collections::{HashSet, VecDeque};

use super::types::{Cell, Direction};

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    body_set: HashSet<Cell>,
}

impl Snake {
    /// Lays `length` segments in a straight line from `head`, trailing
    /// opposite to `direction`.
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let trailing = direction.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut body_set = HashSet::with_capacity(length);

        let mut segment = head;
        for _ in 0..length.max(1) {
            body.push_back(segment);
            body_set.insert(segment);
            segment = segment.step(trailing);
        }

        Self { body, body_set }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body_set.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub(super) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
        self.body_set.insert(cell);
    }

    pub(super) fn pop_tail(&mut self) {
        if self.body.len() > 1
            && let Some(tail) = self.body.pop_back()
        {
            self.body_set.remove(&tail);
        }
    }

    #[cfg(test)]
    pub(super) fn from_cells(cells: &[Cell]) -> Self {
        Self {
            body: cells.iter().copied().collect(),
            body_set: cells.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trails_behind_head() {
        let snake = Snake::new(Cell::new(5, 10), Direction::Right, 3);
        let cells: Vec<Cell> = snake.cells().collect();
        assert_eq!(cells, vec![Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)]);
        assert_eq!(snake.head(), Cell::new(5, 10));
        assert!(snake.occupies(Cell::new(3, 10)));
        assert!(!snake.occupies(Cell::new(6, 10)));
    }

    #[test]
    fn test_push_and_pop_keep_set_in_sync() {
        let mut snake = Snake::new(Cell::new(5, 10), Direction::Right, 3);
        snake.push_head(Cell::new(6, 10));
        snake.pop_tail();
        assert_eq!(snake.len(), 3);
        assert!(snake.occupies(Cell::new(6, 10)));
        assert!(!snake.occupies(Cell::new(3, 10)));
    }

    #[test]
    fn test_pop_tail_never_empties() {
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Right, 1);
        snake.pop_tail();
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }
}
