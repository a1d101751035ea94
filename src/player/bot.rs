use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::common::Cell;
use crate::core::config::NUM_SHIPS;
use crate::core::placement::{random_fleet, Placement};

use super::{Player, ShotRecord};

/// Automated player: random fleet, then hunt/target shooting. While some hit
/// has an untried orthogonal neighbour it fires next to a hit; otherwise it
/// picks a random untried cell.
#[derive(Debug, Default)]
pub struct BotPlayer;

impl BotPlayer {
    pub fn new() -> Self {
        Self
    }
}

fn neighbours(cell: Cell, record: &ShotRecord) -> impl Iterator<Item = Cell> + '_ {
    let (row, col) = (cell.row as i64, cell.col as i64);
    [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
        .into_iter()
        .filter(|&(r, c)| {
            r >= 0 && c >= 0 && (r as usize) < record.height() && (c as usize) < record.width()
        })
        .map(|(r, c)| Cell::new(r as usize, c as usize))
        .filter(|&c| record.get(c).is_none())
}

impl Player for BotPlayer {
    fn fleet(
        &mut self,
        rng: &mut SmallRng,
        width: usize,
        height: usize,
    ) -> anyhow::Result<[Placement; NUM_SHIPS]> {
        random_fleet(rng, width, height)
            .ok_or_else(|| anyhow::anyhow!("Unable to fit a fleet on a {}x{} board", width, height))
    }

    fn select_target(&mut self, rng: &mut SmallRng, record: &ShotRecord) -> Cell {
        let targets: Vec<Cell> = record
            .hits()
            .flat_map(|hit| neighbours(hit, record))
            .collect();
        if !targets.is_empty() {
            return targets[rng.random_range(0..targets.len())];
        }
        let open: Vec<Cell> = record.untried().collect();
        if open.is_empty() {
            return Cell::new(0, 0);
        }
        open[rng.random_range(0..open.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::common::ShotOutcome;
    use rand::SeedableRng;

    #[test]
    fn targets_neighbours_of_hits() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut bot = BotPlayer::new();
        let mut record = ShotRecord::new(10, 10);
        record.record(Cell::new(0, 0), ShotOutcome::Hit);
        record.record(Cell::new(1, 0), ShotOutcome::Miss);
        for _ in 0..20 {
            assert_eq!(bot.select_target(&mut rng, &record), Cell::new(0, 1));
        }
    }

    #[test]
    fn never_repeats_a_shot() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut bot = BotPlayer::new();
        let mut record = ShotRecord::new(10, 10);
        for _ in 0..100 {
            let cell = bot.select_target(&mut rng, &record);
            assert!(record.get(cell).is_none());
            record.record(cell, ShotOutcome::Miss);
        }
        assert_eq!(record.shots_fired(), 100);
    }
}
