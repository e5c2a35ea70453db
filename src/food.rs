// Food arbitration: pick the closest food we can reach strictly before
// every opponent at least as long as us.

use crate::types::Coord;

/// Selects the food cell to chase this turn.
///
/// A food cell qualifies only if, for every opponent whose length is >= ours,
/// our head is strictly closer to it (Manhattan) than that opponent's head.
/// Strictly shorter opponents are ignored. Among qualifying cells the closest
/// wins; exact ties keep the first one in `food` order.
pub fn select_target_food(
    our_body: &[Coord],
    opponents: &[Vec<Coord>],
    food: &[Coord],
) -> Option<Coord> {
    let head = our_body.first()?;
    let our_length = our_body.len();

    let rivals: Vec<Coord> = opponents
        .iter()
        .filter(|body| body.len() >= our_length)
        .filter_map(|body| body.first().copied())
        .collect();

    let mut best: Option<(i32, Coord)> = None;
    for candidate in food {
        let ours = head.manhattan(candidate);
        let contested = rivals.iter().any(|rival| rival.manhattan(candidate) <= ours);
        if contested {
            continue;
        }
        // Strict less-than keeps the earliest of equally distant cells
        if best.map_or(true, |(d, _)| ours < d) {
            best = Some((ours, *candidate));
        }
    }

    best.map(|(_, cell)| cell)
}
