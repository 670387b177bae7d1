//! Nim: players alternately take 1 to `max_take` objects, whoever takes the
//! last one wins. Scores are from player one's point of view.

use crate::game_theory::GameNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NimNode {
    pub pile: u32,
    pub max_take: u32,
    pub player_one_to_move: bool,
}

impl NimNode {
    pub fn new(pile: u32, max_take: u32) -> Self {
        Self {
            pile,
            max_take,
            player_one_to_move: true,
        }
    }

    /// True when the player to move loses against perfect play.
    pub fn is_losing_for_mover(&self) -> bool {
        self.pile % self.max_take.saturating_add(1) == 0
    }
}

impl GameNode for NimNode {
    type Children = Vec<NimNode>;

    fn evaluate(&self) -> f32 {
        let mover_score = if self.pile == 0 {
            // the previous player took the last object
            -1.0
        } else if self.is_losing_for_mover() {
            -0.5
        } else {
            0.5
        };

        if self.player_one_to_move {
            mover_score
        } else {
            -mover_score
        }
    }

    fn is_terminal(&self) -> bool {
        self.pile == 0
    }

    fn child_nodes(&self) -> Vec<NimNode> {
        (1..=self.max_take.min(self.pile))
            .map(|take| NimNode {
                pile: self.pile - take,
                max_take: self.max_take,
                player_one_to_move: !self.player_one_to_move,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_take_one_to_max() {
        let piles: Vec<u32> = NimNode::new(5, 3)
            .child_nodes()
            .into_iter()
            .map(|child| child.pile)
            .collect();
        assert_eq!(piles, vec![4, 3, 2]);
    }

    #[test]
    fn test_cannot_take_more_than_the_pile() {
        assert_eq!(NimNode::new(2, 3).child_nodes().len(), 2);
        assert!(NimNode::new(0, 3).child_nodes().is_empty());
    }

    #[test]
    fn test_scores_from_player_one_view() {
        let mut won = NimNode::new(0, 3);
        won.player_one_to_move = false;
        assert_eq!(won.evaluate(), 1.0);
        assert_eq!(NimNode::new(0, 3).evaluate(), -1.0);
        assert_eq!(NimNode::new(4, 3).evaluate(), -0.5);
        assert_eq!(NimNode::new(5, 3).evaluate(), 0.5);
    }
}
