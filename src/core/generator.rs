//! Tile generation for empty cells.

use crate::core::selector::WeightedSelector;
use crate::core::tile::{Tile, TileFactory};
use crate::types::{Position, TileKind};

/// Source of new tiles for refills. The position is the cell the tile will
/// first occupy.
pub trait TileGenerator {
    fn generate(&mut self, position: Position) -> Tile;
}

/// Generator that draws a tile kind from a weighted selector and hands it to
/// a mode's tile factory. Each draw advances only the selector's RNG stream;
/// the weight table is owned by the mode policy.
#[derive(Debug, Clone)]
pub struct WeightedGenerator {
    selector: WeightedSelector<TileKind>,
    factory: TileFactory,
}

impl WeightedGenerator {
    pub fn new(selector: WeightedSelector<TileKind>, factory: TileFactory) -> Self {
        Self { selector, factory }
    }

    pub fn selector(&self) -> &WeightedSelector<TileKind> {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut WeightedSelector<TileKind> {
        &mut self.selector
    }

    pub fn factory(&self) -> TileFactory {
        self.factory
    }
}

impl TileGenerator for WeightedGenerator {
    fn generate(&mut self, position: Position) -> Tile {
        self.factory.build(self.selector.choose(), position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_builds_from_drawn_kind() {
        let selector = WeightedSelector::new([(TileKind::Basic(2), 1.0)], 3);
        let mut generator = WeightedGenerator::new(
            selector,
            TileFactory::Regular {
                max_value: Some(50),
            },
        );
        let tile = generator.generate((0, 0));
        assert_eq!(tile.kind(), TileKind::Basic(2));
        assert_eq!(tile.value(), 1);
    }

    #[test]
    fn test_generate_does_not_touch_weights() {
        let selector =
            WeightedSelector::new([(TileKind::Basic(1), 4.0), (TileKind::Basic(2), 1.0)], 3);
        let mut generator = WeightedGenerator::new(selector, TileFactory::Level);
        for position in [(0, 0), (0, 1), (1, 0)] {
            generator.generate(position);
        }
        assert_eq!(generator.selector().weight(&TileKind::Basic(1)), Some(4.0));
        assert_eq!(generator.selector().weight(&TileKind::Basic(2)), Some(1.0));
        assert_eq!(generator.selector().len(), 2);
    }
}
